//! `jce-dump`: decode a JCE payload from stdin to JSON on stdout without a schema.
//!
//! Usage:
//!   jce-dump [--hex] [--charset utf8|gbk] [--little-endian] [--max-depth N]
//!
//! Set `RUST_LOG=jce=trace` to see skipped fields on stderr.

use std::io::{self, Read, Write};

use jce::cli::{dump, parse_args};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let mut buf = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match dump(&buf, &options) {
        Ok(json) => {
            if let Err(e) = io::stdout().write_all(json.as_bytes()) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
