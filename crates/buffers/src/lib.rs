//! Binary buffers: an auto-growing [`Writer`] and a bounds-checked [`Reader`].
//!
//! Multi-byte values are written and read in an explicit [`ByteOrder`], so the
//! same primitives serve peers that disagree on endianness.

mod order;
mod reader;
mod writer;

pub use order::ByteOrder;
pub use reader::Reader;
pub use writer::Writer;

/// Error returned by the bounds-checked [`Reader`] methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("end of buffer: needed {needed} bytes, {remaining} remaining")]
    EndOfBuffer { needed: usize, remaining: usize },
}
