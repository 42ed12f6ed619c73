//! Skip engine: discards one field's payload by wire type alone.
//!
//! The header has already been consumed. Containers recurse through their
//! own element headers, so nothing about the field's declared type is
//! needed. Every container level counts against [`JceConfig::max_depth`].

use jce_buffers::Reader;
use tracing::trace;

use crate::config::JceConfig;
use crate::constants::WireType;
use crate::decoder::read_count;
use crate::error::{HeaderError, JceError};
use crate::head::read_head;

/// Skips the payload of a field whose header carried `wire_type`.
///
/// `depth` is the number of containers already open around the field.
pub fn skip_field(
    reader: &mut Reader<'_>,
    wire_type: WireType,
    config: &JceConfig,
    depth: usize,
) -> Result<(), JceError> {
    if let Some(width) = wire_type.fixed_width() {
        reader.skip(width)?;
        return Ok(());
    }
    match wire_type {
        WireType::String1 => {
            let len = reader.u8()? as usize;
            reader.skip(len)?;
        }
        WireType::String4 => {
            let len = reader.u32(config.integer_order)? as usize;
            if len > config.max_string_len {
                return Err(JceError::OversizedString(len));
            }
            reader.skip(len)?;
        }
        WireType::Map => {
            let depth = descend(depth, config)?;
            let count = read_count(reader, config, 2)?;
            trace!(count, depth, "skipping map");
            for _ in 0..count * 2 {
                skip_element(reader, config, depth)?;
            }
        }
        WireType::List => {
            let depth = descend(depth, config)?;
            let count = read_count(reader, config, 1)?;
            trace!(count, depth, "skipping list");
            for _ in 0..count {
                skip_element(reader, config, depth)?;
            }
        }
        WireType::StructBegin => {
            let depth = descend(depth, config)?;
            skip_to_struct_end(reader, config, depth)?;
        }
        WireType::SimpleList => {
            let element = read_head(reader)?.ok_or(JceError::TruncatedBuffer {
                needed: 1,
                remaining: 0,
            })?;
            if element.tag != 0 || element.wire_type != WireType::Byte {
                return Err(HeaderError::BadSimpleListElement {
                    tag: element.tag,
                    wire_type: element.wire_type,
                }
                .into());
            }
            let len = read_count(reader, config, 1)?;
            if len > config.max_string_len {
                return Err(JceError::OversizedBuffer(len));
            }
            reader.skip(len)?;
        }
        // Fixed-width types returned above.
        _ => {}
    }
    Ok(())
}

/// Consumes fields up to and including the next `StructEnd` at this level.
pub fn skip_to_struct_end(
    reader: &mut Reader<'_>,
    config: &JceConfig,
    depth: usize,
) -> Result<(), JceError> {
    loop {
        let head = read_head(reader)?.ok_or(JceError::UnterminatedStruct)?;
        if head.wire_type == WireType::StructEnd {
            return Ok(());
        }
        trace!(tag = head.tag, wire_type = %head.wire_type, "skipping unread struct field");
        skip_field(reader, head.wire_type, config, depth)?;
    }
}

fn skip_element(reader: &mut Reader<'_>, config: &JceConfig, depth: usize) -> Result<(), JceError> {
    let head = read_head(reader)?.ok_or(JceError::TruncatedBuffer {
        needed: 1,
        remaining: 0,
    })?;
    skip_field(reader, head.wire_type, config, depth)
}

/// Returns the depth inside one more container, or fails past the limit.
pub(crate) fn descend(depth: usize, config: &JceConfig) -> Result<usize, JceError> {
    let depth = depth + 1;
    if depth > config.max_depth {
        return Err(JceError::NestingTooDeep(config.max_depth));
    }
    Ok(depth)
}
