//! Codec configuration.

use jce_buffers::ByteOrder;

use crate::charset::Charset;
use crate::constants::MAX_STRING_LENGTH;

/// Default limit on struct/list/map nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings shared by one encode or decode call.
///
/// Passed by value into the codec; nothing here is global. Both peers must
/// agree on `charset` and on the two byte orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JceConfig {
    /// Charset for text fields whose schema does not pin one.
    pub charset: Charset,
    /// Byte order of Short/Int/Long payloads and `String4` length prefixes.
    pub integer_order: ByteOrder,
    /// Byte order of Float/Double payloads.
    pub float_order: ByteOrder,
    /// Maximum nesting of structs, lists and maps.
    pub max_depth: usize,
    /// Maximum encoded length of a string or byte buffer.
    pub max_string_len: usize,
}

impl Default for JceConfig {
    fn default() -> Self {
        Self {
            charset: Charset::Gbk,
            integer_order: ByteOrder::BigEndian,
            float_order: ByteOrder::BigEndian,
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_len: MAX_STRING_LENGTH,
        }
    }
}

impl JceConfig {
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Sets the byte order of integers and floats alike.
    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.integer_order = order;
        self.float_order = order;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }
}
