//! Wire type codes and protocol limits.

use std::fmt;

/// Largest tag a field header can carry.
pub const MAX_TAG: u32 = 255;

/// Hard cap on the encoded length of a string or byte buffer.
pub const MAX_STRING_LENGTH: usize = 104_857_600;

/// Tags below this value fit in the high nibble of a single header byte.
pub(crate) const SHORT_TAG_LIMIT: u32 = 15;

/// The 4-bit type code carried in the low nibble of every field header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Byte = 0,
    Short = 1,
    Int = 2,
    Long = 3,
    Float = 4,
    Double = 5,
    String1 = 6,
    String4 = 7,
    Map = 8,
    List = 9,
    StructBegin = 10,
    StructEnd = 11,
    Zero = 12,
    SimpleList = 13,
}

impl WireType {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => WireType::Byte,
            1 => WireType::Short,
            2 => WireType::Int,
            3 => WireType::Long,
            4 => WireType::Float,
            5 => WireType::Double,
            6 => WireType::String1,
            7 => WireType::String4,
            8 => WireType::Map,
            9 => WireType::List,
            10 => WireType::StructBegin,
            11 => WireType::StructEnd,
            12 => WireType::Zero,
            13 => WireType::SimpleList,
            _ => return None,
        })
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Payload width for the fixed-size types, `None` for everything else.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            WireType::Byte => Some(1),
            WireType::Short => Some(2),
            WireType::Int | WireType::Float => Some(4),
            WireType::Long | WireType::Double => Some(8),
            WireType::StructEnd | WireType::Zero => Some(0),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WireType::Byte => "byte",
            WireType::Short => "short",
            WireType::Int => "int",
            WireType::Long => "long",
            WireType::Float => "float",
            WireType::Double => "double",
            WireType::String1 => "string1",
            WireType::String4 => "string4",
            WireType::Map => "map",
            WireType::List => "list",
            WireType::StructBegin => "struct_begin",
            WireType::StructEnd => "struct_end",
            WireType::Zero => "zero",
            WireType::SimpleList => "simple_list",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
