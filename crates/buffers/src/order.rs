//! Byte order selector for multi-byte primitives.

/// Byte order of a multi-byte integer or float on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Network order. Most significant byte first.
    #[default]
    BigEndian,
    LittleEndian,
}

macro_rules! order_conversions {
    ($($to:ident / $from:ident : $ty:ty = $n:literal),* $(,)?) => {
        impl ByteOrder {
            $(
                #[inline]
                pub fn $to(self, val: $ty) -> [u8; $n] {
                    match self {
                        ByteOrder::BigEndian => val.to_be_bytes(),
                        ByteOrder::LittleEndian => val.to_le_bytes(),
                    }
                }

                #[inline]
                pub fn $from(self, bytes: [u8; $n]) -> $ty {
                    match self {
                        ByteOrder::BigEndian => <$ty>::from_be_bytes(bytes),
                        ByteOrder::LittleEndian => <$ty>::from_le_bytes(bytes),
                    }
                }
            )*
        }
    };
}

order_conversions! {
    i16_bytes / i16_from: i16 = 2,
    u32_bytes / u32_from: u32 = 4,
    i32_bytes / i32_from: i32 = 4,
    i64_bytes / i64_from: i64 = 8,
    f32_bytes / f32_from: f32 = 4,
    f64_bytes / f64_from: f64 = 8,
}
