//! Binary buffer reader with cursor tracking.

use crate::{BufferError, ByteOrder};

/// A binary buffer reader over a borrowed byte slice.
///
/// Every read is bounds-checked: running past the end returns
/// [`BufferError::EndOfBuffer`] and leaves the cursor where it was.
///
/// # Example
///
/// ```
/// use jce_buffers::{ByteOrder, Reader};
///
/// let data = [0x21, 0x1f, 0x90];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8(), Ok(0x21));
/// assert_eq!(reader.i16(ByteOrder::BigEndian), Ok(8080));
/// assert!(reader.is_at_end());
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    pub fn is_at_end(&self) -> bool {
        self.x >= self.end
    }

    /// Checks that `n` more bytes are available from the current cursor.
    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        let remaining = self.size();
        if n > remaining {
            Err(BufferError::EndOfBuffer {
                needed: n,
                remaining,
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(bytes)
    }

    /// Advances the cursor by `length` bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.check(length)?;
        self.x += length;
        Ok(())
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        Ok(self.take::<1>()?[0])
    }

    #[inline]
    pub fn i8(&mut self) -> Result<i8, BufferError> {
        Ok(self.take::<1>()?[0] as i8)
    }

    #[inline]
    pub fn i16(&mut self, order: ByteOrder) -> Result<i16, BufferError> {
        Ok(order.i16_from(self.take()?))
    }

    #[inline]
    pub fn u32(&mut self, order: ByteOrder) -> Result<u32, BufferError> {
        Ok(order.u32_from(self.take()?))
    }

    #[inline]
    pub fn i32(&mut self, order: ByteOrder) -> Result<i32, BufferError> {
        Ok(order.i32_from(self.take()?))
    }

    #[inline]
    pub fn i64(&mut self, order: ByteOrder) -> Result<i64, BufferError> {
        Ok(order.i64_from(self.take()?))
    }

    #[inline]
    pub fn f32(&mut self, order: ByteOrder) -> Result<f32, BufferError> {
        Ok(order.f32_from(self.take()?))
    }

    #[inline]
    pub fn f64(&mut self, order: ByteOrder) -> Result<f64, BufferError> {
        Ok(order.f64_from(self.take()?))
    }

    /// Returns a subslice of `size` bytes and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let x = self.x;
        let end = x + size;
        let bin = &self.uint8[x..end];
        self.x = end;
        Ok(bin)
    }
}
