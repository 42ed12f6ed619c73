//! Binary buffer writer with auto-growing capacity.

use crate::ByteOrder;

/// A binary buffer writer that grows automatically as needed.
///
/// # Example
///
/// ```
/// use jce_buffers::{ByteOrder, Writer};
///
/// let mut writer = Writer::new();
/// writer.u8(0x21);
/// writer.i16(8080, ByteOrder::BigEndian);
/// assert_eq!(writer.flush(), [0x21, 0x1f, 0x90]);
/// ```
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
    /// Position where last flush happened.
    pub x0: usize,
    /// Current cursor position.
    pub x: usize,
    /// Allocation size when buffer needs to grow.
    alloc_size: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with the default allocation size (4KB).
    pub fn new() -> Self {
        Self::with_alloc_size(4 * 1024)
    }

    /// Creates a new writer with custom allocation size.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        Self {
            uint8: vec![0u8; alloc_size],
            x0: 0,
            x: 0,
            alloc_size,
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.x - self.x0
    }

    pub fn is_empty(&self) -> bool {
        self.x == self.x0
    }

    /// Ensures the buffer has at least `capacity` bytes available.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let remaining = self.uint8.len() - self.x;
        if remaining < capacity {
            let total = self.uint8.len() - self.x0;
            let required = capacity - remaining;
            let total_required = total + required;
            let new_size = if total_required <= self.alloc_size {
                self.alloc_size
            } else {
                total_required * 2
            };
            self.grow(new_size);
        }
    }

    fn grow(&mut self, new_size: usize) {
        let x0 = self.x0;
        let x = self.x;
        let mut new_buf = vec![0u8; new_size];
        new_buf[..x - x0].copy_from_slice(&self.uint8[x0..x]);
        self.uint8 = new_buf;
        self.x = x - x0;
        self.x0 = 0;
    }

    /// Discards everything written since the last flush.
    pub fn reset(&mut self) {
        self.x = self.x0;
    }

    /// Returns the written data and advances the flush position.
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        result
    }

    #[inline]
    fn put<const N: usize>(&mut self, bytes: [u8; N]) {
        self.ensure_capacity(N);
        self.uint8[self.x..self.x + N].copy_from_slice(&bytes);
        self.x += N;
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.put([val]);
    }

    /// Writes a signed 8-bit integer.
    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.put([val as u8]);
    }

    /// Writes a signed 16-bit integer.
    #[inline]
    pub fn i16(&mut self, val: i16, order: ByteOrder) {
        self.put(order.i16_bytes(val));
    }

    /// Writes an unsigned 32-bit integer.
    #[inline]
    pub fn u32(&mut self, val: u32, order: ByteOrder) {
        self.put(order.u32_bytes(val));
    }

    /// Writes a signed 32-bit integer.
    #[inline]
    pub fn i32(&mut self, val: i32, order: ByteOrder) {
        self.put(order.i32_bytes(val));
    }

    /// Writes a signed 64-bit integer.
    #[inline]
    pub fn i64(&mut self, val: i64, order: ByteOrder) {
        self.put(order.i64_bytes(val));
    }

    /// Writes a 32-bit IEEE 754 float.
    #[inline]
    pub fn f32(&mut self, val: f32, order: ByteOrder) {
        self.put(order.f32_bytes(val));
    }

    /// Writes a 64-bit IEEE 754 float.
    #[inline]
    pub fn f64(&mut self, val: f64, order: ByteOrder) {
        self.put(order.f64_bytes(val));
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(buf);
        self.x += length;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BE: ByteOrder = ByteOrder::BigEndian;
    const LE: ByteOrder = ByteOrder::LittleEndian;

    #[test]
    fn test_u8() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x01, 0x02]);
    }

    #[test]
    fn test_i8_negative() {
        let mut writer = Writer::new();
        writer.i8(-2i8);
        assert_eq!(writer.flush(), [0xfe]);
    }

    #[test]
    fn test_i16_both_orders() {
        let mut writer = Writer::new();
        writer.i16(443, BE);
        writer.i16(443, LE);
        assert_eq!(writer.flush(), [0x01, 0xbb, 0xbb, 0x01]);
    }

    #[test]
    fn test_i32_big_endian() {
        let mut writer = Writer::new();
        writer.i32(0x7119_a3b4, BE);
        assert_eq!(writer.flush(), [0x71, 0x19, 0xa3, 0xb4]);
    }

    #[test]
    fn test_i64_little_endian() {
        let mut writer = Writer::new();
        writer.i64(1, LE);
        assert_eq!(writer.flush(), [1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_f32_big_endian() {
        let mut writer = Writer::new();
        writer.f32(1.0, BE);
        assert_eq!(writer.flush(), [0x3f, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn test_flush_multiple() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        assert_eq!(writer.flush(), [0x01]);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x02]);
    }

    #[test]
    fn test_reset_discards_unflushed() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        writer.flush();
        writer.buf(&[2, 3, 4]);
        assert_eq!(writer.len(), 3);
        writer.reset();
        assert!(writer.is_empty());
        writer.u8(0x05);
        assert_eq!(writer.flush(), [0x05]);
    }

    #[test]
    fn test_grows_past_alloc_size() {
        let mut writer = Writer::with_alloc_size(4);
        writer.buf(&[7u8; 10]);
        writer.i32(-1, BE);
        let data = writer.flush();
        assert_eq!(data.len(), 14);
        assert_eq!(&data[10..], [0xff; 4]);
    }
}
