//! Fixed-offset, big-endian record fields.
//!
//! Every record of the format is a flat byte block. Fields are described by
//! their offset into the block (the magic is not part of it) and read or
//! written through [Field] and [TextField] instead of relying on struct
//! layout.

use crate::decode::DecodeError;
use chrono::{DateTime, Utc};
use encoding_rs::UTF_8;
use std::marker::PhantomData;

pub trait BigEndian: Copy {
    const WIDTH: usize;

    fn read(bytes: &[u8]) -> Self;
    fn write(self, bytes: &mut [u8]);
}

macro_rules! impl_big_endian {
    ($($ty:ty),*) => {$(
        impl BigEndian for $ty {
            const WIDTH: usize = size_of::<$ty>();

            fn read(bytes: &[u8]) -> Self {
                <$ty>::from_be_bytes(bytes[..Self::WIDTH].try_into().unwrap())
            }

            fn write(self, bytes: &mut [u8]) {
                bytes[..Self::WIDTH].copy_from_slice(&self.to_be_bytes());
            }
        }
    )*};
}

impl_big_endian!(u8, i8, u16, i16, u32, i32);

#[derive(Debug, Clone, Copy)]
pub struct Field<T> {
    pub offset: usize,
    ty: PhantomData<T>,
}

impl<T: BigEndian> Field<T> {
    pub const fn at(offset: usize) -> Self {
        Self {
            offset,
            ty: PhantomData,
        }
    }

    pub fn get(&self, record: &[u8]) -> T {
        T::read(&record[self.offset..])
    }

    pub fn set(&self, record: &mut [u8], value: T) {
        value.write(&mut record[self.offset..]);
    }

    /// The field `index` elements further on, for arrays of `T`.
    pub const fn nth(&self, index: usize) -> Self {
        Self::at(self.offset + index * T::WIDTH)
    }
}

/// A NUL padded string of fixed width.
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    pub offset: usize,
    pub width: usize,
}

impl TextField {
    pub const fn at(offset: usize, width: usize) -> Self {
        Self { offset, width }
    }

    pub fn get(&self, record: &[u8]) -> String {
        let field_bytes = &record[self.offset..self.offset + self.width];

        let end = field_bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.width);

        let (text, _) = UTF_8.decode_without_bom_handling(&field_bytes[..end]);
        text.trim_end_matches(' ').to_string()
    }

    /// Stores at most `width - 1` bytes so the field stays NUL terminated.
    pub fn set(&self, record: &mut [u8], value: &str) {
        let max_content = self.width - 1;
        let truncated = if value.len() > max_content {
            &value[..value.floor_char_boundary(max_content)]
        } else {
            value
        };
        let field = &mut record[self.offset..self.offset + self.width];
        field.fill(0);
        field[..truncated.len()].copy_from_slice(truncated.as_bytes());
    }
}

/// Stored times are unix seconds, zero meaning "no time".
pub fn decode_time(seconds: u32) -> Option<DateTime<Utc>> {
    if seconds == 0 {
        return None;
    }
    DateTime::from_timestamp(i64::from(seconds), 0)
}

pub fn encode_time(time: Option<DateTime<Utc>>) -> u32 {
    time.and_then(|time| u32::try_from(time.timestamp()).ok()).unwrap_or(0)
}

/// Stored depths are centimeters, zero meaning "no depth".
pub fn decode_depth(centimeters: u16) -> Option<f64> {
    (centimeters != 0).then(|| f64::from(centimeters) / 100.0)
}

pub fn encode_depth(meters: Option<f64>) -> u16 {
    // float to int casts saturate, so out of range depths clamp
    (meters.unwrap_or(0.0) * 100.0).round() as u16
}

/// Forward-only view over the input buffer.
pub struct Input<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Input<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Consumes the next `len` bytes, failing with `UnexpectedEof(what)` if
    /// the buffer is shorter.
    pub fn take(&mut self, len: usize, what: &'static str) -> Result<&'a [u8], DecodeError> {
        let bytes = self.peek_at(self.position, len, what)?;
        self.position += len;
        Ok(bytes)
    }

    /// Reads `len` bytes at an absolute offset without moving the cursor.
    pub fn peek_at(
        &self,
        offset: usize,
        len: usize,
        what: &'static str,
    ) -> Result<&'a [u8], DecodeError> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(DecodeError::UnexpectedEof(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_big_endian() {
        let mut record = [0u8; 8];
        Field::<u16>::at(0).set(&mut record, 0x1234);
        Field::<i32>::at(4).set(&mut record, -2);
        assert_eq!(record, [0x12, 0x34, 0, 0, 0xff, 0xff, 0xff, 0xfe]);
        assert_eq!(Field::<i16>::at(4).get(&record), -1);
    }

    #[test]
    fn array_fields_step_by_width() {
        let mut record = [0u8; 6];
        let points = Field::<u16>::at(0);
        points.nth(2).set(&mut record, 7);
        assert_eq!(record, [0, 0, 0, 0, 0, 7]);
    }

    #[test]
    fn text_stops_at_nul_and_trailing_spaces() {
        let field = TextField::at(0, 12);
        assert_eq!(field.get(b"Marker1\0xxxx"), "Marker1");
        assert_eq!(field.get(b"Pier 4      "), "Pier 4");
        assert_eq!(field.get(b"ABCDEFGHIJKL"), "ABCDEFGHIJKL");
    }

    #[test]
    fn text_replaces_invalid_utf8() {
        let field = TextField::at(0, 4);
        assert_eq!(field.get(&[b'A', 0xff, b'B', 0]), "A\u{FFFD}B");
    }

    #[test]
    fn text_is_truncated_at_char_boundary() {
        let field = TextField::at(0, 12);
        let mut record = [0xaau8; 12];
        // "Ä" is 2 bytes in UTF-8, so 10 ASCII + "Ä" = 12 bytes, exceeds 11
        field.set(&mut record, "0123456789Ä");
        assert_eq!(&record[..11], b"0123456789\0");
        assert_eq!(record[11], 0);
        assert_eq!(field.get(&record), "0123456789");
    }

    #[test]
    fn zero_means_no_time() {
        assert_eq!(decode_time(0), None);
        let time = decode_time(1_200_000_000).unwrap();
        assert_eq!(time.to_rfc3339(), "2008-01-10T21:20:00+00:00");
        assert_eq!(encode_time(Some(time)), 1_200_000_000);
        assert_eq!(encode_time(None), 0);
    }

    #[test]
    fn times_outside_the_field_encode_as_zero() {
        let before_epoch = DateTime::from_timestamp(-1, 0);
        assert_eq!(encode_time(before_epoch), 0);
        let too_late = DateTime::from_timestamp(i64::from(u32::MAX) + 1, 0);
        assert_eq!(encode_time(too_late), 0);
    }

    #[test]
    fn depths_are_centimeters() {
        assert_eq!(decode_depth(0), None);
        assert_eq!(decode_depth(1234), Some(12.34));
        assert_eq!(encode_depth(Some(12.34)), 1234);
        assert_eq!(encode_depth(None), 0);
        assert_eq!(encode_depth(Some(-3.0)), 0);
        assert_eq!(encode_depth(Some(1000.0)), u16::MAX);
    }

    #[test]
    fn input_reports_short_reads() {
        let mut input = Input::new(&[1, 2, 3]);
        assert_eq!(input.take(2, "head").unwrap(), &[1, 2]);
        assert!(matches!(
            input.take(2, "tail"),
            Err(DecodeError::UnexpectedEof("tail"))
        ));
        assert_eq!(input.position(), 2);
        assert!(input.peek_at(usize::MAX, 2, "far").is_err());
    }
}
