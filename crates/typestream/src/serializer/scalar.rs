// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-width scalar codec, little-endian.
//!
//! Each read consumes exactly `size_of::<T>()` bytes and fails
//! [`EndOfInput`](crate::Error::EndOfInput) on a short read. Byte order is
//! little-endian everywhere; there is no negotiation.

use super::Serializer;
use crate::error::{Error, Result};

/// Generate a write/read method pair for one fixed-width scalar.
macro_rules! impl_scalar_le {
    ($write:ident, $read:ident, $t:ty, $size:expr) => {
        pub fn $write(&mut self, val: $t) -> Result<()> {
            self.stream_mut().write_bytes(&val.to_le_bytes())
        }

        pub fn $read(&mut self) -> Result<$t> {
            let mut buf = [0u8; $size];
            self.stream_mut().read_exact_into(&mut buf)?;
            Ok(<$t>::from_le_bytes(buf))
        }
    };
}

impl Serializer {
    impl_scalar_le!(write_u16, read_u16, u16, 2);
    impl_scalar_le!(write_u32, read_u32, u32, 4);
    impl_scalar_le!(write_u64, read_u64, u64, 8);
    impl_scalar_le!(write_i16, read_i16, i16, 2);
    impl_scalar_le!(write_i32, read_i32, i32, 4);
    impl_scalar_le!(write_i64, read_i64, i64, 8);
    impl_scalar_le!(write_f32, read_f32, f32, 4);
    impl_scalar_le!(write_f64, read_f64, f64, 8);

    pub fn write_u8(&mut self, val: u8) -> Result<()> {
        self.stream_mut().write_byte(val)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.stream_mut().read_byte()
    }

    pub fn write_i8(&mut self, val: i8) -> Result<()> {
        self.write_u8(val as u8)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Booleans encode as one byte; decoding treats any nonzero byte as true.
    pub fn write_bool(&mut self, val: bool) -> Result<()> {
        self.write_u8(u8::from(val))
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Characters encode as one 16-bit code unit. Code points above the BMP
    /// cannot be represented and degrade to U+FFFD.
    pub fn write_char(&mut self, val: char) -> Result<()> {
        let code = u32::from(val);
        let unit = if code > 0xFFFF {
            log::trace!("char U+{:04X} outside BMP, writing replacement", code);
            0xFFFD
        } else {
            code as u16
        };
        self.write_u16(unit)
    }

    pub fn read_char(&mut self) -> Result<char> {
        let unit = self.read_u16()?;
        char::from_u32(u32::from(unit)).ok_or_else(|| {
            Error::InvalidData(format!("surrogate code unit 0x{:04X} is not a char", unit))
        })
    }

    /// Legacy single-byte character path, kept for archives written with the
    /// 8-bit convention. Non-ASCII characters degrade to `?` on write; bytes
    /// decode through the Latin-1 mapping.
    pub fn write_char8(&mut self, val: char) -> Result<()> {
        let byte = if val.is_ascii() { val as u8 } else { b'?' };
        self.write_u8(byte)
    }

    pub fn read_char8(&mut self) -> Result<char> {
        Ok(char::from(self.read_u8()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(write: impl FnOnce(&mut Serializer)) -> Serializer {
        let mut writer = Serializer::in_memory();
        write(&mut writer);
        Serializer::from_bytes(writer.into_bytes().expect("into_bytes"))
    }

    macro_rules! scalar_extremes_test {
        ($name:ident, $t:ty, $write:ident, $read:ident) => {
            #[test]
            fn $name() {
                let values: &[$t] = &[<$t>::MIN, <$t>::MAX, 0 as $t];
                let mut reader = round_trip(|w| {
                    for v in values {
                        w.$write(*v).expect("write should succeed");
                    }
                });
                for v in values {
                    assert_eq!(reader.$read().expect("read should succeed"), *v);
                }
            }
        };
    }

    scalar_extremes_test!(test_u8_extremes, u8, write_u8, read_u8);
    scalar_extremes_test!(test_i8_extremes, i8, write_i8, read_i8);
    scalar_extremes_test!(test_u16_extremes, u16, write_u16, read_u16);
    scalar_extremes_test!(test_i16_extremes, i16, write_i16, read_i16);
    scalar_extremes_test!(test_u32_extremes, u32, write_u32, read_u32);
    scalar_extremes_test!(test_i32_extremes, i32, write_i32, read_i32);
    scalar_extremes_test!(test_u64_extremes, u64, write_u64, read_u64);
    scalar_extremes_test!(test_i64_extremes, i64, write_i64, read_i64);

    #[test]
    fn test_float_extremes_and_nan() {
        let values = [
            0.0f64,
            -0.0,
            f64::MIN,
            f64::MAX,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NAN,
            f64::MIN_POSITIVE,
        ];
        let mut reader = round_trip(|w| {
            for v in values {
                w.write_f64(v).expect("write should succeed");
            }
        });
        for v in values {
            let got = reader.read_f64().expect("read should succeed");
            // NaN compares by bit pattern, not numerically.
            assert_eq!(got.to_bits(), v.to_bits());
        }

        let values = [0.0f32, f32::MIN, f32::MAX, f32::INFINITY, f32::NAN];
        let mut reader = round_trip(|w| {
            for v in values {
                w.write_f32(v).expect("write should succeed");
            }
        });
        for v in values {
            assert_eq!(
                reader.read_f32().expect("read should succeed").to_bits(),
                v.to_bits()
            );
        }
    }

    #[test]
    fn test_little_endian_layout() {
        let mut writer = Serializer::in_memory();
        writer.write_u32(0x1234_5678).expect("write");
        writer.write_i16(-2).expect("write");
        let bytes = writer.into_bytes().expect("into_bytes");
        assert_eq!(bytes, vec![0x78, 0x56, 0x34, 0x12, 0xFE, 0xFF]);
    }

    #[test]
    fn test_bool_decodes_nonzero_as_true() {
        let mut reader = Serializer::from_bytes(vec![0, 1, 0x7F]);
        assert!(!reader.read_bool().expect("read"));
        assert!(reader.read_bool().expect("read"));
        assert!(reader.read_bool().expect("read"));
    }

    #[test]
    fn test_char_round_trip_bmp() {
        let mut reader = round_trip(|w| {
            w.write_char('A').expect("write");
            w.write_char('é').expect("write");
            w.write_char('\u{1234}').expect("write");
        });
        assert_eq!(reader.read_char().expect("read"), 'A');
        assert_eq!(reader.read_char().expect("read"), 'é');
        assert_eq!(reader.read_char().expect("read"), '\u{1234}');
    }

    #[test]
    fn test_char_above_bmp_degrades_to_replacement() {
        let mut reader = round_trip(|w| w.write_char('\u{1F600}').expect("write"));
        assert_eq!(reader.read_char().expect("read"), '\u{FFFD}');
    }

    #[test]
    fn test_surrogate_code_unit_fails_invalid_data() {
        let mut reader = Serializer::from_bytes(0xD800u16.to_le_bytes().to_vec());
        match reader.read_char().unwrap_err() {
            Error::InvalidData(_) => {}
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_char8_legacy_path() {
        let mut reader = round_trip(|w| {
            w.write_char8('A').expect("write");
            w.write_char8('é').expect("write");
        });
        assert_eq!(reader.read_char8().expect("read"), 'A');
        assert_eq!(reader.read_char8().expect("read"), '?');

        // Latin-1 widening on the read side.
        let mut reader = Serializer::from_bytes(vec![0xE9]);
        assert_eq!(reader.read_char8().expect("read"), 'é');
    }

    #[test]
    fn test_truncated_scalar_fails_end_of_input() {
        let mut reader = Serializer::from_bytes(vec![1, 2, 3]);
        match reader.read_u32().unwrap_err() {
            Error::EndOfInput => {}
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_randomized_round_trips() {
        let mut writer = Serializer::in_memory();
        let mut expected = Vec::new();
        for _ in 0..64 {
            let v = fastrand::i64(..);
            writer.write_i64(v).expect("write");
            expected.push(v);
        }
        let mut reader = Serializer::from_bytes(writer.into_bytes().expect("into_bytes"));
        for v in expected {
            assert_eq!(reader.read_i64().expect("read"), v);
        }
    }
}
