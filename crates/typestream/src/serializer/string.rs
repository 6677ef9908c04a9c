// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Length-prefixed string codec.
//!
//! All three variants share one framing: a signed 32-bit length prefix where
//! `-1` marks a null string with no payload. They differ in what the length
//! counts:
//!
//! - narrow (`string8`): one byte per character, length counts characters;
//!   non-ASCII degrades to `?` in both directions (documented lossy).
//! - wide (`string16`): UTF-16 code units, two bytes each, length counts
//!   code units.
//! - variable-width (`string_utf8`, the default): UTF-8 payload, length
//!   counts encoded **bytes**, not characters.
//!
//! A decoder must know which counting convention produced the length field,
//! or it will consume the wrong number of bytes.

use super::Serializer;
use crate::error::Result;

const NULL_SENTINEL: i32 = -1;

impl Serializer {
    fn read_payload_len(&mut self) -> Result<Option<usize>> {
        let len = self.read_i32()?;
        if len < 0 {
            return Ok(None);
        }
        Ok(Some(len as usize))
    }

    /// Write a narrow string: one byte per character.
    pub fn write_string8(&mut self, val: Option<&str>) -> Result<()> {
        let Some(val) = val else {
            return self.write_i32(NULL_SENTINEL);
        };
        let bytes: Vec<u8> = val
            .chars()
            .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
            .collect();
        self.write_i32(bytes.len() as i32)?;
        self.write_bytes(&bytes)
    }

    /// Read a narrow string. Bytes above 0x7F decode as `?`, mirroring the
    /// lossy write side.
    pub fn read_string8(&mut self) -> Result<Option<String>> {
        let Some(len) = self.read_payload_len()? else {
            return Ok(None);
        };
        let bytes = self.read_bytes(len)?;
        let decoded: String = bytes
            .iter()
            .map(|&b| if b <= 0x7F { char::from(b) } else { '?' })
            .collect();
        Ok(Some(decoded))
    }

    /// Write a wide string: UTF-16 code units, length counts code units.
    pub fn write_string16(&mut self, val: Option<&str>) -> Result<()> {
        let Some(val) = val else {
            return self.write_i32(NULL_SENTINEL);
        };
        let units: Vec<u16> = val.encode_utf16().collect();
        self.write_i32(units.len() as i32)?;
        for unit in units {
            self.write_u16(unit)?;
        }
        Ok(())
    }

    /// Read a wide string. Invalid UTF-16 decodes with replacement
    /// characters; framing errors still fail hard.
    pub fn read_string16(&mut self) -> Result<Option<String>> {
        let Some(len) = self.read_payload_len()? else {
            return Ok(None);
        };
        let mut units = Vec::with_capacity(len);
        for _ in 0..len {
            units.push(self.read_u16()?);
        }
        Ok(Some(String::from_utf16_lossy(&units)))
    }

    /// Write a variable-width string: UTF-8, length counts encoded bytes.
    pub fn write_string_utf8(&mut self, val: Option<&str>) -> Result<()> {
        let Some(val) = val else {
            return self.write_i32(NULL_SENTINEL);
        };
        let bytes = val.as_bytes();
        self.write_i32(bytes.len() as i32)?;
        self.write_bytes(bytes)
    }

    /// Read a variable-width string. Malformed UTF-8 decodes with
    /// replacement characters; a short payload fails
    /// [`EndOfInput`](crate::Error::EndOfInput).
    pub fn read_string_utf8(&mut self) -> Result<Option<String>> {
        let Some(len) = self.read_payload_len()? else {
            return Ok(None);
        };
        let bytes = self.read_bytes(len)?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Default string encoding (variable-width UTF-8).
    pub fn write_string(&mut self, val: Option<&str>) -> Result<()> {
        self.write_string_utf8(val)
    }

    /// Default string decoding (variable-width UTF-8).
    pub fn read_string(&mut self) -> Result<Option<String>> {
        self.read_string_utf8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn reopen(writer: Serializer) -> Serializer {
        Serializer::from_bytes(writer.into_bytes().expect("into_bytes"))
    }

    #[test]
    fn test_ascii_round_trips_across_all_encodings() {
        let text = "k-nearest neighbours, 42!";
        let mut writer = Serializer::in_memory();
        writer.write_string8(Some(text)).expect("write");
        writer.write_string16(Some(text)).expect("write");
        writer.write_string_utf8(Some(text)).expect("write");

        let mut reader = reopen(writer);
        assert_eq!(reader.read_string8().expect("read").as_deref(), Some(text));
        assert_eq!(reader.read_string16().expect("read").as_deref(), Some(text));
        assert_eq!(
            reader.read_string_utf8().expect("read").as_deref(),
            Some(text)
        );
    }

    #[test]
    fn test_null_sentinel_round_trips_in_all_encodings() {
        let mut writer = Serializer::in_memory();
        writer.write_string8(None).expect("write");
        writer.write_string16(None).expect("write");
        writer.write_string_utf8(None).expect("write");
        let bytes = writer.into_bytes().expect("into_bytes");
        // Three -1 length prefixes and nothing else.
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[0..4], &(-1i32).to_le_bytes());

        let mut reader = Serializer::from_bytes(bytes);
        assert_eq!(reader.read_string8().expect("read"), None);
        assert_eq!(reader.read_string16().expect("read"), None);
        assert_eq!(reader.read_string_utf8().expect("read"), None);
    }

    #[test]
    fn test_multibyte_round_trips_wide_and_utf8() {
        let text = "čašica 語 λ";
        let mut writer = Serializer::in_memory();
        writer.write_string16(Some(text)).expect("write");
        writer.write_string_utf8(Some(text)).expect("write");

        let mut reader = reopen(writer);
        assert_eq!(reader.read_string16().expect("read").as_deref(), Some(text));
        assert_eq!(
            reader.read_string_utf8().expect("read").as_deref(),
            Some(text)
        );
    }

    #[test]
    fn test_narrow_encoding_is_lossy_for_multibyte() {
        let mut writer = Serializer::in_memory();
        writer.write_string8(Some("naïve")).expect("write");
        let mut reader = reopen(writer);
        assert_eq!(
            reader.read_string8().expect("read").as_deref(),
            Some("na?ve")
        );
    }

    #[test]
    fn test_utf8_length_counts_bytes_not_chars() {
        // "héllo": 5 chars, 6 UTF-8 bytes.
        let mut writer = Serializer::in_memory();
        writer.write_string_utf8(Some("héllo")).expect("write");
        let bytes = writer.into_bytes().expect("into_bytes");
        assert_eq!(&bytes[0..4], &6i32.to_le_bytes());
        assert_eq!(bytes.len(), 4 + 6);
    }

    #[test]
    fn test_narrow_length_counts_chars() {
        let mut writer = Serializer::in_memory();
        writer.write_string8(Some("héllo")).expect("write");
        let bytes = writer.into_bytes().expect("into_bytes");
        assert_eq!(&bytes[0..4], &5i32.to_le_bytes());
        assert_eq!(bytes.len(), 4 + 5);
    }

    #[test]
    fn test_wide_length_counts_code_units() {
        // U+1F600 takes two UTF-16 code units.
        let mut writer = Serializer::in_memory();
        writer.write_string16(Some("a\u{1F600}")).expect("write");
        let bytes = writer.into_bytes().expect("into_bytes");
        assert_eq!(&bytes[0..4], &3i32.to_le_bytes());
        assert_eq!(bytes.len(), 4 + 6);

        let mut reader = Serializer::from_bytes(bytes);
        assert_eq!(
            reader.read_string16().expect("read").as_deref(),
            Some("a\u{1F600}")
        );
    }

    #[test]
    fn test_truncated_payload_fails_end_of_input() {
        let mut writer = Serializer::in_memory();
        writer.write_string_utf8(Some("hello")).expect("write");
        let mut bytes = writer.into_bytes().expect("into_bytes");
        bytes.truncate(bytes.len() - 2);

        let mut reader = Serializer::from_bytes(bytes);
        match reader.read_string_utf8().unwrap_err() {
            Error::EndOfInput => {}
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_empty_string_is_not_null() {
        let mut writer = Serializer::in_memory();
        writer.write_string(Some("")).expect("write");
        let bytes = writer.into_bytes().expect("into_bytes");
        assert_eq!(&bytes[0..4], &0i32.to_le_bytes());

        let mut reader = Serializer::from_bytes(bytes);
        assert_eq!(reader.read_string().expect("read").as_deref(), Some(""));
    }
}
