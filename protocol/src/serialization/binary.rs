//! Canonical binary layout.
//!
//! Integers are fixed-width little-endian unless the protocol calls for a
//! varint. Sub-objects are concatenated raw, with no framing of their own;
//! the field order of each object is therefore part of the wire format.

use super::error::EncodingError;
use super::varint;

/// Longest string that fits behind the one-byte length prefix.
pub const MAX_SHORT_STRING_LEN: usize = u8::MAX as usize;

/// An object with a canonical byte representation.
pub trait BinaryEncode {
    /// Appends the canonical bytes of `self` to `buf`.
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError>;

    /// Returns the canonical bytes of `self`.
    fn to_binary(&self) -> Result<Vec<u8>, EncodingError> {
        let mut buf = Vec::with_capacity(64);
        self.write_binary(&mut buf)?;
        Ok(buf)
    }
}

impl<T: BinaryEncode> BinaryEncode for Option<T> {
    /// `0x00` when absent, `0x01` followed by the value when present.
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        match self {
            Some(value) => {
                buf.push(0x01);
                value.write_binary(buf)
            }
            None => {
                buf.push(0x00);
                Ok(())
            }
        }
    }
}

impl<T: BinaryEncode> BinaryEncode for Vec<T> {
    /// Varint element count followed by each element.
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        varint::write(self.len() as u64, buf);
        self.iter().try_for_each(|item| item.write_binary(buf))
    }
}

pub fn write_u16(n: u16, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&n.to_le_bytes());
}

pub fn write_u32(n: u32, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&n.to_le_bytes());
}

pub fn write_u64(n: u64, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&n.to_le_bytes());
}

/// Writes a string as one length byte followed by its raw UTF-8 bytes.
///
/// Strings longer than [`MAX_SHORT_STRING_LEN`] bytes are rejected rather
/// than written with a wrapped length byte.
pub fn write_short_string(
    field: &'static str,
    value: &str,
    buf: &mut Vec<u8>,
) -> Result<(), EncodingError> {
    let len = value.len();
    let prefix = u8::try_from(len).map_err(|_| EncodingError::StringTooLong {
        field,
        len,
        max: MAX_SHORT_STRING_LEN,
    })?;
    buf.push(prefix);
    buf.extend_from_slice(value.as_bytes());
    Ok(())
}

/// Writes a byte vector as a varint length followed by the raw bytes.
pub fn write_var_bytes(bytes: &[u8], buf: &mut Vec<u8>) {
    varint::write(bytes.len() as u64, buf);
    buf.extend_from_slice(bytes);
}

/// Borrows a field the caller was expected to set, or names it in the error.
pub fn require<'a, T>(value: &'a Option<T>, field: &'static str) -> Result<&'a T, EncodingError> {
    value.as_ref().ok_or(EncodingError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Byte(u8);

    impl BinaryEncode for Byte {
        fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
            buf.push(self.0);
            Ok(())
        }
    }

    #[test]
    fn fixed_width_is_little_endian() {
        let mut buf = Vec::new();
        write_u16(0x0102, &mut buf);
        write_u32(0x0304_0506, &mut buf);
        write_u64(7, &mut buf);
        assert_eq!(
            buf,
            vec![0x02, 0x01, 0x06, 0x05, 0x04, 0x03, 7, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn short_string_prefix() {
        let mut buf = Vec::new();
        write_short_string("name", "gxb", &mut buf).unwrap();
        assert_eq!(buf, vec![3, b'g', b'x', b'b']);
    }

    #[test]
    fn short_string_at_limit() {
        let name = "a".repeat(255);
        let mut buf = Vec::new();
        write_short_string("name", &name, &mut buf).unwrap();
        assert_eq!(buf[0], 255);
        assert_eq!(buf.len(), 256);
    }

    #[test]
    fn short_string_over_limit_is_rejected() {
        let name = "a".repeat(256);
        let mut buf = Vec::new();
        let err = write_short_string("name", &name, &mut buf).unwrap_err();
        assert_eq!(
            err,
            EncodingError::StringTooLong {
                field: "name",
                len: 256,
                max: 255
            }
        );
        assert!(buf.is_empty(), "nothing is written for a rejected string");
    }

    #[test]
    fn optional_and_vec_framing() {
        assert_eq!(None::<Byte>.to_binary().unwrap(), vec![0x00]);
        assert_eq!(Some(Byte(9)).to_binary().unwrap(), vec![0x01, 9]);
        assert_eq!(vec![Byte(1), Byte(2)].to_binary().unwrap(), vec![2, 1, 2]);
        assert_eq!(Vec::<Byte>::new().to_binary().unwrap(), vec![0]);
    }

    #[test]
    fn var_bytes() {
        let mut buf = Vec::new();
        write_var_bytes(&[0xaa; 130], &mut buf);
        assert_eq!(&buf[..2], &[0x82, 0x01]);
        assert_eq!(buf.len(), 132);
    }

    #[test]
    fn require_names_missing_field() {
        let absent: Option<u8> = None;
        assert_eq!(
            require(&absent, "fee"),
            Err(EncodingError::MissingField("fee"))
        );
        assert_eq!(require(&Some(3u8), "fee"), Ok(&3));
    }
}
