//! Handling of protobuf wire-level primitives: varints, zigzag, field keys,
//! fixed-width values, and length-delimited framing.
//!
//! Writers append to a `Vec<u8>` and cannot fail. Readers consume from a
//! `&mut &[u8]` cursor and advance it by exactly the bytes they consume, so
//! a caller that sees a truncation error can retry the same read once more
//! input has been buffered.


use crate::error::{
    Result,
    error,
    ensure,
    bail,
};


/// The 3-bit classifier attached to every field key on the wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum WireType {
    /// Wire type 0, a base-128 varint.
    Varint,
    /// Wire type 1, eight little-endian bytes.
    Fixed64,
    /// Wire type 2, a varint byte count followed by that many bytes.
    LengthDelimited,
    /// Wire type 5, four little-endian bytes.
    Fixed32,
}

impl WireType {
    /// Classify the low 3 bits of a key. Wire types 3 and 4 (groups) and the
    /// unassigned 6 and 7 are rejected.
    pub fn from_raw(raw: u64) -> Result<Self> {
        Ok(match raw {
            0 => WireType::Varint,
            1 => WireType::Fixed64,
            2 => WireType::LengthDelimited,
            5 => WireType::Fixed32,
            _ => bail!(KeyDecode, None, "unknown wire type {}", raw),
        })
    }

    pub fn raw(self) -> u64 {
        match self {
            WireType::Varint => 0,
            WireType::Fixed64 => 1,
            WireType::LengthDelimited => 2,
            WireType::Fixed32 => 5,
        }
    }
}


const MORE_BIT: u8  = 0b10000000;
const LO_7_BITS: u8 = 0b01111111;

/// Longest legal varint: 9 full payload bytes plus a final byte for the top
/// bit of a u64.
const MAX_VARINT_BYTES: usize = 10;

/// Write a variable length unsigned int.
pub fn put_varint(buf: &mut Vec<u8>, mut n: u64) {
    let mut more = true;
    while more {
        let curr_7_bits = (n & (LO_7_BITS as u64)) as u8;
        n >>= 7;
        more = n != 0;
        buf.push(((more as u8) << 7) | curr_7_bits);
    }
}

/// Read a variable length unsigned int.
pub fn get_varint(bytes: &mut &[u8]) -> Result<u64> {
    let mut n: u64 = 0;
    for i in 0..MAX_VARINT_BYTES {
        let (&curr_byte, rest) = match bytes.split_first() {
            Some(split) => split,
            None => bail!(Truncation, None, "unexpected end of chunk"),
        };
        *bytes = rest;
        n |= ((curr_byte & LO_7_BITS) as u64) << (i * 7);
        if curr_byte & MORE_BIT == 0 {
            return Ok(n);
        }
    }
    bail!(Varint, None, "varint too long")
}

/// Zigzag a signed int so that small magnitudes encode as short varints.
pub fn zigzag(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Invert `zigzag`.
pub fn unzigzag(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

/// Write a field key.
pub fn put_key(buf: &mut Vec<u8>, field_number: u64, wire_type: WireType) {
    put_varint(buf, (field_number << 3) | wire_type.raw());
}

/// Read a field key, splitting it into field number and wire type.
pub fn get_key(bytes: &mut &[u8]) -> Result<(u64, WireType)> {
    let key = get_varint(bytes)?;
    let wire_type = WireType::from_raw(key & 0b111)?;
    let field_number = key >> 3;
    ensure!(field_number != 0, KeyDecode, None, "invalid field number");
    Ok((field_number, wire_type))
}

/// Read exactly `len` bytes.
pub fn get_exact<'a>(bytes: &mut &'a [u8], len: usize) -> Result<&'a [u8]> {
    ensure!(bytes.len() >= len, Truncation, None, "unexpected end of chunk");
    let (head, rest) = bytes.split_at(len);
    *bytes = rest;
    Ok(head)
}

/// Write a length-delimited payload: varint byte count, then the bytes.
pub fn put_len_prefixed(buf: &mut Vec<u8>, payload: &[u8]) {
    put_varint(buf, payload.len() as u64);
    buf.extend_from_slice(payload);
}

/// Read a length-delimited payload.
pub fn get_len_prefixed<'a>(bytes: &mut &'a [u8]) -> Result<&'a [u8]> {
    let len = get_varint(bytes)?;
    let len = usize::try_from(len)
        .map_err(|_| error!(Payload, None, "length {} out of range", len))?;
    get_exact(bytes, len)
}

/// Consume a payload of the given wire type without interpreting it.
pub fn skip_field(bytes: &mut &[u8], wire_type: WireType) -> Result<()> {
    match wire_type {
        WireType::Varint => {
            get_varint(bytes)?;
        }
        WireType::Fixed64 => {
            get_exact(bytes, 8)?;
        }
        WireType::LengthDelimited => {
            get_len_prefixed(bytes)?;
        }
        WireType::Fixed32 => {
            get_exact(bytes, 4)?;
        }
    }
    Ok(())
}


#[cfg(test)]
use crate::error::ErrorKind;

#[test]
fn test_varint_round_trip() {
    let mut buf = Vec::new();
    for n in 0..2 << 10 {
        buf.clear();
        put_varint(&mut buf, n);
        let mut slice = buf.as_slice();
        assert_eq!(get_varint(&mut slice).unwrap(), n);
        assert!(slice.is_empty());
    }
}

#[test]
fn test_varint_extremes() {
    for n in [u64::MAX, u64::MAX - 1, 1 << 63, (1 << 32) - 1, 1 << 32] {
        let mut buf = Vec::new();
        put_varint(&mut buf, n);
        assert!(buf.len() <= MAX_VARINT_BYTES);
        assert_eq!(get_varint(&mut buf.as_slice()).unwrap(), n);
    }
}

#[test]
fn test_varint_known_bytes() {
    let mut buf = Vec::new();
    put_varint(&mut buf, 150);
    assert_eq!(buf, [0x96, 0x01]);
    buf.clear();
    put_varint(&mut buf, 86942);
    assert_eq!(buf, [0x9E, 0xA7, 0x05]);
}

#[test]
fn test_varint_truncated() {
    let e = get_varint(&mut &[0x96][..]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Truncation);
}

#[test]
fn test_varint_too_long() {
    let e = get_varint(&mut &[0xFF; 10][..]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Varint);
}

#[test]
fn test_zigzag_small_values() {
    assert_eq!(zigzag(0), 0);
    assert_eq!(zigzag(-1), 1);
    assert_eq!(zigzag(1), 2);
    assert_eq!(zigzag(-2), 3);
    assert_eq!(zigzag(2), 4);
}

#[test]
fn test_zigzag_round_trip() {
    for n in -1024..1024 {
        assert_eq!(unzigzag(zigzag(n)), n);
    }
    for n in [i64::MIN, i64::MIN + 1, i64::MAX - 1, i64::MAX] {
        assert_eq!(unzigzag(zigzag(n)), n);
    }
}

#[test]
fn test_key_round_trip() {
    let wire_types = [
        WireType::Varint,
        WireType::Fixed64,
        WireType::LengthDelimited,
        WireType::Fixed32,
    ];
    for field_number in 1..100 {
        for wire_type in wire_types {
            let mut buf = Vec::new();
            put_key(&mut buf, field_number, wire_type);
            let mut slice = buf.as_slice();
            assert_eq!(get_key(&mut slice).unwrap(), (field_number, wire_type));
            assert!(slice.is_empty());
        }
    }
}

#[test]
fn test_key_unknown_wire_type() {
    for key in [0x0F, 0x0B, 0x0C, 0x0E] {
        let e = get_key(&mut &[key][..]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::KeyDecode);
        assert!(e.to_string().contains("unknown wire type"));
    }
}

#[test]
fn test_key_invalid_field_number() {
    let e = get_key(&mut &[0x00][..]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::KeyDecode);
    assert!(e.to_string().contains("invalid field number"));
}

#[test]
fn test_len_prefixed_round_trip() {
    let mut buf = Vec::new();
    put_len_prefixed(&mut buf, b"testing");
    assert_eq!(buf, [0x07, 0x74, 0x65, 0x73, 0x74, 0x69, 0x6E, 0x67]);
    let mut slice = buf.as_slice();
    assert_eq!(get_len_prefixed(&mut slice).unwrap(), b"testing");
    assert!(slice.is_empty());
}

#[test]
fn test_len_prefixed_truncated() {
    let e = get_len_prefixed(&mut &[0x03, 0x46][..]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Truncation);
}

#[test]
fn test_skip_field() {
    let mut bytes = &[0x96, 0x01, 0x01, 0x02, 0x03, 0x04, 0x02, 0x61, 0x62][..];
    skip_field(&mut bytes, WireType::Varint).unwrap();
    skip_field(&mut bytes, WireType::Fixed32).unwrap();
    skip_field(&mut bytes, WireType::LengthDelimited).unwrap();
    assert!(bytes.is_empty());
}
