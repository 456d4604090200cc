//! Keyed-dictionary message codec.
//!
//! Container layout (little-endian): a `u8` tuple count, then per tuple a
//! `u32` key, a `u8` type tag, a `u16` value length, and the value bytes.
//! This is the host platform's dictionary convention and must stay bit-exact.
//!
//! String values are *not* guaranteed NUL-terminated at the reported length
//! boundary. [`Value::text`] therefore computes the string length explicitly
//! (first NUL if present, otherwise the full reported length); callers copy
//! exactly that many bytes into their own bounded buffers.

use heapless::Vec;
use log::warn;
use thiserror_no_std::Error;

/// Outbound transport buffer bound.
pub const OUTBOUND_CAPACITY: usize = 256;

/// Inbound transport buffer bound. Container integrity within this bound is
/// the channel layer's concern; the decoder only checks structure.
pub const INBOUND_CAPACITY: usize = 124;

/// Upper bound on tuples per message. The smallest tuple is 7 bytes, so an
/// inbound container can never carry more than this.
pub const MAX_TUPLES: usize = 18;

const TYPE_BYTE_ARRAY: u8 = 0;
const TYPE_CSTRING: u8 = 1;
const TYPE_UINT: u8 = 2;
const TYPE_INT: u8 = 3;

const TUPLE_HEADER_LEN: usize = 7;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    #[error("outbound buffer full")]
    Overflow,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated container at byte {0}")]
    Truncated(usize),
    #[error("tuple count exceeds container bound")]
    TooManyTuples,
}

/// A decoded tuple value. Borrows from the inbound buffer; values live only
/// for the duration of one dispatch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// Raw bytes; also used for tuples with an unrecognized type tag.
    Bytes(&'a [u8]),
    /// String bytes as received, possibly including a NUL terminator.
    CStr(&'a [u8]),
    /// Unsigned integer, widened from its 1/2/4-byte wire width.
    Uint(u32),
    /// Signed integer, widened from its 1/2/4-byte wire width.
    Int(i32),
}

impl<'a> Value<'a> {
    /// Text content of a string tuple, bounded by the first NUL when one is
    /// present. Returns `None` for non-string tuples or invalid UTF-8.
    pub fn text(&self) -> Option<&'a str> {
        let Value::CStr(raw) = self else {
            return None;
        };
        let len = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        core::str::from_utf8(&raw[..len]).ok()
    }

    /// Small unsigned integer, if this tuple is one and it fits.
    pub fn as_u8(&self) -> Option<u8> {
        match *self {
            Value::Uint(v) if v <= u8::MAX as u32 => Some(v as u8),
            _ => None,
        }
    }

    /// Signed 32-bit integer. Unsigned tuples are accepted when they fit.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Value::Int(v) => Some(v),
            Value::Uint(v) if v <= i32::MAX as u32 => Some(v as i32),
            _ => None,
        }
    }
}

/// One decoded key/value tuple.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub key: u32,
    pub value: Value<'a>,
}

/// A decoded inbound message.
#[derive(Debug)]
pub struct Message<'a> {
    entries: Vec<Entry<'a>, MAX_TUPLES>,
}

impl<'a> Message<'a> {
    /// Decodes a raw container. Individual malformed tuples (bad scalar
    /// width) are skipped; only structural damage fails the whole decode.
    pub fn decode(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        let mut entries = Vec::new();

        let (&count, mut rest) = bytes.split_first().ok_or(DecodeError::Truncated(0))?;
        let mut offset = 1usize;

        for _ in 0..count {
            if rest.len() < TUPLE_HEADER_LEN {
                return Err(DecodeError::Truncated(offset));
            }
            let key = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
            let tag = rest[4];
            let len = u16::from_le_bytes([rest[5], rest[6]]) as usize;
            rest = &rest[TUPLE_HEADER_LEN..];
            offset += TUPLE_HEADER_LEN;

            if rest.len() < len {
                return Err(DecodeError::Truncated(offset));
            }
            let payload = &rest[..len];
            rest = &rest[len..];
            offset += len;

            let value = match tag {
                TYPE_CSTRING => Value::CStr(payload),
                TYPE_UINT => match decode_scalar(payload) {
                    Some(v) => Value::Uint(v),
                    None => {
                        warn!("skipping uint tuple for key {key} with width {len}");
                        continue;
                    }
                },
                TYPE_INT => match decode_scalar(payload) {
                    Some(v) => Value::Int(sign_extend(v, len)),
                    None => {
                        warn!("skipping int tuple for key {key} with width {len}");
                        continue;
                    }
                },
                TYPE_BYTE_ARRAY => Value::Bytes(payload),
                // Unknown tags also decode as raw bytes so new host-side
                // types pass through without breaking older clients.
                _ => Value::Bytes(payload),
            };

            entries
                .push(Entry { key, value })
                .map_err(|_| DecodeError::TooManyTuples)?;
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    /// Looks a key up, mirroring the host dictionary's find operation.
    pub fn find(&self, key: u32) -> Option<&Value<'a>> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn decode_scalar(payload: &[u8]) -> Option<u32> {
    match *payload {
        [a] => Some(a as u32),
        [a, b] => Some(u16::from_le_bytes([a, b]) as u32),
        [a, b, c, d] => Some(u32::from_le_bytes([a, b, c, d])),
        _ => None,
    }
}

fn sign_extend(raw: u32, width: usize) -> i32 {
    match width {
        1 => raw as u8 as i8 as i32,
        2 => raw as u16 as i16 as i32,
        _ => raw as i32,
    }
}

/// Builder for one outbound message over a fixed transport buffer.
///
/// Obtained from [`MessageChannel::begin`](crate::channel::MessageChannel::begin)
/// so the transport can refuse the transaction before any side effects occur.
#[derive(Debug)]
pub struct MessageWriter {
    buf: Vec<u8, OUTBOUND_CAPACITY>,
}

impl MessageWriter {
    pub fn new() -> Self {
        let mut buf = Vec::new();
        // Tuple count placeholder; capacity is at least one byte.
        let _ = buf.push(0);
        Self { buf }
    }

    /// Signed 32-bit tuple (4-byte width).
    pub fn write_int32(&mut self, key: u32, value: i32) -> Result<(), EncodeError> {
        self.tuple(key, TYPE_INT, &value.to_le_bytes())
    }

    /// Signed 8-bit tuple (1-byte width).
    pub fn write_int8(&mut self, key: u32, value: i8) -> Result<(), EncodeError> {
        self.tuple(key, TYPE_INT, &value.to_le_bytes())
    }

    /// Unsigned 8-bit tuple (1-byte width).
    pub fn write_uint8(&mut self, key: u32, value: u8) -> Result<(), EncodeError> {
        self.tuple(key, TYPE_UINT, &[value])
    }

    /// String tuple. The reported length includes a NUL terminator, per the
    /// host convention.
    pub fn write_str(&mut self, key: u32, value: &str) -> Result<(), EncodeError> {
        if self.remaining() < TUPLE_HEADER_LEN + value.len() + 1 {
            return Err(EncodeError::Overflow);
        }
        self.header(key, TYPE_CSTRING, (value.len() + 1) as u16);
        let _ = self.buf.extend_from_slice(value.as_bytes());
        let _ = self.buf.push(0);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    fn remaining(&self) -> usize {
        OUTBOUND_CAPACITY - self.buf.len()
    }

    fn tuple(&mut self, key: u32, tag: u8, payload: &[u8]) -> Result<(), EncodeError> {
        if self.remaining() < TUPLE_HEADER_LEN + payload.len() {
            return Err(EncodeError::Overflow);
        }
        self.header(key, tag, payload.len() as u16);
        let _ = self.buf.extend_from_slice(payload);
        Ok(())
    }

    fn header(&mut self, key: u32, tag: u8, len: u16) {
        // Space was checked by the caller.
        let _ = self.buf.extend_from_slice(&key.to_le_bytes());
        let _ = self.buf.push(tag);
        let _ = self.buf.extend_from_slice(&len.to_le_bytes());
        self.buf[0] = self.buf[0].wrapping_add(1);
    }
}

impl Default for MessageWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::keys::wire;

    #[test]
    fn command_message_round_trips_key_and_sequence() {
        let mut writer = MessageWriter::new();
        writer.write_int32(wire::SEQUENCE_NUMBER, 42).unwrap();
        writer.write_int8(wire::SCREEN_ENTER, -1).unwrap();

        let msg = Message::decode(writer.as_bytes()).unwrap();
        assert_eq!(msg.entries().len(), 2);
        assert_eq!(msg.find(wire::SEQUENCE_NUMBER).unwrap().as_i32(), Some(42));
        assert_eq!(msg.find(wire::SCREEN_ENTER).unwrap().as_i32(), Some(-1));
    }

    #[test]
    fn text_stops_at_the_first_nul() {
        let mut writer = MessageWriter::new();
        writer.write_str(wire::MUSIC_TITLE, "Blue").unwrap();

        let msg = Message::decode(writer.as_bytes()).unwrap();
        let value = msg.find(wire::MUSIC_TITLE).unwrap();
        assert_eq!(value.text(), Some("Blue"));
    }

    #[test]
    fn text_without_terminator_uses_the_reported_length() {
        // Hand-built tuple whose string bytes fill the reported length with
        // no NUL anywhere.
        let mut raw: heapless::Vec<u8, 64> = heapless::Vec::new();
        raw.push(1).unwrap();
        raw.extend_from_slice(&wire::WEATHER_CONDITION.to_le_bytes())
            .unwrap();
        raw.push(super::TYPE_CSTRING).unwrap();
        raw.extend_from_slice(&5u16.to_le_bytes()).unwrap();
        raw.extend_from_slice(b"Sunny").unwrap();

        let msg = Message::decode(&raw).unwrap();
        assert_eq!(
            msg.find(wire::WEATHER_CONDITION).unwrap().text(),
            Some("Sunny")
        );
    }

    #[test]
    fn embedded_nul_truncates_the_text() {
        let mut raw: heapless::Vec<u8, 64> = heapless::Vec::new();
        raw.push(1).unwrap();
        raw.extend_from_slice(&wire::WEATHER_CONDITION.to_le_bytes())
            .unwrap();
        raw.push(super::TYPE_CSTRING).unwrap();
        raw.extend_from_slice(&8u16.to_le_bytes()).unwrap();
        raw.extend_from_slice(b"Fog\0junk").unwrap();

        let msg = Message::decode(&raw).unwrap();
        assert_eq!(
            msg.find(wire::WEATHER_CONDITION).unwrap().text(),
            Some("Fog")
        );
    }

    #[test]
    fn truncated_container_is_a_structural_error() {
        let mut writer = MessageWriter::new();
        writer.write_int32(wire::SEQUENCE_NUMBER, 7).unwrap();
        let bytes = writer.as_bytes();

        let cut = &bytes[..bytes.len() - 2];
        assert!(matches!(
            Message::decode(cut),
            Err(DecodeError::Truncated(_))
        ));
        assert!(matches!(Message::decode(&[]), Err(DecodeError::Truncated(0))));
    }

    #[test]
    fn bad_scalar_width_skips_only_that_tuple() {
        let mut raw: heapless::Vec<u8, 64> = heapless::Vec::new();
        raw.push(2).unwrap();
        // 3-byte uint: not a valid scalar width.
        raw.extend_from_slice(&wire::BATTERY_PERCENT.to_le_bytes())
            .unwrap();
        raw.push(super::TYPE_UINT).unwrap();
        raw.extend_from_slice(&3u16.to_le_bytes()).unwrap();
        raw.extend_from_slice(&[1, 2, 3]).unwrap();
        // Followed by a well-formed tuple.
        raw.extend_from_slice(&wire::WEATHER_ICON.to_le_bytes())
            .unwrap();
        raw.push(super::TYPE_UINT).unwrap();
        raw.extend_from_slice(&1u16.to_le_bytes()).unwrap();
        raw.push(4).unwrap();

        let msg = Message::decode(&raw).unwrap();
        assert_eq!(msg.entries().len(), 1);
        assert_eq!(msg.find(wire::WEATHER_ICON).unwrap().as_u8(), Some(4));
    }

    #[test]
    fn unknown_type_tag_decodes_as_raw_bytes() {
        let mut raw: heapless::Vec<u8, 64> = heapless::Vec::new();
        raw.push(1).unwrap();
        raw.extend_from_slice(&99u32.to_le_bytes()).unwrap();
        raw.push(7).unwrap();
        raw.extend_from_slice(&2u16.to_le_bytes()).unwrap();
        raw.extend_from_slice(&[0xAA, 0xBB]).unwrap();

        let msg = Message::decode(&raw).unwrap();
        assert!(matches!(
            msg.find(99),
            Some(&Value::Bytes(&[0xAA, 0xBB]))
        ));
    }

    #[test]
    fn short_int_widths_sign_extend() {
        let mut raw: heapless::Vec<u8, 64> = heapless::Vec::new();
        raw.push(1).unwrap();
        raw.extend_from_slice(&wire::SCREEN_ENTER.to_le_bytes()).unwrap();
        raw.push(super::TYPE_INT).unwrap();
        raw.extend_from_slice(&1u16.to_le_bytes()).unwrap();
        raw.push((-1i8) as u8).unwrap();

        let msg = Message::decode(&raw).unwrap();
        assert_eq!(msg.find(wire::SCREEN_ENTER).unwrap().as_i32(), Some(-1));
    }
}
