//! Strict DER codec for ECDSA (r, s) signature pairs.
//!
//! The wire format is a two-field tagged sequence: outer tag 0x30 with a
//! definite length, then two 0x02-tagged integers holding r and s as
//! minimal big-endian non-negative values. Decoding is strict on
//! structure (non-minimal lengths, redundant sign padding, and trailing
//! bytes are all rejected) but lenient on integer overflow: a negative
//! integer, or one wider than 32 bytes after stripping a single leading
//! zero, or one at or above the group order, coerces to the zero scalar
//! while the decode itself succeeds. Callers reject zero components at
//! signature-acceptance time. This asymmetry matches the reference
//! implementation's interoperability vectors.

use crate::ec::{is_less_than, CURVE_ORDER};
use crate::S2cError;

fn malformed(msg: &str) -> S2cError {
    S2cError::MalformedEncoding(msg.to_string())
}

/// Read a definite-length field, enforcing minimal encoding.
///
/// Short form covers values below 128; the long form must use the
/// fewest possible octets. The bytes 0xFF and 0x80 (indefinite length)
/// are rejected outright.
fn read_len(data: &[u8], pos: &mut usize) -> Result<usize, S2cError> {
    let b1 = *data.get(*pos).ok_or_else(|| malformed("truncated length"))?;
    *pos += 1;
    if b1 == 0xFF {
        // X.690-0207 8.1.3.5.c: the value 0xFF shall not be used.
        return Err(malformed("0xFF length octet"));
    }
    if b1 & 0x80 == 0 {
        // Short form length octet.
        return Ok(b1 as usize);
    }
    if b1 == 0x80 {
        return Err(malformed("indefinite length"));
    }
    let lenleft = (b1 & 0x7F) as usize;
    if lenleft > data.len() - *pos {
        return Err(malformed("truncated long-form length"));
    }
    if data[*pos] == 0 {
        return Err(malformed("non-minimal long-form length"));
    }
    if lenleft > core::mem::size_of::<usize>() {
        return Err(malformed("length exceeds addressable range"));
    }
    let mut len = 0usize;
    for _ in 0..lenleft {
        len = (len << 8) | data[*pos] as usize;
        *pos += 1;
    }
    if len > data.len() - *pos {
        return Err(malformed("declared length exceeds input"));
    }
    if len < 128 {
        // Would have fit in the short form.
        return Err(malformed("non-minimal long-form length"));
    }
    Ok(len)
}

/// Parse one DER integer into a 32-byte big-endian value.
///
/// Overflowed integers (negative, wider than 32 bytes after stripping a
/// single required zero, or at/above the group order) coerce to zero.
fn parse_integer(data: &[u8], pos: &mut usize) -> Result<[u8; 32], S2cError> {
    if data.get(*pos) != Some(&0x02) {
        // Not a primitive integer (X.690-0207 8.3.1).
        return Err(malformed("missing integer tag"));
    }
    *pos += 1;
    let rlen = read_len(data, pos)?;
    if rlen == 0 || rlen > data.len() - *pos {
        return Err(malformed("bad integer length"));
    }
    if data[*pos] == 0x00 && rlen > 1 && data[*pos + 1] & 0x80 == 0 {
        return Err(malformed("excessive 0x00 padding"));
    }
    if data[*pos] == 0xFF && rlen > 1 && data[*pos + 1] & 0x80 == 0x80 {
        return Err(malformed("excessive 0xFF padding"));
    }

    let mut overflow = data[*pos] & 0x80 == 0x80; // negative
    let mut start = *pos;
    let mut len = rlen;
    // At most one leading zero byte can be present here; two in a row
    // were already rejected as excessive padding.
    if data[start] == 0 {
        start += 1;
        len -= 1;
    }
    if len > 32 {
        overflow = true;
    }

    let mut out = [0u8; 32];
    if !overflow {
        out[32 - len..].copy_from_slice(&data[start..start + len]);
        if !is_less_than(&out, &CURVE_ORDER) {
            overflow = true;
        }
    }
    if overflow {
        out = [0u8; 32];
    }
    *pos += rlen;
    Ok(out)
}

/// Decode a strict DER signature into its (r, s) components.
///
/// # Arguments
/// * `data` - The complete encoded signature; no trailing bytes allowed.
///
/// # Returns
/// The 32-byte big-endian r and s values, or
/// [`S2cError::MalformedEncoding`] on any structural violation.
/// Overflowed integers come back as zero; callers must reject zero
/// components before accepting the signature.
pub fn decode(data: &[u8]) -> Result<([u8; 32], [u8; 32]), S2cError> {
    if data.first() != Some(&0x30) {
        // Not a constructed sequence (X.690-0207 8.9.1).
        return Err(malformed("missing sequence tag"));
    }
    let mut pos = 1;
    let outer_len = read_len(data, &mut pos)?;
    if outer_len != data.len() - pos {
        return Err(malformed("trailing bytes after sequence"));
    }

    let r = parse_integer(data, &mut pos)?;
    let s = parse_integer(data, &mut pos)?;

    if pos != data.len() {
        return Err(malformed("trailing bytes inside sequence"));
    }
    Ok((r, s))
}

/// Trim a 32-byte value to its minimal non-negative DER integer bytes.
///
/// Works from a 33-byte buffer with a spare leading zero, so a required
/// 0x00 sign byte is already in place; leading zeros are stripped while
/// the following byte keeps the sign bit clear.
fn minimal_integer(val: &[u8; 32]) -> ([u8; 33], usize, usize) {
    let mut buf = [0u8; 33];
    buf[1..].copy_from_slice(val);
    let mut start = 0;
    let mut len = 33;
    while len > 1 && buf[start] == 0 && buf[start + 1] < 0x80 {
        start += 1;
        len -= 1;
    }
    (buf, start, len)
}

/// Compute the minimal DER length of one integer component's value bytes.
fn integer_len(val: &[u8; 32]) -> usize {
    let (_, _, len) = minimal_integer(val);
    len
}

/// Return the exact encoded size of an (r, s) pair in bytes.
///
/// The wrapper adds six bytes: two tag/length pairs for the integers and
/// one for the outer sequence.
pub fn encoded_len(r: &[u8; 32], s: &[u8; 32]) -> usize {
    6 + integer_len(r) + integer_len(s)
}

/// Write one integer component (tag, length, minimal value) into `out`.
fn write_integer(val: &[u8; 32], out: &mut [u8]) -> usize {
    let (buf, start, len) = minimal_integer(val);
    out[0] = 0x02;
    out[1] = len as u8;
    out[2..2 + len].copy_from_slice(&buf[start..start + len]);
    2 + len
}

/// Encode an (r, s) pair as strict DER into a caller buffer.
///
/// # Arguments
/// * `r` - The R component, 32 bytes big-endian.
/// * `s` - The S component, 32 bytes big-endian.
/// * `out` - The destination buffer.
///
/// # Returns
/// The number of bytes written, or [`S2cError::BufferTooSmall`] carrying
/// the required size — in which case `out` is left untouched.
pub fn encode_into(r: &[u8; 32], s: &[u8; 32], out: &mut [u8]) -> Result<usize, S2cError> {
    let required = encoded_len(r, s);
    if out.len() < required {
        return Err(S2cError::BufferTooSmall {
            required,
            got: out.len(),
        });
    }
    out[0] = 0x30;
    out[1] = (required - 2) as u8;
    let mut pos = 2;
    pos += write_integer(r, &mut out[pos..]);
    pos += write_integer(s, &mut out[pos..]);
    Ok(pos)
}

/// Encode an (r, s) pair as strict DER into a fresh vector.
pub fn encode(r: &[u8; 32], s: &[u8; 32]) -> Vec<u8> {
    let mut out = vec![0u8; encoded_len(r, s)];
    let written = encode_into(r, s, &mut out)
        .expect("buffer sized to encoded_len always fits");
    debug_assert_eq!(written, out.len());
    out
}
