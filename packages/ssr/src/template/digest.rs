//! Template content digest
//!
//! A stable digest of a template's static fragments, carried in the
//! opening `lit-part` marker so the client can verify it is hydrating
//! against the same template the server rendered.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::template::result::TemplateStrings;

/// Two-lane DJB2-XOR over every character of every static fragment,
/// base64 of the 8 little-endian result bytes. Must stay in lockstep
/// with the client renderer's digest.
pub fn digest_for_strings(strings: &TemplateStrings) -> String {
    let mut hashes: [u32; 2] = [5381, 5381];
    let mut lane = 0usize;
    for s in strings.iter() {
        for ch in s.chars() {
            hashes[lane] = hashes[lane].wrapping_mul(33) ^ (ch as u32);
            lane = (lane + 1) % 2;
        }
    }
    let mut bytes = [0u8; 8];
    bytes[..4].copy_from_slice(&hashes[0].to_le_bytes());
    bytes[4..].copy_from_slice(&hashes[1].to_le_bytes());
    STANDARD.encode(bytes)
}
