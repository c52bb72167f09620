//! Byte-level format sniffing, independent of the declared extension.

use crate::types::SniffResult;

/// Local-file-header signature that opens every zip-based spreadsheet container (`PK\x03\x04`).
pub const CONTAINER_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Number of leading bytes inspected by the text heuristic.
pub const SNIFF_SAMPLE_LEN: usize = 4096;

const TEXT_DELIMITERS: [char; 4] = [',', '\t', ';', '|'];

/// Decide whether `buf` plausibly is a spreadsheet container or delimited text.
///
/// Order matters:
///
/// 1. a container signature wins outright, whatever follows it
/// 2. a NUL byte within the sample marks opaque binary
/// 3. non-empty text with a delimiter or a line feed is recognized
pub fn sniff(buf: &[u8]) -> SniffResult {
    if buf.starts_with(&CONTAINER_SIGNATURE) {
        return SniffResult::Recognized;
    }

    let sample = &buf[..buf.len().min(SNIFF_SAMPLE_LEN)];
    if sample.contains(&0) {
        return SniffResult::Unrecognized;
    }

    let text = String::from_utf8_lossy(sample);
    let looks_delimited = text.contains(TEXT_DELIMITERS) || text.contains('\n');
    if !text.is_empty() && looks_delimited {
        SniffResult::Recognized
    } else {
        SniffResult::Unrecognized
    }
}
