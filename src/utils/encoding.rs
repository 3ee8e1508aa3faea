//! Text decoding for input files.
//!
//! Input files are usually UTF-8, but exports from spreadsheet tools often
//! carry a BOM or arrive in a legacy single-byte encoding. Decoding order:
//! - BOM detection (UTF-8, UTF-16 LE/BE)
//! - strict UTF-8
//! - chardetng guess, decoded with encoding_rs replacement semantics

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::path::Path;

/// Decode raw file bytes into text.
///
/// Returns the decoded text (BOM stripped) and the lowercase name of the
/// encoding that was used.
pub fn decode_bytes(bytes: &[u8]) -> (String, String) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (decoded.into_owned(), encoding.name().to_lowercase());
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), "utf-8".to_string());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(bytes);
    (decoded.into_owned(), encoding.name().to_lowercase())
}

/// Read a whole file and split it into lines with terminators removed.
pub fn read_lines(path: &Path) -> std::io::Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    let (text, encoding) = decode_bytes(&bytes);
    if encoding != "utf-8" {
        tracing::debug!("decoded {} as {}", path.display(), encoding);
    }
    Ok(text.lines().map(str::to_string).collect())
}
