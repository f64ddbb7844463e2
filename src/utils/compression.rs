use crate::error::AppError;
use flate2::read::DeflateDecoder;
use std::io::Read;

/// Fixed gzip member header length (magic, method, flags, mtime, xfl, os)
const GZIP_HEADER_LEN: usize = 10;
/// gzip trailer length (crc32 + isize)
const GZIP_TRAILER_LEN: usize = 8;

/// Unpacks the gzip payload served by the zipped company list endpoint.
///
/// The vendor always sends a bare gzip member without optional header
/// fields, so the deflate stream sits between the fixed header and the
/// trailer.
pub fn inflate_gzip_member(payload: &[u8]) -> Result<String, AppError> {
    if payload.len() < GZIP_HEADER_LEN + GZIP_TRAILER_LEN {
        return Err(AppError::Deserialization(format!(
            "compressed payload too short: {} bytes",
            payload.len()
        )));
    }

    let stream = &payload[GZIP_HEADER_LEN..payload.len() - GZIP_TRAILER_LEN];
    let mut decoder = DeflateDecoder::new(stream);
    let mut inflated = Vec::new();
    decoder.read_to_end(&mut inflated)?;

    String::from_utf8(inflated)
        .map_err(|e| AppError::Deserialization(format!("inflated payload is not utf-8: {e}")))
}
