//! Captured frame plus the fingerprint used to skip unchanged screens

use super::error::{BotError, BotResult};
use image::GrayImage;

/// One screen capture as delivered by the device.
///
/// The fingerprint is computed over the raw PNG bytes, so two captures of a
/// frozen screen compare equal without ever decoding the image.
#[derive(Debug, Clone)]
pub struct Frame {
    png: Vec<u8>,
    fingerprint: u64,
}

impl Frame {
    pub fn new(png: Vec<u8>) -> Self {
        let fingerprint = fingerprint_bytes(&png);
        Self { png, fingerprint }
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Decode the capture into the grayscale buffer the matcher consumes.
    pub fn decode(&self) -> BotResult<GrayImage> {
        if self.png.is_empty() {
            return Err(BotError::SourceUnavailable);
        }
        let decoded = image::load_from_memory(&self.png).map_err(|e| BotError::InvalidImage {
            reason: e.to_string(),
        })?;
        Ok(decoded.to_luma8())
    }
}

/// Multiply-add checksum over the byte stream. Not cryptographic; it only has
/// to answer "is this capture byte-identical to the previous one".
fn fingerprint_bytes(bytes: &[u8]) -> u64 {
    let mut checksum = 0u64;
    for &byte in bytes {
        checksum = checksum.wrapping_mul(31).wrapping_add(byte as u64);
    }
    checksum.wrapping_mul(31).wrapping_add(bytes.len() as u64)
}
