//! Raw DEFLATE (RFC 1951) payload compression for `"zip": "DEF"`.

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use zeroize::Zeroizing;

use super::{JweError, Result};

/// Upper bound on an inflated payload.
pub const MAX_INFLATED_LEN: usize = 4 * 1024 * 1024;

/// Compress `data` with raw DEFLATE.
pub fn compress(data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| JweError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map(Zeroizing::new)
        .map_err(|e| JweError::Compression(e.to_string()))
}

/// Inflate raw DEFLATE `data`, refusing output beyond [`MAX_INFLATED_LEN`].
pub fn decompress(data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let mut out = Zeroizing::new(Vec::new());
    DeflateDecoder::new(data)
        .take(MAX_INFLATED_LEN as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|e| JweError::Compression(e.to_string()))?;
    if out.len() > MAX_INFLATED_LEN {
        return Err(JweError::Compression(format!(
            "inflated payload exceeds {MAX_INFLATED_LEN} bytes"
        )));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compresses_repetitive_input() {
        let data = vec![b'a'; 4096];
        let packed = compress(&data).unwrap();
        assert!(packed.len() < 100);
        assert_eq!(decompress(&packed).unwrap().as_slice(), data.as_slice());
    }

    #[test]
    fn empty_input() {
        let packed = compress(b"").unwrap();
        assert!(decompress(&packed).unwrap().is_empty());
    }

    #[test]
    fn rejects_oversized_output() {
        let packed = compress(&vec![0u8; MAX_INFLATED_LEN + 1]).unwrap();
        assert!(matches!(
            decompress(&packed),
            Err(JweError::Compression(_))
        ));
    }
}
