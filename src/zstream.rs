//! The deflate re-framer.
//!
//! A standard PNG's `IDAT` stream is zlib-framed: a 2-byte header and a
//! 4-byte Adler-32 trailer around the deflate data. CgBI stores the same
//! deflate data with no header and no trailer. Rather than forging a
//! trailer and tolerating the checksum failure, the asymmetry is expressed
//! directly: the raw functions speak CgBI's framing, the zlib functions
//! speak standard PNG's.

use alloc::vec::Vec;

use miniz_oxide::deflate::CompressionLevel;

use crate::CgbiError;

const LEVEL: u8 = CompressionLevel::DefaultLevel as u8;

/// Decompresses a headerless, trailer-less deflate stream (CgBI framing).
#[inline]
pub(crate) fn inflate_raw(bytes: &[u8]) -> Result<Vec<u8>, CgbiError> {
  miniz_oxide::inflate::decompress_to_vec(bytes).map_err(|_| CgbiError::BadDeflateStream)
}

/// Decompresses a zlib-framed stream (standard PNG framing).
#[inline]
pub(crate) fn inflate_zlib(bytes: &[u8]) -> Result<Vec<u8>, CgbiError> {
  miniz_oxide::inflate::decompress_to_vec_zlib(bytes).map_err(|_| CgbiError::BadDeflateStream)
}

/// Compresses into CgBI framing: deflate data with nothing around it.
#[inline]
#[must_use]
pub(crate) fn deflate_raw(bytes: &[u8]) -> Vec<u8> {
  miniz_oxide::deflate::compress_to_vec(bytes, LEVEL)
}

/// Compresses into standard PNG framing: zlib header and trailer included.
#[inline]
#[must_use]
pub(crate) fn deflate_zlib(bytes: &[u8]) -> Vec<u8> {
  miniz_oxide::deflate::compress_to_vec_zlib(bytes, LEVEL)
}
