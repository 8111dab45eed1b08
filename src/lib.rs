#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(docs_rs, feature(doc_cfg))]

//! A crate for converting between standard PNG and Apple's CgBI variant.
//!
//! "CgBI" PNGs are the device-optimized textures found inside iOS
//! application bundles. They use PNG's chunked container, but differ from a
//! standard PNG in three ways:
//!
//! * A private `CgBI` chunk sits immediately after the 8-byte signature.
//! * The pixel stream stores blue before red, with the alpha plane zeroed.
//! * The compressed `IDAT` stream is headerless deflate data rather than a
//!   zlib stream.
//!
//! The conversion in either direction is a chunk-by-chunk rewrite: every
//! chunk is checksum-verified and freshly re-framed, the marker chunk is
//! dropped (or injected), and the image data is decompressed, channel
//! swapped, and recompressed under the other framing. Only 8-bit
//! true-color-with-alpha images are transcoded; anything else is rejected
//! at the header.
//!
//! ## Library Design Assumptions
//!
//! The entire encoded data stream is a single byte slice, and outputs are
//! built in memory. This library does not attempt "stream" conversion of
//! CgBI data; callers that read from files or sockets buffer the whole
//! container first.
//!
//! ## Automatic Decoding
//!
//! Call [`try_bitmap_from_bytes`] and the right decoder will be picked for
//! you: anything starting with the shared PNG signature is tried as CgBI
//! first, falling back to plain PNG when no marker chunk turns up.
//!
//! This requires the `alloc` and `miniz_oxide` crate features.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod crc32;
mod error;
pub use error::CgbiError;

pub mod chunk;

mod stage;

pub mod ihdr;
pub use ihdr::IHDR;

mod adam7;

pub mod pixel_formats;
pub use pixel_formats::*;

#[cfg(feature = "alloc")]
pub mod image;
#[cfg(feature = "alloc")]
pub use image::Bitmap;

#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
mod zstream;
#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
mod plain;
#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
mod decode;
#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
pub use decode::{cgbi_get_header, cgbi_to_png_vec};
#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
mod encode;
#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
pub use encode::png_to_cgbi_vec;

/// The first eight bytes of both standard PNG and CgBI datastreams.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// The payload of every `CgBI` marker chunk.
///
/// Files in the wild always carry these four bytes; their meaning has
/// never been documented by Apple.
pub const CGBI_MARKER: [u8; 4] = [0x50, 0x00, 0x20, 0x06];

/// Checks if the datastream's initial 8 bytes are the PNG signature.
///
/// CgBI files share the standard signature, so this check alone can't tell
/// the two variants apart: the marker chunk lives *after* the signature
/// and is the decoder's own concern.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// Attempts to make a bitmap from bytes that might be CgBI or plain PNG.
///
/// Detection only inspects the signature. The CgBI decoder runs first;
/// when the stream turns out to open with something other than a marker
/// chunk, the plain decoder gets the bytes instead.
#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
#[cfg_attr(docs_rs, doc(cfg(all(feature = "alloc", feature = "miniz_oxide"))))]
pub fn try_bitmap_from_bytes(bytes: &[u8]) -> Result<Bitmap<RGBA8888>, CgbiError> {
  if !is_png_signature_correct(bytes) {
    return Err(CgbiError::BadSignature);
  }
  match Bitmap::try_from_cgbi_bytes(bytes) {
    Err(CgbiError::ChunkOutOfOrder) => Bitmap::try_from_png_bytes(bytes),
    otherwise => otherwise,
  }
}
