//! The CgBI → standard PNG direction.

use alloc::vec::Vec;

use crate::{
  adam7::fix_channels,
  chunk::{push_chunk, ChunkReader, ChunkTy},
  ihdr::IHDR,
  image::Bitmap,
  is_png_signature_correct,
  pixel_formats::RGBA8888,
  plain,
  stage::Stage,
  zstream::{deflate_zlib, inflate_raw},
  CgbiError, CGBI_MARKER, PNG_SIGNATURE,
};

/// Rewrites a CgBI byte stream as a standard-conformant PNG byte stream.
///
/// The `CgBI` marker chunk is validated and dropped, every other chunk is
/// checksum-verified and freshly re-framed, and the image data is
/// re-framed from CgBI's headerless deflate into a zlib stream with the
/// red/blue channel order corrected. Chunks between the header and the end
/// pass through with their payload bytes untouched; the rebuilt `IDAT` is
/// emitted when the source's `IEND` arrives, so any ancillary chunks land
/// ahead of it in the output.
///
/// Bytes after the `IEND` chunk are ignored.
pub fn cgbi_to_png_vec(bytes: &[u8]) -> Result<Vec<u8>, CgbiError> {
  if !is_png_signature_correct(bytes) {
    return Err(CgbiError::BadSignature);
  }
  let mut reader = ChunkReader::new(&bytes[8..]);
  let mut stage = Stage::Start;
  let mut header: Option<IHDR> = None;
  let mut zdata: Vec<u8> = Vec::new();
  let mut out: Vec<u8> = Vec::new();
  out.extend_from_slice(&PNG_SIGNATURE);
  while stage != Stage::SeenEnd {
    let chunk = reader.next_chunk()?;
    stage = stage.next(chunk.ty())?;
    match chunk.ty().as_bytes() {
      b"CgBI" => {
        if chunk.data() != CGBI_MARKER {
          return Err(CgbiError::BadMarkerChunk);
        }
      }
      b"IHDR" => {
        header = Some(IHDR::try_parse(chunk.data())?);
        push_chunk(&mut out, ChunkTy::IHDR, chunk.data());
      }
      b"IDAT" => zdata.extend_from_slice(chunk.data()),
      b"IEND" => {
        if !chunk.data().is_empty() {
          return Err(CgbiError::BadTrailerLength);
        }
      }
      _ => push_chunk(&mut out, chunk.ty(), chunk.data()),
    }
  }
  let header = header.ok_or(CgbiError::ChunkOutOfOrder)?;
  //
  let mut raw = inflate_raw(&zdata)?;
  fix_channels(&mut raw, header)?;
  push_chunk(&mut out, ChunkTy::IDAT, &deflate_zlib(&raw));
  push_chunk(&mut out, ChunkTy::IEND, &[]);
  Ok(out)
}

/// Gets the [IHDR] of a CgBI byte stream.
///
/// Dimensions live in the header chunk, which is only trusted after the
/// full chunk walk has validated it, so this runs the same pipeline as
/// [`cgbi_to_png_vec`] and then reads the rewritten stream's first chunk.
pub fn cgbi_get_header(bytes: &[u8]) -> Result<IHDR, CgbiError> {
  let png = cgbi_to_png_vec(bytes)?;
  let chunk = ChunkReader::new(&png[8..]).next_chunk()?;
  IHDR::try_parse(chunk.data())
}

impl Bitmap<RGBA8888> {
  /// Attempts to make a bitmap from CgBI bytes.
  ///
  /// The container is rewritten to standard PNG first, then decoded to
  /// pixels, so the pixels come out in normal red-green-blue-alpha order.
  pub fn try_from_cgbi_bytes(bytes: &[u8]) -> Result<Self, CgbiError> {
    let png = cgbi_to_png_vec(bytes)?;
    plain::decode_rgba(&png)
  }
}
