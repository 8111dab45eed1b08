//! The standard PNG → CgBI direction.

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
  zstream::{deflate_raw, inflate_zlib},
  CgbiError, CGBI_MARKER, PNG_SIGNATURE,
};

/// Rewrites a standard RGBA8 PNG byte stream as a CgBI byte stream.
///
/// This is the mirror of [`cgbi_to_png_vec`](crate::cgbi_to_png_vec): the
/// marker chunk is injected right after the signature (so the chunk walk
/// begins past the marker stage), and the image data is re-framed from a
/// zlib stream into headerless deflate with red and blue swapped. The
/// input is expected to already be standard-conformant; it is still
/// checksum-verified and order-checked chunk by chunk.
pub fn png_to_cgbi_vec(bytes: &[u8]) -> Result<Vec<u8>, CgbiError> {
  if !is_png_signature_correct(bytes) {
    return Err(CgbiError::BadSignature);
  }
  let mut reader = ChunkReader::new(&bytes[8..]);
  let mut stage = Stage::SeenMarker;
  let mut header: Option<IHDR> = None;
  let mut zdata: Vec<u8> = Vec::new();
  let mut out: Vec<u8> = Vec::new();
  out.extend_from_slice(&PNG_SIGNATURE);
  push_chunk(&mut out, ChunkTy::CgBI, &CGBI_MARKER);
  while stage != Stage::SeenEnd {
    let chunk = reader.next_chunk()?;
    stage = stage.next(chunk.ty())?;
    match chunk.ty().as_bytes() {
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
  let mut raw = inflate_zlib(&zdata)?;
  fix_channels(&mut raw, header)?;
  push_chunk(&mut out, ChunkTy::IDAT, &deflate_raw(&raw));
  push_chunk(&mut out, ChunkTy::IEND, &[]);
  Ok(out)
}

impl Bitmap<RGBA8888> {
  /// Encodes the bitmap as CgBI bytes.
  ///
  /// Alpha is forced to zero on every pixel first: CgBI consumers expect a
  /// zeroed alpha plane, so anything but fully-opaque input loses its
  /// alpha here. The pixels are staged through the standard PNG encoder
  /// and the resulting container is rewritten chunk by chunk.
  pub fn to_cgbi_vec(&self) -> Result<Vec<u8>, CgbiError> {
    let normalized = Bitmap {
      width: self.width,
      height: self.height,
      pixels: self.pixels.iter().map(|p| RGBA8888 { a: 0, ..*p }).collect(),
    };
    let staged = plain::encode_rgba(&normalized)?;
    png_to_cgbi_vec(&staged)
  }
}
