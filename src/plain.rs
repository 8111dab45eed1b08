//! The standard-PNG pixel codec.
//!
//! The transcode drivers only rewrite containers; turning a rewritten,
//! standard-conformant byte stream into pixels (and staging a pixel image
//! as standard PNG bytes before the encode rewrite) is this module's job.
//! It only speaks the one pixel layout the crate transcodes: 8-bit RGBA.
//!
//! The encoder writes every scanline with filter type 0, which keeps it a
//! pure function of the pixels. The decoder reverses all five standard
//! filters, since the bytes it gets may have been produced by any encoder.

use alloc::{vec, vec::Vec};

use bytemuck::cast_slice;

use crate::{
  adam7::{filtered_len, pass_dimensions, pass_to_full},
  chunk::{push_chunk, ChunkReader, ChunkTy},
  ihdr::IHDR,
  image::Bitmap,
  is_png_signature_correct,
  pixel_formats::RGBA8888,
  stage::Stage,
  zstream::{deflate_zlib, inflate_zlib},
  CgbiError, PNG_SIGNATURE,
};

#[inline]
#[must_use]
const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // Note: the PNG spec is extremely specific that you shall not, under any
  // circumstances, alter the order of evaluation of these tests.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Reverses the scanline filters of one stored sub-image, in place.
///
/// `data` is `height` lines of 1 filter byte plus `width` 4-byte pixels;
/// the caller has already checked it's long enough. Filter bytes are left
/// in place (zeroed) so the layout doesn't shift.
fn unfilter_pass(data: &mut [u8], width: u32, height: u32) {
  let stride = (width as usize) * 4 + 1;
  for y in 0..height as usize {
    let row = y * stride;
    let filter = data[row];
    data[row] = 0;
    for i in 0..(width as usize) * 4 {
      let x = row + 1 + i;
      let a = if i >= 4 { data[x - 4] } else { 0 };
      let b = if y > 0 { data[x - stride] } else { 0 };
      let c = if y > 0 && i >= 4 { data[x - stride - 4] } else { 0 };
      data[x] = data[x].wrapping_add(match filter {
        1 => a,
        2 => b,
        3 => (((a as u32) + (b as u32)) / 2) as u8,
        4 => paeth_predict(a, b, c),
        _ => 0,
      });
    }
  }
}

/// Copies one unfiltered sub-image into the bitmap, mapping each reduced
/// position through `map`.
fn blit_pass(
  bitmap: &mut Bitmap<RGBA8888>, data: &[u8], width: u32, height: u32,
  map: impl Fn(u32, u32) -> (u32, u32),
) {
  let stride = (width as usize) * 4 + 1;
  for reduced_y in 0..height {
    let row = (reduced_y as usize) * stride + 1;
    let pixels: &[RGBA8888] = cast_slice(&data[row..row + (width as usize) * 4]);
    for (reduced_x, px) in pixels.iter().enumerate() {
      let (x, y) = map(reduced_x as u32, reduced_y as u32);
      if let Some(p) = bitmap.get_mut(x, y) {
        *p = *px;
      }
    }
  }
}

/// Decodes standard RGBA8 PNG bytes into a bitmap.
pub(crate) fn decode_rgba(png: &[u8]) -> Result<Bitmap<RGBA8888>, CgbiError> {
  if !is_png_signature_correct(png) {
    return Err(CgbiError::BadSignature);
  }
  let mut reader = ChunkReader::new(&png[8..]);
  // a plain PNG is the same chunk sequence with no marker, so the walk
  // starts past the marker stage.
  let mut stage = Stage::SeenMarker;
  let mut header: Option<IHDR> = None;
  let mut zdata: Vec<u8> = Vec::new();
  while stage != Stage::SeenEnd {
    let chunk = reader.next_chunk()?;
    stage = stage.next(chunk.ty())?;
    match chunk.ty().as_bytes() {
      b"IHDR" => header = Some(IHDR::try_parse(chunk.data())?),
      b"IDAT" => zdata.extend_from_slice(chunk.data()),
      b"IEND" => {
        if !chunk.data().is_empty() {
          return Err(CgbiError::BadTrailerLength);
        }
      }
      _ => (),
    }
  }
  let header = header.ok_or(CgbiError::ChunkOutOfOrder)?;
  let raw = inflate_zlib(&zdata)?;
  //
  let mut bitmap = Bitmap {
    width: header.width,
    height: header.height,
    pixels: vec![RGBA8888::default(); (header.width as usize) * (header.height as usize)],
  };
  if header.is_interlaced {
    let mut total = 0_usize;
    for pass in 0..7 {
      let (wp, hp) = pass_dimensions(pass, header.width, header.height);
      let pass_len = filtered_len(wp, hp);
      if pass_len == 0 {
        continue;
      }
      if total + pass_len > raw.len() {
        return Err(CgbiError::UnexpectedDataSize);
      }
      let mut pass_data = raw[total..total + pass_len].to_vec();
      unfilter_pass(&mut pass_data, wp, hp);
      blit_pass(&mut bitmap, &pass_data, wp, hp, |rx, ry| pass_to_full(pass, rx, ry));
      total += pass_len;
    }
  } else {
    let len = filtered_len(header.width, header.height);
    if raw.len() < len {
      return Err(CgbiError::UnexpectedDataSize);
    }
    let mut data = raw;
    unfilter_pass(&mut data, header.width, header.height);
    blit_pass(&mut bitmap, &data, header.width, header.height, |x, y| (x, y));
  }
  Ok(bitmap)
}

/// Encodes a bitmap as standard, non-interlaced RGBA8 PNG bytes.
pub(crate) fn encode_rgba(bitmap: &Bitmap<RGBA8888>) -> Result<Vec<u8>, CgbiError> {
  if bitmap.width == 0 || bitmap.height == 0 {
    return Err(CgbiError::WidthOrHeightZero);
  }
  let (width, height) = (bitmap.width as usize, bitmap.height as usize);
  if bitmap.pixels.len() != width * height {
    return Err(CgbiError::UnexpectedDataSize);
  }
  let header = IHDR {
    width: bitmap.width,
    height: bitmap.height,
    bit_depth: 8,
    color_type: crate::ihdr::COLOR_RGBA,
    is_interlaced: false,
  };
  //
  let mut raw: Vec<u8> = Vec::with_capacity(filtered_len(bitmap.width, bitmap.height));
  for row in bitmap.pixels.chunks_exact(width) {
    raw.push(0);
    raw.extend_from_slice(cast_slice(row));
  }
  //
  let mut out: Vec<u8> = Vec::new();
  out.extend_from_slice(&PNG_SIGNATURE);
  push_chunk(&mut out, ChunkTy::IHDR, &header.to_payload());
  push_chunk(&mut out, ChunkTy::IDAT, &deflate_zlib(&raw));
  push_chunk(&mut out, ChunkTy::IEND, &[]);
  Ok(out)
}

impl Bitmap<RGBA8888> {
  /// Attempts to make a bitmap from standard PNG bytes.
  ///
  /// Only 8-bit true-color-with-alpha images decode; anything else is
  /// rejected at the header. This is the same decoder the CgBI path hands
  /// its rewritten bytes to.
  pub fn try_from_png_bytes(bytes: &[u8]) -> Result<Self, CgbiError> {
    decode_rgba(bytes)
  }

  /// Encodes the bitmap as standard, non-interlaced PNG bytes.
  pub fn to_png_vec(&self) -> Result<Vec<u8>, CgbiError> {
    encode_rgba(self)
  }
}
