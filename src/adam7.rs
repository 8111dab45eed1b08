//! Adam7 pass geometry and the red/blue channel fixer.
//!
//! CgBI pixel streams store each pixel's channels as blue-green-red-alpha
//! rather than PNG's red-green-blue-alpha. The fix is the same in both
//! directions: swap byte 0 and byte 2 of every 4-byte pixel group, leaving
//! the per-scanline filter bytes alone. Interlaced images store seven
//! reduced images back to back, so the swap has to know each pass's
//! dimensions to keep the filter bytes lined up.

use crate::{CgbiError, IHDR};

/// The placement and sub-sampling of one Adam7 pass.
///
/// See <https://www.w3.org/TR/PNG/#8Interlace>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InterlacePass {
  pub x_factor: u32,
  pub y_factor: u32,
  pub x_offset: u32,
  pub y_offset: u32,
}

/// The seven Adam7 passes, in stream order.
pub(crate) const INTERLACING: [InterlacePass; 7] = [
  InterlacePass { x_factor: 8, y_factor: 8, x_offset: 0, y_offset: 0 },
  InterlacePass { x_factor: 8, y_factor: 8, x_offset: 4, y_offset: 0 },
  InterlacePass { x_factor: 4, y_factor: 8, x_offset: 0, y_offset: 4 },
  InterlacePass { x_factor: 4, y_factor: 4, x_offset: 2, y_offset: 0 },
  InterlacePass { x_factor: 2, y_factor: 4, x_offset: 0, y_offset: 2 },
  InterlacePass { x_factor: 2, y_factor: 2, x_offset: 1, y_offset: 0 },
  InterlacePass { x_factor: 1, y_factor: 2, x_offset: 0, y_offset: 1 },
];

/// The width and height of reduced image `pass` (0 through 6) within a
/// `width` by `height` full image. Either value may be 0 for small images,
/// in which case the pass contributes no bytes to the stream at all.
#[inline]
#[must_use]
pub(crate) const fn pass_dimensions(pass: usize, width: u32, height: u32) -> (u32, u32) {
  let p = INTERLACING[pass];
  let wp = (width.saturating_sub(p.x_offset) + p.x_factor - 1) / p.x_factor;
  let hp = (height.saturating_sub(p.y_offset) + p.y_factor - 1) / p.y_factor;
  (wp, hp)
}

/// Maps a position within reduced image `pass` to its full-image position.
#[inline]
#[must_use]
pub(crate) const fn pass_to_full(pass: usize, reduced_x: u32, reduced_y: u32) -> (u32, u32) {
  let p = INTERLACING[pass];
  (reduced_x * p.x_factor + p.x_offset, reduced_y * p.y_factor + p.y_offset)
}

/// Byte length of one stored sub-image: 1 filter byte plus `width` RGBA8
/// pixels per line, `height` lines. Zero when either dimension is zero,
/// since empty passes aren't stored (not even their filter bytes).
#[inline]
#[must_use]
pub(crate) fn filtered_len(width: u32, height: u32) -> usize {
  if width == 0 || height == 0 {
    0
  } else {
    ((width as usize) * 4 + 1).saturating_mul(height as usize)
  }
}

/// Swaps red and blue across one stored sub-image.
///
/// `raw` must hold at least [`filtered_len`] bytes; the caller has already
/// checked that.
fn swap_red_blue(raw: &mut [u8], width: u32, height: u32) {
  let bytes_per_line = (width as usize) * 4 + 1;
  for line in raw.chunks_exact_mut(bytes_per_line).take(height as usize) {
    // skip the filter byte, then the line is whole 4-byte pixels.
    let pixels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut line[1..]);
    for px in pixels {
      px.swap(0, 2);
    }
  }
}

/// Swaps the red/blue byte positions of every pixel in a decompressed
/// (still filtered) RGBA8 pixel stream, honoring Adam7 layout.
///
/// Fails with [`CgbiError::UnexpectedDataSize`] if `raw` is shorter than
/// the geometry says it must be.
pub(crate) fn fix_channels(raw: &mut [u8], header: IHDR) -> Result<(), CgbiError> {
  if !header.is_interlaced {
    let len = filtered_len(header.width, header.height);
    if raw.len() < len {
      return Err(CgbiError::UnexpectedDataSize);
    }
    swap_red_blue(raw, header.width, header.height);
    return Ok(());
  }
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
    swap_red_blue(&mut raw[total..total + pass_len], wp, hp);
    total += pass_len;
  }
  Ok(())
}
