//! The image header chunk's payload.

use crate::CgbiError;

/// Interlace method byte: no interlacing.
pub const INTERLACE_NONE: u8 = 0;
/// Interlace method byte: Adam7.
pub const INTERLACE_ADAM7: u8 = 1;

/// Color type byte for true-color-with-alpha, the only one transcoded.
pub const COLOR_RGBA: u8 = 6;

/// Image Header, parsed from a 13-byte `IHDR` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel (always 8 once parsed)
  pub bit_depth: u8,
  /// pixel color type (always 6 once parsed)
  pub color_type: u8,
  /// if the image data is stored as seven Adam7 reduced images.
  pub is_interlaced: bool,
}
impl IHDR {
  /// Parses and validates an `IHDR` payload.
  ///
  /// Only 8-bit true-color-with-alpha headers come out of here; any other
  /// bit depth / color type combination is rejected before pixel work can
  /// start, as is an unknown interlace method or a zero dimension.
  pub fn try_parse(data: &[u8]) -> Result<Self, CgbiError> {
    match data {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, _compression, _filter, interlace] => {
        if *interlace != INTERLACE_NONE && *interlace != INTERLACE_ADAM7 {
          return Err(CgbiError::InvalidInterlaceMethod);
        }
        if *bit_depth != 8 || *color_type != COLOR_RGBA {
          return Err(CgbiError::UnsupportedPixelFormat);
        }
        let width = u32::from_be_bytes([*w0, *w1, *w2, *w3]);
        let height = u32::from_be_bytes([*h0, *h1, *h2, *h3]);
        if width == 0 || height == 0 {
          return Err(CgbiError::WidthOrHeightZero);
        }
        Ok(Self {
          width,
          height,
          bit_depth: *bit_depth,
          color_type: *color_type,
          is_interlaced: *interlace == INTERLACE_ADAM7,
        })
      }
      _ => Err(CgbiError::BadHeaderLength),
    }
  }

  /// The 13 payload bytes for this header.
  #[inline]
  #[must_use]
  pub fn to_payload(self) -> [u8; 13] {
    let [w0, w1, w2, w3] = self.width.to_be_bytes();
    let [h0, h1, h2, h3] = self.height.to_be_bytes();
    let interlace = if self.is_interlaced { INTERLACE_ADAM7 } else { INTERLACE_NONE };
    [w0, w1, w2, w3, h0, h1, h2, h3, self.bit_depth, self.color_type, 0, 0, interlace]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn payload(bit_depth: u8, color_type: u8, interlace: u8) -> [u8; 13] {
    let mut p = [0_u8; 13];
    p[..4].copy_from_slice(&2_u32.to_be_bytes());
    p[4..8].copy_from_slice(&3_u32.to_be_bytes());
    p[8] = bit_depth;
    p[9] = color_type;
    p[12] = interlace;
    p
  }

  #[test]
  fn test_parse_accepts_only_rgba8() {
    let ihdr = IHDR::try_parse(&payload(8, 6, 0)).unwrap();
    assert_eq!((ihdr.width, ihdr.height), (2, 3));
    assert!(!ihdr.is_interlaced);
    assert!(IHDR::try_parse(&payload(8, 6, 1)).unwrap().is_interlaced);
    //
    assert_eq!(IHDR::try_parse(&payload(16, 6, 0)), Err(CgbiError::UnsupportedPixelFormat));
    assert_eq!(IHDR::try_parse(&payload(8, 0, 0)), Err(CgbiError::UnsupportedPixelFormat));
    assert_eq!(IHDR::try_parse(&payload(8, 2, 0)), Err(CgbiError::UnsupportedPixelFormat));
    assert_eq!(IHDR::try_parse(&payload(8, 6, 2)), Err(CgbiError::InvalidInterlaceMethod));
    assert_eq!(IHDR::try_parse(&payload(8, 6, 0)[..12]), Err(CgbiError::BadHeaderLength));
  }

  #[test]
  fn test_payload_roundtrip() {
    let ihdr = IHDR::try_parse(&payload(8, 6, 1)).unwrap();
    assert_eq!(ihdr.to_payload(), payload(8, 6, 1));
  }
}
