//! The CRC-32 used by PNG chunk framing (IEEE polynomial, reflected).

const CRC_TABLE: [u32; 256] = {
  let mut table = [0_u32; 256];
  let mut n = 0;
  while n < 256 {
    let mut c: u32 = n as _;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320 ^ (c >> 1);
      } else {
        c = c >> 1;
      }
      //
      k += 1;
    }
    table[n] = c;
    //
    n += 1;
  }
  table
};

/// CRC-32 of all the bytes produced by `iter`.
///
/// Chunk checksums cover the type tag followed by the payload, so callers
/// usually `chain` those two together.
#[inline]
pub(crate) fn png_crc(iter: impl Iterator<Item = u8>) -> u32 {
  let mut crc = u32::MAX;
  for byte in iter {
    let i = (crc ^ u32::from(byte)) as u8 as usize;
    crc = CRC_TABLE[i] ^ (crc >> 8);
  }
  crc ^ u32::MAX
}

#[test]
fn test_png_crc_known_values() {
  // the CRC of an empty IEND chunk, as seen in any PNG on disk.
  assert_eq!(png_crc(b"IEND".iter().copied()), 0xAE42_6082);
  // check value from the CRC-32 specification's appendix.
  assert_eq!(png_crc(b"123456789".iter().copied()), 0xCBF4_3926);
}
