/// An error from the `cgbi` crate.
///
/// Every failure here is a deterministic function of the input bytes, so
/// retrying an operation without changing the input can't help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgbiError {
  /// The first 8 bytes of the data stream weren't the PNG signature.
  BadSignature,

  /// A chunk declared a length over `0x7fff_ffff`.
  BadChunkLength,

  /// A chunk's stored CRC didn't match the CRC of its type and payload.
  BadChecksum,

  /// The input ended in the middle of a chunk.
  ///
  /// This is distinct from a checksum failure: the data we *did* get might
  /// have been fine, there just wasn't enough of it.
  UnexpectedEndOfInput,

  /// A chunk appeared at a position the chunk ordering rules forbid.
  ChunkOutOfOrder,

  /// The `CgBI` marker chunk had the wrong length or payload value.
  BadMarkerChunk,

  /// The `IHDR` payload wasn't exactly 13 bytes.
  BadHeaderLength,

  /// The `IEND` payload wasn't empty.
  BadTrailerLength,

  /// The header declared an interlace method other than "none" or Adam7.
  InvalidInterlaceMethod,

  /// The image isn't 8-bit-per-channel RGBA, the only format transcoded.
  UnsupportedPixelFormat,

  /// The decompressed pixel data didn't match the size computed from the
  /// image's dimensions and interlacing. This signals corrupt input rather
  /// than any normal-path condition.
  UnexpectedDataSize,

  /// The compressed pixel stream couldn't be decompressed.
  BadDeflateStream,

  /// The image's declared width or height is 0.
  WidthOrHeightZero,
}
