//! The one pixel format this crate works in.

use bytemuck::{Pod, Zeroable};

/// An 8-bit-per-channel RGBA pixel, channels in memory order.
///
/// This matches the channel layout of a *standard* PNG's decompressed pixel
/// bytes. CgBI data has already had its blue-before-red order corrected by
/// the time pixels of this type exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
#[allow(missing_docs)]
pub struct RGBA8888 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}
