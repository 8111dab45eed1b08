//! The chunk-ordering state machine shared by both transcode directions.

use crate::{chunk::ChunkTy, CgbiError};

/// Where a chunk walk currently stands.
///
/// The legal progression is `Start → SeenMarker → SeenHeader → SeenData →
/// SeenEnd`. Decoding starts at [`Start`](Stage::Start) and expects the
/// source's own `CgBI` chunk to advance past it; encoding injects the
/// marker itself and so begins its walk at [`SeenMarker`](Stage::SeenMarker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Stage {
  Start,
  SeenMarker,
  SeenHeader,
  SeenData,
  SeenEnd,
}
impl Stage {
  /// The stage after a chunk of type `ty` arrives, or
  /// [`CgbiError::ChunkOutOfOrder`] if the ordering rules forbid it here.
  ///
  /// Ancillary chunk types are only legal between the header and the end of
  /// the data, and don't advance the stage.
  pub(crate) fn next(self, ty: ChunkTy) -> Result<Stage, CgbiError> {
    Ok(match (self, ty.as_bytes()) {
      (Stage::Start, b"CgBI") => Stage::SeenMarker,
      (Stage::SeenMarker, b"IHDR") => Stage::SeenHeader,
      (Stage::SeenHeader | Stage::SeenData, b"IDAT") => Stage::SeenData,
      (Stage::SeenData, b"IEND") => Stage::SeenEnd,
      (Stage::SeenHeader | Stage::SeenData, other) if !is_critical(other) => self,
      _ => return Err(CgbiError::ChunkOutOfOrder),
    })
  }
}

/// The four chunk types with ordering rules of their own; everything else
/// passes through.
#[inline]
#[must_use]
const fn is_critical(ty: &[u8; 4]) -> bool {
  matches!(ty, b"CgBI" | b"IHDR" | b"IDAT" | b"IEND")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_legal_progression() {
    let mut stage = Stage::Start;
    for ty in [ChunkTy::CgBI, ChunkTy::IHDR, ChunkTy::IDAT, ChunkTy::IDAT] {
      stage = stage.next(ty).unwrap();
    }
    assert_eq!(stage, Stage::SeenData);
    // ancillary chunks between data chunks don't move the stage.
    assert_eq!(stage.next(ChunkTy(*b"tEXt")), Ok(Stage::SeenData));
    assert_eq!(stage.next(ChunkTy::IEND), Ok(Stage::SeenEnd));
  }

  #[test]
  fn test_out_of_order_rejected() {
    // header before marker
    assert_eq!(Stage::Start.next(ChunkTy::IHDR), Err(CgbiError::ChunkOutOfOrder));
    // data before header
    assert_eq!(Stage::SeenMarker.next(ChunkTy::IDAT), Err(CgbiError::ChunkOutOfOrder));
    // end without any data
    assert_eq!(Stage::SeenHeader.next(ChunkTy::IEND), Err(CgbiError::ChunkOutOfOrder));
    // a second marker
    assert_eq!(Stage::SeenMarker.next(ChunkTy::CgBI), Err(CgbiError::ChunkOutOfOrder));
    // ancillary chunks aren't legal ahead of the header
    assert_eq!(Stage::Start.next(ChunkTy(*b"tEXt")), Err(CgbiError::ChunkOutOfOrder));
    assert_eq!(Stage::SeenMarker.next(ChunkTy(*b"gAMA")), Err(CgbiError::ChunkOutOfOrder));
  }
}
