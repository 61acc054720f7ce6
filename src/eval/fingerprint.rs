use crate::{
    eval::evaluator::EvaluatedFrame,
    foundation::{error::AdreelResult, math::Fnv1a64},
};

/// Stable 64-bit digest of an evaluated frame's JSON form.
///
/// The frame index is part of the digest, so identical trees at different frames differ.
pub fn fingerprint_frame(frame: &EvaluatedFrame) -> AdreelResult<u64> {
    let bytes = serde_json::to_vec(frame)?;
    let mut h = Fnv1a64::new_default();
    h.write_bytes(&bytes);
    Ok(h.finish())
}

/// Order-sensitive combination of per-frame fingerprints.
pub fn fingerprint_frames(frames: &[EvaluatedFrame]) -> AdreelResult<u64> {
    let mut h = Fnv1a64::new_default();
    h.write_u64(frames.len() as u64);
    for f in frames {
        h.write_u64(fingerprint_frame(f)?);
    }
    Ok(h.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
