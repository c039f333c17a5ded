//! Landing resolution
//!
//! The hero's end point is the nominal walk endpoint (origin + stick length),
//! not the rotated stick geometry. Edge touches count as landings.

use serde::{Deserialize, Serialize};

use super::platform::Platform;

/// Result of a completed walk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingResult {
    /// Where the walk ended
    pub end_x: f32,
    /// Whether the end point is on the target platform
    pub landed: bool,
}

/// Decide whether a walk of `stick_length` from `origin_x` ends on `target`
#[inline]
pub fn resolve_landing(origin_x: f32, stick_length: f32, target: &Platform) -> LandingResult {
    let end_x = origin_x + stick_length;
    LandingResult {
        end_x,
        landed: target.contains_x(end_x),
    }
}
