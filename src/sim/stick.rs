//! The plank the player grows and drops across the gap

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::STICK_FLAT_DEGREES;

/// Lifecycle of a stick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StickPhase {
    /// Standing upright, getting longer while the press is held
    Growing,
    /// Falling toward horizontal
    Rotating,
    /// Lying flat across the gap (rotation complete)
    Fallen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stick {
    /// Pivot point: right edge of the platform top the hero stands on
    pub base: Vec2,
    pub length: f32,
    /// 0 = upright, 90 = flat
    pub rotation_degrees: f32,
    pub phase: StickPhase,
}

impl Stick {
    pub fn new(base: Vec2) -> Self {
        Self {
            base,
            length: 0.0,
            rotation_degrees: 0.0,
            phase: StickPhase::Growing,
        }
    }

    /// Lengthen by `speed * dt`, never past `max_length`. No-op unless growing.
    pub fn grow(&mut self, dt: f32, speed: f32, max_length: f32) {
        if self.phase != StickPhase::Growing || self.length >= max_length {
            return;
        }
        self.length = (self.length + speed * dt).min(max_length);
    }

    /// Stop growing and start falling
    pub fn start_rotating(&mut self) {
        if self.phase == StickPhase::Growing {
            self.phase = StickPhase::Rotating;
        }
    }

    /// Advance the fall by `speed * dt` degrees.
    ///
    /// Returns true on the step where the stick lands flat.
    pub fn rotate(&mut self, dt: f32, speed: f32) -> bool {
        if self.phase != StickPhase::Rotating {
            return false;
        }
        self.rotation_degrees += speed * dt;
        if self.rotation_degrees >= STICK_FLAT_DEGREES {
            self.rotation_degrees = STICK_FLAT_DEGREES;
            self.phase = StickPhase::Fallen;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_growing(&self) -> bool {
        self.phase == StickPhase::Growing
    }

    #[inline]
    pub fn is_rotating(&self) -> bool {
        self.phase == StickPhase::Rotating
    }

    #[inline]
    pub fn is_rotation_complete(&self) -> bool {
        self.phase == StickPhase::Fallen
    }

    /// Tip in the stick's local frame: `base + length * (cos θ, sin θ)`
    pub fn tip(&self) -> Vec2 {
        let theta = self.rotation_degrees.to_radians();
        self.base + self.length * Vec2::new(theta.cos(), theta.sin())
    }

    /// Tip in screen space (y down): straight up at 0°, pointing right at 90°
    pub fn world_tip(&self) -> Vec2 {
        let theta = self.rotation_degrees.to_radians();
        self.base + self.length * Vec2::new(theta.sin(), -theta.cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grow_clamps_to_max() {
        let mut stick = Stick::new(Vec2::new(150.0, 350.0));
        stick.grow(10.0, 100.0, 300.0);
        assert_eq!(stick.length, 300.0);
        stick.grow(1.0, 100.0, 300.0);
        assert_eq!(stick.length, 300.0);
    }

    #[test]
    fn test_no_growth_after_release() {
        let mut stick = Stick::new(Vec2::ZERO);
        stick.grow(0.5, 100.0, 300.0);
        stick.start_rotating();
        stick.grow(0.5, 100.0, 300.0);
        assert_eq!(stick.length, 50.0);
        assert!(stick.is_rotating());
        assert!(!stick.is_growing());
    }

    #[test]
    fn test_rotation_lands_exactly_flat() {
        let mut stick = Stick::new(Vec2::ZERO);
        stick.start_rotating();
        assert!(!stick.rotate(0.25, 180.0));
        assert_eq!(stick.rotation_degrees, 45.0);
        assert!(stick.rotate(0.4, 180.0));
        assert_eq!(stick.rotation_degrees, 90.0);
        assert!(stick.is_rotation_complete());
        // Already flat, further steps do nothing
        assert!(!stick.rotate(1.0, 180.0));
        assert_eq!(stick.rotation_degrees, 90.0);
    }

    #[test]
    fn test_rotate_ignored_while_growing() {
        let mut stick = Stick::new(Vec2::ZERO);
        assert!(!stick.rotate(1.0, 180.0));
        assert_eq!(stick.rotation_degrees, 0.0);
    }

    #[test]
    fn test_tip_geometry() {
        let mut stick = Stick::new(Vec2::new(150.0, 350.0));
        stick.length = 100.0;
        let up = stick.world_tip();
        assert!((up - Vec2::new(150.0, 250.0)).length() < 1e-3);

        stick.rotation_degrees = 90.0;
        let flat = stick.world_tip();
        assert!((flat - Vec2::new(250.0, 350.0)).length() < 1e-3);
        let local = stick.tip();
        assert!((local - Vec2::new(150.0, 450.0)).length() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_growth_monotonic_and_bounded(steps in prop::collection::vec(0.0f32..2.0, 1..60)) {
            let mut stick = Stick::new(Vec2::ZERO);
            let mut last = 0.0;
            for dt in steps {
                stick.grow(dt, 100.0, 300.0);
                prop_assert!(stick.length >= last);
                prop_assert!(stick.length <= 300.0);
                last = stick.length;
            }
        }

        #[test]
        fn prop_rotation_never_overshoots(steps in prop::collection::vec(0.0f32..5.0, 1..40)) {
            let mut stick = Stick::new(Vec2::ZERO);
            stick.start_rotating();
            for dt in steps {
                stick.rotate(dt, 180.0);
                prop_assert!(stick.rotation_degrees <= 90.0);
                prop_assert!(stick.rotation_degrees >= 0.0);
            }
            if stick.is_rotation_complete() {
                prop_assert_eq!(stick.rotation_degrees, 90.0);
            }
        }
    }
}
