use bytemuck::{Pod, Zeroable};

/// Gameplay phase of the current level.
///
/// Consumed by the ground generator to decide which stage meshes need a
/// rebuild this frame. `Inactive` covers menu/game-over states where the
/// hole may still be repositioned externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StagePhase {
    /// Hole is on the first playground stage.
    #[default]
    First,
    /// Hole is on the second playground stage.
    Second,
    /// Hole is crossing from the first stage to the second.
    Transition,
    /// Gameplay is not running.
    Inactive,
}

/// RGBA color with float channels, used by color tweens.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const TRANSPARENT: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channel-wise unclamped interpolation toward `to`.
    /// Overshooting easing curves may push channels outside [0, 1].
    pub fn lerp_unclamped(self, to: Rgba, t: f32) -> Rgba {
        Rgba {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_lerp_midpoint() {
        let c = Rgba::BLACK.lerp_unclamped(Rgba::WHITE, 0.5);
        assert!((c.r - 0.5).abs() < 1e-6);
        assert!((c.a - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rgba_lerp_is_unclamped() {
        let c = Rgba::BLACK.lerp_unclamped(Rgba::WHITE, 1.2);
        assert!(c.r > 1.0);
    }
}
