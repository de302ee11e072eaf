use serde::{Deserialize, Serialize};

use flagstone_core::geometry::Rect;

use crate::level::{PlatformKind, PlatformSpec};

/// Oscillation axis for a moving platform. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Motion descriptor for a moving platform. The platform oscillates along
/// `axis` between `origin` and `origin + distance`; `direction` encodes
/// which way it is currently travelling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Motion {
    pub axis: Axis,
    pub origin: f32,
    pub distance: f32,
    pub speed: f32,
    pub direction: f32,
}

/// A platform: a hitbox plus an optional motion descriptor. A platform is
/// moving iff `motion` is present; there is no subtype distinction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub texture: String,
    pub motion: Option<Motion>,
}

impl Platform {
    pub fn from_spec(spec: &PlatformSpec) -> Self {
        let motion = match spec.kind {
            PlatformKind::Static => None,
            PlatformKind::MovingH { distance, speed } => Some(Motion {
                axis: Axis::Horizontal,
                origin: spec.x,
                distance,
                speed,
                direction: 1.0,
            }),
            PlatformKind::MovingV { distance, speed } => Some(Motion {
                axis: Axis::Vertical,
                origin: spec.y,
                distance,
                speed,
                direction: 1.0,
            }),
        };
        Self {
            rect: Rect::new(spec.x, spec.y, spec.w, spec.h),
            texture: spec.texture.clone(),
            motion,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Horizontal carry applied to a hero standing on this platform. Both
    /// mover kinds shift the hero by `speed * direction` per tick.
    pub fn ride_dx(&self) -> f32 {
        self.motion.map_or(0.0, |m| m.speed * m.direction)
    }

    /// Advance one tick of oscillation. Position along the axis stays
    /// within `[origin, origin + distance]` after every tick: overshoot is
    /// clamped to the bound and the direction flips there.
    pub fn tick(&mut self) {
        let Some(motion) = &mut self.motion else {
            return;
        };
        let pos = match motion.axis {
            Axis::Horizontal => &mut self.rect.x,
            Axis::Vertical => &mut self.rect.y,
        };
        *pos += motion.speed * motion.direction;
        let limit = motion.origin + motion.distance;
        if motion.direction > 0.0 && *pos >= limit {
            *pos = limit;
            motion.direction = -1.0;
        } else if motion.direction < 0.0 && *pos <= motion.origin {
            *pos = motion.origin;
            motion.direction = 1.0;
        }
    }
}
