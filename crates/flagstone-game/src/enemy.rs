use serde::{Deserialize, Serialize};

use flagstone_core::geometry::Rect;
use flagstone_core::view::EnemyKind;

use crate::level::{ENEMY_SIZE, EnemySpec};

/// Ticks between enemy animation frames.
const ANIMATION_PERIOD: u32 = 15;
/// Bat float phase advance per tick.
const FLOAT_PHASE_STEP: f32 = 0.1;
/// Bat float amplitude (units/tick of vertical drift at the sine peak).
const FLOAT_AMPLITUDE: f32 = 0.5;

/// A patrolling enemy. Alive is monotonic: once defeated an enemy never
/// comes back, and its tick is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub kind: EnemyKind,
    pub patrol_min: f32,
    pub patrol_max: f32,
    pub direction: f32,
    pub speed: f32,
    pub alive: bool,
    float_phase: f32,
    pub frame: u32,
    frame_timer: u32,
}

impl Enemy {
    pub fn from_spec(spec: &EnemySpec) -> Self {
        Self {
            rect: Rect::new(spec.x, spec.y, ENEMY_SIZE, ENEMY_SIZE),
            kind: spec.enemy_kind,
            patrol_min: spec.patrol_min,
            patrol_max: spec.patrol_max,
            direction: -1.0,
            speed: spec.enemy_kind.patrol_speed(),
            alive: true,
            float_phase: 0.0,
            frame: 0,
            frame_timer: 0,
        }
    }

    /// One-way transition to dead. Idempotent: defeating an already-dead
    /// enemy changes nothing.
    pub fn defeat(&mut self) {
        self.alive = false;
    }

    pub fn tick(&mut self) {
        if !self.alive {
            return;
        }

        // Bats drift vertically on a sine wave and ignore platforms.
        if self.kind.flies() {
            self.float_phase += FLOAT_PHASE_STEP;
            self.rect.y += self.float_phase.sin() * FLOAT_AMPLITUDE;
        }

        self.rect.x += self.speed * self.direction;
        if self.rect.left() <= self.patrol_min {
            self.rect.x = self.patrol_min;
            self.direction = 1.0;
        } else if self.rect.right() >= self.patrol_max {
            self.rect.set_right(self.patrol_max);
            self.direction = -1.0;
        }

        self.frame_timer += 1;
        if self.frame_timer >= ANIMATION_PERIOD {
            self.frame = (self.frame + 1) % self.kind.frame_count();
            self.frame_timer = 0;
        }
    }
}
