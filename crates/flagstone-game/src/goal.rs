use serde::{Deserialize, Serialize};

use flagstone_core::geometry::Rect;

use crate::level::{GOAL_HEIGHT, GOAL_WIDTH};

/// Ticks between flag animation frames.
const ANIMATION_PERIOD: u32 = 15;
/// The flag waves between two frames.
const FRAME_COUNT: u32 = 2;

/// The level's goal flag. Stays active for collision purposes; level
/// completion is decided by the session, not by the goal itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
    pub active: bool,
    pub frame: u32,
    frame_timer: u32,
}

impl Goal {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, GOAL_WIDTH, GOAL_HEIGHT),
            active: true,
            frame: 0,
            frame_timer: 0,
        }
    }

    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        self.frame_timer += 1;
        if self.frame_timer >= ANIMATION_PERIOD {
            self.frame = (self.frame + 1) % FRAME_COUNT;
            self.frame_timer = 0;
        }
    }
}
