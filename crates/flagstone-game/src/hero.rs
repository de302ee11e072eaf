use serde::{Deserialize, Serialize};

use flagstone_core::geometry::Rect;
use flagstone_core::input::InputFrame;
use flagstone_core::view::HeroState;

use crate::config::GameConfig;
use crate::goal::Goal;
use crate::platform::Platform;

/// Run animation advances faster than idle/jump.
const RUN_ANIMATION_PERIOD: u32 = 7;
const BASE_ANIMATION_PERIOD: u32 = 10;

/// Result of applying damage to the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible or already dead; nothing happened.
    Ignored,
    /// Lost one health and became invincible.
    Hurt,
    /// The hit reduced health to zero.
    Dead,
}

/// The player character. Created at a level's start position and recreated
/// on every level (re)start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub rect: Rect,
    /// Vertical velocity, positive downward.
    pub vy: f32,
    /// +1 facing right, -1 facing left.
    pub facing: f32,
    pub on_ground: bool,
    pub invincible: bool,
    pub invincible_ticks: u32,
    /// Remaining hits. Starts at 3, never goes negative.
    pub health: i32,
    pub state: HeroState,
    pub frame: u32,
    frame_timer: u32,
}

impl Hero {
    pub fn new(x: f32, y: f32, cfg: &GameConfig) -> Self {
        Self {
            rect: Rect::new(x, y, cfg.hero_width, cfg.hero_height),
            vy: 0.0,
            facing: 1.0,
            on_ground: false,
            invincible: false,
            invincible_ticks: 0,
            health: 3,
            state: HeroState::Idle,
            frame: 0,
            frame_timer: 0,
        }
    }

    /// Advance the hero one tick: input, gravity, platform collision, and
    /// state derivation, in that fixed order. Returns whether the hero is
    /// overlapping an active goal at the end of the tick.
    pub fn update(
        &mut self,
        input: &InputFrame,
        platforms: &[Platform],
        goal: &Goal,
        cfg: &GameConfig,
    ) -> bool {
        if self.invincible {
            self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
            if self.invincible_ticks == 0 {
                self.invincible = false;
            }
        }

        let previous_state = self.state;
        let dir = input.move_dir();
        if dir != 0.0 {
            self.facing = dir;
            if self.on_ground {
                self.state = HeroState::Run;
            }
        } else if self.on_ground {
            self.state = HeroState::Idle;
        }

        if self.state != previous_state && self.on_ground {
            self.reset_animation();
        }
        self.advance_animation();

        self.rect.x += dir * cfg.move_speed;

        self.vy = (self.vy + cfg.gravity).min(cfg.max_fall_speed);
        self.rect.y += self.vy;

        let was_on_ground = self.on_ground;
        self.on_ground = false;

        // Platforms are resolved in catalog order. The first landing snap
        // zeroes vy, so when several platforms overlap the hero in one tick
        // the earliest catalog entry wins; later overlaps only add carry.
        // The authored levels rely on this order.
        for platform in platforms {
            if !self.rect.intersects(&platform.rect) {
                continue;
            }

            let landing = self.vy > 0.0
                && self.rect.bottom() > platform.rect.top()
                && self.rect.top() < platform.rect.top();
            let head_bump = self.vy < 0.0
                && self.rect.top() < platform.rect.bottom()
                && self.rect.bottom() > platform.rect.bottom();

            if landing {
                self.rect.set_bottom(platform.rect.top());
                self.vy = 0.0;
                self.on_ground = true;
                if !was_on_ground {
                    self.state = if dir != 0.0 {
                        HeroState::Run
                    } else {
                        HeroState::Idle
                    };
                    self.reset_animation();
                }
            } else if head_bump {
                self.rect.y = platform.rect.bottom();
                self.vy = 0.0;
            }

            // Standing on a mover carries the hero with it.
            if self.on_ground {
                self.rect.x += platform.ride_dx();
            }
        }

        if !self.on_ground && self.state != HeroState::Jump {
            self.state = HeroState::Jump;
            self.reset_animation();
        } else if self.on_ground && self.state == HeroState::Jump && dir == 0.0 {
            self.state = HeroState::Idle;
            self.reset_animation();
        }

        self.rect.intersects(&goal.rect) && goal.active
    }

    /// Jump if grounded. Returns whether a jump actually happened, so the
    /// caller can play the sound cue.
    pub fn jump(&mut self, cfg: &GameConfig) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = -cfg.jump_power;
        self.on_ground = false;
        if self.state != HeroState::Jump {
            self.state = HeroState::Jump;
            self.reset_animation();
        }
        true
    }

    /// Apply one hit. A no-op while invincible or already dead; otherwise
    /// costs one health and opens the invincibility window.
    pub fn take_damage(&mut self, cfg: &GameConfig) -> DamageOutcome {
        if self.invincible || self.health <= 0 {
            return DamageOutcome::Ignored;
        }
        self.health = (self.health - 1).max(0);
        self.invincible = true;
        self.invincible_ticks = cfg.ticks(cfg.invincibility_secs);
        if self.health == 0 {
            DamageOutcome::Dead
        } else {
            DamageOutcome::Hurt
        }
    }

    /// Invincibility flicker: the renderer skips the hero on blink ticks.
    pub fn blink(&self, cfg: &GameConfig) -> bool {
        if !self.invincible {
            return false;
        }
        let period = (cfg.tick_rate_hz / 10.0).max(1.0) as u32;
        (self.invincible_ticks / period) % 2 == 0
    }

    fn advance_animation(&mut self) {
        self.frame_timer += 1;
        let period = if self.state == HeroState::Run {
            RUN_ANIMATION_PERIOD
        } else {
            BASE_ANIMATION_PERIOD
        };
        if self.frame_timer >= period {
            self.frame = (self.frame + 1) % self.state.frame_count();
            self.frame_timer = 0;
        }
    }

    fn reset_animation(&mut self) {
        self.frame = 0;
        self.frame_timer = 0;
    }
}
