use serde::{Deserialize, Serialize};

/// Simulation tick rate (Hz).
pub const TICK_RATE: f32 = 60.0;
/// Playfield width in world units.
pub const PLAYFIELD_WIDTH: f32 = 800.0;
/// Playfield height in world units.
pub const PLAYFIELD_HEIGHT: f32 = 600.0;
/// Tile size used by the authored level layouts.
pub const TILE_SIZE: f32 = 32.0;
/// Gravity acceleration (units/tick^2, downward).
pub const GRAVITY: f32 = 0.6;
/// Terminal fall speed (units/tick).
pub const MAX_FALL_SPEED: f32 = 10.0;
/// Hero horizontal speed (units/tick).
pub const MOVE_SPEED: f32 = 5.0;
/// Initial jump velocity magnitude (applied upward).
pub const JUMP_POWER: f32 = 15.0;
/// Hero hitbox size.
pub const HERO_WIDTH: f32 = 32.0;
pub const HERO_HEIGHT: f32 = 32.0;
/// Vertical tolerance below an enemy's center that still counts as a stomp.
pub const STOMP_TOLERANCE: f32 = 5.0;
/// Stomp bounce as a fraction of jump power.
pub const STOMP_BOUNCE: f32 = 0.6;

/// Tunable gameplay parameters, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tick_rate_hz: f32,
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub tile_size: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub move_speed: f32,
    pub jump_power: f32,
    pub hero_width: f32,
    pub hero_height: f32,
    pub stomp_tolerance: f32,
    pub stomp_bounce: f32,
    /// Invincibility window after taking damage, in seconds.
    pub invincibility_secs: f32,
    /// Pause between completing a level and loading the next, in seconds.
    pub transition_secs: f32,
    /// How far below the playfield the hero may fall before dying.
    pub fall_kill_margin: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE,
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            tile_size: TILE_SIZE,
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            move_speed: MOVE_SPEED,
            jump_power: JUMP_POWER,
            hero_width: HERO_WIDTH,
            hero_height: HERO_HEIGHT,
            stomp_tolerance: STOMP_TOLERANCE,
            stomp_bounce: STOMP_BOUNCE,
            invincibility_secs: 2.0,
            transition_secs: 2.0,
            fall_kill_margin: 100.0,
        }
    }
}

impl GameConfig {
    /// Load config from the `FLAGSTONE_CONFIG` env var or
    /// `config/flagstone.toml`, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("FLAGSTONE_CONFIG") {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str::<Self>(&content) {
                    Ok(cfg) => return cfg,
                    Err(e) => tracing::warn!("Failed to parse {path}: {e}, using defaults"),
                },
                Err(e) => tracing::warn!("Failed to read {path}: {e}, using defaults"),
            }
        }
        if let Ok(content) = std::fs::read_to_string("config/flagstone.toml")
            && let Ok(cfg) = toml::from_str::<Self>(&content)
        {
            return cfg;
        }
        Self::default()
    }

    /// Convert a duration in seconds into whole ticks at the configured rate.
    pub fn ticks(&self, secs: f32) -> u32 {
        (secs * self.tick_rate_hz).round() as u32
    }
}
