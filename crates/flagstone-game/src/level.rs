use serde::{Deserialize, Serialize};

use flagstone_core::view::EnemyKind;

use crate::config::GameConfig;

/// Enemy hitbox size (square).
pub const ENEMY_SIZE: f32 = 32.0;
/// Goal flag hitbox size.
pub const GOAL_WIDTH: f32 = 32.0;
pub const GOAL_HEIGHT: f32 = 64.0;

/// How a platform behaves. Moving kinds carry their travel distance and
/// per-tick speed; a platform's axis never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlatformKind {
    Static,
    MovingH { distance: f32, speed: f32 },
    MovingV { distance: f32, speed: f32 },
}

/// One authored platform placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub texture: String,
    #[serde(flatten)]
    pub kind: PlatformKind,
}

/// One authored enemy spawn: position plus horizontal patrol bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpec {
    pub x: f32,
    pub y: f32,
    pub patrol_min: f32,
    pub patrol_max: f32,
    pub enemy_kind: EnemyKind,
}

/// A complete level definition. Immutable once defined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSpec {
    pub background: String,
    pub platforms: Vec<PlatformSpec>,
    pub enemies: Vec<EnemySpec>,
    pub start: (f32, f32),
    pub goal: (f32, f32),
}

/// Authoring errors caught at level-load time.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    /// A platform has a negative width or height.
    BadPlatformSize { platform: usize },
    /// A moving platform has a non-positive travel distance or speed.
    BadMotion { platform: usize },
    /// An enemy's patrol range is inverted or narrower than the enemy.
    BadPatrol { enemy: usize },
    /// Start or goal position lies outside the playfield.
    OutOfBounds { what: &'static str },
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadPlatformSize { platform } => {
                write!(f, "platform {platform} has negative dimensions")
            },
            Self::BadMotion { platform } => {
                write!(f, "platform {platform} has non-positive travel distance or speed")
            },
            Self::BadPatrol { enemy } => {
                write!(f, "enemy {enemy} has an unusable patrol range")
            },
            Self::OutOfBounds { what } => write!(f, "{what} position is outside the playfield"),
        }
    }
}

impl std::error::Error for LevelError {}

impl LevelSpec {
    /// Fail-fast validation of authored data. Runs at level load; a failure
    /// here is an authoring bug, not a runtime condition.
    pub fn validate(&self, cfg: &GameConfig) -> Result<(), LevelError> {
        for (i, p) in self.platforms.iter().enumerate() {
            if p.w < 0.0 || p.h < 0.0 {
                return Err(LevelError::BadPlatformSize { platform: i });
            }
            if let PlatformKind::MovingH { distance, speed }
            | PlatformKind::MovingV { distance, speed } = p.kind
                && (distance <= 0.0 || speed <= 0.0)
            {
                return Err(LevelError::BadMotion { platform: i });
            }
        }
        for (i, e) in self.enemies.iter().enumerate() {
            if e.patrol_max - e.patrol_min < ENEMY_SIZE {
                return Err(LevelError::BadPatrol { enemy: i });
            }
        }
        let in_field = |x: f32, y: f32| {
            x >= 0.0 && x <= cfg.playfield_width && y >= 0.0 && y <= cfg.playfield_height
        };
        if !in_field(self.start.0, self.start.1) {
            return Err(LevelError::OutOfBounds { what: "start" });
        }
        if !in_field(self.goal.0, self.goal.1) {
            return Err(LevelError::OutOfBounds { what: "goal" });
        }
        Ok(())
    }
}

/// Load a single level from a JSON file, returning `None` if the file is
/// missing or invalid.
pub fn load_level_file(path: &str) -> Option<LevelSpec> {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<LevelSpec>(&content) {
            Ok(level) => Some(level),
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}");
                None
            },
        },
        Err(_) => None,
    }
}

/// Load the level catalog, preferring JSON files from the levels directory.
///
/// Checks env var `FLAGSTONE_LEVELS_DIR` (default `config/levels`) for files
/// named `0.json`, `1.json`, ... in order. Falls back to the built-in
/// catalog when no files are found.
pub fn load_catalog(cfg: &GameConfig) -> Vec<LevelSpec> {
    let dir = std::env::var("FLAGSTONE_LEVELS_DIR").unwrap_or_else(|_| "config/levels".to_string());
    let mut levels = Vec::new();
    loop {
        let path = format!("{dir}/{}.json", levels.len());
        match load_level_file(&path) {
            Some(level) => levels.push(level),
            None => break,
        }
    }
    if levels.is_empty() {
        return builtin_levels(cfg);
    }
    for (i, level) in levels.iter().enumerate() {
        if let Err(e) = level.validate(cfg) {
            tracing::warn!("Level {i} rejected: {e}; using built-in catalog");
            return builtin_levels(cfg);
        }
    }
    levels
}

fn stat(x: f32, y: f32, w: f32, h: f32, texture: &str) -> PlatformSpec {
    PlatformSpec {
        x,
        y,
        w,
        h,
        texture: texture.to_string(),
        kind: PlatformKind::Static,
    }
}

fn mover(x: f32, y: f32, w: f32, h: f32, kind: PlatformKind) -> PlatformSpec {
    PlatformSpec {
        x,
        y,
        w,
        h,
        texture: "metal".to_string(),
        kind,
    }
}

fn enemy(x: f32, y: f32, patrol: (f32, f32), enemy_kind: EnemyKind) -> EnemySpec {
    EnemySpec {
        x,
        y,
        patrol_min: patrol.0,
        patrol_max: patrol.1,
        enemy_kind,
    }
}

/// The built-in three-level campaign.
pub fn builtin_levels(cfg: &GameConfig) -> Vec<LevelSpec> {
    let t = cfg.tile_size;
    let w = cfg.playfield_width;
    let h = cfg.playfield_height;
    let hero_h = cfg.hero_height;

    vec![
        // Level 1: two ground runs split by a pit, wooden ledges up to a
        // stone summit guarded by a brick wall.
        LevelSpec {
            background: "bg_level1".to_string(),
            platforms: vec![
                stat(0.0, h - t, 8.0 * t, t, "ground_dirt"),
                stat(9.0 * t, h - t, 8.0 * t, t, "ground_dirt"),
                stat(2.0 * t, h - 4.0 * t, 2.0 * t, t, "wood"),
                stat(6.0 * t, h - 7.0 * t, 2.0 * t, t, "wood"),
                mover(
                    10.0 * t,
                    h - 7.0 * t,
                    3.0 * t,
                    t,
                    PlatformKind::MovingH {
                        distance: 3.0 * t,
                        speed: 1.0,
                    },
                ),
                stat(18.0 * t, h - 9.0 * t, 4.0 * t, t, "stone"),
                stat(17.0 * t, h - 4.0 * t, t, 5.0 * t, "brick_wall"),
            ],
            enemies: vec![
                enemy(
                    5.0 * t,
                    h - t - ENEMY_SIZE,
                    (4.0 * t, 7.0 * t),
                    EnemyKind::Zombie,
                ),
                enemy(
                    11.0 * t,
                    h - t - ENEMY_SIZE,
                    (10.0 * t, 15.0 * t),
                    EnemyKind::Ice,
                ),
                enemy(7.0 * t, h - 10.0 * t, (6.0 * t, 8.0 * t), EnemyKind::Bat),
                enemy(
                    20.0 * t,
                    h - 9.0 * t - ENEMY_SIZE,
                    (19.0 * t, 22.0 * t),
                    EnemyKind::Zombie,
                ),
            ],
            start: (t, h - t - hero_h),
            goal: (
                18.0 * t + 2.0 * t - GOAL_WIDTH / 2.0,
                h - 9.0 * t - GOAL_HEIGHT,
            ),
        },
        // Level 2: a vertical climb over stepping stones and two vertical
        // movers, ending on wooden steps to a high flag.
        LevelSpec {
            background: "bg_level2".to_string(),
            platforms: vec![
                stat(0.0, h - t, w, t, "ground_dirt"),
                stat(2.0 * t, h - 5.0 * t, t, t, "stone"),
                stat(5.0 * t, h - 8.0 * t, t, t, "stone"),
                stat(t, h - 11.0 * t, t, t, "stone"),
                mover(
                    8.0 * t,
                    h - 12.0 * t,
                    2.0 * t,
                    t,
                    PlatformKind::MovingV {
                        distance: 4.0 * t,
                        speed: 1.5,
                    },
                ),
                mover(
                    12.0 * t,
                    h - 8.0 * t,
                    2.0 * t,
                    t,
                    PlatformKind::MovingV {
                        distance: 3.0 * t,
                        speed: 1.0,
                    },
                ),
                stat(16.0 * t, h - 10.0 * t, t, t, "wood"),
                stat(18.0 * t, h - 12.0 * t, t, t, "wood"),
                stat(20.0 * t, h - 14.0 * t, t, t, "wood"),
                stat(w - 3.0 * t, h - 10.0 * t, 2.0 * t, t, "stone"),
            ],
            enemies: vec![
                enemy(
                    2.0 * t + t / 2.0 - ENEMY_SIZE / 2.0,
                    h - 5.0 * t - ENEMY_SIZE,
                    (2.0 * t, 3.0 * t),
                    EnemyKind::Ice,
                ),
                enemy(
                    5.0 * t + t / 2.0 - ENEMY_SIZE / 2.0,
                    h - 8.0 * t - ENEMY_SIZE,
                    (5.0 * t, 6.0 * t),
                    EnemyKind::Zombie,
                ),
                enemy(
                    10.0 * t,
                    h - 15.0 * t,
                    (8.0 * t, 14.0 * t),
                    EnemyKind::Bat,
                ),
                enemy(
                    17.0 * t,
                    h - 6.0 * t,
                    (16.0 * t, 20.0 * t),
                    EnemyKind::Bat,
                ),
            ],
            start: (t, h - t - hero_h),
            goal: (20.0 * t, h - 14.0 * t - GOAL_HEIGHT),
        },
        // Level 3: a walled gauntlet mixing both mover kinds with heavy
        // enemy coverage on the ground floor.
        LevelSpec {
            background: "bg_level3".to_string(),
            platforms: vec![
                stat(t, h - 3.0 * t, 2.0 * t, t, "stone"),
                stat(0.0, h - t, w, t, "ground_dirt"),
                stat(6.0 * t, h - 8.0 * t, t, 7.0 * t, "brick_wall"),
                stat(12.0 * t, h - 6.0 * t, t, 5.0 * t, "brick_wall"),
                stat(18.0 * t, h - 10.0 * t, t, 9.0 * t, "brick_wall"),
                stat(7.0 * t, h - 4.0 * t, t, t, "wood"),
                stat(3.0 * t, h - 6.0 * t, t, t, "wood"),
                stat(9.0 * t, h - 8.0 * t, t, t, "wood"),
                mover(
                    14.0 * t,
                    h - 3.0 * t,
                    2.0 * t,
                    t,
                    PlatformKind::MovingH {
                        distance: 2.0 * t,
                        speed: 2.0,
                    },
                ),
                stat(13.0 * t, h - 10.0 * t, t, t, "stone"),
                mover(
                    20.0 * t,
                    h - 12.0 * t,
                    2.0 * t,
                    t,
                    PlatformKind::MovingV {
                        distance: 4.0 * t,
                        speed: 1.0,
                    },
                ),
                stat(w - 2.0 * t, h - 15.0 * t, t, t, "stone"),
            ],
            enemies: vec![
                enemy(t, h - t - ENEMY_SIZE, (0.0, 5.0 * t), EnemyKind::Ice),
                enemy(
                    8.0 * t,
                    h - t - ENEMY_SIZE,
                    (7.0 * t, 11.0 * t),
                    EnemyKind::Zombie,
                ),
                enemy(
                    15.0 * t,
                    h - t - ENEMY_SIZE,
                    (13.0 * t, 17.0 * t),
                    EnemyKind::Ice,
                ),
                enemy(4.0 * t, h - 9.0 * t, (3.0 * t, 5.0 * t), EnemyKind::Bat),
                enemy(
                    10.0 * t,
                    h - 11.0 * t,
                    (9.0 * t, 11.0 * t),
                    EnemyKind::Bat,
                ),
                enemy(
                    14.0 * t,
                    h - 6.0 * t,
                    (13.0 * t, 15.0 * t),
                    EnemyKind::Zombie,
                ),
                enemy(22.0 * t, h - 8.0 * t, (20.0 * t, w - t), EnemyKind::Bat),
            ],
            start: (1.5 * t, h - 3.0 * t - hero_h),
            goal: (
                w - 2.0 * t + t / 2.0 - GOAL_WIDTH / 2.0,
                h - 15.0 * t - GOAL_HEIGHT,
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_validates() {
        let cfg = GameConfig::default();
        for (i, level) in builtin_levels(&cfg).iter().enumerate() {
            assert_eq!(level.validate(&cfg), Ok(()), "level {i} must validate");
        }
    }

    #[test]
    fn builtin_catalog_has_three_levels() {
        let cfg = GameConfig::default();
        assert_eq!(builtin_levels(&cfg).len(), 3);
    }

    #[test]
    fn every_level_has_a_moving_platform() {
        let cfg = GameConfig::default();
        for level in builtin_levels(&cfg) {
            assert!(
                level
                    .platforms
                    .iter()
                    .any(|p| p.kind != PlatformKind::Static),
                "each authored level exercises moving platforms"
            );
        }
    }

    #[test]
    fn negative_platform_size_rejected() {
        let cfg = GameConfig::default();
        let mut level = builtin_levels(&cfg).remove(0);
        level.platforms[0].w = -1.0;
        assert_eq!(
            level.validate(&cfg),
            Err(LevelError::BadPlatformSize { platform: 0 })
        );
    }

    #[test]
    fn zero_distance_mover_rejected() {
        let cfg = GameConfig::default();
        let mut level = builtin_levels(&cfg).remove(0);
        for p in &mut level.platforms {
            if let PlatformKind::MovingH { distance, .. } = &mut p.kind {
                *distance = 0.0;
            }
        }
        assert!(matches!(
            level.validate(&cfg),
            Err(LevelError::BadMotion { .. })
        ));
    }

    #[test]
    fn inverted_patrol_rejected() {
        let cfg = GameConfig::default();
        let mut level = builtin_levels(&cfg).remove(0);
        level.enemies[0].patrol_min = level.enemies[0].patrol_max;
        assert_eq!(
            level.validate(&cfg),
            Err(LevelError::BadPatrol { enemy: 0 })
        );
    }

    #[test]
    fn out_of_bounds_goal_rejected() {
        let cfg = GameConfig::default();
        let mut level = builtin_levels(&cfg).remove(0);
        level.goal.0 = cfg.playfield_width + 1.0;
        assert_eq!(
            level.validate(&cfg),
            Err(LevelError::OutOfBounds { what: "goal" })
        );
    }

    #[test]
    fn unknown_platform_kind_fails_to_parse() {
        let json = r#"{
            "background": "bg",
            "platforms": [
                {"x": 0.0, "y": 0.0, "w": 32.0, "h": 32.0, "texture": "stone", "kind": "bouncy"}
            ],
            "enemies": [],
            "start": [0.0, 0.0],
            "goal": [0.0, 0.0]
        }"#;
        assert!(serde_json::from_str::<LevelSpec>(json).is_err());
    }

    #[test]
    fn json_roundtrip_preserves_level() {
        let cfg = GameConfig::default();
        let level = builtin_levels(&cfg).remove(1);
        let json = serde_json::to_string(&level).unwrap();
        let loaded: LevelSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.platforms.len(), level.platforms.len());
        assert_eq!(loaded.enemies.len(), level.enemies.len());
        assert_eq!(loaded.start, level.start);
        assert_eq!(loaded.goal, level.goal);
        assert_eq!(loaded.validate(&cfg), Ok(()));
    }

    #[test]
    fn load_from_missing_file_returns_none() {
        assert!(load_level_file("/nonexistent/path/0.json").is_none());
    }
}
