use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Logical hero state. Drives both physics-side decisions and which sprite
/// strip the driver renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroState {
    Idle,
    Run,
    Jump,
}

impl HeroState {
    /// Number of animation frames in this state's sprite strip.
    pub fn frame_count(&self) -> u32 {
        match self {
            HeroState::Idle => 4,
            HeroState::Run => 6,
            HeroState::Jump => 4,
        }
    }
}

/// Enemy variants. Kind determines patrol speed, frame count, and whether
/// the enemy floats (bats ignore platforms entirely).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Zombie,
    Bat,
    Ice,
}

impl EnemyKind {
    pub fn patrol_speed(&self) -> f32 {
        match self {
            EnemyKind::Zombie => 1.0,
            EnemyKind::Bat => 2.0,
            EnemyKind::Ice => 1.5,
        }
    }

    pub fn frame_count(&self) -> u32 {
        match self {
            EnemyKind::Zombie => 2,
            EnemyKind::Bat => 3,
            EnemyKind::Ice => 2,
        }
    }

    /// Bats superimpose a sinusoidal float on their patrol and never
    /// collide with platforms.
    pub fn flies(&self) -> bool {
        matches!(self, EnemyKind::Bat)
    }
}

/// Hero snapshot for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroView {
    pub rect: Rect,
    /// +1 facing right, -1 facing left.
    pub facing: f32,
    pub state: HeroState,
    /// Current animation frame index within the state's strip.
    pub frame: u32,
    pub frame_count: u32,
    /// Invincibility flicker: when true the driver skips drawing the hero
    /// this tick.
    pub blink: bool,
}

/// Platform snapshot for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformView {
    pub rect: Rect,
    pub texture: String,
    pub moving: bool,
}

/// Alive-enemy snapshot for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub rect: Rect,
    pub kind: EnemyKind,
    pub frame: u32,
}

/// Goal flag snapshot for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalView {
    pub rect: Rect,
    pub frame: u32,
    pub active: bool,
}

/// Aggregate HUD data for the playing state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hud {
    pub health: i32,
    pub level_index: usize,
    pub unlocked: Vec<usize>,
}

/// A clickable button as the driver should draw it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonView {
    pub rect: Rect,
    pub label: String,
    pub hovered: bool,
    pub enabled: bool,
}

/// Read-only snapshot of everything the driver needs to draw one frame.
/// Mirrors the session's state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Scene {
    Menu {
        buttons: Vec<ButtonView>,
    },
    LevelSelect {
        buttons: Vec<ButtonView>,
        unlocked: Vec<usize>,
    },
    Playing {
        background: String,
        platforms: Vec<PlatformView>,
        enemies: Vec<EnemyView>,
        goal: GoalView,
        hero: HeroView,
        hud: Hud,
    },
    Transition {
        completed_level: usize,
        has_next: bool,
    },
    GameOver,
    Victory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_frame_counts_match_sprite_strips() {
        assert_eq!(HeroState::Idle.frame_count(), 4);
        assert_eq!(HeroState::Run.frame_count(), 6);
        assert_eq!(HeroState::Jump.frame_count(), 4);
    }

    #[test]
    fn enemy_kind_parameters() {
        assert_eq!(EnemyKind::Zombie.patrol_speed(), 1.0);
        assert_eq!(EnemyKind::Bat.patrol_speed(), 2.0);
        assert_eq!(EnemyKind::Ice.patrol_speed(), 1.5);
        assert!(EnemyKind::Bat.flies());
        assert!(!EnemyKind::Zombie.flies());
        assert!(!EnemyKind::Ice.flies());
    }
}
