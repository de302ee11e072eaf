use flagstone_core::geometry::Rect;
use flagstone_core::view::ButtonView;

use crate::config::GameConfig;

const MAIN_BUTTON_W: f32 = 280.0;
const MAIN_BUTTON_H: f32 = 50.0;
const MAIN_BUTTON_GAP: f32 = 70.0;
const LEVEL_BUTTON_W: f32 = 200.0;
const LEVEL_BUTTON_H: f32 = 50.0;
const LEVEL_BUTTON_GAP: f32 = 80.0;
const LEVEL_LIST_TOP: f32 = 200.0;

/// What clicking a button asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    ToggleMusic,
    ToggleSounds,
    Exit,
    /// Start the level at this catalog index.
    Level(usize),
}

/// A clickable rectangle with a label and a bound action.
#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub action: MenuAction,
    pub hovered: bool,
}

impl Button {
    fn new(label: impl Into<String>, rect: Rect, action: MenuAction) -> Self {
        Self {
            rect,
            label: label.into(),
            action,
            hovered: false,
        }
    }

    pub fn view(&self, enabled: bool) -> ButtonView {
        ButtonView {
            rect: self.rect,
            label: self.label.clone(),
            hovered: self.hovered,
            enabled,
        }
    }
}

/// The main menu: start, two audio toggles, exit. Toggle labels track the
/// current setting, so the menu is rebuilt whenever a toggle flips.
#[derive(Debug, Clone)]
pub struct MainMenu {
    pub buttons: Vec<Button>,
}

impl MainMenu {
    pub fn new(cfg: &GameConfig, music_enabled: bool, sounds_enabled: bool) -> Self {
        let x = cfg.playfield_width / 2.0 - MAIN_BUTTON_W / 2.0;
        let top = cfg.playfield_height / 2.0 - 100.0;
        let slot = |i: usize| {
            Rect::new(
                x,
                top + i as f32 * MAIN_BUTTON_GAP,
                MAIN_BUTTON_W,
                MAIN_BUTTON_H,
            )
        };
        let music = if music_enabled { "Music: On" } else { "Music: Off" };
        let sounds = if sounds_enabled {
            "Sounds: On"
        } else {
            "Sounds: Off"
        };
        Self {
            buttons: vec![
                Button::new("Start Game", slot(0), MenuAction::StartGame),
                Button::new(music, slot(1), MenuAction::ToggleMusic),
                Button::new(sounds, slot(2), MenuAction::ToggleSounds),
                Button::new("Exit", slot(3), MenuAction::Exit),
            ],
        }
    }

    pub fn update_hover(&mut self, pointer: (f32, f32)) {
        for button in &mut self.buttons {
            button.hovered = button.rect.contains(pointer.0, pointer.1);
        }
    }

    /// Resolve a click to an action, if it lands on a button.
    pub fn hit(&self, click: (f32, f32)) -> Option<MenuAction> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(click.0, click.1))
            .map(|b| b.action)
    }
}

/// The level picker: one button per catalog level, in a vertical column.
/// Locked levels still render but never resolve a click.
#[derive(Debug, Clone)]
pub struct LevelSelect {
    pub buttons: Vec<Button>,
}

impl LevelSelect {
    pub fn new(cfg: &GameConfig, level_count: usize) -> Self {
        let x = cfg.playfield_width / 2.0 - LEVEL_BUTTON_W / 2.0;
        let buttons = (0..level_count)
            .map(|i| {
                Button::new(
                    format!("Level {}", i + 1),
                    Rect::new(
                        x,
                        LEVEL_LIST_TOP + i as f32 * LEVEL_BUTTON_GAP,
                        LEVEL_BUTTON_W,
                        LEVEL_BUTTON_H,
                    ),
                    MenuAction::Level(i),
                )
            })
            .collect();
        Self { buttons }
    }

    pub fn update_hover(&mut self, pointer: (f32, f32)) {
        for button in &mut self.buttons {
            button.hovered = button.rect.contains(pointer.0, pointer.1);
        }
    }

    /// Resolve a click against the unlocked set only.
    pub fn hit(&self, click: (f32, f32), unlocked: &[usize]) -> Option<usize> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(click.0, click.1))
            .and_then(|b| match b.action {
                MenuAction::Level(i) if unlocked.contains(&i) => Some(i),
                _ => None,
            })
    }
}
