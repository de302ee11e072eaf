use serde::{Deserialize, Serialize};

/// Input sampled by the frame driver for one tick.
///
/// `left`/`right` are level-triggered (held), the `*_pressed` fields are
/// edge-triggered and must be set for exactly one tick per key press. The
/// pointer position is in the same coordinate space as the playfield.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputFrame {
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
    pub restart_pressed: bool,
    pub menu_pressed: bool,
    pub back_pressed: bool,
    pub pointer: (f32, f32),
    pub click: Option<(f32, f32)>,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            left: false,
            right: false,
            jump_pressed: false,
            restart_pressed: false,
            menu_pressed: false,
            back_pressed: false,
            pointer: (0.0, 0.0),
            click: None,
        }
    }
}

impl InputFrame {
    /// Horizontal intent as a sign: -1 (left), 0, +1 (right).
    /// Simultaneous left+right resolves to left; the hero's movement
    /// handling relies on this precedence.
    pub fn move_dir(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}
