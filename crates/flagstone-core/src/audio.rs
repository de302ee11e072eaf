use serde::{Deserialize, Serialize};

/// One-shot sound effects the simulation can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    Jump,
    Hurt,
    GameOver,
    EnemyDefeat,
    LevelComplete,
    Victory,
}

/// Music tracks. The driver maps these to whatever assets it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Music {
    MenuTheme,
    Level,
}

/// Fire-and-forget audio output provided by the host driver.
///
/// Implementations must swallow missing-asset failures; a broken sound
/// never propagates back into the simulation.
pub trait AudioSink {
    fn play_sound(&mut self, sound: Sound);
    fn play_music(&mut self, music: Music, volume: f32);
    fn stop_music(&mut self);
    fn fade_out_music(&mut self, secs: f32);
}

/// No-op sink for tests and headless runs.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound(&mut self, _sound: Sound) {}
    fn play_music(&mut self, _music: Music, _volume: f32) {}
    fn stop_music(&mut self) {}
    fn fade_out_music(&mut self, _secs: f32) {}
}
