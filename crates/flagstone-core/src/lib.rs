pub mod audio;
pub mod geometry;
pub mod input;
pub mod view;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::audio::{AudioSink, Music, Sound};
    use crate::input::InputFrame;

    /// An input frame holding a horizontal direction: -1, 0, or +1.
    pub fn hold_dir(dir: f32) -> InputFrame {
        InputFrame {
            left: dir < 0.0,
            right: dir > 0.0,
            ..Default::default()
        }
    }

    /// An input frame with the jump key freshly pressed.
    pub fn press_jump() -> InputFrame {
        InputFrame {
            jump_pressed: true,
            ..Default::default()
        }
    }

    /// An input frame carrying a pointer click at the given position.
    pub fn click_at(x: f32, y: f32) -> InputFrame {
        InputFrame {
            pointer: (x, y),
            click: Some((x, y)),
            ..Default::default()
        }
    }

    /// One recorded call on a [`RecordingAudio`] sink.
    #[derive(Debug, Clone, PartialEq)]
    pub enum AudioCall {
        Sound(Sound),
        Music(Music),
        Stop,
        FadeOut,
    }

    /// Audio sink that records every request, for asserting on cue order.
    #[derive(Debug, Default)]
    pub struct RecordingAudio {
        pub calls: Vec<AudioCall>,
    }

    impl RecordingAudio {
        pub fn sounds(&self) -> Vec<Sound> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    AudioCall::Sound(s) => Some(*s),
                    _ => None,
                })
                .collect()
        }
    }

    impl AudioSink for RecordingAudio {
        fn play_sound(&mut self, sound: Sound) {
            self.calls.push(AudioCall::Sound(sound));
        }

        fn play_music(&mut self, music: Music, _volume: f32) {
            self.calls.push(AudioCall::Music(music));
        }

        fn stop_music(&mut self) {
            self.calls.push(AudioCall::Stop);
        }

        fn fade_out_music(&mut self, _secs: f32) {
            self.calls.push(AudioCall::FadeOut);
        }
    }
}
