use tracing::info;

use flagstone_core::audio::{AudioSink, Music, Sound};
use flagstone_core::input::InputFrame;
use flagstone_core::view::{
    EnemyView, GoalView, HeroView, Hud, PlatformView, Scene,
};

use crate::config::GameConfig;
use crate::level::{LevelSpec, load_catalog};
use crate::menu::{LevelSelect, MainMenu, MenuAction};
use crate::world::World;

const MENU_MUSIC_VOLUME: f32 = 0.8;
const LEVEL_MUSIC_VOLUME: f32 = 0.5;
const MUSIC_FADE_SECS: f32 = 1.0;

/// Top-level game state. Exactly one is active at a time; every transition
/// happens inside [`Session::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Menu,
    LevelSelect,
    Playing,
    LevelTransition,
    GameOver,
    Victory,
}

/// Requests the session cannot satisfy itself and hands to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The player clicked Exit; shutting down is the host's call.
    ExitRequested,
}

/// Which levels the player has unlocked. Level 0 is always unlocked;
/// completing a level unlocks the next one exactly once.
#[derive(Debug, Clone)]
pub struct Progress {
    unlocked: Vec<usize>,
}

impl Progress {
    pub fn new() -> Self {
        Self { unlocked: vec![0] }
    }

    pub fn unlocked(&self) -> &[usize] {
        &self.unlocked
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        self.unlocked.contains(&index)
    }

    pub fn unlock(&mut self, index: usize) {
        if !self.unlocked.contains(&index) {
            self.unlocked.push(index);
        }
    }

    /// Record a completed level, unlocking its successor when one exists.
    pub fn complete(&mut self, index: usize, level_count: usize) {
        let next = index + 1;
        if next < level_count {
            self.unlock(next);
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// The whole game outside the per-tick simulation: state machine, level
/// catalog, progress, menus, and audio settings. The host drives it with
/// one `update` per tick and renders whatever `scene` returns.
pub struct Session {
    cfg: GameConfig,
    catalog: Vec<LevelSpec>,
    state: GameState,
    progress: Progress,
    main_menu: MainMenu,
    level_select: LevelSelect,
    music_enabled: bool,
    sounds_enabled: bool,
    current_level: usize,
    world: Option<World>,
    transition_ticks: u32,
}

impl Session {
    pub fn new(cfg: GameConfig, audio: &mut dyn AudioSink) -> Self {
        let catalog = load_catalog(&cfg);
        let main_menu = MainMenu::new(&cfg, true, true);
        let level_select = LevelSelect::new(&cfg, catalog.len());
        let mut session = Self {
            cfg,
            catalog,
            state: GameState::Menu,
            progress: Progress::new(),
            main_menu,
            level_select,
            music_enabled: true,
            sounds_enabled: true,
            current_level: 0,
            world: None,
            transition_ticks: 0,
        };
        session.play_music(audio, Music::MenuTheme, MENU_MUSIC_VOLUME);
        session
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn sounds_enabled(&self) -> bool {
        self.sounds_enabled
    }

    /// Advance the session one tick.
    pub fn update(
        &mut self,
        input: &InputFrame,
        audio: &mut dyn AudioSink,
    ) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        match self.state {
            GameState::Menu => self.update_menu(input, audio, &mut events),
            GameState::LevelSelect => self.update_level_select(input, audio),
            GameState::Playing => self.update_playing(input, audio),
            GameState::LevelTransition => self.update_transition(audio),
            GameState::GameOver => {
                if input.restart_pressed {
                    self.start_level(self.current_level, audio);
                } else if input.menu_pressed {
                    self.to_menu(audio);
                }
            },
            GameState::Victory => {
                if input.menu_pressed {
                    self.to_menu(audio);
                }
            },
        }
        events
    }

    fn update_menu(
        &mut self,
        input: &InputFrame,
        audio: &mut dyn AudioSink,
        events: &mut Vec<SessionEvent>,
    ) {
        self.main_menu.update_hover(input.pointer);
        let Some(click) = input.click else {
            return;
        };
        match self.main_menu.hit(click) {
            Some(MenuAction::StartGame) => {
                self.state = GameState::LevelSelect;
                if self.music_enabled {
                    audio.stop_music();
                }
            },
            Some(MenuAction::ToggleMusic) => {
                self.music_enabled = !self.music_enabled;
                if self.music_enabled {
                    audio.play_music(Music::MenuTheme, MENU_MUSIC_VOLUME);
                } else {
                    audio.stop_music();
                }
                self.rebuild_main_menu();
            },
            Some(MenuAction::ToggleSounds) => {
                self.sounds_enabled = !self.sounds_enabled;
                self.rebuild_main_menu();
            },
            Some(MenuAction::Exit) => events.push(SessionEvent::ExitRequested),
            Some(MenuAction::Level(_)) | None => {},
        }
    }

    fn update_level_select(&mut self, input: &InputFrame, audio: &mut dyn AudioSink) {
        if input.back_pressed {
            self.to_menu(audio);
            return;
        }
        self.level_select.update_hover(input.pointer);
        if let Some(click) = input.click
            && let Some(index) = self.level_select.hit(click, self.progress.unlocked())
        {
            if self.music_enabled {
                audio.stop_music();
            }
            self.start_level(index, audio);
        }
    }

    fn update_playing(&mut self, input: &InputFrame, audio: &mut dyn AudioSink) {
        let Some(world) = &mut self.world else {
            return;
        };
        let ticked = world.tick(input, &self.cfg);

        if ticked.jumped {
            self.play_sound(audio, Sound::Jump);
        }
        for _ in 0..ticked.enemies_defeated {
            self.play_sound(audio, Sound::EnemyDefeat);
        }
        if ticked.hero_hurt {
            self.play_sound(audio, Sound::Hurt);
        }

        if ticked.reached_goal {
            self.state = GameState::LevelTransition;
            self.transition_ticks = self.cfg.ticks(self.cfg.transition_secs);
            if self.music_enabled {
                audio.fade_out_music(MUSIC_FADE_SECS);
            }
            self.play_sound(audio, Sound::LevelComplete);
            info!(level = self.current_level, "level complete");
        }

        // Death takes precedence over reaching the goal in the same tick.
        if ticked.hero_died {
            self.state = GameState::GameOver;
            if self.music_enabled {
                audio.fade_out_music(MUSIC_FADE_SECS);
            }
            self.play_sound(audio, Sound::GameOver);
            info!(level = self.current_level, "hero died");
        }
    }

    fn update_transition(&mut self, audio: &mut dyn AudioSink) {
        self.transition_ticks = self.transition_ticks.saturating_sub(1);
        if self.transition_ticks == 0 {
            self.progress.complete(self.current_level, self.catalog.len());
            self.start_level(self.current_level + 1, audio);
        }
    }

    /// Enter a level: fresh world, level music, `Playing`. An index past
    /// the catalog end means the player has finished everything.
    pub fn start_level(&mut self, index: usize, audio: &mut dyn AudioSink) {
        if index >= self.catalog.len() {
            self.state = GameState::Victory;
            if self.music_enabled {
                audio.stop_music();
            }
            self.play_sound(audio, Sound::Victory);
            info!("all levels complete");
            return;
        }
        self.current_level = index;
        self.world = Some(World::from_level(&self.catalog[index], &self.cfg));
        self.state = GameState::Playing;
        self.play_music(audio, Music::Level, LEVEL_MUSIC_VOLUME);
        info!(level = index, "level started");
    }

    fn to_menu(&mut self, audio: &mut dyn AudioSink) {
        self.state = GameState::Menu;
        self.transition_ticks = 0;
        self.rebuild_main_menu();
        self.play_music(audio, Music::MenuTheme, MENU_MUSIC_VOLUME);
    }

    // Toggle labels live in the button text, so the menu is rebuilt when a
    // setting flips or when re-entering it.
    fn rebuild_main_menu(&mut self) {
        self.main_menu = MainMenu::new(&self.cfg, self.music_enabled, self.sounds_enabled);
    }

    fn play_sound(&self, audio: &mut dyn AudioSink, sound: Sound) {
        if self.sounds_enabled {
            audio.play_sound(sound);
        }
    }

    fn play_music(&self, audio: &mut dyn AudioSink, music: Music, volume: f32) {
        if self.music_enabled {
            audio.play_music(music, volume);
        }
    }

    /// Snapshot of everything the driver needs to draw this tick.
    pub fn scene(&self) -> Scene {
        match self.state {
            GameState::Menu => Scene::Menu {
                buttons: self
                    .main_menu
                    .buttons
                    .iter()
                    .map(|b| b.view(true))
                    .collect(),
            },
            GameState::LevelSelect => Scene::LevelSelect {
                buttons: self
                    .level_select
                    .buttons
                    .iter()
                    .enumerate()
                    .map(|(i, b)| b.view(self.progress.is_unlocked(i)))
                    .collect(),
                unlocked: self.progress.unlocked().to_vec(),
            },
            GameState::Playing => self.playing_scene(),
            GameState::LevelTransition => Scene::Transition {
                completed_level: self.current_level,
                has_next: self.current_level + 1 < self.catalog.len(),
            },
            GameState::GameOver => Scene::GameOver,
            GameState::Victory => Scene::Victory,
        }
    }

    fn playing_scene(&self) -> Scene {
        let Some(world) = &self.world else {
            // Playing without a world cannot happen through the public API.
            return Scene::GameOver;
        };
        Scene::Playing {
            background: world.background.clone(),
            platforms: world
                .platforms
                .iter()
                .map(|p| PlatformView {
                    rect: p.rect,
                    texture: p.texture.clone(),
                    moving: p.is_moving(),
                })
                .collect(),
            enemies: world
                .enemies
                .iter()
                .filter(|e| e.alive)
                .map(|e| EnemyView {
                    rect: e.rect,
                    kind: e.kind,
                    frame: e.frame,
                })
                .collect(),
            goal: GoalView {
                rect: world.goal.rect,
                frame: world.goal.frame,
                active: world.goal.active,
            },
            hero: HeroView {
                rect: world.hero.rect,
                facing: world.hero.facing,
                state: world.hero.state,
                frame: world.hero.frame,
                frame_count: world.hero.state.frame_count(),
                blink: world.hero.blink(&self.cfg),
            },
            hud: Hud {
                health: world.hero.health,
                level_index: self.current_level,
                unlocked: self.progress.unlocked().to_vec(),
            },
        }
    }
}
