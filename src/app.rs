use color_eyre::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::audio::AudioManager;
use crate::config::Settings;
use crate::constants::MAX_FRAME_MS;
use crate::entities::GameState;
use crate::input::{InputAction, InputManager, intent_from};
use crate::renderer::{GameRenderer, RenderView};
use crate::world::{World, WorldEvent};

/// Target time per frame (~60 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    game_state: GameState,
    world: World,
    /// Frames info
    last_update: Option<Instant>,
    last_frame_time: Instant,
    fps: u32,
    /// Game timers
    game_start_time: Instant,
    final_time_secs: Option<u64>,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: Option<AudioManager>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: &Settings, reports_release: bool) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let audio_manager = if settings.sound {
            AudioManager::try_open()
        } else {
            None
        };
        info!(seed = ?settings.seed, lives = settings.lives, sound = audio_manager.is_some(), "new game");

        let now = Instant::now();
        Self {
            running: true,
            game_state: GameState::Playing,
            world: World::new(rng, settings.lives),
            last_update: None,
            last_frame_time: now,
            fps: 0,
            game_start_time: now,
            final_time_secs: None,
            input_manager: InputManager::new(reports_release),
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            self.input_manager.poll_events(self.game_state)?;
            let actions = self.input_manager.get_actions(self.game_state, frame_start);
            self.tick(&actions, frame_start);

            terminal.draw(|frame| {
                let elapsed_time_secs = self
                    .final_time_secs
                    .unwrap_or_else(|| self.game_start_time.elapsed().as_secs());
                let view = RenderView {
                    game_state: self.game_state,
                    world: &self.world,
                    area: frame.area(),
                    fps: self.fps,
                    elapsed_time_secs,
                };
                self.renderer.render(frame, &view);
            })?;

            if let Some(rest) = FRAME_DURATION.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
        Ok(())
    }

    /// Milliseconds to simulate this frame. The first frame after a start or
    /// resume simulates nothing, and stalls are capped.
    fn step_elapsed_ms(&mut self, now: Instant) -> f32 {
        let elapsed = self
            .last_update
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32() * 1000.0);
        self.last_update = Some(now);
        elapsed.min(MAX_FRAME_MS)
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    info!(score = self.world.score, "quit");
                    self.running = false;
                }
                InputAction::Pause => {
                    debug!("paused");
                    self.game_state = GameState::Paused;
                    self.last_update = None;
                    self.input_manager.reset();
                }
                InputAction::Resume => {
                    debug!("resumed");
                    self.game_state = GameState::Playing;
                }
                InputAction::Restart => self.restart(),
                // Movement and fire reach the world as an intent
                InputAction::MoveLeft | InputAction::MoveRight | InputAction::Fire => {}
            }
        }
    }

    fn restart(&mut self) {
        self.world.restart();
        self.game_state = GameState::Playing;
        self.game_start_time = Instant::now();
        self.final_time_secs = None;
        self.last_update = None;
        self.input_manager.reset();
    }

    fn handle_events(&mut self, events: &[WorldEvent]) {
        if let Some(audio) = &self.audio_manager {
            audio.play_events(events);
        }

        if events.iter().any(|e| matches!(e, WorldEvent::GameOver(_))) {
            self.final_time_secs = Some(self.game_start_time.elapsed().as_secs());
            self.game_state = GameState::GameOver;
        }
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Applies a frame's actions, then advances the world by the time since
    /// the previous simulated frame
    pub fn tick(&mut self, actions: &[InputAction], now: Instant) -> Vec<WorldEvent> {
        self.process_actions(actions);
        if self.game_state != GameState::Playing {
            return Vec::new();
        }
        let elapsed_ms = self.step_elapsed_ms(now);
        let events = self.world.update(elapsed_ms, intent_from(actions));
        self.handle_events(&events);
        events
    }
}
