use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::trace;

use crate::entities::GameState;
use crate::world::Intent;

/// How long a movement key counts as held after a press, when the terminal
/// cannot report releases. Long enough to bridge the auto-repeat delay.
const HOLD_WINDOW: Duration = Duration::from_millis(300);

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    Pause,
    Resume,
    Restart,
    Quit,
}

/// A key that can be held down for continuous input
#[derive(Debug, Default, Clone, Copy)]
struct HeldKey {
    down: bool,
    last_press: Option<Instant>,
}

impl HeldKey {
    fn press(&mut self, now: Instant) {
        self.down = true;
        self.last_press = Some(now);
    }

    fn release(&mut self) {
        self.down = false;
        self.last_press = None;
    }

    fn is_held(&self, now: Instant, reports_release: bool) -> bool {
        if reports_release {
            self.down
        } else {
            self.last_press
                .is_some_and(|pressed| now.duration_since(pressed) < HOLD_WINDOW)
        }
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: HeldKey,
    right: HeldKey,
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Whether the terminal sends key release events (keyboard enhancement)
    reports_release: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            reports_release,
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state, Instant::now());
            }
        }

        Ok(())
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState, now: Instant) {
        trace!(code = ?key_event.code, kind = ?key_event.kind, "key event");
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state, now, true),
            // Auto-repeat keeps a key held but never re-fires
            KeyEventKind::Repeat => self.handle_key_press(key_event, game_state, now, false),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(
        &mut self,
        key_event: KeyEvent,
        game_state: GameState,
        now: Instant,
        fresh: bool,
    ) {
        // Check for quit keys first (works in any state)
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        // State-specific one-shot actions
        match game_state {
            GameState::Playing => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.oneshot_actions.push(InputAction::Pause);
                    return;
                }
            }
            GameState::Paused => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.oneshot_actions.push(InputAction::Resume);
                }
                return;
            }
            GameState::GameOver => {
                if matches!(
                    key_event.code,
                    KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('r') | KeyCode::Char('R')
                ) {
                    self.oneshot_actions.push(InputAction::Restart);
                }
                return;
            }
        }

        match key_event.code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left.press(now);
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right.press(now);
            }
            KeyCode::Char(' ') if fresh => {
                self.oneshot_actions.push(InputAction::Fire);
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left.release();
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right.release();
            }
            _ => {}
        }
    }

    /// Returns all actions for this frame (both continuous and one-shot)
    /// Must be called after poll_events()
    pub fn get_actions(&self, game_state: GameState, now: Instant) -> Vec<InputAction> {
        let mut actions = Vec::new();

        actions.extend_from_slice(&self.oneshot_actions);

        if game_state == GameState::Playing {
            if self.key_state.left.is_held(now, self.reports_release) {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right.is_held(now, self.reports_release) {
                actions.push(InputAction::MoveRight);
            }
        }

        actions
    }

    /// Drops one-shot actions and held keys, e.g. after a pause
    pub fn reset(&mut self) {
        self.oneshot_actions.clear();
        self.key_state = KeyState::default();
    }
}

/// Folds a frame's actions into the world's movement/fire intent
pub fn intent_from(actions: &[InputAction]) -> Intent {
    let mut intent = Intent::default();
    for action in actions {
        match action {
            InputAction::MoveLeft => intent.left = true,
            InputAction::MoveRight => intent.right = true,
            InputAction::Fire => intent.fire = true,
            _ => {}
        }
    }
    intent
}
