use crate::animations::Confetti;
use crate::theme::{Theme, ThemeName};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossword_core::{InputEvent, InputResult, Nav, Puzzle, Session, Verifier};
use std::sync::Arc;
use std::time::Duration;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Filling in the grid
    Playing,
    /// Submission accepted by the verifier
    Unlocked,
}

/// The main application state
pub struct App {
    /// Current puzzle session
    pub session: Session,
    /// Independently built checker for submitted grids
    verifier: Verifier,
    /// Color theme
    pub theme: Theme,
    pub theme_name: ThemeName,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Reason the last submission was rejected
    pub verify_error: Option<String>,
    /// Number of submissions sent
    pub submissions: usize,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Unlock celebration
    pub confetti: Confetti,
}

impl App {
    pub fn new(puzzle: Arc<Puzzle>, verifier: Verifier, theme_name: ThemeName) -> Self {
        Self {
            session: Session::new(puzzle),
            verifier,
            theme: theme_name.theme(),
            theme_name,
            message: None,
            message_timer: 0,
            verify_error: None,
            submissions: 0,
            screen_state: ScreenState::Playing,
            confetti: Confetti::new(),
        }
    }

    /// Get the tick rate based on current screen
    pub fn get_tick_rate(&self) -> Duration {
        match self.screen_state {
            ScreenState::Unlocked => Duration::from_millis(33),
            ScreenState::Playing => Duration::from_millis(100),
        }
    }

    /// Update animations and timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.screen_state == ScreenState::Unlocked {
            self.confetti.update();
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Unlocked => self.handle_unlocked_key(key),
            ScreenState::Playing => self.handle_game_key(key),
        }
    }

    fn handle_unlocked_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Enter => return AppAction::Quit,
            KeyCode::Esc => {
                // Back to the (finished) grid
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let event = match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('s') if ctrl => {
                self.submit();
                return AppAction::Continue;
            }
            KeyCode::Char('t') if ctrl => {
                self.cycle_theme();
                return AppAction::Continue;
            }
            KeyCode::Char(c) if !ctrl && c.is_ascii_alphabetic() => InputEvent::Text(c.to_string()),
            KeyCode::Backspace | KeyCode::Delete => InputEvent::Backspace,
            KeyCode::Up => InputEvent::Nav(Nav::Up),
            KeyCode::Down => InputEvent::Nav(Nav::Down),
            KeyCode::Left => InputEvent::Nav(Nav::Left),
            KeyCode::Right => InputEvent::Nav(Nav::Right),
            KeyCode::Enter => InputEvent::Nav(Nav::Enter),
            _ => return AppAction::Continue,
        };

        if self.session.apply(event) == InputResult::Solved {
            self.show_message("All letters in place, verifying...");
            self.submit();
        }
        AppAction::Continue
    }

    /// Send the current grid to the verifier
    pub fn submit(&mut self) {
        self.submissions += 1;
        let body = self.session.request_json();
        let response = self.verifier.handle_request(&body);

        if response.ok {
            self.verify_error = None;
            self.screen_state = ScreenState::Unlocked;
            self.confetti.reset();
        } else {
            let reason = response
                .error
                .unwrap_or_else(|| "Verification failed".to_string());
            self.show_message(&reason);
            self.verify_error = Some(reason);
        }
    }

    fn cycle_theme(&mut self) {
        self.theme_name = self.theme_name.next();
        self.theme = self.theme_name.theme();
        self.show_message(&format!("Theme: {}", self.theme_name.label()));
    }

    /// Highlighted letters in the order the puzzle lists them
    pub fn highlighted_letters(&self) -> Vec<char> {
        let highlights = self.session.highlights();
        self.session
            .puzzle()
            .config()
            .highlight
            .iter()
            .filter(|pos| highlights.contains(pos))
            .filter_map(|pos| self.session.puzzle().index().solution_at(*pos))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossword_core::{Entry, Position, PuzzleConfig};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_for(config: PuzzleConfig) -> App {
        let verifier = Verifier::new(&config);
        let puzzle = Arc::new(Puzzle::new(config).unwrap());
        App::new(puzzle, verifier, ThemeName::Dark)
    }

    fn cat_config() -> PuzzleConfig {
        PuzzleConfig {
            title: "cat".to_string(),
            rows: 3,
            cols: 3,
            entries: vec![Entry::new(1, "CAT", [0, 0], [0, 2])],
            clues: Default::default(),
            highlight: vec![Position::new(0, 1)],
        }
    }

    #[test]
    fn test_typing_solves_and_unlocks() {
        let mut app = app_for(cat_config());
        for c in ['c', 'a', 't'] {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert!(app.session.is_solved());
        assert_eq!(app.screen_state, ScreenState::Unlocked);
        assert_eq!(app.submissions, 1);
        assert_eq!(app.highlighted_letters(), vec!['A']);
    }

    #[test]
    fn test_rejected_submission_reports_reason() {
        let mut app = app_for(cat_config());
        app.handle_key(key(KeyCode::Char('c')));
        app.handle_key(ctrl('s'));
        assert_eq!(app.screen_state, ScreenState::Playing);
        assert_eq!(app.verify_error.as_deref(), Some("Puzzle not fully filled"));

        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(ctrl('s'));
        assert_eq!(app.verify_error.as_deref(), Some("Incorrect solution"));
    }

    #[test]
    fn test_resubmit_after_latch() {
        let mut app = app_for(cat_config());
        for c in ['c', 'a', 't'] {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen_state, ScreenState::Playing);

        // Break the grid; the latch holds but the verifier refuses
        app.handle_key(key(KeyCode::Backspace));
        assert!(app.session.is_solved());
        app.handle_key(ctrl('s'));
        assert_eq!(app.screen_state, ScreenState::Playing);
        assert!(app.verify_error.is_some());
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app_for(PuzzleConfig::default());
        assert_eq!(app.session.focus(), Position::new(0, 3));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.session.focus(), Position::new(1, 3));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session.focus(), Position::new(1, 7));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.session.focus(), Position::new(1, 3));
    }

    #[test]
    fn test_non_letters_ignored() {
        let mut app = app_for(PuzzleConfig::default());
        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.session.fill().is_empty());
    }

    #[test]
    fn test_theme_cycle_and_quit() {
        let mut app = app_for(PuzzleConfig::default());
        app.handle_key(ctrl('t'));
        assert_eq!(app.theme_name, ThemeName::Light);
        assert!(app.message.is_some());
        // Ctrl+T must not type a letter
        assert!(app.session.fill().is_empty());
        assert!(matches!(app.handle_key(key(KeyCode::Esc)), AppAction::Quit));
    }

    #[test]
    fn test_message_expires() {
        let mut app = app_for(PuzzleConfig::default());
        app.show_message("hello");
        for _ in 0..30 {
            app.tick();
        }
        assert!(app.message.is_none());
    }
}
