use crate::error::MoveError;
use crate::game::{Board, GameSettings, Player};
use crate::session::{GameSession, Notification};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// Deepest level offered through the `+` key.
const MAX_LEVEL: usize = 8;
/// Pit counts offered for the next game.
const MAX_PITS: usize = 12;
/// Seed counts offered for the next game.
const MAX_SEEDS: u32 = 20;

pub struct App {
    session: GameSession,
    selected_pit: usize,
    /// Geometry used by the next `n`; the level always comes from the board.
    next_game: GameSettings,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(session: GameSession) -> Self {
        let next_game = session.board().settings();
        App {
            session,
            selected_pit: 1,
            next_game,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            self.apply_machine_updates();
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Pick up boards and notifications from the machine worker
    fn apply_machine_updates(&mut self) {
        for notification in self.session.poll() {
            self.notify(notification);
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        let pits = self.session.board().pits_per_player();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_pit > 1 {
                    self.selected_pit -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_pit < pits {
                    self.selected_pit += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.message = None;
                self.sow();
            }
            KeyCode::Char('u') => {
                self.message = Some(if self.session.undo() {
                    "Move undone.".to_string()
                } else {
                    "Nothing to undo.".to_string()
                });
            }
            KeyCode::Char('n') => {
                let settings = GameSettings {
                    level: self.session.board().level(),
                    ..self.next_game
                };
                self.restart(|session| session.restart(settings));
            }
            KeyCode::Char('p') => {
                self.next_game.pits_per_player = self.next_game.pits_per_player % MAX_PITS + 1;
                self.message = Some(self.next_game_message());
            }
            KeyCode::Char('e') => {
                self.next_game.seeds_per_pit = self.next_game.seeds_per_pit % MAX_SEEDS + 1;
                self.message = Some(self.next_game_message());
            }
            KeyCode::Char('s') => {
                let level = self.session.board().level();
                self.restart(|session| session.switch_sides(level));
            }
            KeyCode::Char('+') => {
                let level = (self.session.board().level() + 1).min(MAX_LEVEL);
                self.session.set_level(level);
                self.message = Some(format!("Level set to {level}."));
            }
            KeyCode::Char('-') => {
                let level = self.session.board().level().saturating_sub(1).max(1);
                self.session.set_level(level);
                self.message = Some(format!("Level set to {level}."));
            }
            _ => {}
        }
    }

    /// Sow the selected pit
    fn sow(&mut self) {
        match self.session.human_move(self.selected_pit) {
            Ok(()) => {}
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'n' to start a new game.".to_string());
            }
            Err(MoveError::NotYourTurn { .. }) if self.session.is_thinking() => {
                self.message = Some("The computer is still thinking.".to_string());
            }
            Err(_) => self.notify(Notification::IllegalMove),
        }
    }

    fn restart<F>(&mut self, start: F)
    where
        F: FnOnce(&mut GameSession) -> Result<(), crate::error::ConfigError>,
    {
        match start(&mut self.session) {
            Ok(()) => {
                self.selected_pit = 1;
                let opener = match self.session.board().opening_player() {
                    Player::Computer => "Computer opens.",
                    _ => "You open.",
                };
                self.message = Some(format!("New game started! {opener}"));
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn next_game_message(&self) -> String {
        format!(
            "Next game: {} pits with {} seeds each. Press 'n' to start it.",
            self.next_game.pits_per_player, self.next_game.seeds_per_pit
        )
    }

    fn notify(&mut self, notification: Notification) {
        self.message = Some(notification.message(self.session.board()));
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            self.session.board(),
            self.selected_pit,
            &self.next_game,
            &self.message,
            self.session.is_thinking(),
        );
    }
}
