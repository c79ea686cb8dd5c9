pub mod form;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;
use tracing::info;

use iiccrc::batch::BatchOptions;
use iiccrc::config::AppConfig;
use iiccrc::panel::Panel;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Calculate,
    Clear,
    Quit,
}

pub struct TuiApp {
    panel: Panel,
    options: BatchOptions,
    focused: usize,
    calculations: usize,
}

impl TuiApp {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            panel: Panel::new(config.slot_count, config.default_text.clone()),
            options: config.batch_options(),
            focused: 0,
            calculations: 0,
        }
    }

    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.panel.len();
    }

    fn focus_prev(&mut self) {
        self.focused = if self.focused == 0 {
            self.panel.len() - 1
        } else {
            self.focused - 1
        };
    }

    /// Map a key press to an action, applying text edits and focus moves directly.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Action {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if ctrl => Action::Quit,
            KeyCode::Char('r') if ctrl => Action::Clear,
            KeyCode::F(5) => Action::Clear,
            KeyCode::Enter => Action::Calculate,

            KeyCode::Up => {
                self.focus_prev();
                Action::None
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.focus_prev();
                Action::None
            }

            KeyCode::Backspace => {
                self.panel.pop_char(self.focused);
                Action::None
            }
            KeyCode::Char(ch) if !ctrl => {
                self.panel.push_char(self.focused, ch);
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Apply an action; returns true if the app should quit.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::None => {}
            Action::Calculate => {
                self.panel.calculate(&self.options);
                self.calculations += 1;
            }
            Action::Clear => {
                self.panel.reset();
                self.focused = 0;
            }
            Action::Quit => return true,
        }
        false
    }

    fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // slot rows
                Constraint::Length(1), // status bar
            ])
            .split(frame.area());

        form::render(frame, chunks[0], &self.panel, self.focused);

        let status = format!(
            " Calculations: {} | Enter:calculate F5/^R:clear Up/Down:focus Esc:quit",
            self.calculations
        );
        let status_bar =
            Line::from(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));
        frame.render_widget(status_bar, chunks[1]);
    }
}

pub fn run(config: &AppConfig) -> Result<()> {
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TuiApp::new(config);
    info!("TUI started with {} slots", app.panel.len());

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal, even if the loop failed
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut TuiApp) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press {
                    let action = app.handle_key(key.code, key.modifiers);
                    if app.apply(action) {
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut TuiApp, code: KeyCode) -> bool {
        let action = app.handle_key(code, KeyModifiers::NONE);
        app.apply(action)
    }

    fn type_text(app: &mut TuiApp, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_enter_calculates_all_slots() {
        let mut app = TuiApp::new(&AppConfig::default());
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "00");
        press(&mut app, KeyCode::Enter);

        let labels = app.panel.labels();
        assert_eq!(labels[0], "CRC16: BFD2");
        assert_eq!(labels[1], "CRC16: 0F87");
        assert_eq!(labels[2], "NULL");
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = TuiApp::new(&AppConfig::default());
        press(&mut app, KeyCode::Up);
        assert_eq!(app.focused, 9);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused, 0);
    }

    #[test]
    fn test_backspace_edits_focused_slot() {
        let mut app = TuiApp::new(&AppConfig::default());
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.panel.slots()[0].text, "34 1E 08 AC 0");
    }

    #[test]
    fn test_clear_resets_form() {
        let mut app = TuiApp::new(&AppConfig::default());
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "zz");
        press(&mut app, KeyCode::Enter);
        assert!(app.panel.labels()[1].starts_with("Error: "));

        press(&mut app, KeyCode::F(5));

        assert_eq!(app.focused, 0);
        assert_eq!(app.panel.slots()[0].text, "34 1E 08 AC 0D");
        assert!(app.panel.slots()[1..].iter().all(|s| s.text.is_empty()));
        assert!(app.panel.labels().iter().all(|l| *l == "CRC16: "));
    }

    #[test]
    fn test_ctrl_keys() {
        let mut app = TuiApp::new(&AppConfig::default());
        assert_eq!(
            app.handle_key(KeyCode::Char('r'), KeyModifiers::CONTROL),
            Action::Clear
        );
        assert_eq!(
            app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::Quit
        );
        // Control chords never reach the text
        assert_eq!(app.panel.slots()[0].text, "34 1E 08 AC 0D");
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_draw_renders_rows_and_labels() {
        let mut app = TuiApp::new(&AppConfig::default());
        press(&mut app, KeyCode::Enter);

        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(110, 14)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("IIC command #0 0x:"));
        assert!(screen.contains("34 1E 08 AC 0D"));
        assert!(screen.contains("CRC16: BFD2"));
        assert!(screen.contains("Calculations: 1"));
    }
}
