use std::time::Instant;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyphfall_config::Config;
use glyphfall_core::{Key, RainSettings};
use glyphfall_rain::{RainRenderer, RainRng};
use ratatui::{
    DefaultTerminal, Frame,
    style::{Color, Style},
    widgets::Paragraph,
};

mod cli;
mod logging;
mod surface;
mod timer;

use cli::Cli;
use surface::TerminalSurface;
use timer::FrameTimer;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Err(err) = logging::init() {
        eprintln!("logging disabled: {err:#}");
    }

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    let settings = config.settings()?;
    let rng = RainRng::from_optional_seed(config.seed);
    log::info!("starting with preset {}", config.preset());

    let terminal = ratatui::init();
    let result = App::new(settings, rng).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    rain: RainRenderer,
    surface: TerminalSurface,
    timer: FrameTimer,
    /// Terminal size the rain was last laid out for.
    last_size: Option<(u16, u16)>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: RainSettings, rng: RainRng) -> Self {
        let surface = TerminalSurface::new(settings.cell_size);
        Self {
            running: false,
            rain: RainRenderer::new(settings, rng),
            surface,
            timer: FrameTimer::new(),
            last_size: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.rain.start(&mut self.timer);
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Lay the rain out again when the terminal size changes.
    fn sync_size(&mut self, width: u16, height: u16) {
        if self.last_size == Some((width, height)) {
            return;
        }
        self.surface.resize(width, height);
        let (px_width, px_height) = self.surface.pixel_size();
        self.rain.resize(px_width, px_height);
        self.last_size = Some((width, height));
    }

    /// Renders the user interface, advancing the rain when a tick is due.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        // A resize always lands before the tick that follows it
        self.sync_size(area.width, area.height);

        if self.timer.fire(Instant::now()) {
            self.rain.tick(&mut self.surface);
        }

        let rain = Paragraph::new(self.surface.lines()).style(Style::new().bg(Color::Black));
        frame.render_widget(rain, area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Blocks at most until the next tick is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.timer.timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                // Picked up by the size check on the next render
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let key = match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => {
                self.quit();
                return;
            }
            (KeyModifiers::NONE, KeyCode::Esc) => Key::Escape,
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => Key::Char(c),
            _ => return,
        };
        self.rain.handle_key(key, &mut self.surface, &mut self.timer);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        log::info!("quitting");
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use glyphfall_core::{FontWeight, Preset, TickSpeed};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn app(preset: Preset) -> App {
        App::new(preset.settings(), RainRng::from_seed_u64(1))
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.on_key_event(KeyEvent::new(code, modifiers));
    }

    #[test]
    fn test_render_lays_out_rain() {
        let mut app = app(Preset::Flash);
        app.rain.start(&mut app.timer);
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        assert_eq!(app.last_size, Some((40, 12)));
        assert_eq!(app.rain.column_count(), 20);
        assert_eq!(app.rain.max_rows(), 12);
    }

    #[test]
    fn test_resize_relays_out() {
        let mut app = app(Preset::Flash);
        app.sync_size(40, 12);
        app.sync_size(20, 6);
        assert_eq!(app.rain.column_count(), 10);
        assert_eq!(app.rain.max_rows(), 6);
    }

    #[test]
    fn test_keys_reach_rain() {
        let mut app = app(Preset::Classic);
        app.running = true;
        app.rain.start(&mut app.timer);

        press(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        assert!(app.rain.is_paused());

        press(&mut app, KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(app.rain.speed(), TickSpeed::Fast);
        assert_eq!(app.timer.interval(), Some(app.rain.interval()));

        // q restarts the rain, it does not quit
        press(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.running);

        press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!app.running);
    }

    #[test]
    fn test_modified_keys_ignored() {
        let mut app = app(Preset::Classic);
        app.rain.start(&mut app.timer);

        press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('f'), KeyModifiers::ALT);
        press(&mut app, KeyCode::Esc, KeyModifiers::SHIFT);
        assert_eq!(app.rain.speed(), TickSpeed::Base);
        assert_eq!(app.rain.weight(), FontWeight::Normal);

        press(&mut app, KeyCode::Char('F'), KeyModifiers::SHIFT);
        assert_eq!(app.rain.weight(), FontWeight::Bold);
    }
}
