use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fall_leaves_config::Config;
use fall_leaves_core::Size;
use fall_leaves_render::Rgba;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};

mod logging;
mod saver;

use saver::{FallLeaves, MODULE_INFO, MODULE_NAME, ScreenSaver};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    logging::init(&config.log)?;

    let terminal = ratatui::init();
    let result = App::new(&config).run(terminal);
    ratatui::restore();
    result
}

/// Pixel size of a terminal area. Each cell holds two stacked pixels.
fn view_size(area: ratatui::layout::Size) -> Size {
    Size::new(u32::from(area.width), u32::from(area.height) * 2)
}

/// The host: owns the terminal loop and drives the screensaver's hooks.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Show the module name and key help.
    show_info: bool,
    /// Frames drawn so far.
    frame: u64,
    saver: FallLeaves,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config) -> Self {
        Self {
            running: false,
            show_info: false,
            frame: 0,
            saver: FallLeaves::new(
                config.field.clone(),
                Rgba::from(config.background),
                config.seed,
            ),
        }
    }

    /// Run the application's main loop, one frame per tick.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let tick = self.saver.tick_interval();
        let mut next_tick = Instant::now();

        while self.running {
            // A resize tears the run down and starts over at the new size.
            let view = view_size(terminal.size()?);
            if self.saver.view() != Some(view) {
                self.saver.start(view)?;
            }

            terminal.draw(|frame| self.render(frame))?;

            next_tick += tick;
            let now = Instant::now();
            if next_tick < now {
                // Running behind; skip the missed ticks rather than bursting.
                next_tick = now;
            }
            self.handle_crossterm_events(next_tick)?;
        }

        self.saver.stop();
        Ok(())
    }

    /// Renders one tick of the screensaver.
    fn render(&mut self, frame: &mut Frame) {
        self.frame += 1;
        self.saver.draw(frame.buffer_mut(), self.frame);

        if self.show_info {
            let area = frame.area();
            let chunks = Layout::vertical([
                Constraint::Length(1), // Module name
                Constraint::Length(1), // Module info
                Constraint::Fill(1),
                Constraint::Length(1), // Help text
            ])
            .split(area);

            frame.render_widget(Line::from(MODULE_NAME.bold().fg(Color::White)), chunks[0]);
            frame.render_widget(Line::from(MODULE_INFO.fg(Color::Gray)), chunks[1]);

            let help = Line::from(vec![
                "q".bold().fg(Color::White),
                " quit  ".dark_gray(),
                "i".bold().fg(Color::White),
                " hide info".dark_gray(),
            ])
            .centered();
            frame.render_widget(help, chunks[3]);
        }
    }

    /// Reads crossterm events until the next tick is due.
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('i')) => self.toggle_info(),
            _ => {}
        }
    }

    fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
