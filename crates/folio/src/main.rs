use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use folio_backdrop::{BackdropOptions, BackdropState, FrameClock};
use folio_config::Config;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
};

mod cli;
mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = cli::Args::parse();
    let (config, config_warning) = args.load_config()?;

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    if let Err(e) = logging::init(&config) {
        eprintln!("folio: logging disabled: {e}");
    }
    if let Some(e) = config_warning {
        log::warn!("Failed to load config: {e}. Using defaults.");
    }

    let seed = config.seed.unwrap_or_else(time_seed);
    log::info!("Starting folio ({} theme, seed {seed})", config.theme);

    let terminal = ratatui::init();
    let result = App::new(&config, seed).run(terminal);
    ratatui::restore();
    result
}

/// Seed derived from the wall clock, for runs without a configured seed.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Both animation layers.
    backdrop: BackdropState,
    /// Paces animation frames.
    clock: FrameClock,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config, seed: u64) -> Self {
        let backdrop = BackdropState::new(BackdropOptions {
            theme: config.theme,
            particle_count: config.particle_count,
            shape_count: config.shape_count,
            seed,
            cell_px: config.cell_px,
            show_particles: config.show_particles,
            show_shapes: config.show_shapes,
        });
        Self {
            running: false,
            backdrop,
            clock: FrameClock::new(config.fps, Instant::now()),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let size = terminal.size()?;
        self.backdrop.resize(size.width, size.height);

        while self.running {
            if self.clock.poll(Instant::now()) {
                self.backdrop.tick();
                terminal.draw(|frame| self.render(frame))?;
            }
            self.handle_crossterm_events()?;
        }

        self.backdrop.stop();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(&self.backdrop, area);

        let [_, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let palette = self.backdrop.theme().palette();
        let key = |k: &'static str| Span::from(k).bold().fg(palette.accent.color());
        let label = |l: &'static str| Span::from(l).fg(palette.muted.color());
        let help = Line::from(vec![
            key("q"),
            label(" quit  "),
            key("t"),
            label(" theme  "),
            key("p"),
            label(" particles  "),
            key("s"),
            label(" shapes  "),
            key("space"),
            label(if self.backdrop.is_paused() {
                " resume"
            } else {
                " pause"
            }),
        ])
        .style(Style::new().bg(palette.background.color()))
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the time left until the next frame.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.clock.timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => self.backdrop.resize(width, height),
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
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('p')) => self.backdrop.toggle_particles(),
            (_, KeyCode::Char('s')) => self.backdrop.toggle_shapes(),
            (_, KeyCode::Char(' ')) => self.backdrop.toggle_pause(),
            _ => {}
        }
    }

    /// Switch between the dark and light themes.
    fn toggle_theme(&mut self) {
        self.backdrop.toggle_theme();
        log::info!("Theme switched to {}", self.backdrop.theme());
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
