use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use estimator::ArtifactBundle;
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::{
    config::AppConfig,
    state::form::FormState,
    ui::screens::{fatal::FatalState, Action, Screen},
};

use super::logging;

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the house price form.
///
/// The artifacts are loaded once, before the first frame. If loading fails the
/// form is replaced by an error screen.
///
/// # Errors
/// Returns an error if logging, terminal setup or rendering fails.
pub fn run() -> Result<()> {
    let config = AppConfig::from_env();
    logging::init(config.log_file())?;

    let paths = config.artifact_paths();
    let loaded = ArtifactBundle::load(&paths);

    let mut screen = match &loaded {
        Ok(bundle) => {
            info!(
                features = bundle.schema().len();
                "artifacts ready, models dir {}", config.models_dir().display()
            );
            Screen::Form(FormState::new(bundle))
        }
        Err(e) => {
            error!("Error loading assets: {e}");
            Screen::Fatal(FatalState::new(e, &paths))
        }
    };

    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        terminal.draw(|f| screen.draw(f))?;

        if event::poll(Duration::from_millis(120))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match screen.handle_key(k) {
                    Action::Quit => break,
                    Action::None => {}
                }
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
