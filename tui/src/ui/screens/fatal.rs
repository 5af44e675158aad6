use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use estimator::{Artifact, ArtifactErr, ArtifactPaths};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::{layout, theme::Theme, widgets};

use super::Action;

/// Shown instead of the form when the artifacts could not be loaded.
pub struct FatalState {
    error: String,
    expected: Vec<String>,
}

impl FatalState {
    pub fn new(err: &ArtifactErr, paths: &ArtifactPaths) -> Self {
        let expected = Artifact::ALL
            .into_iter()
            .map(|artifact| format!("{artifact}: {}", paths.get(artifact).display()))
            .collect();

        Self {
            error: format!("Error loading assets: {err}"),
            expected,
        }
    }
}

pub fn handle_key(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

pub fn draw(f: &mut Frame, state: &FatalState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = layout::centered_rect(80, 70, area);

    let mut lines = vec![
        Line::from(Span::styled(state.error.as_str(), Theme::error())),
        Line::from(""),
        Line::from(Span::styled(
            "Model could not be loaded. Please check the model files.",
            Theme::text(),
        )),
        Line::from(""),
    ];
    lines.extend(
        state
            .expected
            .iter()
            .map(|path| Line::from(Span::styled(format!("  {path}"), Theme::dim()))),
    );

    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(" Prediksi Harga Rumah di Indonesia ")
            .title_alignment(Alignment::Center)
            .title_style(Theme::title()),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(outer);

    f.render_widget(body, chunks[0]);
    f.render_widget(widgets::hints(&[("esc / q", "keluar")]), chunks[1]);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use estimator::ArtifactBundle;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    #[test]
    fn missing_model_files_are_reported() {
        let dir = PathBuf::from("/nonexistent/models");
        let paths = ArtifactPaths::in_dir(&dir);
        let err = ArtifactBundle::load(&paths).unwrap_err();
        let state = FatalState::new(&err, &paths);

        assert!(state.error.starts_with("Error loading assets: "));
        assert_eq!(state.expected.len(), 4);
        assert!(state.expected[0].ends_with("rf_model.json"));

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(text.contains("Model could not be loaded."));
    }

    #[test]
    fn any_dismiss_key_quits() {
        for code in [KeyCode::Esc, KeyCode::Enter, KeyCode::Char('q')] {
            assert!(matches!(
                handle_key(KeyEvent::new(code, KeyModifiers::NONE)),
                Action::Quit
            ));
        }
        assert!(matches!(
            handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            Action::None
        ));
    }

    #[test]
    fn only_ctrl_c_quits_not_a_bare_c() {
        assert!(matches!(
            handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            Action::None
        ));
        assert!(matches!(
            handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        ));
    }
}
