use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use estimator::Field;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    state::form::{Focus, FormState, Outcome},
    ui::{layout, theme::Theme, widgets},
};

use super::Action;

const TITLE: &str = "Prediksi Harga Rumah di Indonesia";
const PROMPT: &str = "Masukkan fitur-fitur rumah untuk prediksi harga:";
const SUBMIT_LABEL: &str = "Prediksi Harga";
const METRIC_LABEL: &str = "Harga Prediksi Rumah:";

const LEFT_COLUMN: [Field; 3] = [Field::Area, Field::Bedrooms, Field::Garage];
const RIGHT_COLUMN: [Field; 3] = [Field::BuildingArea, Field::Bathrooms, Field::City];

pub fn handle_key(state: &mut FormState<'_>, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
        KeyCode::Tab | KeyCode::Down => state.focus_next(),
        KeyCode::BackTab | KeyCode::Up => state.focus_prev(),
        KeyCode::Right => state.step(1),
        KeyCode::Left => state.step(-1),
        KeyCode::Backspace => state.backspace(),
        KeyCode::Enter => {
            state.submit();
        }
        KeyCode::Char(c) => state.type_char(c),
        _ => {}
    }

    Action::None
}

pub fn draw(f: &mut Frame, state: &FormState<'_>) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let regions = layout::form(area);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(TITLE, Theme::title())))
            .alignment(Alignment::Center),
        regions.title,
    );
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(PROMPT, Theme::dim()))),
        regions.prompt,
    );

    draw_fields(f, regions.fields, state);

    f.render_widget(
        widgets::button(SUBMIT_LABEL, state.focus() == Focus::Submit),
        regions.button,
    );

    draw_outcome(f, regions.outcome, state.outcome());

    f.render_widget(
        widgets::hints(&[
            ("tab / ↑↓", "pindah"),
            ("←→", "ubah"),
            ("enter", "prediksi"),
            ("esc", "keluar"),
        ]),
        regions.hints,
    );
}

fn draw_fields(f: &mut Frame, area: Rect, state: &FormState<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" Fitur Rumah ")
        .title_style(Theme::title());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let (left, right) = layout::field_grid(inner);
    let columns = [(LEFT_COLUMN, left), (RIGHT_COLUMN, right)];

    for (fields, boxes) in columns {
        for (field, slot) in fields.into_iter().zip(boxes) {
            let focused = state.focus() == Focus::Field(field);
            let value = state.draft().get(field);

            let widget = match field {
                Field::City => widgets::select_box(field.label(), value.unwrap_or(""), focused),
                _ => widgets::field_box(field.label(), value, focused),
            };
            f.render_widget(widget, slot);
        }
    }
}

fn draw_outcome(f: &mut Frame, area: Rect, outcome: Option<&Outcome>) {
    match outcome {
        Some(Outcome::Success(estimate)) => {
            f.render_widget(widgets::metric(METRIC_LABEL, estimate), area)
        }
        Some(Outcome::Failure(message)) => f.render_widget(widgets::error_box(message), area),
        None => {}
    }
}
