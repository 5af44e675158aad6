use estimator::Estimate;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::theme::Theme;

/// A bordered input box showing `value`, or a placeholder when the field is empty.
pub fn field_box<'a>(label: &'a str, value: Option<&'a str>, focused: bool) -> Paragraph<'a> {
    let border = if focused {
        Theme::focus()
    } else {
        Theme::border()
    };

    let content = match value {
        Some(text) if focused => Line::from(vec![
            Span::styled(text, Theme::text()),
            Span::styled("▏", Theme::accent()),
        ]),
        Some(text) => Line::from(Span::styled(text, Theme::text())),
        None => Line::from(Span::styled("(kosong)", Theme::muted())),
    };

    Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {label} "))
            .title_style(if focused { Theme::accent() } else { Theme::dim() }),
    )
}

/// A select box: the current choice between arrows.
pub fn select_box<'a>(label: &'a str, choice: &'a str, focused: bool) -> Paragraph<'a> {
    let (border, arrows) = if focused {
        (Theme::focus(), Theme::accent())
    } else {
        (Theme::border(), Theme::muted())
    };

    let content = Line::from(vec![
        Span::styled("◀ ", arrows),
        Span::styled(choice, Theme::text()),
        Span::styled(" ▶", arrows),
    ]);

    Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {label} "))
            .title_style(if focused { Theme::accent() } else { Theme::dim() }),
    )
}

pub fn button(label: &str, focused: bool) -> Paragraph<'_> {
    let (style, border) = if focused {
        (Theme::button_active(), BorderType::Thick)
    } else {
        (Theme::accent(), BorderType::Rounded)
    };

    Paragraph::new(Line::from(Span::styled(format!(" {label} "), style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border)
                .border_style(if focused {
                    Theme::focus()
                } else {
                    Theme::border()
                }),
        )
}

/// The success banner followed by the price in a metric block.
pub fn metric<'a>(label: &'a str, estimate: &'a Estimate) -> Paragraph<'a> {
    let lines = vec![
        Line::from(Span::styled("Prediksi berhasil!", Theme::ok())),
        Line::from(""),
        Line::from(Span::styled(label, Theme::dim())),
        Line::from(Span::styled(estimate.formatted.as_str(), Theme::title())),
    ];

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::ACCENT_GREEN)),
    )
}

pub fn error_box(message: &str) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled(message, Theme::error())))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Theme::ACCENT_RED)),
        )
}

/// Key hints as `key  description` pairs on a single centered line.
pub fn hints<'a>(pairs: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let spans = pairs
        .iter()
        .flat_map(|&(key, what)| {
            [
                Span::styled(key, Theme::dim()),
                Span::styled(format!("  {what}    "), Theme::muted()),
            ]
        })
        .collect::<Vec<_>>();

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
