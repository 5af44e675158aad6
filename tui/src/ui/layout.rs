use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of a single bordered input box.
pub const FIELD_HEIGHT: u16 = 3;

/// Regions of the prediction form screen.
pub struct FormRegions {
    pub title: Rect,
    pub prompt: Rect,
    pub fields: Rect,
    pub button: Rect,
    pub outcome: Rect,
    pub hints: Rect,
}

/// Computes the form screen regions inside `area`.
pub fn form(area: Rect) -> FormRegions {
    let outer = centered_rect(80, 96, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                    // title
            Constraint::Length(1),                    // prompt
            Constraint::Length(1),                    // spacer
            Constraint::Length(FIELD_HEIGHT * 3 + 2), // "Fitur Rumah" block
            Constraint::Length(1),                    // spacer
            Constraint::Length(3),                    // button
            Constraint::Length(1),                    // spacer
            Constraint::Min(5),                       // outcome
            Constraint::Length(1),                    // hints
        ])
        .split(outer);

    FormRegions {
        title: chunks[0],
        prompt: chunks[1],
        fields: chunks[3],
        button: centered_rect(40, 100, chunks[5]),
        outcome: chunks[7],
        hints: chunks[8],
    }
}

/// Splits the inside of the fields block into two columns of three boxes each.
///
/// # Returns
/// (left column boxes, right column boxes)
pub fn field_grid(area: Rect) -> (Vec<Rect>, Vec<Rect>) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let rows = |col: Rect| {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(FIELD_HEIGHT); 3])
            .split(col)
            .to_vec()
    };

    (rows(cols[0]), rows(cols[1]))
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
