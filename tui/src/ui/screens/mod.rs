pub mod fatal;
pub mod form;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::state::form::FormState;

pub enum Action {
    None,
    Quit,
}

pub enum Screen<'a> {
    Form(FormState<'a>),
    Fatal(fatal::FatalState),
}

impl Screen<'_> {
    pub fn draw(&self, f: &mut Frame) {
        match self {
            Screen::Form(s) => form::draw(f, s),
            Screen::Fatal(s) => fatal::draw(f, s),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self {
            Screen::Form(s) => form::handle_key(s, key),
            Screen::Fatal(_) => fatal::handle_key(key),
        }
    }
}
