//! Terminal front-end using ratatui

mod terminal;
mod ui;

pub use terminal::Tui;
pub use ui::render;
