//! Application state: screens and the play-screen controller

pub mod screen;
pub mod state;

pub use screen::{AppCoordinator, MenuOption, Screen};
pub use state::{format_money, App, InputMode, KeyState, Tone};
