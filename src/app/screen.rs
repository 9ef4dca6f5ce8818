//! Application screen state management
//!
//! Two screens:
//! - Title: pick rounds and difficulty, start or quit
//! - Playing: a game in progress

use crate::config::GameConfig;
use crate::game::{Difficulty, GameEngine, GameSettings, Pacing};
use crossterm::event::KeyCode;
use log::info;
use std::time::Duration;

use super::state::App;

/// Round counts offered on the title screen.
pub const ROUND_CHOICES: [u32; 3] = [1, 3, 5];

/// Menu option on the title screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Rounds,
    Difficulty,
    Start,
    Quit,
}

impl MenuOption {
    /// Get all menu options in order
    pub fn all() -> &'static [MenuOption] {
        &[
            MenuOption::Rounds,
            MenuOption::Difficulty,
            MenuOption::Start,
            MenuOption::Quit,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Rounds => "Rounds",
            MenuOption::Difficulty => "Difficulty",
            MenuOption::Start => "Start Game",
            MenuOption::Quit => "Quit",
        }
    }
}

/// The current application screen
pub enum Screen {
    Title {
        selected: usize,
        rounds: u32,
        difficulty: Difficulty,
    },
    Playing {
        app: Box<App>,
    },
}

/// Main application coordinator
pub struct AppCoordinator {
    pub screen: Screen,
    pub should_quit: bool,
    config: GameConfig,
}

fn next_rounds(current: u32) -> u32 {
    ROUND_CHOICES
        .iter()
        .copied()
        .find(|r| *r > current)
        .unwrap_or(ROUND_CHOICES[0])
}

fn prev_rounds(current: u32) -> u32 {
    ROUND_CHOICES
        .iter()
        .rev()
        .copied()
        .find(|r| *r < current)
        .unwrap_or(ROUND_CHOICES[ROUND_CHOICES.len() - 1])
}

fn cycle_difficulty(current: Difficulty, step: isize) -> Difficulty {
    let all = Difficulty::all();
    let pos = all.iter().position(|d| *d == current).unwrap_or(0) as isize;
    let len = all.len() as isize;
    all[(pos + step).rem_euclid(len) as usize]
}

impl AppCoordinator {
    /// Start at the title screen with the configured choices.
    pub fn new(config: GameConfig) -> Self {
        Self {
            screen: Screen::Title {
                selected: MenuOption::all()
                    .iter()
                    .position(|o| *o == MenuOption::Start)
                    .unwrap_or(0),
                rounds: config.settings.max_rounds,
                difficulty: config.settings.difficulty,
            },
            should_quit: false,
            config,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Back to the title screen, keeping the choices of the last game.
    pub fn go_to_title(&mut self) {
        let (rounds, difficulty) = match &self.screen {
            Screen::Title {
                rounds, difficulty, ..
            } => (*rounds, *difficulty),
            Screen::Playing { app } => {
                let settings = app.engine().settings();
                (settings.max_rounds, settings.difficulty)
            }
        };
        self.screen = Screen::Title {
            selected: 0,
            rounds,
            difficulty,
        };
    }

    pub fn menu_up(&mut self) {
        if let Screen::Title { selected, .. } = &mut self.screen {
            if *selected > 0 {
                *selected -= 1;
            }
        }
    }

    pub fn menu_down(&mut self) {
        if let Screen::Title { selected, .. } = &mut self.screen {
            if *selected < MenuOption::all().len() - 1 {
                *selected += 1;
            }
        }
    }

    /// Change the highlighted setting; `forward` picks the next value.
    pub fn menu_adjust(&mut self, forward: bool) {
        if let Screen::Title {
            selected,
            rounds,
            difficulty,
        } = &mut self.screen
        {
            match MenuOption::all()[*selected] {
                MenuOption::Rounds => {
                    *rounds = if forward {
                        next_rounds(*rounds)
                    } else {
                        prev_rounds(*rounds)
                    };
                }
                MenuOption::Difficulty => {
                    *difficulty = cycle_difficulty(*difficulty, if forward { 1 } else { -1 });
                }
                MenuOption::Start | MenuOption::Quit => {}
            }
        }
    }

    /// Handle menu selection (Enter)
    pub fn menu_select(&mut self) {
        let (option, rounds, difficulty) = match &self.screen {
            Screen::Title {
                selected,
                rounds,
                difficulty,
            } => (MenuOption::all()[*selected], *rounds, *difficulty),
            Screen::Playing { .. } => return,
        };

        match option {
            MenuOption::Rounds | MenuOption::Difficulty => self.menu_adjust(true),
            MenuOption::Start => self.start_game(rounds, difficulty),
            MenuOption::Quit => self.quit(),
        }
    }

    fn start_game(&mut self, rounds: u32, difficulty: Difficulty) {
        let settings = GameSettings {
            max_rounds: rounds,
            difficulty,
        };
        info!("starting {} round game on {}", rounds, difficulty);
        let engine = GameEngine::with_seed(
            settings,
            Pacing::for_profile(self.config.pace),
            self.config.seed,
        );
        self.screen = Screen::Playing {
            app: Box::new(App::new(engine)),
        };
    }

    /// Route a key press to the current screen.
    pub fn handle_key(&mut self, code: KeyCode) {
        match &mut self.screen {
            Screen::Title { .. } => match code {
                KeyCode::Esc | KeyCode::Char('q') => self.quit(),
                KeyCode::Up => self.menu_up(),
                KeyCode::Down => self.menu_down(),
                KeyCode::Left => self.menu_adjust(false),
                KeyCode::Right => self.menu_adjust(true),
                KeyCode::Enter => self.menu_select(),
                _ => {}
            },
            Screen::Playing { app } => match code {
                KeyCode::Esc => {
                    if !app.cancel_solve() {
                        self.go_to_title();
                    }
                }
                KeyCode::Enter => app.on_enter(),
                KeyCode::Tab => app.on_tab(),
                KeyCode::Backspace => app.on_backspace(),
                KeyCode::Char(c) => app.on_char(c),
                _ => {}
            },
        }
    }

    /// Let `dt` of wall-clock time pass.
    pub fn tick(&mut self, dt: Duration) {
        if let Screen::Playing { app } = &mut self.screen {
            app.tick(dt);
        }
    }
}
