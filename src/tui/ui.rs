//! UI rendering using ratatui
//!
//! Two screens:
//! - Title: rounds, difficulty, start, quit
//! - Playing: board, scores, wheel, keyboard and the running log

use crate::app::{format_money, App, AppCoordinator, InputMode, KeyState, MenuOption, Screen, Tone};
use crate::game::{Difficulty, GameStatus, Side};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Render the appropriate screen based on app state
pub fn render(frame: &mut Frame, coordinator: &AppCoordinator) {
    match &coordinator.screen {
        Screen::Title {
            selected,
            rounds,
            difficulty,
        } => render_title(frame, *selected, *rounds, *difficulty),
        Screen::Playing { app } => render_game(frame, app),
    }
}

fn render_title(frame: &mut Frame, selected: usize, rounds: u32, difficulty: Difficulty) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Logo
            Constraint::Length(2), // Tagline
            Constraint::Min(6),    // Menu options
            Constraint::Length(2), // Footer
        ])
        .margin(2)
        .split(area);

    let logo = r#"
 ____        _                               _
/ ___| _ __ (_)_ ____      _____  _ __ __| |
\___ \| '_ \| | '_ \ \ /\ / / _ \| '__/ _` |
 ___) | |_) | | | | \ V  V / (_) | | | (_| |
|____/| .__/|_|_| |_|\_/\_/ \___/|_|  \__,_|
      |_|
"#;
    let logo_widget = Paragraph::new(logo)
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(logo_widget, layout[0]);

    let tagline = Paragraph::new("Spin the wheel. Call a letter. Beat the computer.")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(tagline, layout[1]);

    let items: Vec<ListItem> = MenuOption::all()
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == selected { "> " } else { "  " };
            let text = match opt {
                MenuOption::Rounds => format!("{}{}: < {} >", prefix, opt.label(), rounds),
                MenuOption::Difficulty => {
                    format!("{}{}: < {} >", prefix, opt.label(), difficulty.label())
                }
                MenuOption::Start | MenuOption::Quit => format!("{}{}", prefix, opt.label()),
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let menu = List::new(items).block(Block::default());
    frame.render_widget(menu, centered(layout[2], 30));

    let footer = Paragraph::new("↑↓ Navigate  ←→ Change  Enter Select  Esc Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[3]);
}

/// Render the in-game screen
fn render_game(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Banner
            Constraint::Min(10),   // Board, scores, wheel, log
            Constraint::Length(5), // Keyboard
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_header(frame, layout[0], app);
    render_banner(frame, layout[1], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(32)])
        .split(layout[2]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(4)])
        .split(columns[0]);
    render_board(frame, left[0], app);
    render_scores(frame, left[1], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(columns[1]);
    render_wheel(frame, right[0], app);
    render_log(frame, right[1], app);

    render_keyboard(frame, layout[3], app);
    render_hints(frame, layout[4], app);

    if let Some(input) = app.solve_input() {
        render_solve_prompt(frame, area, app, input);
    }
}

/// Round, category and difficulty
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Round
            Constraint::Min(20),    // Category
            Constraint::Length(14), // Difficulty
        ])
        .split(inner);

    let state = app.state();
    let round = Paragraph::new(format!("Round {}/{}", state.round, state.max_rounds))
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(round, header_layout[0]);

    let category = Paragraph::new(state.puzzle.category.clone())
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(category, header_layout[1]);

    let difficulty = Paragraph::new(app.engine().settings().difficulty.label())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right);
    frame.render_widget(difficulty, header_layout[2]);
}

fn render_banner(frame: &mut Frame, area: Rect, app: &App) {
    let color = match app.banner.tone {
        Tone::Neutral => Color::White,
        Tone::Money => Color::Green,
        Tone::Bad => Color::Red,
    };
    let banner = Paragraph::new(app.banner.text.clone())
        .style(Style::default().fg(color).bold())
        .alignment(Alignment::Center);
    frame.render_widget(banner, area);
}

/// Puzzle tiles, wrapped on word boundaries to fit the width.
fn render_board(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = app.state();
    let mut words: Vec<Vec<Span>> = vec![Vec::new()];
    for (i, c) in state.puzzle.answer.chars().enumerate() {
        if c == ' ' {
            words.push(Vec::new());
            continue;
        }
        let tile = match state.visible_char(i) {
            Some(shown) => Span::styled(
                format!(" {} ", shown),
                Style::default().fg(Color::Black).bg(Color::White).bold(),
            ),
            None => Span::styled("   ", Style::default().bg(Color::Blue)),
        };
        if let Some(word) = words.last_mut() {
            word.push(tile);
            word.push(Span::raw(" "));
        }
    }

    // Each tile is four columns wide including its gap
    let max_width = inner.width.max(4) as usize;
    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut current_width = 0;
    for word in words {
        let width = word.len() / 2 * 4;
        if current_width > 0 && current_width + 2 + width > max_width {
            lines.push(Line::from(std::mem::take(&mut current)));
            lines.push(Line::raw(""));
            current_width = 0;
        }
        if current_width > 0 {
            current.push(Span::raw("  "));
            current_width += 2;
        }
        current_width += width;
        current.extend(word);
    }
    lines.push(Line::from(current));

    let padding = inner.height.saturating_sub(lines.len() as u16) / 2;
    let mut padded: Vec<Line> = (0..padding).map(|_| Line::raw("")).collect();
    padded.extend(lines);

    let board = Paragraph::new(padded).alignment(Alignment::Center);
    frame.render_widget(board, inner);
}

fn render_scores(frame: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let state = app.state();
    let in_round = app.status() == GameStatus::InRound;
    for (side, rect) in [(Side::Player, cards[0]), (Side::Opponent, cards[1])] {
        let active = in_round && state.turn == side;
        let border = if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = if active {
            format!(" ▶ {} ", side)
        } else {
            format!(" {} ", side)
        };
        let lines = vec![
            Line::from(vec![
                Span::styled("Round ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format_money(state.round_score[side]),
                    Style::default().fg(Color::Green).bold(),
                ),
            ]),
            Line::from(vec![
                Span::styled("Total ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format_money(state.total_score[side]),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];
        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        );
        frame.render_widget(card, rect);
    }
}

/// Last landed segment, the value in play, and the solve-window clock.
fn render_wheel(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.state();
    let landed = match state.last_spin {
        Some(segment) => {
            let (r, g, b) = segment.rgb();
            Span::styled(
                format!(" {} ", segment.label),
                Style::default().fg(Color::White).bg(Color::Rgb(r, g, b)).bold(),
            )
        }
        None => Span::styled("not spun yet", Style::default().fg(Color::DarkGray)),
    };

    let detail = if let Some(remaining) = app.engine().solve_window_remaining() {
        Line::styled(
            format!("Solve window: {:.1}s", remaining.as_secs_f32()),
            Style::default().fg(Color::Red).bold(),
        )
    } else if state.sudden_death {
        Line::styled("Sudden death", Style::default().fg(Color::Red).bold())
    } else if state.spin_value > 0 {
        Line::styled(
            format!("In play: {} per letter", format_money(state.spin_value)),
            Style::default().fg(Color::Green),
        )
    } else {
        Line::raw("")
    };

    let wheel = Paragraph::new(vec![Line::from(vec![Span::raw("Wheel: "), landed]), detail])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title("Wheel"),
        );
    frame.render_widget(wheel, area);
}

/// Recent narration, newest first
fn render_log(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .log
        .iter()
        .rev()
        .enumerate()
        .map(|(i, line)| {
            let style = if i == 0 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(line.clone()).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Log"),
    );
    frame.render_widget(list, area);
}

fn render_keyboard(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let keys: Vec<Span> = row
                .chars()
                .map(|c| {
                    let style = match app.key_state(c) {
                        KeyState::Hit => Style::default().fg(Color::Black).bg(Color::Green),
                        KeyState::Miss => Style::default()
                            .fg(Color::Red)
                            .add_modifier(Modifier::CROSSED_OUT),
                        KeyState::Available => Style::default().fg(Color::White).bold(),
                        KeyState::Disabled => Style::default().fg(Color::DarkGray),
                    };
                    Span::styled(format!(" {} ", c), style)
                })
                .collect();
            Line::from(keys)
        })
        .collect();

    let keyboard = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(keyboard, area);
}

fn render_hints(frame: &mut Frame, area: Rect, app: &App) {
    let text = match (&app.mode, app.status()) {
        (InputMode::Solving { .. }, _) => "Type your answer  Enter Submit  Esc Cancel",
        (_, GameStatus::RoundOver(_)) => "Enter Next round  Esc Title",
        (_, GameStatus::GameOver(_)) => "Enter Play again  Esc Title",
        (_, GameStatus::InRound) if app.state().solve_window_open() => "Enter Solve now!  Esc Title",
        (_, GameStatus::InRound) => "Space Spin  A-Z Call letter  Tab Buy vowel  Enter Solve  Esc Title",
    };
    let hints = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, area);
}

fn render_solve_prompt(frame: &mut Frame, area: Rect, app: &App, input: &str) {
    let popup = centered(
        Rect {
            y: area.y + area.height.saturating_sub(5) / 2,
            height: 5.min(area.height),
            ..area
        },
        (app.state().puzzle.answer.len() as u16 + 12).max(30),
    );
    frame.render_widget(Clear, popup);

    let prompt = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(format!("{}_", input), Style::default().fg(Color::Yellow).bold()),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Solve the puzzle "),
    );
    frame.render_widget(prompt, popup);
}

/// A horizontally centred slice of `area` at most `width` columns wide.
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
