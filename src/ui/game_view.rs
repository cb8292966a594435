use crate::game::{Board, GameSettings, Kalah, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of one pit cell in characters.
const CELL: usize = 5;

pub fn render(
    frame: &mut Frame,
    board: &Kalah,
    selected_pit: usize,
    next_game: &GameSettings,
    message: &Option<String>,
    thinking: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, board, thinking, chunks[0]);
    render_board(frame, board, selected_pit, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, next_game, chunks[3]);
}

fn render_header(frame: &mut Frame, board: &Kalah, thinking: bool, area: ratatui::layout::Rect) {
    let (status, color) = if board.is_over() {
        ("Game Over", Color::Magenta)
    } else if thinking || board.next() == Player::Computer {
        ("Computer is thinking...", Color::Red)
    } else {
        ("Your turn", Color::Green)
    };

    let human = board.seeds_of(Player::Human).unwrap_or(0);
    let computer = board.seeds_of(Player::Computer).unwrap_or(0);
    let text = format!(
        "{status}  |  Level {}  |  You {human} : {computer} Computer",
        board.level()
    );

    let header = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Kalah"));

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    board: &Kalah,
    selected_pit: usize,
    area: ratatui::layout::Rect,
) {
    let n = board.pits_per_player();
    let computer_store = board.total_pits();
    let human_store = n + 1;
    let blank = " ".repeat(CELL);
    let mut lines = Vec::new();

    // Computer side, right to left
    let mut top = vec![Span::raw(blank.clone())];
    for pit in board.pits_of(Player::Computer).rev() {
        top.push(pit_span(board, pit, false));
    }
    top.push(Span::raw(blank.clone()));
    lines.push(Line::from(top));

    // Stores
    lines.push(Line::from(vec![
        pit_span(board, computer_store, false),
        Span::raw(" ".repeat(CELL * n)),
        pit_span(board, human_store, false),
    ]));

    // Human side, left to right
    let mut bottom = vec![Span::raw(blank.clone())];
    for pit in board.pits_of(Player::Human) {
        bottom.push(pit_span(board, pit, pit == selected_pit));
    }
    bottom.push(Span::raw(blank.clone()));
    lines.push(Line::from(bottom));

    // Selection indicator
    let mut indicator = vec![Span::raw(blank.clone())];
    for pit in board.pits_of(Player::Human) {
        if pit == selected_pit {
            indicator.push(Span::styled(
                format!("{:^width$}", "▲", width = CELL),
                Style::default().fg(Color::Cyan),
            ));
        } else {
            indicator.push(Span::raw(blank.clone()));
        }
    }
    indicator.push(Span::raw(blank));
    lines.push(Line::from(indicator));

    let board_widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(board_widget, area);
}

/// One pit cell; the last move's source and target are highlighted.
fn pit_span(board: &Kalah, pit: usize, selected: bool) -> Span<'static> {
    let mut style = if board.target_pit_of_last_move() == Some(pit) {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if board.source_pit_of_last_move() == Some(pit) {
        Style::default().fg(Color::Yellow)
    } else if board.store_of(Player::Human) == Some(pit)
        || board.store_of(Player::Computer) == Some(pit)
    {
        Style::default().fg(Color::Blue)
    } else {
        Style::default()
    };
    if selected {
        style = style
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    Span::styled(format!("{:^width$}", board.seeds(pit), width = CELL), style)
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, next_game: &GameSettings, area: ratatui::layout::Rect) {
    let line = Line::from(format!(
        "←/→: Pit  |  Enter: Sow  |  U: Undo  |  N: New ({}x{})  |  P/E: Pits/Seeds  |  S: Switch  |  +/-: Level  |  Q: Quit",
        next_game.pits_per_player, next_game.seeds_per_pit
    ));

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
