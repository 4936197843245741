use quest_chronicles::character::Character;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{draw_controls, draw_title};

/// Shown when the character has fallen in battle.
pub fn draw_death_screen(f: &mut Frame, area: Rect, character: &Character, revive_cost: u32) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Message
            Constraint::Length(2), // Controls
        ])
        .split(area);

    draw_title(f, chunks[0], "You Have Fallen", Color::Red);

    let can_revive = character.gold >= revive_cost;
    let mut lines = vec![
        Line::from(format!(
            "{} the level {} {} lies defeated.",
            character.name, character.level, character.class
        )),
        Line::from(""),
        Line::from(format!(
            "A healer offers to revive you for {} gold. You carry {}.",
            revive_cost, character.gold
        )),
    ];
    if !can_revive {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "You cannot afford it. GAME OVER.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let message = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(message, chunks[1]);

    let controls = if can_revive {
        format!("[R] Revive ({} gold)    [Q] Give up", revive_cost)
    } else {
        "[Q] Return to character select".to_string()
    };
    draw_controls(f, chunks[2], &controls);
}
