use quest_chronicles::character::Character;
use quest_chronicles::combat::Ability;
use quest_chronicles::items::EquipSlot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draws the character sheet: header, health and XP bars, stats and equipment.
pub fn draw_stats_panel(frame: &mut Frame, area: Rect, character: &Character) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Health bar
            Constraint::Length(3), // XP bar
            Constraint::Length(6), // Stats
            Constraint::Min(4),    // Equipment
        ])
        .split(area);

    draw_header(frame, chunks[0], character);
    draw_health_bar(frame, chunks[1], character);
    draw_xp_bar(frame, chunks[2], character);
    draw_stats(frame, chunks[3], character);
    draw_equipment(frame, chunks[4], character);
}

fn draw_header(frame: &mut Frame, area: Rect, character: &Character) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            character.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Level {} {}", character.level, character.class),
            Style::default().fg(Color::White),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("{} gold", character.gold),
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Character"));
    frame.render_widget(header, area);
}

pub fn health_color(ratio: f64) -> Color {
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn draw_health_bar(frame: &mut Frame, area: Rect, character: &Character) {
    let ratio = (character.health as f64 / character.max_health.max(1) as f64).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Health"))
        .gauge_style(Style::default().fg(health_color(ratio)))
        .label(format!("{}/{}", character.health, character.max_health))
        .ratio(ratio);
    frame.render_widget(gauge, area);
}

fn draw_xp_bar(frame: &mut Frame, area: Rect, character: &Character) {
    let needed = character.xp_to_next_level();
    let ratio = if needed > 0 {
        (character.experience as f64 / needed as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Experience"))
        .gauge_style(Style::default().fg(Color::Magenta))
        .label(format!("{}/{}", character.experience, needed))
        .ratio(ratio);
    frame.render_widget(gauge, area);
}

fn draw_stats(frame: &mut Frame, area: Rect, character: &Character) {
    let lines = vec![
        Line::from(format!("Strength: {}", character.strength)),
        Line::from(format!("Magic:    {}", character.magic)),
        Line::from(format!(
            "Special:  {}",
            Ability::for_class(character.class).name()
        )),
        Line::from(format!(
            "Quests:   {} active, {} done",
            character.active_quests.len(),
            character.completed_quests.len()
        )),
    ];
    let stats = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Stats"));
    frame.render_widget(stats, area);
}

fn draw_equipment(frame: &mut Frame, area: Rect, character: &Character) {
    let lines: Vec<Line> = EquipSlot::all()
        .into_iter()
        .map(|slot| {
            let text = match character.equipment.get(slot) {
                Some(item) => format!("{:<7} {} ({})", slot.name(), item.item_id, item.effect),
                None => format!("{:<7} -", slot.name()),
            };
            Line::from(text)
        })
        .collect();
    let equipment =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Equipment"));
    frame.render_widget(equipment, area);
}
