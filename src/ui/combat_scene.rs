use quest_chronicles::character::Character;
use quest_chronicles::combat::{Ability, BattleOutcome, Combatant, Enemy};
use quest_chronicles::session::TurnSummary;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::draw_controls;
use super::stats_panel::health_color;

const MAX_BATTLE_LINES: usize = 30;

/// Display state for one encounter. Holds a copy of the enemy so the final
/// blow can still be drawn after the session clears the battle.
pub struct CombatScreen {
    pub enemy: Enemy,
    pub lines: Vec<String>,
    pub outcome: Option<BattleOutcome>,
}

impl CombatScreen {
    pub fn new(enemy: Enemy) -> Self {
        let lines = vec![format!("A wild {} appears!", enemy.name)];
        Self {
            enemy,
            lines,
            outcome: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Appends the turn's events to the battle log. `enemy` is the enemy after
    /// the turn, or `None` once the battle has ended.
    pub fn record(&mut self, summary: &TurnSummary, enemy: Option<&Enemy>) {
        for event in &summary.events {
            self.lines.push(event.describe(&self.enemy.name));
        }
        match enemy {
            Some(enemy) => self.enemy = enemy.clone(),
            None => {
                if let Some(BattleOutcome::Victory(_)) = summary.outcome {
                    self.enemy.health = 0;
                }
            }
        }
        if summary.levels_gained > 0 {
            self.lines
                .push(format!("Level up! (+{})", summary.levels_gained));
        }
        self.outcome = summary.outcome;
        if self.lines.len() > MAX_BATTLE_LINES {
            let excess = self.lines.len() - MAX_BATTLE_LINES;
            self.lines.drain(..excess);
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, character: &Character) {
        let combat_block = Block::default()
            .borders(Borders::ALL)
            .title("Combat Arena");

        let inner = combat_block.inner(area);
        f.render_widget(combat_block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Player HP bar
                Constraint::Length(3), // Enemy HP bar
                Constraint::Min(4),    // Battle log
                Constraint::Length(2), // Controls
            ])
            .split(inner);

        draw_hp_gauge(f, chunks[0], character, None);
        draw_hp_gauge(f, chunks[1], &self.enemy, Some(Color::Red));

        self.draw_battle_log(f, chunks[2]);

        let controls = if self.is_finished() {
            "[Enter] Continue".to_string()
        } else {
            format!(
                "[A] Attack    [S] {}    [R] Run",
                Ability::for_class(character.class).name()
            )
        };
        draw_controls(f, chunks[3], &controls);
    }

    fn draw_battle_log(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Battle");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut lines: Vec<Line> = Vec::new();
        if let Some(outcome) = self.outcome {
            let (text, color) = match outcome {
                BattleOutcome::Victory(_) => ("VICTORY", Color::Green),
                BattleOutcome::Defeat => ("DEFEAT", Color::Red),
                BattleOutcome::Escaped => ("ESCAPED", Color::Yellow),
            };
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }

        // Newest first
        lines.extend(
            self.lines
                .iter()
                .rev()
                .take(inner.height as usize)
                .map(|line| Line::from(line.clone())),
        );

        let log = Paragraph::new(lines).alignment(Alignment::Left);
        f.render_widget(log, inner);
    }
}

fn draw_hp_gauge(f: &mut Frame, area: Rect, fighter: &impl Combatant, color: Option<Color>) {
    let health = fighter.health();
    let max_health = fighter.max_health();
    let ratio = (health as f64 / max_health.max(1) as f64).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(fighter.name().to_string()))
        .gauge_style(
            Style::default()
                .fg(color.unwrap_or_else(|| health_color(ratio)))
                .add_modifier(Modifier::BOLD),
        )
        .label(format!("HP: {}/{}", health.max(0), max_health))
        .ratio(ratio);
    f.render_widget(gauge, area);
}
