use quest_chronicles::character::CharacterInfo;
use quest_chronicles::constants::SAVE_FILE_SUFFIX;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{draw_controls, draw_text_input, draw_title, TextInput};

/// Typed confirmation before a save file is removed.
pub struct CharacterDeleteScreen {
    pub confirmation: TextInput,
}

impl CharacterDeleteScreen {
    pub fn new() -> Self {
        Self {
            confirmation: TextInput::default(),
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, character: &CharacterInfo) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(8),    // Save details and warning
                Constraint::Length(1), // Prompt
                Constraint::Length(3), // Input
                Constraint::Length(2), // Controls
            ])
            .split(area);

        draw_title(f, chunks[0], "Delete Character", Color::Red);
        draw_doomed_save(f, chunks[1], character);

        let key = delete_key(character);
        let prompt = Paragraph::new(format!("Type '{}' to confirm:", key))
            .alignment(Alignment::Center);
        f.render_widget(prompt, chunks[2]);

        let width = 40.min(chunks[3].width);
        let input_area = Rect {
            x: chunks[3].x + (chunks[3].width - width) / 2,
            width,
            ..chunks[3]
        };
        draw_text_input(f, input_area, &self.confirmation, Alignment::Center);

        let controls = if self.is_confirmed(&key) {
            "[Enter] Delete forever    [Esc] Cancel"
        } else {
            "[Esc] Cancel"
        };
        draw_controls(f, chunks[4], controls);
    }

    pub fn handle_char_input(&mut self, c: char) {
        self.confirmation.insert(c);
    }

    pub fn handle_backspace(&mut self) {
        self.confirmation.backspace();
    }

    pub fn is_confirmed(&self, key: &str) -> bool {
        self.confirmation.value() == key
    }

    pub fn reset(&mut self) {
        self.confirmation.clear();
    }
}

fn draw_doomed_save(f: &mut Frame, area: Rect, character: &CharacterInfo) {
    let summary = if character.is_corrupted {
        Line::from(Span::styled(
            "Unreadable save",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let class = character.class.map(|class| class.name()).unwrap_or("?");
        Line::from(vec![
            Span::styled(
                character.name.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  level {} {}", character.level, class)),
        ])
    };

    let lines = vec![
        summary,
        Line::from(format!("File: {}", character.filename)),
        Line::from(""),
        Line::from(Span::styled(
            "This cannot be undone.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    ];
    let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Save to delete "),
    );
    f.render_widget(panel, area);
}

/// Name passed to the manager to delete this save. Corrupted saves have no
/// readable name, so the file stem is used.
pub fn delete_key(character: &CharacterInfo) -> String {
    if character.is_corrupted {
        character
            .filename
            .strip_suffix(SAVE_FILE_SUFFIX)
            .unwrap_or(&character.filename)
            .to_string()
    } else {
        character.name.clone()
    }
}
