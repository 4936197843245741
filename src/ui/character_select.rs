use quest_chronicles::character::CharacterInfo;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{draw_controls, draw_list, draw_message_log, draw_title, MessageLog, Selection};

pub struct CharacterSelectScreen {
    pub selection: Selection,
}

impl CharacterSelectScreen {
    pub fn new() -> Self {
        Self {
            selection: Selection::default(),
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, characters: &[CharacterInfo], log: &MessageLog) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Main content
                Constraint::Length(5), // Log
                Constraint::Length(2), // Controls
            ])
            .split(area);

        draw_title(f, chunks[0], "Quest Chronicles\nSelect Your Hero", Color::Cyan);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40), // Character list
                Constraint::Percentage(60), // Details panel
            ])
            .split(chunks[1]);

        let rows: Vec<String> = characters
            .iter()
            .map(|character| {
                if character.is_corrupted {
                    format!("{} (CORRUPTED)", character.filename)
                } else {
                    format!("{} (Lv {})", character.name, character.level)
                }
            })
            .collect();
        draw_list(
            f,
            main_chunks[0],
            "Characters",
            &rows,
            self.selection.index,
            "No characters yet.\nPress [N] to create one.",
        );

        self.draw_character_details(f, main_chunks[1], characters);
        draw_message_log(f, chunks[2], log);
        draw_controls(
            f,
            chunks[3],
            "[Enter] Play    [N] New    [D] Delete    [Q] Quit",
        );
    }

    fn draw_character_details(&self, f: &mut Frame, area: Rect, characters: &[CharacterInfo]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Character Details");

        let inner_area = block.inner(area);
        f.render_widget(block, area);

        let Some(character) = self.get_selected_character(characters) else {
            return;
        };

        if character.is_corrupted {
            let corrupted_message = Paragraph::new(vec![
                Line::from(Span::styled(
                    "CORRUPTED SAVE FILE",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("This save file could not be read."),
                Line::from("You can delete it with [D]."),
            ])
            .alignment(Alignment::Center);
            f.render_widget(corrupted_message, inner_area);
            return;
        }

        let class = character
            .class
            .map(|class| class.name())
            .unwrap_or("Unknown");
        let last_played = character
            .last_played
            .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let lines = vec![
            Line::from(Span::styled(
                character.name.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Class: {}", class)),
            Line::from(format!("Level: {}", character.level)),
            Line::from(format!("Last played: {}", last_played)),
        ];

        f.render_widget(Paragraph::new(lines), inner_area);
    }

    pub fn move_up(&mut self) {
        self.selection.up();
    }

    pub fn move_down(&mut self, characters: &[CharacterInfo]) {
        self.selection.down(characters.len());
    }

    pub fn get_selected_character<'a>(
        &self,
        characters: &'a [CharacterInfo],
    ) -> Option<&'a CharacterInfo> {
        characters.get(self.selection.index)
    }
}
