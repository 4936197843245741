use quest_chronicles::character::manager::validate_name;
use quest_chronicles::character::CharacterClass;
use quest_chronicles::constants::MAX_NAME_LENGTH;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{draw_controls, draw_text_input, draw_title, Selection, TextInput};

pub struct CharacterCreationScreen {
    pub name_input: TextInput,
    pub validation_error: Option<String>,
    pub class_selection: Selection,
}

impl CharacterCreationScreen {
    pub fn new() -> Self {
        Self {
            name_input: TextInput::default(),
            validation_error: None,
            class_selection: Selection::default(),
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(4), // Input label + field
                Constraint::Length(3), // Rules
                Constraint::Length(2), // Validation
                Constraint::Min(8),    // Class choice
                Constraint::Length(2), // Controls
            ])
            .split(area);

        draw_title(f, chunks[0], "Create Your Hero", Color::Cyan);

        f.render_widget(Paragraph::new("Character Name:"), chunks[1]);
        let input_area = Rect {
            y: chunks[1].y + 1,
            height: 3,
            ..chunks[1]
        };
        draw_text_input(f, input_area, &self.name_input, Alignment::Left);

        let rules = vec![
            Line::from(format!("• 1-{} characters", MAX_NAME_LENGTH)),
            Line::from("• Letters, numbers, spaces, hyphens, underscores"),
        ];
        let rules_widget = Paragraph::new(rules).style(Style::default().fg(Color::Gray));
        f.render_widget(rules_widget, chunks[2]);

        let validation_text = if let Some(error) = &self.validation_error {
            Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ))
        } else if !self.name_input.value().trim().is_empty() {
            Line::from(Span::styled(
                "✓ Name is valid",
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from("")
        };
        f.render_widget(Paragraph::new(validation_text), chunks[3]);

        self.draw_class_choice(f, chunks[4]);

        draw_controls(
            f,
            chunks[5],
            "[←→] Cursor    [↑↓] Class    [Enter] Create Character    [Esc] Cancel",
        );
    }

    fn draw_class_choice(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);

        let rows: Vec<String> = CharacterClass::all()
            .iter()
            .map(|class| class.name().to_string())
            .collect();
        super::draw_list(f, chunks[0], "Class", &rows, self.class_selection.index, "");

        let class = self.selected_class();
        let stats = class.base_stats();
        let lines = vec![
            Line::from(Span::styled(
                class.name(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(class.description()),
            Line::from(""),
            Line::from(format!(
                "Health {}   Strength {}   Magic {}",
                stats.health, stats.strength, stats.magic
            )),
        ];
        let details = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Details"));
        f.render_widget(details, chunks[1]);
    }

    pub fn handle_char_input(&mut self, c: char) {
        self.name_input.insert(c);
        self.validate();
    }

    pub fn handle_backspace(&mut self) {
        if self.name_input.backspace() {
            self.validate();
        }
    }

    pub fn next_class(&mut self) {
        self.class_selection.down(CharacterClass::all().len());
    }

    pub fn previous_class(&mut self) {
        self.class_selection.up();
    }

    pub fn selected_class(&self) -> CharacterClass {
        let classes = CharacterClass::all();
        classes[self.class_selection.index.min(classes.len() - 1)]
    }

    pub fn validate(&mut self) {
        self.validation_error = validate_name(self.name_input.value().trim())
            .err()
            .map(|e| e.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.validation_error.is_none() && !self.name_input.value().trim().is_empty()
    }

    pub fn get_name(&self) -> String {
        self.name_input.value().trim().to_string()
    }
}
