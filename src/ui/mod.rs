pub mod character_creation;
pub mod character_delete;
pub mod character_select;
pub mod combat_scene;
pub mod death_screen;
pub mod game_menu;
pub mod inventory_scene;
pub mod quest_scene;
pub mod shop_scene;
mod stats_panel;

use std::collections::VecDeque;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const MAX_LOG_ENTRIES: usize = 50;

/// Cursor over a list whose length can change between frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection {
    pub index: usize,
}

impl Selection {
    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn down(&mut self, len: usize) {
        if self.index + 1 < len {
            self.index += 1;
        }
    }

    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }
}

/// Single-line text entry with a cursor counted in characters.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    fn byte_offset(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor. Returns false at the start.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// The value with `_` drawn at the cursor.
    fn display(&self) -> String {
        let at = self.byte_offset(self.cursor);
        format!("{}_{}", &self.value[..at], &self.value[at..])
    }
}

/// Draws a bordered input box.
pub fn draw_text_input(frame: &mut Frame, area: Rect, input: &TextInput, alignment: Alignment) {
    let widget = Paragraph::new(input.display())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .alignment(alignment);
    frame.render_widget(widget, area);
}

/// Recent game messages, newest last.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: VecDeque<(String, bool)>,
}

impl MessageLog {
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message.into(), false);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message.into(), true);
    }

    fn push(&mut self, message: String, is_error: bool) {
        self.entries.push_back((message, is_error));
        while self.entries.len() > MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Draws the message log panel, newest entry first.
pub fn draw_message_log(frame: &mut Frame, area: Rect, log: &MessageLog) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Log ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let max_width = inner.width as usize;
    let lines: Vec<Line> = log
        .entries
        .iter()
        .rev()
        .take(inner.height as usize)
        .map(|(message, is_error)| {
            let color = if *is_error { Color::Red } else { Color::White };
            // Truncate long messages to fit panel width
            let msg = if message.chars().count() > max_width {
                let cut: String = message.chars().take(max_width.saturating_sub(1)).collect();
                format!("{}…", cut)
            } else {
                message.clone()
            };
            Line::from(Span::styled(msg, Style::default().fg(color)))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Renders `rows` as a list with the selected row highlighted.
pub fn selectable_lines(rows: &[String], selected: usize) -> Vec<Line<'static>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            if i == selected {
                Line::from(Span::styled(
                    format!("> {}", row),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", row),
                    Style::default().fg(Color::White),
                ))
            }
        })
        .collect()
}

/// Draws a list inside a titled block, or `empty` when there is nothing to show.
pub fn draw_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[String],
    selected: usize,
    empty: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if rows.is_empty() {
        let message = Paragraph::new(empty.to_string())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(message, inner);
        return;
    }

    // Scroll so the selection stays visible
    let height = inner.height as usize;
    let offset = if height > 0 && selected >= height {
        selected + 1 - height
    } else {
        0
    };
    let lines: Vec<Line> = selectable_lines(rows, selected)
        .into_iter()
        .skip(offset)
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn draw_controls(frame: &mut Frame, area: Rect, text: &str) {
    let controls = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(controls, area);
}

pub fn draw_title(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let title = Paragraph::new(text.to_string())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, area);
}
