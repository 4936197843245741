use quest_chronicles::character::Character;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::stats_panel::draw_stats_panel;
use super::{draw_controls, draw_list, draw_message_log, MessageLog, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Explore,
    Inventory,
    Quests,
    Shop,
    Save,
    SaveAndQuit,
}

impl MenuOption {
    pub fn all() -> [MenuOption; 6] {
        [
            MenuOption::Explore,
            MenuOption::Inventory,
            MenuOption::Quests,
            MenuOption::Shop,
            MenuOption::Save,
            MenuOption::SaveAndQuit,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MenuOption::Explore => "Explore",
            MenuOption::Inventory => "Inventory",
            MenuOption::Quests => "Quests",
            MenuOption::Shop => "Shop",
            MenuOption::Save => "Save Game",
            MenuOption::SaveAndQuit => "Save and Quit",
        }
    }
}

pub struct GameMenuScreen {
    pub selection: Selection,
}

impl GameMenuScreen {
    pub fn new() -> Self {
        Self {
            selection: Selection::default(),
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, character: &Character, log: &MessageLog) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Main content
                Constraint::Length(2), // Controls
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(55), // Character sheet
                Constraint::Percentage(45), // Menu + log
            ])
            .split(rows[0]);

        draw_stats_panel(f, columns[0], character);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(MenuOption::all().len() as u16 + 2), // Menu
                Constraint::Min(3),                                     // Log
            ])
            .split(columns[1]);

        let options: Vec<String> = MenuOption::all()
            .iter()
            .map(|option| option.name().to_string())
            .collect();
        draw_list(f, right[0], "What next?", &options, self.selection.index, "");
        draw_message_log(f, right[1], log);

        draw_controls(f, rows[1], "[↑↓] Choose    [Enter] Select    [Q] Save and Quit");
    }

    pub fn move_up(&mut self) {
        self.selection.up();
    }

    pub fn move_down(&mut self) {
        self.selection.down(MenuOption::all().len());
    }

    pub fn selected(&self) -> MenuOption {
        let options = MenuOption::all();
        options[self.selection.index.min(options.len() - 1)]
    }
}
