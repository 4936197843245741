use quest_chronicles::character::Character;
use quest_chronicles::quests::{self, QuestCatalog, QuestDefinition};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{draw_controls, draw_list, draw_message_log, MessageLog, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestTab {
    Active,
    Available,
    Completed,
}

impl QuestTab {
    pub fn all() -> [QuestTab; 3] {
        [QuestTab::Active, QuestTab::Available, QuestTab::Completed]
    }

    pub fn name(&self) -> &'static str {
        match self {
            QuestTab::Active => "Active",
            QuestTab::Available => "Available",
            QuestTab::Completed => "Completed",
        }
    }

    pub fn next(&self) -> QuestTab {
        match self {
            QuestTab::Active => QuestTab::Available,
            QuestTab::Available => QuestTab::Completed,
            QuestTab::Completed => QuestTab::Active,
        }
    }
}

pub struct QuestScreen {
    pub tab: QuestTab,
    pub selection: Selection,
}

impl QuestScreen {
    pub fn new() -> Self {
        Self {
            tab: QuestTab::Active,
            selection: Selection::default(),
        }
    }

    /// Quests listed under the current tab.
    pub fn entries<'a>(
        &self,
        character: &Character,
        catalog: &'a QuestCatalog,
    ) -> Vec<&'a QuestDefinition> {
        match self.tab {
            QuestTab::Active => quests::active_quests(character, catalog),
            QuestTab::Available => quests::available_quests(character, catalog),
            QuestTab::Completed => quests::completed_quests(character, catalog),
        }
    }

    pub fn selected_quest<'a>(
        &self,
        character: &Character,
        catalog: &'a QuestCatalog,
    ) -> Option<&'a QuestDefinition> {
        self.entries(character, catalog)
            .get(self.selection.index)
            .copied()
    }

    pub fn draw(
        &self,
        f: &mut Frame,
        area: Rect,
        character: &Character,
        catalog: &QuestCatalog,
        log: &MessageLog,
    ) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs + summary
                Constraint::Min(0),    // Main content
                Constraint::Length(2), // Controls
            ])
            .split(area);

        self.draw_header(f, rows[0], character, catalog);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[1]);

        let entries = self.entries(character, catalog);
        let rows_text: Vec<String> = entries
            .iter()
            .map(|quest| format!("{} (Lv {})", quest.title, quest.required_level))
            .collect();
        let empty = match self.tab {
            QuestTab::Active => "No active quests.",
            QuestTab::Available => "No quests available right now.",
            QuestTab::Completed => "Nothing completed yet.",
        };
        draw_list(
            f,
            columns[0],
            self.tab.name(),
            &rows_text,
            self.selection.index,
            empty,
        );

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(6)])
            .split(columns[1]);
        self.draw_details(f, right[0], entries.get(self.selection.index).copied(), catalog);
        draw_message_log(f, right[1], log);

        let controls = match self.tab {
            QuestTab::Active => "[Tab] Switch list  [C] Complete  [X] Abandon  [Esc] Back",
            QuestTab::Available => "[Tab] Switch list  [A] Accept  [Esc] Back",
            QuestTab::Completed => "[Tab] Switch list  [Esc] Back",
        };
        draw_controls(f, rows[2], controls);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect, character: &Character, catalog: &QuestCatalog) {
        let mut spans = Vec::new();
        for tab in QuestTab::all() {
            let style = if tab == self.tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", tab.name()), style));
            spans.push(Span::raw("|"));
        }
        spans.pop();

        let earned = quests::total_rewards_earned(character, catalog);
        spans.push(Span::raw(format!(
            "    {:.0}% complete, earned {} xp and {} gold",
            quests::completion_percentage(character, catalog),
            earned.xp,
            earned.gold
        )));

        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Quest Log"));
        f.render_widget(header, area);
    }

    fn draw_details(
        &self,
        f: &mut Frame,
        area: Rect,
        quest: Option<&QuestDefinition>,
        catalog: &QuestCatalog,
    ) {
        let block = Block::default().borders(Borders::ALL).title("Details");
        let Some(quest) = quest else {
            f.render_widget(block, area);
            return;
        };

        let chain = match quests::prerequisite_chain(&quest.id, catalog) {
            Ok(chain) => chain
                .iter()
                .filter_map(|id| catalog.get(id))
                .map(|q| q.title.as_str())
                .collect::<Vec<_>>()
                .join(" → "),
            Err(e) => e.to_string(),
        };
        let prerequisite = quest
            .prerequisite
            .as_ref()
            .and_then(|id| catalog.get(id))
            .map(|q| q.title.clone())
            .unwrap_or_else(|| "None".to_string());

        let lines = vec![
            Line::from(Span::styled(
                quest.title.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(quest.description.clone()),
            Line::from(""),
            Line::from(format!(
                "Reward: {} xp, {} gold",
                quest.reward_xp, quest.reward_gold
            )),
            Line::from(format!("Required level: {}", quest.required_level)),
            Line::from(format!("Requires: {}", prerequisite)),
            Line::from(format!("Chain: {}", chain)),
        ];

        let details = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
        f.render_widget(details, area);
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
        self.selection = Selection::default();
    }

    pub fn move_up(&mut self) {
        self.selection.up();
    }

    pub fn move_down(&mut self, character: &Character, catalog: &QuestCatalog) {
        self.selection.down(self.entries(character, catalog).len());
    }

    /// Keeps the cursor valid after a quest moves between lists.
    pub fn refresh(&mut self, character: &Character, catalog: &QuestCatalog) {
        self.selection.clamp(self.entries(character, catalog).len());
    }
}
