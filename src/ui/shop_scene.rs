use quest_chronicles::catalog::Catalog;
use quest_chronicles::character::Character;
use quest_chronicles::constants::MAX_INVENTORY_SIZE;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{draw_controls, draw_list, draw_message_log, MessageLog, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopMode {
    Buy,
    Sell,
}

pub struct ShopScreen {
    pub mode: ShopMode,
    pub selection: Selection,
}

impl ShopScreen {
    pub fn new() -> Self {
        Self {
            mode: ShopMode::Buy,
            selection: Selection::default(),
        }
    }

    /// Item ids listed in the current mode: the catalog when buying, the
    /// character's pack when selling.
    pub fn entries(&self, character: &Character, catalog: &Catalog) -> Vec<String> {
        match self.mode {
            ShopMode::Buy => catalog
                .shop_items()
                .into_iter()
                .map(|item| item.id.clone())
                .collect(),
            ShopMode::Sell => character.inventory.clone(),
        }
    }

    pub fn selected_item(&self, character: &Character, catalog: &Catalog) -> Option<String> {
        self.entries(character, catalog)
            .into_iter()
            .nth(self.selection.index)
    }

    pub fn draw(
        &self,
        f: &mut Frame,
        area: Rect,
        character: &Character,
        catalog: &Catalog,
        log: &MessageLog,
    ) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Main content
                Constraint::Length(2), // Controls
            ])
            .split(area);

        let mode = match self.mode {
            ShopMode::Buy => "Buying",
            ShopMode::Sell => "Selling",
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                mode,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "    Gold: {}    Pack: {}/{}",
                character.gold,
                character.inventory.len(),
                MAX_INVENTORY_SIZE
            )),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Shop"));
        f.render_widget(header, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let lines: Vec<String> = self
            .entries(character, catalog)
            .iter()
            .map(|item_id| match catalog.items.get(item_id) {
                Some(item) => {
                    let price = match self.mode {
                        ShopMode::Buy => item.cost,
                        ShopMode::Sell => item.sell_price(),
                    };
                    format!("{:<22} {:>4}g", item.name, price)
                }
                None => format!("{:<22}    -", item_id),
            })
            .collect();
        let empty = match self.mode {
            ShopMode::Buy => "The shop has nothing for sale.",
            ShopMode::Sell => "You have nothing to sell.",
        };
        draw_list(f, columns[0], "Items", &lines, self.selection.index, empty);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(6)])
            .split(columns[1]);

        let details: Vec<Line> = self
            .selected_item(character, catalog)
            .and_then(|item_id| catalog.items.get(&item_id))
            .map(|item| {
                vec![
                    Line::from(Span::styled(
                        item.name.clone(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("{} ({})", item.item_type.name(), item.effect)),
                    Line::from(""),
                    Line::from(item.description.clone()),
                ]
            })
            .unwrap_or_default();
        let details = Paragraph::new(details)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Details"));
        f.render_widget(details, right[0]);
        draw_message_log(f, right[1], log);

        draw_controls(f, rows[2], "[Tab] Buy/Sell    [Enter] Confirm    [Esc] Back");
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            ShopMode::Buy => ShopMode::Sell,
            ShopMode::Sell => ShopMode::Buy,
        };
        self.selection = Selection::default();
    }

    pub fn move_up(&mut self) {
        self.selection.up();
    }

    pub fn move_down(&mut self, character: &Character, catalog: &Catalog) {
        self.selection.down(self.entries(character, catalog).len());
    }

    pub fn refresh(&mut self, character: &Character, catalog: &Catalog) {
        self.selection.clamp(self.entries(character, catalog).len());
    }
}
