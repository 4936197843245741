use quest_chronicles::catalog::Catalog;
use quest_chronicles::character::Character;
use quest_chronicles::constants::MAX_INVENTORY_SIZE;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::stats_panel::draw_stats_panel;
use super::{draw_controls, draw_list, draw_message_log, MessageLog, Selection};

pub struct InventoryScreen {
    pub selection: Selection,
}

impl InventoryScreen {
    pub fn new() -> Self {
        Self {
            selection: Selection::default(),
        }
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
                Constraint::Min(0),    // Main content
                Constraint::Length(2), // Controls
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Items
                Constraint::Length(5), // Selected item
            ])
            .split(columns[0]);

        let items: Vec<String> = character
            .inventory
            .iter()
            .map(|item_id| match catalog.items.get(item_id) {
                Some(item) => format!("{} [{}] {}", item.name, item.item_type.name(), item.effect),
                None => format!("{} [unknown]", item_id),
            })
            .collect();
        let title = format!(
            "Inventory ({}/{})",
            character.inventory.len(),
            MAX_INVENTORY_SIZE
        );
        draw_list(
            f,
            left[0],
            &title,
            &items,
            self.selection.index,
            "Your pack is empty.",
        );

        let description = self
            .selected_item(character)
            .and_then(|item_id| catalog.items.get(item_id))
            .map(|item| {
                vec![
                    Line::from(item.description.clone()),
                    Line::from(format!("Sells for {} gold", item.sell_price())),
                ]
            })
            .unwrap_or_default();
        let details = Paragraph::new(description)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Item"));
        f.render_widget(details, left[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(17), Constraint::Length(6)])
            .split(columns[1]);
        draw_stats_panel(f, right[0], character);
        draw_message_log(f, right[1], log);

        draw_controls(
            f,
            rows[1],
            "[U] Use  [E] Equip  [D] Drop  [W] Unequip weapon  [A] Unequip armor  [Esc] Back",
        );
    }

    pub fn move_up(&mut self) {
        self.selection.up();
    }

    pub fn move_down(&mut self, character: &Character) {
        self.selection.down(character.inventory.len());
    }

    /// Keeps the cursor on a valid slot after the inventory shrinks.
    pub fn refresh(&mut self, character: &Character) {
        self.selection.clamp(character.inventory.len());
    }

    pub fn selected_item<'a>(&self, character: &'a Character) -> Option<&'a str> {
        character
            .inventory
            .get(self.selection.index)
            .map(String::as_str)
    }
}
