//! Binary entrypoint for Quest Chronicles.
//!
//! Commands:
//! - `play` (default) - full-screen game
//! - `list` - print saved characters
//! - `validate` - load the quest and item catalogs and report problems
//! - `init` - write the default data files and a starter `config.toml`
mod ui;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};

use quest_chronicles::catalog::{self, Catalog};
use quest_chronicles::character::{Character, CharacterInfo, CharacterManager};
use quest_chronicles::combat::{BattleOutcome, PlayerAction};
use quest_chronicles::config::{default_config_path, GameConfig};
use quest_chronicles::error::GameError;
use quest_chronicles::items::EquipSlot;
use quest_chronicles::quests;
use quest_chronicles::session::GameSession;
use ui::character_creation::CharacterCreationScreen;
use ui::character_delete::{delete_key, CharacterDeleteScreen};
use ui::character_select::CharacterSelectScreen;
use ui::combat_scene::CombatScreen;
use ui::death_screen::draw_death_screen;
use ui::game_menu::{GameMenuScreen, MenuOption};
use ui::inventory_scene::InventoryScreen;
use ui::quest_scene::{QuestScreen, QuestTab};
use ui::shop_scene::{ShopMode, ShopScreen};
use ui::MessageLog;

#[derive(Parser)]
#[command(name = "quest-chronicles")]
#[command(about = "A terminal RPG of quests, loot and turn-based battles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding quests.txt and items.txt (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory holding character saves (overrides the config file)
    #[arg(long, global = true)]
    save_dir: Option<PathBuf>,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Start the full-screen game
    Play,
    /// Print saved characters
    List,
    /// Load and validate the quest and item catalogs
    Validate,
    /// Write default data files and a starter configuration
    Init,
}

enum Screen {
    CharacterSelect,
    CharacterCreation,
    CharacterDelete,
    Game,
    Inventory,
    Quests,
    Shop,
    Combat,
    Death,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = GameConfig::load_or_default(&config_path)?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.save_dir {
        config.save_dir = dir;
    }

    let command = cli.command.unwrap_or(Commands::Play);
    init_logging(
        config.log_file.as_deref(),
        cli.verbose,
        command == Commands::Play,
    );
    log::debug!("Using configuration {:?}", config);

    match command {
        Commands::Play => {
            let catalog = load_catalog(&config)?;
            let manager = CharacterManager::new(&config.save_dir);
            run_game(&config, &catalog, &manager)
        }
        Commands::List => run_list(&config),
        Commands::Validate => run_validate(&config),
        Commands::Init => run_init(&config, &config_path),
    }
}

fn init_logging(log_file: Option<&Path>, verbosity: u8, interactive: bool) {
    let mut builder = env_logger::Builder::new();
    let base_level = match (verbosity, interactive) {
        (0, false) => log::LevelFilter::Warn,
        (0, true) | (1, false) => log::LevelFilter::Info,
        (1, true) | (2, false) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
            record.level(),
            record.args()
        )
    });

    if interactive {
        // stderr would draw over the terminal UI
        let file = log_file.and_then(|path| {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).ok()?;
            }
            OpenOptions::new().create(true).append(true).open(path).ok()
        });
        match file {
            Some(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            None => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    let _ = builder.try_init();
}

/// Loads the catalogs, writing the bundled defaults first if a data file is
/// missing.
fn load_catalog(config: &GameConfig) -> Result<Catalog> {
    match Catalog::load(&config.data_dir) {
        Ok(catalog) => Ok(catalog),
        Err(GameError::MissingDataFile(path)) => {
            log::warn!(
                "{} not found, writing default data files to {}",
                path.display(),
                config.data_dir.display()
            );
            catalog::create_default_data_files(&config.data_dir)?;
            Catalog::load(&config.data_dir).with_context(|| {
                format!("Failed to load game data from {}", config.data_dir.display())
            })
        }
        Err(e) => Err(e).with_context(|| {
            format!("Failed to load game data from {}", config.data_dir.display())
        }),
    }
}

fn run_list(config: &GameConfig) -> Result<()> {
    let manager = CharacterManager::new(&config.save_dir);
    let characters = manager.list_characters()?;
    if characters.is_empty() {
        println!("No saved characters in {}", config.save_dir.display());
        return Ok(());
    }

    println!("{:<18} {:<8} {:>5}  {}", "NAME", "CLASS", "LEVEL", "LAST PLAYED");
    for info in characters {
        if info.is_corrupted {
            println!("{:<18} (corrupted save)", info.filename);
            continue;
        }
        let class = info.class.map(|c| c.name()).unwrap_or("?");
        let last_played = info
            .last_played
            .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{:<18} {:<8} {:>5}  {}",
            info.name, class, info.level, last_played
        );
    }
    Ok(())
}

fn run_validate(config: &GameConfig) -> Result<()> {
    let catalog = Catalog::load(&config.data_dir).with_context(|| {
        format!("Game data in {} is invalid", config.data_dir.display())
    })?;

    println!(
        "{}: {} quests, {} items",
        config.data_dir.display(),
        catalog.quests.len(),
        catalog.items.len()
    );
    for quest in quests::quests_by_level(&catalog.quests, 1, u32::MAX) {
        let chain = quests::prerequisite_chain(&quest.id, &catalog.quests)?;
        println!(
            "  L{:<3} {:<20} {}",
            quest.required_level,
            quest.id,
            chain.join(" -> ")
        );
    }
    for item in catalog.shop_items() {
        println!(
            "  {:>4}g {:<22} {:<10} {}",
            item.cost,
            item.id,
            item.item_type.name(),
            item.effect
        );
    }
    println!("OK");
    Ok(())
}

fn run_init(config: &GameConfig, config_path: &Path) -> Result<()> {
    let created = catalog::create_default_data_files(&config.data_dir)?;
    for path in &created {
        println!("Wrote {}", path.display());
    }
    if created.is_empty() {
        println!("Data files already present in {}", config.data_dir.display());
    }

    fs::create_dir_all(&config.save_dir)
        .with_context(|| format!("Failed to create {}", config.save_dir.display()))?;

    if config_path.exists() {
        println!("Keeping existing config {}", config_path.display());
    } else {
        config.write(config_path)?;
        println!("Wrote {}", config_path.display());
    }
    Ok(())
}

fn report(log: &mut MessageLog, result: Result<String, GameError>) {
    match result {
        Ok(message) => log.info(message),
        Err(e) => log.error(e.to_string()),
    }
}

fn item_name(catalog: &Catalog, item_id: &str) -> String {
    catalog
        .items
        .get(item_id)
        .map(|item| item.name.clone())
        .unwrap_or_else(|| item_id.to_string())
}

fn run_game(config: &GameConfig, catalog: &Catalog, manager: &CharacterManager) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config, catalog, manager);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &GameConfig,
    catalog: &Catalog,
    manager: &CharacterManager,
) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut log = MessageLog::default();

    let characters = manager.list_characters()?;
    let mut current_screen = if characters.is_empty() {
        Screen::CharacterCreation
    } else {
        Screen::CharacterSelect
    };

    // Screen state variables
    let mut creation_screen = CharacterCreationScreen::new();
    let mut select_screen = CharacterSelectScreen::new();
    let mut delete_screen = CharacterDeleteScreen::new();
    let mut menu_screen = GameMenuScreen::new();
    let mut inventory_screen = InventoryScreen::new();
    let mut quest_screen = QuestScreen::new();
    let mut shop_screen = ShopScreen::new();
    let mut combat_screen: Option<CombatScreen> = None;
    let mut delete_target: Option<CharacterInfo> = None;
    let mut session: Option<GameSession> = None;

    loop {
        match current_screen {
            Screen::CharacterCreation => {
                terminal.draw(|f| {
                    let area = f.size();
                    creation_screen.draw(f, area);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Char(c) => {
                                creation_screen.handle_char_input(c);
                            }
                            KeyCode::Backspace => {
                                creation_screen.handle_backspace();
                            }
                            KeyCode::Left => creation_screen.name_input.move_left(),
                            KeyCode::Right => creation_screen.name_input.move_right(),
                            KeyCode::Up => creation_screen.previous_class(),
                            KeyCode::Down => creation_screen.next_class(),
                            KeyCode::Enter => {
                                if creation_screen.is_valid() {
                                    let name = creation_screen.get_name();
                                    if manager.exists(&name) {
                                        creation_screen.validation_error =
                                            Some("A character with that name already exists".to_string());
                                        continue;
                                    }
                                    let character =
                                        Character::new(&name, creation_screen.selected_class());
                                    if let Err(e) = manager.save_character(&character) {
                                        creation_screen.validation_error =
                                            Some(format!("Save failed: {}", e));
                                        continue;
                                    }
                                    log.clear();
                                    log.info(format!(
                                        "Welcome, {} the {}!",
                                        character.name, character.class
                                    ));
                                    session = Some(GameSession::new(character, catalog));
                                    creation_screen = CharacterCreationScreen::new();
                                    menu_screen = GameMenuScreen::new();
                                    current_screen = Screen::Game;
                                }
                            }
                            KeyCode::Esc => {
                                if !manager.list_characters()?.is_empty() {
                                    creation_screen = CharacterCreationScreen::new();
                                    current_screen = Screen::CharacterSelect;
                                } else {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }

            Screen::CharacterSelect => {
                let characters = manager.list_characters()?;
                if characters.is_empty() {
                    current_screen = Screen::CharacterCreation;
                    continue;
                }
                select_screen.selection.clamp(characters.len());

                terminal.draw(|f| {
                    let area = f.size();
                    select_screen.draw(f, area, &characters, &log);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Up => select_screen.move_up(),
                            KeyCode::Down => select_screen.move_down(&characters),
                            KeyCode::Enter => {
                                let Some(selected) = select_screen.get_selected_character(&characters)
                                else {
                                    continue;
                                };
                                if selected.is_corrupted {
                                    log.error(format!("{} cannot be loaded", selected.filename));
                                    continue;
                                }
                                match manager.load_character(&selected.name) {
                                    Ok(character) => {
                                        log.clear();
                                        log.info(format!("Welcome back, {}.", character.name));
                                        let loaded = GameSession::new(character, catalog);
                                        current_screen = if loaded.is_dead() {
                                            Screen::Death
                                        } else {
                                            Screen::Game
                                        };
                                        session = Some(loaded);
                                        menu_screen = GameMenuScreen::new();
                                    }
                                    Err(e) => log.error(format!("Failed to load: {}", e)),
                                }
                            }
                            KeyCode::Char('n') | KeyCode::Char('N') => {
                                creation_screen = CharacterCreationScreen::new();
                                current_screen = Screen::CharacterCreation;
                            }
                            KeyCode::Char('d') | KeyCode::Char('D') => {
                                if let Some(selected) =
                                    select_screen.get_selected_character(&characters)
                                {
                                    delete_target = Some(selected.clone());
                                    delete_screen.reset();
                                    current_screen = Screen::CharacterDelete;
                                }
                            }
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                            _ => {}
                        }
                    }
                }
            }

            Screen::CharacterDelete => {
                let Some(target) = delete_target.as_ref() else {
                    current_screen = Screen::CharacterSelect;
                    continue;
                };

                terminal.draw(|f| {
                    let area = f.size();
                    delete_screen.draw(f, area, target);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Char(c) => delete_screen.handle_char_input(c),
                            KeyCode::Backspace => delete_screen.handle_backspace(),
                            KeyCode::Left => delete_screen.confirmation.move_left(),
                            KeyCode::Right => delete_screen.confirmation.move_right(),
                            KeyCode::Enter => {
                                let key = delete_key(target);
                                if delete_screen.is_confirmed(&key) {
                                    report(
                                        &mut log,
                                        manager
                                            .delete_character(&key)
                                            .map(|_| format!("Deleted {}", key)),
                                    );
                                    delete_target = None;
                                    delete_screen.reset();
                                    current_screen = Screen::CharacterSelect;
                                }
                            }
                            KeyCode::Esc => {
                                delete_target = None;
                                delete_screen.reset();
                                current_screen = Screen::CharacterSelect;
                            }
                            _ => {}
                        }
                    }
                }
            }

            Screen::Game => {
                let Some(game) = session.as_mut() else {
                    current_screen = Screen::CharacterSelect;
                    continue;
                };

                terminal.draw(|f| {
                    let area = f.size();
                    menu_screen.draw(f, area, game.character(), &log);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        let choice = match key_event.code {
                            KeyCode::Up => {
                                menu_screen.move_up();
                                None
                            }
                            KeyCode::Down => {
                                menu_screen.move_down();
                                None
                            }
                            KeyCode::Enter => Some(menu_screen.selected()),
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                Some(MenuOption::SaveAndQuit)
                            }
                            _ => None,
                        };

                        match choice {
                            Some(MenuOption::Explore) => match game.explore() {
                                Ok(battle) => {
                                    combat_screen = Some(CombatScreen::new(battle.enemy.clone()));
                                    current_screen = Screen::Combat;
                                }
                                Err(e) => log.error(e.to_string()),
                            },
                            Some(MenuOption::Inventory) => {
                                inventory_screen.refresh(game.character());
                                current_screen = Screen::Inventory;
                            }
                            Some(MenuOption::Quests) => {
                                quest_screen.refresh(game.character(), &catalog.quests);
                                current_screen = Screen::Quests;
                            }
                            Some(MenuOption::Shop) => {
                                shop_screen.refresh(game.character(), catalog);
                                current_screen = Screen::Shop;
                            }
                            Some(MenuOption::Save) => report(
                                &mut log,
                                game.save(manager)
                                    .map(|path| format!("Saved to {}", path.display())),
                            ),
                            Some(MenuOption::SaveAndQuit) => match game.save(manager) {
                                Ok(_) => {
                                    log.clear();
                                    log.info(format!("Saved {}.", game.character().name));
                                    session = None;
                                    current_screen = Screen::CharacterSelect;
                                }
                                Err(e) => log.error(format!("Save failed: {}", e)),
                            },
                            None => {}
                        }
                    }
                }
            }

            Screen::Inventory => {
                let Some(game) = session.as_mut() else {
                    current_screen = Screen::CharacterSelect;
                    continue;
                };

                terminal.draw(|f| {
                    let area = f.size();
                    inventory_screen.draw(f, area, game.character(), catalog, &log);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        let selected = inventory_screen
                            .selected_item(game.character())
                            .map(str::to_string);
                        match (key_event.code, selected) {
                            (KeyCode::Up, _) => inventory_screen.move_up(),
                            (KeyCode::Down, _) => inventory_screen.move_down(game.character()),
                            (KeyCode::Char('u'), Some(item_id)) => {
                                let name = item_name(catalog, &item_id);
                                report(
                                    &mut log,
                                    game.use_item(&item_id).map(|_| format!("Used {}", name)),
                                );
                            }
                            (KeyCode::Char('e'), Some(item_id)) => {
                                let name = item_name(catalog, &item_id);
                                report(
                                    &mut log,
                                    game.equip_item(&item_id).map(|replaced| match replaced {
                                        Some(old) => format!(
                                            "Equipped {}, {} returned to your pack",
                                            name,
                                            item_name(catalog, &old)
                                        ),
                                        None => format!("Equipped {}", name),
                                    }),
                                );
                            }
                            (KeyCode::Char('d'), Some(item_id)) => {
                                let name = item_name(catalog, &item_id);
                                report(
                                    &mut log,
                                    game.drop_item(&item_id).map(|_| format!("Dropped {}", name)),
                                );
                            }
                            (KeyCode::Char('w'), _) | (KeyCode::Char('a'), _) => {
                                let slot = if key_event.code == KeyCode::Char('w') {
                                    EquipSlot::Weapon
                                } else {
                                    EquipSlot::Armor
                                };
                                report(
                                    &mut log,
                                    game.unequip(slot).map(|removed| match removed {
                                        Some(item_id) => {
                                            format!("Unequipped {}", item_name(catalog, &item_id))
                                        }
                                        None => format!("Nothing equipped as {}", slot.name()),
                                    }),
                                );
                            }
                            (KeyCode::Esc, _) => current_screen = Screen::Game,
                            _ => {}
                        }
                        inventory_screen.refresh(game.character());
                    }
                }
            }

            Screen::Quests => {
                let Some(game) = session.as_mut() else {
                    current_screen = Screen::CharacterSelect;
                    continue;
                };

                terminal.draw(|f| {
                    let area = f.size();
                    quest_screen.draw(f, area, game.character(), &catalog.quests, &log);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        let selected = quest_screen
                            .selected_quest(game.character(), &catalog.quests)
                            .cloned();
                        match (key_event.code, quest_screen.tab, selected) {
                            (KeyCode::Tab, _, _) | (KeyCode::Right, _, _) => {
                                quest_screen.next_tab()
                            }
                            (KeyCode::Up, _, _) => quest_screen.move_up(),
                            (KeyCode::Down, _, _) => {
                                quest_screen.move_down(game.character(), &catalog.quests)
                            }
                            (KeyCode::Char('a'), QuestTab::Available, Some(quest)) => report(
                                &mut log,
                                game.accept_quest(&quest.id)
                                    .map(|_| format!("Accepted: {}", quest.title)),
                            ),
                            (KeyCode::Char('c'), QuestTab::Active, Some(quest)) => {
                                let level = game.character().level;
                                report(
                                    &mut log,
                                    game.complete_quest(&quest.id).map(|reward| {
                                        format!(
                                            "Completed {}: +{} xp, +{} gold",
                                            quest.title, reward.xp, reward.gold
                                        )
                                    }),
                                );
                                if game.character().level > level {
                                    log.info(format!(
                                        "Level up! You are now level {}",
                                        game.character().level
                                    ));
                                }
                            }
                            (KeyCode::Char('x'), QuestTab::Active, Some(quest)) => report(
                                &mut log,
                                game.abandon_quest(&quest.id)
                                    .map(|_| format!("Abandoned: {}", quest.title)),
                            ),
                            (KeyCode::Esc, _, _) => current_screen = Screen::Game,
                            _ => {}
                        }
                        quest_screen.refresh(game.character(), &catalog.quests);
                    }
                }
            }

            Screen::Shop => {
                let Some(game) = session.as_mut() else {
                    current_screen = Screen::CharacterSelect;
                    continue;
                };

                terminal.draw(|f| {
                    let area = f.size();
                    shop_screen.draw(f, area, game.character(), catalog, &log);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Tab => shop_screen.toggle_mode(),
                            KeyCode::Up => shop_screen.move_up(),
                            KeyCode::Down => shop_screen.move_down(game.character(), catalog),
                            KeyCode::Enter => {
                                if let Some(item_id) =
                                    shop_screen.selected_item(game.character(), catalog)
                                {
                                    let name = item_name(catalog, &item_id);
                                    let result = match shop_screen.mode {
                                        ShopMode::Buy => game
                                            .buy_item(&item_id)
                                            .map(|_| format!("Bought {}", name)),
                                        ShopMode::Sell => game
                                            .sell_item(&item_id)
                                            .map(|price| format!("Sold {} for {} gold", name, price)),
                                    };
                                    report(&mut log, result);
                                }
                            }
                            KeyCode::Esc => current_screen = Screen::Game,
                            _ => {}
                        }
                        shop_screen.refresh(game.character(), catalog);
                    }
                }
            }

            Screen::Combat => {
                let (Some(game), Some(combat)) = (session.as_mut(), combat_screen.as_mut()) else {
                    current_screen = Screen::Game;
                    continue;
                };

                terminal.draw(|f| {
                    let area = f.size();
                    combat.draw(f, area, game.character());
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        if combat.is_finished() {
                            if matches!(
                                key_event.code,
                                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')
                            ) {
                                combat_screen = None;
                                current_screen = if game.is_dead() {
                                    Screen::Death
                                } else {
                                    Screen::Game
                                };
                            }
                            continue;
                        }

                        let action = match key_event.code {
                            KeyCode::Char('a') | KeyCode::Char('A') => PlayerAction::Attack,
                            KeyCode::Char('s') | KeyCode::Char('S') => PlayerAction::Special,
                            KeyCode::Char('r') | KeyCode::Char('R') => PlayerAction::Escape,
                            _ => continue,
                        };

                        match game.battle_turn(action, &mut rng) {
                            Ok(summary) => {
                                combat.record(&summary, game.battle().map(|battle| &battle.enemy));
                                match summary.outcome {
                                    Some(BattleOutcome::Victory(reward)) => {
                                        log.info(format!(
                                            "Defeated the {}: +{} xp, +{} gold",
                                            combat.enemy.name, reward.xp, reward.gold
                                        ));
                                        if summary.levels_gained > 0 {
                                            log.info(format!(
                                                "Level up! You are now level {}",
                                                game.character().level
                                            ));
                                        }
                                    }
                                    Some(BattleOutcome::Escaped) => {
                                        log.info(format!("Escaped from the {}", combat.enemy.name))
                                    }
                                    Some(BattleOutcome::Defeat) => {
                                        log.error(format!("Defeated by the {}", combat.enemy.name))
                                    }
                                    None => {}
                                }
                            }
                            Err(e) => log.error(e.to_string()),
                        }
                    }
                }
            }

            Screen::Death => {
                let Some(game) = session.as_mut() else {
                    current_screen = Screen::CharacterSelect;
                    continue;
                };

                terminal.draw(|f| {
                    let area = f.size();
                    draw_death_screen(f, area, game.character(), config.revive_cost);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                match game.revive_for_gold(config.revive_cost) {
                                    Ok(_) => {
                                        log.info(format!(
                                            "Revived with {} health",
                                            game.character().health
                                        ));
                                        current_screen = Screen::Game;
                                    }
                                    Err(e) => log.error(e.to_string()),
                                }
                            }
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                // Progress since the last save is lost
                                log::info!("{} gave up", game.character().name);
                                log.clear();
                                log.info(format!("{} has fallen.", game.character().name));
                                session = None;
                                current_screen = Screen::CharacterSelect;
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
