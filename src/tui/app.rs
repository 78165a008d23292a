// src/tui/app.rs

use ratatui::widgets::ListState;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, Level as TracingLevel};

use crossterm::event::{KeyCode, KeyModifiers};

use crate::api::OffersClient;
use crate::config::Config;
use crate::offer::{Kind, Level, Offer, SortKey};
use crate::store::OfferStore;

use super::theme::AppTheme;

// Define different views for the TUI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Offers,
    Logs,
}

impl AppView {
    pub fn next(&self) -> Self {
        match self {
            Self::Offers => Self::Logs,
            Self::Logs => Self::Offers,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Offers => Self::Logs,
            Self::Logs => Self::Offers,
        }
    }
}

// Define input modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Which pane of the offers view owns Up/Down and the toggle key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusPane {
    List,
    Filters,
}

/// Where the single fetch currently stands. `Failed` after a reload keeps
/// the previous list on screen; the error shows in the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

// One row of the filter sidebar, in render order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterRow {
    Level(Level),
    Kind(Kind),
    Price,
    Sort(SortKey),
}

/// Sidebar rows top to bottom: levels, kinds, the price ceiling, then the
/// sort radios. The widget and the key handler both rely on this order.
pub fn filter_rows() -> Vec<FilterRow> {
    let mut rows: Vec<FilterRow> = Level::ALL.iter().copied().map(FilterRow::Level).collect();
    rows.extend(Kind::ALL.iter().copied().map(FilterRow::Kind));
    rows.push(FilterRow::Price);
    rows.extend(SortKey::SELECTABLE.iter().copied().map(FilterRow::Sort));
    rows
}

// TUI log entries mirrored from the tracing pipeline
#[derive(Clone, Debug)]
pub struct UILogEntry {
    pub timestamp: String, // Formatted in the tracing layer
    pub level: TracingLevel,
    pub target: String,
    pub message: String,
}

// App-level events so async work finishes on the event loop
#[derive(Clone, Debug)]
pub enum AppEvent {
    FetchOffers,
    OffersFetched(Result<Vec<Offer>, String>),
}

pub struct App {
    pub should_quit: bool,
    pub config: Arc<Config>,
    pub theme: Arc<AppTheme>,

    pub client: OffersClient,
    pub store: OfferStore,
    pub load_state: LoadState,

    pub active_view: AppView,
    pub focus: FocusPane,
    pub input_mode: InputMode,

    pub offer_list_state: ListState,
    pub filter_cursor: usize,

    pub search_input: String,
    pub search_cursor_idx: usize, // In chars, not bytes

    pub log_entries: Vec<UILogEntry>,
    pub log_list_state: ListState,
    pub log_receiver: Option<mpsc::UnboundedReceiver<UILogEntry>>,

    // Channel for sending async results back to the event loop
    pub event_sender: mpsc::UnboundedSender<AppEvent>,
    pub event_receiver: Option<mpsc::UnboundedReceiver<AppEvent>>,

    pub show_keybindings_modal: bool,
    pub keybinding_map: HashMap<String, (KeyCode, KeyModifiers)>,
}

impl App {
    pub fn new(
        config: Arc<Config>,
        client: OffersClient,
        log_receiver: mpsc::UnboundedReceiver<UILogEntry>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();

        let store = OfferStore::new(
            config.interface.price_ceiling,
            SortKey::parse_lenient(&config.interface.default_sort),
        );
        let keybinding_map = parse_keybindings(&config.keybindings);

        Self {
            should_quit: false,
            config,
            theme: Arc::new(AppTheme::default()),
            client,
            store,
            load_state: LoadState::Loading,
            active_view: AppView::Offers,
            focus: FocusPane::List,
            input_mode: InputMode::Normal,
            offer_list_state: ListState::default(),
            filter_cursor: 0,
            search_input: String::new(),
            search_cursor_idx: 0,
            log_entries: Vec::new(),
            log_list_state: ListState::default(),
            log_receiver: Some(log_receiver),
            event_sender: event_tx,
            event_receiver: Some(event_rx),
            show_keybindings_modal: false,
            keybinding_map,
        }
    }

    pub fn tick(&mut self) {
        // Redraw-only tick; the clock in the status bar picks it up.
    }

    /// Queues a fetch. The event loop marks the load state and spawns the
    /// actual request.
    pub fn request_reload(&self) {
        let _ = self.event_sender.send(AppEvent::FetchOffers);
    }

    pub fn on_offers_fetched(&mut self, result: Result<Vec<Offer>, String>) {
        match result {
            Ok(offers) => {
                info!("Loaded {} offers from the feed", offers.len());
                self.store.load(offers);
                self.load_state = LoadState::Ready;
                if self.offer_list_state.selected().is_none() && !self.store.derived().is_empty() {
                    self.offer_list_state.select(Some(0));
                }
                self.clamp_offer_selection();
            }
            Err(message) => {
                error!("Failed to fetch offers: {}", message);
                self.load_state = LoadState::Failed(message);
            }
        }
    }

    /// Pushes the live search text into the store and re-clamps the
    /// selection against the new derived list.
    pub fn apply_search(&mut self) {
        self.store.set_search_text(self.search_input.clone());
        self.clamp_offer_selection();
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.search_cursor_idx = 0;
        self.apply_search();
    }

    /// Acts on the filter row under the cursor: toggle a checkbox or pick a
    /// sort radio. The price row is adjusted with Left/Right instead.
    pub fn activate_filter_row(&mut self) {
        match filter_rows().get(self.filter_cursor) {
            Some(FilterRow::Level(level)) => self.store.toggle_level(*level),
            Some(FilterRow::Kind(kind)) => self.store.toggle_kind(*kind),
            Some(FilterRow::Sort(sort_key)) => self.store.set_sort_key(*sort_key),
            Some(FilterRow::Price) | None => return,
        }
        self.clamp_offer_selection();
    }

    /// Moves the price ceiling by `steps` increments of the configured step,
    /// when the cursor sits on the price row.
    pub fn adjust_price(&mut self, steps: f64) {
        if !matches!(filter_rows().get(self.filter_cursor), Some(FilterRow::Price)) {
            return;
        }
        let next = self.store.criteria().max_price + steps * self.config.interface.price_step;
        self.store.set_max_price(next);
        self.clamp_offer_selection();
    }

    /// Keeps the highlighted offer inside the derived list after any
    /// recompute shrinks or empties it.
    pub fn clamp_offer_selection(&mut self) {
        let len = self.store.derived().len();
        if len == 0 {
            self.offer_list_state.select(None);
        } else {
            let idx = self.offer_list_state.selected().unwrap_or(0).min(len - 1);
            self.offer_list_state.select(Some(idx));
        }
    }

    pub fn select_next_offer(&mut self) {
        let len = self.store.derived().len();
        if len == 0 {
            self.offer_list_state.select(None);
            return;
        }
        let i = match self.offer_list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.offer_list_state.select(Some(i));
    }

    pub fn select_previous_offer(&mut self) {
        let len = self.store.derived().len();
        if len == 0 {
            self.offer_list_state.select(None);
            return;
        }
        let i = match self.offer_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.offer_list_state.select(Some(i));
    }

    pub fn selected_offer(&self) -> Option<&Offer> {
        self.offer_list_state
            .selected()
            .and_then(|i| self.store.derived().get(i))
    }

    pub fn filter_next(&mut self) {
        let rows = filter_rows().len();
        self.filter_cursor = (self.filter_cursor + 1) % rows;
    }

    pub fn filter_previous(&mut self) {
        let rows = filter_rows().len();
        self.filter_cursor = (self.filter_cursor + rows - 1) % rows;
    }

    pub fn scroll_logs_up(&mut self) {
        let current_selection = self.log_list_state.selected().unwrap_or(0);
        if current_selection > 0 {
            self.log_list_state.select(Some(current_selection - 1));
        }
    }

    pub fn scroll_logs_down(&mut self) {
        if self.log_entries.is_empty() {
            return;
        }
        let max_index = self.log_entries.len() - 1;
        let current_selection = self.log_list_state.selected().unwrap_or(0);
        if current_selection < max_index {
            self.log_list_state.select(Some(current_selection + 1));
        }
    }
}

/// Byte offset of the `char_idx`-th character, for cursor edits in text that
/// can carry accented characters.
pub fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn parse_keybindings(
    cfg: &crate::config::KeyBindingsConfig,
) -> HashMap<String, (KeyCode, KeyModifiers)> {
    let mut map = HashMap::new();
    macro_rules! insert {
        ($action:expr, $binding:expr) => {
            if let Some((code, mods)) = parse_keybinding(&$binding) {
                map.insert($action.to_string(), (code, mods));
            }
        };
    }
    insert!("quit", cfg.quit);
    insert!("help", cfg.help);
    insert!("search", cfg.search);
    insert!("filters", cfg.filters);
    insert!("sort", cfg.sort);
    insert!("reload", cfg.reload);
    insert!("next_tab", cfg.next_tab);
    insert!("prev_tab", cfg.prev_tab);
    insert!("up", cfg.up);
    insert!("down", cfg.down);
    insert!("enter", cfg.enter);
    insert!("toggle", cfg.toggle);
    map
}

fn parse_keybinding(s: &str) -> Option<(KeyCode, KeyModifiers)> {
    let s = s.trim();
    let mut mods = KeyModifiers::empty();
    let mut key = s;
    if let Some(stripped) = s.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        key = stripped;
    }
    if let Some(stripped) = key.strip_prefix("Alt+") {
        mods |= KeyModifiers::ALT;
        key = stripped;
    }
    if let Some(stripped) = key.strip_prefix("Shift+") {
        mods |= KeyModifiers::SHIFT;
        key = stripped;
    }
    let code = match key.to_lowercase().as_str() {
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };
    Some((code, mods))
}
