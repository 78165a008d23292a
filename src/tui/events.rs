// src/tui/events.rs

use anyhow::{Context, Result};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;

use super::app::{byte_index, filter_rows, App, AppEvent, AppView, FilterRow, FocusPane, InputMode, LoadState};
use super::ui::ui;

pub async fn run_app_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
) -> Result<()> {
    let mut event_receiver = app
        .event_receiver
        .take()
        .context("App event receiver was already taken")?;
    let mut crossterm_events = EventStream::new();

    // Kick off the one startup fetch; reloads go through the same event.
    let _ = app.event_sender.send(AppEvent::FetchOffers);

    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        // --- Log Handling ---
        if let Some(ref mut receiver) = app.log_receiver {
            while let Ok(log_entry) = receiver.try_recv() {
                app.log_entries.push(log_entry);
            }
        }
        let max_logs = 1000;
        if app.log_entries.len() > max_logs {
            let overflow = app.log_entries.len() - max_logs;
            app.log_entries.drain(0..overflow);
        }
        if app.active_view == AppView::Logs {
            let is_scrolled_to_bottom = match app.log_list_state.selected() {
                Some(index) => index >= app.log_entries.len().saturating_sub(1),
                None => true,
            };
            if is_scrolled_to_bottom && !app.log_entries.is_empty() {
                app.log_list_state.select(Some(app.log_entries.len() - 1));
            }
        }

        let tick_duration = Duration::from_millis(app.config.interface.refresh_interval_ms);

        tokio::select! {
            // Handle app events from the channel
            Some(event) = event_receiver.recv() => {
                match event {
                    AppEvent::FetchOffers => {
                        app.load_state = LoadState::Loading;
                        let client = app.client.clone();
                        let sender = app.event_sender.clone();
                        tokio::spawn(async move {
                            let result = client
                                .fetch_offers()
                                .await
                                .map_err(|e| e.to_string());
                            let _ = sender.send(AppEvent::OffersFetched(result));
                        });
                    }
                    AppEvent::OffersFetched(result) => {
                        app.on_offers_fetched(result);
                    }
                }
            }

            // Handle terminal events
            Some(Ok(event)) = crossterm_events.next() => {
                match event {
                    CrosstermEvent::Key(key) => on_key(&mut app, key),
                    CrosstermEvent::Mouse(mouse) => on_mouse_event(&mut app, mouse),
                    _ => {}
                }
            }

            // Tick so the clock and the loading indicator stay fresh
            _ = tokio::time::sleep(tick_duration) => {
                app.tick();
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn on_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => match app.active_view {
            AppView::Offers => match app.focus {
                FocusPane::List => app.select_previous_offer(),
                FocusPane::Filters => app.filter_previous(),
            },
            AppView::Logs => app.scroll_logs_up(),
        },
        MouseEventKind::ScrollDown => match app.active_view {
            AppView::Offers => match app.focus {
                FocusPane::List => app.select_next_offer(),
                FocusPane::Filters => app.filter_next(),
            },
            AppView::Logs => app.scroll_logs_down(),
        },
        _ => {}
    }
}

fn key_matches(app: &App, action: &str, key_event: &KeyEvent) -> bool {
    if let Some((code, mods)) = app.keybinding_map.get(action) {
        key_event.code == *code && key_event.modifiers == *mods
    } else {
        false
    }
}

pub fn on_key(app: &mut App, key_event: KeyEvent) {
    if app.show_keybindings_modal {
        if key_matches(app, "help", &key_event) || key_event.code == KeyCode::Esc {
            app.show_keybindings_modal = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode_key(app, key_event),
        InputMode::Search => handle_search_mode_key(app, key_event),
    }
}

fn handle_normal_mode_key(app: &mut App, key_event: KeyEvent) {
    if key_matches(app, "quit", &key_event) {
        app.should_quit = true;
    } else if key_matches(app, "help", &key_event) {
        app.show_keybindings_modal = true;
    } else if key_matches(app, "next_tab", &key_event) {
        app.active_view = app.active_view.next();
    } else if key_matches(app, "prev_tab", &key_event) {
        app.active_view = app.active_view.previous();
    } else if key_matches(app, "search", &key_event) {
        app.active_view = AppView::Offers;
        app.input_mode = InputMode::Search;
        app.search_cursor_idx = app.search_input.chars().count();
    } else if key_matches(app, "reload", &key_event) {
        app.request_reload();
    } else if key_matches(app, "filters", &key_event) {
        if app.active_view == AppView::Offers {
            app.focus = match app.focus {
                FocusPane::List => FocusPane::Filters,
                FocusPane::Filters => FocusPane::List,
            };
        }
    } else if key_matches(app, "sort", &key_event) {
        // Jump the sidebar cursor straight to the sort radios.
        if app.active_view == AppView::Offers {
            app.focus = FocusPane::Filters;
            if let Some(idx) = filter_rows()
                .iter()
                .position(|row| matches!(row, FilterRow::Sort(_)))
            {
                app.filter_cursor = idx;
            }
        }
    } else if key_matches(app, "down", &key_event) || key_event.code == KeyCode::Char('j') {
        match app.active_view {
            AppView::Offers => match app.focus {
                FocusPane::List => app.select_next_offer(),
                FocusPane::Filters => app.filter_next(),
            },
            AppView::Logs => app.scroll_logs_down(),
        }
    } else if key_matches(app, "up", &key_event) || key_event.code == KeyCode::Char('k') {
        match app.active_view {
            AppView::Offers => match app.focus {
                FocusPane::List => app.select_previous_offer(),
                FocusPane::Filters => app.filter_previous(),
            },
            AppView::Logs => app.scroll_logs_up(),
        }
    } else if key_matches(app, "toggle", &key_event) || key_matches(app, "enter", &key_event) {
        if app.active_view == AppView::Offers && app.focus == FocusPane::Filters {
            app.activate_filter_row();
        }
    } else if key_event.code == KeyCode::Left || key_event.code == KeyCode::Char('h') {
        if app.active_view == AppView::Offers && app.focus == FocusPane::Filters {
            app.adjust_price(-1.0);
        }
    } else if key_event.code == KeyCode::Right || key_event.code == KeyCode::Char('l') {
        if app.active_view == AppView::Offers && app.focus == FocusPane::Filters {
            app.adjust_price(1.0);
        }
    } else if key_event.code == KeyCode::Esc {
        if app.active_view == AppView::Offers && app.focus == FocusPane::Filters {
            app.focus = FocusPane::List;
        }
    }
}

// Search edits recompute the derived list on every keystroke. Enter keeps
// the text and returns to Normal mode; Esc clears it first.
fn handle_search_mode_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.clear_search();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) => {
            let at = byte_index(&app.search_input, app.search_cursor_idx);
            app.search_input.insert(at, c);
            app.search_cursor_idx += 1;
            app.apply_search();
        }
        KeyCode::Backspace => {
            if app.search_cursor_idx > 0 {
                app.search_cursor_idx -= 1;
                let at = byte_index(&app.search_input, app.search_cursor_idx);
                app.search_input.remove(at);
                app.apply_search();
            }
        }
        KeyCode::Left => {
            if app.search_cursor_idx > 0 {
                app.search_cursor_idx -= 1;
            }
        }
        KeyCode::Right => {
            if app.search_cursor_idx < app.search_input.chars().count() {
                app.search_cursor_idx += 1;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OffersClient;
    use crate::config::Config;
    use crate::offer::{Kind, Level, Offer};
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let config = Arc::new(Config::default());
        let client = OffersClient::new(&config, None);
        let (_log_tx, log_rx) = mpsc::unbounded_channel();
        let mut app = App::new(config, client, log_rx);
        app.on_offers_fetched(Ok(vec![
            offer("a", "Administração", 100.0),
            offer("b", "Biomedicina", 50.0),
        ]));
        app
    }

    fn offer(id: &str, name: &str, price: f64) -> Offer {
        Offer {
            id: id.to_string(),
            course_name: name.to_string(),
            rating: 4.0,
            full_price: price * 2.0,
            offered_price: price,
            kind: Kind::Presencial,
            level: Level::Bacharelado,
            ies_logo: String::new(),
            ies_name: "IES".to_string(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn search_types_live_and_esc_clears() {
        let mut app = test_app();
        on_key(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Search);

        on_key(&mut app, key(KeyCode::Char('b')));
        assert_eq!(app.store.derived().len(), 1);
        assert_eq!(app.store.criteria().search_text, "b");

        on_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.criteria().search_text, "");
        assert_eq!(app.store.derived().len(), 2);
    }

    #[test]
    fn enter_keeps_the_search_text() {
        let mut app = test_app();
        on_key(&mut app, key(KeyCode::Char('/')));
        on_key(&mut app, key(KeyCode::Char('b')));
        on_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.criteria().search_text, "b");
        assert_eq!(app.store.derived().len(), 1);
    }

    #[test]
    fn backspace_edits_reapply_the_filter() {
        let mut app = test_app();
        on_key(&mut app, key(KeyCode::Char('/')));
        for c in "bio".chars() {
            on_key(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.store.derived().len(), 1);
        on_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.store.criteria().search_text, "bi");
    }

    #[test]
    fn filters_key_moves_focus_and_space_toggles() {
        let mut app = test_app();
        on_key(&mut app, key(KeyCode::Char('f')));
        assert_eq!(app.focus, FocusPane::Filters);

        // Cursor starts on the Bacharelado checkbox; Space restricts to it.
        on_key(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.store.derived().len(), 2); // Both sample offers are bacharelado
        assert_eq!(app.store.criteria().levels.len(), 1);

        on_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.focus, FocusPane::List);
    }

    #[test]
    fn sort_key_jumps_to_the_radio_rows() {
        let mut app = test_app();
        on_key(&mut app, key(KeyCode::Char('s')));
        assert_eq!(app.focus, FocusPane::Filters);
        assert!(matches!(
            filter_rows()[app.filter_cursor],
            FilterRow::Sort(_)
        ));
    }

    #[test]
    fn quit_and_tab_keys_behave() {
        let mut app = test_app();
        on_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.active_view, AppView::Logs);
        on_key(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.active_view, AppView::Offers);
        on_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn help_modal_swallows_keys_until_closed() {
        let mut app = test_app();
        on_key(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_keybindings_modal);
        // 'q' must not quit while the modal is up.
        on_key(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        on_key(&mut app, key(KeyCode::Esc));
        assert!(!app.show_keybindings_modal);
    }
}
