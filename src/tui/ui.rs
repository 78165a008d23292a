use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use super::app::{App, AppView};
use super::widgets::{
    filter_panel::FilterPanelWidget, keybindings_modal::KeybindingsModalWidget,
    logs::LogsWidget, offer_list::OfferListWidget, search_bar::SearchBarWidget,
    status_bar::StatusBarWidget,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    let full_area = f.size();

    // Base coat, so cells no widget paints still follow the theme.
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.primary_background)),
        full_area,
    );

    // Status bar on top, content in the middle, search bar at the bottom.
    let main_layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Search bar
        ])
        .split(full_area);

    StatusBarWidget::render(f, app, main_layout_chunks[0]);

    let main_content_area = main_layout_chunks[1];

    match app.active_view {
        AppView::Offers => {
            // Filter sidebar on the left, offer list and details on the right.
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(28), Constraint::Percentage(72)].as_ref())
                .split(main_content_area);
            FilterPanelWidget::render(f, app, content_chunks[0]);
            OfferListWidget::render(f, app, content_chunks[1]);
        }
        AppView::Logs => {
            LogsWidget::render(f, app, main_content_area);
        }
    }

    SearchBarWidget::render(f, app, main_layout_chunks[2]);

    if app.show_keybindings_modal {
        KeybindingsModalWidget::render(f, app, full_area);
    }
}
