use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use tracing::Level;

use crate::tui::app::App;

pub struct LogsWidget;

impl LogsWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = &app.theme;

        let log_items: Vec<ListItem> = app
            .log_entries
            .iter()
            .map(|log_entry| {
                let level_style = match log_entry.level {
                    Level::ERROR => theme.log_level_error,
                    Level::WARN => theme.log_level_warn,
                    Level::INFO => theme.log_level_info,
                    Level::DEBUG => theme.log_level_debug,
                    Level::TRACE => theme.log_level_trace,
                };

                let timestamp_span = Span::styled(
                    format!("{} ", log_entry.timestamp),
                    theme.log_timestamp,
                );
                let level_span = Span::styled(
                    format!("{:<5} ", log_entry.level.as_str()),
                    level_style.add_modifier(Modifier::BOLD),
                );
                let target_span =
                    Span::styled(format!("[{}] ", log_entry.target), theme.log_target);
                let message_span = Span::raw(log_entry.message.clone());

                let line = Line::from(vec![timestamp_span, level_span, target_span, message_span]);
                ListItem::new(line)
            })
            .collect();

        let logs_block = Block::default()
            .title(Line::from(Span::styled("Logs", theme.log_title)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary));

        if log_items.is_empty() {
            let placeholder = Paragraph::new("No log entries yet.")
                .block(logs_block)
                .style(Style::default().fg(theme.secondary_foreground));
            f.render_widget(placeholder, area);
        } else {
            let log_list = List::new(log_items)
                .block(logs_block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");

            f.render_stateful_widget(log_list, area, &mut app.log_list_state);
        }
    }
}
