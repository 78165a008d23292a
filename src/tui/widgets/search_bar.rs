use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{byte_index, App, InputMode};

pub struct SearchBarWidget;

impl SearchBarWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = &app.theme;

        let (title, content) = match app.input_mode {
            InputMode::Search => (
                "Busca (Enter confirma, Esc limpa)",
                Line::from(Span::styled(
                    app.search_input.clone(),
                    Style::default().fg(theme.search_bar_text_fg),
                )),
            ),
            InputMode::Normal => {
                let active_search = &app.store.criteria().search_text;
                if active_search.is_empty() {
                    (
                        "Busca (/)",
                        Line::from(Span::styled(
                            "Busque o curso ideal para você",
                            theme.search_bar_placeholder,
                        )),
                    )
                } else {
                    (
                        "Busca (/)",
                        Line::from(Span::styled(
                            active_search.clone(),
                            Style::default().fg(theme.search_bar_text_fg),
                        )),
                    )
                }
            }
        };

        let search_paragraph = Paragraph::new(content)
            .style(Style::default().bg(theme.search_bar_background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(theme.search_bar_border)),
            );
        f.render_widget(search_paragraph, area);

        if app.input_mode == InputMode::Search {
            // Cursor position is measured in display columns, not chars,
            // so accented input keeps the cursor aligned.
            let prefix =
                &app.search_input[..byte_index(&app.search_input, app.search_cursor_idx)];
            let inner_width = area.width.saturating_sub(2);
            f.set_cursor(area.x + 1 + cursor_offset(prefix, inner_width), area.y + 1);
        }
    }
}

/// Display-column offset of the cursor, clamped to the bar's inner width.
/// The clamp happens in `usize`, before the cast can truncate.
fn cursor_offset(prefix: &str, inner_width: u16) -> u16 {
    prefix.width().min(usize::from(inner_width)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_inside_the_bar() {
        assert_eq!(cursor_offset("curso", 20), 5);
        // Double-width characters count as two columns.
        assert_eq!(cursor_offset("日本語", 20), 6);
        // Wider than the bar: pinned at the inner edge, not past the border.
        assert_eq!(cursor_offset(&"x".repeat(300), 20), 20);
        assert_eq!(cursor_offset("abc", 0), 0);
    }
}
