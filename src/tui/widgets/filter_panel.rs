use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::{filter_rows, App, FilterRow, FocusPane};

pub struct FilterPanelWidget;

impl FilterPanelWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = &app.theme;

        let border_color = if app.focus == FocusPane::Filters {
            theme.border_focused
        } else {
            theme.border_primary
        };
        let panel_block = Block::default()
            .title(Line::from(Span::styled("Filtros", theme.filter_title)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let content_area = panel_block.inner(area);
        f.render_widget(panel_block, area);

        let criteria = app.store.criteria();
        let ceiling = app.store.price_ceiling();
        let bar_width = usize::from(content_area.width).saturating_sub(2).min(24);

        let mut lines: Vec<Line> = Vec::new();
        for (idx, row) in filter_rows().iter().enumerate() {
            if let Some(heading) = section_heading(idx) {
                if idx > 0 {
                    lines.push(Line::from(""));
                }
                lines.push(Line::from(Span::styled(heading, theme.filter_section)));
            }

            let cursor_here = app.focus == FocusPane::Filters && app.filter_cursor == idx;
            match row {
                FilterRow::Level(level) => {
                    lines.push(marker_line(
                        criteria.levels.contains(level),
                        "[x] ",
                        "[ ] ",
                        level.label(),
                        cursor_here,
                        theme,
                    ));
                }
                FilterRow::Kind(kind) => {
                    lines.push(marker_line(
                        criteria.kinds.contains(kind),
                        "[x] ",
                        "[ ] ",
                        kind.label(),
                        cursor_here,
                        theme,
                    ));
                }
                FilterRow::Price => {
                    let mut value_style = Style::default().fg(theme.primary_foreground);
                    if cursor_here {
                        value_style = value_style.patch(theme.filter_cursor_style);
                    }
                    lines.push(Line::from(Span::styled(
                        format!("R$ 0 - R$ {}", criteria.max_price.round() as i64),
                        value_style,
                    )));
                    let (filled, empty) = price_bar(criteria.max_price, ceiling, bar_width);
                    lines.push(Line::from(vec![
                        Span::styled("█".repeat(filled), Style::default().fg(theme.price_bar_filled)),
                        Span::styled("░".repeat(empty), Style::default().fg(theme.price_bar_empty)),
                    ]));
                }
                FilterRow::Sort(key) => {
                    lines.push(marker_line(
                        criteria.sort_key == *key,
                        "(•) ",
                        "( ) ",
                        key.label(),
                        cursor_here,
                        theme,
                    ));
                }
            }
        }

        f.render_widget(Paragraph::new(Text::from(lines)), content_area);
    }
}

fn marker_line<'a>(
    active: bool,
    active_marker: &'static str,
    inactive_marker: &'static str,
    label: &'static str,
    cursor_here: bool,
    theme: &crate::tui::theme::AppTheme,
) -> Line<'a> {
    let marker = if active { active_marker } else { inactive_marker };
    let mut style = if active {
        Style::default().fg(theme.filter_checked)
    } else {
        Style::default().fg(theme.primary_foreground)
    };
    if cursor_here {
        style = style.patch(theme.filter_cursor_style);
    }
    Line::from(Span::styled(format!("{}{}", marker, label), style))
}

fn section_heading(row_idx: usize) -> Option<&'static str> {
    match row_idx {
        0 => Some("Graduação"),
        3 => Some("Modalidade do curso"),
        5 => Some("Preço da mensalidade"),
        6 => Some("Ordenar"),
        _ => None,
    }
}

/// Splits the price slider into filled and empty cell counts for a bar
/// of `width` cells.
fn price_bar(max_price: f64, ceiling: f64, width: usize) -> (usize, usize) {
    if width == 0 || ceiling <= 0.0 {
        return (0, width);
    }
    let ratio = (max_price / ceiling).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    (filled.min(width), width.saturating_sub(filled.min(width)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_headings_sit_above_their_groups() {
        assert_eq!(section_heading(0), Some("Graduação"));
        assert_eq!(section_heading(3), Some("Modalidade do curso"));
        assert_eq!(section_heading(5), Some("Preço da mensalidade"));
        assert_eq!(section_heading(6), Some("Ordenar"));
        assert_eq!(section_heading(1), None);
        assert_eq!(section_heading(8), None);
    }

    #[test]
    fn price_bar_tracks_the_ratio() {
        assert_eq!(price_bar(700.0, 700.0, 20), (20, 0));
        assert_eq!(price_bar(350.0, 700.0, 20), (10, 10));
        assert_eq!(price_bar(0.0, 700.0, 20), (0, 20));
        // A degenerate ceiling never panics or overflows the bar.
        assert_eq!(price_bar(100.0, 0.0, 20), (0, 20));
        assert_eq!(price_bar(100.0, 700.0, 0), (0, 0));
    }
}
