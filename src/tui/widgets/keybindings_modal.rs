use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub struct KeybindingsModalWidget;

impl KeybindingsModalWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let popup_area = Rect {
            x: area.x + area.width / 4,
            y: area.y + area.height / 4,
            width: area.width / 2,
            height: area.height / 2,
        };
        f.render_widget(Clear, popup_area);
        let block = Block::default()
            .title("Keybindings")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.popup_border))
            .style(
                Style::default()
                    .fg(theme.primary_foreground)
                    .bg(theme.popup_background),
            )
            .title_alignment(Alignment::Center);
        f.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);
        let kb = &app.config.keybindings;
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(vec![Span::styled("Quit: ", bold), Span::raw(&kb.quit)]),
            Line::from(vec![Span::styled("Help: ", bold), Span::raw(&kb.help)]),
            Line::from(vec![Span::styled("Search: ", bold), Span::raw(&kb.search)]),
            Line::from(vec![Span::styled("Filters: ", bold), Span::raw(&kb.filters)]),
            Line::from(vec![Span::styled("Sort: ", bold), Span::raw(&kb.sort)]),
            Line::from(vec![Span::styled("Reload: ", bold), Span::raw(&kb.reload)]),
            Line::from(vec![Span::styled("Next Tab: ", bold), Span::raw(&kb.next_tab)]),
            Line::from(vec![Span::styled("Prev Tab: ", bold), Span::raw(&kb.prev_tab)]),
            Line::from(vec![Span::styled("Up: ", bold), Span::raw(&kb.up)]),
            Line::from(vec![Span::styled("Down: ", bold), Span::raw(&kb.down)]),
            Line::from(vec![Span::styled("Enter: ", bold), Span::raw(&kb.enter)]),
            Line::from(vec![Span::styled("Toggle: ", bold), Span::raw(&kb.toggle)]),
            Line::from(""),
        ];
        lines.push(Line::from(vec![Span::styled(
            "Press Esc to close",
            Style::default().fg(theme.help_text),
        )]));
        let para = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .block(Block::default());
        f.render_widget(para, inner);
    }
}
