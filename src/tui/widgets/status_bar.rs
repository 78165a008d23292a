use crate::tui::app::{App, InputMode, LoadState};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;

        let status_bar_style = Style::default()
            .fg(theme.status_bar_foreground)
            .bg(theme.status_bar_background);

        let status_bar_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(area);

        let input_mode_bg = match app.input_mode {
            InputMode::Normal => theme.status_bar_mode_normal_bg,
            InputMode::Search => theme.status_bar_mode_search_bg,
        };

        let status_spans_left = Line::from(vec![
            Span::styled("bolsatui | ", status_bar_style.bold()),
            Span::styled("View: ", status_bar_style),
            Span::styled(
                format!("{:?}", app.active_view),
                Style::default()
                    .fg(theme.status_bar_view_name_fg)
                    .bg(theme.status_bar_background)
                    .bold(),
            ),
            Span::styled(" | Input: ", status_bar_style),
            Span::styled(
                format!("{:?}", app.input_mode),
                Style::default()
                    .fg(theme.primary_foreground)
                    .bg(input_mode_bg)
                    .bold(),
            ),
            Span::styled(
                format!(
                    " | Ofertas: {}/{} ",
                    app.store.derived().len(),
                    app.store.total()
                ),
                status_bar_style,
            ),
            Span::styled(
                format!("| {} ", app.store.criteria().sort_key.label()),
                status_bar_style,
            ),
        ]);

        f.render_widget(
            Paragraph::new(status_spans_left).style(status_bar_style),
            status_bar_layout[0],
        );

        let (feed_text, feed_style) = match &app.load_state {
            LoadState::Loading => ("Carregando", Style::default().fg(theme.warning_text)),
            LoadState::Failed(_) => ("Erro", Style::default().fg(theme.error_text)),
            LoadState::Ready => ("OK", Style::default().fg(theme.success_text)),
        };
        let status_spans_right = vec![
            Span::styled("Feed: ", status_bar_style),
            Span::styled(feed_text, feed_style),
            Span::raw(" | "),
            Span::from(Local::now().format("%H:%M:%S").to_string()),
        ];

        f.render_widget(
            Paragraph::new(Line::from(status_spans_right))
                .style(status_bar_style)
                .alignment(Alignment::Right),
            status_bar_layout[1],
        );
    }
}
