use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::format;
use crate::tui::app::{App, FocusPane, LoadState};

pub struct OfferListWidget;

impl OfferListWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = &app.theme;

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                [
                    Constraint::Percentage(40), // Offer list
                    Constraint::Percentage(60), // Offer details
                ]
                .as_ref(),
            )
            .split(area);

        let border_color = if app.focus == FocusPane::List {
            theme.border_focused
        } else {
            theme.border_primary
        };
        let left_pane_block = Block::default()
            .title(Line::from(Span::styled("Ofertas", theme.offer_list_title)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let left_pane_content_area = left_pane_block.inner(chunks[0]);
        f.render_widget(left_pane_block, chunks[0]);

        // Four distinct empty states: still fetching, fetch failed with
        // nothing to show, the feed itself was empty, or the criteria
        // matched nothing.
        if let Some(message) = empty_state_message(app) {
            let message_style = match (&app.load_state, app.store.total()) {
                (LoadState::Failed(_), 0) => Style::default().fg(theme.error_text),
                _ => Style::default().fg(theme.offer_empty_state),
            };
            f.render_widget(
                Paragraph::new(message).style(message_style),
                left_pane_content_area,
            );
        } else {
            let offer_items: Vec<ListItem> = app
                .store
                .derived()
                .iter()
                .map(|offer| {
                    let content = Line::from(vec![
                        Span::styled(
                            offer.course_name.clone(),
                            Style::default().fg(theme.primary_foreground),
                        ),
                        Span::raw("  "),
                        Span::styled(format::format_brl(offer.offered_price), theme.offer_price),
                        Span::raw("  "),
                        Span::styled(format::stars(offer.rating), theme.offer_rating),
                    ]);
                    ListItem::new(content)
                })
                .collect();

            let offer_list = List::new(offer_items)
                .highlight_style(theme.highlight_style)
                .highlight_symbol(">> ");
            f.render_stateful_widget(offer_list, left_pane_content_area, &mut app.offer_list_state);
        }

        let right_pane_block = Block::default()
            .title(Line::from(Span::styled(
                "Detalhes",
                Style::default().fg(theme.primary_foreground),
            )))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary));
        let right_pane_content_area = right_pane_block.inner(chunks[1]);
        f.render_widget(right_pane_block, chunks[1]);

        if let Some(offer) = app.selected_offer() {
            let label = |text: &'static str| {
                Span::styled(text, Style::default().fg(theme.secondary_foreground))
            };

            // Long course names wrap instead of clipping.
            let wrap_width = usize::from(right_pane_content_area.width).max(10);
            let mut details_text: Vec<Line> = textwrap::wrap(&offer.course_name, wrap_width)
                .iter()
                .map(|part| {
                    Line::from(Span::styled(
                        part.to_string(),
                        Style::default()
                            .fg(theme.primary_foreground)
                            .add_modifier(Modifier::BOLD),
                    ))
                })
                .collect();
            details_text.push(Line::from(""));
            details_text.push(Line::from(vec![
                label("IES:        "),
                Span::styled(offer.ies_name.clone(), theme.offer_ies),
                Span::styled(
                    format!("  ({})", offer.ies_logo),
                    Style::default().fg(theme.secondary_foreground),
                ),
            ]));
            details_text.push(Line::from(vec![
                label("Modalidade: "),
                Span::raw(offer.kind.card_label()),
            ]));
            details_text.push(Line::from(vec![
                label("Grau:       "),
                Span::raw(offer.level.card_label()),
            ]));
            details_text.push(Line::from(vec![
                label("Avaliação:  "),
                Span::styled(format::stars(offer.rating), theme.offer_rating),
                Span::raw(format!(" ({:.1})", offer.rating)),
            ]));
            details_text.push(Line::from(""));
            details_text.push(Line::from(vec![
                label("De:         "),
                Span::styled(format::format_brl(offer.full_price), theme.offer_full_price),
            ]));
            details_text.push(Line::from(vec![
                label("Por:        "),
                Span::styled(format::format_brl(offer.offered_price), theme.offer_price),
            ]));
            details_text.push(Line::from(vec![
                label("Desconto:   "),
                Span::styled(
                    format!(
                        "{}%",
                        format::discount_percent(offer.full_price, offer.offered_price)
                    ),
                    theme.offer_discount,
                ),
            ]));

            f.render_widget(
                Paragraph::new(Text::from(details_text))
                    .style(Style::default().fg(theme.primary_foreground)),
                right_pane_content_area,
            );
        } else {
            f.render_widget(
                Paragraph::new("Nenhuma oferta selecionada")
                    .style(Style::default().fg(theme.secondary_foreground)),
                right_pane_content_area,
            );
        }
    }
}

fn empty_state_message(app: &App) -> Option<String> {
    if app.store.total() == 0 {
        return match &app.load_state {
            LoadState::Loading => Some("Carregando ofertas...".to_string()),
            LoadState::Failed(message) => Some(format!("Erro: {}", message)),
            LoadState::Ready => Some("Nenhuma oferta disponível.".to_string()),
        };
    }
    if app.store.derived().is_empty() {
        return Some("Nenhuma oferta corresponde aos filtros.".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OffersClient;
    use crate::config::Config;
    use crate::offer::{Kind, Level, Offer};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let config = Arc::new(Config::default());
        let client = OffersClient::new(&config, None);
        let (_log_tx, log_rx) = mpsc::unbounded_channel();
        App::new(config, client, log_rx)
    }

    fn offer(name: &str, price: f64) -> Offer {
        Offer {
            id: name.to_string(),
            course_name: name.to_string(),
            rating: 4.0,
            full_price: price * 2.0,
            offered_price: price,
            kind: Kind::Ead,
            level: Level::Licenciatura,
            ies_logo: String::new(),
            ies_name: "IES".to_string(),
        }
    }

    #[test]
    fn empty_states_are_distinguishable() {
        let mut app = test_app();
        assert_eq!(
            empty_state_message(&app).as_deref(),
            Some("Carregando ofertas...")
        );

        app.on_offers_fetched(Err("timeout".to_string()));
        assert_eq!(empty_state_message(&app).as_deref(), Some("Erro: timeout"));

        app.on_offers_fetched(Ok(Vec::new()));
        assert_eq!(
            empty_state_message(&app).as_deref(),
            Some("Nenhuma oferta disponível.")
        );

        app.on_offers_fetched(Ok(vec![offer("Farmácia", 300.0)]));
        assert_eq!(empty_state_message(&app), None);

        app.search_input = "zzz".to_string();
        app.apply_search();
        assert_eq!(
            empty_state_message(&app).as_deref(),
            Some("Nenhuma oferta corresponde aos filtros.")
        );
    }
}
