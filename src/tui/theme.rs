use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct AppTheme {
    // General
    pub primary_background: Color,
    pub primary_foreground: Color,
    pub secondary_foreground: Color,
    pub border_primary: Color,
    pub border_focused: Color,
    pub highlight_style: Style, // For list selections
    pub error_text: Color,
    pub warning_text: Color,
    pub success_text: Color,

    // Status Bar
    pub status_bar_background: Color,
    pub status_bar_foreground: Color,
    pub status_bar_mode_normal_bg: Color,
    pub status_bar_mode_search_bg: Color,
    pub status_bar_view_name_fg: Color,

    // Search Bar
    pub search_bar_background: Color,
    pub search_bar_text_fg: Color,
    pub search_bar_border: Color,
    pub search_bar_placeholder: Style,

    // Offer List
    pub offer_list_title: Style,
    pub offer_price: Style,
    pub offer_full_price: Style, // Rendered struck through
    pub offer_discount: Style,
    pub offer_rating: Style,
    pub offer_ies: Style,
    pub offer_empty_state: Color,

    // Filter Panel
    pub filter_title: Style,
    pub filter_section: Style,
    pub filter_cursor_style: Style,
    pub filter_checked: Color,
    pub price_bar_filled: Color,
    pub price_bar_empty: Color,

    // Log View
    pub log_title: Style,
    pub log_level_trace: Style,
    pub log_level_debug: Style,
    pub log_level_info: Style,
    pub log_level_warn: Style,
    pub log_level_error: Style,
    pub log_timestamp: Style,
    pub log_target: Style,

    // Popup
    pub popup_border: Color,
    pub popup_background: Color,
    pub help_text: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // General
            primary_background: Color::Reset, // Terminal default
            primary_foreground: Color::White,
            secondary_foreground: Color::Gray,
            border_primary: Color::DarkGray,
            border_focused: Color::LightCyan,
            highlight_style: Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            error_text: Color::Red,
            warning_text: Color::Yellow,
            success_text: Color::Green,

            // Status Bar
            status_bar_background: Color::Blue,
            status_bar_foreground: Color::White,
            status_bar_mode_normal_bg: Color::LightCyan,
            status_bar_mode_search_bg: Color::LightMagenta,
            status_bar_view_name_fg: Color::Yellow,

            // Search Bar
            search_bar_background: Color::DarkGray,
            search_bar_text_fg: Color::White,
            search_bar_border: Color::White,
            search_bar_placeholder: Style::default()
                .fg(Color::Rgb(180, 180, 180))
                .add_modifier(Modifier::ITALIC),

            // Offer List
            offer_list_title: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            offer_price: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            offer_full_price: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
            offer_discount: Style::default().fg(Color::LightGreen),
            offer_rating: Style::default().fg(Color::Yellow),
            offer_ies: Style::default().fg(Color::Gray),
            offer_empty_state: Color::DarkGray,

            // Filter Panel
            filter_title: Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            filter_section: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            filter_cursor_style: Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            filter_checked: Color::Green,
            price_bar_filled: Color::Cyan,
            price_bar_empty: Color::DarkGray,

            // Log View
            log_title: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            log_level_trace: Style::default().fg(Color::Magenta),
            log_level_debug: Style::default().fg(Color::Blue),
            log_level_info: Style::default().fg(Color::Green),
            log_level_warn: Style::default().fg(Color::Yellow),
            log_level_error: Style::default().fg(Color::Red),
            log_timestamp: Style::default().fg(Color::DarkGray),
            log_target: Style::default().fg(Color::Cyan),

            // Popup
            popup_border: Color::Yellow,
            popup_background: Color::DarkGray,
            help_text: Color::Gray,
        }
    }
}
