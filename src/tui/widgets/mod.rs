pub mod filter_panel;
pub mod keybindings_modal;
pub mod logs;
pub mod offer_list;
pub mod search_bar;
pub mod status_bar;
