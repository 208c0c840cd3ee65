//! Custom widget components

mod app_card;
mod app_detail;
mod app_list;
mod confirm_dialog;
mod header;
mod login;
pub mod modal_overlay;
mod new_app;
mod status_bar;

pub use app_card::{clamp_lines, AppCardWidget, CARD_HEIGHT};
pub use app_detail::AppDetail;
pub use app_list::AppList;
pub use confirm_dialog::ConfirmLogout;
pub use header::MainHeader;
pub use login::LoginForm;
pub use new_app::NewAppPanel;
pub use status_bar::StatusBar;
