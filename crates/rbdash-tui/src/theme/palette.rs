//! Color palette.
//!
//! Named terminal colors only, so the dashboard follows the user's terminal
//! theme instead of fighting it.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black; // Terminal background
pub const CARD_BG: Color = Color::Black; // Panel/card backgrounds
pub const POPUP_BG: Color = Color::DarkGray; // Modal backgrounds

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan; // Selected card, focused panel

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
pub const CONTRAST_FG: Color = Color::Black; // Text on accent backgrounds

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green; // active
pub const STATUS_RED: Color = Color::Red; // error, load failures
pub const STATUS_YELLOW: Color = Color::Yellow; // notices, key hints
pub const STATUS_BLUE: Color = Color::Blue; // building

// --- Effects ---
pub const SHADOW: Color = Color::Black;
