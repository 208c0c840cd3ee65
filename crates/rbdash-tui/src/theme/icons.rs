//! Icon set for the TUI.
//!
//! `IconSet` resolves glyphs at runtime based on `IconMode`.
//! - `IconMode::Unicode`: characters that work in all terminals
//! - `IconMode::NerdFonts`: Nerd Font glyphs (requires a Nerd Font)

use rbdash_app::config::IconMode;

/// Runtime icon resolver
#[derive(Debug, Clone, Copy)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Generic app glyph, shown when there is no logo or it failed to load
    pub fn folder(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f07b}", // nf-fa-folder
            IconMode::Unicode => "\u{25a3}",   // ▣
        }
    }

    /// Stand-in for a logo image that loaded
    pub fn image(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f03e}", // nf-fa-image
            IconMode::Unicode => "\u{25c8}",   // ◈
        }
    }

    pub fn dot(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f444}", // nf-oct-dot_fill
            IconMode::Unicode => "\u{25cf}",   // ●
        }
    }

    pub fn refresh(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f021}", // nf-fa-refresh
            IconMode::Unicode => "\u{21bb}",   // ↻
        }
    }

    pub fn alert(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f071}", // nf-fa-warning
            IconMode::Unicode => "\u{26a0}",   // ⚠
        }
    }

    pub fn link(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f08e}", // nf-fa-external_link
            IconMode::Unicode => "\u{2197}",   // ↗
        }
    }

    pub fn user(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f007}", // nf-fa-user
            IconMode::Unicode => "@",
        }
    }

    pub fn plus(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f067}", // nf-fa-plus
            IconMode::Unicode => "+",
        }
    }

    pub fn key(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f084}", // nf-fa-key
            IconMode::Unicode => "\u{26bf}",   // ⚿
        }
    }

    /// Marker in front of the selected card
    pub fn pointer(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f054}", // nf-fa-chevron_right
            IconMode::Unicode => "\u{276f}",   // ❯
        }
    }
}
