//! Test utilities for TUI rendering verification
//!
//! Widgets and full frames render into ratatui's `TestBackend`, so
//! rendering tests are fast and need no real terminal.
//!
//! ```ignore
//! let mut term = TestTerminal::new();
//! term.render_widget(MainHeader::new(&view.header, icons), term.area());
//! assert!(term.buffer_contains("RapidBuild"));
//! ```

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

use rbdash_api::test_utils::test_user;
use rbdash_app::config::Settings;
use rbdash_app::state::AppState;
use rbdash_core::App;

/// Standard test terminal size (matches common terminal dimensions)
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Wrapper around a `TestBackend` terminal with buffer assertions
pub struct TestTerminal {
    /// The underlying terminal, for anything the helpers don't cover
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// Create a test terminal with standard dimensions (80x24)
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    /// Get the full terminal area
    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere (within one row)
    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    /// Check if a specific line contains text
    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        get_line_content(self.buffer(), line).contains(text)
    }

    /// Number of rows containing `text`
    pub fn count_lines_containing(&self, text: &str) -> usize {
        let buffer = self.buffer();
        (0..buffer.area.height)
            .filter(|&y| get_line_content(buffer, y).contains(text))
            .count()
    }

    /// First row containing `text`
    pub fn find_line(&self, text: &str) -> Option<u16> {
        let buffer = self.buffer();
        (0..buffer.area.height).find(|&y| get_line_content(buffer, y).contains(text))
    }

    /// Get all content as a string (for debugging failed assertions)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&get_line_content(buffer, y));
        result.push('\n');
    }
    result
}

fn get_line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

/// State of a signed-in user whose app list has loaded
pub fn loaded_state(apps: Vec<App>) -> AppState {
    let mut state = AppState::with_settings(Settings::default());
    state.session.commit(test_user());
    state.dashboard.finish_fetch(Ok(apps));
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_terminal_creation() {
        let term = TestTerminal::new();
        assert_eq!(term.area().width, TEST_WIDTH);
        assert_eq!(term.area().height, TEST_HEIGHT);
    }

    #[test]
    fn test_buffer_contains() {
        let mut term = TestTerminal::with_size(20, 5);
        term.render_widget(Paragraph::new("Hello World"), term.area());

        assert!(term.buffer_contains("Hello World"));
        assert!(!term.buffer_contains("Goodbye"));
    }

    #[test]
    fn test_line_helpers() {
        let mut term = TestTerminal::with_size(20, 3);
        term.render_widget(Paragraph::new("one\ntwo\none"), term.area());

        assert!(term.line_contains(1, "two"));
        assert_eq!(term.count_lines_containing("one"), 2);
        assert_eq!(term.find_line("two"), Some(1));
        assert_eq!(term.find_line("three"), None);
    }
}
