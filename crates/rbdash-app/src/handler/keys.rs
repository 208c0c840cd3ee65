//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Force quit works everywhere
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.ui_mode {
        UiMode::Dashboard if state.confirm_logout => handle_key_confirm_logout(key),
        UiMode::Dashboard => handle_key_dashboard(key),
        UiMode::Login => handle_key_login(state, key),
        UiMode::AppDetail { .. } => handle_key_detail(key),
        UiMode::NewApp => handle_key_new_app(key),
    }
}

fn handle_key_dashboard(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),

        InputKey::Up | InputKey::Char('k') => Some(Message::SelectPrevious),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectNext),
        InputKey::BackTab | InputKey::Left => Some(Message::SelectPrevious),
        InputKey::Tab | InputKey::Right => Some(Message::SelectNext),

        InputKey::Enter => Some(Message::OpenSelected),
        InputKey::Char('o') => Some(Message::OpenProductionLink),
        InputKey::Char('n') => Some(Message::OpenNewApp),
        InputKey::Char('r') => Some(Message::Refresh),
        InputKey::Char('L') => Some(Message::RequestLogout),

        _ => None,
    }
}

fn handle_key_confirm_logout(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => Some(Message::ConfirmLogout),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::CancelLogout),
        _ => None,
    }
}

fn handle_key_login(state: &AppState, key: InputKey) -> Option<Message> {
    if state.login.submitting {
        return match key {
            InputKey::Esc => Some(Message::Quit),
            _ => None,
        };
    }

    match key {
        InputKey::Esc => Some(Message::Quit),
        InputKey::Enter => Some(Message::SubmitToken),

        InputKey::Backspace => {
            let mut text = state.login.input.clone();
            text.pop();
            Some(Message::LoginInput { text })
        }

        InputKey::CharCtrl('u') => Some(Message::LoginInput {
            text: String::new(),
        }),

        InputKey::Char(c) if !c.is_control() => {
            let mut text = state.login.input.clone();
            text.push(c);
            Some(Message::LoginInput { text })
        }

        _ => None,
    }
}

fn handle_key_detail(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Backspace => Some(Message::BackToDashboard),
        InputKey::Char('q') => Some(Message::Quit),
        InputKey::Char('o') => Some(Message::OpenProductionLink),
        _ => None,
    }
}

fn handle_key_new_app(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Backspace => Some(Message::BackToDashboard),
        InputKey::Char('q') => Some(Message::Quit),
        InputKey::Char('o') | InputKey::Enter => Some(Message::OpenWebConsole),
        _ => None,
    }
}
