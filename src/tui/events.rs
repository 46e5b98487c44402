use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// How key presses are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// History list navigation
    Browse,
    /// Chat input line
    Typing,
    /// Yes/no delete confirmation
    Confirming,
}

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    PreviousPage,
    NextPage,
    ToggleExpand,
    Delete,
    ConfirmYes,
    ConfirmNo,
    Refresh,
    CopyToClipboard,
    ToggleChat,
    Submit,
    Suggestion(usize),
    TypeChar(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration, mode: KeyMode) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key, mode));
    }
    Ok(Action::None)
}

pub fn key_to_action(key: KeyEvent, mode: KeyMode) -> Action {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Action::Quit;
    }

    match mode {
        KeyMode::Browse => browse_action(key),
        KeyMode::Typing => typing_action(key),
        KeyMode::Confirming => confirm_action(key),
    }
}

fn browse_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,

        // Navigation (arrows and Vim style)
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Left, _) | (KeyCode::PageUp, _) => Action::PreviousPage,
        (KeyCode::Right, _) | (KeyCode::PageDown, _) => Action::NextPage,

        // Record actions
        (KeyCode::Enter, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => Action::ToggleExpand,
        (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => Action::Delete,
        (KeyCode::Char('r'), KeyModifiers::NONE) | (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
            Action::Refresh
        }
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyToClipboard,

        _ => Action::None,
    }
}

fn typing_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Tab, _) => Action::ToggleChat,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::F(n @ 1..=4), _) => Action::Suggestion(usize::from(n) - 1),
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::TypeChar(c)
        }
        _ => Action::None,
    }
}

fn confirm_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Action::ConfirmYes,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::ConfirmNo,
        _ => Action::None,
    }
}
