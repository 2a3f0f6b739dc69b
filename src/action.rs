use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::ActivePane;
use crate::config::{self, KeyBinding};
use crate::event::Event;
use crate::mood::Mood;

/// High-level actions that the application can perform in response to user
/// input.  The event handler maps raw key events to these actions based on
/// which pane is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    /// Press a mood button directly.
    SelectMood(Mood),
    /// Move the mood bar cursor.
    MoodCursorNext,
    MoodCursorPrev,
    /// Press the mood button under the cursor.
    PressMoodCursor,
    Refresh,
    MoveUp,
    MoveDown,
    ScrollHalfPageUp,
    ScrollHalfPageDown,
    JumpToTop,
    JumpToBottom,
    /// Read the selected article in full.
    OpenArticle,
    /// Leave the article view for the list.
    CloseArticle,
}

/// Map a raw terminal [`Event`] to an application [`Action`], considering which
/// pane is currently active and the configured keybindings.
///
/// Returns `None` for events that have no associated action (e.g. ticks,
/// resizes, or unmapped keys).
pub fn handle_event(
    event: &Event,
    active_pane: ActivePane,
    keybindings: &config::KeyBindings,
) -> Option<Action> {
    let Event::Key(key) = event else {
        return None;
    };

    let code = key.code;
    let mods = key.modifiers;
    let global = &keybindings.global;

    // ----- Global bindings (independent of pane) -----

    if config::matches_any(&global.quit, code, mods) {
        return Some(Action::Quit);
    }
    if config::matches_any(&global.focus_next, code, mods) {
        return Some(Action::FocusNext);
    }
    if config::matches_any(&global.focus_prev, code, mods) {
        return Some(Action::FocusPrev);
    }
    if global.refresh.matches(code, mods) {
        return Some(Action::Refresh);
    }

    if let Some(mood) = Mood::ALL
        .into_iter()
        .find(|m| global.for_mood(*m).matches(code, mods))
    {
        return Some(Action::SelectMood(mood));
    }

    if global.jump_top.matches(code, mods) {
        return Some(Action::JumpToTop);
    }
    if global.jump_bottom.matches(code, mods) {
        return Some(Action::JumpToBottom);
    }

    // ----- Pane-specific bindings -----

    match active_pane {
        ActivePane::Moods => handle_moods_key(code, mods, keybindings),
        ActivePane::Articles => handle_articles_key(code, mods, keybindings),
        ActivePane::ArticleView => handle_article_view_key(code, mods, keybindings),
    }
}

/// Key bindings when the mood bar is focused.
fn handle_moods_key(
    code: KeyCode,
    mods: KeyModifiers,
    keybindings: &config::KeyBindings,
) -> Option<Action> {
    let kb = &keybindings.moods;

    if config::matches_any(&kb.next, code, mods) {
        return Some(Action::MoodCursorNext);
    }
    if config::matches_any(&kb.prev, code, mods) {
        return Some(Action::MoodCursorPrev);
    }
    if config::matches_any(&kb.select, code, mods) {
        return Some(Action::PressMoodCursor);
    }

    None
}

/// Key bindings when the Articles list pane is focused.
fn handle_articles_key(
    code: KeyCode,
    mods: KeyModifiers,
    keybindings: &config::KeyBindings,
) -> Option<Action> {
    let kb = &keybindings.articles;

    if config::matches_any(&kb.move_down, code, mods) {
        return Some(Action::MoveDown);
    }
    if config::matches_any(&kb.move_up, code, mods) {
        return Some(Action::MoveUp);
    }
    if config::matches_any(&kb.scroll_half_page_down, code, mods) {
        return Some(Action::ScrollHalfPageDown);
    }
    if config::matches_any(&kb.scroll_half_page_up, code, mods) {
        return Some(Action::ScrollHalfPageUp);
    }
    if config::matches_any(&kb.open, code, mods) {
        return Some(Action::OpenArticle);
    }

    None
}

/// Key bindings when the article view is focused.
fn handle_article_view_key(
    code: KeyCode,
    mods: KeyModifiers,
    keybindings: &config::KeyBindings,
) -> Option<Action> {
    let kb = &keybindings.article_view;

    if config::matches_any(&kb.scroll_down, code, mods) {
        return Some(Action::MoveDown);
    }
    if config::matches_any(&kb.scroll_up, code, mods) {
        return Some(Action::MoveUp);
    }
    if config::matches_any(&kb.scroll_half_page_down, code, mods) {
        return Some(Action::ScrollHalfPageDown);
    }
    if config::matches_any(&kb.scroll_half_page_up, code, mods) {
        return Some(Action::ScrollHalfPageUp);
    }
    if config::matches_any(&kb.close, code, mods) {
        return Some(Action::CloseArticle);
    }

    None
}

/// Build a display string for a list of keybindings.
/// If there are multiple bindings, join them with "/".
pub fn format_bindings(bindings: &[KeyBinding]) -> String {
    bindings
        .iter()
        .map(|kb| kb.display())
        .collect::<Vec<_>>()
        .join("/")
}
