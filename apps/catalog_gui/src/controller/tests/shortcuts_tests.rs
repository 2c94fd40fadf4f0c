use eframe::egui::{Event, Key, Modifiers};

use super::*;

fn key(key: Key, pressed: bool, modifiers: Modifiers) -> Event {
    Event::Key {
        key,
        physical_key: None,
        pressed,
        repeat: false,
        modifiers,
    }
}

#[test]
fn slash_focuses_search_and_is_swallowed() {
    let mut events = vec![
        key(Key::Slash, true, Modifiers::NONE),
        Event::Text("/".to_string()),
        key(Key::Slash, false, Modifiers::NONE),
    ];
    assert_eq!(take_shortcuts(&mut events), vec![ShortcutAction::FocusSearch]);
    assert!(events.is_empty());
}

#[test]
fn slash_typed_on_another_layout_still_focuses() {
    let mut events = vec![Event::Text("/".to_string())];
    assert_eq!(take_shortcuts(&mut events), vec![ShortcutAction::FocusSearch]);
    assert!(events.is_empty());
}

#[test]
fn escape_clears_but_stays_visible_to_widgets() {
    let mut events = vec![key(Key::Escape, true, Modifiers::NONE)];
    assert_eq!(take_shortcuts(&mut events), vec![ShortcutAction::ClearSearch]);
    assert_eq!(events.len(), 1);
}

#[test]
fn modified_slash_and_other_text_pass_through() {
    let mut events = vec![
        key(Key::Slash, true, Modifiers::CTRL),
        Event::Text("d".to_string()),
    ];
    assert!(take_shortcuts(&mut events).is_empty());
    assert_eq!(events.len(), 2);
}
