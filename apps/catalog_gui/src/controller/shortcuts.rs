//! Global keyboard shortcuts for the script browser.

use eframe::egui::{Event, Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    FocusSearch,
    ClearSearch,
}

fn plain(modifiers: &Modifiers) -> bool {
    !(modifiers.ctrl || modifiers.alt || modifiers.command || modifiers.mac_cmd)
}

/// Pulls shortcut presses out of this frame's events.
///
/// `/` is consumed entirely (key and text) so it never lands in the search box.
/// `Escape` is left in place for widgets that also react to it.
pub fn take_shortcuts(events: &mut Vec<Event>) -> Vec<ShortcutAction> {
    let mut actions = Vec::new();
    events.retain(|event| match event {
        Event::Key {
            key: Key::Slash,
            pressed,
            modifiers,
            ..
        } if plain(modifiers) => {
            if *pressed {
                actions.push(ShortcutAction::FocusSearch);
            }
            false
        }
        Event::Text(text) if text == "/" => {
            if !actions.contains(&ShortcutAction::FocusSearch) {
                actions.push(ShortcutAction::FocusSearch);
            }
            false
        }
        Event::Key {
            key: Key::Escape,
            pressed: true,
            ..
        } => {
            actions.push(ShortcutAction::ClearSearch);
            true
        }
        _ => true,
    });
    actions
}

#[cfg(test)]
#[path = "tests/shortcuts_tests.rs"]
mod tests;
