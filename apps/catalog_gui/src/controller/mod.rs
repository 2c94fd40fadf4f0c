//! Controller layer: browser/detail state, deep links, shortcuts, UI events and command orchestration.

pub mod browser;
pub mod detail;
pub mod events;
pub mod location;
pub mod orchestration;
pub mod shortcuts;
