//! UI layer for the catalog browser: app shell, panels and widgets.

pub mod app;
pub mod panels;
pub mod widgets;

pub use app::{CatalogGuiApp, StartupOptions};
