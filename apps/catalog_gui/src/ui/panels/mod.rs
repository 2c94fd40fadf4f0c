pub mod browser;
pub mod detail;
