pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod month;
pub mod navigation;
pub mod ui;
