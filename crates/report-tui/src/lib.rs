//! report-tui - Terminal UI for Course Report Desk
//!
//! Draws the course card, the report dialog and the login prompt with
//! ratatui, and drives an `Engine` from report-app with crossterm input.

pub mod event;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use runner::run;
