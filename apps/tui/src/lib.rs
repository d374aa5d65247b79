// Library half of the skimap TUI: everything that does not touch the terminal.
pub mod config;
pub mod data;
pub mod domain;
pub mod resorts;
pub mod scroll;
pub mod snow;

pub use domain::{Month, Section, Week};
