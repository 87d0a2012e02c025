//! Everything that talks to the terminal

pub mod args;
pub mod menu;
pub mod plot;
pub mod prompt;
pub mod table;
