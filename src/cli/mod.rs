//! Terminal commands and presentation.

pub mod convert;
pub mod interactive;
pub mod list;
pub mod screen;
pub mod setup;
pub mod ui;
