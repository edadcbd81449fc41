//! Terminal site picker: fetches the sites an access token can see, lets the
//! user narrow them down by name or host, and reports the chosen one.

pub mod api;
pub mod app;
pub mod config;
pub mod event;
pub mod logging;
pub mod picker;
pub mod token;
pub mod tui;
pub mod ui;
