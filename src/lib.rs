#![allow(clippy::collapsible_if)]

pub mod board;
pub mod commands;
pub mod config;
pub mod defaults;
pub mod logging;
pub mod net;
pub mod session;
pub mod state;
pub mod theme;
pub mod tui;
pub mod view;

pub use session::{Session, Step};
