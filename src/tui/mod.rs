pub mod app;
pub mod layout;
pub mod widgets;

pub use app::{WatchAction, WatchUI};
pub use layout::WatchLayout;
pub use widgets::{BoardWidget, HistoryChart};
