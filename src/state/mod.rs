pub mod history;
pub mod store;

pub use history::{current_round, parse_round, History, HistoryRecord, Observation, PlayerSample};
pub use store::{GameSnapshot, GameStore, SESSION_START_SENTINEL};
