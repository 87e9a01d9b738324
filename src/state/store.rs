use crate::logging;
use crate::net::protocol::{Player, StateUpdate};

pub const SESSION_START_SENTINEL: &str = "Game started!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSnapshot {
	pub players: Vec<Player>,
	pub game_log: Vec<String>,
	pub is_running: bool,
	pub ai_log: Vec<String>,
}

impl GameSnapshot {
	pub fn is_empty(&self) -> bool {
		self.players.is_empty() && self.game_log.is_empty() && self.ai_log.is_empty() && !self.is_running
	}

	pub fn is_session_start(&self) -> bool {
		self.game_log.len() == 1 && self.game_log[0] == SESSION_START_SENTINEL
	}
}

// Sole owner of the current snapshot. Players, game log and running flag are
// replaced by each update; the reasoning log accumulates.
#[derive(Debug, Default)]
pub struct GameStore {
	snapshot: GameSnapshot,
	ai_log_limit: Option<usize>,
}

impl GameStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_ai_log_limit(mut self, limit: Option<usize>) -> Self {
		self.ai_log_limit = limit;
		self
	}

	pub fn snapshot(&self) -> &GameSnapshot {
		&self.snapshot
	}

	pub fn apply(&mut self, update: StateUpdate) {
		let StateUpdate { players, game_log, is_running, ai_log } = update;

		let mut reasoning = std::mem::take(&mut self.snapshot.ai_log);
		reasoning.extend(ai_log);
		if let Some(limit) = self.ai_log_limit {
			if reasoning.len() > limit {
				reasoning.drain(..reasoning.len() - limit);
			}
		}

		self.snapshot = GameSnapshot {
			players,
			game_log,
			is_running,
			ai_log: reasoning,
		};

		logging::state::applied(
			self.snapshot.players.len(),
			self.snapshot.game_log.len(),
			self.snapshot.ai_log.len(),
			self.snapshot.is_running,
		);
	}

	pub fn reset(&mut self) {
		self.snapshot = GameSnapshot::default();
		logging::state::reset();
	}
}
