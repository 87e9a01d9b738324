use crate::logging;
use crate::net::protocol::{Player, Property};
use crate::state::store::GameSnapshot;

const MARKER_OPEN: &str = "@@@@ Round ";
const MARKER_CLOSE: &str = " @@@@";

// The server only announces rounds as `@@@@ Round <N> @@@@` inside free text.
// Everything that depends on that convention goes through here.
pub fn parse_round(text: &str) -> Option<u32> {
	for (start, _) in text.match_indices(MARKER_OPEN) {
		let rest = &text[start + MARKER_OPEN.len()..];
		let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
		if digits == 0 || !rest[digits..].starts_with(MARKER_CLOSE) {
			continue;
		}
		// All digits, so a failed parse means the number is too large.
		return Some(rest[..digits].parse().unwrap_or(u32::MAX));
	}
	None
}

// Newest entries first: the reasoning log is cumulative.
pub fn current_round(ai_log: &[String]) -> u32 {
	ai_log.iter().rev().find_map(|entry| parse_round(entry)).unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSample {
	pub name: String,
	pub property_count: usize,
	pub properties: Vec<Property>,
	pub money: i64,
	pub position: u8,
}

impl PlayerSample {
	pub fn capture(index: usize, player: &Player) -> Self {
		Self {
			name: player.display_name(index),
			property_count: player.properties.len(),
			properties: player.properties.clone(),
			money: player.money,
			position: player.position,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
	pub round: u32,
	pub players: Vec<PlayerSample>,
}

impl HistoryRecord {
	pub fn capture(round: u32, players: &[Player]) -> Self {
		Self {
			round,
			players: players
				.iter()
				.enumerate()
				.map(|(i, p)| PlayerSample::capture(i, p))
				.collect(),
		}
	}

	pub fn property_count(&self, player: usize) -> usize {
		self.players.get(player).map(|p| p.property_count).unwrap_or(0)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
	Reset,
	Recorded(u32),
	Unchanged(u32),
}

#[derive(Debug, Default)]
pub struct History {
	records: Vec<HistoryRecord>,
}

impl History {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn records(&self) -> &[HistoryRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn last(&self) -> Option<&HistoryRecord> {
		self.records.last()
	}

	pub fn record(&self, round: u32) -> Option<&HistoryRecord> {
		self.records
			.binary_search_by_key(&round, |r| r.round)
			.ok()
			.map(|i| &self.records[i])
	}

	pub fn observe(&mut self, snapshot: &GameSnapshot) -> Observation {
		if snapshot.is_session_start() || snapshot.players.is_empty() {
			if !self.records.is_empty() {
				logging::history::reset(self.records.len());
				self.records.clear();
			}
			return Observation::Reset;
		}

		let round = current_round(&snapshot.ai_log);

		// A round is captured once, at the first update that reports it.
		match self.records.binary_search_by_key(&round, |r| r.round) {
			Ok(_) => Observation::Unchanged(round),
			Err(at) => {
				self.records.insert(at, HistoryRecord::capture(round, &snapshot.players));
				logging::history::recorded(round, snapshot.players.len());
				Observation::Recorded(round)
			}
		}
	}

	pub fn visible_rounds(&self) -> (u32, u32) {
		match (self.records.first(), self.records.last()) {
			(Some(first), Some(last)) => (first.round, last.round),
			_ => (0, 0),
		}
	}

	// (round, properties owned) points for one player.
	pub fn series(&self, player: usize) -> Vec<(f64, f64)> {
		self.records
			.iter()
			.map(|r| (r.round as f64, r.property_count(player) as f64))
			.collect()
	}
}
