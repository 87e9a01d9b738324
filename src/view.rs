use crate::board;
use crate::net::client::ConnectionState;
use crate::state::history::{parse_round, History, HistoryRecord};
use crate::state::store::GameSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
	RoundMarker,
	Decision,
	ExpectedValue,
	Risk,
	Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningLine {
	pub kind: LineKind,
	pub text: String,
}

pub fn classify_line(line: &str) -> LineKind {
	if parse_round(line).is_some() {
		LineKind::RoundMarker
	} else if line.contains("Decision:") {
		LineKind::Decision
	} else if line.contains("Expected value") {
		LineKind::ExpectedValue
	} else if line.contains("Risk level:") {
		LineKind::Risk
	} else {
		LineKind::Plain
	}
}

pub fn reasoning_lines(ai_log: &[String]) -> Vec<ReasoningLine> {
	ai_log
		.iter()
		.flat_map(|entry| entry.split('\n'))
		.map(|line| ReasoningLine {
			kind: classify_line(line),
			text: line.to_string(),
		})
		.collect()
}

pub fn format_money(amount: i64) -> String {
	let digits = amount.unsigned_abs().to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(c);
	}
	if amount < 0 {
		format!("-${}", grouped)
	} else {
		format!("${}", grouped)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCard {
	pub index: usize,
	pub name: String,
	pub cash: i64,
	pub money: String,
	pub position: u8,
	pub space: String,
	pub properties: Vec<String>,
}

pub fn player_cards(snapshot: &GameSnapshot) -> Vec<PlayerCard> {
	snapshot
		.players
		.iter()
		.enumerate()
		.map(|(index, p)| PlayerCard {
			index,
			name: p.display_name(index),
			cash: p.money,
			money: format_money(p.money),
			position: p.position,
			space: board::space(p.position)
				.map(|s| s.name.to_string())
				.unwrap_or_else(|| format!("#{}", p.position)),
			properties: p.properties.iter().map(|prop| prop.name.clone()).collect(),
		})
		.collect()
}

pub fn status_banner(snapshot: &GameSnapshot) -> &'static str {
	if snapshot.is_running {
		"Game in progress..."
	} else {
		"Press Start to begin"
	}
}

pub fn connection_banner(state: ConnectionState, endpoint: &str) -> String {
	match state {
		ConnectionState::Disconnected => "Disconnected".to_string(),
		ConnectionState::Connecting => format!("Connecting to {}...", endpoint),
		ConnectionState::Connected => format!("Connected to {}", endpoint),
		ConnectionState::Error => format!("Connection error ({})", endpoint),
	}
}

pub fn chart_title(history: &History) -> String {
	let (first, last) = history.visible_rounds();
	format!("Properties Owned Over Time (Rounds {} - {})", first, last)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipRow {
	pub name: String,
	pub property_count: usize,
	pub money: String,
	pub properties: String,
}

pub fn tooltip(record: &HistoryRecord) -> Vec<TooltipRow> {
	record
		.players
		.iter()
		.map(|p| {
			let names: Vec<&str> = p.properties.iter().map(|prop| prop.name.as_str()).collect();
			TooltipRow {
				name: p.name.clone(),
				property_count: p.property_count,
				money: format_money(p.money),
				properties: if names.is_empty() { "None".to_string() } else { names.join(", ") },
			}
		})
		.collect()
}
