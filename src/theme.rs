use std::fs;
use std::path::PathBuf;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::board::ColorGroup;
use crate::net::client::ConnectionState;
use crate::view::LineKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
	pub background_color: String,
	pub player_colors: Vec<String>,

	pub brown_color: String,
	pub light_blue_color: String,
	pub pink_color: String,
	pub orange_color: String,
	pub red_color: String,
	pub yellow_color: String,
	pub green_color: String,
	pub dark_blue_color: String,
	pub unowned_color: String,

	pub board_border_color: String,
	pub players_border_color: String,
	pub log_border_color: String,
	pub reasoning_border_color: String,
	pub chart_border_color: String,

	pub money_color: String,
	pub debt_color: String,

	pub decision_color: String,
	pub expected_value_color: String,
	pub risk_color: String,
	pub round_marker_color: String,

	pub running_color: String,
	pub idle_color: String,
	pub connected_color: String,
	pub connecting_color: String,
	pub disconnected_color: String,
	pub error_color: String,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background_color: "reset".to_string(),
			player_colors: ["red", "blue", "green", "magenta"].iter().map(|s| s.to_string()).collect(),

			brown_color: "#8b4513".to_string(),
			light_blue_color: "light_cyan".to_string(),
			pink_color: "light_magenta".to_string(),
			orange_color: "#ff8c00".to_string(),
			red_color: "red".to_string(),
			yellow_color: "yellow".to_string(),
			green_color: "green".to_string(),
			dark_blue_color: "blue".to_string(),
			unowned_color: "dark_gray".to_string(),

			board_border_color: "green".to_string(),
			players_border_color: "white".to_string(),
			log_border_color: "blue".to_string(),
			reasoning_border_color: "magenta".to_string(),
			chart_border_color: "cyan".to_string(),

			money_color: "green".to_string(),
			debt_color: "red".to_string(),

			decision_color: "light_green".to_string(),
			expected_value_color: "light_blue".to_string(),
			risk_color: "light_red".to_string(),
			round_marker_color: "yellow".to_string(),

			running_color: "green".to_string(),
			idle_color: "gray".to_string(),
			connected_color: "green".to_string(),
			connecting_color: "yellow".to_string(),
			disconnected_color: "gray".to_string(),
			error_color: "red".to_string(),
		}
	}
}

impl Theme {
	pub fn load_named(name: &str) -> Result<Self, String> {
		let path = Self::theme_path(name).ok_or_else(|| format!("Theme '{}' not found", name))?;
		let contents = fs::read_to_string(&path)
			.map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
		Self::parse(&contents)
	}

	pub fn parse(contents: &str) -> Result<Self, String> {
		toml::from_str(contents).map_err(|e| format!("Failed to parse theme: {}", e))
	}

	pub fn list_available() -> Vec<String> {
		crate::defaults::list_themes()
	}

	fn theme_path(name: &str) -> Option<PathBuf> {
		let filename = format!("{}.toml", name);
		if let Some(config_dir) = dirs::config_dir() {
			let user_path = config_dir.join("monopoly-watch").join("themes").join(&filename);
			if user_path.exists() {
				return Some(user_path);
			}
		}
		let repo_path = PathBuf::from("config/themes").join(&filename);
		if repo_path.exists() {
			return Some(repo_path);
		}
		None
	}

	pub fn background(&self) -> Color {
		parse_color(&self.background_color)
	}

	pub fn player(&self, index: usize) -> Color {
		if self.player_colors.is_empty() {
			return Color::White;
		}
		parse_color(&self.player_colors[index % self.player_colors.len()])
	}

	pub fn group(&self, group: ColorGroup) -> Color {
		let name = match group {
			ColorGroup::Brown => &self.brown_color,
			ColorGroup::LightBlue => &self.light_blue_color,
			ColorGroup::Pink => &self.pink_color,
			ColorGroup::Orange => &self.orange_color,
			ColorGroup::Red => &self.red_color,
			ColorGroup::Yellow => &self.yellow_color,
			ColorGroup::Green => &self.green_color,
			ColorGroup::DarkBlue => &self.dark_blue_color,
		};
		parse_color(name)
	}

	pub fn unowned(&self) -> Color {
		parse_color(&self.unowned_color)
	}

	pub fn board_border(&self) -> Color {
		parse_color(&self.board_border_color)
	}

	pub fn players_border(&self) -> Color {
		parse_color(&self.players_border_color)
	}

	pub fn log_border(&self) -> Color {
		parse_color(&self.log_border_color)
	}

	pub fn reasoning_border(&self) -> Color {
		parse_color(&self.reasoning_border_color)
	}

	pub fn chart_border(&self) -> Color {
		parse_color(&self.chart_border_color)
	}

	pub fn money(&self, amount: i64) -> Color {
		if amount < 0 {
			parse_color(&self.debt_color)
		} else {
			parse_color(&self.money_color)
		}
	}

	pub fn line(&self, kind: LineKind) -> Option<Color> {
		match kind {
			LineKind::Decision => Some(parse_color(&self.decision_color)),
			LineKind::ExpectedValue => Some(parse_color(&self.expected_value_color)),
			LineKind::Risk => Some(parse_color(&self.risk_color)),
			LineKind::RoundMarker => Some(parse_color(&self.round_marker_color)),
			LineKind::Plain => None,
		}
	}

	pub fn game_status(&self, running: bool) -> Color {
		if running {
			parse_color(&self.running_color)
		} else {
			parse_color(&self.idle_color)
		}
	}

	pub fn connection(&self, state: ConnectionState) -> Color {
		match state {
			ConnectionState::Connected => parse_color(&self.connected_color),
			ConnectionState::Connecting => parse_color(&self.connecting_color),
			ConnectionState::Disconnected => parse_color(&self.disconnected_color),
			ConnectionState::Error => parse_color(&self.error_color),
		}
	}
}

fn parse_color(s: &str) -> Color {
	let s = s.trim();
	match s.to_lowercase().as_str() {
		"reset" | "default" => Color::Reset,
		"black" => Color::Black,
		"red" => Color::Red,
		"green" => Color::Green,
		"yellow" => Color::Yellow,
		"blue" => Color::Blue,
		"magenta" => Color::Magenta,
		"cyan" => Color::Cyan,
		"gray" | "grey" => Color::Gray,
		"dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Color::DarkGray,
		"light_red" | "lightred" => Color::LightRed,
		"light_green" | "lightgreen" => Color::LightGreen,
		"light_yellow" | "lightyellow" => Color::LightYellow,
		"light_blue" | "lightblue" => Color::LightBlue,
		"light_magenta" | "lightmagenta" => Color::LightMagenta,
		"light_cyan" | "lightcyan" => Color::LightCyan,
		"white" => Color::White,
		_ => parse_rgb(s).unwrap_or(Color::White),
	}
}

fn parse_rgb(s: &str) -> Option<Color> {
	if let Some(hex) = s.strip_prefix('#') {
		if hex.len() != 6 {
			return None;
		}
		let rgb = u32::from_str_radix(hex, 16).ok()?;
		return Some(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8));
	}
	let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
	let parts: Vec<u8> = inner
		.split(',')
		.map(|p| p.trim().parse::<u8>())
		.collect::<Result<_, _>>()
		.ok()?;
	match parts[..] {
		[r, g, b] => Some(Color::Rgb(r, g, b)),
		_ => None,
	}
}
