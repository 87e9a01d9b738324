use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
	#[error("invalid json: {0}")]
	Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
	pub position: u8,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub price: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color_group: Option<String>,
	#[serde(default)]
	pub houses: u8,
}

impl Property {
	pub fn new(position: u8, name: impl Into<String>) -> Self {
		Self {
			position,
			name: name.into(),
			price: None,
			color_group: None,
			houses: 0,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub money: i64,
	#[serde(default)]
	pub position: u8,
	#[serde(default)]
	pub properties: Vec<Property>,
}

impl Player {
	pub fn new(name: impl Into<String>, money: i64) -> Self {
		Self {
			name: Some(name.into()),
			money,
			position: 0,
			properties: Vec::new(),
		}
	}

	pub fn at(mut self, position: u8) -> Self {
		self.position = position;
		self
	}

	pub fn owning(mut self, properties: Vec<Property>) -> Self {
		self.properties = properties;
		self
	}

	// Players are numbered from one on screen.
	pub fn display_name(&self, index: usize) -> String {
		self.name
			.clone()
			.unwrap_or_else(|| format!("Player {}", index + 1))
	}

	pub fn owns(&self, position: u8) -> bool {
		self.properties.iter().any(|p| p.position == position)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
	pub players: Vec<Player>,
	pub game_log: Vec<String>,
	pub is_running: bool,
	pub ai_log: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
	StateUpdate(StateUpdate),
	Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
	StartGame,
	StopGame,
}

#[derive(Debug, Deserialize)]
struct Envelope {
	#[serde(rename = "type")]
	kind: String,
	#[serde(default)]
	data: serde_json::Value,
}

#[derive(Serialize)]
struct OutgoingUpdate<'a> {
	#[serde(rename = "type")]
	kind: &'static str,
	data: &'a StateUpdate,
}

pub fn decode_server_message(text: &str) -> Result<ServerMessage, ProtocolError> {
	let envelope: Envelope = serde_json::from_str(text)?;
	match envelope.kind.as_str() {
		"state_update" => Ok(ServerMessage::StateUpdate(serde_json::from_value(envelope.data)?)),
		_ => Ok(ServerMessage::Other(envelope.kind)),
	}
}

pub fn encode_message<T: Serialize>(msg: &T) -> Result<String, ProtocolError> {
	Ok(serde_json::to_string(msg)?)
}

// Server-side framing of a state update; used by the loopback peer and tests.
pub fn encode_state_update(update: &StateUpdate) -> Result<String, ProtocolError> {
	encode_message(&OutgoingUpdate { kind: "state_update", data: update })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_encode_client_messages() {
		assert_eq!(encode_message(&ClientMessage::StartGame).unwrap(), r#"{"type":"start_game"}"#);
		assert_eq!(encode_message(&ClientMessage::StopGame).unwrap(), r#"{"type":"stop_game"}"#);
	}

	#[test]
	fn test_decode_state_update() {
		let json = r#"{
			"type": "state_update",
			"data": {
				"players": [
					{"name": "Player 1", "money": 1440, "position": 3,
					 "properties": [{"name": "Baltic Avenue", "position": 3, "price": 60,
					                 "rent": [4, 20], "color_group": "brown",
					                 "landing_frequency": 0.02034, "houses": 0, "owner": "Player 1"}]}
				],
				"game_log": ["Player 1 moved from 0 to 3", "Game started!"],
				"is_running": true,
				"ai_log": ["@@@@ Round 1 @@@@", ""]
			}
		}"#;

		let msg = decode_server_message(json).unwrap();
		let ServerMessage::StateUpdate(update) = msg else {
			panic!("Wrong message type");
		};
		assert!(update.is_running);
		assert_eq!(update.game_log.len(), 2);
		assert_eq!(update.ai_log[0], "@@@@ Round 1 @@@@");

		let player = &update.players[0];
		assert_eq!(player.display_name(0), "Player 1");
		assert_eq!(player.money, 1440);
		assert_eq!(player.properties[0].color_group.as_deref(), Some("brown"));
		assert_eq!(player.properties[0].price, Some(60));
		assert!(player.owns(3));
		assert!(!player.owns(1));
	}

	#[test]
	fn test_player_fields_default_when_absent() {
		let json = r#"{"type":"state_update","data":{"players":[{}],"game_log":[],"is_running":false,"ai_log":[]}}"#;
		let ServerMessage::StateUpdate(update) = decode_server_message(json).unwrap() else {
			panic!("Wrong message type");
		};
		let player = &update.players[0];
		assert_eq!(player.name, None);
		assert_eq!(player.display_name(2), "Player 3");
		assert_eq!(player.money, 0);
		assert_eq!(player.position, 0);
		assert!(player.properties.is_empty());
	}

	#[test]
	fn test_negative_money_accepted() {
		let json = r#"{"type":"state_update","data":{"players":[{"name":"Broke","money":-35}],"game_log":[],"is_running":true,"ai_log":[]}}"#;
		let ServerMessage::StateUpdate(update) = decode_server_message(json).unwrap() else {
			panic!("Wrong message type");
		};
		assert_eq!(update.players[0].money, -35);
	}

	#[test]
	fn test_unknown_type_is_other() {
		let msg = decode_server_message(r#"{"type":"chat","data":{"text":"hi"}}"#).unwrap();
		assert_eq!(msg, ServerMessage::Other("chat".to_string()));

		let msg = decode_server_message(r#"{"type":"heartbeat"}"#).unwrap();
		assert_eq!(msg, ServerMessage::Other("heartbeat".to_string()));
	}

	#[test]
	fn test_state_update_missing_fields_is_error() {
		assert!(decode_server_message(r#"{"type":"state_update"}"#).is_err());
		assert!(decode_server_message(r#"{"type":"state_update","data":{"players":[],"game_log":[]}}"#).is_err());
		assert!(decode_server_message("not json").is_err());
		assert!(decode_server_message(r#"{"data":{}}"#).is_err());
	}

	#[test]
	fn test_encode_state_update_is_decodable() {
		let update = StateUpdate {
			players: vec![Player::new("Alice", 1500).at(5)],
			game_log: vec!["Game started!".to_string()],
			is_running: true,
			ai_log: Vec::new(),
		};
		let text = encode_state_update(&update).unwrap();
		assert!(text.contains(r#""type":"state_update""#));
		assert_eq!(decode_server_message(&text).unwrap(), ServerMessage::StateUpdate(update));
	}
}
