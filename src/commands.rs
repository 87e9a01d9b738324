use crate::net::client::ConnectionState;
use crate::net::protocol::ClientMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
	StartGame,
	StopGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
	NotConnected(ConnectionState),
	AlreadyRunning,
	NotRunning,
}

impl Refusal {
	pub fn reason(&self) -> String {
		match self {
			Refusal::NotConnected(state) => format!("connection is {}", state.label()),
			Refusal::AlreadyRunning => "game already running".to_string(),
			Refusal::NotRunning => "game not running".to_string(),
		}
	}
}

impl Command {
	pub fn name(&self) -> &'static str {
		match self {
			Command::StartGame => "start_game",
			Command::StopGame => "stop_game",
		}
	}

	pub fn message(&self) -> ClientMessage {
		match self {
			Command::StartGame => ClientMessage::StartGame,
			Command::StopGame => ClientMessage::StopGame,
		}
	}

	pub fn check(&self, state: ConnectionState, running: bool) -> Result<(), Refusal> {
		if state != ConnectionState::Connected {
			return Err(Refusal::NotConnected(state));
		}
		match (self, running) {
			(Command::StartGame, true) => Err(Refusal::AlreadyRunning),
			(Command::StopGame, false) => Err(Refusal::NotRunning),
			_ => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_start_requires_connected_and_idle() {
		assert_eq!(Command::StartGame.check(ConnectionState::Connected, false), Ok(()));
		assert_eq!(Command::StartGame.check(ConnectionState::Connected, true), Err(Refusal::AlreadyRunning));
		assert_eq!(
			Command::StartGame.check(ConnectionState::Connecting, false),
			Err(Refusal::NotConnected(ConnectionState::Connecting))
		);
		assert_eq!(
			Command::StartGame.check(ConnectionState::Error, false),
			Err(Refusal::NotConnected(ConnectionState::Error))
		);
	}

	#[test]
	fn test_stop_requires_connected_and_running() {
		assert_eq!(Command::StopGame.check(ConnectionState::Connected, true), Ok(()));
		assert_eq!(Command::StopGame.check(ConnectionState::Connected, false), Err(Refusal::NotRunning));
		assert_eq!(
			Command::StopGame.check(ConnectionState::Disconnected, true),
			Err(Refusal::NotConnected(ConnectionState::Disconnected))
		);
	}

	#[test]
	fn test_command_messages() {
		assert_eq!(Command::StartGame.message(), ClientMessage::StartGame);
		assert_eq!(Command::StopGame.message(), ClientMessage::StopGame);
		assert_eq!(Command::StopGame.name(), "stop_game");
		assert_eq!(Refusal::NotConnected(ConnectionState::Error).reason(), "connection is error");
	}
}
