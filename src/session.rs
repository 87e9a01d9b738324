use crate::commands::Command;
use crate::config::ClientConfig;
use crate::logging;
use crate::net::client::{Connection, ConnectionState, Inbound};
use crate::net::transport::{Connector, LinkEvent};
use crate::state::history::{History, Observation};
use crate::state::store::{GameSnapshot, GameStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	Transport(ConnectionState),
	Update(Observation),
}

// One live view of a game server: created when the viewer mounts, torn down
// with `disconnect` when it unmounts.
pub struct Session<C: Connector> {
	connection: Connection<C>,
	store: GameStore,
	history: History,
}

impl<C: Connector> Session<C> {
	pub fn new(config: &ClientConfig, connector: C) -> Self {
		Self {
			connection: Connection::new(config.endpoint.clone(), connector),
			store: GameStore::new().with_ai_log_limit(config.reasoning_log_limit),
			history: History::new(),
		}
	}

	pub fn endpoint(&self) -> &str {
		self.connection.endpoint()
	}

	pub fn connection_state(&self) -> ConnectionState {
		self.connection.state()
	}

	pub fn snapshot(&self) -> &GameSnapshot {
		self.store.snapshot()
	}

	pub fn history(&self) -> &History {
		&self.history
	}

	pub fn connector(&self) -> &C {
		self.connection.connector()
	}

	pub fn connect(&mut self) {
		self.connection.connect();
		if let Some(link) = self.connection.current_link() {
			logging::set_session_id(link);
		}
	}

	pub fn disconnect(&mut self) {
		let was_live = self.connection.disconnect();
		// A transport error keeps the last snapshot; tearing down clears it.
		if was_live || !self.store.snapshot().is_empty() {
			self.store.reset();
		}
	}

	pub fn start_game(&mut self) -> bool {
		self.dispatch(Command::StartGame)
	}

	pub fn stop_game(&mut self) -> bool {
		self.dispatch(Command::StopGame)
	}

	fn dispatch(&mut self, command: Command) -> bool {
		if let Err(refusal) = command.check(self.connection.state(), self.snapshot().is_running) {
			logging::command::skipped(command.name(), &refusal.reason());
			return false;
		}
		match self.connection.send(&command.message()) {
			Ok(()) => {
				logging::command::sent(command.name());
				true
			}
			Err(e) => {
				logging::command::skipped(command.name(), &e.to_string());
				false
			}
		}
	}

	// Applies every event already delivered; never waits.
	pub fn poll(&mut self) -> usize {
		let mut processed = 0;
		while let Some(event) = self.connection.try_next() {
			self.process(event);
			processed += 1;
		}
		processed
	}

	// Waits for the next event that changed something. The connection keeps
	// its own sender alive, so with no link this stays pending.
	pub async fn next_event(&mut self) -> Option<Step> {
		loop {
			let event = self.connection.next().await?;
			if let Some(step) = self.process(event) {
				return Some(step);
			}
		}
	}

	pub fn process(&mut self, event: LinkEvent) -> Option<Step> {
		let before = self.connection.state();
		match self.connection.handle(event) {
			Some(Inbound::Update(update)) => {
				self.store.apply(update);
				Some(Step::Update(self.history.observe(self.store.snapshot())))
			}
			Some(Inbound::Closed) => {
				self.store.reset();
				Some(Step::Transport(self.connection.state()))
			}
			None => {
				let after = self.connection.state();
				(after != before).then_some(Step::Transport(after))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::net::loopback::LoopbackConnector;
	use crate::net::protocol::{Player, Property, StateUpdate};
	use crate::net::transport::TransportEvent;

	fn session() -> (Session<LoopbackConnector>, LoopbackConnector) {
		let connector = LoopbackConnector::new();
		(Session::new(&ClientConfig::default(), connector.clone()), connector)
	}

	fn connected() -> (Session<LoopbackConnector>, LoopbackConnector) {
		let (mut session, connector) = session();
		session.connect();
		connector.emit_latest(TransportEvent::Opened);
		session.poll();
		(session, connector)
	}

	fn update(players: Vec<Player>, game_log: &[&str], running: bool, ai_log: &[&str]) -> StateUpdate {
		StateUpdate {
			players,
			game_log: game_log.iter().map(|s| s.to_string()).collect(),
			is_running: running,
			ai_log: ai_log.iter().map(|s| s.to_string()).collect(),
		}
	}

	fn pair(alice_money: i64, bob_money: i64) -> Vec<Player> {
		vec![
			Player::new("Player 1", alice_money).at(1).owning(vec![Property::new(1, "Mediterranean Avenue")]),
			Player::new("Player 2", bob_money).at(3).owning(vec![Property::new(3, "Baltic Avenue")]),
		]
	}

	#[test]
	fn test_round_history_scenario() {
		let (mut session, connector) = connected();
		assert_eq!(session.connection_state(), ConnectionState::Connected);

		connector.push_update(&update(
			vec![Player::new("Player 1", 1500), Player::new("Player 2", 1500)],
			&["Game started!"],
			false,
			&[],
		));
		session.poll();
		assert!(session.history().is_empty());

		connector.push_update(&update(pair(1440, 1440), &["Player 2 moved from 0 to 3"], true, &["@@@@ Round 1 @@@@", ""]));
		session.poll();
		assert_eq!(session.history().len(), 1);
		let first = session.history().records()[0].clone();
		assert_eq!(first.round, 1);
		assert_eq!(first.property_count(0), 1);
		assert_eq!(first.property_count(1), 1);

		connector.push_update(&update(pair(1300, 1600), &["Player 1 moved from 1 to 5"], true, &["Decision: PASS"]));
		session.poll();
		assert_eq!(session.history().records(), &[first.clone()]);

		connector.push_update(&update(pair(1300, 1600), &["Player 1 moved from 5 to 9"], true, &["@@@@ Round 2 @@@@", ""]));
		session.poll();
		assert_eq!(session.history().len(), 2);
		assert_eq!(session.history().records()[0], first);
		assert_eq!(session.history().records()[1].round, 2);
	}

	#[test]
	fn test_reasoning_log_accumulates_across_updates() {
		let (mut session, connector) = connected();
		connector.push_update(&update(pair(1, 1), &["a"], true, &["one"]));
		connector.push_update(&update(pair(2, 2), &["b"], true, &["two", "three"]));
		assert_eq!(session.poll(), 2);

		let snap = session.snapshot();
		assert_eq!(snap.game_log, vec!["b"]);
		assert_eq!(snap.players, pair(2, 2));
		assert_eq!(snap.ai_log, vec!["one", "two", "three"]);
	}

	#[test]
	fn test_unexpected_close_resets_snapshot_but_keeps_history() {
		let (mut session, connector) = connected();
		connector.push_update(&update(pair(1440, 1440), &["x"], true, &["@@@@ Round 1 @@@@"]));
		session.poll();
		assert_eq!(session.history().len(), 1);

		connector.emit_latest(TransportEvent::Closed);
		session.poll();

		assert_eq!(session.connection_state(), ConnectionState::Disconnected);
		assert!(session.snapshot().players.is_empty());
		assert!(!session.snapshot().is_running);
		assert!(session.snapshot().ai_log.is_empty());
		assert_eq!(session.history().len(), 1);
	}

	#[test]
	fn test_transport_error_preserves_snapshot() {
		let (mut session, connector) = connected();
		connector.push_update(&update(pair(1440, 1440), &["x"], true, &[]));
		session.poll();

		connector.emit_latest(TransportEvent::Error("broken pipe".to_string()));
		session.poll();

		assert_eq!(session.connection_state(), ConnectionState::Error);
		assert_eq!(session.snapshot().players, pair(1440, 1440));
		assert!(session.snapshot().is_running);
	}

	#[test]
	fn test_malformed_payload_changes_nothing() {
		let (mut session, connector) = connected();
		connector.push_update(&update(pair(1440, 1440), &["x"], true, &["@@@@ Round 1 @@@@"]));
		session.poll();
		let before = session.snapshot().clone();

		connector.emit_latest(TransportEvent::Message(r#"{"type":"state_update","data":{"players":"nope"}}"#.to_string()));
		connector.emit_latest(TransportEvent::Message("]]".to_string()));
		session.poll();

		assert_eq!(*session.snapshot(), before);
		assert_eq!(session.history().len(), 1);
		assert_eq!(session.connection_state(), ConnectionState::Connected);
	}

	#[test]
	fn test_start_game_requires_connection() {
		let (mut session, connector) = session();
		assert!(!session.start_game());

		session.connect();
		assert!(!session.start_game());
		assert!(connector.sent(0).is_empty());

		connector.emit_latest(TransportEvent::Opened);
		session.poll();
		assert!(session.start_game());
		assert_eq!(connector.sent(0), vec![r#"{"type":"start_game"}"#.to_string()]);
	}

	#[test]
	fn test_commands_gated_on_running_flag() {
		let (mut session, connector) = connected();
		assert!(!session.stop_game());
		assert!(connector.sent(0).is_empty());

		connector.push_update(&update(pair(1, 1), &["Game started!"], true, &[]));
		session.poll();
		assert!(!session.start_game());
		assert!(session.stop_game());
		assert_eq!(connector.sent(0), vec![r#"{"type":"stop_game"}"#.to_string()]);

		// Optimistic: nothing changes locally until the server confirms.
		assert!(session.snapshot().is_running);
	}

	#[test]
	fn test_disconnect_tears_down_and_resets() {
		let (mut session, connector) = connected();
		connector.push_update(&update(pair(1, 1), &["x"], true, &["@@@@ Round 3 @@@@"]));
		session.poll();

		session.disconnect();
		assert!(connector.is_closed(0));
		assert_eq!(session.connection_state(), ConnectionState::Disconnected);
		assert!(session.snapshot().is_empty());
		assert_eq!(session.history().len(), 1);
		assert!(!session.stop_game());
	}

	#[test]
	fn test_disconnect_after_error_resets_snapshot() {
		let (mut session, connector) = connected();
		connector.push_update(&update(pair(1, 1), &["x"], true, &[]));
		connector.emit_latest(TransportEvent::Error("reset by peer".to_string()));
		session.poll();
		assert_eq!(session.connection_state(), ConnectionState::Error);
		assert!(session.snapshot().is_running);

		session.disconnect();
		assert_eq!(session.connection_state(), ConnectionState::Disconnected);
		assert!(session.snapshot().is_empty());
	}

	#[test]
	fn test_reconnect_opens_single_new_link() {
		let (mut session, connector) = connected();
		session.connect();
		assert_eq!(connector.opened(), 1);

		connector.emit_latest(TransportEvent::Closed);
		session.poll();
		session.connect();
		session.connect();
		assert_eq!(connector.opened(), 2);
		assert_eq!(session.connection_state(), ConnectionState::Connecting);
	}

	#[test]
	fn test_new_game_clears_history() {
		let (mut session, connector) = connected();
		connector.push_update(&update(pair(1, 1), &["x"], true, &["@@@@ Round 1 @@@@"]));
		connector.push_update(&update(pair(1, 1), &["y"], true, &["@@@@ Round 2 @@@@"]));
		session.poll();
		assert_eq!(session.history().len(), 2);

		connector.push_update(&update(pair(1500, 1500), &["Game started!"], true, &[]));
		session.poll();
		assert!(session.history().is_empty());
	}

	#[test]
	fn test_endpoint_from_config() {
		let connector = LoopbackConnector::new();
		let config = ClientConfig::default().with_endpoint(Some("ws://10.1.1.1:5000/ws".to_string()));
		let mut session = Session::new(&config, connector.clone());
		session.connect();
		assert_eq!(session.endpoint(), "ws://10.1.1.1:5000/ws");
		assert_eq!(connector.endpoint(0).as_deref(), Some("ws://10.1.1.1:5000/ws"));
	}

	#[tokio::test]
	async fn test_next_event_reports_steps() {
		let (mut session, connector) = session();
		session.connect();
		connector.emit_latest(TransportEvent::Opened);
		connector.emit_latest(TransportEvent::Message(r#"{"type":"ping"}"#.to_string()));
		connector.push_update(&update(pair(1, 1), &["x"], true, &["@@@@ Round 4 @@@@"]));
		connector.push_update(&update(pair(2, 2), &["y"], true, &[]));
		connector.emit_latest(TransportEvent::Closed);

		assert_eq!(session.next_event().await, Some(Step::Transport(ConnectionState::Connected)));
		assert_eq!(session.next_event().await, Some(Step::Update(Observation::Recorded(4))));
		assert_eq!(session.next_event().await, Some(Step::Update(Observation::Unchanged(4))));
		assert_eq!(session.next_event().await, Some(Step::Transport(ConnectionState::Disconnected)));

		let idle = tokio::time::timeout(std::time::Duration::from_millis(20), session.next_event()).await;
		assert!(idle.is_err());
	}
}
