use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::Message};

use monopoly_watch::config::ClientConfig;
use monopoly_watch::net::protocol::encode_state_update;
use monopoly_watch::net::{ConnectionState, Player, Property, StateUpdate, WsConnector};
use monopoly_watch::state::Observation;
use monopoly_watch::{Session, Step};

const STEP_TIMEOUT: Duration = Duration::from_secs(5);

async fn next_step(session: &mut Session<WsConnector>) -> Option<Step> {
	tokio::time::timeout(STEP_TIMEOUT, session.next_event())
		.await
		.expect("timed out waiting for the session")
}

fn update(players: Vec<Player>, game_log: &str, running: bool, ai_log: &[&str]) -> StateUpdate {
	StateUpdate {
		players,
		game_log: vec![game_log.to_string()],
		is_running: running,
		ai_log: ai_log.iter().map(|s| s.to_string()).collect(),
	}
}

fn pair(first: i64, second: i64) -> Vec<Player> {
	vec![
		Player::new("Player 1", first).at(1).owning(vec![Property::new(1, "Mediterranean Avenue")]),
		Player::new("Player 2", second).at(3).owning(vec![Property::new(3, "Baltic Avenue")]),
	]
}

fn script() -> Vec<StateUpdate> {
	vec![
		update(
			vec![Player::new("Player 1", 1500), Player::new("Player 2", 1500)],
			"Game started!",
			true,
			&[],
		),
		update(pair(1440, 1440), "Player 2 moved from 0 to 3", true, &["@@@@ Round 1 @@@@", ""]),
		update(pair(1300, 1600), "Player 1 moved from 1 to 5", true, &["Decision: PASS"]),
		update(pair(1300, 1600), "Player 1 moved from 5 to 9", true, &["@@@@ Round 2 @@@@", ""]),
	]
}

async fn scripted_server(listener: TcpListener) -> String {
	let (tcp, _) = listener.accept().await.unwrap();
	let mut ws = accept_async(tcp).await.unwrap();

	// Unknown message types must be ignored by the client.
	ws.send(Message::text(r#"{"type":"lobby_info","data":{"tables":3}}"#.to_string())).await.unwrap();

	let command = loop {
		match ws.next().await {
			Some(Ok(Message::Text(text))) => break text.as_str().to_owned(),
			Some(Ok(_)) => continue,
			other => panic!("client went away: {:?}", other),
		}
	};

	for update in script() {
		ws.send(Message::text(encode_state_update(&update).unwrap())).await.unwrap();
	}
	ws.close(None).await.unwrap();
	while let Some(Ok(_)) = ws.next().await {}

	command
}

#[tokio::test]
async fn test_live_session_against_websocket_server() {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	let server = tokio::spawn(scripted_server(listener));

	let config = ClientConfig::default().with_endpoint(Some(format!("ws://{}/ws", addr)));
	let mut session = Session::new(&config, WsConnector::current());
	session.connect();
	assert_eq!(session.connection_state(), ConnectionState::Connecting);

	assert_eq!(next_step(&mut session).await, Some(Step::Transport(ConnectionState::Connected)));
	assert!(session.start_game());

	assert_eq!(next_step(&mut session).await, Some(Step::Update(Observation::Reset)));
	assert_eq!(next_step(&mut session).await, Some(Step::Update(Observation::Recorded(1))));
	assert_eq!(next_step(&mut session).await, Some(Step::Update(Observation::Unchanged(1))));
	assert_eq!(next_step(&mut session).await, Some(Step::Update(Observation::Recorded(2))));

	let records = session.history().records().to_vec();
	assert_eq!(records.len(), 2);
	assert_eq!(records[0].round, 1);
	assert_eq!(records[0].players[0].money, 1440);
	assert_eq!(records[0].property_count(0), 1);
	assert_eq!(records[0].property_count(1), 1);
	assert_eq!(records[1].round, 2);
	assert_eq!(records[1].players[1].money, 1600);

	let snapshot = session.snapshot();
	assert_eq!(snapshot.game_log, vec!["Player 1 moved from 5 to 9"]);
	assert_eq!(snapshot.ai_log.len(), 5);
	assert!(snapshot.is_running);

	assert_eq!(next_step(&mut session).await, Some(Step::Transport(ConnectionState::Disconnected)));
	assert!(session.snapshot().is_empty());
	assert_eq!(session.history().len(), 2);
	assert!(!session.start_game());

	let command = server.await.unwrap();
	assert_eq!(command, r#"{"type":"start_game"}"#);
}

#[tokio::test]
async fn test_refused_connection_ends_in_error() {
	// Bind then drop to get a port nothing listens on.
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);

	let config = ClientConfig::default().with_endpoint(Some(format!("ws://{}/ws", addr)));
	let mut session = Session::new(&config, WsConnector::current());
	session.connect();

	assert_eq!(next_step(&mut session).await, Some(Step::Transport(ConnectionState::Error)));
	assert!(session.snapshot().is_empty());
	assert!(!session.start_game());

	session.connect();
	assert_eq!(session.connection_state(), ConnectionState::Connecting);
	session.disconnect();
	assert_eq!(session.connection_state(), ConnectionState::Disconnected);
}
