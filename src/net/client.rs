use thiserror::Error;
use tokio::sync::mpsc;

use crate::logging;
use crate::net::protocol::{decode_server_message, encode_message, ClientMessage, ProtocolError, ServerMessage, StateUpdate};
use crate::net::transport::{Connector, EventSink, Link, LinkEvent, LinkId, TransportEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
	#[default]
	Disconnected,
	Connecting,
	Connected,
	Error,
}

impl ConnectionState {
	pub fn label(&self) -> &'static str {
		match self {
			ConnectionState::Disconnected => "disconnected",
			ConnectionState::Connecting => "connecting",
			ConnectionState::Connected => "connected",
			ConnectionState::Error => "error",
		}
	}

	pub fn is_live(&self) -> bool {
		matches!(self, ConnectionState::Connecting | ConnectionState::Connected)
	}
}

#[derive(Debug, Error)]
pub enum ClientError {
	#[error("not connected (state: {})", .0.label())]
	NotConnected(ConnectionState),
	#[error("transport link is gone")]
	LinkClosed,
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
}

// What a transport event means for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
	Update(StateUpdate),
	Closed,
}

pub struct Connection<C: Connector> {
	endpoint: String,
	connector: C,
	state: ConnectionState,
	link: Option<Link>,
	last_link: LinkId,
	events_tx: mpsc::UnboundedSender<LinkEvent>,
	events_rx: mpsc::UnboundedReceiver<LinkEvent>,
}

impl<C: Connector> Connection<C> {
	pub fn new(endpoint: impl Into<String>, connector: C) -> Self {
		let (events_tx, events_rx) = mpsc::unbounded_channel();
		Self {
			endpoint: endpoint.into(),
			connector,
			state: ConnectionState::Disconnected,
			link: None,
			last_link: 0,
			events_tx,
			events_rx,
		}
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub fn state(&self) -> ConnectionState {
		self.state
	}

	pub fn connector(&self) -> &C {
		&self.connector
	}

	pub fn current_link(&self) -> Option<LinkId> {
		self.link.as_ref().map(Link::id)
	}

	pub fn connect(&mut self) {
		if self.state.is_live() {
			return;
		}

		if let Some(stale) = self.link.take() {
			stale.close();
		}

		self.last_link += 1;
		let id = self.last_link;
		self.state = ConnectionState::Connecting;
		logging::net::connecting(&self.endpoint, id);

		let sink = EventSink::new(id, self.events_tx.clone());
		self.link = Some(self.connector.open(&self.endpoint, sink));
	}

	// Returns true when the session was live, i.e. the caller has state to drop.
	pub fn disconnect(&mut self) -> bool {
		let had_link = match self.link.take() {
			Some(link) => {
				link.close();
				true
			}
			None => false,
		};
		let was_live = self.state.is_live();
		self.state = ConnectionState::Disconnected;
		if had_link || was_live {
			logging::net::disconnected("requested");
		}
		had_link || was_live
	}

	pub fn send(&mut self, msg: &ClientMessage) -> Result<(), ClientError> {
		if self.state != ConnectionState::Connected {
			let err = ClientError::NotConnected(self.state);
			logging::net::send_failed(&err.to_string());
			return Err(err);
		}
		let Some(link) = self.link.as_ref() else {
			logging::net::send_failed("no link");
			return Err(ClientError::LinkClosed);
		};

		let text = encode_message(msg)?;
		if link.send(text) {
			Ok(())
		} else {
			logging::net::send_failed("link closed");
			Err(ClientError::LinkClosed)
		}
	}

	pub fn try_next(&mut self) -> Option<LinkEvent> {
		self.events_rx.try_recv().ok()
	}

	pub async fn next(&mut self) -> Option<LinkEvent> {
		self.events_rx.recv().await
	}

	pub fn handle(&mut self, event: LinkEvent) -> Option<Inbound> {
		let current = self.current_link();
		if current != Some(event.link) {
			logging::net::stale(event.link, current);
			return None;
		}

		match event.event {
			TransportEvent::Opened => {
				self.state = ConnectionState::Connected;
				logging::net::opened(event.link);
				None
			}
			TransportEvent::Message(text) => match decode_server_message(&text) {
				Ok(ServerMessage::StateUpdate(update)) => Some(Inbound::Update(update)),
				Ok(ServerMessage::Other(kind)) => {
					logging::net::ignored(&kind);
					None
				}
				Err(e) => {
					logging::net::malformed(&e.to_string(), &text);
					None
				}
			},
			TransportEvent::Closed => {
				self.link = None;
				self.state = ConnectionState::Disconnected;
				logging::net::closed(event.link);
				Some(Inbound::Closed)
			}
			TransportEvent::Error(msg) => {
				self.link = None;
				self.state = ConnectionState::Error;
				logging::net::error(event.link, &msg);
				None
			}
		}
	}
}
