use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{mpsc, oneshot};

use crate::net::protocol::{encode_state_update, StateUpdate};
use crate::net::transport::{Connector, EventSink, Link, TransportEvent};

fn lock_mutex<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|e| e.into_inner())
}

struct Peer {
	endpoint: String,
	sink: EventSink,
	outbound: mpsc::UnboundedReceiver<String>,
	shutdown: oneshot::Receiver<()>,
	closed: bool,
}

// In-process stand-in for the game server. Every `open` is recorded as a
// peer; the owner of the connector drives that peer by hand.
#[derive(Clone, Default)]
pub struct LoopbackConnector {
	peers: Arc<Mutex<Vec<Peer>>>,
}

impl LoopbackConnector {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn opened(&self) -> usize {
		lock_mutex(&self.peers).len()
	}

	pub fn endpoint(&self, peer: usize) -> Option<String> {
		lock_mutex(&self.peers).get(peer).map(|p| p.endpoint.clone())
	}

	pub fn emit(&self, peer: usize, event: TransportEvent) -> bool {
		lock_mutex(&self.peers)
			.get(peer)
			.map(|p| p.sink.emit(event))
			.unwrap_or(false)
	}

	pub fn emit_latest(&self, event: TransportEvent) -> bool {
		let count = self.opened();
		if count == 0 {
			return false;
		}
		self.emit(count - 1, event)
	}

	pub fn push_update(&self, update: &StateUpdate) -> bool {
		match encode_state_update(update) {
			Ok(text) => self.emit_latest(TransportEvent::Message(text)),
			Err(_) => false,
		}
	}

	pub fn sent(&self, peer: usize) -> Vec<String> {
		let mut peers = lock_mutex(&self.peers);
		let Some(p) = peers.get_mut(peer) else {
			return Vec::new();
		};
		let mut frames = Vec::new();
		while let Ok(text) = p.outbound.try_recv() {
			frames.push(text);
		}
		frames
	}

	pub fn is_closed(&self, peer: usize) -> bool {
		let mut peers = lock_mutex(&self.peers);
		let Some(p) = peers.get_mut(peer) else {
			return false;
		};
		if !p.closed {
			p.closed = !matches!(p.shutdown.try_recv(), Err(oneshot::error::TryRecvError::Empty));
		}
		p.closed
	}
}

impl Connector for LoopbackConnector {
	fn open(&self, endpoint: &str, sink: EventSink) -> Link {
		let (out_tx, out_rx) = mpsc::unbounded_channel();
		let (stop_tx, stop_rx) = oneshot::channel();
		let link = Link::new(sink.link(), out_tx, stop_tx);

		lock_mutex(&self.peers).push(Peer {
			endpoint: endpoint.to_string(),
			sink,
			outbound: out_rx,
			shutdown: stop_rx,
			closed: false,
		});

		link
	}
}
