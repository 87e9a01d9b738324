use futures_util::{SinkExt, StreamExt};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;

pub type LinkId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
	Opened,
	Message(String),
	Closed,
	Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEvent {
	pub link: LinkId,
	pub event: TransportEvent,
}

#[derive(Debug, Clone)]
pub struct EventSink {
	link: LinkId,
	tx: mpsc::UnboundedSender<LinkEvent>,
}

impl EventSink {
	pub fn new(link: LinkId, tx: mpsc::UnboundedSender<LinkEvent>) -> Self {
		Self { link, tx }
	}

	pub fn link(&self) -> LinkId {
		self.link
	}

	pub fn emit(&self, event: TransportEvent) -> bool {
		self.tx.send(LinkEvent { link: self.link, event }).is_ok()
	}
}

// Owning handle to one transport session. Dropping it tears the session down.
#[derive(Debug)]
pub struct Link {
	id: LinkId,
	outbound: mpsc::UnboundedSender<String>,
	shutdown: Option<oneshot::Sender<()>>,
}

impl Link {
	pub fn new(id: LinkId, outbound: mpsc::UnboundedSender<String>, shutdown: oneshot::Sender<()>) -> Self {
		Self {
			id,
			outbound,
			shutdown: Some(shutdown),
		}
	}

	pub fn id(&self) -> LinkId {
		self.id
	}

	pub fn send(&self, text: String) -> bool {
		self.outbound.send(text).is_ok()
	}

	pub fn close(self) {
		drop(self);
	}
}

impl Drop for Link {
	fn drop(&mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}

pub trait Connector {
	fn open(&self, endpoint: &str, sink: EventSink) -> Link;
}

pub struct WsConnector {
	runtime: Handle,
}

impl WsConnector {
	pub fn new(runtime: Handle) -> Self {
		Self { runtime }
	}

	// Must be called from inside a tokio runtime.
	pub fn current() -> Self {
		Self::new(Handle::current())
	}
}

impl Connector for WsConnector {
	fn open(&self, endpoint: &str, sink: EventSink) -> Link {
		let (out_tx, out_rx) = mpsc::unbounded_channel();
		let (stop_tx, stop_rx) = oneshot::channel();
		let link = Link::new(sink.link(), out_tx, stop_tx);

		self.runtime.spawn(run_link(endpoint.to_string(), sink, out_rx, stop_rx));

		link
	}
}

async fn run_link(
	endpoint: String,
	sink: EventSink,
	mut outbound: mpsc::UnboundedReceiver<String>,
	mut shutdown: oneshot::Receiver<()>,
) {
	let stream = tokio::select! {
		result = tokio_tungstenite::connect_async(endpoint.as_str()) => match result {
			Ok((stream, _response)) => stream,
			Err(e) => {
				sink.emit(TransportEvent::Error(e.to_string()));
				return;
			}
		},
		_ = &mut shutdown => return,
	};

	sink.emit(TransportEvent::Opened);
	let (mut write, mut read) = stream.split();

	loop {
		tokio::select! {
			incoming = read.next() => match incoming {
				Some(Ok(Message::Text(text))) => {
					sink.emit(TransportEvent::Message(text.as_str().to_owned()));
				}
				Some(Ok(Message::Close(_))) | None => {
					sink.emit(TransportEvent::Closed);
					break;
				}
				Some(Ok(_)) => {}
				Some(Err(e)) => {
					sink.emit(TransportEvent::Error(e.to_string()));
					break;
				}
			},
			outgoing = outbound.recv() => match outgoing {
				Some(text) => {
					if let Err(e) = write.send(Message::text(text)).await {
						sink.emit(TransportEvent::Error(e.to_string()));
						break;
					}
				}
				None => {
					let _ = write.close().await;
					break;
				}
			},
			_ = &mut shutdown => {
				let _ = write.close().await;
				break;
			}
		}
	}
}
