pub mod client;
pub mod loopback;
pub mod protocol;
pub mod transport;

pub use client::{ClientError, Connection, ConnectionState, Inbound};
pub use loopback::LoopbackConnector;
pub use protocol::{ClientMessage, Player, Property, ServerMessage, StateUpdate};
pub use transport::{Connector, Link, LinkEvent, TransportEvent, WsConnector};
