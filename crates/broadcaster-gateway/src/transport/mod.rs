//! Connection implementations and the wire codec

pub mod codec;
mod memory;
mod websocket;

pub use memory::{memory_connection, memory_connection_with_capacity, MemoryClient, MemoryConnection, DEFAULT_CLIENT_CAPACITY};
pub use websocket::WebSocketConnection;
