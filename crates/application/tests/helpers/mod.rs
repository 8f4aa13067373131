#![allow(dead_code)]

pub mod mock_exchange;

pub use mock_exchange::{Behavior, ScriptedExchange};

use std::net::SocketAddr;

pub fn server(last: u8) -> SocketAddr {
    SocketAddr::from(([10, 0, 0, last], 53))
}
