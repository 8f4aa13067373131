//! bulkdns Infrastructure Layer
//!
//! Wire-level DNS exchange over UDP and system resolver discovery.
pub mod dns;
pub mod system;
