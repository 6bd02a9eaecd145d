//! Control-plane RPC transport for a node's JSON-RPC interface.
//!
//! This crate provides the minimal HTTP framing used to carry JSON-RPC
//! over a local socket, the envelope codec for the request/reply objects,
//! and the lifecycle of the file-based authentication cookie that gates
//! access to the interface. Method dispatch, TLS and the listener itself
//! live elsewhere; configuration (data directory, ports, overrides) is
//! handed in as plain values.

pub mod cookie;
pub mod http;
pub mod jsonrpc;
