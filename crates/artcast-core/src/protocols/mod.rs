//! Protocol encoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets, ranges and constants (source of truth)
//! - `packet`: the in-memory datagram, written only through `layout` offsets
//! - `error`: explicit, actionable errors
//!
//! Encoders are pure and contain no I/O; the `client` module owns the socket.

pub mod artnet;
