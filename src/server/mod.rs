//! CHLP server.
//!
//! # Connection State Machine
//!
//! Each accepted connection runs in its own task and goes through:
//!
//! ```text
//!        ┌──────────────────┐
//!        │  AwaitStartLine  │ ── no bytes at all ─────────────────┐
//!        └────────┬─────────┘ ── malformed ──► Respond(400) ──┐   │
//!                 ▼                                           │   │
//!        ┌──────────────────┐                                 │   │
//!        │   AwaitHeaders   │ ── stream ends early ───────────┼───┤
//!        └────────┬─────────┘                                 │   │
//!                 │ Body-Size > 0                             │   │
//!                 ▼                                           │   │
//!        ┌──────────────────┐                                 │   │
//!        │     ReadBody     │ ── short / too large ───────────┼───┤
//!        └────────┬─────────┘                                 │   │
//!                 ▼                                           │   │
//!        ┌──────────────────┐                                 │   │
//!        │     Dispatch     │  GET / POST / ECHO / 501        │   │
//!        └────────┬─────────┘                                 │   │
//!                 ▼                                           │   │
//!        ┌──────────────────┐                                 │   │
//!        │     Respond      │ ◄───────────────────────────────┘   │
//!        └────────┬─────────┘                                     │
//!                 ▼                                               │
//!        ┌──────────────────┐                                     │
//!        │      Closed      │ ◄───────────────────────────────────┘
//!        └──────────────────┘
//! ```
//!
//! There is no keep-alive: `Closed` is always reached after at most one
//! response.

pub mod connection;
pub mod handler;
pub mod listener;
pub mod storage;

pub use connection::{Connection, ConnectionState};
pub use handler::HandlerContext;
pub use listener::Listener;
pub use storage::Storage;
