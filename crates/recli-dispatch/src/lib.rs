//! Command dispatch (spec §2 "Dispatch engine", §4.9): `bin/` path
//! resolution, fork/exec with piped stdout/stderr, non-blocking
//! multiplex, signal forwarding, and the syntax-discovery sub-mode used
//! by bootstrap.
//!
//! `recli-dispatch` never parses grammar text - `discover_syntax` hands
//! the caller already-prefixed lines of textual grammar syntax, which
//! `recli-cli`'s bootstrap feeds through `recli-parser` and merges via
//! `recli-core` (keeping this crate free of a `recli-parser` dependency;
//! see `DESIGN.md`).

mod error;
mod resolve;
mod signal;
mod spawn;
mod syntax_discovery;

pub use error::DispatchError;
pub use resolve::{resolve, Mode, Resolved};
pub use signal::{forward_signals_to_child, ignore_sigpipe};
pub use spawn::{spawn_and_multiplex, Outcome};
pub use syntax_discovery::{discover_syntax, DiscoveredSyntax};
