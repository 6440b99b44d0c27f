//! # neviweb-app
//!
//! Application layer — **port definitions** (traits) and the poll loop.
//!
//! ## Responsibilities
//! - Define the outbound port to the shared vendor client ([`ports::NeviwebClient`])
//! - Define the integration lifecycle and the host sink
//!   ([`ports::Integration`], [`ports::IntegrationContext`])
//! - Drive polling cadence from the outside ([`services::poll_loop::PollLoop`]);
//!   sensor adapters never own a timer
//!
//! ## Dependency rule
//! Depends on `neviweb-domain` only (plus `tokio` for timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
