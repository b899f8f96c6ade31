//! Headless session layer for the link-state routing teaching tool.
//!
//! Sits between the engine ([`routesim_core`]) and a renderer. The session
//! owns the editable network graph, enforces the engine's input contract
//! (edit locking during a run, digits-only distance labels, duplicate-link
//! rejection), runs the simulation exactly once per run, and navigates the
//! recorded step sequence.
//!
//! # Usage
//!
//! ```rust,ignore
//! use routesim_session::{Session, sample::sample_network};
//!
//! let mut session = Session::with_network(sample_network()?);
//! let start = /* pick a node id from session.graph() */;
//! session.start(start)?;
//! while session.current_index()? + 1 < session.step_count()? {
//!     println!("{}", session.next()?.description);
//! }
//! session.stop();
//! ```

pub mod error;
pub mod sample;
pub mod session;

pub use error::SessionError;
pub use sample::sample_network;
pub use session::Session;
