//! Drives a web admin UI toward a desired configuration state, and checks
//! that repeated schema captures of that UI are stable enough to automate
//! against.
//!
//! Two engines do the real work: the setting application engine
//! ([`apply`]) resolves each field's locator with a uniqueness-or-skip
//! fallback chain, writes values with per-type strategies, and verifies the
//! result; the drift detector ([`drift`]) matches settings across two
//! snapshots by identity-independent signatures and classifies structural
//! instability. The browser itself is an external collaborator behind the
//! [`browser::driver::UiDriver`] trait.

pub mod apply;
pub mod browser;
pub mod cli;
pub mod drift;
pub mod report;
pub mod schema;
pub mod trace;
