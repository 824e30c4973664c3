//! Battle UI: turn state, button enablement and the attack round trip.
//!
//! `controller` is the entry point; the other modules are the pure pieces it
//! is built from.

pub mod controller;
pub mod ids;
pub mod response;
pub mod turns;
