//! In-browser battle server: offline stand-in for the game's HTTP backend.
//!
//! Serves the same endpoints the client consumes, resolving attacks with the
//! backend's rules. State (roster, session, RNG) lives in WASM memory
//! (`thread_local!`) for the lifetime of the worker; `session` can
//! snapshot it for localStorage.

pub mod combat;
pub mod roster;
pub mod session;

use std::cell::RefCell;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

thread_local! {
    static RNG: RefCell<ChaCha8Rng> = RefCell::new(ChaCha8Rng::from_entropy());
}

/// Execute a closure with the server RNG.
pub fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut ChaCha8Rng) -> R,
{
    RNG.with(|rng| f(&mut rng.borrow_mut()))
}

/// Reseed the server RNG (reproducible battles).
pub fn seed_rng(seed: u64) {
    RNG.with(|rng| *rng.borrow_mut() = ChaCha8Rng::seed_from_u64(seed));
}
