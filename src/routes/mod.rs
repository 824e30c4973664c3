//! Route handlers for the in-browser battle server. Each takes the raw
//! query/body string and returns a JSON body.

pub mod battle;
pub mod factions;
pub mod roster;
pub mod util;
