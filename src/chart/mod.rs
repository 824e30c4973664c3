//! Faction chart: member counts per faction rendered as a Chart.js bar chart.
//!
//! Parsing and chart construction are pure; the canvas binding lives in
//! `web::chart`.

pub mod config;
pub mod faction;
