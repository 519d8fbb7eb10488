//! A Monte Carlo simulator of a double round-robin football league. Generates a balanced
//! fixture calendar, resolves matches from a power-based goal model, and forecasts the
//! eventual champion by repeated simulation of the remaining season.

pub mod domain;
pub mod fixture;
pub mod forecast;
pub mod print;
pub mod roster;
pub mod scoring;
pub mod season;
pub mod standings;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
