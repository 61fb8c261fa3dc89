//! Monte Carlo simulation of FIFA World Cup qualifying.
//!
//! Every confederation's qualifying path is modelled match by match from team
//! ratings, then repeated over many seeded trials to estimate how often each
//! team reaches the finals or the inter-confederation playoff.

pub mod confederations;
pub mod engine;
pub mod error;
pub mod simulation;
pub mod teams;

#[cfg(test)]
mod testing;

pub use confederations::{PathOutcome, QualifyingPath, Scope, WorldCup, WorldCupOutcome};
pub use engine::{RandomSource, SimRng};
pub use error::{SimError, SimResult};
pub use simulation::{QualificationReport, Simulation, Tally};
pub use teams::{load_teams, Confederation, Team, TeamBook};
