pub mod report;

pub use report::{QualificationReport, ReportRow};

use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::confederations::PathOutcome;
use crate::engine::SimRng;
use crate::error::SimResult;

/// How many trials to run and where their random streams come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulation {
    pub trials: u32,
    pub seed: u64,
    pub parallel: bool,
}

impl Simulation {
    /// Without a seed one is drawn from entropy; it is kept so the run can be
    /// repeated.
    pub fn new(trials: u32, seed: Option<u64>) -> Self {
        Simulation {
            trials,
            seed: seed.unwrap_or_else(rand::random),
            parallel: true,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run `trial` once per trial index and count who qualified.
    ///
    /// Trial `t` always draws from `SimRng::for_trial(seed, t)`, so parallel
    /// and sequential runs with the same seed produce identical tallies.
    pub fn run<F>(&self, trial: F) -> Tally
    where
        F: Fn(&mut SimRng) -> SimResult<PathOutcome> + Sync,
    {
        info!(
            "Running {} trials (seed {}, {})",
            self.trials,
            self.seed,
            if self.parallel { "parallel" } else { "sequential" }
        );

        let tally = if self.parallel {
            (0..self.trials)
                .into_par_iter()
                .fold(Tally::default, |mut tally, t| {
                    self.play(&trial, t, &mut tally);
                    tally
                })
                .reduce(Tally::default, Tally::merge)
        } else {
            let mut tally = Tally::default();
            for t in 0..self.trials {
                self.play(&trial, t, &mut tally);
            }
            tally
        };

        info!(
            "Finished: {} trials succeeded, {} failed",
            tally.successful(),
            tally.failed
        );
        tally
    }

    fn play<F>(&self, trial: &F, t: u32, tally: &mut Tally)
    where
        F: Fn(&mut SimRng) -> SimResult<PathOutcome>,
    {
        let mut rng = SimRng::for_trial(self.seed, t as u64);
        match trial(&mut rng) {
            Ok(outcome) => tally.record(&outcome),
            Err(e) => {
                warn!("Trial {} failed: {}", t, e);
                tally.record_failure();
            }
        }
    }
}

/// Per-team counts over a batch of trials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub trials: u32,
    pub failed: u32,
    pub qualified: HashMap<String, u32>,
    pub playoff: HashMap<String, u32>,
}

impl Tally {
    pub fn record(&mut self, outcome: &PathOutcome) {
        self.trials += 1;
        for team in &outcome.qualified {
            *self.qualified.entry(team.clone()).or_default() += 1;
        }
        for team in &outcome.playoff {
            *self.playoff.entry(team.clone()).or_default() += 1;
        }
    }

    pub fn record_failure(&mut self) {
        self.trials += 1;
        self.failed += 1;
    }

    pub fn merge(mut self, other: Tally) -> Tally {
        self.trials += other.trials;
        self.failed += other.failed;
        for (team, n) in other.qualified {
            *self.qualified.entry(team).or_default() += n;
        }
        for (team, n) in other.playoff {
            *self.playoff.entry(team).or_default() += n;
        }
        self
    }

    pub fn successful(&self) -> u32 {
        self.trials - self.failed
    }

    pub fn qualified_count(&self, team: &str) -> u32 {
        self.qualified.get(team).copied().unwrap_or(0)
    }

    pub fn playoff_count(&self, team: &str) -> u32 {
        self.playoff.get(team).copied().unwrap_or(0)
    }
}
