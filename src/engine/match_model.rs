//! Single-match result model.
//!
//! A match is decided by one uniform draw `i` against two cumulative
//! thresholds `c1 < c2`:
//!
//! - `i < c1`        → team 1 (the positional "home" side) wins
//! - `c1 <= i < c2`  → draw
//! - `i >= c2`       → team 2 wins
//!
//! Equal ratings use fixed base thresholds. Otherwise the stronger side's win
//! probability grows logarithmically with the rating gap, boosted by a tiered
//! multiplier that makes lopsided fixtures against weak sides more decisive.
//!
//! The floor (0.33) is below the equal-ratings base (0.37), so for gaps under
//! roughly 4.5 the stronger side wins less often than in an even fixture.
//! Past that gap its win probability is above the base and keeps rising.

use super::random::RandomSource;

/// Base probability of a team 1 win when ratings are equal.
const BASE_HOME_WIN: f64 = 0.37;
/// Base cumulative threshold above which team 2 wins.
const BASE_NOT_AWAY_WIN: f64 = 0.63;
/// Share of the stronger side's non-win mass that goes to a draw.
const DRAW_WEIGHT: f64 = 0.56;
/// Home advantage is supplied on a 0–10 scale and applied in rating points / 10.
const HOME_ADVANTAGE_SCALE: f64 = 10.0;
/// Ceiling for a rating after home advantage is added.
const MAX_RATING: f64 = 99.0;
/// Logarithm base for the gap floor; `log_b(100) ≈ 1` keeps the floor below 1.
const GAP_LOG_BASE: f64 = 100.0001;
/// Lowest win probability the stronger side can be assigned.
const GAP_FLOOR_MIN: f64 = 0.33;
/// Cap on `r * diff`, keeping the stronger side's win probability below 1.
const MULT_CAP: f64 = 99.5;

/// Result of a single match, from team 1's positional perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

/// Cumulative decision thresholds for one fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// `c1`: upper bound of the team 1 win band.
    pub home_win: f64,
    /// `c2`: upper bound of the draw band.
    pub not_away_win: f64,
}

impl Thresholds {
    pub const BASE: Thresholds = Thresholds {
        home_win: BASE_HOME_WIN,
        not_away_win: BASE_NOT_AWAY_WIN,
    };

    /// `(P(team 1 wins), P(draw), P(team 2 wins))`.
    pub fn probabilities(&self) -> (f64, f64, f64) {
        (
            self.home_win,
            self.not_away_win - self.home_win,
            1.0 - self.not_away_win,
        )
    }

    pub fn classify(&self, i: f64) -> MatchOutcome {
        if i < self.home_win {
            MatchOutcome::HomeWin
        } else if i < self.not_away_win {
            MatchOutcome::Draw
        } else {
            MatchOutcome::AwayWin
        }
    }
}

// ── Gap multiplier policy ───────────────────────────────────────────────────
//
// Evaluated top to bottom, first match wins. Bounds are strict `<` on the
// gap, so a gap of exactly 10 falls into the 10–20 tier. The weaker side's
// rating matters: beating a very weak team is easier than the raw gap says.

struct GapTier {
    applies: fn(diff: f64, weaker: f64) -> bool,
    multiplier: f64,
}

const GAP_TIERS: [GapTier; 8] = [
    GapTier { applies: |d, _| d < 10.0, multiplier: 0.1 },
    GapTier { applies: |d, w| d < 20.0 && w < 12.0, multiplier: 0.9 },
    GapTier { applies: |d, _| d < 20.0, multiplier: 0.3 },
    GapTier { applies: |d, w| d < 30.0 && w < 25.0, multiplier: 1.1 },
    GapTier { applies: |d, _| d < 30.0, multiplier: 0.45 },
    GapTier { applies: |d, w| d < 50.0 && w < 30.0, multiplier: 1.1 },
    GapTier { applies: |d, _| d < 50.0, multiplier: 0.75 },
    GapTier { applies: |_, w| w > 35.0, multiplier: 1.1 },
];

/// Used for gaps of 50+ against sides rated 35 or lower.
const DEFAULT_MULTIPLIER: f64 = 1.4;

pub fn gap_multiplier(diff: f64, weaker: f64) -> f64 {
    GAP_TIERS
        .iter()
        .find(|tier| (tier.applies)(diff, weaker))
        .map(|tier| tier.multiplier)
        .unwrap_or(DEFAULT_MULTIPLIER)
}

// ── Public API ──────────────────────────────────────────────────────────────

/// Decision thresholds for team 1 (rating `rating1`, receiving
/// `home_advantage`) against team 2.
///
/// Equality is tested on the raw ratings, before home advantage. A home side
/// that only draws level through its advantage is treated as the stronger
/// side with a zero gap.
pub fn outcome_thresholds(rating1: f64, rating2: f64, home_advantage: f64) -> Thresholds {
    if rating1 == rating2 {
        return Thresholds::BASE;
    }

    let t1 = (rating1 + home_advantage / HOME_ADVANTAGE_SCALE).min(MAX_RATING);
    let t2 = rating2;
    let team1_stronger = t1 >= t2;
    let (diff, weaker) = if team1_stronger {
        (t1 - t2, t2)
    } else {
        (t2 - t1, t1)
    };

    let mult = (gap_multiplier(diff, weaker) * diff).min(MULT_CAP);
    let floor = GAP_FLOOR_MIN.max((diff + 1.0).log(GAP_LOG_BASE));
    let strong_win = floor + mult / 100.0 * (1.0 - floor);

    if team1_stronger {
        let c1 = strong_win;
        Thresholds {
            home_win: c1,
            not_away_win: c1 + DRAW_WEIGHT * (1.0 - c1),
        }
    } else {
        let c2 = 1.0 - strong_win;
        Thresholds {
            home_win: c2 - DRAW_WEIGHT * c2,
            not_away_win: c2,
        }
    }
}

/// Simulate one match. Consumes exactly one uniform from `rng`.
pub fn simulate_match<R: RandomSource>(
    rating1: f64,
    rating2: f64,
    home_advantage: f64,
    rng: &mut R,
) -> MatchOutcome {
    let i = rng.uniform();
    outcome_thresholds(rating1, rating2, home_advantage).classify(i)
}

// ── Tests ───────────────────────────────────────────────────────────────────
