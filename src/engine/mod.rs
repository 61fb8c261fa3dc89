pub mod draw;
pub mod group;
pub mod knockout;
pub mod match_model;
pub mod placement;
pub mod random;

pub use draw::{draw_groups, sort_by_ranking, split_into_pots, Group, Pot};
pub use group::{play_group_stage, play_round_robin, RoundRobin, StandingRow, Standings};
pub use knockout::{
    aggregate_two_legs, resolve_shootout, resolve_single_leg, resolve_single_leg_at,
    resolve_two_legs, Matchup, TieVerdict, Venue,
};
pub use match_model::{outcome_thresholds, simulate_match, MatchOutcome, Thresholds};
pub use placement::{extract_place, placement_teams, Normalization, Placement};
pub use random::{RandomSource, SimRng};
