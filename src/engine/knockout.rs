use tracing::debug;

use crate::error::SimResult;
use crate::teams::{Team, TeamBook};

use super::match_model::{simulate_match, MatchOutcome};
use super::random::RandomSource;

/// A knockout pairing: `(first/home team, second/away team)`.
pub type Matchup = (String, String);

/// Where a single-leg tie is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    /// No home advantage for either side
    Neutral,
    /// The first team of the pairing hosts
    HomeGround,
}

/// Who advances from a two-legged tie, judged on result categories only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieVerdict {
    First,
    Second,
    Shootout,
}

/// Penalty shootout: a coin flip. Consumes one uniform.
pub fn resolve_shootout<'a, R: RandomSource>(a: &'a str, b: &'a str, rng: &mut R) -> &'a str {
    if rng.uniform() < 0.5 {
        a
    } else {
        b
    }
}

/// Combine the two legs of a tie between A and B.
///
/// `first_leg` is A at home (HomeWin = A won), `second_leg` is B at home
/// (HomeWin = B won). One win plus a draw, or two wins, take the tie. Two
/// draws or a win apiece go to penalties; there is no aggregate score.
pub fn aggregate_two_legs(first_leg: MatchOutcome, second_leg: MatchOutcome) -> TieVerdict {
    use MatchOutcome::*;
    match (first_leg, second_leg) {
        (HomeWin, AwayWin) | (HomeWin, Draw) | (Draw, AwayWin) => TieVerdict::First,
        (AwayWin, HomeWin) | (AwayWin, Draw) | (Draw, HomeWin) => TieVerdict::Second,
        (Draw, Draw) | (HomeWin, HomeWin) | (AwayWin, AwayWin) => TieVerdict::Shootout,
    }
}

fn lookup_pairs<'b>(book: &'b TeamBook, matchups: &[Matchup]) -> SimResult<Vec<(&'b Team, &'b Team)>> {
    matchups
        .iter()
        .map(|(a, b)| Ok((book.get(a)?, book.get(b)?)))
        .collect()
}

/// Single-match ties at a neutral venue; draws go to a shootout.
pub fn resolve_single_leg<R: RandomSource>(
    book: &TeamBook,
    matchups: &[Matchup],
    rng: &mut R,
) -> SimResult<Vec<String>> {
    resolve_single_leg_at(book, matchups, Venue::Neutral, rng)
}

pub fn resolve_single_leg_at<R: RandomSource>(
    book: &TeamBook,
    matchups: &[Matchup],
    venue: Venue,
    rng: &mut R,
) -> SimResult<Vec<String>> {
    let pairs = lookup_pairs(book, matchups)?;
    let mut winners = Vec::with_capacity(pairs.len());
    for (a, b) in pairs {
        let advantage = match venue {
            Venue::Neutral => 0.0,
            Venue::HomeGround => a.home_advantage,
        };
        let winner = match simulate_match(a.rating, b.rating, advantage, rng) {
            MatchOutcome::HomeWin => a.name.as_str(),
            MatchOutcome::AwayWin => b.name.as_str(),
            MatchOutcome::Draw => {
                let w = resolve_shootout(&a.name, &b.name, rng);
                debug!("{} vs {} drawn, {} wins on penalties", a.name, b.name, w);
                w
            }
        };
        debug!("{} vs {}: {} advances", a.name, b.name, winner);
        winners.push(winner.to_string());
    }
    Ok(winners)
}

/// Home-and-away ties, each side using its own home advantage when hosting.
pub fn resolve_two_legs<R: RandomSource>(
    book: &TeamBook,
    matchups: &[Matchup],
    rng: &mut R,
) -> SimResult<Vec<String>> {
    let pairs = lookup_pairs(book, matchups)?;
    let mut winners = Vec::with_capacity(pairs.len());
    for (a, b) in pairs {
        let first = simulate_match(a.rating, b.rating, a.home_advantage, rng);
        let second = simulate_match(b.rating, a.rating, b.home_advantage, rng);
        let winner = match aggregate_two_legs(first, second) {
            TieVerdict::First => a.name.as_str(),
            TieVerdict::Second => b.name.as_str(),
            TieVerdict::Shootout => resolve_shootout(&a.name, &b.name, rng),
        };
        debug!(
            "{} v {} ({:?}, {:?}): {} advances",
            a.name, b.name, first, second, winner
        );
        winners.push(winner.to_string());
    }
    Ok(winners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::random::{ScriptedSource, SimRng};
    use crate::error::SimError;
    use crate::teams::Confederation;
    use crate::testing::team;

    // Equal ratings and zero home advantage give the base thresholds, so the
    // scripted uniforms below map directly to results.
    const WIN: f64 = 0.10;
    const DRAW: f64 = 0.50;
    const LOSS: f64 = 0.90;

    fn level_book() -> TeamBook {
        TeamBook::new(vec![
            team("A", 60.0, 0.0, Confederation::Uefa, 10),
            team("B", 60.0, 0.0, Confederation::Uefa, 11),
        ])
        .unwrap()
    }

    fn pair() -> Vec<Matchup> {
        vec![("A".to_string(), "B".to_string())]
    }

    fn uniform_for(outcome: MatchOutcome) -> f64 {
        match outcome {
            MatchOutcome::HomeWin => WIN,
            MatchOutcome::Draw => DRAW,
            MatchOutcome::AwayWin => LOSS,
        }
    }

    #[test]
    fn two_leg_table_is_exhaustive() {
        use MatchOutcome::*;
        let cases = [
            (HomeWin, AwayWin, TieVerdict::First),
            (HomeWin, Draw, TieVerdict::First),
            (Draw, AwayWin, TieVerdict::First),
            (AwayWin, HomeWin, TieVerdict::Second),
            (AwayWin, Draw, TieVerdict::Second),
            (Draw, HomeWin, TieVerdict::Second),
            (Draw, Draw, TieVerdict::Shootout),
            (HomeWin, HomeWin, TieVerdict::Shootout),
            (AwayWin, AwayWin, TieVerdict::Shootout),
        ];
        for (first, second, expected) in cases {
            assert_eq!(aggregate_two_legs(first, second), expected, "{:?}/{:?}", first, second);
        }
    }

    #[test]
    fn two_legs_with_injected_results() {
        use MatchOutcome::*;
        let book = level_book();
        let all = [HomeWin, Draw, AwayWin];
        for first in all {
            for second in all {
                let verdict = aggregate_two_legs(first, second);
                // Shootout draw: 0.2 < 0.5 picks A, the first team
                let script = [uniform_for(first), uniform_for(second), 0.2];
                let mut rng = ScriptedSource::new(&script);
                let winners = resolve_two_legs(&book, &pair(), &mut rng).unwrap();
                let expected = match verdict {
                    TieVerdict::First | TieVerdict::Shootout => "A",
                    TieVerdict::Second => "B",
                };
                assert_eq!(winners, vec![expected], "{:?}/{:?}", first, second);
                let draws = if verdict == TieVerdict::Shootout { 3 } else { 2 };
                assert_eq!(rng.consumed(), draws, "{:?}/{:?}", first, second);
            }
        }
    }

    #[test]
    fn shootout_is_a_coin_flip() {
        let mut rng = ScriptedSource::new(&[0.49, 0.5]);
        assert_eq!(resolve_shootout("A", "B", &mut rng), "A");
        assert_eq!(resolve_shootout("A", "B", &mut rng), "B");

        let mut rng = SimRng::seeded(5);
        let a_wins = (0..10_000)
            .filter(|_| resolve_shootout("A", "B", &mut rng) == "A")
            .count();
        assert!((4_700..5_300).contains(&a_wins), "A won {} of 10000", a_wins);
    }

    #[test]
    fn single_leg_draw_goes_to_penalties() {
        let book = level_book();
        let mut rng = ScriptedSource::new(&[DRAW, 0.7]);
        let winners = resolve_single_leg(&book, &pair(), &mut rng).unwrap();
        assert_eq!(winners, vec!["B"]);
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn single_leg_decisive_result() {
        let book = level_book();
        let mut rng = ScriptedSource::new(&[WIN, LOSS]);
        let matchups = vec![
            ("A".to_string(), "B".to_string()),
            ("A".to_string(), "B".to_string()),
        ];
        let winners = resolve_single_leg(&book, &matchups, &mut rng).unwrap();
        assert_eq!(winners, vec!["A", "B"]);
    }

    #[test]
    fn home_ground_applies_home_advantage() {
        // Neutral: gap 10 puts the Host win band at ~0.535. Hosting adds one
        // rating point: gap 11 widens it to ~0.555. A draw of 0.545 separates them.
        let book = TeamBook::new(vec![
            team("Host", 60.0, 10.0, Confederation::Caf, 30),
            team("Guest", 50.0, 0.0, Confederation::Caf, 31),
        ])
        .unwrap();
        let matchup = vec![("Host".to_string(), "Guest".to_string())];

        let mut rng = ScriptedSource::new(&[0.545, 0.9]);
        let neutral = resolve_single_leg(&book, &matchup, &mut rng).unwrap();
        assert_eq!(neutral, vec!["Guest"], "neutral draw then Guest on penalties");
        assert_eq!(rng.consumed(), 2);

        let mut rng = ScriptedSource::new(&[0.545]);
        let home = resolve_single_leg_at(&book, &matchup, Venue::HomeGround, &mut rng).unwrap();
        assert_eq!(home, vec!["Host"]);
    }

    #[test]
    fn unknown_team_fails_before_any_draw() {
        let book = level_book();
        let matchups = vec![
            ("A".to_string(), "B".to_string()),
            ("A".to_string(), "Ghost".to_string()),
        ];
        let mut rng = ScriptedSource::new(&[]);
        let err = resolve_two_legs(&book, &matchups, &mut rng).unwrap_err();
        assert_eq!(err, SimError::UnknownTeam { name: "Ghost".into() });
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn stronger_team_usually_wins_two_legs() {
        let book = TeamBook::new(vec![
            team("Strong", 90.0, 5.0, Confederation::Afc, 20),
            team("Weak", 30.0, 5.0, Confederation::Afc, 150),
        ])
        .unwrap();
        let mut rng = SimRng::seeded(8);
        let matchup = vec![("Weak".to_string(), "Strong".to_string())];
        let strong = (0..2_000)
            .filter(|_| resolve_two_legs(&book, &matchup, &mut rng).unwrap()[0] == "Strong")
            .count();
        assert!(strong > 1_800, "Strong advanced only {} of 2000", strong);
    }
}
