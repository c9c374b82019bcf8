//! Knockout bracket: creation, tie resolution, automatic advancement, third-place match.

use crate::models::{
    Bracket, Participant, ParticipantId, Round, RoundName, Tie, TournamentError, BRACKET_SIZES,
    THIRD_PLACE_ID,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Winner and loser of a decided tie.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TieOutcome {
    pub winner: ParticipantId,
    pub loser: ParticipantId,
}

/// Build a bracket from a participant list (uses the thread RNG for the draw).
pub fn create_bracket(
    participants: Vec<Participant>,
    home_and_away: bool,
) -> Result<Bracket, TournamentError> {
    create_bracket_with_rng(participants, home_and_away, &mut rand::thread_rng())
}

/// Build a bracket: validate the size, shuffle, pair `(p0, p1), (p2, p3), ...` into round 1.
pub fn create_bracket_with_rng<R: Rng + ?Sized>(
    mut participants: Vec<Participant>,
    home_and_away: bool,
    rng: &mut R,
) -> Result<Bracket, TournamentError> {
    let count = participants.len();
    if !BRACKET_SIZES.contains(&count) {
        log::warn!("Rejected knockout with {} participants", count);
        return Err(TournamentError::InvalidBracketSize { count });
    }

    participants.shuffle(rng);
    let ids: Vec<ParticipantId> = participants.iter().map(|p| p.id).collect();
    let first_round = create_round(&ids, home_and_away, 0);

    log::info!(
        "Created knockout bracket: {} participants, first round {}",
        count,
        first_round.name
    );

    Ok(Bracket {
        initial_participant_count: count,
        home_and_away,
        participants,
        rounds: vec![first_round],
        third_place_match: None,
    })
}

/// Pair consecutive entrants into a round. `depth` is the 0-based round index (for tie ids).
///
/// Two legs only when home-and-away is on and the round is not the final.
pub fn create_round(entrants: &[ParticipantId], home_and_away: bool, depth: usize) -> Round {
    let two_legged = home_and_away && entrants.len() > 2;
    let ties = entrants
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| Tie::new(format!("R{}-T{}", depth + 1, i + 1), pair[0], pair[1], two_legged))
        .collect();

    Round {
        name: RoundName::for_count(entrants.len()),
        ties,
    }
}

/// Decide a tie from its scores, or `None` while it is undecided.
///
/// Single leg compares leg 1; two legs compare aggregates, where the home
/// side's total is `leg1_home + leg2_away` (leg 2 is hosted by the away
/// side). A level result goes to penalties, which must both be set and differ.
pub fn resolve_tie(tie: &Tie) -> Option<TieOutcome> {
    let (home_total, away_total) = if tie.two_legged {
        (
            tie.leg1_home? + tie.leg2_away?,
            tie.leg1_away? + tie.leg2_home?,
        )
    } else {
        (tie.leg1_home?, tie.leg1_away?)
    };

    let home_wins = if home_total != away_total {
        home_total > away_total
    } else {
        let (pens_home, pens_away) = (tie.penalties_home?, tie.penalties_away?);
        if pens_home == pens_away {
            return None;
        }
        pens_home > pens_away
    };

    Some(if home_wins {
        TieOutcome {
            winner: tie.home,
            loser: tie.away,
        }
    } else {
        TieOutcome {
            winner: tie.away,
            loser: tie.home,
        }
    })
}

fn apply_outcome(tie: &mut Tie) -> Option<ParticipantId> {
    let outcome = resolve_tie(tie);
    tie.winner = outcome.map(|o| o.winner);
    tie.loser = outcome.map(|o| o.loser);
    tie.winner
}

/// Recompute every tie from its scores, grow the bracket, and refresh the third-place match.
///
/// Cached winners are never trusted. When a round is fully decided with more
/// than one winner and the bracket is not complete, the next round is created
/// from the winners in tie order. If that round already exists, any tie whose
/// pairing no longer matches the winners is replaced by a fresh one; ties with
/// an unchanged pairing keep their scores. Every round after an undecided one
/// is removed. Calling this again with the same scores leaves the bracket
/// unchanged.
pub fn recompute(bracket: &mut Bracket) {
    let total_rounds = bracket.total_rounds();
    let mut r = 0;
    while r < bracket.rounds.len() {
        // Collect every outcome before folding into Option, so no tie is skipped.
        let winners: Option<Vec<ParticipantId>> = bracket.rounds[r]
            .ties
            .iter_mut()
            .map(apply_outcome)
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        let Some(winners) = winners else {
            // Rounds after an undecided one are drawn from stale winners.
            if bracket.rounds.len() > r + 1 {
                log::debug!(
                    "{} undecided, dropping {} later round(s)",
                    bracket.rounds[r].name,
                    bracket.rounds.len() - r - 1
                );
                bracket.rounds.truncate(r + 1);
            }
            break;
        };

        if winners.len() > 1 && r + 1 < total_rounds {
            match bracket.rounds.get_mut(r + 1) {
                Some(next) => reconcile_round(next, &winners),
                None => {
                    let next = create_round(&winners, bracket.home_and_away, r + 1);
                    log::info!("All ties decided, advancing to {}", next.name);
                    bracket.rounds.push(next);
                }
            }
        }
        r += 1;
    }

    update_third_place(bracket);
}

/// Bring an existing round in line with the winners of the round before it.
fn reconcile_round(round: &mut Round, winners: &[ParticipantId]) {
    for (tie, pair) in round.ties.iter_mut().zip(winners.chunks_exact(2)) {
        if tie.home != pair[0] || tie.away != pair[1] {
            log::debug!("Tie {} re-drawn after an earlier result changed", tie.id);
            *tie = Tie::new(tie.id.clone(), pair[0], pair[1], tie.two_legged);
        }
    }
}

/// Fill the third-place match from the semi-final losers, or clear it.
///
/// Scores already entered are kept while the same two losers stay in place.
fn update_third_place(bracket: &mut Bracket) {
    let losers = if bracket.initial_participant_count < 4 {
        None
    } else {
        bracket
            .rounds
            .iter()
            .find(|r| r.name == RoundName::SemiFinals)
            .and_then(|semis| semis.ties.iter().map(|t| t.loser).collect::<Option<Vec<_>>>())
            .filter(|losers| losers.len() == 2)
    };

    let Some(losers) = losers else {
        bracket.third_place_match = None;
        return;
    };

    let unchanged = bracket
        .third_place_match
        .as_ref()
        .is_some_and(|t| t.home == losers[0] && t.away == losers[1]);
    if !unchanged {
        bracket.third_place_match = Some(Tie::new(THIRD_PLACE_ID, losers[0], losers[1], false));
    }
    if let Some(tie) = bracket.third_place_match.as_mut() {
        apply_outcome(tie);
    }
}
