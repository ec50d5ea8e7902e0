use log::{debug, info};

use std::collections::{BTreeMap, BTreeSet};

use crate::config::*;
use crate::tiebreak::resolve_tie;

// First-choice votes among the alternatives still running. Agents whose ranking is
// entirely eliminated do not vote.
fn compute_tally(
    profile: &PreferenceProfile,
    running: &[Alternative],
    eliminated: &BTreeSet<Alternative>,
) -> BTreeMap<Alternative, u64> {
    let mut tally: BTreeMap<Alternative, u64> = running.iter().map(|alt| (*alt, 0)).collect();
    for (_, ranking) in profile.iter() {
        let first_valid = ranking.iter().find(|alt| !eliminated.contains(*alt));
        if let Some(vc) = first_valid.and_then(|alt| tally.get_mut(alt)) {
            *vc += 1;
        }
    }
    tally
}

/// Single transferable vote.
pub fn stv(profile: &PreferenceProfile, tie_break: TieBreak) -> Result<Alternative, VotingErrors> {
    stv_rounds(profile, tie_break).map(|(winner, _)| winner)
}

/// Single transferable vote, with the statistics of every round.
///
/// In each round, every agent votes for its first alternative that is still running,
/// and all the alternatives with the fewest votes are eliminated together. The count
/// stops when a single alternative is left, or when all the running alternatives have
/// the same number of votes. The survivors then go through the tie-break.
///
/// Every round but the last eliminates at least one alternative, so there are at most
/// `m - 1` rounds for `m` alternatives.
pub fn stv_rounds(
    profile: &PreferenceProfile,
    tie_break: TieBreak,
) -> Result<(Alternative, Vec<RoundStats>), VotingErrors> {
    let alternatives = profile.alternatives();
    if alternatives.is_empty() {
        return Err(VotingErrors::EmptyElection);
    }

    let mut eliminated: BTreeSet<Alternative> = BTreeSet::new();
    let mut stats: Vec<RoundStats> = Vec::new();
    loop {
        let running: Vec<Alternative> = alternatives.difference(&eliminated).cloned().collect();
        if running.len() < 2 {
            break;
        }
        let round = (stats.len() + 1) as u32;
        let tally = compute_tally(profile, &running, &eliminated);
        debug!("stv: round {}: tally: {:?}", round, tally);

        let min_count = tally.values().min().cloned().unwrap_or(0);
        let weakest: Vec<Alternative> = tally
            .iter()
            .filter_map(|(alt, vc)| if *vc == min_count { Some(*alt) } else { None })
            .collect();

        if weakest.len() == running.len() {
            debug!(
                "stv: round {}: all the running alternatives have {} votes, stopping",
                round, min_count
            );
            stats.push(RoundStats {
                round,
                tally: tally.into_iter().collect(),
                eliminated: Vec::new(),
            });
            break;
        }

        debug!("stv: round {}: eliminating {:?}", round, weakest);
        eliminated.extend(weakest.iter().cloned());
        stats.push(RoundStats {
            round,
            tally: tally.into_iter().collect(),
            eliminated: weakest,
        });
    }

    let survivors: Vec<Alternative> = alternatives.difference(&eliminated).cloned().collect();
    let winner = resolve_tie(&survivors, tie_break, profile)?;
    info!(
        "stv: {} after {} rounds (survivors: {:?})",
        winner,
        stats.len(),
        survivors
    );
    Ok((winner, stats))
}
