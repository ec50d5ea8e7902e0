use log::debug;

use std::collections::BTreeMap;

use crate::config::*;

/// Picks one alternative among the tied ones.
///
/// `Highest` and `Lowest` are resolved here. Each rule injects its own policy for
/// `ByAgent` through `by_agent`, which receives the agent and the tied alternatives.
pub(crate) fn break_tie<F>(
    tied: &[Alternative],
    tie_break: TieBreak,
    by_agent: F,
) -> Result<Alternative, VotingErrors>
where
    F: FnOnce(Agent, &[Alternative]) -> Result<Alternative, VotingErrors>,
{
    let res = match tie_break {
        TieBreak::Highest => tied.iter().max().cloned().ok_or(VotingErrors::EmptyElection),
        TieBreak::Lowest => tied.iter().min().cloned().ok_or(VotingErrors::EmptyElection),
        TieBreak::ByAgent(agent) => by_agent(agent, tied),
    };
    debug!("break_tie: tied: {:?} mode: {} -> {:?}", tied, tie_break, res);
    res
}

/// Among the tied alternatives, the one that this agent ranks first.
pub(crate) fn preferred_by_agent(
    profile: &PreferenceProfile,
    agent: Agent,
    tied: &[Alternative],
) -> Result<Alternative, VotingErrors> {
    let ranking = profile.get(agent).ok_or(VotingErrors::InvalidAgent(agent))?;
    tied.iter()
        .filter_map(|alt| ranking.iter().position(|x| x == alt).map(|pos| (pos, *alt)))
        .min()
        .map(|(_, alt)| alt)
        .ok_or(VotingErrors::InvalidAgent(agent))
}

/// The tie-break resolver shared by the rules.
///
/// With `ByAgent(a)`, the winner is the tied alternative in the earliest position of
/// the ranking of agent `a`. It fails if `a` is not in the profile, or if `a` ranks
/// none of the tied alternatives.
pub fn resolve_tie(
    tied: &[Alternative],
    tie_break: TieBreak,
    profile: &PreferenceProfile,
) -> Result<Alternative, VotingErrors> {
    break_tie(tied, tie_break, |agent, tied| {
        preferred_by_agent(profile, agent, tied)
    })
}

/// All the alternatives that reach the best score, in increasing order.
pub(crate) fn max_scorers<S: PartialOrd + Copy>(
    scores: &BTreeMap<Alternative, S>,
) -> Vec<Alternative> {
    let mut best: Option<S> = None;
    for s in scores.values() {
        if best.map_or(true, |b| *s > b) {
            best = Some(*s);
        }
    }
    match best {
        Some(b) => scores
            .iter()
            .filter_map(|(alt, s)| if *s == b { Some(*alt) } else { None })
            .collect(),
        None => Vec::new(),
    }
}
