use log::{debug, warn};

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::ops::AddAssign;

use crate::config::*;
use crate::tiebreak::{break_tie, max_scorers, resolve_tie};

/// The top choice of the given agent.
pub fn dictatorship(profile: &PreferenceProfile, agent: Agent) -> Result<Alternative, VotingErrors> {
    let winner = profile.top_choice(agent)?;
    debug!("dictatorship: agent {} picks {}", agent, winner);
    Ok(winner)
}

// Every alternative of the profile gets an entry, even without points.
fn empty_tally<S: Copy>(profile: &PreferenceProfile, initial: S) -> BTreeMap<Alternative, S> {
    profile
        .alternatives()
        .into_iter()
        .map(|alt| (alt, initial))
        .collect()
}

fn check_not_empty(profile: &PreferenceProfile) -> Result<(), VotingErrors> {
    if profile.is_empty() || profile.alternatives().is_empty() {
        return Err(VotingErrors::EmptyElection);
    }
    Ok(())
}

/// Generic positional scoring.
///
/// Each agent gives `score_vector[i]` points to the alternative in position `i` of
/// its ranking. A ranking that does not have the length of the score vector is
/// reported as `ScoreVectorLength` and no winner is computed.
pub fn scoring_rule<S>(
    profile: &PreferenceProfile,
    score_vector: &[S],
    tie_break: TieBreak,
) -> Result<Alternative, VotingErrors>
where
    S: Copy + PartialOrd + AddAssign + Default + Debug,
{
    check_not_empty(profile)?;
    let mut scores: BTreeMap<Alternative, S> = empty_tally(profile, S::default());
    for (agent, ranking) in profile.iter() {
        if ranking.len() != score_vector.len() {
            warn!(
                "scoring_rule: incorrect input: agent {} ranks {} alternatives, the score vector has {} entries",
                agent,
                ranking.len(),
                score_vector.len()
            );
            return Err(VotingErrors::ScoreVectorLength {
                expected: score_vector.len(),
                found: ranking.len(),
            });
        }
        for (alt, points) in ranking.iter().zip(score_vector.iter()) {
            if let Some(s) = scores.get_mut(alt) {
                *s += *points;
            }
        }
    }
    debug!("scoring_rule: scores: {:?}", scores);
    resolve_tie(&max_scorers(&scores), tie_break, profile)
}

/// `[1, 0, ..., 0]`
pub fn plurality_vector(num_alternatives: usize) -> Vec<u64> {
    (0..num_alternatives)
        .map(|i| if i == 0 { 1 } else { 0 })
        .collect()
}

/// `[1, ..., 1, 0]`
pub fn veto_vector(num_alternatives: usize) -> Vec<u64> {
    (0..num_alternatives)
        .map(|i| if i + 1 == num_alternatives { 0 } else { 1 })
        .collect()
}

/// `[m - 1, m - 2, ..., 1, 0]`
pub fn borda_vector(num_alternatives: usize) -> Vec<u64> {
    (0..num_alternatives)
        .map(|i| (num_alternatives - i - 1) as u64)
        .collect()
}

/// `[1, 1/2, ..., 1/m]`
pub fn harmonic_vector(num_alternatives: usize) -> Vec<f64> {
    (0..num_alternatives).map(|i| 1.0 / (i + 1) as f64).collect()
}

/// One point for the top choice of every agent.
pub fn plurality(profile: &PreferenceProfile, tie_break: TieBreak) -> Result<Alternative, VotingErrors> {
    check_not_empty(profile)?;
    let mut scores: BTreeMap<Alternative, u64> = empty_tally(profile, 0);
    for (_, ranking) in profile.iter() {
        if let Some(s) = ranking.first().and_then(|top| scores.get_mut(top)) {
            *s += 1;
        }
    }
    debug!("plurality: scores: {:?}", scores);
    resolve_tie(&max_scorers(&scores), tie_break, profile)
}

/// Every alternative starts with one point per agent, and loses one point for every
/// agent that ranks it last.
///
/// This rule has its own policy for `ByAgent(a)`: when several alternatives are tied,
/// the top choice of agent `a` wins, whether or not it is part of the tie. The agent
/// must be in `1..=num_agents`, anything else is an invalid tie-breaking option.
/// A single winner is returned without looking at the tie-break.
pub fn veto(profile: &PreferenceProfile, tie_break: TieBreak) -> Result<Alternative, VotingErrors> {
    profile.validate()?;
    check_not_empty(profile)?;

    let num_agents = profile.num_agents() as u64;
    let mut scores: BTreeMap<Alternative, u64> = empty_tally(profile, num_agents);
    for (_, ranking) in profile.iter() {
        if let Some(s) = ranking.last().and_then(|last| scores.get_mut(last)) {
            *s -= 1;
        }
    }
    debug!("veto: scores: {:?}", scores);

    let winners = max_scorers(&scores);
    match winners.as_slice() {
        [] => Err(VotingErrors::EmptyElection),
        [winner] => Ok(*winner),
        _ => break_tie(&winners, tie_break, |agent, _| {
            if agent >= 1 && (agent as usize) <= profile.num_agents() {
                profile.top_choice(agent)
            } else {
                Err(VotingErrors::InvalidTieBreak(agent.to_string()))
            }
        }),
    }
}

/// `m - 1 - i` points for position `i`.
pub fn borda(profile: &PreferenceProfile, tie_break: TieBreak) -> Result<Alternative, VotingErrors> {
    check_not_empty(profile)?;
    let mut scores: BTreeMap<Alternative, u64> = empty_tally(profile, 0);
    for (_, ranking) in profile.iter() {
        for (i, alt) in ranking.iter().enumerate() {
            if let Some(s) = scores.get_mut(alt) {
                *s += (ranking.len() - i - 1) as u64;
            }
        }
    }
    debug!("borda: scores: {:?}", scores);
    resolve_tie(&max_scorers(&scores), tie_break, profile)
}

/// `1 / (i + 1)` points for position `i`.
pub fn harmonic(profile: &PreferenceProfile, tie_break: TieBreak) -> Result<Alternative, VotingErrors> {
    check_not_empty(profile)?;
    let mut scores: BTreeMap<Alternative, f64> = empty_tally(profile, 0.0);
    for (_, ranking) in profile.iter() {
        for (i, alt) in ranking.iter().enumerate() {
            if let Some(s) = scores.get_mut(alt) {
                *s += 1.0 / (i + 1) as f64;
            }
        }
    }
    debug!("harmonic: scores: {:?}", scores);
    resolve_tie(&max_scorers(&scores), tie_break, profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(rankings: &[&[Alternative]]) -> PreferenceProfile {
        rankings
            .iter()
            .enumerate()
            .map(|(idx, r)| ((idx + 1) as Agent, r.to_vec()))
            .collect()
    }

    #[test]
    fn dictatorship_top_choice() {
        let profile = p(&[&[2, 0, 1], &[1, 0, 2]]);
        assert_eq!(dictatorship(&profile, 2), Ok(1));
        assert_eq!(dictatorship(&profile, 1), Ok(2));
    }

    #[test]
    fn dictatorship_invalid_agent() {
        let profile = p(&[&[0, 1]]);
        assert_eq!(dictatorship(&profile, 5), Err(VotingErrors::InvalidAgent(5)));
        assert_eq!(dictatorship(&profile, 0), Err(VotingErrors::InvalidAgent(0)));
    }

    #[test]
    fn plurality_unanimous() {
        let profile = p(&[&[0, 1], &[0, 1]]);
        assert_eq!(plurality(&profile, TieBreak::Highest), Ok(0));
    }

    #[test]
    fn plurality_ties() {
        let profile = p(&[&[0, 1, 2], &[2, 1, 0], &[1, 0, 2]]);
        assert_eq!(plurality(&profile, TieBreak::Highest), Ok(2));
        assert_eq!(plurality(&profile, TieBreak::Lowest), Ok(0));
        // Agent 2 ranks 2 before 1 before 0.
        assert_eq!(plurality(&profile, TieBreak::ByAgent(2)), Ok(2));
        assert_eq!(plurality(&profile, TieBreak::ByAgent(3)), Ok(1));
        assert_eq!(
            plurality(&profile, TieBreak::ByAgent(4)),
            Err(VotingErrors::InvalidAgent(4))
        );
    }

    #[test]
    fn plurality_counts_alternatives_without_votes() {
        // Nobody puts 1 first, but it is still part of the tally.
        let profile = p(&[&[0, 1], &[2, 1]]);
        assert_eq!(plurality(&profile, TieBreak::Highest), Ok(2));
    }

    #[test]
    fn empty_profile() {
        let profile = PreferenceProfile::default();
        assert_eq!(plurality(&profile, TieBreak::Highest), Err(VotingErrors::EmptyElection));
        assert_eq!(borda(&profile, TieBreak::Highest), Err(VotingErrors::EmptyElection));
        assert_eq!(veto(&profile, TieBreak::Highest), Err(VotingErrors::EmptyElection));
    }

    #[test]
    fn veto_all_equal() {
        let profile = p(&[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]]);
        assert_eq!(veto(&profile, TieBreak::Lowest), Ok(0));
        assert_eq!(veto(&profile, TieBreak::Highest), Ok(2));
    }

    #[test]
    fn veto_by_agent_returns_top_choice() {
        // 1 is vetoed twice, 0 and 2 are tied. Agents 3 and 4 put 1 first.
        let profile = p(&[&[0, 2, 1], &[2, 0, 1], &[1, 2, 0], &[1, 0, 2]]);
        assert_eq!(veto(&profile, TieBreak::Highest), Ok(2));
        assert_eq!(veto(&profile, TieBreak::Lowest), Ok(0));
        assert_eq!(veto(&profile, TieBreak::ByAgent(3)), Ok(1));
        assert_eq!(veto(&profile, TieBreak::ByAgent(4)), Ok(1));
        assert_eq!(veto(&profile, TieBreak::ByAgent(2)), Ok(2));
    }

    #[test]
    fn veto_by_agent_out_of_range() {
        let profile = p(&[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]]);
        assert_eq!(
            veto(&profile, TieBreak::ByAgent(4)),
            Err(VotingErrors::InvalidTieBreak("4".to_string()))
        );
    }

    #[test]
    fn veto_single_winner_ignores_tie_break() {
        let profile = p(&[&[0, 1, 2], &[1, 0, 2], &[2, 1, 0]]);
        assert_eq!(veto(&profile, TieBreak::ByAgent(9)), Ok(1));
        assert_eq!(veto(&profile, TieBreak::Highest), Ok(1));
    }

    #[test]
    fn veto_rejects_malformed_profiles() {
        let duplicates = p(&[&[0, 0, 1]]);
        assert!(matches!(
            veto(&duplicates, TieBreak::Highest),
            Err(VotingErrors::Validation(_))
        ));
        let zero_agent: PreferenceProfile = vec![(0, vec![0, 1])].into_iter().collect();
        assert!(matches!(
            veto(&zero_agent, TieBreak::Highest),
            Err(VotingErrors::Validation(_))
        ));
        let ragged = p(&[&[0, 1], &[0, 1, 2]]);
        assert!(matches!(
            veto(&ragged, TieBreak::Highest),
            Err(VotingErrors::Validation(_))
        ));
    }

    #[test]
    fn borda_scores() {
        // Scores: 0 -> 2 + 0 + 1 = 3, 1 -> 1 + 2 + 2 = 5, 2 -> 0 + 1 + 0 = 1
        let profile = p(&[&[0, 1, 2], &[1, 2, 0], &[1, 0, 2]]);
        assert_eq!(borda(&profile, TieBreak::Lowest), Ok(1));
    }

    #[test]
    fn borda_tie_by_agent() {
        let profile = p(&[&[0, 1], &[1, 0]]);
        assert_eq!(borda(&profile, TieBreak::ByAgent(1)), Ok(0));
        assert_eq!(borda(&profile, TieBreak::ByAgent(2)), Ok(1));
    }

    #[test]
    fn harmonic_prefers_top_positions() {
        let profile = p(&[&[0, 1], &[1, 0]]);
        assert_eq!(harmonic(&profile, TieBreak::Lowest), Ok(0));
        assert_eq!(harmonic(&profile, TieBreak::Highest), Ok(1));
        let profile = p(&[&[0, 1, 2], &[0, 2, 1], &[1, 2, 0]]);
        assert_eq!(harmonic(&profile, TieBreak::Highest), Ok(0));
    }

    #[test]
    fn scoring_rule_length_mismatch() {
        let profile = p(&[&[0, 1, 2]]);
        assert_eq!(
            scoring_rule(&profile, &[1, 0], TieBreak::Highest),
            Err(VotingErrors::ScoreVectorLength {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn scoring_rule_canonical_vectors() {
        let profile = p(&[&[0, 1, 2], &[1, 2, 0], &[1, 0, 2], &[2, 0, 1]]);
        for tb in [TieBreak::Highest, TieBreak::Lowest, TieBreak::ByAgent(4)] {
            assert_eq!(
                scoring_rule(&profile, &plurality_vector(3), tb),
                plurality(&profile, tb)
            );
            assert_eq!(
                scoring_rule(&profile, &borda_vector(3), tb),
                borda(&profile, tb)
            );
            assert_eq!(
                scoring_rule(&profile, &harmonic_vector(3), tb),
                harmonic(&profile, tb)
            );
        }
    }

    #[test]
    fn canonical_vectors() {
        assert_eq!(plurality_vector(3), vec![1, 0, 0]);
        assert_eq!(veto_vector(3), vec![1, 1, 0]);
        assert_eq!(borda_vector(4), vec![3, 2, 1, 0]);
        assert_eq!(harmonic_vector(2), vec![1.0, 0.5]);
        assert!(veto_vector(0).is_empty());
    }
}
