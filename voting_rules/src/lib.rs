pub mod builder;
mod config;
pub mod manual;
mod preferences;
mod range;
mod scoring;
mod stv;
mod tiebreak;

use log::{debug, info};

pub use crate::config::*;
pub use crate::preferences::derive_preferences;
pub use crate::range::range_voting;
pub use crate::scoring::*;
pub use crate::stv::{stv, stv_rounds};
pub use crate::tiebreak::resolve_tie;

/// Applies an ordinal rule to a preference profile.
///
/// Returns the winner and, for the elimination rules, the statistics of every round.
/// Range voting works on the raw valuations and cannot be applied to a profile.
pub fn run_profile_rule(
    profile: &PreferenceProfile,
    rule: &VotingRule,
    tie_break: TieBreak,
) -> Result<(Alternative, Vec<RoundStats>), VotingErrors> {
    let winner = match rule {
        VotingRule::Dictatorship(agent) => dictatorship(profile, *agent)?,
        VotingRule::Scoring(score_vector) => scoring_rule(profile, score_vector, tie_break)?,
        VotingRule::Plurality => plurality(profile, tie_break)?,
        VotingRule::Veto => veto(profile, tie_break)?,
        VotingRule::Borda => borda(profile, tie_break)?,
        VotingRule::Harmonic => harmonic(profile, tie_break)?,
        VotingRule::Stv => return stv_rounds(profile, tie_break),
        VotingRule::RangeVoting => {
            return Err(VotingErrors::Format(
                "range voting needs the raw valuations, not a preference profile".to_string(),
            ));
        }
    };
    Ok((winner, Vec::new()))
}

/// Runs the given rule on a valuation matrix.
///
/// Arguments:
/// * `values` one row of valuations per agent, one column per alternative
/// * `rule` the rule that decides this election
/// * `tie_break` how to choose between alternatives with the same score
pub fn run_rule(
    values: &[Vec<f64>],
    rule: &VotingRule,
    tie_break: TieBreak,
) -> Result<VotingResult, VotingErrors> {
    info!(
        "Processing {} agents, rule: {}, tie-break: {}",
        values.len(),
        rule.name(),
        tie_break
    );

    let res = match rule {
        VotingRule::RangeVoting => VotingResult {
            winner: range_voting(values, tie_break)?,
            profile: None,
            round_stats: Vec::new(),
        },
        _ => {
            let profile = derive_preferences(values)?;
            for (agent, ranking) in profile.iter() {
                debug!("Agent {}: {:?}", agent, ranking);
            }
            let (winner, round_stats) = run_profile_rule(&profile, rule, tie_break)?;
            VotingResult {
                winner,
                profile: Some(profile),
                round_stats,
            }
        }
    };
    info!("Winner ({}): {}", rule.name(), res.winner);
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> Vec<Vec<f64>> {
        vec![
            vec![3.0, 1.0, 2.0],
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 1.0],
            vec![1.0, 3.0, 2.0],
        ]
    }

    #[test]
    fn run_rule_derives_preferences() {
        let _ = env_logger::builder().is_test(true).try_init();
        // Rankings: 1: [1, 2, 0], 2: [0, 1, 2], 3: [2, 0, 1], 4: [0, 2, 1]
        let res = run_rule(&values(), &VotingRule::Plurality, TieBreak::Highest).unwrap();
        assert_eq!(res.winner, 0);
        let profile = res.profile.unwrap();
        assert_eq!(profile.get(1), Some(&[1, 2, 0][..]));
        assert_eq!(profile.get(4), Some(&[0, 2, 1][..]));
        assert!(res.round_stats.is_empty());
    }

    #[test]
    fn run_rule_dispatch() {
        let values = values();
        let run = |rule: VotingRule, tb: TieBreak| run_rule(&values, &rule, tb).map(|r| r.winner);
        assert_eq!(run(VotingRule::Dictatorship(3), TieBreak::Highest), Ok(2));
        // Borda: 0 -> 0 + 2 + 1 + 2 = 5, 1 -> 2 + 1 + 0 + 0 = 3, 2 -> 1 + 0 + 2 + 1 = 4
        assert_eq!(run(VotingRule::Borda, TieBreak::Lowest), Ok(0));
        assert_eq!(
            run(VotingRule::Scoring(vec![2.0, 1.0, 0.0]), TieBreak::Lowest),
            Ok(0)
        );
        // Vetoes: 0, 2, 1, 1 -> 0: 3, 1: 2, 2: 3
        assert_eq!(run(VotingRule::Veto, TieBreak::Lowest), Ok(0));
        assert_eq!(run(VotingRule::Veto, TieBreak::ByAgent(1)), Ok(1));
        // Sums: 6, 6, 6, 6
        assert_eq!(run(VotingRule::RangeVoting, TieBreak::Highest), Ok(1));
    }

    #[test]
    fn run_rule_stv_reports_rounds() {
        let res = run_rule(&values(), &VotingRule::Stv, TieBreak::Highest).unwrap();
        // Round 1: 0 -> 2, 1 -> 1, 2 -> 1. 1 and 2 are eliminated together.
        assert_eq!(res.winner, 0);
        assert_eq!(res.round_stats.len(), 1);
        assert_eq!(res.round_stats[0].eliminated, vec![1, 2]);
    }

    #[test]
    fn range_voting_needs_valuations() {
        let profile = derive_preferences(&values()).unwrap();
        assert!(matches!(
            run_profile_rule(&profile, &VotingRule::RangeVoting, TieBreak::Highest),
            Err(VotingErrors::Format(_))
        ));
    }

    #[test]
    fn tie_break_parsing() {
        assert_eq!("max".parse::<TieBreak>(), Ok(TieBreak::Highest));
        assert_eq!("lowest".parse::<TieBreak>(), Ok(TieBreak::Lowest));
        assert_eq!(" 3 ".parse::<TieBreak>(), Ok(TieBreak::ByAgent(3)));
        assert_eq!(
            "0".parse::<TieBreak>(),
            Err(VotingErrors::InvalidTieBreak("0".to_string()))
        );
        assert_eq!(
            "median".parse::<TieBreak>(),
            Err(VotingErrors::InvalidTieBreak("median".to_string()))
        );
        assert_eq!(TieBreak::ByAgent(12).to_string(), "12");
        assert_eq!(TieBreak::Lowest.to_string(), "min");
    }
}
