// ********* Input data structures ***********

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The identity of a voter. Agents are numbered from 1.
pub type Agent = u32;

/// The identity of an alternative. Alternatives are numbered from 0.
pub type Alternative = usize;

/// The strict ranking of every agent, from the first position to the last.
///
/// Agents are kept in increasing order of their identity, which makes every
/// computation on a profile deterministic.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct PreferenceProfile {
    rankings: BTreeMap<Agent, Vec<Alternative>>,
}

impl PreferenceProfile {
    pub fn new(rankings: BTreeMap<Agent, Vec<Alternative>>) -> PreferenceProfile {
        PreferenceProfile { rankings }
    }

    /// The ranking of the given agent, if this agent is part of the profile.
    pub fn get(&self, agent: Agent) -> Option<&[Alternative]> {
        self.rankings.get(&agent).map(|r| r.as_slice())
    }

    /// The alternative in the first position of the ranking of this agent.
    pub fn top_choice(&self, agent: Agent) -> Result<Alternative, VotingErrors> {
        let ranking = self.get(agent).ok_or(VotingErrors::InvalidAgent(agent))?;
        ranking.first().cloned().ok_or_else(|| {
            VotingErrors::Validation(format!("agent {} has an empty ranking", agent))
        })
    }

    pub fn num_agents(&self) -> usize {
        self.rankings.len()
    }

    /// All the alternatives that appear in at least one ranking.
    pub fn alternatives(&self) -> BTreeSet<Alternative> {
        self.rankings.values().flatten().cloned().collect()
    }

    pub fn num_alternatives(&self) -> usize {
        self.alternatives().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Agent, &[Alternative])> {
        self.rankings.iter().map(|(a, r)| (*a, r.as_slice()))
    }

    /// Checks that the profile is a proper mapping from agents to strict rankings:
    /// agent ids start at 1, rankings are not empty, have no duplicate entries and
    /// all have the same length.
    pub fn validate(&self) -> Result<(), VotingErrors> {
        let mut expected_len: Option<usize> = None;
        for (agent, ranking) in self.iter() {
            if agent == 0 {
                return Err(VotingErrors::Validation(
                    "agent ids must start at 1".to_string(),
                ));
            }
            if ranking.is_empty() {
                return Err(VotingErrors::Validation(format!(
                    "agent {} has an empty ranking",
                    agent
                )));
            }
            let distinct: BTreeSet<&Alternative> = ranking.iter().collect();
            if distinct.len() != ranking.len() {
                return Err(VotingErrors::Validation(format!(
                    "agent {} ranks the same alternative more than once: {:?}",
                    agent, ranking
                )));
            }
            match expected_len {
                Some(l) if l != ranking.len() => {
                    return Err(VotingErrors::Validation(format!(
                        "agent {} ranks {} alternatives, expected {}",
                        agent,
                        ranking.len(),
                        l
                    )));
                }
                _ => expected_len = Some(ranking.len()),
            }
        }
        Ok(())
    }
}

impl FromIterator<(Agent, Vec<Alternative>)> for PreferenceProfile {
    fn from_iter<I: IntoIterator<Item = (Agent, Vec<Alternative>)>>(iter: I) -> Self {
        PreferenceProfile {
            rankings: iter.into_iter().collect(),
        }
    }
}

// ********* Configuration **********

/// How to pick a single winner among alternatives with the same score.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TieBreak {
    /// The alternative with the greatest identity.
    Highest,
    /// The alternative with the smallest identity.
    Lowest,
    /// Defer to the ranking of the given agent.
    ByAgent(Agent),
}

impl FromStr for TieBreak {
    type Err = VotingErrors;

    fn from_str(s: &str) -> Result<TieBreak, VotingErrors> {
        match s.trim() {
            "max" | "highest" => Ok(TieBreak::Highest),
            "min" | "lowest" => Ok(TieBreak::Lowest),
            x => match x.parse::<Agent>() {
                Ok(agent) if agent > 0 => Ok(TieBreak::ByAgent(agent)),
                _ => Err(VotingErrors::InvalidTieBreak(x.to_string())),
            },
        }
    }
}

impl Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TieBreak::Highest => write!(f, "max"),
            TieBreak::Lowest => write!(f, "min"),
            TieBreak::ByAgent(agent) => write!(f, "{}", agent),
        }
    }
}

/// The voting rule to apply, with its parameters.
#[derive(PartialEq, Debug, Clone)]
pub enum VotingRule {
    /// The top choice of the given agent wins.
    Dictatorship(Agent),
    /// Positional scoring with one weight per rank position.
    Scoring(Vec<f64>),
    Plurality,
    Veto,
    Borda,
    Harmonic,
    /// Single transferable vote, with batch elimination of the weakest alternatives.
    Stv,
    /// Sums the raw valuations. The winner is a 1-indexed row of the valuation matrix.
    RangeVoting,
}

impl VotingRule {
    pub fn name(&self) -> &'static str {
        match self {
            VotingRule::Dictatorship(_) => "dictatorship",
            VotingRule::Scoring(_) => "scoring",
            VotingRule::Plurality => "plurality",
            VotingRule::Veto => "veto",
            VotingRule::Borda => "borda",
            VotingRule::Harmonic => "harmonic",
            VotingRule::Stv => "stv",
            VotingRule::RangeVoting => "range",
        }
    }
}

// ******** Output data structures *********

/// Statistics for one elimination round.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    /// The first-choice votes of every alternative still running.
    pub tally: Vec<(Alternative, u64)>,
    pub eliminated: Vec<Alternative>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct VotingResult {
    pub winner: Alternative,
    /// The derived preferences, for the rules that rely on them.
    pub profile: Option<PreferenceProfile>,
    /// Only filled for the elimination rules.
    pub round_stats: Vec<RoundStats>,
}

/// Errors that prevent a rule from computing a winner.
#[derive(PartialEq, Debug, Clone)]
pub enum VotingErrors {
    /// The valuation matrix is not rectangular, or contains values that cannot be compared.
    Format(String),
    /// The agent does not exist in the profile or in the valuation matrix.
    InvalidAgent(Agent),
    InvalidTieBreak(String),
    /// The preference profile is not a proper mapping from agents to strict rankings.
    Validation(String),
    /// A ranking does not have as many positions as the score vector.
    ScoreVectorLength { expected: usize, found: usize },
    EmptyElection,
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::Format(msg) => write!(f, "malformed valuation matrix: {}", msg),
            VotingErrors::InvalidAgent(agent) => write!(f, "invalid agent: {}", agent),
            VotingErrors::InvalidTieBreak(tb) => write!(f, "invalid tie-breaking option: {}", tb),
            VotingErrors::Validation(msg) => write!(f, "invalid preferences: {}", msg),
            VotingErrors::ScoreVectorLength { expected, found } => write!(
                f,
                "incorrect input: score vector has {} entries but a ranking has {}",
                expected, found
            ),
            VotingErrors::EmptyElection => write!(f, "no agents or no alternatives to vote on"),
        }
    }
}
