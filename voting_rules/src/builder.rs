use std::collections::BTreeMap;

pub use crate::config::*;
use crate::preferences::derive_preferences;

/// A builder for preference profiles.
///
/// ```
/// use voting_rules::builder::Builder;
/// use voting_rules::{plurality, TieBreak};
/// # use voting_rules::VotingErrors;
///
/// let profile = Builder::new()
///     .ranking(1, &[0, 1, 2])?
///     .ranking(2, &[0, 2, 1])?
///     .build();
///
/// assert_eq!(plurality(&profile, TieBreak::Highest)?, 0);
///
/// # Ok::<(), VotingErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _rankings: BTreeMap<Agent, Vec<Alternative>>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Adds the ranking of an agent, from the first position to the last.
    pub fn ranking(mut self, agent: Agent, alternatives: &[Alternative]) -> Result<Builder, VotingErrors> {
        self.add_ranking(agent, alternatives)?;
        Ok(self)
    }

    /// Adds the ranking of an agent. Agents start at 1 and may only be added once.
    pub fn add_ranking(&mut self, agent: Agent, alternatives: &[Alternative]) -> Result<(), VotingErrors> {
        if agent == 0 {
            return Err(VotingErrors::Validation(
                "agent ids must start at 1".to_string(),
            ));
        }
        if self._rankings.contains_key(&agent) {
            return Err(VotingErrors::Validation(format!(
                "agent {} already has a ranking",
                agent
            )));
        }
        self._rankings.insert(agent, alternatives.to_vec());
        Ok(())
    }

    /// Adds one agent per row of valuations, numbered after the agents already present.
    pub fn valuations(mut self, values: &[Vec<f64>]) -> Result<Builder, VotingErrors> {
        let offset = self._rankings.keys().max().cloned().unwrap_or(0);
        let derived = derive_preferences(values)?;
        for (agent, ranking) in derived.iter() {
            let id = agent.checked_add(offset).ok_or_else(|| {
                VotingErrors::Validation(format!("agent {} is out of range", agent))
            })?;
            self.add_ranking(id, ranking)?;
        }
        Ok(self)
    }

    pub fn build(self) -> PreferenceProfile {
        PreferenceProfile::new(self._rankings)
    }
}
