use log::debug;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::*;

/// Checks that the matrix is rectangular and that all the values can be compared.
///
/// Returns the number of alternatives (the length of every row).
pub(crate) fn check_matrix(values: &[Vec<f64>]) -> Result<usize, VotingErrors> {
    let num_alternatives = values.first().map(|row| row.len()).unwrap_or(0);
    for (idx, row) in values.iter().enumerate() {
        if row.len() != num_alternatives {
            return Err(VotingErrors::Format(format!(
                "row {} has {} values, expected {}",
                idx + 1,
                row.len(),
                num_alternatives
            )));
        }
        if let Some(col) = row.iter().position(|v| v.is_nan()) {
            return Err(VotingErrors::Format(format!(
                "row {} column {} is not a number",
                idx + 1,
                col + 1
            )));
        }
    }
    Ok(num_alternatives)
}

// Row `idx` (from 0) belongs to agent `idx + 1`.
fn agent_of_row(idx: usize) -> Result<Agent, VotingErrors> {
    idx.checked_add(1)
        .and_then(|id| Agent::try_from(id).ok())
        .ok_or_else(|| VotingErrors::Format(format!("too many rows: row {} has no agent id", idx)))
}

/// Converts the valuations of every agent into a strict ranking.
///
/// Row `i` of the matrix becomes the ranking of agent `i + 1`. The alternatives are
/// sorted by increasing valuation. When two valuations are equal, the alternative
/// with the higher index comes first.
pub fn derive_preferences(values: &[Vec<f64>]) -> Result<PreferenceProfile, VotingErrors> {
    let num_alternatives = check_matrix(values)?;
    debug!(
        "derive_preferences: {} agents, {} alternatives",
        values.len(),
        num_alternatives
    );

    let mut rankings: BTreeMap<Agent, Vec<Alternative>> = BTreeMap::new();
    for (idx, row) in values.iter().enumerate() {
        let mut order: Vec<Alternative> = (0..row.len()).collect();
        // NaN was rejected above, the comparison is total.
        order.sort_by(|&x, &y| {
            row[x]
                .partial_cmp(&row[y])
                .unwrap_or(Ordering::Equal)
                .then(y.cmp(&x))
        });
        rankings.insert(agent_of_row(idx)?, order);
    }
    Ok(PreferenceProfile::new(rankings))
}
