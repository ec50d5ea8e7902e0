use log::{debug, info};

use crate::config::*;
use crate::preferences::check_matrix;

// Index of the first value that beats all the others according to `better`.
fn first_best<F: Fn(f64, f64) -> bool>(values: &[f64], better: F) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, v) in values.iter().enumerate() {
        if best.map_or(true, |(_, b)| better(*v, b)) {
            best = Some((idx, *v));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Range voting over the raw valuations.
///
/// The valuations of every row are summed up, and the result is a 1-indexed row:
/// - `Highest`: the first row with the largest sum
/// - `Lowest`: the first row with the smallest sum
/// - `ByAgent(a)`: the column `x` in `1..=rows` for which row `a` has the largest
///   valuation (the first one in case of equality). It fails with `InvalidAgent` when
///   `a` is not a row, or when row `a` has fewer columns than there are rows.
pub fn range_voting(values: &[Vec<f64>], tie_break: TieBreak) -> Result<Alternative, VotingErrors> {
    check_matrix(values)?;
    if values.is_empty() {
        return Err(VotingErrors::EmptyElection);
    }
    let sums: Vec<f64> = values.iter().map(|row| row.iter().sum()).collect();
    debug!("range_voting: sums: {:?}", sums);

    let winner = match tie_break {
        TieBreak::Highest => first_best(&sums, |v, b| v > b).map(|idx| idx + 1),
        TieBreak::Lowest => first_best(&sums, |v, b| v < b).map(|idx| idx + 1),
        TieBreak::ByAgent(agent) => {
            let row = (agent as usize)
                .checked_sub(1)
                .and_then(|idx| values.get(idx))
                .ok_or(VotingErrors::InvalidAgent(agent))?;
            let candidates = row
                .get(..values.len())
                .ok_or(VotingErrors::InvalidAgent(agent))?;
            first_best(candidates, |v, b| v > b).map(|idx| idx + 1)
        }
    }
    .ok_or(VotingErrors::EmptyElection)?;

    info!("range_voting: {} (tie-break: {})", winner, tie_break);
    Ok(winner)
}
