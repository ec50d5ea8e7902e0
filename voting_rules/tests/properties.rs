//! Property-based tests for the voting rules.

use proptest::prelude::*;

use voting_rules::*;

/// Strategy for valuation matrices with 1 to 6 agents and 1 to 5 alternatives.
/// Valuations are drawn from a small range to produce many ties.
fn matrix_strategy() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..=6, 1usize..=5).prop_flat_map(|(agents, alternatives)| {
        prop::collection::vec(
            prop::collection::vec((0i32..4).prop_map(f64::from), alternatives),
            agents,
        )
    })
}

fn tie_break_strategy(num_agents: usize) -> impl Strategy<Value = TieBreak> {
    prop_oneof![
        Just(TieBreak::Highest),
        Just(TieBreak::Lowest),
        (1..=num_agents as u32).prop_map(TieBreak::ByAgent),
    ]
}

fn matrix_and_tie_break() -> impl Strategy<Value = (Vec<Vec<f64>>, TieBreak)> {
    matrix_strategy().prop_flat_map(|m| {
        let n = m.len();
        (Just(m), tie_break_strategy(n))
    })
}

proptest! {
    /// Every derived ranking is a permutation of the alternatives.
    #[test]
    fn derived_rankings_are_permutations(values in matrix_strategy()) {
        let profile = derive_preferences(&values).unwrap();
        prop_assert_eq!(profile.num_agents(), values.len());
        let m = values[0].len();
        for (_, ranking) in profile.iter() {
            let mut sorted = ranking.to_vec();
            sorted.sort();
            prop_assert_eq!(sorted, (0..m).collect::<Vec<_>>());
        }
        prop_assert!(profile.validate().is_ok());
    }

    /// The dedicated rules agree with the generic scorer and their canonical vectors.
    #[test]
    fn dedicated_rules_match_generic_scorer((values, tb) in matrix_and_tie_break()) {
        let profile = derive_preferences(&values).unwrap();
        let m = values[0].len();
        prop_assert_eq!(
            plurality(&profile, tb),
            scoring_rule(&profile, &plurality_vector(m), tb)
        );
        prop_assert_eq!(
            borda(&profile, tb),
            scoring_rule(&profile, &borda_vector(m), tb)
        );
        prop_assert_eq!(
            harmonic(&profile, tb),
            scoring_rule(&profile, &harmonic_vector(m), tb)
        );
    }

    /// Without agent tie-breaks, veto agrees with the generic scorer.
    #[test]
    fn veto_matches_generic_scorer(values in matrix_strategy(), highest in any::<bool>()) {
        let profile = derive_preferences(&values).unwrap();
        let m = values[0].len();
        let tb = if highest { TieBreak::Highest } else { TieBreak::Lowest };
        prop_assert_eq!(
            veto(&profile, tb),
            scoring_rule(&profile, &veto_vector(m), tb)
        );
    }

    /// STV stops after at most m - 1 rounds and elects a ranked alternative.
    #[test]
    fn stv_terminates((values, tb) in matrix_and_tie_break()) {
        let profile = derive_preferences(&values).unwrap();
        let m = values[0].len();
        let (winner, rounds) = stv_rounds(&profile, tb).unwrap();
        prop_assert!(rounds.len() < m.max(1));
        prop_assert!(winner < m);
        // The winner is never eliminated.
        prop_assert!(rounds.iter().all(|r| !r.eliminated.contains(&winner)));
    }

    /// The shared resolver returns one of the tied alternatives.
    #[test]
    fn resolver_stays_in_tied_set(
        (values, tb) in matrix_and_tie_break(),
        mask in prop::collection::vec(any::<bool>(), 5),
    ) {
        let profile = derive_preferences(&values).unwrap();
        let m = values[0].len();
        let mut tied: Vec<Alternative> = (0..m).filter(|alt| mask[*alt]).collect();
        if tied.is_empty() {
            tied.push(0);
        }
        let winner = resolve_tie(&tied, tb, &profile).unwrap();
        prop_assert!(tied.contains(&winner));
    }

    /// The winner of every ordinal scoring rule has the best score for that rule.
    #[test]
    fn borda_winner_has_the_best_score((values, tb) in matrix_and_tie_break()) {
        let profile = derive_preferences(&values).unwrap();
        let m = values[0].len();
        let winner = borda(&profile, tb).unwrap();
        let mut scores = vec![0usize; m];
        for (_, ranking) in profile.iter() {
            for (i, alt) in ranking.iter().enumerate() {
                scores[*alt] += m - i - 1;
            }
        }
        let best = scores.iter().max().cloned().unwrap_or(0);
        prop_assert_eq!(scores[winner], best);
    }

    /// Range voting always returns a row number.
    #[test]
    fn range_voting_returns_a_row(values in matrix_strategy(), highest in any::<bool>()) {
        let tb = if highest { TieBreak::Highest } else { TieBreak::Lowest };
        let winner = range_voting(&values, tb).unwrap();
        prop_assert!(winner >= 1 && winner <= values.len());
    }
}

#[test]
fn small_worked_examples() {
    let profile = derive_preferences(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
    assert_eq!(profile.get(1), Some(&[1, 0][..]));
    assert_eq!(profile.get(2), Some(&[0, 1][..]));

    let unanimous: PreferenceProfile = vec![(1, vec![0, 1]), (2, vec![0, 1])].into_iter().collect();
    assert_eq!(plurality(&unanimous, TieBreak::Highest), Ok(0));

    let cyclic: PreferenceProfile = vec![(1, vec![0, 1, 2]), (2, vec![1, 2, 0]), (3, vec![2, 0, 1])]
        .into_iter()
        .collect();
    assert_eq!(veto(&cyclic, TieBreak::Lowest), Ok(0));

    assert_eq!(
        range_voting(&[vec![3.0, 5.0], vec![7.0, 1.0]], TieBreak::Highest),
        Ok(1)
    );

    assert_eq!(
        dictatorship(&unanimous, 3),
        Err(VotingErrors::InvalidAgent(3))
    );
}
