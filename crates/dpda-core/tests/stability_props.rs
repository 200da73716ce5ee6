use dpda_core::{find_blocking_pair, run_profile, ModelSpec, PreferenceProfile, RngHandle};
use proptest::prelude::*;

fn model_strategy() -> impl Strategy<Value = ModelSpec> {
    prop_oneof![
        Just(ModelSpec::Uniform),
        (0.0f64..=1.0).prop_map(|lambda| ModelSpec::PublicPrivate { lambda }),
        Just(ModelSpec::PublicPrivate { lambda: 0.0 }),
        Just(ModelSpec::PublicPrivate { lambda: 1.0 }),
    ]
}

proptest! {
    #[test]
    fn matchings_are_stable_bijections(seed in any::<u64>(), n in 1usize..40, model in model_strategy()) {
        let mut rng = RngHandle::from_seed(seed);
        let profile = PreferenceProfile::generate(n, &model, &mut rng).unwrap();
        let outcome = run_profile(&profile).unwrap();

        prop_assert_eq!(outcome.size(), n);
        for (doctor, &hospital) in outcome.doctor_matches.iter().enumerate() {
            prop_assert_eq!(outcome.hospital_matches[hospital], doctor);
        }
        let mut hospitals_seen = outcome.doctor_matches.clone();
        hospitals_seen.sort_unstable();
        prop_assert_eq!(hospitals_seen, (0..n).collect::<Vec<_>>());

        prop_assert_eq!(find_blocking_pair(&profile, &outcome), None);

        prop_assert!(outcome.proposal_count >= n);
        prop_assert!(outcome.proposal_count <= n * n);
        // each proposal moves one doctor one step down its own list
        let rank_total: usize = outcome.doctor_ranks.iter().sum();
        prop_assert_eq!(rank_total, outcome.proposal_count);

        for rank in outcome.doctor_ranks.iter().chain(outcome.hospital_ranks.iter()) {
            prop_assert!((1..=n).contains(rank));
        }
    }

    #[test]
    fn ranks_match_preference_positions(seed in any::<u64>(), n in 1usize..24) {
        let mut rng = RngHandle::from_seed(seed);
        let profile = PreferenceProfile::generate(n, &ModelSpec::Uniform, &mut rng).unwrap();
        let outcome = run_profile(&profile).unwrap();
        for doctor in 0..n {
            let hospital = outcome.doctor_matches[doctor];
            prop_assert_eq!(profile.doctors[doctor][outcome.doctor_ranks[doctor] - 1], hospital);
            prop_assert_eq!(profile.hospitals[hospital][outcome.hospital_ranks[hospital] - 1], doctor);
        }
    }
}

#[test]
fn blocking_pair_detector_flags_unstable_assignment() {
    let profile =
        PreferenceProfile::new(vec![vec![0, 1], vec![0, 1]], vec![vec![1, 0], vec![0, 1]]).unwrap();
    let mut outcome = run_profile(&profile).unwrap();
    // swap partners: doctor 1 and hospital 0 now prefer each other
    outcome.doctor_matches = vec![0, 1];
    outcome.hospital_matches = vec![0, 1];
    assert_eq!(find_blocking_pair(&profile, &outcome), Some((1, 0)));
}
