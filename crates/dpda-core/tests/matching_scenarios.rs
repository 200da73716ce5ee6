use dpda_core::{find_blocking_pair, run_profile, PreferenceProfile};

fn profile(doctors: Vec<Vec<usize>>, hospitals: Vec<Vec<usize>>) -> PreferenceProfile {
    PreferenceProfile::new(doctors, hospitals).expect("valid profile")
}

#[test]
fn shared_first_choice_resolves_by_hospital_preference() {
    let profile = profile(
        vec![vec![0, 1, 2], vec![1, 0, 2], vec![0, 1, 2]],
        vec![vec![0, 1, 2], vec![0, 1, 2], vec![0, 1, 2]],
    );
    let outcome = run_profile(&profile).expect("trial");
    assert_eq!(outcome.doctor_matches, vec![0, 1, 2]);
    assert_eq!(outcome.hospital_matches, vec![0, 1, 2]);
    // doctor 2 is turned away by hospitals 0 and 1 before settling on 2
    assert_eq!(outcome.proposal_count, 5);
    assert_eq!(outcome.doctor_ranks, vec![1, 1, 3]);
    assert_eq!(outcome.hospital_ranks, vec![1, 2, 3]);
    assert_eq!(find_blocking_pair(&profile, &outcome), None);
}

#[test]
fn distinct_first_choices_need_one_proposal_each() {
    let profile = profile(
        vec![vec![0, 1, 2], vec![1, 0, 2], vec![2, 1, 0]],
        vec![vec![0, 1, 2], vec![0, 1, 2], vec![0, 1, 2]],
    );
    let outcome = run_profile(&profile).expect("trial");
    assert_eq!(outcome.doctor_matches, vec![0, 1, 2]);
    assert_eq!(outcome.proposal_count, 3);
}

#[test]
fn hospital_trades_up_and_displaced_doctor_moves_on() {
    let profile = profile(vec![vec![0, 1], vec![0, 1]], vec![vec![1, 0], vec![0, 1]]);
    let outcome = run_profile(&profile).expect("trial");
    assert_eq!(outcome.doctor_matches, vec![1, 0]);
    assert_eq!(outcome.hospital_matches, vec![1, 0]);
    assert_eq!(outcome.proposal_count, 3);
    assert_eq!(outcome.doctor_ranks, vec![2, 1]);
    assert_eq!(outcome.hospital_ranks, vec![1, 1]);
}

#[test]
fn single_pair_matches_with_one_proposal() {
    let outcome = run_profile(&profile(vec![vec![0]], vec![vec![0]])).expect("trial");
    assert_eq!(outcome.doctor_matches, vec![0]);
    assert_eq!(outcome.hospital_matches, vec![0]);
    assert_eq!(outcome.proposal_count, 1);
    assert_eq!(outcome.doctor_ranks, vec![1]);
    assert_eq!(outcome.hospital_ranks, vec![1]);
}

#[test]
fn common_rankings_hit_quadratic_worst_case() {
    // every doctor ranks hospitals identically and every hospital ranks
    // doctors identically: doctor k is rejected k times
    let n = 6;
    let list: Vec<usize> = (0..n).collect();
    let profile = profile(vec![list.clone(); n], vec![list; n]);
    let outcome = run_profile(&profile).expect("trial");
    assert_eq!(outcome.doctor_matches, (0..n).collect::<Vec<_>>());
    assert_eq!(outcome.proposal_count, n * (n + 1) / 2);
}

#[test]
fn doctor_optimal_matching_is_returned() {
    // two stable matchings exist: {d0-h0, d1-h1} and {d0-h1, d1-h0};
    // doctors get their first choices in the doctor-optimal one
    let profile = profile(vec![vec![0, 1], vec![1, 0]], vec![vec![1, 0], vec![0, 1]]);
    let outcome = run_profile(&profile).expect("trial");
    assert_eq!(outcome.doctor_matches, vec![0, 1]);
    assert_eq!(outcome.doctor_ranks, vec![1, 1]);
    assert_eq!(outcome.hospital_ranks, vec![2, 2]);
}
