use airscribe::retrieval::{run_query, Index};

fn sample_index() -> Index {
    let json = r#"{
        "contours": {
            "exact-match": [69, 69, 71, 72, 74, 74, 76],
            "near-match": [69, 69, 71, 72, 74, 74, 77],
            "unrelated": [48, 50, 52, 53, 55, 57, 59]
        }
    }"#;
    Index::from_json(json).unwrap()
}

#[test]
fn exact_query_ranks_its_own_setting_first() {
    let index = sample_index();
    let query = vec![69, 69, 71, 72, 74, 74, 76];
    let results = run_query(&query, &index);

    assert!(!results.is_empty());
    assert_eq!(results[0].0, "exact-match");
    assert!(results[0].1 >= results[1].1);
}

#[test]
fn empty_query_returns_no_results() {
    let index = sample_index();
    let results = run_query(&[], &index);
    assert!(results.is_empty());
}

#[test]
fn results_are_ordered_by_descending_score() {
    let index = sample_index();
    let query = vec![69, 69, 71, 72, 74, 74, 76];
    let results = run_query(&query, &index);
    for pair in results.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
}
