mod common;

use arborist::driver::{self, DriverConfig};

use common::fixture;

#[test]
fn full_run_with_default_configuration() {
    let config = DriverConfig {
        moves_path: Some(fixture("data", "back_and_forth.txt")),
        ..DriverConfig::default()
    };
    let report = driver::run_all(&config).unwrap();

    let codes: Vec<(char, &str)> = report
        .huffman
        .codes
        .iter()
        .map(|(symbol, code)| (*symbol, code.as_str()))
        .collect();
    assert_eq!(codes, vec![('a', "0"), ('b', "100"), ('c', "101"), ('d', "11")]);

    assert_eq!(report.avl.inserted, 999);
    assert!(report.avl.is_clean(), "{:?}", report.avl);

    let segment = report.segment.expect("move file configured");
    assert_eq!(segment.computed, 1);
    assert_eq!(segment.matches(), Some(true));
}

#[test]
fn segment_file_without_solution() {
    let report = driver::run_segment_file(fixture("data", "zigzag_unknown.txt")).unwrap();
    assert_eq!(report.moves, 6);
    assert_eq!(report.computed, 3);
    assert_eq!(report.matches(), None);
}

#[test]
fn segment_file_with_wrong_solution() {
    let report = driver::run_segment_file(fixture("data", "wrong_answer.txt")).unwrap();
    assert_eq!(report.computed, 2);
    assert_eq!(report.expected, Some(3));
    assert_eq!(report.matches(), Some(false));
}

#[test]
fn malformed_move_file_reports_token() {
    let err = driver::run_segment_file(fixture("data", "malformed.txt")).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("loading move sequence"), "{chain}");
    assert!(chain.contains("token 3"), "{chain}");
}

#[test]
fn checked_sweep_stays_clean() {
    let config = DriverConfig {
        avl_keys: 300,
        check_each_step: true,
        ..DriverConfig::default()
    };
    let report = driver::run_avl(&config).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.leaked_nodes, 0);
}

#[cfg(feature = "visualize")]
#[test]
fn reports_serialize() {
    let report = driver::run_huffman("abracadabra").unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["encoded_bits"], report.encoded_bits);
}
