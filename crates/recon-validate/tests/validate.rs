use std::collections::BTreeSet;

use proptest::prelude::*;
use recon_model::{Channel, ChannelTable, GroupKey};
use recon_validate::{
    ChannelValidator, TimestampComparator, build_device_tuples, group_positions,
};

fn channel(dates: &[&str], anchor: f64) -> Channel {
    Channel::new(
        dates.iter().map(|d| Some((*d).to_string())).collect(),
        dates
            .iter()
            .enumerate()
            .map(|(i, _)| Some(if i == 0 { anchor } else { 0.0 }))
            .collect(),
    )
}

#[test]
fn grouped_sheet_flags_diverging_channel() {
    let identifiers = vec![
        "meter_a:feeder:SE01:B1:kwh".to_string(),
        "meter_b:feeder:SE01:B1:kwh".to_string(),
        "meter_c:feeder:SE02:B9:kwh".to_string(),
        "meter_d:feeder:SE01:B2:kwh".to_string(),
        "meter_e:feeder:SE01:B2:kwh".to_string(),
    ];
    let channels = vec![
        channel(&["d1", "d2", "d3"], 10.0),
        channel(&["d1", "d2"], 12.0),
        channel(&["d1"], 5.0),
        channel(&["d1", "d2", "d3"], 10.0),
        channel(&["d1"], 10.0),
    ];
    let table = ChannelTable::new(identifiers.clone(), channels).unwrap();

    let tuples = build_device_tuples(&identifiers);
    let report = ChannelValidator::default().validate(&table, &tuples).unwrap();

    assert_eq!(report.tuples_checked, 2);
    assert_eq!(report.flagged, vec![0]);
    assert_eq!(report.missing_dates.len(), 1);
    assert_eq!(report.missing_dates[&0], vec!["d3".to_string()]);
}

#[test]
fn report_serializes_with_numeric_keys() {
    let identifiers = vec!["a:b:S:B".to_string(), "c:d:S:B".to_string()];
    let table = ChannelTable::new(
        identifiers.clone(),
        vec![channel(&["d1", "d2"], 1.0), channel(&["d1"], 2.0)],
    )
    .unwrap();
    let report = ChannelValidator::default()
        .validate(&table, &build_device_tuples(&identifiers))
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["flagged"], serde_json::json!([0]));
    assert_eq!(json["missing_dates"]["0"], serde_json::json!(["d2"]));
    assert_eq!(json["issues"][0]["kind"], "anchor_mismatch");
}

#[test]
fn comparator_handles_linked_datasets() {
    let meters = ["01-01-24 00:15:00", "01-01-24 00:30:00", "n/a"];
    let connections = ["2024-01-01 00:15:00", "2024-01-01 00:45:00"];

    let diff = TimestampComparator::default().symmetric_difference(meters, connections);

    assert_eq!(
        diff,
        vec![
            "2024-01-01 00:30:00".to_string(),
            "2024-01-01 00:45:00".to_string(),
        ]
    );
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u8..3, 0u8..3, 0u8..50).prop_map(|(a, b, n)| format!("dev{n}:grp:S{b}:A{a}:x")),
        "[a-z]{0,5}(:[a-z]{1,3})?",
    ]
}

proptest! {
    #[test]
    fn tuples_cover_every_pair_once(
        ids in proptest::collection::vec(identifier_strategy(), 0..30)
    ) {
        let tuples = build_device_tuples(&ids);
        let groups = group_positions(&ids);

        let expected: usize = groups
            .iter()
            .map(|(_, members)| members.len() * members.len().saturating_sub(1) / 2)
            .sum();
        prop_assert_eq!(tuples.len(), expected);

        let unique: BTreeSet<(usize, usize)> =
            tuples.iter().map(|t| (t.first, t.second)).collect();
        prop_assert_eq!(unique.len(), tuples.len());

        for t in &tuples {
            prop_assert!(t.first < t.second);
            prop_assert_eq!(
                GroupKey::from_identifier(&ids[t.first]),
                GroupKey::from_identifier(&ids[t.second])
            );
        }
    }

    #[test]
    fn malformed_identifiers_share_one_group(
        ids in proptest::collection::vec("[a-z]{0,4}(:[a-z]{0,4})?", 1..20)
    ) {
        let groups = group_positions(&ids);
        prop_assert_eq!(groups.len(), 1);
        prop_assert!(groups[0].0.is_sentinel());
        prop_assert_eq!(groups[0].1.len(), ids.len());
    }
}
