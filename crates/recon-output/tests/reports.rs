use std::fs;

use recon_match::EntityMatcher;
use recon_model::{EntityDataset, EntityRecord};
use recon_output::{
    MATCH_REPORT_SCHEMA, StoredCorrespondence, load_correspondence, save_correspondence,
    write_match_report,
};

#[test]
fn match_run_round_trips_through_store() {
    let left = EntityDataset::new(
        "meters",
        vec![
            EntityRecord::new("SE01:BAY:10:X", "010"),
            EntityRecord::new("SE09:BAY:99:Z", "9999"),
        ],
    );
    let right = EntityDataset::new(
        "registry",
        vec![EntityRecord::new("SE01-BAY-010-extra", "10").with_category("normal")],
    );
    let result = EntityMatcher::default().run(&left, &right);

    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("correspondence.json");
    save_correspondence(
        &store_path,
        &StoredCorrespondence::new("meters", "registry", result.correspondence.clone()),
    )
    .unwrap();
    let loaded = load_correspondence(&store_path).unwrap();
    assert_eq!(loaded.pairs, result.correspondence);

    let report_path = dir.path().join("match_report.json");
    write_match_report(&report_path, "meters", "registry", &result).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();

    assert_eq!(value["schema"], MATCH_REPORT_SCHEMA);
    assert_eq!(value["summary"]["matched"], 1);
    assert_eq!(value["unmatched_left"][0], "SE09:BAY:99:Z");
    assert_eq!(value["evidence"][0]["textual"], "code_contained");
}
