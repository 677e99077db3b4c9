use std::io::Write;

use recon_ingest::{
    ColumnBindings, IngestError, SheetOptions, read_channel_sheet, read_entity_dataset,
};
use tempfile::NamedTempFile;

fn temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn reads_entity_dataset_with_bindings() {
    let file = temp_csv(
        "Meter,Code,Label,Zone\n\
         SE01-BAY-010-extra,10,Bay ten,normal\n\
         SE02-BAY-011,011,,Place 1\n",
    );
    let bindings = ColumnBindings::new("Meter", "Code")
        .with_name("Label")
        .with_category("Zone");

    let dataset = read_entity_dataset(file.path(), &bindings, "registry").unwrap();

    assert_eq!(dataset.label, "registry");
    assert_eq!(dataset.len(), 2);
    let second = dataset.get("SE02-BAY-011").unwrap();
    assert_eq!(second.code, "011");
    assert_eq!(second.name, None);
    assert_eq!(second.category.as_deref(), Some("Place 1"));
}

#[test]
fn reads_channel_sheet() {
    let file = temp_csv(
        "route,d1,v1,d2,v2\n\
         srv/m1:g:SE01:B1:x,01-01-24 00:00:00,10,01-01-24 00:00:00,12\n\
         srv/m2:g:SE01:B1:x,01-01-24 00:15:00,11,,\n\
         ,01-01-24 00:30:00,12,,\n",
    );
    let options = SheetOptions {
        route_prefix: Some("srv/".to_string()),
    };

    let table = read_channel_sheet(file.path(), &options).unwrap();

    assert_eq!(
        table.identifiers(),
        &["m1:g:SE01:B1:x".to_string(), "m2:g:SE01:B1:x".to_string()]
    );
    assert_eq!(table.channel(0).unwrap().observation_count(), 3);
    assert_eq!(table.channel(1).unwrap().non_empty_dates().count(), 1);
}

#[test]
fn missing_sheet_reports_path() {
    let err = read_channel_sheet(
        std::path::Path::new("/nowhere/feature_1.csv"),
        &SheetOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
