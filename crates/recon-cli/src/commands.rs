use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use recon_ingest::{
    SheetOptions, column_strings, read_channel_sheet, read_csv, read_entity_dataset, read_lines,
};
use recon_match::{EntityMatcher, FuzzyMatcher};
use recon_model::ChannelTable;
use recon_output::{
    HomologationSpec, StoredCorrespondence, apply_correspondence, load_correspondence,
    save_correspondence, write_channel_report, write_count_report, write_csv, write_fuzzy_report,
    write_match_report, write_repeated_values_report, write_timestamp_report,
};
use recon_validate::{
    ChannelValidator, TimestampComparator, build_device_tuples, pair_count_mismatches,
    repeated_values,
};
use tracing::{info, info_span, warn};

use recon_cli::config::ReconConfig;

use crate::cli::{
    ChannelsArgs, CompareArgs, CountsArgs, DuplicatesArgs, FuzzyArgs, HomologateArgs, MatchArgs,
};
use crate::types::{
    ChannelsOutcome, CompareOutcome, CountsOutcome, DuplicatesOutcome, FuzzyOutcome,
    HomologateOutcome, MatchOutcome, SheetOutcome,
};

pub fn run_match(config: &ReconConfig, args: &MatchArgs) -> Result<MatchOutcome> {
    let left_label = file_label(&args.left);
    let right_label = file_label(&args.right);
    let span = info_span!("match", left = %left_label, right = %right_label);
    let _guard = span.enter();

    let left = read_entity_dataset(&args.left, &config.left, &left_label)
        .with_context(|| format!("load {}", args.left.display()))?;
    let right = read_entity_dataset(&args.right, &config.right, &right_label)
        .with_context(|| format!("load {}", args.right.display()))?;

    let result = EntityMatcher::new(config.matcher.clone()).run(&left, &right);
    info!(
        matched = result.matched_count(),
        unmatched_left = result.unmatched_left.len(),
        excluded_left = result.excluded_left.len(),
        "matching complete"
    );

    let (report, correspondence) = match &args.output_dir {
        Some(dir) => {
            let report = write_match_report(
                &dir.join(format!("{left_label}.match.json")),
                &left_label,
                &right_label,
                &result,
            )?;
            let stored = StoredCorrespondence::new(
                left_label.as_str(),
                right_label.as_str(),
                result.correspondence.clone(),
            );
            let map = save_correspondence(
                &dir.join(format!("{left_label}.correspondence.json")),
                &stored,
            )?;
            (Some(report), Some(map))
        }
        None => (None, None),
    };

    Ok(MatchOutcome {
        left_label,
        right_label,
        result,
        report,
        correspondence,
    })
}

pub fn run_fuzzy(config: &ReconConfig, args: &FuzzyArgs) -> Result<FuzzyOutcome> {
    let mut fuzzy = config.fuzzy.clone();
    if let Some(threshold) = args.threshold {
        fuzzy.threshold = threshold;
    }
    if let Some(skip_chars) = args.skip_chars {
        fuzzy.skip_chars = skip_chars;
    }
    let left = read_lines(&args.left).with_context(|| format!("load {}", args.left.display()))?;
    let right =
        read_lines(&args.right).with_context(|| format!("load {}", args.right.display()))?;

    let threshold = fuzzy.threshold;
    let matches = FuzzyMatcher::new(fuzzy).match_names(&left, &right);
    let report = args
        .output
        .as_deref()
        .map(|path| write_fuzzy_report(path, threshold, &matches))
        .transpose()?;

    Ok(FuzzyOutcome {
        threshold,
        matches,
        report,
    })
}

pub fn run_channels(config: &ReconConfig, args: &ChannelsArgs) -> Result<ChannelsOutcome> {
    let validator = ChannelValidator::new(config.timestamps.clone());
    let mut sheets = Vec::with_capacity(args.sheets.len());

    for path in &args.sheets {
        let sheet = file_label(path);
        let span = info_span!("sheet", sheet = %sheet);
        let _guard = span.enter();

        let table = read_channel_sheet(path, &config.sheet)
            .with_context(|| format!("load {}", path.display()))?;
        let tuples = build_device_tuples(table.identifiers());
        let report = validator
            .validate(&table, &tuples)
            .with_context(|| format!("validate {}", path.display()))?;
        if report.has_issues() {
            warn!(flagged = report.flagged.len(), "inconsistent channels");
        }
        let report_path = match &args.output_dir {
            Some(dir) => Some(write_channel_report(
                &dir.join(format!("{sheet}.channels.json")),
                &sheet,
                &table,
                &report,
            )?),
            None => None,
        };
        sheets.push(SheetOutcome {
            sheet,
            table,
            report,
            report_path,
        });
    }

    Ok(ChannelsOutcome { sheets })
}

pub fn run_compare(config: &ReconConfig, args: &CompareArgs) -> Result<CompareOutcome> {
    let left = read_column(&args.left, &args.left_column)?;
    let right = read_column(&args.right, &args.right_column)?;

    let comparator = TimestampComparator::new(config.timestamps.clone());
    let diff = comparator.compare(
        left.iter().map(String::as_str),
        right.iter().map(String::as_str),
    );
    if diff.unparsed_left + diff.unparsed_right > 0 {
        warn!(
            unparsed_left = diff.unparsed_left,
            unparsed_right = diff.unparsed_right,
            "timestamps in no accepted format were ignored"
        );
    }

    let left_label = format!("{}:{}", file_label(&args.left), args.left_column);
    let right_label = format!("{}:{}", file_label(&args.right), args.right_column);
    let report = args
        .output
        .as_deref()
        .map(|path| write_timestamp_report(path, &left_label, &right_label, &diff))
        .transpose()?;

    Ok(CompareOutcome {
        left_label,
        right_label,
        diff,
        report,
    })
}

pub fn run_counts(config: &ReconConfig, args: &CountsArgs) -> Result<CountsOutcome> {
    let left = read_sheets(&args.left, &config.sheet)?;
    let right = read_sheets(&args.right, &config.sheet)?;

    let comparator = TimestampComparator::new(config.timestamps.clone());
    let report = pair_count_mismatches(&left, &right, &comparator);
    info!(
        pairs = report.pairs_checked,
        mismatches = report.mismatches.len(),
        "count pairing complete"
    );
    let report_path = args
        .output
        .as_deref()
        .map(|path| write_count_report(path, &report))
        .transpose()?;

    Ok(CountsOutcome {
        left_channels: left.channel_count(),
        right_channels: right.channel_count(),
        report,
        report_path,
    })
}

pub fn run_duplicates(args: &DuplicatesArgs) -> Result<DuplicatesOutcome> {
    let values = read_column(&args.input, &args.column)?;
    let source = file_label(&args.input);
    let repeated = repeated_values(values.iter().map(String::as_str));
    let report = args
        .output
        .as_deref()
        .map(|path| write_repeated_values_report(path, &source, &args.column, &repeated))
        .transpose()?;

    Ok(DuplicatesOutcome {
        source,
        column: args.column.clone(),
        values: repeated,
        report,
    })
}

pub fn run_homologate(config: &ReconConfig, args: &HomologateArgs) -> Result<HomologateOutcome> {
    let spec = homologation_spec(config.homologation.as_ref(), args)?;
    let stored = load_correspondence(&args.map)?;
    info!(
        pairs = stored.pairs.len(),
        left = %stored.left,
        right = %stored.right,
        "correspondence loaded"
    );

    let left = read_csv(&args.left).with_context(|| format!("load {}", args.left.display()))?;
    let right = read_csv(&args.right).with_context(|| format!("load {}", args.right.display()))?;
    let (mut frame, stats) = apply_correspondence(&left, &right, &stored.pairs, &spec)?;
    let output = write_csv(&mut frame, &args.output)?;
    info!(path = %output.display(), filled = stats.filled, "homologated file written");

    Ok(HomologateOutcome {
        output,
        target_column: spec.target_column,
        stats,
    })
}

/// Resolves column wiring: command-line flags first, then `[homologation]`.
fn homologation_spec(
    base: Option<&HomologationSpec>,
    args: &HomologateArgs,
) -> Result<HomologationSpec> {
    let pick = |flag: Option<&String>, configured: Option<&String>, name: &str| {
        flag.or(configured)
            .cloned()
            .ok_or_else(|| anyhow!("missing --{name} (or `{name}` under [homologation])"))
    };
    let left_key = pick(args.left_key.as_ref(), base.map(|s| &s.left_key), "left-key")?;
    let left_field = pick(
        args.left_field.as_ref(),
        base.map(|s| &s.left_field),
        "left-field",
    )?;
    let right_key = pick(args.right_key.as_ref(), base.map(|s| &s.right_key), "right-key")?;
    let target_column = args
        .target_column
        .as_ref()
        .or(base.map(|s| &s.target_column))
        .cloned()
        .unwrap_or_else(|| left_field.clone());

    Ok(HomologationSpec {
        left_key,
        left_field,
        right_key,
        target_column,
    })
}

fn read_column(path: &Path, column: &str) -> Result<Vec<String>> {
    let df = read_csv(path).with_context(|| format!("load {}", path.display()))?;
    column_strings(&df, column).with_context(|| format!("read {}", path.display()))
}

/// Concatenates the identified channels of several sheets into one table.
fn read_sheets(paths: &[PathBuf], options: &SheetOptions) -> Result<ChannelTable> {
    let mut identifiers = Vec::new();
    let mut channels = Vec::new();
    for path in paths {
        let table =
            read_channel_sheet(path, options).with_context(|| format!("load {}", path.display()))?;
        for (identifier, channel) in table.labelled() {
            identifiers.push(identifier.to_string());
            channels.push(channel.clone());
        }
    }
    Ok(ChannelTable::new(identifiers, channels)?)
}

fn file_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn homologate_args(left_field: Option<&str>) -> HomologateArgs {
        HomologateArgs {
            left: PathBuf::from("meters.csv"),
            right: PathBuf::from("nodes.csv"),
            map: PathBuf::from("map.json"),
            output: PathBuf::from("out.csv"),
            left_key: None,
            left_field: left_field.map(str::to_string),
            right_key: None,
            target_column: None,
        }
    }

    fn configured() -> HomologationSpec {
        HomologationSpec {
            left_key: "Meter".to_string(),
            left_field: "Feeder".to_string(),
            right_key: "Node".to_string(),
            target_column: "FeederCode".to_string(),
        }
    }

    #[test]
    fn test_flags_override_configured_spec() {
        let spec = homologation_spec(Some(&configured()), &homologate_args(Some("Zone"))).unwrap();
        assert_eq!(spec.left_key, "Meter");
        assert_eq!(spec.left_field, "Zone");
        assert_eq!(spec.target_column, "FeederCode");
    }

    #[test]
    fn test_target_defaults_to_field_name() {
        let mut args = homologate_args(Some("Feeder"));
        args.left_key = Some("Meter".to_string());
        args.right_key = Some("Node".to_string());
        let spec = homologation_spec(None, &args).unwrap();
        assert_eq!(spec.target_column, "Feeder");
    }

    #[test]
    fn test_missing_wiring_names_the_flag() {
        let err = homologation_spec(None, &homologate_args(None)).unwrap_err();
        assert!(err.to_string().contains("--left-key"));
    }

    #[test]
    fn test_file_label_uses_stem() {
        assert_eq!(file_label(Path::new("data/feature_1.csv")), "feature_1");
    }

    #[test]
    fn test_match_writes_report_and_correspondence() {
        let dir = tempfile::tempdir().unwrap();
        let left = dir.path().join("meters.csv");
        let right = dir.path().join("registry.csv");
        fs::write(&left, "id,code\nSE01:BAY:10:X,010\nSE02:BAY:77:Y,077\n").unwrap();
        fs::write(&right, "id,code\nSE01-BAY-010-A,10\nOTHER-999,999\n").unwrap();
        let out = dir.path().join("out");
        let args = MatchArgs {
            left,
            right,
            output_dir: Some(out.clone()),
            top: 5,
            fail_on_issues: false,
        };

        let outcome = run_match(&ReconConfig::default(), &args).unwrap();

        assert_eq!(
            outcome.result.correspondence.get("SE01:BAY:10:X"),
            Some("SE01-BAY-010-A")
        );
        assert_eq!(outcome.result.unmatched_left, vec!["SE02:BAY:77:Y".to_string()]);
        let stored = load_correspondence(&out.join("meters.correspondence.json")).unwrap();
        assert_eq!(stored.pairs.len(), 1);
        assert!(out.join("meters.match.json").is_file());
    }

    #[test]
    fn test_counts_concatenate_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let left_a = dir.path().join("left_a.csv");
        let left_b = dir.path().join("left_b.csv");
        let right = dir.path().join("right.csv");
        fs::write(
            &left_a,
            "id,d1,v1\nx:y:S1:B1,01-01-24 00:00:00,1\n,01-01-24 00:15:00,2\n",
        )
        .unwrap();
        fs::write(&left_b, "id,d1,v1\nx:y:S2:B2,01-01-24 00:00:00,1\n").unwrap();
        fs::write(
            &right,
            "id,d1,v1,d2,v2\n\
             p:q:S1:B1,01-01-24 00:00:00,5,01-01-24 00:00:00,7\n\
             p:q:S2:B2,,,,\n",
        )
        .unwrap();
        let args = CountsArgs {
            left: vec![left_a, left_b],
            right: vec![right],
            output: None,
            fail_on_issues: false,
        };

        let outcome = run_counts(&ReconConfig::default(), &args).unwrap();

        assert_eq!(outcome.left_channels, 2);
        assert_eq!(outcome.report.pairs_checked, 2);
        assert_eq!(outcome.report.mismatches.len(), 1);
        assert_eq!(outcome.report.mismatches[0].left, "x:y:S1:B1");
        assert_eq!(
            outcome.report.mismatches[0].differences,
            vec!["2024-01-01 00:15:00".to_string()]
        );
    }
}
