//! Output generation for reconciliation runs.
//!
//! - JSON reports for every command run
//! - Correspondence save/load
//! - Homologated CSV output

pub mod error;
pub mod homologate;
pub mod report;
pub mod store;

pub use error::{OutputError, Result};
pub use homologate::{HomologationSpec, HomologationStats, apply_correspondence, write_csv};
pub use report::{
    CHANNEL_REPORT_SCHEMA, COUNT_REPORT_SCHEMA, ChannelReportBody, FUZZY_REPORT_SCHEMA,
    MATCH_REPORT_SCHEMA, MatchReport, REPEATED_REPORT_SCHEMA, REPORT_SCHEMA_VERSION,
    ReportPayload, TIMESTAMP_REPORT_SCHEMA, TimestampReport, ensure_parent_dir,
    write_channel_report, write_count_report, write_fuzzy_report, write_json_report,
    write_match_report, write_repeated_values_report, write_timestamp_report,
};
pub use store::{
    CORRESPONDENCE_SCHEMA, StoredCorrespondence, load_correspondence, save_correspondence,
};
