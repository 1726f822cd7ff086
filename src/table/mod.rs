//! The output table: row model, aggregation, on-disk format and merging.

pub mod aggregate;
pub mod merge;
pub mod record;
pub mod row;
pub mod variants;
pub mod writer;

pub use aggregate::{FinalizedTable, ResultAggregator};
pub use merge::{merge_tables, MergeReport};
pub use record::{MetadataRecord, Outcome, ProbeFailure, SidecarInfo, SidecarSubtitles};
pub use row::{Row, COLUMNS};
pub use writer::{read_table, write_table};
