//! Disk usage snapshot history.
//!
//! Snapshots are appended to a `.json` or `.jsonl` history file and read
//! back as one ordered sequence, whichever encoding the file uses. The
//! `disk` module adds report, diff and advise views on top.

pub mod cli;
pub mod config;
pub mod disk;
pub mod error;
pub mod history;
pub mod report;
pub mod scan;
pub mod util;

pub use disk::{
    disk_advise, disk_diff, disk_report, load_snapshots_for_analysis, persist_disk_snapshot,
    DiskAdvise, DiskDiff, DiskReport,
};
pub use error::{Error, Result};
pub use history::{append_jsonl, make_envelope, read_history_auto, Envelope, HistoryFormat, Snapshot};
