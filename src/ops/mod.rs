//! User-facing operations behind each CLI subcommand.
//!
//! Every operation takes the opened [`Journal`](crate::journal::Journal),
//! its already-parsed inputs and a writer for its output, so the binary only
//! has to wire arguments through and tests can capture what would be printed.

pub mod browse;
pub mod security;
pub mod stats;
pub mod write;

pub use browse::{delete_entry, list_entries, list_moods, list_tags, show_entry, EntrySelector};
pub use security::{clear_pin, set_pin, show_or_set_theme, show_pin_status, verify_pin};
pub use stats::{show_missed_days, show_stats};
pub use write::write_entry;
