//! seedword CLI library: subcommand handlers and interactive entry.

pub mod entry;
pub mod phrase_cmd;
