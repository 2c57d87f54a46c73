//! Handling of the package's well-known special entry: its embedded listfile.

mod listfile;

pub use listfile::{basename, is_valid_listfile, parse_listfile};
