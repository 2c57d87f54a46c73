//! HET and BET table structures used to resolve IFS archive entries

mod bet;
mod common;
mod het;

pub use bet::{BetFileInfo, BetHeader, BetTable};
pub use het::{HetHeader, HetTable};
