//! The data path every view shares: filter the dataset by the selection, then
//! aggregate the surviving rows per group.

pub mod aggregate;
pub mod filter;

pub use aggregate::{aggregate, GroupSummary, MISSING_GROUP};
pub use filter::{filter, FilteredView};
