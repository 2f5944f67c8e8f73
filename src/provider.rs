/// List and pair utilities.
///
/// Construction, indexing, size, append, membership, reversal and zipping
/// of sequences.
pub mod list;
/// Descriptive statistics over numeric sequences.
pub mod stat;
/// Vector products and norms over sequences.
pub mod vector;
