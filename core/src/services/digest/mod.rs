//! Daily analytics digest module
//!
//! Computes registration and conversion statistics over the user base and
//! delivers them to an operator mailbox. The repository only lists users;
//! all bucketing happens in-process.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::DigestService;
pub use types::{PeriodStats, UserStats};
