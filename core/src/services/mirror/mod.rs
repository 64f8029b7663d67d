//! Sub-user data mirroring module
//!
//! Copies documents written by a sub-user into the parent account's
//! collections so the parent sees a consolidated view. Caller authorization
//! is the entry point's concern; this module handles the data movement and
//! the bookkeeping on queued requests.

mod service;

pub use service::MirrorService;
