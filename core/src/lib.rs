//! # TalentKit Core
//!
//! Core business logic and domain layer for the TalentKit backend.
//! This crate contains domain entities, business services, repository
//! interfaces, and error types that form the foundation of the
//! application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{
    DocumentStore, EmailLogRepository, InMemoryDocumentStore, InMemoryEmailLogRepository,
    InMemoryUserRepository, UserRepository, VerificationStore,
};
pub use services::{
    Clock, CodeNotifier, DeliveryOutcome, DigestService, IssueResult, LifecycleEvent,
    LifecycleMailer, ManualClock, MirrorService, NotificationMailer, PeriodStats, SkipReason,
    SystemClock, UserStats, VerificationService, VerificationServiceConfig,
};
