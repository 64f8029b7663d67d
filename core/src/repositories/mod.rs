pub mod documents;
pub mod email_log;
pub mod user;
pub mod verification;

pub use documents::{DocumentStore, InMemoryDocumentStore};
pub use email_log::{EmailLogRepository, InMemoryEmailLogRepository};
pub use user::{InMemoryUserRepository, UserRepository};
pub use verification::VerificationStore;
