//! Tests for the lifecycle notification service

#[cfg(test)]
mod service_tests;
