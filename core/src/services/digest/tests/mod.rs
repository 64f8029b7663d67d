//! Tests for the analytics digest service

#[cfg(test)]
mod mocks;
