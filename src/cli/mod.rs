//! Entry points shared by the binary and integration tests

pub mod orchestration;
