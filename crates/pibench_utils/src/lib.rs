//! Shared support code for the `pibench` binary.

pub mod logger;
