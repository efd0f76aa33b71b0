//! Core domain types and logic.

pub mod bar;
pub mod config;
pub mod indicator;
pub mod indicators;
pub mod signal;
pub mod backtest;
pub mod summary;
pub mod error;
