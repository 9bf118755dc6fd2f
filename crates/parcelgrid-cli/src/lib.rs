//! parcelgrid CLI library.
//!
//! Shared argument types for the `parcelgrid` binary: where a scenario
//! comes from and how results are printed.

pub mod input;
pub mod output;
