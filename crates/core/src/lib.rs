//! Core business logic for Lingua.
//!
//! Pure computation over data the `lingua-db` crate fetches; no web or
//! database dependencies live here.

pub mod report;
