//! R Markdown reader tests
//!
//! Scenario tests on small documents, a fixture walk-through and property tests for the
//! scanner and the header extractor.

mod fixture;
mod properties;
mod scenarios;
