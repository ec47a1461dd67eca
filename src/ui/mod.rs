//! Plain-text rendering for the interactive session.

pub mod report;
