//! The match pipeline: upload validation → extraction → embedding → scoring.

pub mod handlers;
pub mod scoring;
