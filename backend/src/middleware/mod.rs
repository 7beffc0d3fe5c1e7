//! Actix middleware for cross-cutting request concerns.

pub mod trace;
