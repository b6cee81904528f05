//! HTTP route handlers

pub mod cards;
pub mod settings;
pub mod stats;
pub mod study;
