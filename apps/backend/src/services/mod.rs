//! Storage and settings collaborators used by the routes

pub mod settings;
pub mod storage;
