// src/source/mod.rs
pub mod loader;
pub mod models;

#[allow(unused_imports)]
pub use models::{Fragment, LoadedDocument, Page};
