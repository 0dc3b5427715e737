//! Core types and trait definitions for the museum catalog.
//!
//! This crate has no HTTP or database dependencies.
//! The store, page renderer and web crates all depend on it.

// Native `async fn` in traits; `Send` bounds are spelled out on the trait.
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod error;
pub mod graph;
pub mod model;
pub mod validate;

pub use error::{CatalogError, Error, Result};
