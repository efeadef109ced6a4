//! A beer stock service.
//!
//! Beers are registered with a capacity (`max`) and their stock can only move
//! within `[0, max]`. The business rules live in [`core`](crate::core), the
//! REST API in [`api`], and everything non-functional in [`infra`].

pub mod api;
pub mod app;
pub mod core;
pub mod infra;
