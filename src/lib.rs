//! Organization directory: buildings, organizations, and a three-level
//! taxonomy of business activities, with structured and geospatial lookup.
//!
//! Layering mirrors the storage/service split the domain calls for:
//! [`repository`] talks to SQLite, [`services`] owns validation and
//! cross-entity rules, [`geo`] is pure math underneath the spatial queries.

pub mod cli;
pub mod config;
pub mod geo;
pub mod models;
pub mod repository;
pub mod services;
