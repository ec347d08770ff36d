//! Shared data model layer (types/constants only).
//!
//! ## Files
//! - `models.rs` — controller objects, field values, match results, tag requests.
//! - `report.rs` — report rows and column layouts.
//! - `constants.rs` — reserved ids/names, the element update allow-list, defaults.
//!
//! ## Rule of thumb
//! Domain types are data-only: no network or filesystem side effects. Every
//! transform on a `TaggableObject` returns a new value.

pub mod constants;
pub mod models;
pub mod report;
