//! Command handler layer.
//!
//! ## Files
//! - `tag.rs` — turns parsed flags into a validated plan, gathers
//!   credentials, runs the matching processor and renders the report.
//!
//! ## Principles
//! - Validate everything that can fail offline before logging in.
//! - Delegate business logic to `services/*`.

pub mod tag;

pub use tag::{gather_credentials, handle_tag_command, TagPlan};
