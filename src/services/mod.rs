//! Service layer containing the tagging logic and side-effect helpers.
//!
//! ## Service map
//! - `tags.rs` — tag list add/remove and change-detail diffs.
//! - `matcher.rs` — field predicate and match-and-mutate.
//! - `apply.rs` — idempotent write of one mutated object.
//! - `flat.rs` — sites/elements/circuit categories processor.
//! - `interfaces.rs` — site × element × interface processor.
//! - `credentials.rs` — credential sources and the login policy.
//! - `output.rs` — table and CSV rendering.
//! - `diagnostics.rs` — `WARNING:`/`ERROR:` lines.
//! - `progress.rs` — progress bar setup.
//!
//! ## Conventions
//! - Processors only talk to the controller through the `Controller` trait.
//! - Per-object failures become warnings; listing failures abort the run.
//! - Keep command handlers thin; delegate to services.

pub mod apply;
pub mod credentials;
pub mod diagnostics;
pub mod flat;
pub mod interfaces;
pub mod matcher;
pub mod output;
pub mod progress;
pub mod tags;
