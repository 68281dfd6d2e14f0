//! Markdown formatting for engine results.
//!
//! Domain models and engine results implement [`std::fmt::Display`] directly
//! (see [`models`]); collections and edit outcomes are wrapped in small
//! newtypes that add context such as whether the changes were written.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ Engine Results  │    │ Display Impls & │    │    Markdown     │
//! │ (spans, lanes,  │───▶│    Wrappers     │───▶│  (terminal via  │
//! │  edits, repair) │    │                 │    │    termimad)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers ([`Mutations`], [`Repairs`])
//! - [`results`]: Edit outcomes ([`EditResult`])
//! - [`status`]: One-line confirmations ([`OperationStatus`])
//! - [`dates`]: Date range formatting ([`Season`])
//! - [`models`]: Display implementations for models and engine results
//!
//! ## Usage Examples
//!
//! ```rust
//! use furrow_core::display::OperationStatus;
//!
//! let saved = OperationStatus::success("Saved 3 change(s)".to_string());
//! assert!(saved.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod dates;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Mutations, Repairs};
pub use dates::Season;
pub use results::EditResult;
pub use status::OperationStatus;
