//! Product feed module
//!
//! The paged, filterable product list behind an infinite-scroll catalog.
//!
//! # Overview
//!
//! The feed module provides:
//! - `ProductFeed` - the pagination/filter state machine
//! - `FeedStatus` - explicit `Idle | Loading | Loaded | Failed` state
//! - `FeedAction` - command entry point for UI events
//! - `ScrollTrigger` - fires the next page when a sentinel becomes visible
//!
//! Every operation is split into a synchronous `begin_*` transition that
//! returns the `PageRequest` to issue and a `complete` step that reconciles
//! the response. Each request carries the generation it was issued under;
//! completions from an older generation are discarded, so a slow page fetch
//! can never leak into the list of a newer query.

mod machine;
mod trigger;
mod types;

pub use machine::ProductFeed;
pub use trigger::ScrollTrigger;
pub use types::{FeedAction, FeedSnapshot, FeedStatus, PageRequest, QueryState, RequestKind};

#[cfg(test)]
mod tests;
