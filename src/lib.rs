//! Headless viewport-intersection grouping for sticky editor overlays.
//!
//! An editor shows a scrollable form and wants to draw an overlay for every field: fields that
//! scrolled past the top are collected in a sticky strip above the viewport, fields further
//! down in a strip below it, and the rest are drawn in place. This crate computes that
//! partition from intersection geometry:
//!
//! - [`IntersectionTracker`] keeps the latest [`IntersectionSample`] for two boundary markers
//!   and one marker per content item, fed by an [`ObservationService`].
//! - [`classify`] turns the table into [`ClassifiedGroups`] (`above` / `inside` / `below`).
//! - A [`GroupRenderer`] supplied by the UI layer paints each group.
//!
//! It is UI-agnostic. For a framework-neutral observer driven by plain layout and scroll data,
//! see the `sticky-overlay-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod classifier;
mod error;
mod key;
mod options;
mod render;
mod service;
mod table;
mod tracker;
mod types;


pub use classifier::{ClassifiedGroups, classify, item_positions};
pub use error::{Error, InvalidArgument, Result};
pub use options::{
    ClassifierOptions, DEFAULT_BOUNDARY_THRESHOLDS, DEFAULT_ITEM_THRESHOLDS, OnChangeCallback,
    TrackerOptions,
};
pub use render::{GroupRenderer, RenderedGroups};
pub use service::{Detached, ObservationService, Subscription};
pub use table::ObservationTable;
pub use tracker::IntersectionTracker;
pub use types::{
    BoundingRect, Group, IntersectionSample, ItemId, ItemPosition, ItemRect, MarkerId,
    TrackedItem,
};
