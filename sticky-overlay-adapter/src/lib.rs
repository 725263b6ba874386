//! Adapter utilities for the `sticky-overlay` crate.
//!
//! The `sticky-overlay` crate classifies items from intersection samples but does not produce
//! them. This crate provides a framework-neutral producer for hosts without a platform
//! intersection observer:
//!
//! - Intersection geometry with browser-style threshold crossing
//! - A [`GeometryObserver`] that derives marker rects from item layout and scroll position
//! - A [`Controller`] that wires the observer to an `IntersectionTracker`
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod geometry;
mod observer;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use geometry::{Frame, intersection_ratio, intersection_rect, threshold_index};
pub use observer::{DEFAULT_MARKER_PADDING, GeometryObserver};
