use crate::MarkerId;

/// Token for one marker registration.
///
/// Samples are delivered through [`crate::IntersectionTracker::on_sample`] together with the
/// subscription that requested them. A subscription that was superseded, unobserved, or that
/// belongs to a torn-down tracker is stale and its samples are dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    marker: MarkerId,
    tracker: u64,
    generation: u64,
}

impl Subscription {
    pub(crate) fn new(marker: MarkerId, tracker: u64, generation: u64) -> Self {
        Self {
            marker,
            tracker,
            generation,
        }
    }

    pub fn marker(&self) -> &MarkerId {
        &self.marker
    }

    /// Instance id of the tracker that issued this subscription.
    pub fn tracker_id(&self) -> u64 {
        self.tracker
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The platform mechanism that reports visibility changes for registered markers.
///
/// Implementations schedule samples whenever a marker crosses one of `thresholds` (fractions of
/// the marker that are visible) and hand them back to the tracker via `on_sample`. Delivery may
/// happen in any order across markers.
pub trait ObservationService {
    fn observe(&mut self, subscription: &Subscription, thresholds: &[f64]);
    fn unobserve(&mut self, subscription: &Subscription);
}

impl<S: ObservationService + ?Sized> ObservationService for alloc::boxed::Box<S> {
    fn observe(&mut self, subscription: &Subscription, thresholds: &[f64]) {
        (**self).observe(subscription, thresholds);
    }

    fn unobserve(&mut self, subscription: &Subscription) {
        (**self).unobserve(subscription);
    }
}

/// A service that does nothing. Use it when the host pushes samples on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Detached;

impl ObservationService for Detached {
    fn observe(&mut self, _subscription: &Subscription, _thresholds: &[f64]) {}

    fn unobserve(&mut self, _subscription: &Subscription) {}
}
