use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, InvalidArgument, Result};
use crate::key::MarkerMap;
use crate::{
    ClassifiedGroups, ClassifierOptions, Detached, IntersectionSample, MarkerId,
    ObservationService, ObservationTable, Subscription, TrackedItem, TrackerOptions, classify,
};

static NEXT_TRACKER_ID: AtomicU64 = AtomicU64::new(1);

/// Owns the observation table for one overlay and keeps the classified groups current.
///
/// The tracker is the only place the table is mutated:
/// - The observation service reports geometry through [`IntersectionTracker::on_sample`].
/// - Every applied sample triggers a synchronous recomputation of [`ClassifiedGroups`].
/// - Registrations are released on [`IntersectionTracker::teardown`] or when the tracker is
///   dropped, whichever comes first.
pub struct IntersectionTracker<S: ObservationService = Detached> {
    service: S,
    options: TrackerOptions,
    instance: u64,
    live: bool,
    next_generation: u64,
    subscriptions: MarkerMap<Subscription>,
    items: Vec<TrackedItem>,
    table: ObservationTable,
    groups: ClassifiedGroups,

    batch_depth: usize,
    recompute_pending: bool,
}

impl IntersectionTracker<Detached> {
    /// Creates a tracker whose samples are pushed by the caller.
    pub fn detached(options: TrackerOptions) -> Result<Self> {
        Self::new(Detached, options)
    }
}

impl<S: ObservationService> IntersectionTracker<S> {
    /// Validates `options` and registers both boundary markers with `service`.
    pub fn new(service: S, options: TrackerOptions) -> Result<Self> {
        options.validate()?;
        let instance = NEXT_TRACKER_ID.fetch_add(1, Ordering::Relaxed);
        sdebug!(instance, "IntersectionTracker::new");
        let mut tracker = Self {
            service,
            options,
            instance,
            live: true,
            next_generation: 0,
            subscriptions: MarkerMap::new(),
            items: Vec::new(),
            table: ObservationTable::new(),
            groups: ClassifiedGroups::default(),
            batch_depth: 0,
            recompute_pending: false,
        };
        tracker.observe_marker(MarkerId::TopBoundary);
        tracker.observe_marker(MarkerId::BottomBoundary);
        Ok(tracker)
    }

    pub fn id(&self) -> u64 {
        self.instance
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    pub fn table(&self) -> &ObservationTable {
        &self.table
    }

    /// Items of the current render pass, in caller order.
    pub fn items(&self) -> &[TrackedItem] {
        &self.items
    }

    /// The groups derived from the latest samples.
    pub fn groups(&self) -> &ClassifiedGroups {
        &self.groups
    }

    /// The active subscription for `marker`, if any.
    pub fn subscription(&self, marker: &MarkerId) -> Option<&Subscription> {
        self.subscriptions.get(marker)
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = &Subscription> {
        self.subscriptions.values()
    }

    /// Registers `item` for observation and adds it to the tracked items.
    ///
    /// Observing an id again replaces its rect and supersedes the previous subscription.
    pub fn observe(&mut self, item: &TrackedItem) -> Result<Subscription> {
        self.ensure_live()?;
        validate_item(item)?;

        match self.items.iter_mut().find(|it| it.id == item.id) {
            Some(existing) => existing.rect = item.rect,
            None => self.items.push(item.clone()),
        }
        let sub = self.observe_marker(MarkerId::Item(item.id.clone()));
        self.recompute();
        Ok(sub)
    }

    /// Replaces the tracked items for a new render pass.
    ///
    /// All items are validated before anything changes. Ids that left the list are unobserved
    /// (their last samples stay in the table), new ids are observed.
    pub fn set_items(&mut self, items: Vec<TrackedItem>) -> Result<()> {
        self.ensure_live()?;
        for item in &items {
            validate_item(item)?;
        }

        let next: MarkerMap<()> = items
            .iter()
            .map(|it| (MarkerId::Item(it.id.clone()), ()))
            .collect();
        let removed: Vec<MarkerId> = self
            .subscriptions
            .keys()
            .filter(|m| !m.is_boundary() && !next.contains_key(*m))
            .cloned()
            .collect();
        for marker in removed {
            if let Some(sub) = self.subscriptions.remove(&marker) {
                strace!(marker = %marker, "set_items: unobserve");
                self.service.unobserve(&sub);
            }
        }

        for item in &items {
            let marker = MarkerId::Item(item.id.clone());
            if !self.subscriptions.contains_key(&marker) {
                self.observe_marker(marker);
            }
        }

        self.items = items;
        self.recompute();
        Ok(())
    }

    /// Releases the registration behind `subscription`.
    ///
    /// An item marker is also removed from the tracked items. Returns `false` when the
    /// subscription is already stale, or when it belongs to a boundary marker: boundaries live
    /// until [`IntersectionTracker::teardown`].
    pub fn unobserve(&mut self, subscription: &Subscription) -> bool {
        if !self.is_current(subscription) {
            return false;
        }
        if subscription.marker().is_boundary() {
            sdebug!(marker = %subscription.marker(), "unobserve: boundary markers are kept");
            return false;
        }
        let marker = subscription.marker();
        self.subscriptions.remove(marker);
        self.service.unobserve(subscription);
        sdebug!(marker = %marker, "unobserve");

        if let Some(id) = marker.item() {
            self.items.retain(|it| &it.id != id);
            self.recompute();
        }
        true
    }

    /// Records a new sample for the subscription's marker and recomputes the groups.
    ///
    /// Late deliveries (after unobserve, re-observe or teardown) are ignored and return `false`.
    pub fn on_sample(&mut self, subscription: &Subscription, sample: IntersectionSample) -> bool {
        if !self.is_current(subscription) {
            sdebug!(
                marker = %subscription.marker(),
                tracker = subscription.tracker_id(),
                "on_sample: ignoring stale subscription"
            );
            return false;
        }
        if !sample.bounding_rect.is_finite() {
            swarn!(marker = %subscription.marker(), "on_sample: non-finite bounding rect");
        }
        strace!(
            marker = %subscription.marker(),
            top = sample.bounding_rect.top,
            bottom = sample.bounding_rect.bottom,
            ratio = sample.ratio,
            "on_sample"
        );
        self.table.insert(subscription.marker().clone(), sample);
        self.recompute();
        true
    }

    pub fn is_current(&self, subscription: &Subscription) -> bool {
        self.live
            && subscription.tracker_id() == self.instance
            && self
                .subscriptions
                .get(subscription.marker())
                .is_some_and(|s| s.generation() == subscription.generation())
    }

    pub fn set_classifier_options(&mut self, classifier: ClassifierOptions) -> Result<()> {
        classifier.validate()?;
        self.options.classifier = classifier;
        self.recompute();
        Ok(())
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&ClassifiedGroups) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| alloc::sync::Arc::new(f) as _);
    }

    /// Coalesces the recomputations triggered inside `f` into one, fired when the outermost
    /// batch ends.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);

        f(self);

        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);

        if self.batch_depth == 0 && core::mem::take(&mut self.recompute_pending) && self.live {
            self.recompute_now();
        }
    }

    /// Releases every registration and clears all state. Idempotent.
    ///
    /// Afterwards samples are ignored and `observe`/`set_items` fail with [`Error::Closed`].
    pub fn teardown(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        sdebug!(
            instance = self.instance,
            subscriptions = self.subscriptions.len(),
            "IntersectionTracker::teardown"
        );
        for (_, sub) in core::mem::take(&mut self.subscriptions) {
            self.service.unobserve(&sub);
        }
        self.items.clear();
        self.table.clear();
        self.groups.clear();
        self.recompute_pending = false;
    }

    fn ensure_live(&self) -> Result<()> {
        if self.live { Ok(()) } else { Err(Error::Closed) }
    }

    fn observe_marker(&mut self, marker: MarkerId) -> Subscription {
        self.next_generation = self.next_generation.wrapping_add(1);
        let sub = Subscription::new(marker.clone(), self.instance, self.next_generation);
        if let Some(prev) = self.subscriptions.insert(marker, sub.clone()) {
            self.service.unobserve(&prev);
        }
        let thresholds = if sub.marker().is_boundary() {
            &self.options.boundary_thresholds
        } else {
            &self.options.item_thresholds
        };
        strace!(marker = %sub.marker(), generation = sub.generation(), "observe");
        self.service.observe(&sub, thresholds);
        sub
    }

    fn recompute(&mut self) {
        if self.batch_depth > 0 {
            self.recompute_pending = true;
            return;
        }
        self.recompute_now();
    }

    fn recompute_now(&mut self) {
        self.groups = classify(&self.items, &self.table, &self.options.classifier);
        if let Some(cb) = &self.options.on_change {
            cb(&self.groups);
        }
    }
}

impl<S: ObservationService> Drop for IntersectionTracker<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<S: ObservationService + core::fmt::Debug> core::fmt::Debug for IntersectionTracker<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntersectionTracker")
            .field("service", &self.service)
            .field("instance", &self.instance)
            .field("live", &self.live)
            .field("items", &self.items.len())
            .field("samples", &self.table.len())
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

fn validate_item(item: &TrackedItem) -> core::result::Result<(), InvalidArgument> {
    if item.id.is_missing() {
        return Err(InvalidArgument::MissingId);
    }
    let r = item.rect;
    if !(r.top.is_finite() && r.left.is_finite() && r.width.is_finite() && r.height.is_finite()) {
        return Err(InvalidArgument::NonFiniteRect {
            id: item.id.clone(),
        });
    }
    if r.width < 0.0 || r.height < 0.0 {
        return Err(InvalidArgument::NegativeSize {
            id: item.id.clone(),
            width: r.width,
            height: r.height,
        });
    }
    Ok(())
}
