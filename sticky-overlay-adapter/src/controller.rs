use alloc::vec::Vec;

use sticky_overlay::{
    ClassifiedGroups, Error, GroupRenderer, IntersectionSample, IntersectionTracker, ItemId,
    ItemRect, RenderedGroups, Result, Subscription, TrackedItem, TrackerOptions,
};

use crate::{Frame, GeometryObserver};

/// A framework-neutral controller that owns an [`IntersectionTracker`] fed by a
/// [`GeometryObserver`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `set_items` on every render pass with the current field rects
/// - `on_frame` / `on_scroll` when the layout or the scroll position changes
///
/// and read the result through `groups` / `render`. `unmount` releases the tracker; any input
/// after that is ignored.
#[derive(Debug)]
pub struct Controller {
    tracker: Option<IntersectionTracker<GeometryObserver>>,
    frame: Frame,
    unmounted: ClassifiedGroups,
}

impl Controller {
    pub fn new(options: TrackerOptions, frame: Frame) -> Result<Self> {
        Self::with_observer(GeometryObserver::default(), options, frame)
    }

    pub fn with_observer(
        observer: GeometryObserver,
        options: TrackerOptions,
        frame: Frame,
    ) -> Result<Self> {
        let mut c = Self {
            tracker: Some(IntersectionTracker::new(observer, options)?),
            frame,
            unmounted: ClassifiedGroups::default(),
        };
        c.pump();
        Ok(c)
    }

    pub fn is_mounted(&self) -> bool {
        self.tracker.is_some()
    }

    pub fn tracker(&self) -> Option<&IntersectionTracker<GeometryObserver>> {
        self.tracker.as_ref()
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Replaces the tracked items and delivers their initial samples.
    pub fn set_items(&mut self, items: Vec<TrackedItem>) -> Result<()> {
        let Some(tracker) = self.tracker.as_mut() else {
            return Err(Error::Closed);
        };
        let rects: Vec<(ItemId, ItemRect)> =
            items.iter().map(|it| (it.id.clone(), it.rect)).collect();
        let frame = self.frame;
        let mut result = Ok(());
        tracker.batch_update(|t| {
            result = t.set_items(items);
            if result.is_ok() {
                t.service_mut().replace_item_rects(rects);
                deliver_frame(t, &frame);
            }
        });
        result
    }

    pub fn on_frame(&mut self, frame: Frame) {
        self.frame = frame;
        self.pump();
    }

    pub fn on_scroll(&mut self, scroll_top: f64) {
        self.frame.scroll_top = scroll_top;
        self.pump();
    }

    /// Forwards an externally produced sample. Returns `false` when it was ignored.
    pub fn deliver(&mut self, subscription: &Subscription, sample: IntersectionSample) -> bool {
        match self.tracker.as_mut() {
            Some(tracker) => tracker.on_sample(subscription, sample),
            None => false,
        }
    }

    pub fn groups(&self) -> &ClassifiedGroups {
        match &self.tracker {
            Some(tracker) => tracker.groups(),
            None => &self.unmounted,
        }
    }

    pub fn render<R: GroupRenderer>(&self, renderer: &mut R) -> RenderedGroups<R::Output> {
        self.groups().render(renderer)
    }

    pub fn unmount(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.teardown();
        }
    }

    fn pump(&mut self) {
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        tracker.batch_update(|t| deliver_frame(t, &self.frame));
    }
}

/// Applies every threshold crossing of `frame`. Call inside a batch.
fn deliver_frame(tracker: &mut IntersectionTracker<GeometryObserver>, frame: &Frame) {
    let samples = tracker.service_mut().collect(frame);
    for (sub, sample) in &samples {
        tracker.on_sample(sub, *sample);
    }
}
