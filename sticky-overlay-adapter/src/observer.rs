use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use sticky_overlay::{
    BoundingRect, IntersectionSample, ItemId, ItemRect, MarkerId, ObservationService,
    Subscription,
};

use crate::{Frame, intersection_ratio, threshold_index};

/// Default space added above and below every item marker.
pub const DEFAULT_MARKER_PADDING: f64 = 30.0;

#[derive(Clone, Debug)]
struct Target {
    subscription: Subscription,
    thresholds: Vec<f64>,
    /// Last delivered `(threshold_index, is_intersecting)`.
    last: Option<(usize, bool)>,
}

/// An [`ObservationService`] computed from plain layout data.
///
/// It mirrors how the sticky overlay lays out its markers:
/// - the top boundary is a 1px strip stuck to the root's top edge (never above the content),
/// - the bottom boundary is a 1px strip stuck to the root's bottom edge (never below the
///   content),
/// - each item marker covers the item rect extended by `marker_padding` above and below.
///
/// Samples are produced by [`GeometryObserver::collect`]: once right after a marker is
/// observed, then whenever it crosses one of its thresholds.
#[derive(Clone, Debug)]
pub struct GeometryObserver {
    marker_padding: f64,
    rects: BTreeMap<ItemId, ItemRect>,
    targets: Vec<Target>,
}

impl Default for GeometryObserver {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_PADDING)
    }
}

impl GeometryObserver {
    pub fn new(marker_padding: f64) -> Self {
        Self {
            marker_padding,
            rects: BTreeMap::new(),
            targets: Vec::new(),
        }
    }

    pub fn marker_padding(&self) -> f64 {
        self.marker_padding
    }

    pub fn set_item_rect(&mut self, id: ItemId, rect: ItemRect) {
        self.rects.insert(id, rect);
    }

    /// Replaces every known item rect.
    pub fn replace_item_rects(&mut self, rects: impl IntoIterator<Item = (ItemId, ItemRect)>) {
        self.rects = rects.into_iter().collect();
    }

    pub fn observed(&self) -> impl Iterator<Item = &Subscription> {
        self.targets.iter().map(|t| &t.subscription)
    }

    pub fn is_observing(&self, marker: &MarkerId) -> bool {
        self.targets
            .iter()
            .any(|t| t.subscription.marker() == marker)
    }

    /// Client rect of `marker` in `frame`. `None` for items without a known rect.
    pub fn marker_rect(&self, marker: &MarkerId, frame: &Frame) -> Option<BoundingRect> {
        let root = frame.root;
        match marker {
            MarkerId::TopBoundary => {
                let top = root.top.max(frame.content_client_top());
                let top = top.min(frame.content_client_bottom() - 1.0);
                Some(BoundingRect::new(top, top + 1.0, root.left, root.right))
            }
            MarkerId::BottomBoundary => {
                let bottom = root.bottom.min(frame.content_client_bottom());
                let bottom = bottom.max(frame.content_client_top() + 1.0);
                Some(BoundingRect::new(bottom - 1.0, bottom, root.left, root.right))
            }
            MarkerId::Item(id) => {
                let rect = self.rects.get(id)?;
                let top = frame.content_client_top() + rect.top - self.marker_padding;
                let left = frame.content_client_left() + rect.left;
                Some(BoundingRect::new(
                    top,
                    top + rect.height + 2.0 * self.marker_padding,
                    left,
                    left + rect.width,
                ))
            }
        }
    }

    /// Samples every marker whose threshold bucket changed since its last delivery.
    ///
    /// Markers without a known rect are skipped until one is set.
    pub fn collect(&mut self, frame: &Frame) -> Vec<(Subscription, IntersectionSample)> {
        let mut out = Vec::new();
        for i in 0..self.targets.len() {
            let Some(rect) = self.marker_rect(self.targets[i].subscription.marker(), frame) else {
                continue;
            };
            let (is_intersecting, ratio) = intersection_ratio(&rect, &frame.root);
            let target = &mut self.targets[i];
            let state = (
                threshold_index(ratio, is_intersecting, &target.thresholds),
                is_intersecting,
            );
            if target.last == Some(state) {
                continue;
            }
            target.last = Some(state);
            out.push((
                target.subscription.clone(),
                IntersectionSample::new(rect, is_intersecting, ratio),
            ));
        }
        out
    }
}

impl ObservationService for GeometryObserver {
    fn observe(&mut self, subscription: &Subscription, thresholds: &[f64]) {
        self.targets.push(Target {
            subscription: subscription.clone(),
            thresholds: thresholds.to_vec(),
            last: None,
        });
    }

    fn unobserve(&mut self, subscription: &Subscription) {
        self.targets.retain(|t| &t.subscription != subscription);
    }
}
