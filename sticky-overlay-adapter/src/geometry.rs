use sticky_overlay::BoundingRect;

/// Layout input for one frame, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// The visible area of the scroll container.
    pub root: BoundingRect,
    /// Distance from the root's top edge to the start of the content when unscrolled.
    pub content_top: f64,
    /// Distance from the root's left edge to the start of the content.
    pub content_left: f64,
    /// Total height of the content. Sticky boundary markers cannot leave it.
    pub content_height: f64,
    pub scroll_top: f64,
}

impl Frame {
    pub fn new(root: BoundingRect, content_height: f64) -> Self {
        Self {
            root,
            content_top: 0.0,
            content_left: 0.0,
            content_height,
            scroll_top: 0.0,
        }
    }

    pub fn with_content_offset(mut self, top: f64, left: f64) -> Self {
        self.content_top = top;
        self.content_left = left;
        self
    }

    pub fn with_scroll_top(mut self, scroll_top: f64) -> Self {
        self.scroll_top = scroll_top;
        self
    }

    /// Client y of the content's first pixel.
    pub fn content_client_top(&self) -> f64 {
        self.root.top + self.content_top - self.scroll_top
    }

    pub fn content_client_left(&self) -> f64 {
        self.root.left + self.content_left
    }

    pub fn content_client_bottom(&self) -> f64 {
        self.content_client_top() + self.content_height
    }
}

/// The overlap of `target` and `root`, if any. Edge-adjacent rects overlap with zero area.
pub fn intersection_rect(target: &BoundingRect, root: &BoundingRect) -> Option<BoundingRect> {
    let rect = BoundingRect {
        top: target.top.max(root.top),
        bottom: target.bottom.min(root.bottom),
        left: target.left.max(root.left),
        right: target.right.min(root.right),
    };
    (rect.bottom >= rect.top && rect.right >= rect.left).then_some(rect)
}

/// Returns `(is_intersecting, ratio)` for `target` against `root`.
///
/// A zero-area target that touches the root reports a ratio of 1.
pub fn intersection_ratio(target: &BoundingRect, root: &BoundingRect) -> (bool, f64) {
    let Some(overlap) = intersection_rect(target, root) else {
        return (false, 0.0);
    };
    let area = target.width() * target.height();
    if area <= 0.0 {
        return (true, 1.0);
    }
    let visible = overlap.width() * overlap.height();
    (true, (visible / area).clamp(0.0, 1.0))
}

/// The threshold bucket a ratio falls into: how many thresholds it has reached.
///
/// Non-intersecting targets are always in bucket 0. A change of bucket (or of
/// `is_intersecting`) is what triggers a delivery.
pub fn threshold_index(ratio: f64, is_intersecting: bool, thresholds: &[f64]) -> usize {
    if !is_intersecting {
        return 0;
    }
    thresholds
        .iter()
        .position(|&t| t > ratio)
        .unwrap_or(thresholds.len())
}
