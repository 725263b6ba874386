use alloc::sync::Arc;
use core::fmt;

/// Stable identity of a tracked content item.
///
/// Cheap to clone. An id that is empty (or whitespace only) is treated as missing and rejected
/// by [`crate::IntersectionTracker::observe`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(Arc<str>);

impl ItemId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_missing(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<alloc::string::String> for ItemId {
    fn from(value: alloc::string::String) -> Self {
        Self::new(value)
    }
}

/// Key of an observation: one of the two sentinel boundary markers, or a content item.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerId {
    TopBoundary,
    BottomBoundary,
    Item(ItemId),
}

impl MarkerId {
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::TopBoundary | Self::BottomBoundary)
    }

    pub fn item(&self) -> Option<&ItemId> {
        match self {
            Self::Item(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopBoundary => f.write_str("::top"),
            Self::BottomBoundary => f.write_str("::bottom"),
            Self::Item(id) => fmt::Display::fmt(id, f),
        }
    }
}

impl From<ItemId> for MarkerId {
    fn from(id: ItemId) -> Self {
        Self::Item(id)
    }
}

/// Layout rectangle of a content region, as supplied by the caller (in pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl ItemRect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Observed client rectangle of a tracked element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingRect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl BoundingRect {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.bottom.is_finite()
            && self.left.is_finite()
            && self.right.is_finite()
    }
}

/// A caller-supplied content region. Identity is `id`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedItem {
    pub id: ItemId,
    pub rect: ItemRect,
}

impl TrackedItem {
    pub fn new(id: impl Into<ItemId>, rect: ItemRect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// The latest observed geometry for one marker. Overwritten in place on every delivery.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionSample {
    pub bounding_rect: BoundingRect,
    pub is_intersecting: bool,
    /// Visible fraction of the marker, in `[0, 1]`.
    pub ratio: f64,
}

impl IntersectionSample {
    pub fn new(bounding_rect: BoundingRect, is_intersecting: bool, ratio: f64) -> Self {
        Self {
            bounding_rect,
            is_intersecting,
            ratio,
        }
    }
}

/// An item together with its signed distances to the two boundary markers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPosition {
    pub item: TrackedItem,
    /// Item top minus the bottom edge of the top boundary. Negative when the item starts above it.
    pub distance_top: f64,
    /// Bottom edge of the bottom boundary minus the item bottom. Negative when the item ends
    /// below it.
    pub distance_bottom: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Group {
    Above,
    Inside,
    Below,
}

impl Group {
    /// Render order.
    pub const ALL: [Group; 3] = [Group::Above, Group::Inside, Group::Below];
}
