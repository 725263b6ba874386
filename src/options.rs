use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::{InvalidArgument, Result};
use crate::{ClassifiedGroups, Group};

/// A callback fired after the tracker recomputes its groups.
pub type OnChangeCallback = Arc<dyn Fn(&ClassifiedGroups) + Send + Sync>;

/// Visibility thresholds for the boundary markers.
pub const DEFAULT_BOUNDARY_THRESHOLDS: [f64; 5] = [0.0, 0.1, 0.5, 0.9, 1.0];

/// Visibility thresholds for content item markers.
pub const DEFAULT_ITEM_THRESHOLDS: [f64; 8] = [0.0, 0.01, 0.1, 0.2, 0.8, 0.9, 0.99, 1.0];

/// Distance thresholds used by [`crate::classify`].
///
/// Rules are checked in order, first match wins:
/// 1. `distance_top < above_threshold` -> [`Group::Above`]
/// 2. `distance_bottom < below_threshold` -> [`Group::Below`]
/// 3. otherwise [`Group::Inside`]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifierOptions {
    pub above_threshold: f64,
    pub below_threshold: f64,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            above_threshold: -20.0,
            below_threshold: -10.0,
        }
    }
}

impl ClassifierOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_above_threshold(mut self, above_threshold: f64) -> Self {
        self.above_threshold = above_threshold;
        self
    }

    pub fn with_below_threshold(mut self, below_threshold: f64) -> Self {
        self.below_threshold = below_threshold;
        self
    }

    /// Assigns a group from a pair of signed distances.
    ///
    /// NaN distances never satisfy a `<` check and therefore land in [`Group::Inside`].
    pub fn group_for(&self, distance_top: f64, distance_bottom: f64) -> Group {
        if distance_top < self.above_threshold {
            Group::Above
        } else if distance_bottom < self.below_threshold {
            Group::Below
        } else {
            Group::Inside
        }
    }

    pub fn validate(&self) -> Result<()> {
        for value in [self.above_threshold, self.below_threshold] {
            if !value.is_finite() {
                return Err(InvalidArgument::NonFiniteClassifierThreshold { value }.into());
            }
        }
        Ok(())
    }
}

/// Configuration for [`crate::IntersectionTracker`].
///
/// Cheap to clone: the change callback is stored in an `Arc`.
#[derive(Clone)]
pub struct TrackerOptions {
    /// Visibility ratios at which the observation service should report boundary markers.
    pub boundary_thresholds: Vec<f64>,
    /// Visibility ratios at which the observation service should report item markers.
    pub item_thresholds: Vec<f64>,
    pub classifier: ClassifierOptions,
    /// Optional callback fired after every recomputation (once per batch).
    pub on_change: Option<OnChangeCallback>,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            boundary_thresholds: DEFAULT_BOUNDARY_THRESHOLDS.to_vec(),
            item_thresholds: DEFAULT_ITEM_THRESHOLDS.to_vec(),
            classifier: ClassifierOptions::default(),
            on_change: None,
        }
    }
}

impl TrackerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boundary_thresholds(mut self, thresholds: impl Into<Vec<f64>>) -> Self {
        self.boundary_thresholds = thresholds.into();
        self
    }

    pub fn with_item_thresholds(mut self, thresholds: impl Into<Vec<f64>>) -> Self {
        self.item_thresholds = thresholds.into();
        self
    }

    pub fn with_classifier(mut self, classifier: ClassifierOptions) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ClassifiedGroups) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_thresholds(&self.boundary_thresholds)?;
        validate_thresholds(&self.item_thresholds)?;
        self.classifier.validate()
    }
}

impl core::fmt::Debug for TrackerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrackerOptions")
            .field("boundary_thresholds", &self.boundary_thresholds)
            .field("item_thresholds", &self.item_thresholds)
            .field("classifier", &self.classifier)
            .field("on_change", &self.on_change.as_ref().map(|_| ".."))
            .finish()
    }
}

fn validate_thresholds(thresholds: &[f64]) -> Result<()> {
    if thresholds.is_empty() {
        return Err(InvalidArgument::EmptyThresholds.into());
    }
    let mut prev: Option<f64> = None;
    for &value in thresholds {
        if !(0.0..=1.0).contains(&value) {
            return Err(InvalidArgument::InvalidThreshold { value }.into());
        }
        if let Some(prev) = prev {
            if value < prev {
                return Err(InvalidArgument::UnsortedThresholds { prev, next: value }.into());
            }
        }
        prev = Some(value);
    }
    Ok(())
}
