use crate::key::MarkerMap;
use crate::{IntersectionSample, ItemId, MarkerId};

/// Latest-wins mapping from marker to its last observed sample.
///
/// Entries are only ever overwritten; nothing is removed until [`ObservationTable::clear`].
#[derive(Clone, Debug, Default)]
pub struct ObservationTable {
    samples: MarkerMap<IntersectionSample>,
}

impl ObservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `sample` for `marker`, returning the sample it replaced.
    pub fn insert(
        &mut self,
        marker: MarkerId,
        sample: IntersectionSample,
    ) -> Option<IntersectionSample> {
        self.samples.insert(marker, sample)
    }

    pub fn get(&self, marker: &MarkerId) -> Option<&IntersectionSample> {
        self.samples.get(marker)
    }

    pub fn item(&self, id: &ItemId) -> Option<&IntersectionSample> {
        // MarkerId::Item owns its id; the clone is an Arc bump.
        self.samples.get(&MarkerId::Item(id.clone()))
    }

    pub fn top(&self) -> Option<&IntersectionSample> {
        self.samples.get(&MarkerId::TopBoundary)
    }

    pub fn bottom(&self) -> Option<&IntersectionSample> {
        self.samples.get(&MarkerId::BottomBoundary)
    }

    pub fn contains(&self, marker: &MarkerId) -> bool {
        self.samples.contains_key(marker)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MarkerId, &IntersectionSample)> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl FromIterator<(MarkerId, IntersectionSample)> for ObservationTable {
    fn from_iter<T: IntoIterator<Item = (MarkerId, IntersectionSample)>>(iter: T) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl Extend<(MarkerId, IntersectionSample)> for ObservationTable {
    fn extend<T: IntoIterator<Item = (MarkerId, IntersectionSample)>>(&mut self, iter: T) {
        self.samples.extend(iter);
    }
}
