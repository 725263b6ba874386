use alloc::vec::Vec;

use crate::{ClassifierOptions, Group, ItemId, ItemPosition, ObservationTable, TrackedItem};

/// Items partitioned by their position relative to the visible region.
///
/// Each group keeps the relative order of the input items.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifiedGroups {
    pub above: Vec<ItemPosition>,
    pub inside: Vec<ItemPosition>,
    pub below: Vec<ItemPosition>,
}

impl ClassifiedGroups {
    pub fn get(&self, group: Group) -> &[ItemPosition] {
        match group {
            Group::Above => &self.above,
            Group::Inside => &self.inside,
            Group::Below => &self.below,
        }
    }

    fn push(&mut self, group: Group, position: ItemPosition) {
        match group {
            Group::Above => self.above.push(position),
            Group::Inside => self.inside.push(position),
            Group::Below => self.below.push(position),
        }
    }

    /// Iterates every classified position, group by group in render order.
    pub fn iter(&self) -> impl Iterator<Item = (Group, &ItemPosition)> {
        Group::ALL
            .into_iter()
            .flat_map(move |g| self.get(g).iter().map(move |p| (g, p)))
    }

    pub fn len(&self) -> usize {
        self.above.len() + self.inside.len() + self.below.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the group of the first position with the given id.
    pub fn group_of(&self, id: &ItemId) -> Option<Group> {
        self.iter()
            .find(|(_, p)| &p.item.id == id)
            .map(|(g, _)| g)
    }

    pub fn clear(&mut self) {
        self.above.clear();
        self.inside.clear();
        self.below.clear();
    }
}

/// Computes the signed boundary distances of every observed item.
///
/// Returns an empty vector until both boundary samples exist. Items without a sample are
/// skipped.
pub fn item_positions(items: &[TrackedItem], table: &ObservationTable) -> Vec<ItemPosition> {
    let (Some(top), Some(bottom)) = (table.top(), table.bottom()) else {
        return Vec::new();
    };
    let top_edge = top.bounding_rect.bottom;
    let bottom_edge = bottom.bounding_rect.bottom;

    items
        .iter()
        .filter_map(|item| {
            let sample = table.item(&item.id)?;
            Some(ItemPosition {
                item: item.clone(),
                distance_top: sample.bounding_rect.top - top_edge,
                distance_bottom: bottom_edge - sample.bounding_rect.bottom,
            })
        })
        .collect()
}

/// Partitions `items` into above/inside/below groups using the samples in `table`.
///
/// Pure and total: the same inputs always produce the same groups, and non-finite geometry is
/// passed through arithmetically.
pub fn classify(
    items: &[TrackedItem],
    table: &ObservationTable,
    options: &ClassifierOptions,
) -> ClassifiedGroups {
    let mut groups = ClassifiedGroups::default();
    for position in item_positions(items, table) {
        let group = options.group_for(position.distance_top, position.distance_bottom);
        groups.push(group, position);
    }
    groups
}
