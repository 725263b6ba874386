#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::MarkerId;

#[cfg(feature = "std")]
pub(crate) type MarkerMap<V> = HashMap<MarkerId, V>;
#[cfg(not(feature = "std"))]
pub(crate) type MarkerMap<V> = BTreeMap<MarkerId, V>;
