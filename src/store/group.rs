//! Group payloads: coordinate arrays, pointer columns, relationship kind.

use hashbrown::HashMap;
use num_traits::PrimInt;
use serde::{Deserialize, Serialize};

use crate::store::GroupStore;

/// One lat/lon array pair. Direct groups carry one; super-groups carry
/// several sharing a single time array.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordPair {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
}

impl CoordPair {
    pub fn new(lat: Vec<f64>, lon: Vec<f64>) -> Self {
        Self { lat, lon }
    }
}

/// A begin/count array pair addressing a contiguous row range of another
/// group: row `i` of the owner covers rows
/// `[begin[i] - 1, begin[i] - 1 + count[i])` of the referenced group.
///
/// Begin values are 1-based; `0` and `-1` are the format-dependent "no
/// corresponding rows" sentinels, with `count == 0` as the matching sentinel
/// on the count side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerColumn {
    pub begin: Vec<i64>,
    pub count: Vec<i64>,
}

impl PointerColumn {
    pub fn new(begin: Vec<i64>, count: Vec<i64>) -> Self {
        Self { begin, count }
    }

    /// Widen narrower native integer arrays into the column's `i64` form.
    /// Source datasets store these at whatever width the producer chose
    /// (i32, u16, i64, ...); all arithmetic here runs on `i64`.
    pub fn from_raw<B: PrimInt, C: PrimInt>(begin: &[B], count: &[C]) -> Self {
        Self {
            begin: begin.iter().map(|v| v.to_i64().unwrap_or(0)).collect(),
            count: count.iter().map(|v| v.to_i64().unwrap_or(0)).collect(),
        }
    }

    /// Number of owner rows described, when both arrays agree.
    pub fn len(&self) -> Option<usize> {
        (self.begin.len() == self.count.len()).then_some(self.begin.len())
    }

    pub fn is_empty(&self) -> bool {
        self.begin.is_empty() && self.count.is_empty()
    }
}

/// How a group's selection is derived, as declared by the product
/// configuration. Paths name other groups in the same granule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Relationship {
    /// Selection comes from the group's own coordinate arrays.
    #[default]
    None,
    /// The group's rows are addressed by `parent`'s pointer column.
    ForwardRefTo { parent: String },
    /// The group's own pointer column addresses `target`, which is resolved
    /// first.
    ReverseRefTo { target: String },
    /// Several sibling groups contribute independent lat/lon pairs sharing
    /// one time array.
    SuperGroupOf { siblings: Vec<String> },
    /// Union of the group's own coordinate test and the rows addressed by
    /// `secondary`'s pointer column over `secondary`'s selection.
    MergedWith { secondary: String },
}

/// Everything the resolver needs to know about one group.
#[derive(Clone, Debug, Default)]
pub struct GroupData {
    /// Row count shared by the group's parallel arrays.
    pub row_count: i64,
    /// Time coordinate, seconds since the dataset epoch, when the group has
    /// one.
    pub time: Option<Vec<f64>>,
    /// Zero or more lat/lon pairs.
    pub coords: Vec<CoordPair>,
    /// Declared pointer column, for groups that reference another group's
    /// rows.
    pub pointer: Option<PointerColumn>,
    /// Declared relationship to other groups.
    pub relationship: Relationship,
    /// Set by the configuration layer when a coordinate reference was
    /// declared but its dataset is absent, or the name pattern match came up
    /// short. Such a group degrades to a zero-size selection.
    pub broken_coordinates: bool,
}

impl GroupData {
    /// A bare group of `row_count` rows with no coordinates and no
    /// relationship.
    pub fn with_rows(row_count: i64) -> Self {
        Self {
            row_count,
            ..Default::default()
        }
    }

    /// Whether the group carries no usable coordinate reference at all.
    pub fn has_no_coordinates(&self) -> bool {
        self.time.is_none() && self.coords.is_empty()
    }
}

/// Trivial map-backed [`GroupStore`].
#[derive(Default)]
pub struct InMemoryStore {
    groups: HashMap<String, GroupData>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the group at `path`.
    pub fn insert(&mut self, path: impl Into<String>, group: GroupData) -> &mut Self {
        self.groups.insert(path.into(), group);
        self
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl GroupStore for InMemoryStore {
    fn group(&self, path: &str) -> Option<&GroupData> {
        self.groups.get(path)
    }
}
