//! Two-pass union-find labeling
//!
//! The first raster pass gives each foreground cell a provisional label
//! taken from its left or upper neighbor, minting a new one when neither is
//! foreground. When both are foreground with different labels the two are
//! recorded as equivalent. The second pass replaces each provisional label
//! with the representative of its class.
//!
//! Two variants are provided:
//!
//! - [`label_union_find`] keeps a [`DisjointSet`] forest (union by rank,
//!   path-compressed find) indexed by provisional label.
//! - [`label_union_find_in_place`] stores the forest in the label buffer
//!   itself through [`InPlaceForest`] and needs no auxiliary memory.

use crate::counter::{LABEL_WARN_LIMIT, LabelCounter};
use ccl_core::{BACKGROUND, FIRST_LABEL, Label, LabelGrid};
use log::{debug, warn};

/// Disjoint-set forest over dense element indices `0..len`
#[derive(Debug, Clone, Default)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Create an empty forest
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// `true` if no element was added yet
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Add a singleton set and return its element index
    pub fn make_set(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);
        id
    }

    /// Root of the set containing `x`, compressing the path on the way.
    ///
    /// # Panics
    ///
    /// Panics if `x >= len()`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }

        root
    }

    /// Merge the sets of `a` and `b` and return the new root.
    ///
    /// The root of higher rank wins; on equal rank the lower index does.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }

        let (root, child) = match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Greater => (ra, rb),
            std::cmp::Ordering::Less => (rb, ra),
            std::cmp::Ordering::Equal => {
                let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
                self.rank[root] += 1;
                (root, child)
            }
        };
        self.parent[child] = root;
        root
    }
}

#[inline]
fn slot(label: Label) -> usize {
    (label - FIRST_LABEL) as usize
}

#[inline]
fn label_of_slot(slot: usize) -> Label {
    slot as Label + FIRST_LABEL
}

/// Label every component of a `{0, 1}` grid in place using a
/// [`DisjointSet`] keyed by provisional label.
///
/// Final labels are the provisional label of each class's root, so they
/// are unique per component but not consecutive.
pub fn label_union_find(grid: &mut LabelGrid) {
    let width = grid.width();
    let mut counter = LabelCounter::new();
    let mut sets = DisjointSet::new();
    let data = grid.data_mut();

    for i in 0..data.len() {
        if data[i] == BACKGROUND {
            continue;
        }
        let left = if i % width > 0 { data[i - 1] } else { BACKGROUND };
        let up = if i >= width { data[i - width] } else { BACKGROUND };

        data[i] = match (left != BACKGROUND, up != BACKGROUND) {
            (false, false) => {
                sets.make_set();
                counter.mint()
            }
            (true, false) => left,
            (false, true) => up,
            (true, true) => {
                if left != up {
                    sets.union(slot(left), slot(up));
                }
                left
            }
        };
    }

    for cell in data.iter_mut() {
        if *cell != BACKGROUND {
            *cell = label_of_slot(sets.find(slot(*cell)));
        }
    }

    debug!("union-find: {} provisional labels", counter.minted());
}

/// Disjoint-set forest encoded in a label buffer
///
/// Each foreground cell stores `parent_index + 2`, and a root stores its own
/// `index + 2`. The label of a component is therefore `root_index + 2`.
/// Unions always hang the larger root under the smaller one, so every
/// parent index is lower than its child's and no cycle can form.
///
/// Only cells that have been made part of the forest ([`make_root`] or
/// [`attach`]) may be passed to [`find`] or [`union`].
///
/// [`make_root`]: InPlaceForest::make_root
/// [`attach`]: InPlaceForest::attach
/// [`find`]: InPlaceForest::find
/// [`union`]: InPlaceForest::union
pub struct InPlaceForest<'a> {
    cells: &'a mut [Label],
}

impl<'a> InPlaceForest<'a> {
    /// Wrap a label buffer
    pub fn new(cells: &'a mut [Label]) -> Self {
        Self { cells }
    }

    /// Label that encodes `index` as a parent
    #[inline]
    pub fn label_of(index: usize) -> Label {
        index as Label + FIRST_LABEL
    }

    /// Raw cell value
    #[inline]
    pub fn get(&self, index: usize) -> Label {
        self.cells[index]
    }

    #[inline]
    fn parent(&self, index: usize) -> usize {
        (self.cells[index] - FIRST_LABEL) as usize
    }

    /// Make `index` its own root
    #[inline]
    pub fn make_root(&mut self, index: usize) {
        self.cells[index] = Self::label_of(index);
    }

    /// Point `index` at `parent`
    #[inline]
    pub fn attach(&mut self, index: usize, parent: usize) {
        self.cells[index] = Self::label_of(parent);
    }

    /// Walk parents from `index` to the self-parented root
    pub fn find(&self, index: usize) -> usize {
        let mut cur = index;
        loop {
            let p = self.parent(cur);
            if p == cur {
                return cur;
            }
            cur = p;
        }
    }

    /// Merge the trees of `a` and `b`, keeping the lower root index.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        let (root, child) = if ra <= rb { (ra, rb) } else { (rb, ra) };
        if root != child {
            self.attach(child, root);
        }
        root
    }
}

/// Label every component of a `{0, 1}` grid using the grid itself as the
/// union-find forest.
///
/// Each component ends up labeled `root_index + 2`, where the root is its
/// first cell in raster order.
pub fn label_union_find_in_place(grid: &mut LabelGrid) {
    let width = grid.width();
    let mut roots = 0usize;
    let mut forest = InPlaceForest::new(grid.data_mut());
    let len = forest.cells.len();

    for i in 0..len {
        if forest.get(i) == BACKGROUND {
            continue;
        }
        let left = i % width > 0 && forest.get(i - 1) != BACKGROUND;
        let up = i >= width && forest.get(i - width) != BACKGROUND;

        match (left, up) {
            (false, false) => {
                forest.make_root(i);
                roots += 1;
            }
            (true, false) => {
                let root = forest.find(i - 1);
                forest.attach(i, root);
            }
            (false, true) => {
                let root = forest.find(i - width);
                forest.attach(i, root);
            }
            (true, true) => {
                let root = forest.union(i - 1, i - width);
                forest.attach(i, root);
            }
        }
    }

    for i in 0..len {
        if forest.get(i) != BACKGROUND {
            let root = forest.find(i);
            forest.attach(i, root);
        }
    }

    if roots > 0 && InPlaceForest::label_of(len - 1) > LABEL_WARN_LIMIT {
        warn!(
            "in-place union-find labels may exceed {}",
            LABEL_WARN_LIMIT
        );
    }
    debug!("union-find in-place: {} provisional roots", roots);
}
