//! # Entity Table
//!
//! Entities are plain indices into a metadata table. Each slot holds a
//! data index (where the entity's component payloads live in every
//! column), a membership bitset, and an alive flag.
//!
//! ## Two-phase visibility
//!
//! `create_index` and `kill` only touch flags. Neither is visible to
//! `size` until [`EntityTable::refresh`] commits: refresh partitions the
//! metadata in place so alive slots form the contiguous prefix
//! `[0, size)` and dead slots the suffix. Structural churn is thereby
//! buffered to once per iteration boundary.
//!
//! ## Permutation invariant
//!
//! The multiset of `data_index` values over `[0, capacity)` is always
//! exactly `{0, .., capacity - 1}`. Compaction swaps whole metadata
//! records, so the slot-to-storage mapping is reshuffled but never
//! duplicated or dropped; component payloads themselves never move.

use super::bitset::Bitset;

/// Stable index of a logical entity slot in the table.
///
/// Valid until the slot is reused after a `clear`, or recycled by an
/// allocation past the entity's death.
pub type EntityIndex = usize;

/// Index into every per-component column where an entity's payloads
/// live. Distinct from the entity's table slot index.
pub type DataIndex = usize;

/// Per-slot entity metadata. Owned exclusively by [`EntityTable`].
#[derive(Clone, Debug)]
pub(crate) struct EntityMeta {
    /// Backing-storage index for this slot's component payloads.
    pub(crate) data_index: DataIndex,
    /// Membership bitset, one bit per registered component type.
    pub(crate) bitset: Bitset,
    /// Whether this slot is currently alive.
    pub(crate) alive: bool,
}

impl EntityMeta {
    /// A dead slot whose data index is its own position.
    fn dead_at(index: DataIndex, width: usize) -> Self {
        Self {
            data_index: index,
            bitset: Bitset::empty(width),
            alive: false,
        }
    }
}

/// The array of entity metadata: capacity growth and compaction.
///
/// `size` is the committed alive count (the contiguous prefix from the
/// last refresh); `size_next` additionally counts entities created since
/// then. Indices in `[0, size_next)` are addressable; anything at or
/// beyond `size_next` is a caller bug, checked by debug assertions only.
pub struct EntityTable {
    entries: Vec<EntityMeta>,
    capacity: usize,
    size: usize,
    size_next: usize,
    /// Bitset width for every slot, fixed at construction.
    component_count: usize,
}

impl EntityTable {
    /// Creates an empty table for `component_count` component types.
    #[must_use]
    pub fn new(component_count: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: 0,
            size: 0,
            size_next: 0,
            component_count,
        }
    }

    /// Returns the allocated slot count.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the committed alive count from the last refresh.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the committed count plus pending creations.
    #[inline]
    #[must_use]
    pub fn size_next(&self) -> usize {
        self.size_next
    }

    /// Checks the alive flag of a slot.
    ///
    /// The index must be below `size_next`.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, index: EntityIndex) -> bool {
        self.meta(index).alive
    }

    /// Marks a slot dead. Lazy: the slot stays in place, with its data
    /// index and payloads untouched, until the next refresh.
    #[inline]
    pub fn kill(&mut self, index: EntityIndex) {
        self.meta_mut(index).alive = false;
    }

    /// Activates the next free slot and returns its index.
    ///
    /// The slot must currently be dead; its bitset is cleared and its
    /// data index is left exactly as the last compaction placed it.
    /// The caller must have grown the table first (see `needs_growth`).
    pub(crate) fn create_index(&mut self) -> EntityIndex {
        debug_assert!(
            self.size_next < self.capacity,
            "entity table exhausted: grow before create_index"
        );

        let free_index = self.size_next;
        self.size_next += 1;

        debug_assert!(!self.is_alive(free_index));

        let meta = &mut self.entries[free_index];
        meta.alive = true;
        meta.bitset.clear_all();

        free_index
    }

    /// True when the next creation would exceed capacity.
    #[inline]
    #[must_use]
    pub(crate) fn needs_growth(&self) -> bool {
        self.capacity <= self.size_next
    }

    /// The fixed growth rule: `(capacity + 10) * 2`.
    #[inline]
    #[must_use]
    pub(crate) fn next_capacity(&self) -> usize {
        (self.capacity + 10) * 2
    }

    /// Extends the table to `new_capacity` slots.
    ///
    /// Every new slot starts dead, with an empty bitset and its own
    /// index as data index, preserving the permutation invariant.
    ///
    /// # Panics
    ///
    /// Panics if `new_capacity` is not greater than the current capacity.
    pub(crate) fn grow_to(&mut self, new_capacity: usize) {
        assert!(
            new_capacity > self.capacity,
            "grow_to: new capacity {new_capacity} not above {}",
            self.capacity
        );

        let width = self.component_count;
        self.entries
            .extend((self.capacity..new_capacity).map(|i| EntityMeta::dead_at(i, width)));
        self.capacity = new_capacity;
    }

    /// Resets every slot to identity: `data_index = slot index`, dead,
    /// empty bitset. Counts drop to zero. The only operation that
    /// restores the identity slot-to-storage mapping at scale.
    pub fn clear(&mut self) {
        for (index, meta) in self.entries.iter_mut().enumerate() {
            meta.data_index = index;
            meta.bitset.clear_all();
            meta.alive = false;
        }
        self.size = 0;
        self.size_next = 0;
    }

    /// Commits pending creations and kills, compacting alive slots into
    /// the contiguous prefix `[0, count)`. Returns the alive count and
    /// sets `size = size_next = count`.
    pub fn refresh(&mut self) -> usize {
        if self.size_next == 0 {
            self.size = 0;
            return 0;
        }

        let count = self.partition_alive();
        self.size = count;
        self.size_next = count;
        count
    }

    /// Two-pointer in-place partition over `[0, size_next)`.
    ///
    /// `i_dead` scans forward for dead slots, `i_alive` scans backward
    /// for alive ones; whole metadata records are swapped so data index,
    /// bitset and flag move together. Returns one past the last alive
    /// slot once the pointers converge.
    fn partition_alive(&mut self) -> usize {
        let mut i_dead: usize = 0;
        let mut i_alive: usize = self.size_next - 1;

        loop {
            // next dead slot from the front
            loop {
                if i_dead > i_alive {
                    return i_dead;
                }
                if !self.entries[i_dead].alive {
                    break;
                }
                i_dead += 1;
            }

            // last alive slot from the back
            loop {
                if self.entries[i_alive].alive {
                    break;
                }
                if i_alive <= i_dead {
                    return i_dead;
                }
                i_alive -= 1;
            }

            // i_dead < i_alive here, so i_alive >= 1 and the decrement
            // below cannot underflow
            debug_assert!(i_dead < i_alive);
            self.entries.swap(i_dead, i_alive);

            i_dead += 1;
            i_alive -= 1;
        }
    }

    /// Slot metadata access; the index must be below `size_next`.
    #[inline]
    pub(crate) fn meta(&self, index: EntityIndex) -> &EntityMeta {
        debug_assert!(
            index < self.size_next,
            "entity index {index} at or beyond size_next {}",
            self.size_next
        );
        &self.entries[index]
    }

    /// Mutable slot metadata access; the index must be below `size_next`.
    #[inline]
    pub(crate) fn meta_mut(&mut self, index: EntityIndex) -> &mut EntityMeta {
        debug_assert!(
            index < self.size_next,
            "entity index {index} at or beyond size_next {}",
            self.size_next
        );
        &mut self.entries[index]
    }

    /// Alive flag of a raw slot in `[0, capacity)`, for diagnostics.
    #[inline]
    pub(crate) fn slot_alive(&self, index: usize) -> bool {
        self.entries[index].alive
    }
}
