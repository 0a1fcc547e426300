//! # Manager
//!
//! The sole client-facing surface. Composes the entity table, the
//! component store, and the signature registry; everything else in this
//! crate is plumbing for it.
//!
//! ## Sharp edges, by design
//!
//! - Creations and kills are invisible to `entity_count` and iteration
//!   until [`Manager::refresh`] commits them.
//! - Preconditions (`get_component` without the membership bit, any
//!   entity index at or beyond the pending count) are checked by debug
//!   assertions only. Optimized builds skip the checks and read stale or
//!   default payload bytes. Check `has_component`/`is_alive` first.
//! - No structural mutation from inside an iteration callback: growth
//!   reallocates the columns and would invalidate references handed out
//!   earlier in the same pass. The `&mut self` receivers enforce this
//!   for the manager itself; defer structural changes to between passes.

use std::fmt;

use super::component::Component;
use super::entity::{EntityIndex, EntityTable};
use super::signature::{ids_distinct, ComponentTuple, Signature, SignatureRegistry};
use super::storage::ComponentStore;
use super::Registry;

/// Capacity installed at construction, before any explicit growth.
const INITIAL_CAPACITY: usize = 100;

/// Entity/component lifecycle, signature matching, and iteration over a
/// fixed component/signature configuration.
pub struct Manager {
    entities: EntityTable,
    components: ComponentStore,
    signatures: SignatureRegistry,
}

impl Manager {
    /// Builds a manager from a validated registry and installs the
    /// initial capacity.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        let Registry {
            component_count,
            columns,
            signatures,
        } = registry;

        let mut manager = Self {
            entities: EntityTable::new(component_count),
            components: ComponentStore::new(columns),
            signatures: SignatureRegistry::new(signatures),
        };
        manager.grow_to(INITIAL_CAPACITY);
        manager
    }

    /// Extends the metadata table and every component column together,
    /// keeping all of them sized to the same capacity.
    fn grow_to(&mut self, new_capacity: usize) {
        self.entities.grow_to(new_capacity);
        self.components.grow_to(new_capacity);
        tracing::debug!("capacity grown to {}", new_capacity);
    }

    /// Activates the next free entity slot and returns its index.
    ///
    /// Grows the table and every component column first when the slot
    /// would exceed capacity. The new entity is pending: invisible to
    /// `entity_count` and iteration until the next refresh.
    pub fn create_entity(&mut self) -> EntityIndex {
        if self.entities.needs_growth() {
            let target = self.entities.next_capacity();
            self.grow_to(target);
        }
        self.entities.create_index()
    }

    /// Checks the alive flag. O(1). Index must be below the pending count.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, entity: EntityIndex) -> bool {
        self.entities.is_alive(entity)
    }

    /// Marks an entity dead. Lazy: the slot, its bitset and its payloads
    /// stay untouched until the next refresh.
    #[inline]
    pub fn kill(&mut self, entity: EntityIndex) {
        self.entities.kill(entity);
    }

    /// Commits pending creations and kills, compacting alive entities
    /// into the contiguous prefix. Returns the alive count. Component
    /// storage is untouched; only the slot-to-data-index mapping moves.
    pub fn refresh(&mut self) -> usize {
        let count = self.entities.refresh();
        tracing::trace!("refresh committed {} alive entities", count);
        count
    }

    /// Resets every slot to identity data index, dead, empty bitset, and
    /// drops both counts to zero. Payload bytes stay in the columns.
    pub fn clear(&mut self) {
        self.entities.clear();
        tracing::debug!("manager cleared");
    }

    /// Committed alive count from the last refresh.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.size()
    }

    /// Allocated slot count.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entities.capacity()
    }

    /// Attaches component `C` to the entity and writes its payload at
    /// the entity's data index, returning a reference to the slot.
    ///
    /// Overwrites any previous payload in place without cleanup.
    ///
    /// # Panics
    ///
    /// Panics if `C` was not registered (boundary contract violation).
    pub fn add_component<C: Component>(&mut self, entity: EntityIndex, value: C) -> &mut C {
        let meta = self.entities.meta_mut(entity);
        meta.bitset.set(C::ID);
        let data_index = meta.data_index;
        self.components.set(data_index, value)
    }

    /// Reads the membership bit for component `C`.
    #[inline]
    #[must_use]
    pub fn has_component<C: Component>(&self, entity: EntityIndex) -> bool {
        self.entities.meta(entity).bitset.test(C::ID)
    }

    /// Clears the membership bit for component `C`. The payload is left
    /// in place until the next overwrite.
    #[inline]
    pub fn delete_component<C: Component>(&mut self, entity: EntityIndex) {
        self.entities.meta_mut(entity).bitset.clear(C::ID);
    }

    /// Returns the entity's `C` payload.
    ///
    /// Precondition: `has_component::<C>` is true (debug-asserted).
    /// Without it, the returned bytes are stale or default.
    #[inline]
    #[must_use]
    pub fn get_component<C: Component>(&self, entity: EntityIndex) -> &C {
        debug_assert!(
            self.has_component::<C>(entity),
            "get_component without membership bit"
        );
        self.components.get(self.entities.meta(entity).data_index)
    }

    /// Mutable variant of [`Manager::get_component`].
    #[inline]
    pub fn get_component_mut<C: Component>(&mut self, entity: EntityIndex) -> &mut C {
        debug_assert!(
            self.has_component::<C>(entity),
            "get_component_mut without membership bit"
        );
        let data_index = self.entities.meta(entity).data_index;
        self.components.get_mut(data_index)
    }

    /// Superset test of the entity's bitset against the signature mask.
    ///
    /// # Panics
    ///
    /// Panics if `S` was not registered.
    #[inline]
    #[must_use]
    pub fn matches_signature<S: Signature>(&self, entity: EntityIndex) -> bool {
        let mask = self.signatures.mask_of::<S>();
        self.entities.meta(entity).bitset.contains_all(mask)
    }

    /// Invokes the callback for every committed entity in `[0, size)`.
    pub fn for_each(&self, mut f: impl FnMut(EntityIndex)) {
        for entity in 0..self.entities.size() {
            f(entity);
        }
    }

    /// Invokes the callback for every committed entity matching `S`,
    /// passing references to the signature's component types in declared
    /// order, resolved through the entity's data index.
    ///
    /// # Panics
    ///
    /// Panics if `S` was not registered, including an unregistered
    /// signature type whose declared id collides with a registered one.
    #[allow(unsafe_code)]
    pub fn for_each_matching<S, F>(&mut self, mut f: F)
    where
        S: Signature,
        F: FnMut(EntityIndex, <S::Components as ComponentTuple>::Refs<'_>),
    {
        debug_assert!(
            ids_distinct(<S::Components as ComponentTuple>::IDS),
            "signature component types must be distinct"
        );

        // mask_of verifies S is the type registered under S::ID; an
        // unregistered signature cannot reach the unsafe fetch below.
        let mask = self.signatures.mask_of::<S>();
        let size = self.entities.size();

        for entity in 0..size {
            let meta = self.entities.meta(entity);
            if !meta.bitset.contains_all(mask) {
                continue;
            }
            let data_index = meta.data_index;
            // SAFETY: registry validation guarantees distinct member
            // ids, and data_index is below capacity by the permutation
            // invariant, so the fetch contract holds.
            let refs = unsafe {
                <S::Components as ComponentTuple>::fetch(&mut self.components, data_index)
            };
            f(entity, refs);
        }
    }

    /// Signature masks, read-only. Exposed for diagnostics and tests.
    #[inline]
    #[must_use]
    pub fn signatures(&self) -> &SignatureRegistry {
        &self.signatures
    }

    /// Diagnostic snapshot: counts plus a per-slot alive/dead character
    /// sequence. Observability only, not part of the functional contract.
    #[must_use]
    pub fn state(&self) -> StateReport<'_> {
        StateReport {
            table: &self.entities,
        }
    }
}

/// Borrowed diagnostic view over the entity table; renders as
/// `size`, `size_next`, `capacity` and one `A`/`D` per slot.
pub struct StateReport<'a> {
    table: &'a EntityTable,
}

impl fmt::Display for StateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "size: {}, size_next: {}, capacity: {}",
            self.table.size(),
            self.table.size_next(),
            self.table.capacity()
        )?;
        for slot in 0..self.table.capacity() {
            let mark = if self.table.slot_alive(slot) { 'A' } else { 'D' };
            write!(f, "{mark}")?;
        }
        Ok(())
    }
}
