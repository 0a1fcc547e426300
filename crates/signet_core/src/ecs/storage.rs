//! # Component Store
//!
//! Dense, per-component-type backing storage. One contiguous column per
//! registered type, every column sized to the entity capacity, indexed
//! by data index.
//!
//! Columns are looked up directly by `Component::ID`, so access is a
//! vector index plus a downcast - no hashing, no runtime reflection.
//! Referencing a component type that was never registered is a contract
//! violation and fails fast with a panic at this boundary.

use std::any::Any;

use super::component::Component;
use super::entity::DataIndex;

/// Type-erased column interface. Only growth crosses the erasure
/// boundary; typed access goes through a downcast.
pub(crate) trait Column: Any {
    /// Extends the column to `new_capacity` default-valued slots.
    fn grow_to(&mut self, new_capacity: usize);
    /// Upcast for typed read access.
    fn as_any(&self) -> &dyn Any;
    /// Upcast for typed write access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The dense array for one component type.
pub(crate) struct TypedColumn<C: Component> {
    pub(crate) data: Vec<C>,
}

impl<C: Component> TypedColumn<C> {
    pub(crate) fn new() -> Self {
        Self { data: Vec::new() }
    }
}

impl<C: Component> Column for TypedColumn<C> {
    fn grow_to(&mut self, new_capacity: usize) {
        self.data.resize(new_capacity, C::default());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// All component columns, in registration order.
///
/// Pure storage: no identity logic. The caller (the manager) verifies
/// membership bits before reading; a slot whose bit is unset still holds
/// bytes - either the default fill or a stale previous payload.
/// Overwriting a slot never runs cleanup on the previous occupant;
/// [`Component`]'s `Copy` bound makes that the only possibility.
pub struct ComponentStore {
    columns: Vec<Box<dyn Column>>,
    capacity: usize,
}

impl ComponentStore {
    /// Wraps the registry-built columns. All columns start empty.
    pub(crate) fn new(columns: Vec<Box<dyn Column>>) -> Self {
        Self {
            columns,
            capacity: 0,
        }
    }

    /// Returns the per-column slot count.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Extends every column to `new_capacity` slots, filling new slots
    /// with the component default.
    pub(crate) fn grow_to(&mut self, new_capacity: usize) {
        for column in &mut self.columns {
            column.grow_to(new_capacity);
        }
        self.capacity = new_capacity;
    }

    /// Returns the payload of component `C` at `data_index`.
    ///
    /// Precondition: the owning entity's membership bit for `C` is set
    /// and `data_index < capacity`. Unverified access reads stale or
    /// default bytes; an out-of-range index panics on the slice bound.
    ///
    /// # Panics
    ///
    /// Panics if `C` was not registered.
    #[inline]
    #[must_use]
    pub fn get<C: Component>(&self, data_index: DataIndex) -> &C {
        &self.column::<C>().data[data_index]
    }

    /// Mutable variant of [`ComponentStore::get`].
    ///
    /// # Panics
    ///
    /// Panics if `C` was not registered.
    #[inline]
    pub fn get_mut<C: Component>(&mut self, data_index: DataIndex) -> &mut C {
        &mut self.column_mut::<C>().data[data_index]
    }

    /// Overwrites the slot in place and returns it. The previous
    /// occupant is dropped nowhere - components are `Copy`.
    #[inline]
    pub(crate) fn set<C: Component>(&mut self, data_index: DataIndex, value: C) -> &mut C {
        let slot = &mut self.column_mut::<C>().data[data_index];
        *slot = value;
        slot
    }

    /// Base pointer of the `C` column, for multi-column fetches.
    ///
    /// # Panics
    ///
    /// Panics if `C` was not registered.
    pub(crate) fn column_ptr<C: Component>(&mut self) -> *mut C {
        self.column_mut::<C>().data.as_mut_ptr()
    }

    fn column<C: Component>(&self) -> &TypedColumn<C> {
        self.columns
            .get(C::ID)
            .and_then(|column| column.as_any().downcast_ref::<TypedColumn<C>>())
            .expect("component type not registered with this manager")
    }

    fn column_mut<C: Component>(&mut self) -> &mut TypedColumn<C> {
        self.columns
            .get_mut(C::ID)
            .and_then(|column| column.as_any_mut().downcast_mut::<TypedColumn<C>>())
            .expect("component type not registered with this manager")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ComponentId;
    use bytemuck::{Pod, Zeroable};

    #[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
    #[repr(C)]
    struct Mass {
        kg: f32,
    }

    impl Component for Mass {
        const ID: ComponentId = 0;
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
    #[repr(C)]
    struct Charge {
        coulomb: f32,
    }

    impl Component for Charge {
        const ID: ComponentId = 1;
    }

    fn store() -> ComponentStore {
        ComponentStore::new(vec![
            Box::new(TypedColumn::<Mass>::new()),
            Box::new(TypedColumn::<Charge>::new()),
        ])
    }

    #[test]
    fn test_growth_fills_defaults() {
        let mut store = store();
        store.grow_to(8);
        assert_eq!(store.capacity(), 8);
        assert_eq!(*store.get::<Mass>(7), Mass::default());
        assert_eq!(*store.get::<Charge>(0), Charge::default());
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut store = store();
        store.grow_to(4);

        store.set(2, Mass { kg: 10.0 });
        assert_eq!(store.get::<Mass>(2).kg, 10.0);

        let slot = store.set(2, Mass { kg: 3.5 });
        assert_eq!(slot.kg, 3.5);
        // the sibling column is untouched
        assert_eq!(*store.get::<Charge>(2), Charge::default());
    }

    #[test]
    fn test_growth_preserves_existing_payloads() {
        let mut store = store();
        store.grow_to(2);
        store.set(1, Charge { coulomb: -1.0 });

        store.grow_to(16);
        assert_eq!(store.get::<Charge>(1).coulomb, -1.0);
        assert_eq!(*store.get::<Charge>(15), Charge::default());
    }

    #[test]
    #[should_panic(expected = "component type not registered")]
    fn test_unregistered_component_fails_fast() {
        #[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
        #[repr(C)]
        struct Ghost {
            v: f32,
        }
        impl Component for Ghost {
            const ID: ComponentId = 7;
        }

        let store = store();
        let _ = store.get::<Ghost>(0);
    }
}
