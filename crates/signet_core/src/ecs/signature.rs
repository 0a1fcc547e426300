//! # Signatures
//!
//! A signature is a fixed, named set of component types used as a query
//! filter. Each signature gets a precomputed bitset mask at registry
//! build time; matching an entity is then one word-wise AND + compare.
//!
//! Query dispatch hands the matched entity's component references to the
//! callback positionally, in the signature's declared order. The tuple
//! of references is materialized through per-column raw pointers - the
//! columns are distinct arrays, so distinct component types can be
//! borrowed mutably at the same time.

// SAFETY: this module requires unsafe for the multi-column reference
// fetch. The aliasing argument is documented on `ComponentTuple::fetch`
// and enforced by registry validation (no duplicate component ids
// within a signature).
#![allow(unsafe_code)]

use std::any::TypeId;

use super::bitset::Bitset;
use super::component::{Component, ComponentId};
use super::entity::DataIndex;
use super::storage::ComponentStore;

/// Dense signature id in `[0, S)`.
pub type SignatureId = usize;

/// A registered query filter: a fixed, ordered set of component types.
///
/// The `ID` must equal the signature's position in the registration
/// order passed to [`super::Registry`]; the registry rejects any
/// mismatch at build time.
///
/// # Example
///
/// ```rust,ignore
/// struct Life;
///
/// impl Signature for Life {
///     const ID: SignatureId = 1;
///     type Components = (Health,);
/// }
/// ```
pub trait Signature: 'static {
    /// Dense id for this signature.
    const ID: SignatureId;
    /// The member component types, in declared order.
    type Components: ComponentTuple;
}

/// An ordered list of component types, implemented for tuples.
///
/// This is the positional-dispatch seam: `IDS` drives mask construction
/// and validation, `fetch` resolves one mutable reference per member
/// type at a given data index.
pub trait ComponentTuple: 'static {
    /// Member component ids, in declared order.
    const IDS: &'static [ComponentId];

    /// One mutable reference per member type, in declared order.
    type Refs<'a>
    where
        Self: 'a;

    /// Materializes references to every member component at `data_index`.
    ///
    /// # Safety
    ///
    /// - The member component ids must be pairwise distinct, so each
    ///   reference points into a different column (the registry rejects
    ///   duplicates at build time).
    /// - `data_index` must be below the store capacity; every column is
    ///   sized to that capacity.
    unsafe fn fetch(store: &mut ComponentStore, data_index: DataIndex) -> Self::Refs<'_>;
}

macro_rules! impl_component_tuple {
    ($($component:ident),+) => {
        impl<$($component: Component),+> ComponentTuple for ($($component,)+) {
            const IDS: &'static [ComponentId] = &[$($component::ID),+];

            type Refs<'a> = ($(&'a mut $component,)+) where Self: 'a;

            unsafe fn fetch(store: &mut ComponentStore, data_index: DataIndex) -> Self::Refs<'_> {
                debug_assert!(data_index < store.capacity());
                // SAFETY: per the trait contract the ids are distinct,
                // so each pointer targets a different column, and
                // data_index is within every column's length.
                ($(&mut *store.column_ptr::<$component>().add(data_index),)+)
            }
        }
    };
}

impl_component_tuple!(A);
impl_component_tuple!(A, B);
impl_component_tuple!(A, B, C);
impl_component_tuple!(A, B, C, D);
impl_component_tuple!(A, B, C, D, E);
impl_component_tuple!(A, B, C, D, E, F);
impl_component_tuple!(A, B, C, D, E, F, G);
impl_component_tuple!(A, B, C, D, E, F, G, H);

/// One registered signature: the concrete type that registered the id,
/// plus its precomputed mask.
pub(crate) struct SignatureEntry {
    pub(crate) type_id: TypeId,
    pub(crate) mask: Bitset,
}

/// Precomputed signature masks, one per registered signature.
///
/// Built once at registry build, read-only afterwards. Entries are
/// keyed by the signature's concrete type as well as its dense id, so
/// an unregistered signature type cannot borrow a registered id - the
/// same type-keyed boundary the component columns get from their
/// downcast.
pub struct SignatureRegistry {
    entries: Vec<SignatureEntry>,
}

impl SignatureRegistry {
    pub(crate) fn new(entries: Vec<SignatureEntry>) -> Self {
        Self { entries }
    }

    /// Returns the mask for signature type `S`, verifying that `S` is
    /// the type registered under `S::ID`. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `S` was not registered - including an unregistered
    /// type whose declared id collides with a registered signature.
    #[inline]
    #[must_use]
    pub fn mask_of<S: Signature>(&self) -> &Bitset {
        let entry = self
            .entries
            .get(S::ID)
            .expect("signature not registered with this manager");
        assert!(
            entry.type_id == TypeId::of::<S>(),
            "signature not registered with this manager: id {} belongs to a different signature type",
            S::ID
        );
        &entry.mask
    }

    /// Returns the mask for a signature id, for diagnostics. O(1).
    ///
    /// # Panics
    ///
    /// Panics if no signature was registered under `id`.
    #[inline]
    #[must_use]
    pub fn mask(&self, id: SignatureId) -> &Bitset {
        &self
            .entries
            .get(id)
            .expect("signature not registered with this manager")
            .mask
    }

    /// Number of registered signatures.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no signature is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pairwise distinctness check for small id lists, used by registry
/// validation and query debug assertions.
pub(crate) fn ids_distinct(ids: &[ComponentId]) -> bool {
    ids.iter()
        .enumerate()
        .all(|(i, id)| !ids[..i].contains(id))
}
