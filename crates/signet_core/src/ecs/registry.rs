//! # Registry
//!
//! The one-time registration step the manager consumes at construction:
//! a fixed, ordered list of component types (ids `0..C`) and a fixed,
//! ordered list of signatures (ids `0..S`). Both lists are immutable for
//! the lifetime of the manager; there is no API to add types or
//! signatures later.
//!
//! `build` validates the declarations against their registration order
//! and precomputes one bitset mask per signature, so every later lookup
//! is a plain index.

use std::any::TypeId;

use super::bitset::Bitset;
use super::component::{Component, ComponentId};
use super::error::RegistryError;
use super::signature::{ids_distinct, ComponentTuple, Signature, SignatureEntry, SignatureId};
use super::storage::{Column, TypedColumn};

struct ComponentRecord {
    id: ComponentId,
    name: &'static str,
    column: Box<dyn Column>,
}

struct SignatureRecord {
    id: SignatureId,
    name: &'static str,
    type_id: TypeId,
    component_ids: &'static [ComponentId],
}

/// Collects component and signature declarations, in order.
#[must_use]
pub struct RegistryBuilder {
    components: Vec<ComponentRecord>,
    signatures: Vec<SignatureRecord>,
}

impl RegistryBuilder {
    fn new() -> Self {
        Self {
            components: Vec::new(),
            signatures: Vec::new(),
        }
    }

    /// Registers component type `C`. Registration order assigns the
    /// dense id, which must equal `C::ID`.
    pub fn component<C: Component>(mut self) -> Self {
        self.components.push(ComponentRecord {
            id: C::ID,
            name: std::any::type_name::<C>(),
            column: Box::new(TypedColumn::<C>::new()),
        });
        self
    }

    /// Registers signature type `S`. Registration order assigns the
    /// dense id, which must equal `S::ID`.
    pub fn signature<S: Signature>(mut self) -> Self {
        self.signatures.push(SignatureRecord {
            id: S::ID,
            name: std::any::type_name::<S>(),
            type_id: TypeId::of::<S>(),
            component_ids: <S::Components as ComponentTuple>::IDS,
        });
        self
    }

    /// Validates the declarations and produces the immutable registry.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when a component or signature id does
    /// not match its registration position, when a signature references
    /// an unregistered component id, or when a signature lists the same
    /// component twice.
    pub fn build(self) -> Result<Registry, RegistryError> {
        for (position, record) in self.components.iter().enumerate() {
            if record.id != position {
                return Err(RegistryError::ComponentIdMismatch {
                    name: record.name,
                    declared: record.id,
                    position,
                });
            }
        }
        let component_count = self.components.len();

        for (position, record) in self.signatures.iter().enumerate() {
            if record.id != position {
                return Err(RegistryError::SignatureIdMismatch {
                    name: record.name,
                    declared: record.id,
                    position,
                });
            }
            for &component_id in record.component_ids {
                if component_id >= component_count {
                    return Err(RegistryError::UnknownSignatureComponent {
                        signature: record.name,
                        component_id,
                        component_count,
                    });
                }
            }
            if !ids_distinct(record.component_ids) {
                let component_id = first_duplicate(record.component_ids);
                return Err(RegistryError::DuplicateSignatureComponent {
                    signature: record.name,
                    component_id,
                });
            }
        }

        let signatures = self
            .signatures
            .iter()
            .map(|record| {
                let mut mask = Bitset::empty(component_count);
                for &component_id in record.component_ids {
                    mask.set(component_id);
                }
                SignatureEntry {
                    type_id: record.type_id,
                    mask,
                }
            })
            .collect();

        Ok(Registry {
            component_count,
            columns: self
                .components
                .into_iter()
                .map(|record| record.column)
                .collect(),
            signatures,
        })
    }
}

fn first_duplicate(ids: &[ComponentId]) -> ComponentId {
    for (i, &id) in ids.iter().enumerate() {
        if ids[..i].contains(&id) {
            return id;
        }
    }
    unreachable!("first_duplicate called on a distinct id list")
}

/// The validated, immutable component/signature configuration.
///
/// Owns the (still empty) typed columns and the precomputed signature
/// masks; [`super::Manager::new`] consumes it.
pub struct Registry {
    pub(crate) component_count: usize,
    pub(crate) columns: Vec<Box<dyn Column>>,
    pub(crate) signatures: Vec<SignatureEntry>,
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("component_count", &self.component_count)
            .field("signature_count", &self.signatures.len())
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Starts a new registration.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Number of registered component types.
    #[inline]
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Number of registered signatures.
    #[inline]
    #[must_use]
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{ComponentId, SignatureId};
    use bytemuck::{Pod, Zeroable};

    #[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
    #[repr(C)]
    struct Health {
        hp: f32,
    }
    impl Component for Health {
        const ID: ComponentId = 0;
    }

    #[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
    #[repr(C)]
    struct Circle {
        radius: f32,
    }
    impl Component for Circle {
        const ID: ComponentId = 1;
    }

    struct Life;
    impl Signature for Life {
        const ID: SignatureId = 0;
        type Components = (Health,);
    }

    #[test]
    fn test_valid_registration() {
        let registry = Registry::builder()
            .component::<Health>()
            .component::<Circle>()
            .signature::<Life>()
            .build()
            .expect("valid registration");

        assert_eq!(registry.component_count(), 2);
        assert_eq!(registry.signature_count(), 1);
        assert!(registry.signatures[0].mask.test(Health::ID));
        assert!(!registry.signatures[0].mask.test(Circle::ID));
        assert_eq!(registry.signatures[0].type_id, TypeId::of::<Life>());
    }

    #[test]
    fn test_component_order_mismatch_rejected() {
        // Circle declares id 1 but is registered first
        let err = Registry::builder()
            .component::<Circle>()
            .component::<Health>()
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::ComponentIdMismatch {
                declared: 1,
                position: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_signature_order_mismatch_rejected() {
        struct Stray;
        impl Signature for Stray {
            const ID: SignatureId = 3;
            type Components = (Health,);
        }

        let err = Registry::builder()
            .component::<Health>()
            .signature::<Stray>()
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::SignatureIdMismatch {
                declared: 3,
                position: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_signature_component_rejected() {
        struct Shape;
        impl Signature for Shape {
            const ID: SignatureId = 0;
            type Components = (Circle,);
        }

        // Circle (id 1) is never registered; only Health (id 0) is
        let err = Registry::builder()
            .component::<Health>()
            .signature::<Shape>()
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::UnknownSignatureComponent {
                component_id: 1,
                component_count: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_signature_component_rejected() {
        struct Doubled;
        impl Signature for Doubled {
            const ID: SignatureId = 0;
            type Components = (Health, Health);
        }

        let err = Registry::builder()
            .component::<Health>()
            .component::<Circle>()
            .signature::<Doubled>()
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::DuplicateSignatureComponent {
                component_id: 0,
                ..
            }
        ));
    }
}
