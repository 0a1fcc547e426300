//! # Registry Error Types
//!
//! All failures here are registration-time rejections: the component and
//! signature declarations handed to the registry contradict themselves.
//! They surface from [`super::RegistryBuilder::build`] before a manager
//! ever exists; nothing in the runtime path returns an error.

use thiserror::Error;

use super::component::ComponentId;
use super::signature::SignatureId;

/// Errors detected while validating a component/signature registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A component's declared `ID` does not match its registration position.
    #[error("component {name} declares id {declared}, but was registered at position {position}")]
    ComponentIdMismatch {
        /// Type name of the offending component.
        name: &'static str,
        /// The id from its `Component` impl.
        declared: ComponentId,
        /// Its zero-based position in the registration order.
        position: usize,
    },

    /// A signature's declared `ID` does not match its registration position.
    #[error("signature {name} declares id {declared}, but was registered at position {position}")]
    SignatureIdMismatch {
        /// Type name of the offending signature.
        name: &'static str,
        /// The id from its `Signature` impl.
        declared: SignatureId,
        /// Its zero-based position in the registration order.
        position: usize,
    },

    /// A signature references a component id outside the registered set.
    #[error("signature {signature} references component id {component_id}, but only {component_count} components are registered")]
    UnknownSignatureComponent {
        /// Type name of the offending signature.
        signature: &'static str,
        /// The out-of-range component id.
        component_id: ComponentId,
        /// Number of registered components.
        component_count: usize,
    },

    /// A signature lists the same component type more than once.
    #[error("signature {signature} lists component id {component_id} more than once")]
    DuplicateSignatureComponent {
        /// Type name of the offending signature.
        signature: &'static str,
        /// The repeated component id.
        component_id: ComponentId,
    },
}
