//! # Component System
//!
//! Components are pure data containers with no behavior. Each component
//! type carries a dense id that doubles as its bit position in entity
//! bitsets and its column index in [`super::ComponentStore`].

use bytemuck::{Pod, Zeroable};

/// Dense component type id in `[0, C)`.
pub type ComponentId = usize;

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Copy`: no destructor - overwriting a slot never runs cleanup.
///   This is deliberate: removal only clears a membership bit and the
///   payload stays in place until the next overwrite, so component
///   types must not own resources.
/// - `Pod` / `Zeroable`: plain old data with a fixed layout
/// - `Default`: columns are filled with the default value on growth
///
/// The `ID` must equal the component's position in the registration
/// order passed to [`super::Registry`]; the registry rejects any
/// mismatch at build time.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
/// #[repr(C)]
/// struct Health {
///     hp: f32,
/// }
///
/// impl Component for Health {
///     const ID: ComponentId = 0;
/// }
/// ```
pub trait Component: Copy + Pod + Zeroable + Default + Send + Sync + 'static {
    /// Dense id for this component type, also its bitset bit position.
    const ID: ComponentId;
}
