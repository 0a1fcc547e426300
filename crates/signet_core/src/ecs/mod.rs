//! # Entity Component System
//!
//! The runtime core: entity metadata, dense component columns, and
//! precomputed signature masks.
//!
//! ## Design Philosophy
//!
//! - Component and signature sets are fixed at [`Registry`] build time
//! - Entities are plain indices; membership is a bitset of width C
//! - Kills are lazy; [`Manager::refresh`] compacts alive entities into
//!   a contiguous prefix so queries scan `size`, not `capacity`

mod bitset;
mod component;
mod entity;
mod error;
mod manager;
mod registry;
mod signature;
mod storage;

pub use bitset::Bitset;
pub use component::{Component, ComponentId};
pub use entity::{DataIndex, EntityIndex, EntityTable};
pub use error::RegistryError;
pub use manager::{Manager, StateReport};
pub use registry::{Registry, RegistryBuilder};
pub use signature::{ComponentTuple, Signature, SignatureId, SignatureRegistry};
pub use storage::ComponentStore;
