//! # SIGNET Core Engine
//!
//! Dense Entity Component System (ECS) runtime designed for:
//! - Structure-of-arrays component storage, one contiguous column per type
//! - Bitset signature matching, one AND + compare per entity per query
//! - In-place compaction so iteration touches alive entities only
//!
//! ## Architecture Rules
//!
//! 1. **No allocations in steady state** - memory grows on demand, then is reused
//! 2. **Data-oriented design** - components are stored in contiguous arrays
//! 3. **Two-phase visibility** - creations and kills commit at [`Manager::refresh`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use signet_core::{Manager, Registry};
//!
//! let registry = Registry::builder()
//!     .component::<Health>()
//!     .signature::<Life>()
//!     .build()?;
//! let mut manager = Manager::new(registry);
//!
//! let e = manager.create_entity();
//! manager.add_component(e, Health { hp: 80.0 });
//! manager.refresh();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ecs;

pub use ecs::{
    Bitset, Component, ComponentId, ComponentStore, ComponentTuple, DataIndex, EntityIndex,
    EntityTable, Manager, Registry, RegistryBuilder, RegistryError, Signature, SignatureId,
    SignatureRegistry, StateReport,
};
