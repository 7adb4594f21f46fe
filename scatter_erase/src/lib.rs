// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter Erase: remove scattered instances and put them back.
//!
//! A point instancer keeps its instances in four parallel sequences: positions,
//! orientations, scales and prototype indices. Erasing is two-phase:
//!
//! 1. [`EraseSelector::prepare_erase`] tests each instance's world position against an
//!    [`EraseCriterion`] (everything, a brush capsule, or a box).
//! 2. [`EraseSelector::erase`] removes the selected entries from all four sequences and
//!    returns them as [`ErasedData`]; the survivors keep their relative order.
//!
//! [`EraseSelector::restore`] appends erased entries back, so an erase followed by a
//! restore leaves the same multiset of instances. [`EraseTransaction`] drives this across
//! every asset of a brush stroke and keeps what it needs for undo.
//!
//! ## Minimal usage
//!
//! ```
//! use glam::{DVec3, Quat, Vec3};
//! use scatter_erase::{EraseCriterion, EraseSelector, PointInstancer};
//!
//! let mut store = PointInstancer::new();
//! store.positions = vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)];
//! store.orientations = vec![Quat::IDENTITY; 2];
//! store.scales = vec![Vec3::ONE; 2];
//! store.proto_indices = vec![0, 1];
//!
//! let mut selector = EraseSelector::new();
//! let brush = EraseCriterion::brush(DVec3::ZERO, DVec3::Y, 2.0, 1.0);
//! assert!(selector.prepare_erase(&store, &brush));
//! let erased = selector.erase(&mut store);
//! assert_eq!(store.proto_indices, vec![1]);
//!
//! selector.restore(&mut store, &erased);
//! assert_eq!(store.len(), 2);
//! ```

pub mod arrays;
pub mod criterion;
pub mod selector;
pub mod store;
pub mod transaction;

pub use arrays::{ArrayLengthMismatch, InstanceArrays};
pub use criterion::{ERASE_SEGMENT_EPSILON, EraseCriterion, segment_distance};
pub use selector::{EraseSelector, ErasedData};
pub use store::{InstanceScene, InstanceStore, PointInstancer, PrimGroup, PrimInstances};
pub use transaction::EraseTransaction;
