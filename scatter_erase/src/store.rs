// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side instance storage.

use std::collections::HashMap;

use glam::{DMat4, DVec3, Quat, Vec3};

/// A point instancer: four parallel per-instance sequences plus a transform.
///
/// Sequences are read and written whole. Writes from this crate always keep the four
/// lengths equal.
pub trait InstanceStore {
    /// Local positions.
    fn positions(&self) -> Vec<Vec3>;
    /// Orientations.
    fn orientations(&self) -> Vec<Quat>;
    /// Per-axis scales.
    fn scales(&self) -> Vec<Vec3>;
    /// Prototype index of each instance.
    fn proto_indices(&self) -> Vec<i32>;

    /// Replace the positions.
    fn set_positions(&mut self, positions: Vec<Vec3>);
    /// Replace the orientations.
    fn set_orientations(&mut self, orientations: Vec<Quat>);
    /// Replace the scales.
    fn set_scales(&mut self, scales: Vec<Vec3>);
    /// Replace the prototype indices.
    fn set_proto_indices(&mut self, proto_indices: Vec<i32>);

    /// Transform from instancer-local space to world space.
    fn local_to_world(&self) -> DMat4 {
        DMat4::IDENTITY
    }
}

/// In-memory [`InstanceStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointInstancer {
    /// Local positions.
    pub positions: Vec<Vec3>,
    /// Orientations.
    pub orientations: Vec<Quat>,
    /// Per-axis scales.
    pub scales: Vec<Vec3>,
    /// Prototype indices.
    pub proto_indices: Vec<i32>,
    /// Local-to-world transform.
    pub transform: DMat4,
}

impl PointInstancer {
    /// Create an empty instancer with an identity transform.
    pub fn new() -> Self {
        Self {
            transform: DMat4::IDENTITY,
            ..Default::default()
        }
    }

    /// Set the local-to-world transform.
    pub fn with_transform(mut self, transform: DMat4) -> Self {
        self.transform = transform;
        self
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the instancer holds no instances.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl InstanceStore for PointInstancer {
    fn positions(&self) -> Vec<Vec3> {
        self.positions.clone()
    }

    fn orientations(&self) -> Vec<Quat> {
        self.orientations.clone()
    }

    fn scales(&self) -> Vec<Vec3> {
        self.scales.clone()
    }

    fn proto_indices(&self) -> Vec<i32> {
        self.proto_indices.clone()
    }

    fn set_positions(&mut self, positions: Vec<Vec3>) {
        self.positions = positions;
    }

    fn set_orientations(&mut self, orientations: Vec<Quat>) {
        self.orientations = orientations;
    }

    fn set_scales(&mut self, scales: Vec<Vec3>) {
        self.scales = scales;
    }

    fn set_proto_indices(&mut self, proto_indices: Vec<i32>) {
        self.proto_indices = proto_indices;
    }

    fn local_to_world(&self) -> DMat4 {
        self.transform
    }
}

/// Instances kept as individual prims under a common root.
pub trait PrimInstances {
    /// Path of the root that holds every instance prim.
    fn root_path(&self) -> &str;
    /// Path and world position of each instance prim.
    fn prim_positions(&self) -> Vec<(String, DVec3)>;
}

/// In-memory [`PrimInstances`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrimGroup {
    /// Root path.
    pub root: String,
    /// Child prims with their world positions.
    pub prims: Vec<(String, DVec3)>,
}

impl PrimInstances for PrimGroup {
    fn root_path(&self) -> &str {
        &self.root
    }

    fn prim_positions(&self) -> Vec<(String, DVec3)> {
        self.prims.clone()
    }
}

/// The instances of every asset a brush paints, keyed by asset URL.
pub trait InstanceScene {
    /// Instancer type.
    type Store: InstanceStore;

    /// The point instancer for `url`, if the asset has one.
    fn instancer(&self, url: &str) -> Option<&Self::Store>;
    /// Mutable access to the point instancer for `url`.
    fn instancer_mut(&mut self, url: &str) -> Option<&mut Self::Store>;
    /// Prim-based instances of `url`, if any.
    fn prim_instances(&self, _url: &str) -> Option<&dyn PrimInstances> {
        None
    }
}

impl<S: InstanceStore> InstanceScene for HashMap<String, S> {
    type Store = S;

    fn instancer(&self, url: &str) -> Option<&S> {
        self.get(url)
    }

    fn instancer_mut(&mut self, url: &str) -> Option<&mut S> {
        self.get_mut(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instancer_roundtrips_arrays() {
        let mut store = PointInstancer::new();
        assert_eq!(store.local_to_world(), DMat4::IDENTITY);
        store.set_positions(vec![Vec3::X]);
        store.set_orientations(vec![Quat::IDENTITY]);
        store.set_scales(vec![Vec3::ONE]);
        store.set_proto_indices(vec![2]);
        assert_eq!(store.len(), 1);
        assert_eq!(InstanceStore::proto_indices(&store), vec![2]);
    }

    #[test]
    fn hash_map_scene() {
        let mut scene = HashMap::new();
        scene.insert("a.usd".to_string(), PointInstancer::new());
        assert!(scene.instancer("a.usd").is_some());
        assert!(scene.instancer_mut("b.usd").is_none());
        assert!(scene.prim_instances("a.usd").is_none());
    }
}
