// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Undoable erase across every asset of a brush.

use crate::criterion::EraseCriterion;
use crate::selector::{EraseSelector, ErasedData};
use crate::store::InstanceScene;

#[derive(Clone, Debug)]
struct Entry {
    url: String,
    selector: EraseSelector,
    erased: Option<ErasedData>,
}

/// One erase stroke over several assets.
///
/// Assets with nothing to erase are dropped at prepare time, so [`execute`](Self::execute)
/// and [`undo`](Self::undo) only touch the instancers that actually change.
///
/// ```
/// use std::collections::HashMap;
/// use glam::{Quat, Vec3};
/// use scatter_erase::{EraseCriterion, EraseTransaction, PointInstancer};
///
/// let mut rocks = PointInstancer::new();
/// rocks.positions = vec![Vec3::ZERO, Vec3::X];
/// rocks.orientations = vec![Quat::IDENTITY; 2];
/// rocks.scales = vec![Vec3::ONE; 2];
/// rocks.proto_indices = vec![0, 0];
/// let mut scene = HashMap::from([("rock.usd".to_string(), rocks)]);
///
/// let mut stroke = EraseTransaction::new();
/// assert!(stroke.prepare(&scene, ["rock.usd", "tree.usd"], &EraseCriterion::All));
/// stroke.execute(&mut scene);
/// assert!(scene["rock.usd"].is_empty());
/// stroke.undo(&mut scene);
/// assert_eq!(scene["rock.usd"].len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EraseTransaction {
    entries: Vec<Entry>,
}

impl EraseTransaction {
    /// Create an empty transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no asset has anything to erase.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// URLs of the assets this transaction touches.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.url.as_str())
    }

    /// Select matching instances of each asset in `urls`.
    ///
    /// Returns whether anything was selected.
    pub fn prepare<'a, S: InstanceScene>(
        &mut self,
        scene: &S,
        urls: impl IntoIterator<Item = &'a str>,
        criterion: &EraseCriterion,
    ) -> bool {
        self.entries.clear();
        for url in urls {
            let mut selector = EraseSelector::new();
            let points = scene
                .instancer(url)
                .is_some_and(|store| selector.prepare_erase(store, criterion));
            let prims = scene
                .prim_instances(url)
                .is_some_and(|prims| selector.prepare_prims(prims, criterion));
            if points || prims {
                self.entries.push(Entry {
                    url: url.to_string(),
                    selector,
                    erased: None,
                });
            }
        }
        !self.entries.is_empty()
    }

    /// Erase the prepared selection from `scene`.
    ///
    /// Assets already erased are left alone until [`undo`](Self::undo). After an undo
    /// this erases the restored instances again.
    pub fn execute<S: InstanceScene>(&mut self, scene: &mut S) {
        for entry in &mut self.entries {
            if entry.erased.is_some() {
                continue;
            }
            let erased = match scene.instancer_mut(&entry.url) {
                Some(store) => entry.selector.erase(store),
                None => ErasedData {
                    instances: None,
                    prims: entry.selector.erase_prims(),
                },
            };
            entry.erased = Some(erased);
        }
    }

    /// Put back everything [`execute`](Self::execute) removed.
    pub fn undo<S: InstanceScene>(&mut self, scene: &mut S) {
        for entry in &mut self.entries {
            let Some(erased) = entry.erased.take() else {
                continue;
            };
            match scene.instancer_mut(&entry.url) {
                Some(store) => entry.selector.restore(store, &erased),
                None => entry.selector.restore_prims(&erased),
            }
        }
    }

    /// What was erased from each asset by the last [`execute`](Self::execute).
    pub fn erased(&self) -> impl Iterator<Item = (&str, &ErasedData)> {
        self.entries
            .iter()
            .filter_map(|e| e.erased.as_ref().map(|d| (e.url.as_str(), d)))
    }
}
