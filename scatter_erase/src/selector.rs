// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-phase erase of one asset's instances: prepare, then erase; restore to undo.

use core::fmt;

use crate::arrays::InstanceArrays;
use crate::criterion::EraseCriterion;
use crate::store::{InstanceStore, PrimInstances};

/// What one erase removed, enough to put it back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErasedData {
    /// Removed point instances, in their original relative order.
    pub instances: Option<InstanceArrays>,
    /// Paths of removed prim instances. Deleting and recreating them is left to the host.
    pub prims: Option<Vec<String>>,
}

impl ErasedData {
    /// Number of removed point instances.
    pub fn instance_count(&self) -> usize {
        self.instances.as_ref().map_or(0, InstanceArrays::len)
    }

    /// Whether nothing was removed.
    pub fn is_empty(&self) -> bool {
        self.instance_count() == 0 && self.prims.as_ref().is_none_or(Vec::is_empty)
    }
}

/// Erase state for one asset.
///
/// [`prepare_erase`](Self::prepare_erase) computes which instances match; the next
/// [`erase`](Self::erase) removes exactly those and returns them. The selection is
/// consumed by `erase`, so calling it again without a new prepare removes nothing.
/// [`restore`](Self::restore) selects the entries it puts back, so erasing after a
/// restore removes the same instances again.
#[derive(Clone, Default)]
pub struct EraseSelector {
    remove: Option<Vec<bool>>,
    pending: usize,
    prims: Option<Vec<String>>,
}

impl fmt::Debug for EraseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EraseSelector")
            .field("pending", &self.pending)
            .field("prims", &self.prims.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

impl EraseSelector {
    /// Create a selector with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of point instances selected by the last successful prepare.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Whether a prepare selected anything that has not been erased yet.
    pub fn has_selection(&self) -> bool {
        self.remove.is_some() || self.prims.is_some()
    }

    /// Select the point instances of `store` that `criterion` matches.
    ///
    /// Positions are tested in world space. Returns `false`, with no point selection
    /// pending, when the store is empty or nothing matches.
    ///
    /// # Panics
    ///
    /// Panics if the store's sequences have different lengths.
    pub fn prepare_erase(
        &mut self,
        store: &impl InstanceStore,
        criterion: &EraseCriterion,
    ) -> bool {
        self.remove = None;
        self.pending = 0;
        let arrays = InstanceArrays::load(store);
        if arrays.is_empty() {
            return false;
        }
        let to_world = store.local_to_world();
        let remove: Vec<bool> = arrays
            .positions()
            .iter()
            .map(|p| criterion.matches(to_world.transform_point3(p.as_dvec3())))
            .collect();
        let count = remove.iter().filter(|r| **r).count();
        if count == 0 {
            return false;
        }
        self.remove = Some(remove);
        self.pending = count;
        true
    }

    /// Select prim instances that `criterion` matches.
    ///
    /// [`EraseCriterion::All`] selects the root itself.
    pub fn prepare_prims(
        &mut self,
        prims: &(impl PrimInstances + ?Sized),
        criterion: &EraseCriterion,
    ) -> bool {
        let selected = match criterion {
            EraseCriterion::All => vec![prims.root_path().to_string()],
            _ => prims
                .prim_positions()
                .into_iter()
                .filter(|(_, p)| criterion.matches_prim(*p))
                .map(|(path, _)| path)
                .collect(),
        };
        if selected.is_empty() {
            self.prims = None;
            return false;
        }
        self.prims = Some(selected);
        true
    }

    /// Remove the selected point instances from `store` and return them.
    ///
    /// Kept instances stay in their original relative order.
    ///
    /// # Panics
    ///
    /// Panics if the store's sequences have different lengths, or if the store's size
    /// changed since the prepare.
    pub fn erase(&mut self, store: &mut impl InstanceStore) -> ErasedData {
        let prims = self.erase_prims();
        self.pending = 0;
        let Some(remove) = self.remove.take() else {
            return ErasedData {
                instances: None,
                prims,
            };
        };
        let arrays = InstanceArrays::load(store);
        let (kept, removed) = arrays.partition(&remove);
        kept.store(store);
        log::info!("{} points erased!", removed.len());
        ErasedData {
            instances: Some(removed),
            prims,
        }
    }

    /// Consume the prim selection without touching any point instances.
    pub fn erase_prims(&mut self) -> Option<Vec<String>> {
        self.prims.take()
    }

    /// Append previously erased point instances back onto `store`.
    ///
    /// Restored instances come after the current ones, so the store's order may differ
    /// from before the erase; its contents as a multiset do not. The restored entries,
    /// and the prims in `erased`, become the new selection.
    ///
    /// # Panics
    ///
    /// Panics if the store's sequences have different lengths.
    pub fn restore(&mut self, store: &mut impl InstanceStore, erased: &ErasedData) {
        self.restore_prims(erased);
        self.remove = None;
        self.pending = 0;
        let Some(removed) = erased.instances.as_ref().filter(|r| !r.is_empty()) else {
            return;
        };
        let mut arrays = InstanceArrays::load(store);
        let kept = arrays.len();
        arrays.append(removed.clone());
        arrays.store(store);

        let mut remove = vec![false; kept];
        remove.resize(kept + removed.len(), true);
        self.remove = Some(remove);
        self.pending = removed.len();
        log::info!("{} points restored!", removed.len());
    }

    /// Select the prims of `erased` again, for hosts that recreate them on their own.
    pub fn restore_prims(&mut self, erased: &ErasedData) {
        self.prims = erased.prims.clone();
    }
}
