//! Cell registry: per-pass cell declarations with cross-pass reuse.
//!
//! The registry hands every declared child a slot. Slots are keyed either by
//! a caller-supplied name or by their declaration index. A slot whose
//! declaration is identical to the previous pass keeps its attached resource;
//! any change replaces the slot and drops the resource. Sealing discards
//! every slot that was not declared again, which is how a child that stopped
//! being rendered disappears from the grid.
//!
//! # Pass lifecycle
//!
//! ```text
//! Idle ──declare──► Declaring ──seal──► Sealed ──finish_pass──► Idle
//!   └────────────────────seal (empty pass)─────┘
//! ```

use std::mem;

use indexmap::IndexMap;
use log::{debug, trace};

use trellis_core::{
    bounds::GridBounds,
    cell::{CellDeclaration, CellKey},
    identifier::Id,
};

use crate::error::TrellisError;

/// Where the registry is within the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No pass in progress; the previous pass's slots are kept for reuse.
    #[default]
    Idle,
    /// Declarations are being collected.
    Declaring,
    /// The slot list is final for this pass.
    Sealed,
}

#[derive(Debug, Clone)]
struct Slot<R> {
    declaration: CellDeclaration,
    resource: Option<R>,
}

impl<R> Slot<R> {
    fn new(declaration: CellDeclaration) -> Self {
        Self {
            declaration,
            resource: None,
        }
    }
}

/// Ordered collection of cell declarations for one container.
///
/// `R` is an opaque per-slot resource that survives as long as the slot's
/// declaration is unchanged between passes.
///
/// # Examples
///
/// ```
/// use trellis::registry::CellRegistry;
///
/// let mut registry: CellRegistry<&str> = CellRegistry::new();
///
/// registry.declare_cell(0, 0, 2, 1)?;
/// registry.declare_cell(0, 1, 1, 1)?;
/// registry.seal();
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.bounds().columns(), 2);
/// registry.finish_pass();
///
/// // A later pass that declares fewer cells drops the trailing slots.
/// registry.declare_cell(0, 0, 2, 1)?;
/// registry.seal();
/// assert_eq!(registry.len(), 1);
/// # Ok::<(), trellis::TrellisError>(())
/// ```
#[derive(Debug)]
pub struct CellRegistry<R = ()> {
    slots: IndexMap<CellKey, Slot<R>>,
    pending: IndexMap<CellKey, CellDeclaration>,
    phase: Phase,
}

impl<R> Default for CellRegistry<R> {
    fn default() -> Self {
        Self {
            slots: IndexMap::new(),
            pending: IndexMap::new(),
            phase: Phase::Idle,
        }
    }
}

impl<R> CellRegistry<R> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current pass phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true once [`seal`](Self::seal) has run for the current pass.
    pub fn is_sealed(&self) -> bool {
        self.phase == Phase::Sealed
    }

    /// Number of declarations made so far in the current pass.
    pub fn cursor(&self) -> usize {
        match self.phase {
            Phase::Declaring => self.pending.len(),
            Phase::Idle | Phase::Sealed => 0,
        }
    }

    /// Starts a new pass.
    ///
    /// A pass that was still collecting declarations is abandoned. Sealed
    /// slots are only replaced by [`seal`](Self::seal), so an abandoned pass
    /// leaves them and their resources as they were.
    pub fn begin_pass(&mut self) {
        self.pending.clear();
        self.phase = Phase::Declaring;
    }

    /// Declares the next child's cell, keyed by declaration index.
    ///
    /// `width` and `height` are clamped to at least one. Returns the slot
    /// index, which is also the index of the child this cell belongs to.
    ///
    /// Positional slots are matched across passes purely by index. When a
    /// child before this one is conditionally omitted, every later positional
    /// slot shifts by one and compares against its neighbour's previous
    /// declaration. Use [`declare_keyed`](Self::declare_keyed) for children
    /// that come and go.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::DeclaredAfterSeal`] when the registry is sealed.
    pub fn declare_cell(
        &mut self,
        grid_x: i32,
        grid_y: i32,
        width: i32,
        height: i32,
    ) -> Result<usize, TrellisError> {
        self.declare(None, CellDeclaration::new(grid_x, grid_y, width, height))
    }

    /// Declares the next child's cell under a stable, caller-supplied key.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::DeclaredAfterSeal`] when the registry is sealed
    /// and [`TrellisError::DuplicateKey`] when `key` was already declared in
    /// this pass.
    pub fn declare_keyed(
        &mut self,
        key: impl Into<Id>,
        grid_x: i32,
        grid_y: i32,
        width: i32,
        height: i32,
    ) -> Result<usize, TrellisError> {
        self.declare(
            Some(key.into()),
            CellDeclaration::new(grid_x, grid_y, width, height),
        )
    }

    /// Declares `declaration` under `key`, or positionally when `key` is `None`.
    ///
    /// Declaring while [`Phase::Idle`] implicitly begins a new pass.
    ///
    /// # Errors
    ///
    /// See [`declare_keyed`](Self::declare_keyed).
    pub fn declare(
        &mut self,
        key: Option<Id>,
        declaration: CellDeclaration,
    ) -> Result<usize, TrellisError> {
        match self.phase {
            Phase::Sealed => return Err(TrellisError::DeclaredAfterSeal),
            Phase::Idle => self.begin_pass(),
            Phase::Declaring => {}
        }

        let index = self.pending.len();
        let key = key.map_or(CellKey::Positional(index), CellKey::Named);
        if self.pending.contains_key(&key) {
            return Err(TrellisError::DuplicateKey(key));
        }

        self.pending.insert(key, declaration);

        Ok(index)
    }

    /// Finalizes the current pass.
    ///
    /// Each declaration of this pass takes over the previous slot under the
    /// same key when the declarations are identical, keeping its resource.
    /// Every slot not declared in this pass is discarded and the cursor resets.
    /// Sealing without any declaration is an empty pass and clears the
    /// registry. Sealing an already sealed registry does nothing.
    pub fn seal(&mut self) {
        if self.phase == Phase::Sealed {
            return;
        }

        let mut previous = mem::take(&mut self.slots);
        self.slots = self
            .pending
            .drain(..)
            .map(|(key, declaration)| {
                let slot = match previous.swap_remove(&key) {
                    Some(slot) if slot.declaration == declaration => slot,
                    Some(slot) => {
                        trace!(
                            key:% = key,
                            old:% = slot.declaration,
                            new:% = declaration;
                            "Cell declaration changed"
                        );
                        Slot::new(declaration)
                    }
                    None => Slot::new(declaration),
                };
                (key, slot)
            })
            .collect();
        self.phase = Phase::Sealed;

        debug!(cells = self.slots.len(), discarded = previous.len(); "Sealed cell registry");
    }

    /// Returns the registry to [`Phase::Idle`] after a pass completes or aborts.
    ///
    /// Declarations of an unsealed pass are dropped.
    pub fn finish_pass(&mut self) {
        self.pending.clear();
        self.phase = Phase::Idle;
    }

    /// Computes the grid bounds of the sealed slots.
    pub fn bounds(&self) -> GridBounds {
        GridBounds::from_cells(self.slots.values().map(|slot| &slot.declaration))
    }

    /// Number of sealed slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates the sealed slots in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (CellKey, &CellDeclaration)> {
        self.slots.iter().map(|(key, slot)| (*key, &slot.declaration))
    }

    /// Iterates the sealed declarations in declaration order.
    pub fn declarations(&self) -> impl ExactSizeIterator<Item = &CellDeclaration> {
        self.slots.values().map(|slot| &slot.declaration)
    }

    /// Returns the key of the slot at `index`.
    pub fn key_at(&self, index: usize) -> Option<CellKey> {
        self.slots.get_index(index).map(|(key, _)| *key)
    }

    /// Returns the declaration stored under `key`.
    pub fn get(&self, key: &CellKey) -> Option<&CellDeclaration> {
        self.slots.get(key).map(|slot| &slot.declaration)
    }

    /// Returns the declaration index of `key`.
    pub fn index_of(&self, key: &CellKey) -> Option<usize> {
        self.slots.get_index_of(key)
    }

    /// Returns the resource attached to `key`, if the slot still holds one.
    pub fn resource(&self, key: &CellKey) -> Option<&R> {
        self.slots.get(key).and_then(|slot| slot.resource.as_ref())
    }

    /// Attaches `resource` to the slot under `key`.
    ///
    /// Returns the previous resource. When no slot exists for `key` the
    /// resource is handed back unchanged as `Err`.
    pub fn set_resource(&mut self, key: &CellKey, resource: R) -> Result<Option<R>, R> {
        match self.slots.get_mut(key) {
            Some(slot) => Ok(slot.resource.replace(resource)),
            None => Err(resource),
        }
    }

    /// Detaches and returns the resource under `key`.
    pub fn take_resource(&mut self, key: &CellKey) -> Option<R> {
        self.slots.get_mut(key).and_then(|slot| slot.resource.take())
    }
}
