// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot storage shared by the node and handle stores.

use alloc::vec::Vec;

#[derive(Clone, Debug)]
struct Slot<V> {
    generation: u32,
    value: Option<V>,
}

/// Slot vector with a free list. Freed slots are reused with a bumped generation
/// so that stale `(index, generation)` pairs never resolve to a new value.
#[derive(Clone, Debug)]
pub(crate) struct Arena<V> {
    slots: Vec<Slot<V>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<V> Default for Arena<V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }
}

impl<V> Arena<V> {
    /// Store a value, returning its slot index and generation.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Identifiers use 32-bit slot indices by design."
    )]
    pub(crate) fn insert(&mut self, value: V) -> (u32, u32) {
        self.len += 1;
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.saturating_add(1);
            slot.value = Some(value);
            (idx as u32, slot.generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Slot {
                generation,
                value: Some(value),
            });
            ((self.slots.len() - 1) as u32, generation)
        }
    }

    /// Free the slot and hand back its value if `(idx, generation)` is live.
    pub(crate) fn remove(&mut self, idx: u32, generation: u32) -> Option<V> {
        let slot = self.slots.get_mut(idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.value.take()?;
        self.free_list.push(idx as usize);
        self.len -= 1;
        Some(value)
    }

    pub(crate) fn get(&self, idx: u32, generation: u32) -> Option<&V> {
        let slot = self.slots.get(idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.value.as_ref()
    }

    pub(crate) fn get_mut(&mut self, idx: u32, generation: u32) -> Option<&mut V> {
        let slot = self.slots.get_mut(idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Number of live values.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Live values with their `(index, generation)`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Identifiers use 32-bit slot indices by design."
    )]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u32, u32, &V)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|value| (i as u32, slot.generation, value))
        })
    }

    /// Mutable access to every live value.
    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.value.as_mut())
    }
}
