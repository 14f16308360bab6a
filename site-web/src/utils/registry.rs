//! Handle table for registered elements

use lib_core::ElementId;

/// Slots addressed by [`ElementId`]. Removed slots are reused so short-lived
/// elements (ripples) do not grow the table.
#[derive(Debug)]
pub struct Registry<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn get(&self, handle: ElementId) -> Option<&T> {
        self.slots.get(handle.0 as usize)?.as_ref()
    }

    /// Handle of the first live entry matching `pred`.
    pub fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<ElementId> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(&mut pred))
            .map(|index| ElementId(index as u32))
    }

    /// Store `item` without checking for duplicates.
    pub fn insert(&mut self, item: T) -> ElementId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(item);
                ElementId(index as u32)
            }
            None => {
                self.slots.push(Some(item));
                ElementId((self.slots.len() - 1) as u32)
            }
        }
    }

    pub fn remove(&mut self, handle: ElementId) -> Option<T> {
        let index = handle.0 as usize;
        let item = self.slots.get_mut(index)?.take()?;
        self.free.push(index);
        Some(item)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Allocated slots, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
