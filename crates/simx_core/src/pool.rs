//! Generational pool used as the store arena
//!
//! Stores and their sub-components live in flat tables keyed by generational
//! handles, so a handle to a destroyed slot is detected rather than reused
//! silently. Dispatching to a stale handle is a safe no-op.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A type-safe generational handle into a [`Pool<T>`]
pub struct PoolId<T> {
    /// Lower 32 bits: index, upper 32 bits: generation
    bits: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PoolId<T> {
    /// Create a handle from index and generation
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self {
            bits: (generation as u64) << 32 | index as u64,
            _marker: PhantomData,
        }
    }

    /// Create the null handle
    #[inline]
    pub const fn null() -> Self {
        Self {
            bits: u64::MAX,
            _marker: PhantomData,
        }
    }

    /// Check if this handle is null
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.bits == u64::MAX
    }

    /// Get the index portion
    #[inline]
    pub const fn index(&self) -> u32 {
        self.bits as u32
    }

    /// Get the generation portion
    #[inline]
    pub const fn generation(&self) -> u32 {
        (self.bits >> 32) as u32
    }
}

// Manual trait implementations to avoid T bounds
impl<T> Clone for PoolId<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PoolId<T> {}

impl<T> PartialEq for PoolId<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T> Eq for PoolId<T> {}

impl<T> Hash for PoolId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<T> Default for PoolId<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> fmt::Debug for PoolId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "PoolId(null)")
        } else {
            write!(f, "PoolId({}v{})", self.index(), self.generation())
        }
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Flat generational storage for session objects
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Pool<T> {
    /// Create an empty pool
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Insert a value, returning its handle
    pub fn insert(&mut self, value: T) -> PoolId<T> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            PoolId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            PoolId::new(index, 0)
        }
    }

    /// Remove a value; stale or null handles return `None`
    pub fn remove(&mut self, id: PoolId<T>) -> Option<T> {
        let slot = self.slot_mut(id)?;
        let value = slot.value.take()?;
        // Bump the generation so outstanding handles go stale
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        Some(value)
    }

    /// Get a reference; stale or null handles return `None`
    pub fn get(&self, id: PoolId<T>) -> Option<&T> {
        let slot = self.slots.get(id.index() as usize)?;
        if id.is_null() || slot.generation != id.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    /// Get a mutable reference; stale or null handles return `None`
    pub fn get_mut(&mut self, id: PoolId<T>) -> Option<&mut T> {
        let slot = self.slot_mut(id)?;
        slot.value.as_mut()
    }

    /// Check if a handle refers to a live value
    pub fn contains(&self, id: PoolId<T>) -> bool {
        self.get(id).is_some()
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Check if no values are live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot the handles of all live values.
    ///
    /// Collected up front so callers can mutate the pool while walking it.
    pub fn ids(&self) -> Vec<PoolId<T>> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.value.is_some())
            .map(|(index, slot)| PoolId::new(index as u32, slot.generation))
            .collect()
    }

    /// Iterate over live handles and values
    pub fn iter(&self) -> impl Iterator<Item = (PoolId<T>, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (PoolId::new(index as u32, slot.generation), value))
        })
    }

    fn slot_mut(&mut self, id: PoolId<T>) -> Option<&mut Slot<T>> {
        if id.is_null() {
            return None;
        }
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        Some(slot)
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut pool: Pool<String> = Pool::new();
        let a = pool.insert("alpha".to_string());
        let b = pool.insert("beta".to_string());

        assert_eq!(pool.get(a).map(String::as_str), Some("alpha"));
        assert_eq!(pool.get(b).map(String::as_str), Some("beta"));
        assert_eq!(pool.len(), 2);

        assert_eq!(pool.remove(a), Some("alpha".to_string()));
        assert_eq!(pool.get(a), None);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn stale_handle_is_detected() {
        let mut pool: Pool<u32> = Pool::new();
        let a = pool.insert(1);
        pool.remove(a);

        // Slot gets reused, but the old handle stays dead
        let b = pool.insert(2);
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert_eq!(pool.get(a), None);
        assert_eq!(pool.get(b), Some(&2));
        assert_eq!(pool.remove(a), None);
    }

    #[test]
    fn null_handle_is_never_live() {
        let mut pool: Pool<u32> = Pool::new();
        pool.insert(1);
        assert!(!pool.contains(PoolId::null()));
        assert_eq!(pool.get(PoolId::null()), None);
    }

    #[test]
    fn ids_snapshot_allows_mutation() {
        let mut pool: Pool<u32> = Pool::new();
        let a = pool.insert(1);
        pool.insert(2);

        for id in pool.ids() {
            if id == a {
                pool.remove(id);
            }
        }
        assert_eq!(pool.len(), 1);
    }
}
