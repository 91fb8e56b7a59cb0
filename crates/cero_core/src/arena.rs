//! Arena storage with chained, geometrically growing blocks.
//!
//! An [`Arena`] hands out slots for values of one type and never frees them individually: the whole arena is dropped (or
//! [`Arena::release`]d) at once. Slots are addressed by dense [`Idx`] handles instead of references, so structures built
//! on top of an arena (the AST in particular) can link nodes freely without borrowing the arena.
//!
//! ## Notes
//! - Blocks are chained oldest-first. When a request does not fit in the current block, a new block of
//!   `max(next_block_len, requested)` slots is started and the next block length grows by half.
//! - Unused capacity at the end of an abandoned block is dead space. Indices stay dense because a new block starts
//!   numbering right after the last slot handed out.
//! - [`ArenaArray`] builds a growable array out of contiguous spans of one arena. Growing allocates a fresh span and
//!   copies; the old span becomes dead space.
//!
//! ## Examples
//! ```rust
//! use cero_core::arena::{Arena, ArenaArray};
//!
//! let mut arena = Arena::with_block_len(8);
//! let mut numbers = ArenaArray::new();
//! for n in 0..10u32 {
//!     numbers.put(n, &mut arena);
//! }
//! assert_eq!(numbers.as_slice(&arena), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Number of slots in the first block of an arena created with [`Arena::new`].
pub const DEFAULT_BLOCK_LEN: usize = 64;

// ============================================================================
// Handles
// ============================================================================

/// Typed handle to a slot of an [`Arena`].
pub struct Idx<T> {
    raw: u32,
    _ty: PhantomData<fn() -> T>,
}

impl<T> Idx<T> {
    /// Build a handle from a raw slot number.
    pub const fn from_raw(raw: u32) -> Self {
        Self { raw, _ty: PhantomData }
    }

    /// Raw slot number of this handle.
    pub const fn into_raw(self) -> u32 {
        self.raw
    }
}

impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Idx<T> {}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Idx<T> {}

impl<T> Hash for Idx<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Idx({})", self.raw)
    }
}

// ============================================================================
// Arena
// ============================================================================

struct Block<T> {
    /// Raw index of the first slot in this block.
    start: u32,
    capacity: usize,
    items: Vec<T>,
}

impl<T> Block<T> {
    fn remaining(&self) -> usize {
        self.capacity - self.items.len()
    }
}

/// Owner of a chain of blocks holding values of type `T`.
pub struct Arena<T> {
    blocks: Vec<Block<T>>,
    initial_block_len: usize,
    next_block_len: usize,
    len: u32,
}

impl<T> Arena<T> {
    /// Create an empty arena whose first block will hold [`DEFAULT_BLOCK_LEN`] slots.
    pub fn new() -> Self {
        Self::with_block_len(DEFAULT_BLOCK_LEN)
    }

    /// Create an empty arena whose first block will hold `block_len` slots.
    ///
    /// No memory is reserved until the first allocation.
    pub fn with_block_len(block_len: usize) -> Self {
        let block_len = block_len.max(1);
        Self {
            blocks: Vec::new(),
            initial_block_len: block_len,
            next_block_len: block_len,
            len: 0,
        }
    }

    /// Number of slots handed out so far, including dead space left behind by [`ArenaArray`] growth.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of blocks currently chained in this arena.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Store `value` in the arena and return its handle.
    pub fn alloc(&mut self, value: T) -> Idx<T> {
        let block = self.reserve(1);
        self.blocks[block].items.push(value);
        Idx::from_raw(self.bump(1))
    }

    /// Look up the value behind `idx`, if it belongs to this arena.
    pub fn get(&self, idx: Idx<T>) -> Option<&T> {
        if idx.raw >= self.len {
            return None;
        }
        let (block, offset) = self.locate(idx.raw);
        self.blocks[block].items.get(offset)
    }

    pub fn get_mut(&mut self, idx: Idx<T>) -> Option<&mut T> {
        if idx.raw >= self.len {
            return None;
        }
        let (block, offset) = self.locate(idx.raw);
        self.blocks[block].items.get_mut(offset)
    }

    /// Iterate over every stored value in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.blocks.iter().flat_map(|block| block.items.iter())
    }

    /// Free every block. The arena can be reused afterwards and starts over at its initial block length.
    pub fn release(&mut self) {
        self.blocks.clear();
        self.next_block_len = self.initial_block_len;
        self.len = 0;
    }

    /// Make sure the newest block has room for `count` contiguous slots, starting a new block if it does not.
    fn reserve(&mut self, count: usize) -> usize {
        let fits = self.blocks.last().is_some_and(|block| block.remaining() >= count);
        if !fits {
            let capacity = self.next_block_len.max(count);
            self.blocks.push(Block {
                start: self.len,
                capacity,
                items: Vec::with_capacity(capacity),
            });
            self.next_block_len += (self.next_block_len / 2).max(1);
        }
        self.blocks.len() - 1
    }

    /// Account for `count` new slots and return the raw index of the first one.
    fn bump(&mut self, count: usize) -> u32 {
        let start = self.len;
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.len = match start.checked_add(count) {
            Some(len) => len,
            None => panic!("arena index space exhausted"),
        };
        start
    }

    fn locate(&self, raw: u32) -> (usize, usize) {
        let block = self.blocks.partition_point(|block| block.start <= raw).saturating_sub(1);
        (block, (raw - self.blocks[block].start) as usize)
    }
}

impl<T: Copy> Arena<T> {
    /// Reserve `count` contiguous slots filled with `fill` and return the raw index of the first one.
    ///
    /// A span never straddles two blocks.
    pub fn alloc_span(&mut self, count: usize, fill: T) -> u32 {
        let block = self.reserve(count);
        self.blocks[block].items.extend(std::iter::repeat_n(fill, count));
        self.bump(count)
    }

    /// Borrow `len` contiguous slots starting at raw index `start`.
    ///
    /// ## Panics
    /// Panics if the range was not handed out as a single span by [`Arena::alloc_span`].
    pub fn span(&self, start: u32, len: usize) -> &[T] {
        let (block, offset) = self.locate(start);
        &self.blocks[block].items[offset..offset + len]
    }

    fn span_mut(&mut self, start: u32, len: usize) -> &mut [T] {
        let (block, offset) = self.locate(start);
        &mut self.blocks[block].items[offset..offset + len]
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("len", &self.len)
            .field("blocks", &self.blocks.len())
            .field("next_block_len", &self.next_block_len)
            .finish()
    }
}

impl<T> Index<Idx<T>> for Arena<T> {
    type Output = T;

    fn index(&self, idx: Idx<T>) -> &T {
        match self.get(idx) {
            Some(value) => value,
            None => panic!("{idx:?} is out of bounds for an arena of {} slots", self.len),
        }
    }
}

impl<T> IndexMut<Idx<T>> for Arena<T> {
    fn index_mut(&mut self, idx: Idx<T>) -> &mut T {
        let len = self.len;
        match self.get_mut(idx) {
            Some(value) => value,
            None => panic!("{idx:?} is out of bounds for an arena of {len} slots"),
        }
    }
}

// ============================================================================
// ArenaArray
// ============================================================================

/// Capacity of the first span an [`ArenaArray`] allocates.
pub const ARENA_ARRAY_INITIAL_CAPACITY: u32 = 4;

/// Growable array of `Copy` values whose storage lives in an [`Arena`].
///
/// The array itself is a small `Copy` descriptor (`start`, `len`, `capacity`); all element access goes through the arena
/// that backs it. An empty array owns no storage at all.
pub struct ArenaArray<T> {
    start: u32,
    len: u32,
    capacity: u32,
    _ty: PhantomData<fn() -> T>,
}

impl<T> ArenaArray<T> {
    /// The shared empty array. It has zero capacity and never touches an arena.
    pub const EMPTY: Self = Self {
        start: 0,
        len: 0,
        capacity: 0,
        _ty: PhantomData,
    };

    pub const fn new() -> Self {
        Self::EMPTY
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }
}

impl<T: Copy> ArenaArray<T> {
    /// Append `value`, moving the elements to a span half again as large when the current one is full.
    pub fn put(&mut self, value: T, arena: &mut Arena<T>) {
        if self.len == self.capacity {
            let new_capacity = (self.capacity + self.capacity / 2).max(ARENA_ARRAY_INITIAL_CAPACITY);
            let start = arena.alloc_span(new_capacity as usize, value);
            if self.len > 0 {
                let old: Vec<T> = arena.span(self.start, self.len as usize).to_vec();
                arena.span_mut(start, old.len()).copy_from_slice(&old);
            }
            self.start = start;
            self.capacity = new_capacity;
        }

        arena.span_mut(self.start, self.capacity as usize)[self.len as usize] = value;
        self.len += 1;
    }

    /// Borrow the elements from the arena that backs this array.
    pub fn as_slice<'a>(&self, arena: &'a Arena<T>) -> &'a [T] {
        if self.len == 0 {
            return &[];
        }
        arena.span(self.start, self.len as usize)
    }

    pub fn iter<'a>(&self, arena: &'a Arena<T>) -> std::slice::Iter<'a, T> {
        self.as_slice(arena).iter()
    }

    pub fn get(&self, index: usize, arena: &Arena<T>) -> Option<T> {
        self.as_slice(arena).get(index).copied()
    }
}

impl<T> Clone for ArenaArray<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaArray<T> {}

impl<T> Default for ArenaArray<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> PartialEq for ArenaArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.len == other.len && self.capacity == other.capacity
    }
}

impl<T> Eq for ArenaArray<T> {}

impl<T> fmt::Debug for ArenaArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaArray")
            .field("start", &self.start)
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn block_capacities<T>(arena: &Arena<T>) -> Vec<usize> {
        arena.blocks.iter().map(|block| block.capacity).collect()
    }

    #[test]
    fn test_alloc_and_index() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!(arena[a], "a");
        assert_eq!(arena[b], "b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.block_count(), 1);
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let mut arena = Arena::new();
        arena.alloc(1u8);
        assert!(arena.get(Idx::from_raw(1)).is_none());
    }

    #[test]
    fn test_blocks_grow_by_half() {
        let mut arena = Arena::with_block_len(4);
        for n in 0..(4 + 6 + 9 + 1) {
            arena.alloc(n);
        }
        assert_eq!(block_capacities(&arena), vec![4, 6, 9, 13]);
        assert_eq!(arena.iter().copied().collect::<Vec<_>>(), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_indices_span_blocks() {
        let mut arena = Arena::with_block_len(2);
        let handles: Vec<_> = (0..50u32).map(|n| arena.alloc(n * 10)).collect();
        for (n, idx) in handles.into_iter().enumerate() {
            assert_eq!(arena[idx], n as u32 * 10);
        }
    }

    #[test]
    fn test_oversized_span_gets_its_own_block() {
        let mut arena = Arena::with_block_len(4);
        arena.alloc(0u32);
        let start = arena.alloc_span(100, 7u32);
        assert_eq!(start, 1);
        assert_eq!(block_capacities(&arena), vec![4, 100]);
        assert_eq!(arena.span(start, 100), &[7u32; 100][..]);
        // The next regular block keeps following the geometric progression.
        arena.alloc_span(1, 0);
        assert_eq!(block_capacities(&arena), vec![4, 100, 9]);
    }

    #[test]
    fn test_release_makes_arena_reusable() {
        let mut arena = Arena::with_block_len(2);
        for n in 0..10 {
            arena.alloc(n);
        }
        arena.release();
        assert!(arena.is_empty());
        assert_eq!(arena.block_count(), 0);

        let idx = arena.alloc(42);
        assert_eq!(arena[idx], 42);
        assert_eq!(block_capacities(&arena), vec![2]);
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut arena = Arena::new();
        let idx = arena.alloc(5);
        let moved = std::mem::take(&mut arena);
        assert!(arena.is_empty());
        assert_eq!(arena.block_count(), 0);
        assert_eq!(moved[idx], 5);
    }

    #[test]
    fn test_empty_array_does_not_allocate() {
        let arena: Arena<u32> = Arena::new();
        let array = ArenaArray::<u32>::new();
        assert!(array.as_slice(&arena).is_empty());
        assert_eq!(array.capacity(), 0);
        assert_eq!(arena.block_count(), 0);
        assert_eq!(array, ArenaArray::EMPTY);
    }

    #[test]
    fn test_array_capacity_grows_by_half() {
        let mut arena = Arena::new();
        let mut array = ArenaArray::new();
        let mut capacities = Vec::new();
        for n in 0..14u32 {
            array.put(n, &mut arena);
            if capacities.last() != Some(&array.capacity()) {
                capacities.push(array.capacity());
            }
        }
        assert_eq!(capacities, vec![4, 6, 9, 13, 19]);
        assert_eq!(array.as_slice(&arena), (0..14).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn test_array_growth_leaves_dead_space() {
        let mut arena = Arena::new();
        let mut array = ArenaArray::new();
        for n in 0..5u32 {
            array.put(n, &mut arena);
        }
        // 4 slots of the first span are abandoned, 6 belong to the live span.
        assert_eq!(arena.len(), 10);
        assert_eq!(array.len(), 5);
    }

    #[test]
    fn test_arrays_interleaved_in_one_arena() {
        let mut arena = Arena::with_block_len(3);
        let mut evens = ArenaArray::new();
        let mut odds = ArenaArray::new();
        for n in 0..40u32 {
            if n % 2 == 0 {
                evens.put(n, &mut arena);
            } else {
                odds.put(n, &mut arena);
            }
        }
        assert!(evens.iter(&arena).all(|n| n % 2 == 0));
        assert!(odds.iter(&arena).all(|n| n % 2 == 1));
        assert_eq!(evens.len(), 20);
        assert_eq!(odds.get(19, &arena), Some(39));
        assert_eq!(odds.get(20, &arena), None);
    }
}
