//! Fixed-capacity inline storage.

/// Inline vector with a compile-time capacity.
///
/// Never allocates. `push` past capacity leaves the contents untouched and
/// hands the rejected item back.
#[derive(Debug, Clone, Copy)]
pub struct BoundedVec<T: Copy, const N: usize> {
    items: [Option<T>; N],
    len: usize,
}

impl<T: Copy, const N: usize> Default for BoundedVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> BoundedVec<T, N> {
    /// Maximum number of items.
    pub const CAPACITY: usize = N;

    /// Create an empty vector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: [None; N],
            len: 0,
        }
    }

    /// Append an item.
    ///
    /// Returns the item back if the vector is full.
    pub fn push(&mut self, item: T) -> Result<(), T> {
        if self.len >= N {
            return Err(item);
        }
        self.items[self.len] = Some(item);
        self.len += 1;
        Ok(())
    }

    /// Remove and return the last item.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.items[self.len].take()
    }

    /// Last item, if any.
    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.len.checked_sub(1).and_then(|i| self.items[i])
    }

    /// Item at `index`, if within the current length.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        if index < self.len {
            self.items[index]
        } else {
            None
        }
    }

    /// Logically empty the vector in constant time.
    ///
    /// Stale slots are overwritten by later pushes and never read.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector holds no items.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if another push would be rejected.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len >= N
    }

    /// Iterate over the items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.items[..self.len].iter().filter_map(|item| *item)
    }
}
