//! Backing storage and capacity growth.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use dynbuf_common::{Result, error::Error};

use crate::arith;

/// Slot count allocated by a fresh buffer, and the floor the doubling policy
/// starts from when an empty store grows.
pub(crate) const INITIAL_CAPACITY: usize = 8;

/// Owns the contiguous allocation behind a buffer: a pointer, the number of
/// allocated element slots, and the fixed per-element byte width.
///
/// The allocation is 64-byte aligned so that typed views over the stored
/// bytes are aligned for any element type accepted by [`crate::TypedBuffer`].
/// Invariant: `capacity * element_size` fits in `isize` (checked on every
/// growth step), and the pointer is dangling exactly when `capacity == 0`.
pub(crate) struct RawStore {
    ptr: NonNull<u8>,
    capacity: usize,
    element_size: usize,
}

// The store exclusively owns its allocation.
unsafe impl Send for RawStore {}
unsafe impl Sync for RawStore {}

impl RawStore {
    /// Allocation alignment in bytes.
    pub(crate) const ALIGNMENT: usize = 64;

    /// Creates an empty store with no allocation. `element_size` must have
    /// been validated as nonzero by the caller.
    pub fn new(element_size: usize) -> RawStore {
        debug_assert!(element_size > 0);
        RawStore {
            ptr: Self::dangling(),
            capacity: 0,
            element_size,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Pointer to the first byte of the slot at `index`.
    ///
    /// The offset cannot overflow: `index` never exceeds `capacity`, and
    /// `capacity * element_size` was bounded by `isize::MAX` at growth time.
    #[inline]
    pub fn slot_ptr(&self, index: usize) -> *mut u8 {
        debug_assert!(index <= self.capacity);
        unsafe { self.ptr.as_ptr().add(index * self.element_size) }
    }

    /// Grows the store so that `capacity >= min_slots`.
    ///
    /// An empty store starts at [`INITIAL_CAPACITY`]; otherwise the capacity
    /// doubles until it covers `min_slots`. If any doubling step or the
    /// resulting byte count overflows, the call fails with `Overflow` and the
    /// store is unchanged; growth never caps at `min_slots`. Allocation
    /// failure yields `OutOfMemory`, also leaving the store unchanged.
    pub fn grow_to(&mut self, min_slots: usize) -> Result<()> {
        if min_slots <= self.capacity {
            return Ok(());
        }
        let mut target = if self.capacity == 0 {
            INITIAL_CAPACITY
        } else {
            arith::checked_mul(self.capacity, 2, "capacity doubling")?
        };
        while target < min_slots {
            target = arith::checked_mul(target, 2, "capacity doubling")?;
        }
        self.reallocate(target)
    }

    /// Shrinks the allocation down to exactly `slots`, releasing it entirely
    /// when `slots == 0`. No-op when `slots >= capacity`. On reallocation
    /// failure the store keeps its pre-call capacity and contents.
    pub fn shrink_to(&mut self, slots: usize) -> Result<()> {
        if slots >= self.capacity {
            return Ok(());
        }
        if slots == 0 {
            self.release();
            return Ok(());
        }
        self.reallocate(slots)
    }

    /// Reallocates the backing storage to hold `new_capacity` slots. The old
    /// allocation stays intact unless the new one is confirmed.
    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(new_capacity > 0);
        let new_bytes = arith::checked_mul(new_capacity, self.element_size, "capacity in bytes")?;
        // Rounded up to ALIGNMENT, the byte count must still fit in isize.
        if new_bytes > isize::MAX as usize - (Self::ALIGNMENT - 1) {
            return Err(Error::overflow("capacity in bytes"));
        }
        let new_ptr = if self.capacity == 0 {
            unsafe { alloc::alloc(Self::layout(new_bytes)) }
        } else {
            let old_bytes = self.capacity * self.element_size;
            unsafe { alloc::realloc(self.ptr.as_ptr(), Self::layout(old_bytes), new_bytes) }
        };
        let Some(new_ptr) = NonNull::new(new_ptr) else {
            return Err(Error::out_of_memory(new_bytes));
        };
        self.ptr = new_ptr;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Frees the allocation and resets the store to the unallocated state.
    pub fn release(&mut self) {
        if self.capacity != 0 {
            let bytes = self.capacity * self.element_size;
            unsafe { alloc::dealloc(self.ptr.as_ptr(), Self::layout(bytes)) };
            self.ptr = Self::dangling();
            self.capacity = 0;
        }
    }

    fn layout(bytes: usize) -> Layout {
        Layout::from_size_align(bytes, Self::ALIGNMENT).expect("layout")
    }

    /// Placeholder pointer for the unallocated state, aligned to
    /// [`Self::ALIGNMENT`] so empty typed views can still cast it.
    fn dangling() -> NonNull<u8> {
        unsafe { NonNull::new_unchecked(std::ptr::without_provenance_mut(Self::ALIGNMENT)) }
    }
}

impl Drop for RawStore {
    fn drop(&mut self) {
        self.release();
    }
}
