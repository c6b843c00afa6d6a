//! The type-erased dynamic buffer.

use std::ptr;

use dynbuf_common::{Result, verify_arg};

use crate::arith;
use crate::store::{INITIAL_CAPACITY, RawStore};

/// A growable contiguous buffer of opaque fixed-size elements.
///
/// The element byte width is fixed at construction. Elements move in and out
/// as `element_size`-byte slices; the buffer itself only ever copies raw
/// bytes, so payloads must be trivially copyable. Elements occupy a dense
/// prefix of the allocation; slots past `len()` hold unspecified content.
///
/// Every failing operation leaves length, capacity, and contents exactly as
/// they were, except that a mutation may have grown capacity before its
/// infallible copy step.
///
/// Dropping the buffer releases the allocation. A nullable handle in the
/// C sense is spelled `Option<DynBuffer>`, where `take()` is the idempotent
/// delete.
pub struct DynBuffer {
    store: RawStore,
    len: usize,
}

impl DynBuffer {
    /// Creates a buffer for `element_size`-byte elements with a small initial
    /// capacity.
    ///
    /// Fails with `InvalidArgument` when `element_size` is zero, and with
    /// `Overflow` when the initial byte footprint cannot be represented.
    pub fn new(element_size: usize) -> Result<DynBuffer> {
        DynBuffer::with_capacity(element_size, INITIAL_CAPACITY)
    }

    /// Creates a buffer with capacity for at least `capacity` elements.
    pub fn with_capacity(element_size: usize, capacity: usize) -> Result<DynBuffer> {
        verify_arg!(element_size, element_size > 0);
        verify_arg!(capacity, capacity > 0);
        let mut store = RawStore::new(element_size);
        store.grow_to(capacity)?;
        Ok(DynBuffer { store, len: 0 })
    }

    /// Number of elements currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of element slots the buffer can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Byte width of each element, fixed at construction.
    #[inline]
    pub fn element_size(&self) -> usize {
        self.store.element_size()
    }

    /// Returns the stored elements as one contiguous byte slice of
    /// `len() * element_size()` bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.store.as_ptr(), self.len * self.element_size()) }
    }

    /// Mutable view of the stored elements as one contiguous byte slice.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let bytes = self.len * self.element_size();
        unsafe { std::slice::from_raw_parts_mut(self.store.slot_ptr(0), bytes) }
    }

    /// Borrows the element at `index` as an `element_size`-byte slice.
    pub fn element(&self, index: usize) -> Result<&[u8]> {
        verify_arg!(index, index < self.len);
        let size = self.element_size();
        Ok(unsafe { std::slice::from_raw_parts(self.store.slot_ptr(index), size) })
    }

    /// Mutably borrows the element at `index`.
    pub fn element_mut(&mut self, index: usize) -> Result<&mut [u8]> {
        verify_arg!(index, index < self.len);
        let size = self.element_size();
        Ok(unsafe { std::slice::from_raw_parts_mut(self.store.slot_ptr(index), size) })
    }

    /// Reserves capacity for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let required = arith::checked_add(self.len, additional, "reserved capacity")?;
        self.store.grow_to(required)
    }

    /// Inserts `value` at `index`, shifting the elements at `index..len()` up
    /// by one slot.
    ///
    /// `index` may equal `len()` to append. `value` must be exactly
    /// `element_size()` bytes. Capacity errors from growth propagate with the
    /// buffer contents unchanged.
    pub fn insert(&mut self, index: usize, value: &[u8]) -> Result<()> {
        verify_arg!(index, index <= self.len);
        verify_arg!(value, value.len() == self.element_size());
        let new_len = arith::checked_add(self.len, 1, "element count")?;
        self.store.grow_to(new_len)?;
        let size = self.element_size();
        unsafe {
            let slot = self.store.slot_ptr(index);
            if index < self.len {
                ptr::copy(slot, self.store.slot_ptr(index + 1), (self.len - index) * size);
            }
            ptr::copy_nonoverlapping(value.as_ptr(), slot, size);
        }
        self.len = new_len;
        Ok(())
    }

    /// Removes the element at `index`, shifting the elements above it down by
    /// one slot. Capacity is never reduced.
    pub fn erase(&mut self, index: usize) -> Result<()> {
        verify_arg!(index, index < self.len);
        let size = self.element_size();
        unsafe {
            ptr::copy(
                self.store.slot_ptr(index + 1),
                self.store.slot_ptr(index),
                (self.len - index - 1) * size,
            );
        }
        self.len -= 1;
        Ok(())
    }

    /// Prepends `value`, shifting all existing elements up by one slot.
    pub fn push_front(&mut self, value: &[u8]) -> Result<()> {
        self.insert(0, value)
    }

    /// Appends `value`. Amortized O(1): grows only when the buffer is full.
    pub fn push_back(&mut self, value: &[u8]) -> Result<()> {
        self.insert(self.len, value)
    }

    /// Removes the first element, shifting the remaining `len() - 1` elements
    /// down by one slot. No-op on an empty buffer.
    pub fn pop_front(&mut self) {
        if self.len == 0 {
            return;
        }
        let size = self.element_size();
        unsafe {
            ptr::copy(
                self.store.slot_ptr(1),
                self.store.slot_ptr(0),
                (self.len - 1) * size,
            );
        }
        self.len -= 1;
    }

    /// Removes the last element. No-op on an empty buffer.
    pub fn pop_back(&mut self) {
        if self.len == 0 {
            return;
        }
        self.len -= 1;
    }

    /// Copies the element at `index` into `out`, which must be exactly
    /// `element_size()` bytes.
    pub fn get(&self, index: usize, out: &mut [u8]) -> Result<()> {
        verify_arg!(out, out.len() == self.element_size());
        out.copy_from_slice(self.element(index)?);
        Ok(())
    }

    /// Overwrites the element at `index` with `value`, which must be exactly
    /// `element_size()` bytes.
    pub fn set(&mut self, index: usize, value: &[u8]) -> Result<()> {
        verify_arg!(value, value.len() == self.element_size());
        self.element_mut(index)?.copy_from_slice(value);
        Ok(())
    }

    /// Removes all elements. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Reallocates the backing storage down to exactly `len()` slots,
    /// releasing it entirely when the buffer is empty. On failure the buffer
    /// remains valid at its pre-call capacity.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        self.store.shrink_to(self.len)
    }

    /// Creates a buffer with the same element size and contents.
    pub fn try_clone(&self) -> Result<DynBuffer> {
        let mut store = RawStore::new(self.element_size());
        if self.len > 0 {
            store.grow_to(self.len)?;
            unsafe {
                ptr::copy_nonoverlapping(
                    self.store.as_ptr(),
                    store.slot_ptr(0),
                    self.len * self.element_size(),
                );
            }
        }
        Ok(DynBuffer {
            store,
            len: self.len,
        })
    }
}

impl std::fmt::Debug for DynBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynBuffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("element_size", &self.element_size())
            .finish_non_exhaustive()
    }
}
