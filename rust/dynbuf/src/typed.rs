//! Typed views over the byte-level buffer.

use std::marker::PhantomData;

use dynbuf_common::{Result, verify_arg};

use crate::buffer::DynBuffer;
use crate::store::RawStore;

/// A growable buffer of plain-old-data elements, layered over [`DynBuffer`].
///
/// `T` must be trivially copyable (`bytemuck::NoUninit + AnyBitPattern`);
/// the buffer stores raw bytes and performs no drops. Callers with element
/// types that own resources should use `Vec<T>` instead.
pub struct TypedBuffer<T> {
    inner: DynBuffer,
    _marker: PhantomData<T>,
}

impl<T> TypedBuffer<T>
where
    T: bytemuck::NoUninit + bytemuck::AnyBitPattern,
{
    /// Creates an empty buffer with a small initial capacity.
    ///
    /// Fails with `InvalidArgument` for zero-sized `T` or an alignment the
    /// underlying store cannot guarantee.
    pub fn new() -> Result<TypedBuffer<T>> {
        verify_arg!(T, std::mem::size_of::<T>() > 0);
        verify_arg!(T, std::mem::align_of::<T>() <= RawStore::ALIGNMENT);
        Ok(TypedBuffer {
            inner: DynBuffer::new(std::mem::size_of::<T>())?,
            _marker: PhantomData,
        })
    }

    /// Creates an empty buffer with capacity for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<TypedBuffer<T>> {
        verify_arg!(T, std::mem::size_of::<T>() > 0);
        verify_arg!(T, std::mem::align_of::<T>() <= RawStore::ALIGNMENT);
        Ok(TypedBuffer {
            inner: DynBuffer::with_capacity(std::mem::size_of::<T>(), capacity)?,
            _marker: PhantomData,
        })
    }

    /// Creates a buffer containing a copy of `values`.
    pub fn from_slice(values: &[T]) -> Result<TypedBuffer<T>> {
        let mut buf = if values.is_empty() {
            TypedBuffer::new()?
        } else {
            TypedBuffer::with_capacity(values.len())?
        };
        for value in values {
            buf.push_back(*value)?;
        }
        Ok(buf)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// The stored elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        bytemuck::cast_slice(self.inner.as_bytes())
    }

    /// The stored elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        bytemuck::cast_slice_mut(self.inner.as_bytes_mut())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        Ok(*bytemuck::from_bytes(self.inner.element(index)?))
    }

    /// Overwrites the element at `index`.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        self.inner.set(index, bytemuck::bytes_of(&value))
    }

    /// Inserts `value` at `index`, shifting later elements up by one.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.inner.insert(index, bytemuck::bytes_of(&value))
    }

    /// Removes the element at `index`, shifting later elements down by one.
    pub fn erase(&mut self, index: usize) -> Result<()> {
        self.inner.erase(index)
    }

    pub fn push_front(&mut self, value: T) -> Result<()> {
        self.inner.push_front(bytemuck::bytes_of(&value))
    }

    pub fn push_back(&mut self, value: T) -> Result<()> {
        self.inner.push_back(bytemuck::bytes_of(&value))
    }

    /// Removes the first element. No-op when empty.
    pub fn pop_front(&mut self) {
        self.inner.pop_front();
    }

    /// Removes the last element. No-op when empty.
    pub fn pop_back(&mut self) {
        self.inner.pop_back();
    }

    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.inner.reserve(additional)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn shrink_to_fit(&mut self) -> Result<()> {
        self.inner.shrink_to_fit()
    }

    pub fn try_clone(&self) -> Result<TypedBuffer<T>> {
        Ok(TypedBuffer {
            inner: self.inner.try_clone()?,
            _marker: PhantomData,
        })
    }

    /// Consumes the typed view and returns the underlying byte buffer.
    pub fn into_inner(self) -> DynBuffer {
        self.inner
    }
}

impl<T> std::fmt::Debug for TypedBuffer<T>
where
    T: bytemuck::NoUninit + bytemuck::AnyBitPattern + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a, T> IntoIterator for &'a TypedBuffer<T>
where
    T: bytemuck::NoUninit + bytemuck::AnyBitPattern,
{
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
