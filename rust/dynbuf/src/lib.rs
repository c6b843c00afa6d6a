//! Type-erased growable contiguous buffer.
//!
//! [`DynBuffer`] owns a single heap allocation holding fixed-size elements
//! addressed by raw byte offsets. The element byte width is chosen at
//! construction and never changes; callers move elements in and out as
//! `element_size`-byte slices. [`TypedBuffer`] layers a generic interface on
//! top for plain-old-data element types.
//!
//! Every size computation is overflow-checked, growth follows one documented
//! doubling policy that fails rather than capping, and every operation either
//! completes or returns an error with the buffer unchanged.
//!
//! Buffers are not internally synchronized: concurrent mutation of the same
//! buffer requires external mutual exclusion.

pub mod arith;
pub mod buffer;
pub mod typed;

mod store;

pub use buffer::DynBuffer;
pub use typed::TypedBuffer;
