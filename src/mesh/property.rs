//! Typed per-element data.
//!
//! A [`Property`] is a flat array with one slot per mesh element, indexed by
//! the element's handle. Scalar fields, edge weights and colors attached to a
//! mesh are all stored this way instead of in a dynamic property table.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use super::index::{EdgeId, FaceId, Handle, VertexId};

/// Per-element data indexed by handle type `H`.
#[derive(Clone, PartialEq)]
pub struct Property<H: Handle, T> {
    data: Vec<T>,
    _handle: PhantomData<H>,
}

/// Data attached to every vertex.
pub type VertexProperty<T, I = u32> = Property<VertexId<I>, T>;
/// Data attached to every undirected edge.
pub type EdgeProperty<T, I = u32> = Property<EdgeId<I>, T>;
/// Data attached to every face.
pub type FaceProperty<T, I = u32> = Property<FaceId<I>, T>;

impl<H: Handle, T: Clone> Property<H, T> {
    /// Create a property with `len` slots set to `value`.
    pub fn filled(len: usize, value: T) -> Self {
        Self::from_vec(vec![value; len])
    }
}

impl<H: Handle, T> Property<H, T> {
    /// Wrap an existing vector; slot `i` belongs to the element with index `i`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data,
            _handle: PhantomData,
        }
    }

    /// Build a property by evaluating `f` for each of `len` elements in order.
    pub fn from_fn(len: usize, f: impl FnMut(H) -> T) -> Self {
        Self::from_vec((0..len).map(H::from_index).map(f).collect())
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if there are no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value of an element, or `None` if the handle is out of range.
    #[inline]
    pub fn get(&self, h: H) -> Option<&T> {
        self.data.get(h.to_index())
    }

    /// All values in element order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.data
    }

    /// Iterate over `(handle, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, value)| (H::from_index(i), value))
    }
}

impl<H: Handle, T> Index<H> for Property<H, T> {
    type Output = T;

    #[inline]
    fn index(&self, h: H) -> &T {
        &self.data[h.to_index()]
    }
}

impl<H: Handle, T> IndexMut<H> for Property<H, T> {
    #[inline]
    fn index_mut(&mut self, h: H) -> &mut T {
        &mut self.data[h.to_index()]
    }
}

impl<H: Handle, T: std::fmt::Debug> std::fmt::Debug for Property<H, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("element", &H::LABEL)
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}
