use std::ops::Deref;

/// An append-only buffer which grows to `max(capacity * 2, required)` when full.
///
/// `Vec`'s own amortized growth is not specified, so reservations are made exactly to keep the footprint
/// predictable for the capacities configured through the builders.
#[derive(Debug, Clone, Default)]
pub(crate) struct Buffer<T> {
    buf: Vec<T>,
}

impl<T> Buffer<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Buffer {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn reserve(&mut self, additional: usize) {
        if self.buf.capacity() - self.buf.len() >= additional {
            return;
        }

        let required = self.buf.len() + additional;
        let new_capacity = usize::max(self.buf.capacity().saturating_mul(2), required);
        self.buf.reserve_exact(new_capacity - self.buf.len());
    }

    /// Appends an item, returning its index.
    pub(crate) fn push(&mut self, value: T) -> usize {
        self.reserve(1);
        let index = self.buf.len();
        self.buf.push(value);
        index
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.buf.get_mut(index)
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        self.buf
    }
}

impl<T> Buffer<T>
where
    T: Copy,
{
    pub(crate) fn extend_from_slice(&mut self, values: &[T]) {
        self.reserve(values.len());
        self.buf.extend_from_slice(values);
    }
}

impl<T> Deref for Buffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.buf
    }
}
