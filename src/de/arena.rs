use crate::buffer::Buffer;
use bstr::BStr;

/// The location of a saved string within a [`StringArena`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct Span {
    start: usize,
    len: usize,
}

/// Append-only storage for identifier and string literal text.
///
/// Every entry is followed by a NUL byte.
#[derive(Debug)]
pub(crate) struct StringArena {
    buf: Buffer<u8>,
}

impl StringArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        StringArena {
            buf: Buffer::with_capacity(capacity),
        }
    }

    pub(crate) fn save(&mut self, s: &[u8]) -> Span {
        let start = self.buf.len();
        self.buf.extend_from_slice(s);
        self.buf.push(0);

        Span { start, len: s.len() }
    }

    pub(crate) fn get(&self, span: Span) -> &BStr {
        BStr::new(&self.buf[span.start..span.start + span.len])
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn spans_survive_growth() {
        let mut arena = StringArena::with_capacity(4);
        let a = arena.save(b"name");
        let b = arena.save(b"");
        let c = arena.save(b"a much longer string than the initial capacity");

        assert_eq!(arena.get(a), "name");
        assert_eq!(arena.get(b), "");
        assert_eq!(arena.get(c), "a much longer string than the initial capacity");
    }

    #[test]
    fn entries_are_terminated() {
        let mut arena = StringArena::with_capacity(16);
        arena.save(b"ab");
        arena.save(b"c");
        assert_eq!(arena.len(), 5);
        assert_eq!(&*arena.buf, b"ab\0c\0");
    }
}
