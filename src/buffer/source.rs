//! Readable byte sources: slices, `Bytes` and `io::Read` streams

use std::io;

use bytes::{Buf, Bytes};
use tracing::trace;

/// Sequential, bounded byte source.
///
/// Sources that can answer [`Source::check`] without consuming input set
/// [`Source::CHECKABLE`]; only those are eligible for bulk container
/// decoding, because the capacity query is what guards the destination
/// allocation.
pub trait Source {
    /// Source implements a meaningful [`Source::check`]
    const CHECKABLE: bool = false;

    /// Fill `out` completely, returning `false` if the source ran short.
    fn read(&mut self, out: &mut [u8]) -> bool;

    /// Whether `len` more bytes are available, without consuming them.
    fn check(&self, _len: usize) -> bool {
        false
    }
}

impl<R: Source + ?Sized> Source for &mut R {
    const CHECKABLE: bool = R::CHECKABLE;

    #[inline]
    fn read(&mut self, out: &mut [u8]) -> bool {
        (**self).read(out)
    }

    #[inline]
    fn check(&self, len: usize) -> bool {
        (**self).check(len)
    }
}

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Start reading at the beginning of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Unconsumed tail of the input
    #[must_use]
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl Source for SliceReader<'_> {
    const CHECKABLE: bool = true;

    #[inline]
    fn read(&mut self, out: &mut [u8]) -> bool {
        let Some(src) = self.data.get(self.pos..self.pos + out.len()) else {
            return false;
        };
        out.copy_from_slice(src);
        self.pos += out.len();
        true
    }

    #[inline]
    fn check(&self, len: usize) -> bool {
        self.remaining() >= len
    }
}

impl Source for Bytes {
    const CHECKABLE: bool = true;

    #[inline]
    fn read(&mut self, out: &mut [u8]) -> bool {
        if self.remaining() < out.len() {
            return false;
        }
        self.copy_to_slice(out);
        true
    }

    #[inline]
    fn check(&self, len: usize) -> bool {
        self.remaining() >= len
    }
}

/// Adapter over [`io::Read`].
///
/// A stream cannot report how much input is left, so containers read
/// through it always take the element-wise path.
#[derive(Debug)]
pub struct StreamReader<R> {
    inner: R,
    consumed: u64,
    last_error: Option<io::Error>,
}

impl<R: io::Read> StreamReader<R> {
    /// Wrap a reader.
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            consumed: 0,
            last_error: None,
        }
    }

    /// Bytes successfully read so far
    #[must_use]
    pub const fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Take the I/O error behind the most recent short read, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.last_error.take()
    }

    /// Unwrap the inner reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> Source for StreamReader<R> {
    fn read(&mut self, out: &mut [u8]) -> bool {
        match self.inner.read_exact(out) {
            Ok(()) => {
                self.consumed += out.len() as u64;
                true
            }
            Err(err) => {
                trace!(wanted = out.len(), error = %err, "stream read failed");
                self.last_error = Some(err);
                false
            }
        }
    }
}
