//! Pass-through for byte ranges already in wire order

use crate::buffer::{Sink, Source};

/// Forward `data` to the sink unchanged.
///
/// # Panics
///
/// Panics if `data` is at least `isize::MAX` bytes long. Untrusted lengths
/// are validated before any bulk transfer is attempted, so reaching this
/// means internal state is corrupt.
#[inline]
pub fn write_bulk<S: Sink + ?Sized>(sink: &mut S, data: &[u8]) {
    assert!(
        data.len() < isize::MAX.unsigned_abs(),
        "bulk write of {} bytes exceeds addressable range",
        data.len()
    );
    sink.write(data);
}

/// Fill `out` from the source, returning whether every byte was supplied.
#[inline]
#[must_use]
pub fn read_bulk<R: Source + ?Sized>(source: &mut R, out: &mut [u8]) -> bool {
    source.read(out)
}
