//! Type-directed encode/decode for scalars, fixed arrays and containers
//!
//! Every decision here is made from static type information. Scalars go
//! through the block layer one value at a time. Runs of scalars (fixed
//! arrays, the payload of contiguous containers) are handed to the bulk
//! layer as a single byte range when the host layout already matches the
//! wire, and otherwise fall back to one block per element. Anything
//! structured recurses.
//!
//! # Wire Format
//!
//! ```text
//! scalar          [size_of::<T>() bytes, little-endian]
//! [T; N]          [T] [T] ... (N times, no prefix)
//! container       [count: u64 LE] [T] [T] ... (count times)
//! String          [len: u64 LE] [UTF-8 bytes]
//! (A, B, ...)     [A] [B] ...
//! ```

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::block::{read_block, write_block};
use super::bulk::{read_bulk, write_bulk};
use super::config::DecodeConfig;
use super::endian::{HostOrder, bulk_safe};
use super::scalar::Scalar;
use super::{Error, LENGTH_PREFIX_SIZE, Result};
use crate::buffer::{Sink, Source};

/// A value with a defined little-endian wire form.
///
/// `H` is the host order whose memory layout the value is taken from; use
/// [`Native`](super::Native) outside of tests.
pub trait Wire: Sized {
    /// `Self` is a fundamental scalar.
    ///
    /// Containers of scalars are eligible for bulk transfer.
    const SCALAR: bool = false;

    /// Fewest bytes any value of `Self` encodes to.
    ///
    /// Bounds how many elements a length prefix may claim against the input
    /// that remains. `0` means values may encode to nothing, in which case
    /// containers only accept counts the remaining input could cover byte
    /// for byte. Types that always write something should override it.
    const MIN_ENCODED_SIZE: usize = 0;

    /// Append the wire form of `self`.
    fn encode<H: HostOrder, S: Sink + ?Sized>(&self, sink: &mut S);

    /// Overwrite `self` with a value read from `source`.
    ///
    /// On error `self` holds an unspecified but valid value.
    fn decode<H: HostOrder, R: Source + ?Sized>(
        &mut self,
        source: &mut R,
        config: &DecodeConfig,
    ) -> Result<()>;

    /// Exact number of bytes [`Wire::encode`] appends.
    fn encoded_size(&self) -> usize;

    /// Real memory bytes of a run of values, if they have one.
    fn slice_as_bytes(_values: &[Self]) -> Option<&[u8]> {
        None
    }

    /// Writable memory bytes of a run of values, if every bit pattern is
    /// a valid value.
    fn slice_as_bytes_mut(_values: &mut [Self]) -> Option<&mut [u8]> {
        None
    }
}

macro_rules! impl_wire_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Wire for $ty {
                const SCALAR: bool = true;
                const MIN_ENCODED_SIZE: usize = size_of::<$ty>();

                #[inline]
                fn encode<H: HostOrder, S: Sink + ?Sized>(&self, sink: &mut S) {
                    write_block::<H, _, S>(sink, self.to_host_bytes::<H>());
                }

                #[inline]
                fn decode<H: HostOrder, R: Source + ?Sized>(
                    &mut self,
                    source: &mut R,
                    _config: &DecodeConfig,
                ) -> Result<()> {
                    *self = <$ty>::from_host_bytes::<H>(read_block::<H, _, R>(source)?);
                    Ok(())
                }

                #[inline]
                fn encoded_size(&self) -> usize {
                    size_of::<$ty>()
                }

                #[inline]
                fn slice_as_bytes(values: &[Self]) -> Option<&[u8]> {
                    Some(<$ty as Scalar>::as_bytes(values))
                }

                #[inline]
                fn slice_as_bytes_mut(values: &mut [Self]) -> Option<&mut [u8]> {
                    <$ty as Scalar>::as_bytes_mut(values)
                }
            }
        )*
    };
}

impl_wire_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64, bool);

impl<T: Wire, const N: usize> Wire for [T; N] {
    const MIN_ENCODED_SIZE: usize = T::MIN_ENCODED_SIZE.saturating_mul(N);

    fn encode<H: HostOrder, S: Sink + ?Sized>(&self, sink: &mut S) {
        encode_elements::<H, T, S>(sink, self);
    }

    fn decode<H: HostOrder, R: Source + ?Sized>(
        &mut self,
        source: &mut R,
        config: &DecodeConfig,
    ) -> Result<()> {
        decode_elements::<H, T, R>(source, self, config)
    }

    fn encoded_size(&self) -> usize {
        elements_size(self)
    }
}

impl<T: Wire + Default> Wire for Vec<T> {
    const MIN_ENCODED_SIZE: usize = LENGTH_PREFIX_SIZE;

    fn encode<H: HostOrder, S: Sink + ?Sized>(&self, sink: &mut S) {
        write_length::<H, S>(sink, self.len());
        encode_elements::<H, T, S>(sink, self);
    }

    fn decode<H: HostOrder, R: Source + ?Sized>(
        &mut self,
        source: &mut R,
        config: &DecodeConfig,
    ) -> Result<()> {
        let count = read_length::<H, R>(source, config)?;
        self.clear();

        if bulk_eligible::<H, T>() && R::CHECKABLE {
            let len = bulk_len(source, count, size_of::<T>())?;
            self.resize_with(len, T::default);
            return decode_elements::<H, T, R>(source, self, config);
        }

        check_element_count::<T, R>(source, count)?;
        trace!(count, "decoding container element-wise");
        for _ in 0..count {
            let mut value = T::default();
            value.decode::<H, R>(source, config)?;
            self.push(value);
        }
        Ok(())
    }

    fn encoded_size(&self) -> usize {
        LENGTH_PREFIX_SIZE + elements_size(self)
    }
}

// Storage is not contiguous, so elements always travel one by one.
impl<T: Wire + Default> Wire for VecDeque<T> {
    const MIN_ENCODED_SIZE: usize = LENGTH_PREFIX_SIZE;

    fn encode<H: HostOrder, S: Sink + ?Sized>(&self, sink: &mut S) {
        write_length::<H, S>(sink, self.len());
        for value in self {
            value.encode::<H, S>(sink);
        }
    }

    fn decode<H: HostOrder, R: Source + ?Sized>(
        &mut self,
        source: &mut R,
        config: &DecodeConfig,
    ) -> Result<()> {
        let count = read_length::<H, R>(source, config)?;
        check_element_count::<T, R>(source, count)?;
        self.clear();
        for _ in 0..count {
            let mut value = T::default();
            value.decode::<H, R>(source, config)?;
            self.push_back(value);
        }
        Ok(())
    }

    fn encoded_size(&self) -> usize {
        let payload = if T::SCALAR {
            size_of::<T>() * self.len()
        } else {
            self.iter().map(Wire::encoded_size).sum()
        };
        LENGTH_PREFIX_SIZE + payload
    }
}

impl Wire for String {
    const MIN_ENCODED_SIZE: usize = LENGTH_PREFIX_SIZE;

    fn encode<H: HostOrder, S: Sink + ?Sized>(&self, sink: &mut S) {
        write_length::<H, S>(sink, self.len());
        write_bulk(sink, self.as_bytes());
    }

    fn decode<H: HostOrder, R: Source + ?Sized>(
        &mut self,
        source: &mut R,
        config: &DecodeConfig,
    ) -> Result<()> {
        let mut bytes = std::mem::take(self).into_bytes();
        bytes.decode::<H, R>(source, config)?;
        *self = String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
        Ok(())
    }

    fn encoded_size(&self) -> usize {
        LENGTH_PREFIX_SIZE + self.len()
    }
}

macro_rules! impl_wire_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: Wire),+> Wire for ($($name,)+) {
            const MIN_ENCODED_SIZE: usize = 0usize $( .saturating_add($name::MIN_ENCODED_SIZE) )+;

            fn encode<H: HostOrder, S: Sink + ?Sized>(&self, sink: &mut S) {
                $( self.$idx.encode::<H, S>(sink); )+
            }

            fn decode<H: HostOrder, R: Source + ?Sized>(
                &mut self,
                source: &mut R,
                config: &DecodeConfig,
            ) -> Result<()> {
                $( self.$idx.decode::<H, R>(source, config)?; )+
                Ok(())
            }

            fn encoded_size(&self) -> usize {
                0 $( + self.$idx.encoded_size() )+
            }
        }
    };
}

impl_wire_tuple!(A.0);
impl_wire_tuple!(A.0, B.1);
impl_wire_tuple!(A.0, B.1, C.2);
impl_wire_tuple!(A.0, B.1, C.2, D.3);
impl_wire_tuple!(A.0, B.1, C.2, D.3, E.4);
impl_wire_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);

/// Write a run of scalars with no length prefix.
pub fn write_slice<H, T, S>(sink: &mut S, values: &[T])
where
    H: HostOrder,
    T: Scalar + Wire,
    S: Sink + ?Sized,
{
    encode_elements::<H, T, S>(sink, values);
}

/// Fill `values` from the source; the run length is `values.len()`.
pub fn read_slice<H, T, R>(source: &mut R, values: &mut [T]) -> Result<()>
where
    H: HostOrder,
    T: Scalar + Wire,
    R: Source + ?Sized,
{
    decode_elements::<H, T, R>(source, values, &DecodeConfig::new())
}

/// Encoded size of `len` scalars written with [`write_slice`].
#[must_use]
pub const fn slice_encoded_size<T: Scalar>(len: usize) -> usize {
    size_of::<T>() * len
}

/// Runs of `T` may move as one byte range.
const fn bulk_eligible<H: HostOrder, T: Wire>() -> bool {
    T::SCALAR && bulk_safe::<H>(size_of::<T>())
}

fn encode_elements<H, T, S>(sink: &mut S, values: &[T])
where
    H: HostOrder,
    T: Wire,
    S: Sink + ?Sized,
{
    if bulk_eligible::<H, T>() {
        if let Some(bytes) = T::slice_as_bytes(values) {
            write_bulk(sink, bytes);
            return;
        }
    }

    for value in values {
        value.encode::<H, S>(sink);
    }
}

fn decode_elements<H, T, R>(source: &mut R, values: &mut [T], config: &DecodeConfig) -> Result<()>
where
    H: HostOrder,
    T: Wire,
    R: Source + ?Sized,
{
    if bulk_eligible::<H, T>() {
        if let Some(bytes) = T::slice_as_bytes_mut(values) {
            let needed = bytes.len();
            if read_bulk(source, bytes) {
                return Ok(());
            }
            trace!(needed, "source exhausted reading bulk range");
            return Err(Error::InsufficientData { needed });
        }
    }

    for value in values.iter_mut() {
        value.decode::<H, R>(source, config)?;
    }
    Ok(())
}

fn elements_size<T: Wire>(values: &[T]) -> usize {
    if T::SCALAR {
        size_of::<T>() * values.len()
    } else {
        values.iter().map(Wire::encoded_size).sum()
    }
}

fn write_length<H: HostOrder, S: Sink + ?Sized>(sink: &mut S, len: usize) {
    (len as u64).encode::<H, S>(sink);
}

fn read_length<H: HostOrder, R: Source + ?Sized>(
    source: &mut R,
    config: &DecodeConfig,
) -> Result<u64> {
    let count = u64::from_host_bytes::<H>(read_block::<H, _, R>(source)?);
    if count > config.max_container_len {
        debug!(
            count,
            limit = config.max_container_len,
            "length prefix exceeds configured limit"
        );
        return Err(Error::LengthLimitExceeded {
            count,
            limit: config.max_container_len,
        });
    }
    Ok(count)
}

/// Validate a length prefix for bulk decoding and return the element count.
///
/// Runs before the destination is resized, so a forged prefix can never
/// drive an allocation larger than the input actually backing it.
fn bulk_len<R: Source + ?Sized>(source: &R, count: u64, element_size: usize) -> Result<usize> {
    let invalid = move || {
        debug!(count, element_size, "rejecting implausible length prefix");
        Error::InvalidLength {
            count,
            element_size,
        }
    };

    let byte_len = count
        .checked_mul(element_size as u64)
        .ok_or_else(invalid)?;
    let byte_len = usize::try_from(byte_len)
        .ok()
        .filter(|len| *len < isize::MAX.unsigned_abs())
        .ok_or_else(invalid)?;

    if !source.check(byte_len) {
        trace!(needed = byte_len, "length prefix exceeds remaining input");
        return Err(Error::InsufficientData { needed: byte_len });
    }

    Ok(byte_len / element_size)
}

/// Reject an element count the remaining input cannot back.
///
/// Every element consumes at least `T::MIN_ENCODED_SIZE` bytes, so a
/// checkable source must hold `count` times that. Elements that may consume
/// nothing would never run the source dry, so their count is held to the
/// bytes remaining and rejected outright when the source cannot say.
fn check_element_count<T: Wire, R: Source + ?Sized>(source: &R, count: u64) -> Result<()> {
    if T::MIN_ENCODED_SIZE == 0 {
        let backed = R::CHECKABLE && usize::try_from(count).is_ok_and(|len| source.check(len));
        if count == 0 || backed {
            return Ok(());
        }
        debug!(count, "rejecting count of zero-width elements");
        return Err(Error::InvalidLength {
            count,
            element_size: 0,
        });
    }

    if !R::CHECKABLE {
        return Ok(());
    }

    let needed = count.saturating_mul(T::MIN_ENCODED_SIZE as u64);
    let needed = usize::try_from(needed).unwrap_or(usize::MAX);
    if !source.check(needed) {
        trace!(count, needed, "elements cannot fit in remaining input");
        return Err(Error::InsufficientData { needed });
    }
    Ok(())
}
