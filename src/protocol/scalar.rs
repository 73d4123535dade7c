//! Fundamental scalar types and their host layout

use super::block::Block;
use super::endian::HostOrder;

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width fundamental value: integers, floats and `bool`.
///
/// A scalar's host layout under `H` is its byte image as a host of that
/// order would hold it in memory.
pub trait Scalar: Copy + Default + sealed::Sealed + 'static {
    /// Byte image of one value
    type Repr: Block;

    /// Byte image of `self` in host order `H`.
    fn to_host_bytes<H: HostOrder>(self) -> Self::Repr;

    /// Rebuild a value from its byte image in host order `H`.
    fn from_host_bytes<H: HostOrder>(bytes: Self::Repr) -> Self;

    /// View a slice of values as its real memory bytes.
    fn as_bytes(values: &[Self]) -> &[u8];

    /// Mutable byte view, `None` when some bit patterns are invalid values.
    fn as_bytes_mut(values: &mut [Self]) -> Option<&mut [u8]>;
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Scalar for $ty {
                type Repr = [u8; size_of::<$ty>()];

                #[inline]
                fn to_host_bytes<H: HostOrder>(self) -> Self::Repr {
                    if H::LITTLE {
                        self.to_le_bytes()
                    } else {
                        self.to_be_bytes()
                    }
                }

                #[inline]
                fn from_host_bytes<H: HostOrder>(bytes: Self::Repr) -> Self {
                    if H::LITTLE {
                        <$ty>::from_le_bytes(bytes)
                    } else {
                        <$ty>::from_be_bytes(bytes)
                    }
                }

                #[inline]
                fn as_bytes(values: &[Self]) -> &[u8] {
                    bytemuck::cast_slice(values)
                }

                #[inline]
                fn as_bytes_mut(values: &mut [Self]) -> Option<&mut [u8]> {
                    Some(bytemuck::cast_slice_mut(values))
                }
            }
        )*
    };
}

impl_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

impl sealed::Sealed for bool {}

impl Scalar for bool {
    type Repr = [u8; 1];

    #[inline]
    fn to_host_bytes<H: HostOrder>(self) -> Self::Repr {
        [u8::from(self)]
    }

    // Any non-zero byte reads back as `true`.
    #[inline]
    fn from_host_bytes<H: HostOrder>(bytes: Self::Repr) -> Self {
        bytes[0] != 0
    }

    #[inline]
    fn as_bytes(values: &[Self]) -> &[u8] {
        bytemuck::cast_slice(values)
    }

    #[inline]
    fn as_bytes_mut(_values: &mut [Self]) -> Option<&mut [u8]> {
        None
    }
}
