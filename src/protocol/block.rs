//! Fixed-width block transfer between host layout and the wire
//!
//! A block is the byte image of one scalar in host order. Writing applies a
//! byte swap only when the host is big-endian and the block is wider than
//! one byte; reading mirrors that exactly.
//!
//! # Supported widths
//!
//! ```text
//! write_block / read_block          1, 2, 4, 8, 16
//! write_low_bytes / read_low_bytes  1, 2, 4
//! ```
//!
//! Any other width is rejected at compile time because [`Block`] and
//! [`LowBlock`] are sealed and only implemented for those arrays.

use tracing::trace;

use super::endian::{HostOrder, bswap16, bswap32, bswap64, wire_safe};
use super::scalar::Scalar;
use super::{Error, Result};
use crate::buffer::{Sink, Source};

mod sealed {
    pub trait Sealed {}

    impl Sealed for [u8; 1] {}
    impl Sealed for [u8; 2] {}
    impl Sealed for [u8; 4] {}
    impl Sealed for [u8; 8] {}
    impl Sealed for [u8; 16] {}
}

/// Byte array that can cross the wire as one block
pub trait Block: Copy + Default + AsRef<[u8]> + AsMut<[u8]> + sealed::Sealed {
    /// Width in bytes
    const WIDTH: usize;

    /// Reverse the byte order of the block.
    #[must_use]
    fn swap_order(self) -> Self;
}

/// Block width usable for the truncated low-byte transfer
pub trait LowBlock: Block {}

impl Block for [u8; 1] {
    const WIDTH: usize = 1;

    #[inline]
    fn swap_order(self) -> Self {
        self
    }
}

impl Block for [u8; 2] {
    const WIDTH: usize = 2;

    #[inline]
    fn swap_order(self) -> Self {
        bswap16(u16::from_ne_bytes(self)).to_ne_bytes()
    }
}

impl Block for [u8; 4] {
    const WIDTH: usize = 4;

    #[inline]
    fn swap_order(self) -> Self {
        bswap32(u32::from_ne_bytes(self)).to_ne_bytes()
    }
}

impl Block for [u8; 8] {
    const WIDTH: usize = 8;

    #[inline]
    fn swap_order(self) -> Self {
        bswap64(u64::from_ne_bytes(self)).to_ne_bytes()
    }
}

impl Block for [u8; 16] {
    const WIDTH: usize = 16;

    // Two 64-bit halves, each reversed, exchanged.
    #[inline]
    fn swap_order(self) -> Self {
        let [low, high]: [[u8; 8]; 2] = bytemuck::cast(self);
        bytemuck::cast([high.swap_order(), low.swap_order()])
    }
}

impl LowBlock for [u8; 1] {}
impl LowBlock for [u8; 2] {}
impl LowBlock for [u8; 4] {}

/// Write one block given in host layout `H`.
#[inline]
pub fn write_block<H, B, S>(sink: &mut S, block: B)
where
    H: HostOrder,
    B: Block,
    S: Sink + ?Sized,
{
    if wire_safe::<H>(B::WIDTH) {
        sink.write(block.as_ref());
    } else {
        sink.write(block.swap_order().as_ref());
    }
}

/// Read one block and return it in host layout `H`.
///
/// Nothing is produced when fewer than `B::WIDTH` bytes remain.
#[inline]
pub fn read_block<H, B, R>(source: &mut R) -> Result<B>
where
    H: HostOrder,
    B: Block,
    R: Source + ?Sized,
{
    let mut block = B::default();
    if !source.read(block.as_mut()) {
        trace!(width = B::WIDTH, "source exhausted reading block");
        return Err(Error::InsufficientData { needed: B::WIDTH });
    }

    if wire_safe::<H>(B::WIDTH) {
        Ok(block)
    } else {
        Ok(block.swap_order())
    }
}

/// Write the `B::WIDTH` lowest-order bytes of a wider scalar.
///
/// On a little-endian host they lead the host layout; on a big-endian host
/// they trail it and are reversed on the way out.
pub fn write_low_bytes<H, B, T, S>(sink: &mut S, value: T)
where
    H: HostOrder,
    B: LowBlock,
    T: Scalar,
    S: Sink + ?Sized,
{
    const { assert!(B::WIDTH <= size_of::<T>(), "low-byte width exceeds value width") };

    let host = value.to_host_bytes::<H>();
    let host = host.as_ref();
    let start = if H::LITTLE { 0 } else { host.len() - B::WIDTH };

    let mut block = B::default();
    block
        .as_mut()
        .copy_from_slice(&host[start..start + B::WIDTH]);
    write_block::<H, B, S>(sink, block);
}

/// Read `B::WIDTH` wire bytes into the low-order end of `out`.
///
/// The remaining high-order bytes of `out` keep their previous contents.
pub fn read_low_bytes<H, B, T, R>(source: &mut R, out: &mut T) -> Result<()>
where
    H: HostOrder,
    B: LowBlock,
    T: Scalar,
    R: Source + ?Sized,
{
    const { assert!(B::WIDTH <= size_of::<T>(), "low-byte width exceeds value width") };

    let block = read_block::<H, B, R>(source)?;

    let mut host = out.to_host_bytes::<H>();
    let len = host.as_ref().len();
    let start = if H::LITTLE { 0 } else { len - B::WIDTH };
    host.as_mut()[start..start + B::WIDTH].copy_from_slice(block.as_ref());

    *out = T::from_host_bytes::<H>(host);
    Ok(())
}
