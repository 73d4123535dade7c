//! Host byte-order facts and byte reversal primitives
//!
//! The wire is always little-endian. Everything above this module asks one
//! question, [`wire_safe`], and the answer is a constant the compiler folds
//! away.

use bytemuck::Pod;

#[cfg(not(any(target_endian = "little", target_endian = "big")))]
compile_error!("lewire supports only little-endian and big-endian targets");

/// Whether the compilation target stores integers little-endian
pub const IS_SYSTEM_LITTLE_ENDIAN: bool = cfg!(target_endian = "little");

/// Byte order of the host whose memory layout a value is taken from.
///
/// [`Native`] is the real target. [`LittleHost`] and [`BigHost`] let a
/// single machine exercise both swap paths.
pub trait HostOrder: 'static {
    /// Host stores multi-byte scalars little-endian
    const LITTLE: bool;

    /// Host layout matches the real memory layout of the target, so slices
    /// of scalars may be viewed as raw bytes.
    const NATIVE_LAYOUT: bool = Self::LITTLE == IS_SYSTEM_LITTLE_ENDIAN;
}

/// Byte order of the compilation target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Native;

/// Simulated little-endian host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LittleHost;

/// Simulated big-endian host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BigHost;

impl HostOrder for Native {
    const LITTLE: bool = IS_SYSTEM_LITTLE_ENDIAN;
}

impl HostOrder for LittleHost {
    const LITTLE: bool = true;
}

impl HostOrder for BigHost {
    const LITTLE: bool = false;
}

/// A block of `width` bytes in host layout `H` is already in wire order.
#[must_use]
#[inline]
pub const fn wire_safe<H: HostOrder>(width: usize) -> bool {
    width == 1 || H::LITTLE
}

/// A contiguous run of `width`-byte scalars in real memory can be copied to
/// the wire verbatim.
///
/// Stricter than [`wire_safe`]: a simulated host must also agree with the
/// real memory layout before its slices are reinterpreted as bytes.
#[must_use]
#[inline]
pub const fn bulk_safe<H: HostOrder>(width: usize) -> bool {
    width == 1 || (H::LITTLE && H::NATIVE_LAYOUT)
}

/// Reverse a 16-bit value
#[must_use]
#[inline]
pub const fn bswap16(raw: u16) -> u16 {
    raw.swap_bytes()
}

/// Reverse a 32-bit value
#[must_use]
#[inline]
pub const fn bswap32(raw: u32) -> u32 {
    raw.swap_bytes()
}

/// Reverse a 64-bit value
#[must_use]
#[inline]
pub const fn bswap64(raw: u64) -> u64 {
    raw.swap_bytes()
}

/// Reverse the byte representation of any plain-old-data value.
///
/// Fallback for widths without a dedicated instruction.
#[must_use]
pub fn swap_endian<T: Pod>(value: T) -> T {
    let mut out = value;
    bytemuck::bytes_of_mut(&mut out).reverse();
    out
}
