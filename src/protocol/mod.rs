//! lewire codec core
//!
//! This module provides the byte-order primitives, block and bulk transfer,
//! and the type-directed dispatcher built on them.

mod block;
mod bulk;
mod codec;
mod config;
mod endian;
mod error;
mod scalar;
mod wire;

pub use block::{Block, LowBlock, read_block, read_low_bytes, write_block, write_low_bytes};
pub use bulk::{read_bulk, write_bulk};
pub use codec::{Codec, decode, decode_from, decode_with, encode, encode_into, encoded_size};
pub use config::DecodeConfig;
pub use endian::{
    BigHost, HostOrder, IS_SYSTEM_LITTLE_ENDIAN, LittleHost, Native, bswap16, bswap32, bswap64,
    bulk_safe, swap_endian, wire_safe,
};
pub use error::{Error, Result};
pub use scalar::Scalar;
pub use wire::{Wire, read_slice, slice_encoded_size, write_slice};

/// Length prefix size in bytes (u64 element count)
pub const LENGTH_PREFIX_SIZE: usize = 8;
