//! lewire - endian-aware binary read/write primitives
//!
//! This library is the lowest layer of a type-directed serialization codec.
//! It writes every value in a fixed little-endian wire order regardless of
//! the host, picks between bulk copies and element-wise recursion from
//! static type information alone, and validates length prefixes before
//! sizing any destination.
//!
//! # Quick Start
//!
//! ```rust
//! use lewire::{decode, encode, encoded_size};
//!
//! let value = (7u32, String::from("hello"), vec![1.5f64, 2.5]);
//!
//! let bytes = encode(&value);
//! assert_eq!(bytes.len(), encoded_size(&value));
//!
//! let decoded: (u32, String, Vec<f64>) = decode(&bytes)?;
//! assert_eq!(decoded, value);
//! # Ok::<(), lewire::Error>(())
//! ```
//!
//! # Features
//!
//! - **Host-independent output** - byte swaps only where the host differs
//!   from the wire, resolved at compile time
//! - **Zero-copy fast path** - contiguous runs of scalars move as one block
//! - **Hardened decoding** - forged length prefixes are rejected before
//!   any allocation
//! - **Simulated hosts** - [`Codec<BigHost>`](Codec) exercises big-endian
//!   paths on any machine
//!
//! # Wire Format
//!
//! Multi-byte scalars and length prefixes are little-endian. A dynamic
//! container is an 8-byte element count followed by its elements.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]

pub mod buffer;
pub mod protocol;

pub use buffer::{Sink, SliceReader, Source, StreamReader};
pub use protocol::{
    BigHost, Codec, DecodeConfig, Error, HostOrder, LENGTH_PREFIX_SIZE, LittleHost, Native,
    Result, Wire, decode, decode_from, decode_with, encode, encode_into, encoded_size,
};

/// lewire wire format version
pub const VERSION: &str = "1.0.0";
