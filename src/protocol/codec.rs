//! Top-level encode/decode entry points
//!
//! The free functions use the target's own byte order. [`Codec`] carries a
//! host order and a [`DecodeConfig`] for callers that need either.

use std::marker::PhantomData;

use tracing::instrument;

use super::endian::{HostOrder, Native};
use super::{DecodeConfig, Error, Result, Wire};
use crate::buffer::{Sink, SliceReader, Source};

/// Encoder/decoder bound to a host order and decode configuration.
///
/// Holds no buffers and no mutable state; one instance can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct Codec<H: HostOrder = Native> {
    config: DecodeConfig,
    _host: PhantomData<H>,
}

impl<H: HostOrder> Codec<H> {
    /// Codec with the permissive default configuration
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(DecodeConfig::new())
    }

    /// Codec with an explicit decode configuration
    #[must_use]
    pub const fn with_config(config: DecodeConfig) -> Self {
        Self {
            config,
            _host: PhantomData,
        }
    }

    /// Active decode configuration
    #[must_use]
    pub const fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Encode a value into a new, exactly sized buffer.
    #[must_use]
    #[instrument(level = "trace", skip_all)]
    pub fn encode<T: Wire>(&self, value: &T) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(value.encoded_size());
        value.encode::<H, _>(&mut bytes);
        bytes
    }

    /// Append the encoding of a value to an existing sink.
    pub fn encode_into<T: Wire, S: Sink + ?Sized>(&self, value: &T, sink: &mut S) {
        value.encode::<H, S>(sink);
    }

    /// Decode a value from a complete buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The buffer ends before the value does
    /// - A length prefix is implausible or over the configured limit
    /// - A string payload is not UTF-8
    /// - Bytes remain and the configuration disallows trailing data
    #[instrument(level = "trace", skip_all, fields(len = bytes.len()))]
    pub fn decode<T: Wire + Default>(&self, bytes: &[u8]) -> Result<T> {
        let mut reader = SliceReader::new(bytes);
        let value = self.decode_from(&mut reader)?;

        if !self.config.allow_trailing && !reader.is_empty() {
            return Err(Error::TrailingBytes {
                remaining: reader.remaining(),
            });
        }
        Ok(value)
    }

    /// Decode one value from the front of a source.
    ///
    /// The value is returned only if decoding succeeds completely; bytes
    /// consumed before a failure are not given back.
    pub fn decode_from<T: Wire + Default, R: Source + ?Sized>(&self, source: &mut R) -> Result<T> {
        let mut value = T::default();
        value.decode::<H, R>(source, &self.config)?;
        Ok(value)
    }
}

impl<H: HostOrder> Default for Codec<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a value to bytes
///
/// # Format
///
/// ```text
/// scalars and length prefixes: little-endian
/// containers:                  [count: u64] [elements]
/// ```
#[must_use]
pub fn encode<T: Wire>(value: &T) -> Vec<u8> {
    Codec::<Native>::new().encode(value)
}

/// Append the encoding of a value to a sink
pub fn encode_into<T: Wire, S: Sink + ?Sized>(value: &T, sink: &mut S) {
    Codec::<Native>::new().encode_into(value, sink);
}

/// Exact encoded length of a value, computed without a buffer
#[must_use]
pub fn encoded_size<T: Wire>(value: &T) -> usize {
    value.encoded_size()
}

/// Decode a value from bytes, ignoring anything after it
pub fn decode<T: Wire + Default>(bytes: &[u8]) -> Result<T> {
    Codec::<Native>::new().decode(bytes)
}

/// Decode a value from bytes with an explicit configuration
pub fn decode_with<T: Wire + Default>(bytes: &[u8], config: DecodeConfig) -> Result<T> {
    Codec::<Native>::with_config(config).decode(bytes)
}

/// Decode one value from the front of a source
pub fn decode_from<T: Wire + Default, R: Source + ?Sized>(source: &mut R) -> Result<T> {
    Codec::<Native>::new().decode_from(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::endian::{BigHost, LittleHost};
    use bytes::{Bytes, BytesMut};

    #[test]
    fn test_encode_decode_roundtrip() {
        let original = (42u32, String::from("payload"), vec![1.5f64, -2.0]);
        let encoded = encode(&original);
        assert_eq!(encoded.len(), encoded_size(&original));

        let decoded: (u32, String, Vec<f64>) = decode(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_buffer_too_small() {
        let encoded = encode(&vec![7u64; 4]);
        let result: Result<Vec<u64>> = decode(&encoded[..encoded.len() - 1]);
        assert!(matches!(result, Err(Error::InsufficientData { .. })));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut encoded = encode(&5u16);
        encoded.push(0xFF);

        assert_eq!(decode::<u16>(&encoded), Ok(5));

        let strict = DecodeConfig::new().with_allow_trailing(false);
        assert_eq!(
            decode_with::<u16>(&encoded, strict),
            Err(Error::TrailingBytes { remaining: 1 })
        );
    }

    #[test]
    fn test_bytes_sink_and_source() {
        let mut sink = BytesMut::new();
        encode_into(&String::from("frame"), &mut sink);
        encode_into(&9u8, &mut sink);

        let mut source: Bytes = sink.freeze();
        let text: String = decode_from(&mut source).unwrap();
        let tail: u8 = decode_from(&mut source).unwrap();
        assert_eq!(text, "frame");
        assert_eq!(tail, 9);
        assert!(source.is_empty());
    }

    #[test]
    fn test_simulated_hosts_interoperate() {
        let value = vec![(1u16, [0.5f32; 2]), (u16::MAX, [-1.0, 3.25])];

        let big = Codec::<BigHost>::new().encode(&value);
        let little = Codec::<LittleHost>::new().encode(&value);
        assert_eq!(big, little);

        let from_little: Vec<(u16, [f32; 2])> = Codec::<BigHost>::new().decode(&little).unwrap();
        let from_big: Vec<(u16, [f32; 2])> = Codec::<LittleHost>::new().decode(&big).unwrap();
        assert_eq!(from_little, value);
        assert_eq!(from_big, value);
    }

    #[test]
    fn test_large_payload_same_on_every_path() {
        let value: Vec<u32> = (0..16 * 1024u32)
            .map(|i| i.wrapping_mul(0x0101_0101))
            .collect();

        // native may take the bulk path; the simulated hosts cover the
        // byte-swapping and little-endian element paths
        let native = encode(&value);
        assert_eq!(native, Codec::<BigHost>::new().encode(&value));
        assert_eq!(native, Codec::<LittleHost>::new().encode(&value));
        assert_eq!(native.len(), encoded_size(&value));

        let swapped: Vec<u32> = Codec::<BigHost>::new().decode(&native).unwrap();
        assert_eq!(swapped, value);
        assert_eq!(decode::<Vec<u32>>(&native).unwrap(), value);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn roundtrip<H: HostOrder, T>(value: &T) -> (Vec<u8>, T)
        where
            T: Wire + Default,
        {
            let codec = Codec::<H>::new();
            let encoded = codec.encode(value);
            let decoded = codec.decode(&encoded).unwrap();
            (encoded, decoded)
        }

        proptest! {
            /// Property: scalars roundtrip on both simulated hosts with identical bytes
            #[test]
            fn prop_scalars_roundtrip(
                a in any::<u8>(),
                b in any::<i16>(),
                c in any::<u32>(),
                d in any::<i64>(),
                e in any::<u128>(),
                f in any::<bool>(),
            ) {
                let value = (a, b, c, d, e, f);
                let (big, from_big) = roundtrip::<BigHost, _>(&value);
                let (little, from_little) = roundtrip::<LittleHost, _>(&value);

                prop_assert_eq!(&big, &little);
                prop_assert_eq!(big.len(), value.encoded_size());
                prop_assert_eq!(from_big, value);
                prop_assert_eq!(from_little, value);
            }

            /// Property: floats keep their exact bit pattern
            #[test]
            fn prop_float_bits_preserved(bits in any::<u64>(), small in any::<u32>()) {
                let value = (f64::from_bits(bits), f32::from_bits(small));
                let (_, decoded) = roundtrip::<BigHost, _>(&value);

                prop_assert_eq!(decoded.0.to_bits(), bits);
                prop_assert_eq!(decoded.1.to_bits(), small);
            }

            /// Property: containers roundtrip and report their exact size
            #[test]
            fn prop_containers_roundtrip(
                numbers in prop::collection::vec(any::<i32>(), 0..256),
                words in prop::collection::vec(".{0,16}", 0..16),
            ) {
                let value = (numbers, words);
                let (big, from_big) = roundtrip::<BigHost, _>(&value);
                let (little, from_little) = roundtrip::<LittleHost, _>(&value);

                prop_assert_eq!(&big, &little);
                prop_assert_eq!(big.len(), value.encoded_size());
                prop_assert_eq!(&from_big, &value);
                prop_assert_eq!(&from_little, &value);
            }

            /// Property: every strict prefix of an encoding is insufficient data
            #[test]
            fn prop_truncation_detected(
                numbers in prop::collection::vec(any::<u16>(), 0..32),
                word in ".{0,8}",
                cut_ratio in 0.0f64..1.0,
            ) {
                let value = (word, numbers);
                let encoded = encode(&value);
                let cut = (encoded.len() as f64 * cut_ratio) as usize;

                let mut reader = SliceReader::new(&encoded[..cut]);
                let result: Result<(String, Vec<u16>)> = decode_from(&mut reader);

                prop_assert!(result.unwrap_err().is_insufficient_data());
                prop_assert!(reader.position() <= cut);
            }

            /// Property: a forged prefix never succeeds and never allocates past the input
            #[test]
            fn prop_forged_prefix_rejected(count in any::<u64>(), tail in prop::collection::vec(any::<u8>(), 0..64)) {
                prop_assume!((count as usize) > tail.len() / 4 || count > (usize::MAX / 4) as u64);

                let mut bytes = count.to_le_bytes().to_vec();
                bytes.extend_from_slice(&tail);

                let result: Result<Vec<u32>> = decode(&bytes);
                let err = result.unwrap_err();
                prop_assert!(err.is_insufficient_data() || err.is_invalid_length());
            }
        }
    }
}
