//! # ipfs-cid
//!
//! Implementation of [CID](https://github.com/multiformats/cid), the
//! self-describing content identifier used by content-addressed storage.
//!
//! A CID ties together a format version, a multicodec content type and a
//! multihash digest. Two incompatible generations of the format exist:
//! version 0, a bare sha2-256 multihash rendered as base58btc text, and
//! version 1, which prefixes the multihash with varint version and codec
//! fields and renders as multibase text.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod cid;
mod codec;
mod error;
mod varint;
mod version;

#[cfg(any(test, feature = "arb"))]
mod arb;

pub use self::cid::Cid as CidGeneric;
pub use self::codec::Codec;
pub use self::error::{Error, Result};
pub use self::version::Version;

#[cfg(feature = "multibase")]
pub use multibase;
pub use multihash;

/// A CID that contains a multihash with an allocated size of 512 bits.
///
/// This is the same digest size the default multihash code table has.
///
/// If you need a CID that is generic over its digest size, use
/// [`CidGeneric`] instead.
pub type Cid = CidGeneric<64>;
