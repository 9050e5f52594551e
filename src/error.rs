use alloc::string::String;
use core::fmt;

/// Type alias to use this library's [`Error`] type in a `Result`.
pub type Result<T> = core::result::Result<T, Error>;

/// The ways parsing or rendering a CID can fail.
///
/// Every parsing failure surfaces as one of these values; none is
/// swallowed or retried.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
  /// CID string is shorter than two characters.
  InputTooShort,
  /// The multibase indicator is unknown or the payload is not valid in
  /// that base.
  BadMultibase,
  /// A varint did not fit into 64 bits.
  MalformedVarint,
  /// The input ended before a varint terminator byte.
  TruncatedInput,
  /// The version field is neither 0 nor 1.
  InvalidCidVersion(u64),
  /// The codec code is not in the registry.
  UnknownCodec(u64),
  /// The codec name is not in the registry.
  UnknownCodecName(String),
  /// The multihash section could not be deserialized.
  MalformedMultihash,
  /// Version 0 CIDs only render as base58btc.
  InvalidCidV0Base,
  /// Catch-all for byte strings that fail to parse as a CID, carrying
  /// the offending input as hex.
  InvalidCidBytes(String),
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InputTooShort => f.write_str("cid too short"),
      Self::BadMultibase => f.write_str("failed to decode multibase"),
      Self::MalformedVarint => f.write_str("varint overflows a u64"),
      Self::TruncatedInput => f.write_str("input ended inside a varint"),
      Self::InvalidCidVersion(raw) => {
        write!(f, "invalid cid version number: {}", raw)
      }
      Self::UnknownCodec(code) => write!(f, "unknown codec code: {:#x}", code),
      Self::UnknownCodecName(name) => write!(f, "unknown codec name: {}", name),
      Self::MalformedMultihash => f.write_str("failed to parse multihash"),
      Self::InvalidCidV0Base => {
        f.write_str("version 0 cids are always base58btc")
      }
      Self::InvalidCidBytes(hex) => write!(f, "invalid cid bytes: {}", hex),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "multibase")]
impl From<multibase::Error> for Error {
  fn from(_: multibase::Error) -> Self {
    Self::BadMultibase
  }
}

impl From<multihash::Error> for Error {
  fn from(_: multihash::Error) -> Self {
    Self::MalformedMultihash
  }
}
