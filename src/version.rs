use core::convert::TryFrom;

use crate::error::{Error, Result};

/// The two leading bytes of a binary version 0 CID, the sha2-256 code
/// followed by the digest length.
const SHA2_256_PREFIX: [u8; 2] = [0x12, 0x20];

/// The version of a CID.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-codec", derive(serde::Deserialize, serde::Serialize))]
pub enum Version {
  /// CID version 0, the legacy format.
  V0,
  /// CID version 1.
  V1,
}

impl Version {
  /// Check if the text has the version 0 shape, a 46 character base58btc
  /// string starting with "Qm".
  pub fn is_v0_str(data: &str) -> bool {
    data.len() == 46 && data.starts_with("Qm")
  }

  /// Check if the bytes have the version 0 shape, a bare sha2-256
  /// multihash.
  pub fn is_v0_binary(data: &[u8]) -> bool {
    data.len() == 34 && data.starts_with(&SHA2_256_PREFIX)
  }
}

impl TryFrom<u64> for Version {
  type Error = Error;

  fn try_from(raw: u64) -> Result<Self> {
    match raw {
      0 => Ok(Self::V0),
      1 => Ok(Self::V1),
      _ => Err(Error::InvalidCidVersion(raw)),
    }
  }
}

impl From<Version> for u64 {
  fn from(version: Version) -> Self {
    match version {
      Version::V0 => 0,
      Version::V1 => 1,
    }
  }
}
