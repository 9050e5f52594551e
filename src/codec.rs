use alloc::string::ToString;
use core::{convert::TryFrom, fmt, str::FromStr};

use crate::error::{Error, Result};

/// The content codecs a CID can tag its payload with.
///
/// This is the block-format subset of the
/// [multicodec table](https://github.com/multiformats/multicodec). Codes
/// and names are fixed at compile time; there is no runtime registration.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-codec", derive(serde::Deserialize, serde::Serialize))]
pub enum Codec {
  /// Raw binary
  Raw,
  /// CBOR
  Cbor,
  /// MerkleDAG protobuf
  DagProtobuf,
  /// MerkleDAG cbor
  DagCbor,
  /// Libp2p public key
  Libp2pKey,
  /// Ethereum block
  EthereumBlock,
  /// Ethereum block transaction list
  EthereumTxList,
  /// Bitcoin block
  BitcoinBlock,
  /// Bitcoin transaction
  BitcoinTx,
  /// Zcash block
  ZcashBlock,
  /// Zcash transaction
  ZcashTx,
}

/// Every codec in the registry.
pub(crate) const CODECS: [Codec; 11] = [
  Codec::Raw,
  Codec::Cbor,
  Codec::DagProtobuf,
  Codec::DagCbor,
  Codec::Libp2pKey,
  Codec::EthereumBlock,
  Codec::EthereumTxList,
  Codec::BitcoinBlock,
  Codec::BitcoinTx,
  Codec::ZcashBlock,
  Codec::ZcashTx,
];

impl Codec {
  /// The numeric code from the multicodec table.
  pub const fn code(self) -> u64 {
    match self {
      Self::Raw => 0x55,
      Self::Cbor => 0x51,
      Self::DagProtobuf => 0x70,
      Self::DagCbor => 0x71,
      Self::Libp2pKey => 0x72,
      Self::EthereumBlock => 0x90,
      Self::EthereumTxList => 0x91,
      Self::BitcoinBlock => 0xb0,
      Self::BitcoinTx => 0xb1,
      Self::ZcashBlock => 0xc0,
      Self::ZcashTx => 0xc1,
    }
  }

  /// The name from the multicodec table.
  pub const fn name(self) -> &'static str {
    match self {
      Self::Raw => "raw",
      Self::Cbor => "cbor",
      Self::DagProtobuf => "dag-pb",
      Self::DagCbor => "dag-cbor",
      Self::Libp2pKey => "libp2p-key",
      Self::EthereumBlock => "eth-block",
      Self::EthereumTxList => "eth-block-list",
      Self::BitcoinBlock => "bitcoin-block",
      Self::BitcoinTx => "bitcoin-tx",
      Self::ZcashBlock => "zcash-block",
      Self::ZcashTx => "zcash-tx",
    }
  }

  /// Look up a codec by its numeric code. Lookup is exact.
  pub fn from_code(code: u64) -> Result<Self> {
    match code {
      0x55 => Ok(Self::Raw),
      0x51 => Ok(Self::Cbor),
      0x70 => Ok(Self::DagProtobuf),
      0x71 => Ok(Self::DagCbor),
      0x72 => Ok(Self::Libp2pKey),
      0x90 => Ok(Self::EthereumBlock),
      0x91 => Ok(Self::EthereumTxList),
      0xb0 => Ok(Self::BitcoinBlock),
      0xb1 => Ok(Self::BitcoinTx),
      0xc0 => Ok(Self::ZcashBlock),
      0xc1 => Ok(Self::ZcashTx),
      _ => Err(Error::UnknownCodec(code)),
    }
  }

  /// Look up a codec by its multicodec name. Lookup is exact, with no
  /// normalization or partial matching.
  pub fn from_name(name: &str) -> Result<Self> {
    match name {
      "raw" => Ok(Self::Raw),
      "cbor" => Ok(Self::Cbor),
      "dag-pb" => Ok(Self::DagProtobuf),
      "dag-cbor" => Ok(Self::DagCbor),
      "libp2p-key" => Ok(Self::Libp2pKey),
      "eth-block" => Ok(Self::EthereumBlock),
      "eth-block-list" => Ok(Self::EthereumTxList),
      "bitcoin-block" => Ok(Self::BitcoinBlock),
      "bitcoin-tx" => Ok(Self::BitcoinTx),
      "zcash-block" => Ok(Self::ZcashBlock),
      "zcash-tx" => Ok(Self::ZcashTx),
      _ => Err(Error::UnknownCodecName(name.to_string())),
    }
  }
}

impl From<Codec> for u64 {
  fn from(codec: Codec) -> Self {
    codec.code()
  }
}

impl TryFrom<u64> for Codec {
  type Error = Error;

  fn try_from(code: u64) -> Result<Self> {
    Self::from_code(code)
  }
}

impl FromStr for Codec {
  type Err = Error;

  fn from_str(name: &str) -> Result<Self> {
    Self::from_name(name)
  }
}

impl fmt::Display for Codec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
