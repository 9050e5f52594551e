//! This module contains the main CID type.
//!
//! If you are an application developer you likely won't use the `Cid`
//! which is generic over the digest size. Instead you would use the
//! concrete top-level `Cid` type.
//!
//! As a library author that works with CIDs that should support hashes
//! of any size, you would import the `Cid` type from this module.

use alloc::vec::Vec;
use core::{cmp::Ordering, convert::TryFrom, fmt, hash};

#[cfg(feature = "multibase")]
use alloc::string::String;
#[cfg(feature = "multibase")]
use core::str::FromStr;

#[cfg(feature = "multibase")]
use multibase::Base;
use multihash::MultihashGeneric as Multihash;
use unsigned_varint::encode as varint_encode;

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::varint;
use crate::version::Version;

/// The sha2-256 multicodec code.
const SHA2_256: u64 = 0x12;

/// Representation of a CID.
///
/// The generic is about the allocated size of the multihash.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde-codec", derive(serde::Deserialize, serde::Serialize))]
pub struct Cid<const S: usize> {
  /// The version of CID.
  version: Version,
  /// The codec of CID.
  codec: Codec,
  /// The multihash of CID.
  hash: Multihash<S>,
}

impl<const S: usize> Cid<S> {
  /// Create a new CIDv0.
  ///
  /// The codec of a version 0 CID is dag-pb by convention of the legacy
  /// format.
  pub fn new_v0(hash: Multihash<S>) -> Self {
    Self {
      version: Version::V0,
      codec: Codec::DagProtobuf,
      hash,
    }
  }

  /// Create a new CIDv1.
  pub fn new_v1(codec: Codec, hash: Multihash<S>) -> Self {
    Self {
      version: Version::V1,
      codec,
      hash,
    }
  }

  /// Create a new CID from its parts.
  ///
  /// No validation beyond what the types themselves enforce happens
  /// here; deserialization is the validating path.
  pub fn new(version: Version, codec: Codec, hash: Multihash<S>) -> Self {
    Self {
      version,
      codec,
      hash,
    }
  }

  /// Returns the cid version.
  pub fn version(&self) -> Version {
    self.version
  }

  /// Returns the cid codec.
  pub fn codec(&self) -> Codec {
    self.codec
  }

  /// Returns the cid multihash.
  pub fn hash(&self) -> &Multihash<S> {
    &self.hash
  }

  // Version 0 predates the codec field; whatever the field says, the
  // codec a v0 value encodes and compares as is dag-pb.
  fn effective_codec(&self) -> Codec {
    match self.version {
      Version::V0 => Codec::DagProtobuf,
      Version::V1 => self.codec,
    }
  }

  fn to_bytes_v0(&self) -> Vec<u8> {
    self.hash.to_bytes()
  }

  fn to_bytes_v1(&self) -> Vec<u8> {
    let mut version_buf = varint_encode::u64_buffer();
    let version = varint_encode::u64(self.version.into(), &mut version_buf);

    let mut codec_buf = varint_encode::u64_buffer();
    let codec = varint_encode::u64(self.codec.into(), &mut codec_buf);

    let hash = self.hash.to_bytes();

    let mut bytes = Vec::with_capacity(version.len() + codec.len() + hash.len());
    bytes.extend_from_slice(version);
    bytes.extend_from_slice(codec);
    bytes.extend_from_slice(&hash);
    bytes
  }

  /// Returns the encoded bytes of the `Cid`.
  ///
  /// A version 0 CID is exactly the binary form of its multihash, with
  /// no version or codec prefix.
  pub fn to_bytes(&self) -> Vec<u8> {
    match self.version {
      Version::V0 => self.to_bytes_v0(),
      Version::V1 => self.to_bytes_v1(),
    }
  }

  /// Parse the general versioned byte format: version varint, codec
  /// varint, multihash. Bytes past one whole multihash are ignored.
  fn read_bytes(input: &[u8]) -> Result<Self> {
    let (raw_version, rest) = varint::read_u64(input)?;
    let version = Version::try_from(raw_version)?;
    let (raw_codec, rest) = varint::read_u64(rest)?;
    let codec = Codec::from_code(raw_codec)?;
    let (hash, _) = read_multihash(rest)?;
    Ok(Self {
      version,
      codec,
      hash,
    })
  }

  /// Interpret an untrusted byte string as a CID.
  ///
  /// A 34 byte input with the `0x12 0x20` prefix is the legacy binary
  /// shape and is taken as a bare sha2-256 multihash before any varint
  /// parsing happens; a legacy multihash's first byte would otherwise be
  /// misread as a version varint.
  pub fn cast(data: &[u8]) -> Result<Self> {
    if Version::is_v0_binary(data) {
      let hash = Multihash::wrap(SHA2_256, &data[2..])?;
      return Ok(Self::new_v0(hash));
    }
    Self::read_bytes(data).map_err(|err| match err {
      Error::MalformedVarint
      | Error::TruncatedInput
      | Error::InvalidCidVersion(_)
      | Error::UnknownCodec(_)
      | Error::MalformedMultihash => err,
      _ => Error::InvalidCidBytes(hex::encode(data)),
    })
  }
}

#[cfg(feature = "multibase")]
impl<const S: usize> Cid<S> {
  fn to_string_v0(&self) -> String {
    Base::Base58Btc.encode(self.hash.to_bytes())
  }

  fn to_string_v1(&self) -> String {
    multibase::encode(Base::Base32Lower, self.to_bytes())
  }

  /// Convert CID into a multibase encoded string of the given base.
  ///
  /// Version 0 CIDs have no multibase indicator and only render as
  /// base58btc.
  pub fn to_string_of_base(&self, base: Base) -> Result<String> {
    match self.version {
      Version::V0 => {
        if base == Base::Base58Btc {
          Ok(self.to_string_v0())
        } else {
          Err(Error::InvalidCidV0Base)
        }
      }
      Version::V1 => Ok(multibase::encode(base, self.to_bytes())),
    }
  }
}

/// Read one multihash off the front of `input`, returning it and the
/// remaining bytes. Any failure inside the multihash section is a
/// deserialization failure of the collaborator, whatever its shape.
fn read_multihash<const S: usize>(input: &[u8]) -> Result<(Multihash<S>, &[u8])> {
  let (code, rest) =
    varint::read_u64(input).map_err(|_| Error::MalformedMultihash)?;
  let (size, rest) =
    varint::read_u64(rest).map_err(|_| Error::MalformedMultihash)?;
  if size > S as u64 || (rest.len() as u64) < size {
    return Err(Error::MalformedMultihash);
  }
  let size = size as usize;
  let hash = Multihash::wrap(code, &rest[..size])?;
  Ok((hash, &rest[size..]))
}

impl<const S: usize> PartialEq for Cid<S> {
  fn eq(&self, other: &Self) -> bool {
    self.version == other.version
      && self.effective_codec() == other.effective_codec()
      && self.hash == other.hash
  }
}

impl<const S: usize> Eq for Cid<S> {}

/// A version 0 CID is transparent with respect to the hash it wraps and
/// compares equal to the bare multihash. The comparison is not provided
/// in the other direction.
impl<const S: usize> PartialEq<Multihash<S>> for Cid<S> {
  fn eq(&self, other: &Multihash<S>) -> bool {
    self.version == Version::V0 && self.hash == *other
  }
}

impl<const S: usize> hash::Hash for Cid<S> {
  fn hash<H: hash::Hasher>(&self, state: &mut H) {
    // a version 0 CID hashes exactly like its bare multihash
    match self.version {
      Version::V0 => self.hash.hash(state),
      Version::V1 => {
        self.version.hash(state);
        self.codec.hash(state);
        self.hash.hash(state);
      }
    }
  }
}

impl<const S: usize> PartialOrd for Cid<S> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<const S: usize> Ord for Cid<S> {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .version
      .cmp(&other.version)
      .then_with(|| self.effective_codec().cmp(&other.effective_codec()))
      .then_with(|| self.hash.cmp(&other.hash))
  }
}

#[cfg(feature = "multibase")]
impl<const S: usize> fmt::Display for Cid<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let output = match self.version {
      Version::V0 => self.to_string_v0(),
      Version::V1 => self.to_string_v1(),
    };
    f.write_str(&output)
  }
}

#[cfg(feature = "multibase")]
impl<const S: usize> fmt::Debug for Cid<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if f.alternate() {
      f.debug_struct("Cid")
        .field("version", &self.version)
        .field("codec", &self.codec)
        .field("hash", &self.hash)
        .finish()
    } else {
      write!(f, "Cid({})", self)
    }
  }
}

#[cfg(not(feature = "multibase"))]
impl<const S: usize> fmt::Debug for Cid<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Cid")
      .field("version", &self.version)
      .field("codec", &self.codec)
      .field("hash", &self.hash)
      .finish()
  }
}

#[cfg(feature = "multibase")]
impl<const S: usize> FromStr for Cid<S> {
  type Err = Error;

  fn from_str(cid_str: &str) -> Result<Self> {
    Self::try_from(cid_str)
  }
}

#[cfg(feature = "multibase")]
impl<const S: usize> TryFrom<String> for Cid<S> {
  type Error = Error;

  fn try_from(cid_str: String) -> Result<Self> {
    Self::try_from(cid_str.as_str())
  }
}

#[cfg(feature = "multibase")]
impl<const S: usize> TryFrom<&str> for Cid<S> {
  type Error = Error;

  fn try_from(cid_str: &str) -> Result<Self> {
    static IPFS_DELIMETER: &str = "/ipfs/";

    let hash = match cid_str.find(IPFS_DELIMETER) {
      Some(index) => &cid_str[index + IPFS_DELIMETER.len()..],
      _ => cid_str,
    };

    if hash.len() < 2 {
      return Err(Error::InputTooShort);
    }

    let decoded = if Version::is_v0_str(hash) {
      // The legacy form is a raw base58btc multihash with no multibase
      // indicator, so it never goes through indicator dispatch.
      Base::Base58Btc.decode(hash)?
    } else {
      let (_, decoded) = multibase::decode(hash)?;
      decoded
    };

    Self::cast(&decoded)
  }
}

impl<const S: usize> TryFrom<Vec<u8>> for Cid<S> {
  type Error = Error;

  fn try_from(bytes: Vec<u8>) -> Result<Self> {
    Self::cast(&bytes)
  }
}

impl<const S: usize> TryFrom<&[u8]> for Cid<S> {
  type Error = Error;

  fn try_from(bytes: &[u8]) -> Result<Self> {
    Self::cast(bytes)
  }
}

impl<const S: usize> From<&Cid<S>> for Cid<S> {
  fn from(cid: &Cid<S>) -> Self {
    *cid
  }
}

impl<const S: usize> From<Cid<S>> for Vec<u8> {
  fn from(cid: Cid<S>) -> Self {
    cid.to_bytes()
  }
}

#[cfg(feature = "multibase")]
impl<const S: usize> From<Cid<S>> for String {
  fn from(cid: Cid<S>) -> Self {
    cid.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::string::ToString;
  use multihash::{Code, MultihashDigest};

  const V0_STR: &str = "QmPZ9gcCEpqKTo6aq61g2nXGUhM4iCL3ewB6LDXZCtioEB";

  #[test]
  #[cfg(feature = "multibase")]
  fn valid_strings_round_trip() {
    let examples = [
      "QmPZ9gcCEpqKTo6aq61g2nXGUhM4iCL3ewB6LDXZCtioEB",
      "QmatmE9msSfkKxoffpHwNLNKgwZG8eT9Bud6YoPab52vpy",
      "bafyreigivjmlrue5db7rpwmbonv7oq57hvnp7yzhlsoy3fbwi5jzhwgali",
    ];
    for example in examples.iter() {
      let cid = Cid::<64>::try_from(*example).unwrap();
      assert_eq!(cid.to_string(), *example);
    }
  }

  #[test]
  #[cfg(feature = "multibase")]
  fn empty_string_fails() {
    assert_eq!(Cid::<64>::try_from(""), Err(Error::InputTooShort));
    assert_eq!(Cid::<64>::try_from("Q"), Err(Error::InputTooShort));
  }

  #[test]
  #[cfg(feature = "multibase")]
  fn basic_marshalling() {
    let hash = Code::Sha2_512.digest(b"TEST");
    let cid = Cid::<64>::new_v1(Codec::Raw, hash);

    let data = cid.to_bytes();
    let cast = Cid::<64>::cast(&data).unwrap();
    assert_eq!(cast, cid);
    assert_eq!(cast.version(), Version::V1);
    assert_eq!(cast.codec(), Codec::Raw);
    assert_eq!(cast.hash(), &hash);

    let from_string = Cid::<64>::try_from(cid.to_string().as_str()).unwrap();
    assert_eq!(from_string, cid);
  }

  #[test]
  #[cfg(feature = "multibase")]
  fn version_0_handling() {
    let cid = Cid::<64>::try_from(V0_STR).unwrap();

    assert_eq!(cid.version(), Version::V0);
    assert_eq!(cid.codec(), Codec::DagProtobuf);
    assert_eq!(cid.to_string(), V0_STR);
    // no version or codec prefix on the wire
    assert_eq!(cid.to_bytes(), cid.hash().to_bytes());

    let cast = Cid::<64>::cast(&cid.to_bytes()).unwrap();
    assert_eq!(cast, cid);
  }

  #[test]
  #[cfg(feature = "multibase")]
  fn version_0_broken_string_fails() {
    // 46 characters starting with "Qm", but not valid base58btc
    let invalid = "QmdfTbBqBPQ7VNxZEYEj14VmRuZBkqFbiwReogJgS1zIII";
    assert_eq!(Cid::<64>::try_from(invalid), Err(Error::BadMultibase));
  }

  #[test]
  #[cfg(feature = "multibase")]
  fn ipfs_path_prefix_is_stripped() {
    let bare = Cid::<64>::try_from(V0_STR).unwrap();
    let mut path = String::from("/ipfs/");
    path.push_str(V0_STR);
    let from_path = Cid::<64>::try_from(path.as_str()).unwrap();
    assert_eq!(from_path, bare);
  }

  #[test]
  fn explicit_version_0_prefix() {
    // version 0 through the general varint path is accepted; the value
    // serializes back as a bare multihash
    let hash = Code::Sha2_256.digest(b"beep boop");
    let mut data = alloc::vec![0x00, 0x55];
    data.extend_from_slice(&hash.to_bytes());

    let cid = Cid::<64>::cast(&data).unwrap();
    assert_eq!(cid.version(), Version::V0);
    assert_eq!(cid, Cid::<64>::new_v0(hash));
    assert_eq!(cid.to_bytes(), hash.to_bytes());
  }

  #[test]
  fn cast_rejects_invalid_version() {
    let hash = Code::Sha2_256.digest(b"beep boop");
    let mut data = alloc::vec![0x02, 0x70];
    data.extend_from_slice(&hash.to_bytes());
    assert_eq!(Cid::<64>::cast(&data), Err(Error::InvalidCidVersion(2)));
  }

  #[test]
  fn cast_rejects_unknown_codec() {
    let hash = Code::Sha2_256.digest(b"beep boop");
    let mut data = alloc::vec![0x01, 0x5a];
    data.extend_from_slice(&hash.to_bytes());
    assert_eq!(Cid::<64>::cast(&data), Err(Error::UnknownCodec(0x5a)));
  }

  #[test]
  fn cast_rejects_truncated_input() {
    assert_eq!(Cid::<64>::cast(&[0x01]), Err(Error::TruncatedInput));
    // version and codec parse, the multihash section does not
    assert_eq!(
      Cid::<64>::cast(&[0x01, 0x70, 0x12]),
      Err(Error::MalformedMultihash)
    );
    assert_eq!(
      Cid::<64>::cast(&[0x01, 0x70, 0x12, 0x20, 0xde, 0xad]),
      Err(Error::MalformedMultihash)
    );
  }

  #[test]
  fn cast_rejects_varint_overflow() {
    let mut data = [0xff; 12];
    data[9] = 0x02;
    assert_eq!(Cid::<64>::cast(&data), Err(Error::MalformedVarint));
  }

  #[test]
  fn multihash_bridge_equality() {
    let hash = Code::Sha2_256.digest(b"beep boop");
    let v0 = Cid::<64>::new_v0(hash);
    let v1 = Cid::<64>::new_v1(Codec::DagProtobuf, hash);

    assert_eq!(v0, hash);
    assert_ne!(v1, hash);
    assert_ne!(v0, v1);
  }

  #[test]
  #[cfg(feature = "std")]
  fn version_0_hashes_like_its_multihash() {
    use core::hash::{Hash, Hasher};
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
      let mut hasher = DefaultHasher::new();
      value.hash(&mut hasher);
      hasher.finish()
    }

    let hash = Code::Sha2_256.digest(b"beep boop");
    let v0 = Cid::<64>::new_v0(hash);
    let v1 = Cid::<64>::new_v1(Codec::DagProtobuf, hash);

    assert_eq!(hash_of(&v0), hash_of(&hash));
    assert_ne!(hash_of(&v1), hash_of(&hash));
  }

  #[test]
  #[cfg(feature = "multibase")]
  fn to_string_of_base() {
    let hash = Code::Sha2_256.digest(b"foo");
    let v1 = Cid::<64>::new_v1(Codec::Raw, hash);
    assert_eq!(
      v1.to_string_of_base(Base::Base32Lower).unwrap(),
      v1.to_string()
    );
    assert_eq!(
      v1.to_string_of_base(Base::Base64).unwrap(),
      "mAVUSICwmtGto/8aP+ZtFPB0wQTQTQi1wZIO/oPmKXohiZueu"
    );

    let v0 = Cid::<64>::try_from(V0_STR).unwrap();
    assert_eq!(v0.to_string_of_base(Base::Base58Btc).unwrap(), V0_STR);
    assert_eq!(
      v0.to_string_of_base(Base::Base32Lower),
      Err(Error::InvalidCidV0Base)
    );
  }

  #[test]
  #[cfg(feature = "multibase")]
  fn debug_instance() {
    let cid = Cid::<64>::try_from(
      "bafyreigivjmlrue5db7rpwmbonv7oq57hvnp7yzhlsoy3fbwi5jzhwgali",
    )
    .unwrap();
    assert_eq!(
      format!("{:?}", cid),
      "Cid(bafyreigivjmlrue5db7rpwmbonv7oq57hvnp7yzhlsoy3fbwi5jzhwgali)"
    );
  }

  #[quickcheck]
  fn cast_round_trips(cid: crate::Cid) -> bool {
    Cid::<64>::cast(&cid.to_bytes()) == Ok(cid)
  }

  #[cfg(feature = "multibase")]
  #[quickcheck]
  fn string_round_trips(cid: crate::Cid) -> bool {
    Cid::<64>::try_from(cid.to_string().as_str()) == Ok(cid)
  }

  #[test]
  #[cfg(feature = "serde-codec")]
  fn test_cid_serde() {
    let cid = Cid::<64>::try_from(
      "bafyreigivjmlrue5db7rpwmbonv7oq57hvnp7yzhlsoy3fbwi5jzhwgali",
    )
    .unwrap();
    let json = serde_json::to_string(&cid).unwrap();
    let cid2: Cid<64> = serde_json::from_str(&json).unwrap();
    assert_eq!(cid, cid2);
  }
}
