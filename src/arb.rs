use alloc::vec::Vec;

use multihash::MultihashGeneric as Multihash;
use quickcheck::{Arbitrary, Gen};

use crate::cid::Cid;
use crate::codec::{Codec, CODECS};
use crate::version::Version;

/// The sha2-256 multicodec code.
const SHA2_256: u64 = 0x12;

impl Arbitrary for Version {
  fn arbitrary(g: &mut Gen) -> Self {
    if bool::arbitrary(g) {
      Version::V1
    } else {
      Version::V0
    }
  }
}

impl Arbitrary for Codec {
  fn arbitrary(g: &mut Gen) -> Self {
    *g.choose(&CODECS).expect("the registry is not empty")
  }
}

impl<const S: usize> Arbitrary for Cid<S> {
  fn arbitrary(g: &mut Gen) -> Self {
    // digests are random bytes rather than real hashes; the value layer
    // does not care
    if S >= 32 && Version::arbitrary(g) == Version::V0 {
      let digest: Vec<u8> = (0..32).map(|_| u8::arbitrary(g)).collect();
      let hash = Multihash::wrap(SHA2_256, &digest).expect("32 bytes fit");
      Cid::new_v0(hash)
    } else {
      let code = u64::from(u16::arbitrary(g));
      let len = usize::arbitrary(g) % (S + 1);
      let digest: Vec<u8> = (0..len).map(|_| u8::arbitrary(g)).collect();
      let hash = Multihash::wrap(code, &digest).expect("digest fits");
      Cid::new_v1(Codec::arbitrary(g), hash)
    }
  }
}
