//! Domain logic: the canonical byte layout and its derived digests.

mod codec;

pub use codec::BlockCodec;
