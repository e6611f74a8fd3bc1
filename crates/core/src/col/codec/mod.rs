//! The per-type codecs.
//!
//! Each codec writes the ascending form of one semantic value into an
//! [`Encoded`](super::Encoded) block list, and reads the payload of one
//! field back once its tag has been consumed. Descending fields are
//! produced by complementing the finished blocks, and are read through
//! the mask handed to each decoder, so no codec has a descending path.

pub mod boolean;
pub mod bytes;
pub mod date;
mod escape;
pub mod float;
pub mod integer;
pub mod strand;
pub mod version;
