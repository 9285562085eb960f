//! Small LZ77 codec
//!
//! The compressed stream is a sequence of groups. Each group starts with a
//! tag byte, followed by up to 8 tokens. Bit `i` of the tag is set if token
//! `i` is a literal (1 byte, copied verbatim) and clear if it is a match
//! (2 bytes, big-endian, offset in the high bits and length in the low
//! [Params::length_bits] bits). There is no header: the caller keeps track
//! of lengths and of which [Params] were used.
//!
//! Neither direction allocates. Both write into a caller-provided buffer and
//! return the size the output *would* have had, even when the buffer is too
//! small, so a call with an empty buffer can be used to size the real one.

#![no_std]

mod compress;
mod decompress;
mod params;
mod token;
mod util;

#[cfg(feature = "alloc")]
pub use compress::compress_to_vec;
pub use compress::{compress, compress_to_buf, CompressError};
#[cfg(feature = "alloc")]
pub use decompress::decompress_to_vec;
pub use decompress::{decompress, decompress_to_buf, DecompressError};
pub use params::{compress_bound, Params, ParamsError, DEFAULT_LENGTH_BITS};
