use core::fmt;

use log::{debug, trace};

use crate::params::Params;
use crate::util::*;

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Decompression errors
///
/// These are only reported by the checked variants. [Params::decompress]
/// itself never fails and handles the same conditions on a best-effort basis.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecompressError {
    InputTruncated,
    InvalidBackreference,
    OutputTooSmall { needed: usize },
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompressError::InputTruncated => write!(f, "input was truncated"),
            DecompressError::InvalidBackreference => write!(f, "invalid backreference"),
            DecompressError::OutputTooSmall { needed } => {
                write!(f, "output buffer was insufficient ({} bytes needed)", needed)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecompressError {}

/// Where the decompressor is within a group of 8 tokens
#[derive(Debug, Clone, Copy)]
enum GroupState {
    AwaitingTag,
    Reading { tag: u8, slot: u32 },
}

/// Anything odd seen during a pass
#[derive(Debug, Default)]
struct Faults {
    truncated: bool,
    invalid_backref: bool,
}

impl Params {
    fn decompress_impl(&self, inp: &[u8], outp: &mut BufOutput) -> Faults {
        let mut faults = Faults::default();
        let mut state = GroupState::AwaitingTag;
        let mut cur = 0;

        while cur < inp.len() {
            let (tag, slot) = match state {
                GroupState::AwaitingTag => {
                    let tag = inp[cur];
                    cur += 1;
                    (tag, 0)
                }
                GroupState::Reading { tag, slot } => (tag, slot),
            };

            if tag & (1 << slot) != 0 {
                match inp.get(cur) {
                    Some(&c) => outp.putc(c),
                    None => {
                        // still counted, like any other byte that doesn't fit
                        faults.truncated = true;
                        outp.pos += 1;
                    }
                }
                cur += 1;
            } else if let Some(&[h, l]) = inp.get(cur..cur + 2) {
                cur += 2;
                let (disp, len) = self.unpack_match([h, l]);
                if !outp.put_backref(disp, len) {
                    debug!(
                        "backreference {} back at output position {} is invalid",
                        disp,
                        outp.pos - len
                    );
                    faults.invalid_backref = true;
                }
            } else {
                debug!("skipping truncated match at input position {}", cur);
                faults.truncated = true;
                cur += 2;
            }

            state = if slot == 7 {
                GroupState::AwaitingTag
            } else {
                GroupState::Reading {
                    tag,
                    slot: slot + 1,
                }
            };
        }

        faults
    }

    /// Decompress the input into a preallocated buffer
    ///
    /// Returns the size of the complete decompressed output. If that is larger
    /// than `outp`, only the first `outp.len()` bytes were written. Passing an
    /// empty buffer is the intended way to size the destination first.
    ///
    /// Malformed input is not detected: a match cut off by the end of input is
    /// skipped, and a match reaching before the start of the output produces
    /// zeroes. Use [Params::decompress_to_buf] to find out about either.
    pub fn decompress(&self, inp: &[u8], outp: &mut [u8]) -> usize {
        self.decompress_checked(inp, outp).0
    }

    fn decompress_checked(&self, inp: &[u8], outp: &mut [u8]) -> (usize, Faults) {
        let mut outp: BufOutput = outp.into();
        let faults = self.decompress_impl(inp, &mut outp);

        if outp.overflowed() {
            debug!(
                "decompressed size {} exceeds output buffer of {} bytes",
                outp.pos,
                outp.buf.len()
            );
        }
        trace!("decompressed {} bytes into {}", inp.len(), outp.pos);
        (outp.pos, faults)
    }

    /// Decompress the input into a preallocated buffer
    ///
    /// Returns the decompressed size on success, or an error otherwise
    pub fn decompress_to_buf(&self, inp: &[u8], outp: &mut [u8]) -> Result<usize, DecompressError> {
        let avail = outp.len();
        let (needed, faults) = self.decompress_checked(inp, outp);

        if faults.truncated {
            return Err(DecompressError::InputTruncated);
        }
        if faults.invalid_backref {
            return Err(DecompressError::InvalidBackreference);
        }
        if needed > avail {
            return Err(DecompressError::OutputTooSmall { needed });
        }
        Ok(needed)
    }

    #[cfg(feature = "alloc")]
    /// Decompress the input into a [Vec](alloc::vec::Vec)
    ///
    /// If `capacity_hint` is too small (or missing), decompression runs a
    /// second time into a buffer of the reported size.
    ///
    /// Returns the result on success, or an error otherwise
    pub fn decompress_to_vec(
        &self,
        inp: &[u8],
        capacity_hint: Option<usize>,
    ) -> Result<alloc::vec::Vec<u8>, DecompressError> {
        let mut ret = alloc::vec![0; capacity_hint.unwrap_or(0)];

        let mut needed = match self.decompress_to_buf(inp, &mut ret) {
            Err(DecompressError::OutputTooSmall { needed }) => needed,
            other => other?,
        };
        if needed > ret.len() {
            ret.resize(needed, 0);
            needed = self.decompress_to_buf(inp, &mut ret)?;
        }

        ret.truncate(needed);
        Ok(ret)
    }
}

/// Decompress with the default parameters, see [Params::decompress]
pub fn decompress(inp: &[u8], outp: &mut [u8]) -> usize {
    Params::DEFAULT.decompress(inp, outp)
}

/// Decompress with the default parameters, see [Params::decompress_to_buf]
pub fn decompress_to_buf(inp: &[u8], outp: &mut [u8]) -> Result<usize, DecompressError> {
    Params::DEFAULT.decompress_to_buf(inp, outp)
}

#[cfg(feature = "alloc")]
/// Decompress with the default parameters, see [Params::decompress_to_vec]
pub fn decompress_to_vec(
    inp: &[u8],
    capacity_hint: Option<usize>,
) -> Result<alloc::vec::Vec<u8>, DecompressError> {
    Params::DEFAULT.decompress_to_vec(inp, capacity_hint)
}
