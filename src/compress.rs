use core::fmt;

use log::{debug, trace};

use crate::params::Params;
use crate::token::Token;
use crate::util::*;

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Compression errors
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompressError {
    /// The output buffer was too small to hold all the output.
    ///
    /// The output that has been written *is* valid, but has been truncated.
    /// `needed` is the size of the complete output.
    OutputTooSmall { needed: usize },
}
impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressError::OutputTooSmall { needed } => {
                write!(f, "output buffer was insufficient ({} bytes needed)", needed)
            }
        }
    }
}
#[cfg(feature = "std")]
impl std::error::Error for CompressError {}

/// Find the longest match for the bytes at `cur`
///
/// Every position in the window is tried, oldest first. Only a strictly
/// longer match replaces the current best, so on a tie the largest offset wins.
fn find_match(params: &Params, inp: &[u8], cur: usize) -> Token {
    let window_start = cur.saturating_sub(params.window_size());
    let max_len = usize::min(params.max_match_len(), inp.len() - cur);
    let lookahead = &inp[cur..cur + max_len];

    let mut best_pos = 0;
    let mut best_len = 0;
    for pos in window_start..cur {
        // the candidate is allowed to run on into the lookahead
        let len = inp[pos..]
            .iter()
            .zip(lookahead.iter())
            .take_while(|(a, b)| a == b)
            .count();
        if len > best_len {
            best_len = len;
            best_pos = pos;
        }
    }

    // a 1-byte match is no cheaper than a literal
    if best_len < 2 {
        Token::Literal(inp[cur])
    } else {
        Token::Match {
            offset: cur - best_pos,
            len: best_len,
        }
    }
}

/// Where the compressor is within a group of 8 tokens
#[derive(Debug, Clone, Copy)]
enum GroupState {
    /// A tag byte has to be reserved before the next token
    AwaitingTag,
    /// The tag byte lives at `tag_pos`; `tag` holds the literal bits so far
    Filling { tag_pos: usize, tag: u8, slot: u32 },
}

impl Params {
    fn compress_impl(&self, inp: &[u8], outp: &mut BufOutput) {
        let mut state = GroupState::AwaitingTag;
        let mut cur = 0;

        while cur < inp.len() {
            let (tag_pos, mut tag, slot) = match state {
                GroupState::AwaitingTag => {
                    let tag_pos = outp.pos;
                    outp.putc(0);
                    (tag_pos, 0, 0)
                }
                GroupState::Filling { tag_pos, tag, slot } => (tag_pos, tag, slot),
            };

            let token = find_match(self, inp, cur);
            match token {
                Token::Literal(c) => {
                    outp.putc(c);
                    tag |= 1 << slot;
                    outp.poke(tag_pos, tag);
                }
                Token::Match { offset, len } => {
                    outp.put_buf(&self.pack_match(offset, len));
                }
            }
            cur += token.consumed();

            state = if slot == 7 {
                GroupState::AwaitingTag
            } else {
                GroupState::Filling {
                    tag_pos,
                    tag,
                    slot: slot + 1,
                }
            };
        }
    }

    /// Compress the input into a preallocated buffer
    ///
    /// Returns the size of the complete compressed output. If that is larger
    /// than `outp`, only the first `outp.len()` bytes were written. Passing an
    /// empty buffer is the intended way to size the destination first.
    pub fn compress(&self, inp: &[u8], outp: &mut [u8]) -> usize {
        let mut outp: BufOutput = outp.into();
        self.compress_impl(inp, &mut outp);

        if outp.overflowed() {
            debug!(
                "compressed size {} exceeds output buffer of {} bytes",
                outp.pos,
                outp.buf.len()
            );
        }
        trace!("compressed {} bytes into {}", inp.len(), outp.pos);
        outp.pos
    }

    /// Compress the input into a preallocated buffer
    ///
    /// Returns the compressed size on success, or an error otherwise
    pub fn compress_to_buf(&self, inp: &[u8], outp: &mut [u8]) -> Result<usize, CompressError> {
        let avail = outp.len();
        let needed = self.compress(inp, outp);
        if needed > avail {
            Err(CompressError::OutputTooSmall { needed })
        } else {
            Ok(needed)
        }
    }

    #[cfg(feature = "alloc")]
    /// Compress the input into a [Vec](alloc::vec::Vec) of exactly the right size
    pub fn compress_to_vec(&self, inp: &[u8]) -> alloc::vec::Vec<u8> {
        let needed = self.compress(inp, &mut []);
        let mut ret = alloc::vec![0; needed];
        let len = self.compress(inp, &mut ret);
        debug_assert_eq!(len, needed);
        ret
    }
}

/// Compress with the default parameters, see [Params::compress]
pub fn compress(inp: &[u8], outp: &mut [u8]) -> usize {
    Params::DEFAULT.compress(inp, outp)
}

/// Compress with the default parameters, see [Params::compress_to_buf]
pub fn compress_to_buf(inp: &[u8], outp: &mut [u8]) -> Result<usize, CompressError> {
    Params::DEFAULT.compress_to_buf(inp, outp)
}

#[cfg(feature = "alloc")]
/// Compress with the default parameters, see [Params::compress_to_vec]
pub fn compress_to_vec(inp: &[u8]) -> alloc::vec::Vec<u8> {
    Params::DEFAULT.compress_to_vec(inp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_match_literal() {
        let p = Params::DEFAULT;
        // nothing to look back at
        assert_eq!(find_match(&p, b"AA", 0), Token::Literal(b'A'));
        // 1-byte match is not worth it
        assert_eq!(find_match(&p, b"ABAC", 2), Token::Literal(b'A'));
        // last byte can't form a 2-byte match
        assert_eq!(find_match(&p, b"ABA", 2), Token::Literal(b'A'));
    }

    #[test]
    fn test_find_match_overlap() {
        let p = Params::DEFAULT;
        assert_eq!(
            find_match(&p, b"AAAAAAAA", 1),
            Token::Match { offset: 1, len: 7 }
        );
        assert_eq!(
            find_match(&p, b"ABABAB", 2),
            Token::Match { offset: 2, len: 4 }
        );
    }

    #[test]
    fn test_find_match_ties() {
        let p = Params::DEFAULT;
        // "AB" at 0 and 3 are equally long, the oldest wins
        assert_eq!(
            find_match(&p, b"ABCABDAB", 6),
            Token::Match { offset: 6, len: 2 }
        );
        // a newer, strictly longer match replaces an older one
        assert_eq!(
            find_match(&p, b"ABXABCABC", 6),
            Token::Match { offset: 3, len: 3 }
        );
    }

    #[test]
    fn test_find_match_caps() {
        let p = Params::DEFAULT;
        let inp = [b'A'; 40];
        assert_eq!(
            find_match(&p, &inp, 1),
            Token::Match { offset: 1, len: 31 }
        );
        // capped by the end of input, every candidate ties
        assert_eq!(
            find_match(&p, &inp, 32),
            Token::Match { offset: 32, len: 8 }
        );
    }

    #[test]
    fn test_empty() {
        let mut out = [0u8; 4];
        assert_eq!(compress(b"", &mut out), 0);
        assert_eq!(compress(b"", &mut []), 0);
        assert_eq!(out, [0; 4]);
    }

    #[test]
    fn test_single_literal() {
        let mut out = [0u8; 2];
        let len = compress(b"A", &mut out);
        assert_eq!(len, out.len());
        assert_eq!(out, [0b0000_0001, b'A']);
    }

    #[test]
    fn test_simple_backref() {
        {
            let mut out = [0u8; 5];
            let len = compress(b"ABABAB", &mut out);
            assert_eq!(len, out.len());
            assert_eq!(out, [0b0000_0011, b'A', b'B', 0x00, 0x44]);
        }
        {
            let mut out = [0u8; 4];
            let len = compress(b"AAAAAAAA", &mut out);
            assert_eq!(len, out.len());
            assert_eq!(out, [0b0000_0001, b'A', 0x00, 0x27]);
        }
        {
            // longer than one match can hold
            let mut out = [0u8; 6];
            let len = compress(&[b'A'; 40], &mut out);
            assert_eq!(len, out.len());
            assert_eq!(out, [0b0000_0001, b'A', 0x00, 0x3f, 0x04, 0x08]);
        }
    }

    #[test]
    fn test_mixed_tags() {
        let mut out = [0u8; 9];
        let len = compress(b"ABCABDAB", &mut out);
        assert_eq!(len, out.len());
        assert_eq!(
            out,
            [0b0001_0111, b'A', b'B', b'C', 0x00, 0x62, b'D', 0x00, 0xc2]
        );
    }

    #[test]
    fn test_second_group() {
        let mut out = [0u8; 11];
        let len = compress(b"abcdefghi", &mut out);
        assert_eq!(len, out.len());
        assert_eq!(
            out,
            [0xff, b'a', b'b', b'c', b'd', b'e', b'f', b'g', b'h', 0x01, b'i']
        );
    }

    #[test]
    fn test_overflow_keeps_counting() {
        {
            let mut out = [0u8; 4];
            let err = compress_to_buf(b"ABABAB", &mut out).expect_err("");
            assert_eq!(err, CompressError::OutputTooSmall { needed: 5 });
            // truncated, but a valid prefix
            assert_eq!(out, [0b0000_0011, b'A', b'B', 0x00]);
        }
        {
            let mut out = [0u8; 1];
            assert_eq!(compress(b"ABABAB", &mut out), 5);
            // tag still patched
            assert_eq!(out, [0b0000_0011]);
        }
        {
            assert_eq!(compress(b"abcdefghi", &mut []), 11);
            assert_eq!(compress(&[b'A'; 40], &mut []), 6);
        }
    }

    #[test]
    fn test_window_limit() {
        let p = Params::new(8).unwrap();
        assert_eq!(p.window_size(), 255);

        // "XY", then every other byte value once, then "XY" again
        let mut inp = [0u8; 258];
        inp[0] = b'X';
        inp[1] = b'Y';
        let mut i = 2;
        for b in 0..=255u8 {
            if b != b'X' && b != b'Y' {
                inp[i] = b;
                i += 1;
            }
        }
        assert_eq!(i, 256);

        {
            // 256 back is not
            inp[256] = b'X';
            inp[257] = b'Y';
            let mut out = [0u8; 291];
            let len = p.compress(&inp, &mut out);
            assert_eq!(len, out.len());
            assert_eq!(out[288..], [0x03, b'X', b'Y']);
        }
        {
            // 255 back is still reachable
            let inp = &mut inp[..257];
            inp[255] = b'X';
            inp[256] = b'Y';
            let mut out = [0u8; 289];
            let len = p.compress(inp, &mut out);
            assert_eq!(len, out.len());
            assert_eq!(out[287..], [0xff, 0x02]);
        }
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_to_vec() {
        assert_eq!(
            compress_to_vec(b"ABABAB"),
            [0b0000_0011, b'A', b'B', 0x00, 0x44]
        );
        assert!(compress_to_vec(b"").is_empty());
    }
}
