use core::fmt;

#[cfg(feature = "std")]
extern crate std;

/// Number of low bits of a match token holding the length, unless configured otherwise
pub const DEFAULT_LENGTH_BITS: u8 = 5;

/// Errors from constructing [Params]
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParamsError {
    /// `length_bits` must be in the range 2..=8
    LengthBitsOutOfRange(u8),
}
impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::LengthBitsOutOfRange(bits) => {
                write!(f, "length bits {} out of range (must be 2..=8)", bits)
            }
        }
    }
}
#[cfg(feature = "std")]
impl std::error::Error for ParamsError {}

/// How a 16-bit match token is split between offset and length
///
/// The low `length_bits` bits hold the match length, the remaining
/// `16 - length_bits` high bits hold the offset. Both sides of the codec
/// must agree on the split; nothing in the compressed stream records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Params {
    length_bits: u8,
}
impl Params {
    /// 11 offset bits, 5 length bits
    pub const DEFAULT: Params = Params {
        length_bits: DEFAULT_LENGTH_BITS,
    };

    /// Validate a bit-width split
    pub const fn new(length_bits: u8) -> Result<Self, ParamsError> {
        if length_bits < 2 || length_bits > 8 {
            return Err(ParamsError::LengthBitsOutOfRange(length_bits));
        }
        Ok(Self { length_bits })
    }

    /// Low bits of a match token holding the length
    pub const fn length_bits(&self) -> u32 {
        self.length_bits as u32
    }

    /// High bits of a match token holding the offset
    pub const fn offset_bits(&self) -> u32 {
        16 - self.length_bits as u32
    }

    /// Largest distance a match may reach back
    pub const fn window_size(&self) -> usize {
        (1 << self.offset_bits()) - 1
    }

    /// Longest match that can be encoded
    ///
    /// This doubles as the mask selecting the length out of a packed token.
    pub const fn max_match_len(&self) -> usize {
        (1 << self.length_bits()) - 1
    }
}
impl Default for Params {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Worst-case compressed size of `len` input bytes
///
/// No token takes more output bytes than input bytes it covers, and every
/// (up to) 8 tokens share one tag byte.
pub const fn compress_bound(len: usize) -> usize {
    len + (len + 7) / 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_split() {
        let p = Params::default();
        assert_eq!(p, Params::DEFAULT);
        assert_eq!(p.length_bits(), 5);
        assert_eq!(p.offset_bits(), 11);
        assert_eq!(p.window_size(), 2047);
        assert_eq!(p.max_match_len(), 31);
    }

    #[test]
    fn test_extreme_splits() {
        let p = Params::new(2).unwrap();
        assert_eq!(p.window_size(), 16383);
        assert_eq!(p.max_match_len(), 3);

        let p = Params::new(8).unwrap();
        assert_eq!(p.window_size(), 255);
        assert_eq!(p.max_match_len(), 255);
    }

    #[test]
    fn test_invalid_splits() {
        for bits in [0, 1, 9, 16, 255] {
            assert_eq!(
                Params::new(bits),
                Err(ParamsError::LengthBitsOutOfRange(bits))
            );
        }
    }

    #[test]
    fn test_bound() {
        assert_eq!(compress_bound(0), 0);
        assert_eq!(compress_bound(1), 2);
        assert_eq!(compress_bound(8), 9);
        assert_eq!(compress_bound(9), 11);
    }
}
