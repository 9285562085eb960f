use crate::params::Params;

/// One unit of the compressed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(u8),
    /// Copy `len` bytes starting `offset` bytes back in the output
    Match { offset: usize, len: usize },
}
impl Token {
    /// How many uncompressed bytes this token stands for
    pub(crate) fn consumed(&self) -> usize {
        match *self {
            Token::Literal(_) => 1,
            Token::Match { len, .. } => len,
        }
    }
}

impl Params {
    /// Pack a match into its 16-bit big-endian form
    pub(crate) fn pack_match(&self, offset: usize, len: usize) -> [u8; 2] {
        debug_assert!(offset >= 1 && offset <= self.window_size());
        debug_assert!(len >= 2 && len <= self.max_match_len());

        let v = (offset << self.length_bits()) | (len & self.max_match_len());
        (v as u16).to_be_bytes()
    }

    /// Split a 16-bit big-endian match into `(offset, len)`
    pub(crate) fn unpack_match(&self, b: [u8; 2]) -> (usize, usize) {
        let v = u16::from_be_bytes(b) as usize;
        (v >> self.length_bits(), v & self.max_match_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_packing() {
        let p = Params::DEFAULT;
        assert_eq!(p.pack_match(2, 4), [0x00, 0x44]);
        assert_eq!(p.pack_match(1, 7), [0x00, 0x27]);
        assert_eq!(p.pack_match(2047, 31), [0xff, 0xff]);
        assert_eq!(p.unpack_match([0x00, 0x44]), (2, 4));
        assert_eq!(p.unpack_match([0xff, 0xff]), (2047, 31));
    }

    #[test]
    fn test_other_packing() {
        let p = Params::new(8).unwrap();
        assert_eq!(p.pack_match(0x12, 0x34), [0x12, 0x34]);

        let p = Params::new(2).unwrap();
        assert_eq!(p.pack_match(1, 3), [0x00, 0x07]);
        assert_eq!(p.pack_match(16383, 2), [0xff, 0xfe]);
        assert_eq!(p.unpack_match([0xff, 0xfe]), (16383, 2));
    }

    #[test]
    fn test_consumed() {
        assert_eq!(Token::Literal(b'x').consumed(), 1);
        assert_eq!(Token::Match { offset: 3, len: 9 }.consumed(), 9);
    }
}
