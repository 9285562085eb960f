/// Bounded output cursor
///
/// Every write is checked against the end of `buf`. Writes that don't fit
/// are dropped, but `pos` keeps advancing, so after a pass `pos` is the size
/// the output *would* have had. We guarantee writing all the way up to the limit.
pub(crate) struct BufOutput<'a> {
    pub pos: usize,
    pub buf: &'a mut [u8],
}
impl<'a> From<&'a mut [u8]> for BufOutput<'a> {
    fn from(buf: &'a mut [u8]) -> Self {
        Self { pos: 0, buf }
    }
}
impl<'a> BufOutput<'a> {
    pub fn putc(&mut self, c: u8) {
        if let Some(slot) = self.buf.get_mut(self.pos) {
            *slot = c;
        }
        self.pos += 1;
    }

    pub fn put_buf(&mut self, buf: &[u8]) {
        for &c in buf {
            self.putc(c);
        }
    }

    /// Overwrite an earlier byte (if it made it into the buffer)
    pub fn poke(&mut self, at: usize, c: u8) {
        debug_assert!(at < self.pos);
        if let Some(slot) = self.buf.get_mut(at) {
            *slot = c;
        }
    }

    /// Copy `len` bytes from `disp` bytes back, one at a time
    ///
    /// `len` may exceed `disp`, in which case bytes produced by this very
    /// call are read back again. A `disp` of 0 or one reaching before the
    /// start of the output is invalid; such bytes are filled with 0 and
    /// `false` is returned.
    pub fn put_backref(&mut self, disp: usize, len: usize) -> bool {
        let valid = disp != 0 && disp <= self.pos;

        for _ in 0..len {
            if self.pos < self.buf.len() {
                self.buf[self.pos] = if valid {
                    self.buf[self.pos - disp]
                } else {
                    0
                };
            }
            self.pos += 1;
        }

        valid
    }

    pub fn overflowed(&self) -> bool {
        self.pos > self.buf.len()
    }
}
