// datagen.rs: synthetic sample generator with tunable compressibility.
//
// Output alternates literal runs drawn from a skewed byte distribution with
// copies of earlier output. `match_proba` is the chance that the next
// segment is a copy, so 0.0 gives nearly incompressible data and values
// near 1.0 give highly repetitive data.

/// Size of the literal distribution table.
const LTSIZE: usize = 8192;

/// Copies reach at most this far back, inside the LZ4 window.
const MAX_COPY_DISTANCE: u32 = 32 * 1024;

/// Default match probability used by the bench harness and benches.
pub const COMPRESSIBILITY_DEFAULT: f64 = 0.5;

/// Deterministic generator; the same seed always produces the same bytes.
pub struct DataGenerator {
    rand_root: u32,
    match_threshold: u32,
    lit_table: Box<[u8; LTSIZE]>,
}

impl DataGenerator {
    /// `match_proba` is clamped to `0.0..=1.0`.
    pub fn new(match_proba: f64, seed: u32) -> Self {
        let p = match_proba.clamp(0.0, 1.0);
        let mut gen = DataGenerator {
            rand_root: seed ^ 0x9E37_79B9,
            match_threshold: (p * u32::MAX as f64) as u32,
            lit_table: Box::new([0u8; LTSIZE]),
        };
        gen.fill_lit_table();
        gen
    }

    /// 32-bit mixer: multiply, xor, rotate.
    #[inline]
    fn next(&mut self) -> u32 {
        const PRIME1: u32 = 2_654_435_761;
        const PRIME2: u32 = 2_246_822_519;
        let mut r = self.rand_root;
        r = r.wrapping_mul(PRIME1);
        r ^= PRIME2;
        r = r.rotate_left(13);
        self.rand_root = r;
        r
    }

    #[inline]
    fn below(&mut self, range: u32) -> u32 {
        ((self.next() as u64 * range as u64) >> 32) as u32
    }

    /// Printable bytes, each getting a share that halves as we move away
    /// from the first one, so low characters dominate.
    fn fill_lit_table(&mut self) {
        let mut pos = 0usize;
        let mut ch = b'0';
        let mut share = LTSIZE / 2;
        while pos < LTSIZE {
            let n = share.max(1).min(LTSIZE - pos);
            self.lit_table[pos..pos + n].fill(ch);
            pos += n;
            share /= 2;
            ch = if ch == b'~' { b'0' } else { ch + 1 };
        }
    }

    /// Fill `buf` entirely.
    pub fn fill(&mut self, buf: &mut [u8]) {
        let mut pos = 0usize;
        while pos < buf.len() {
            let want_copy = pos > 0 && self.next() < self.match_threshold;
            if want_copy {
                let len = (self.below(30) + 4) as usize;
                let len = len.min(buf.len() - pos);
                let max_dist = (pos as u32).min(MAX_COPY_DISTANCE);
                let dist = self.below(max_dist) as usize + 1;
                // Byte by byte so overlapping copies repeat the pattern.
                for i in 0..len {
                    buf[pos + i] = buf[pos + i - dist];
                }
                pos += len;
            } else {
                let len = ((self.below(16) + 1) as usize).min(buf.len() - pos);
                for b in &mut buf[pos..pos + len] {
                    *b = self.lit_table[self.below(LTSIZE as u32) as usize];
                }
                pos += len;
            }
        }
    }
}

/// `size` bytes of synthetic data with the given match probability.
pub fn gen_buffer(size: usize, match_proba: f64, seed: u32) -> Vec<u8> {
    let mut buf = vec![0u8; size];
    DataGenerator::new(match_proba, seed).fill(&mut buf);
    buf
}
