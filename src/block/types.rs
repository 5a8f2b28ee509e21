//! LZ4 block constants, byte readers, hashing and the match-finder window.
//!
//! Everything here is shared by the fast encoder, the streaming context and
//! the HC encoder:
//!   - Format constants (MINMATCH, LASTLITERALS, MFLIMIT, token masks)
//!   - Little-endian readers over slices
//!   - `hash4` / `hash5` and the single-candidate [`HashTable`]
//!   - [`Window`], which addresses an external dictionary and the block being
//!     compressed through one contiguous `u32` index space

use crate::config::LZ4_MEMORY_USAGE;

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum match length encoded in an LZ4 block.
pub const MINMATCH: usize = 4;

/// Last N bytes of a block are always emitted as literals.
pub const LASTLITERALS: usize = 5;

/// No match may start within the last MFLIMIT bytes of a block.
pub const MFLIMIT: usize = 12;

/// Shortest input that can contain a match at all.
pub const LZ4_MIN_LENGTH: usize = MFLIMIT + 1;

pub const KB: usize = 1 << 10;

/// Maximum back-reference distance of the format.
pub const LZ4_DISTANCE_MAX: usize = 65_535;

/// History retained by streaming contexts.
pub const LZ4_DICT_SIZE: usize = 64 * KB;

pub const ML_BITS: u32 = 4;
pub const ML_MASK: usize = (1 << ML_BITS) - 1;
pub const RUN_BITS: u32 = 8 - ML_BITS;
pub const RUN_MASK: usize = (1 << RUN_BITS) - 1;

// ─────────────────────────────────────────────────────────────────────────────
// Hash-table sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Hash log: number of bits kept from each hash value (12 at the default
/// memory usage of 14).
pub const LZ4_HASHLOG: u32 = LZ4_MEMORY_USAGE - 2;
/// Number of u32 entries in the hash table.
pub const LZ4_HASH_SIZE_U32: usize = 1 << LZ4_HASHLOG;

/// One-shot inputs below this size hash 4 bytes instead of 5.
pub const LZ4_64KLIMIT: usize = (64 * KB) + (MFLIMIT - 1);

/// Higher → faster on incompressible data at the cost of compression ratio.
pub const LZ4_SKIP_TRIGGER: u32 = 6;

// ─────────────────────────────────────────────────────────────────────────────
// Byte readers
// ─────────────────────────────────────────────────────────────────────────────

/// Little-endian `u16` at `buf[i..i + 2]`.
#[inline(always)]
pub fn read_u16(buf: &[u8], i: usize) -> u16 {
    u16::from_le_bytes([buf[i], buf[i + 1]])
}

/// Little-endian `u32` at `buf[i..i + 4]`.
#[inline(always)]
pub fn read_u32(buf: &[u8], i: usize) -> u32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&buf[i..i + 4]);
    u32::from_le_bytes(b)
}

/// Little-endian `u64` at `buf[i..i + 8]`.
#[inline(always)]
pub fn read_u64(buf: &[u8], i: usize) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&buf[i..i + 8]);
    u64::from_le_bytes(b)
}

/// Length of the common prefix of `a` and `b`, compared eight bytes at a time.
#[inline]
pub fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    let n = a.len().min(b.len());
    let mut i = 0;
    while i + 8 <= n {
        let diff = read_u64(a, i) ^ read_u64(b, i);
        if diff != 0 {
            return i + (diff.trailing_zeros() >> 3) as usize;
        }
        i += 8;
    }
    while i < n && a[i] == b[i] {
        i += 1;
    }
    i
}

// ─────────────────────────────────────────────────────────────────────────────
// Hashing
// ─────────────────────────────────────────────────────────────────────────────

/// Knuth multiplicative hash of a 4-byte sequence.
#[inline(always)]
pub fn hash4(sequence: u32) -> usize {
    (sequence.wrapping_mul(2_654_435_761) >> (32 - LZ4_HASHLOG)) as usize
}

/// Hash of the low five bytes of a little-endian 8-byte read.
#[inline(always)]
pub fn hash5(sequence: u64) -> usize {
    const PRIME5: u64 = 889_523_592_379;
    ((sequence << 24).wrapping_mul(PRIME5) >> (64 - LZ4_HASHLOG)) as usize
}

/// Which bytes feed the hash. Small one-shot inputs use four, everything
/// else five (and therefore needs 8 readable bytes at the hashed position).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HashKind {
    Four,
    Five,
}

impl HashKind {
    /// Choose the hash for a one-shot input of `len` bytes.
    #[inline]
    pub fn for_input(len: usize) -> Self {
        if len < LZ4_64KLIMIT {
            HashKind::Four
        } else {
            HashKind::Five
        }
    }

    /// Minimum readable bytes at a position to hash it.
    #[inline]
    pub fn unit(self) -> usize {
        match self {
            HashKind::Four => 4,
            HashKind::Five => 8,
        }
    }

    /// Hash the bytes at `buf[i..]`.
    #[inline(always)]
    pub fn at(self, buf: &[u8], i: usize) -> usize {
        match self {
            HashKind::Four => hash4(read_u32(buf, i)),
            HashKind::Five => hash5(read_u64(buf, i)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hash table
// ─────────────────────────────────────────────────────────────────────────────

/// Single-candidate hash table of window indices. Last writer wins; a stored
/// index only promises the same hash, never the same bytes.
#[derive(Clone)]
pub struct HashTable {
    entries: [u32; LZ4_HASH_SIZE_U32],
}

impl HashTable {
    pub const fn new() -> Self {
        Self {
            entries: [0u32; LZ4_HASH_SIZE_U32],
        }
    }

    #[inline(always)]
    pub fn get(&self, h: usize) -> u32 {
        self.entries[h]
    }

    #[inline(always)]
    pub fn put(&mut self, h: usize, index: u32) {
        self.entries[h] = index;
    }

    pub fn clear(&mut self) {
        self.entries.fill(0);
    }

    /// Shift every entry down by `delta`, zeroing the ones that fall below it.
    pub fn rebase(&mut self, delta: u32) {
        for e in self.entries.iter_mut() {
            *e = e.saturating_sub(delta);
        }
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window
// ─────────────────────────────────────────────────────────────────────────────

/// The bytes a match may reference: an optional external dictionary followed
/// by the block being compressed.
///
/// `src[i]` lives at index `base + i`; `dict[j]` lives at
/// `base - dict.len() + j`. The two segments are logically contiguous even
/// though they are separate slices, so a match may start in `dict` and run
/// on into `src`.
#[derive(Clone, Copy)]
pub struct Window<'a> {
    pub dict: &'a [u8],
    pub src: &'a [u8],
    pub base: u32,
}

impl<'a> Window<'a> {
    /// Window over `src` alone, starting at index 0.
    pub fn prefix_only(src: &'a [u8]) -> Self {
        Window {
            dict: &[],
            src,
            base: 0,
        }
    }

    /// Lowest valid index.
    #[inline(always)]
    pub fn low_limit(&self) -> u32 {
        self.base - self.dict.len() as u32
    }

    /// Index of `src[pos]`.
    #[inline(always)]
    pub fn index(&self, pos: usize) -> u32 {
        self.base + pos as u32
    }

    /// Byte at window index `idx`.
    #[inline(always)]
    pub fn byte(&self, idx: u32) -> u8 {
        if idx >= self.base {
            self.src[(idx - self.base) as usize]
        } else {
            self.dict[(idx - self.low_limit()) as usize]
        }
    }

    /// True if the table entry `m` can be a match source for `src[pos]`:
    /// strictly behind it, inside the window, within the offset limit and
    /// with four bytes readable in its own segment.
    #[inline(always)]
    pub fn reachable(&self, m: u32, pos: usize) -> bool {
        let cur = self.index(pos);
        if m >= cur || m < self.low_limit() || (cur - m) as usize > LZ4_DISTANCE_MAX {
            return false;
        }
        m >= self.base || (m - self.low_limit()) as usize + MINMATCH <= self.dict.len()
    }

    /// The four bytes at index `m`, which must satisfy [`Window::reachable`].
    #[inline(always)]
    pub fn read4(&self, m: u32) -> u32 {
        if m >= self.base {
            read_u32(self.src, (m - self.base) as usize)
        } else {
            read_u32(self.dict, (m - self.low_limit()) as usize)
        }
    }

    /// Whether index `m` is a verified match candidate for `src[pos]`.
    #[inline(always)]
    pub fn matches(&self, m: u32, pos: usize) -> bool {
        self.reachable(m, pos) && self.read4(m) == read_u32(self.src, pos)
    }

    /// Number of equal bytes between `src[pos..limit]` and the bytes starting
    /// at index `m`, continuing from the dictionary into `src` when needed.
    pub fn forward_len(&self, m: u32, pos: usize, limit: usize) -> usize {
        if pos >= limit {
            return 0;
        }
        if m >= self.base {
            let mp = (m - self.base) as usize;
            return common_prefix(&self.src[pos..limit], &self.src[mp..]);
        }
        let dp = (m - self.low_limit()) as usize;
        let in_dict = common_prefix(&self.src[pos..limit], &self.dict[dp..]);
        if dp + in_dict == self.dict.len() && pos + in_dict < limit {
            in_dict + common_prefix(&self.src[pos + in_dict..limit], self.src)
        } else {
            in_dict
        }
    }

    /// How far a match at (`m`, `pos`) extends backwards, never past `anchor`
    /// in `src` nor below the window.
    #[inline]
    pub fn backward_len(&self, m: u32, pos: usize, anchor: usize) -> usize {
        let max_back = (pos - anchor).min((m - self.low_limit()) as usize);
        let mut n = 0;
        while n < max_back && self.byte(m - 1 - n as u32) == self.src[pos - 1 - n] {
            n += 1;
        }
        n
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stream history
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a streaming context may accept another continue call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StreamStatus {
    Ready,
    /// A previous call failed; only a reset or dictionary load clears this.
    Corrupted,
}

/// Append `data` to `history`, keeping only the trailing [`LZ4_DICT_SIZE`]
/// bytes.
pub fn slide_history(history: &mut Vec<u8>, data: &[u8]) {
    if data.len() >= LZ4_DICT_SIZE {
        history.clear();
        history.extend_from_slice(&data[data.len() - LZ4_DICT_SIZE..]);
        return;
    }
    let keep = LZ4_DICT_SIZE - data.len();
    if history.len() > keep {
        history.drain(..history.len() - keep);
    }
    history.extend_from_slice(data);
}
