//! Growable bit vector

const WORD_BITS: usize = u64::BITS as usize;

/// A growable vector of bits, zero-initialized.
///
/// Storage only ever grows; bits past the current length read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSet {
    words: Vec<u64>,
}

impl BitSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Creates a set with room for at least `bits` bits, all cleared.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(WORD_BITS)],
        }
    }

    /// Number of bits currently backed by storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    /// Returns bit `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .is_some_and(|word| word & (1u64 << (index % WORD_BITS)) != 0)
    }

    /// Sets bit `index`, growing the storage when needed.
    pub fn set(&mut self, index: usize, value: bool) {
        let word = index / WORD_BITS;
        if word >= self.words.len() {
            if !value {
                return;
            }
            self.words.resize(word + 1, 0);
        }
        let mask = 1u64 << (index % WORD_BITS);
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    /// Sets every backed bit to `value`.
    pub fn set_all(&mut self, value: bool) {
        let fill = if value { u64::MAX } else { 0 };
        self.words.fill(fill);
    }

    /// Returns the index of the first backed bit equal to `value`.
    #[must_use]
    pub fn find_first(&self, value: bool) -> Option<usize> {
        self.words.iter().enumerate().find_map(|(i, &word)| {
            let word = if value { word } else { !word };
            (word != 0).then(|| i * WORD_BITS + word.trailing_zeros() as usize)
        })
    }

    /// Returns the number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}
