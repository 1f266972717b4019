//! Shared data types: [`Candidate`], [`Occurrence`], [`DictionaryMap`], and
//! [`CompressionResult`] (`spec.md` §3). Grounded on `original_source/small/types.py`,
//! translated from Python dataclasses to Rust structs.

use indexmap::IndexMap;

use crate::token::Token;

/// An insertion-ordered mapping from meta-token to its expansion. Insertion
/// order defines dictionary emission order (`spec.md` I2, I5, I6).
pub type DictionaryMap<T> = IndexMap<T, Vec<T>>;

/// A repeated contiguous subsequence plus its non-overlapping occurrence
/// positions, as discovered by component B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<T> {
    /// The distinct token tuple that repeats.
    pub subsequence: Vec<T>,
    /// `subsequence.len()`, cached for convenience at call sites that sort
    /// or filter by length.
    pub length: usize,
    /// Strictly increasing, pairwise non-overlapping start positions within
    /// the sequence this candidate was discovered in.
    pub positions: Vec<usize>,
    /// Tie-breaking score; external collaborators (e.g. an AST-pattern
    /// oracle) may hand in candidates with a positive bonus here.
    pub priority: i64,
}

impl<T: Token> Candidate<T> {
    /// Build a candidate from its subsequence and already non-overlapping
    /// positions, with zero priority.
    pub fn new(subsequence: Vec<T>, positions: Vec<usize>) -> Self {
        let length = subsequence.len();
        Candidate {
            subsequence,
            length,
            positions,
            priority: 0,
        }
    }

    /// Build a preferred candidate carrying a positive priority bonus, for
    /// use by an external preferred-candidate source (`spec.md` §6). The
    /// caller is responsible for ensuring `positions` are valid and
    /// pairwise non-overlapping.
    pub fn with_priority(subsequence: Vec<T>, positions: Vec<usize>, priority: i64) -> Self {
        let length = subsequence.len();
        Candidate {
            subsequence,
            length,
            positions,
            priority,
        }
    }
}

/// One concrete placement of a candidate's subsequence in the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<T> {
    pub start: usize,
    pub length: usize,
    pub subsequence: Vec<T>,
    pub priority: i64,
}

impl<T> Occurrence<T> {
    /// Exclusive end position: `[start, end)` is the window this occurrence
    /// claims.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// True iff `self` and `other`'s `[start, end)` windows intersect.
    #[inline]
    pub fn overlaps(&self, other: &Occurrence<T>) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// Bundle of everything a single `compress` call produces (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult<T> {
    /// `dictionary_tokens` followed by `body_tokens` — the full framed
    /// output.
    pub frame: Vec<T>,
    /// The dictionary region alone, delimiters included.
    pub dictionary_tokens: Vec<T>,
    /// The rewritten body alone.
    pub body_tokens: Vec<T>,
    /// Meta-token -> expansion, insertion-ordered.
    pub dictionary_map: DictionaryMap<T>,
    /// Meta-tokens in allocation order, across all hierarchical passes.
    pub meta_tokens_used: Vec<T>,
    /// `tokens.len()` of the original input.
    pub original_length: usize,
    /// `frame.len()`.
    pub compressed_length: usize,
}
