//! Bitmask encoding of IUPAC nucleotide symbols.
//!
//! Each symbol is encoded into a single byte (Paradis' scheme):
//!
//! ```text
//!  bit:   7   6   5   4   3        2     1        0
//!         A   G   C   T   called   gap   unknown  -
//! ```
//!
//! The upper nibble is the set of bases the symbol may stand for. Two symbols can be
//! the same base iff their upper nibbles intersect, so a difference between a reference
//! and a query code is a single test: `(r & q) < 16`.
//!
//! Gaps are encoded according to a [`GapPolicy`]. Under [`GapPolicy::Soft`] a gap carries
//! all four base bits and so matches anything; under [`GapPolicy::Hard`] it carries none
//! and is a difference against every symbol, including another gap.
//!
//! # Example
//!
//! ```
//! use snps_lib::iupac::{GapPolicy, SymbolCodec, is_difference};
//!
//! let codec = SymbolCodec::new(GapPolicy::Soft);
//! assert!(!is_difference(codec.encode(b'A'), codec.encode(b'R')));
//! assert!(is_difference(codec.encode(b'G'), codec.encode(b'W')));
//! assert_eq!(codec.decode(codec.encode(b'y')), b'Y');
//! ```

/// Base bit for adenine.
pub const BASE_A: u8 = 0b1000_0000;
/// Base bit for guanine.
pub const BASE_G: u8 = 0b0100_0000;
/// Base bit for cytosine.
pub const BASE_C: u8 = 0b0010_0000;
/// Base bit for thymine.
pub const BASE_T: u8 = 0b0001_0000;
/// Flag set on the four unambiguous bases.
pub const CALLED: u8 = 0b0000_1000;
/// Flag set on gap codes.
pub const GAP: u8 = 0b0000_0100;
/// Flag set on the unknown (`?`) code.
pub const UNKNOWN: u8 = 0b0000_0010;

const ANY_BASE: u8 = BASE_A | BASE_G | BASE_C | BASE_T;

/// Returned by [`SymbolCodec::decode`] for bytes that are not a defined code.
pub const UNDEFINED_SYMBOL: u8 = 0;

/// The IUPAC nucleotide letters (upper-case) and their encodings.
const NUCLEOTIDES: [(u8, u8); 15] = [
    (b'A', BASE_A | CALLED),
    (b'G', BASE_G | CALLED),
    (b'C', BASE_C | CALLED),
    (b'T', BASE_T | CALLED),
    (b'R', BASE_A | BASE_G),
    (b'M', BASE_A | BASE_C),
    (b'W', BASE_A | BASE_T),
    (b'S', BASE_G | BASE_C),
    (b'K', BASE_G | BASE_T),
    (b'Y', BASE_C | BASE_T),
    (b'V', BASE_A | BASE_G | BASE_C),
    (b'H', BASE_A | BASE_C | BASE_T),
    (b'D', BASE_A | BASE_G | BASE_T),
    (b'B', BASE_G | BASE_C | BASE_T),
    (b'N', ANY_BASE),
];

const SOFT_GAP_CODE: u8 = ANY_BASE | GAP;
const HARD_GAP_CODE: u8 = GAP;
const UNKNOWN_CODE: u8 = ANY_BASE | UNKNOWN;

/// How alignment gaps (`-`) are compared against other symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Gaps are missing data and match anything.
    #[default]
    Soft,
    /// Gaps never match, not even another gap.
    Hard,
}

impl GapPolicy {
    /// Choose the policy from the `--hard-gaps` flag.
    #[must_use]
    pub const fn from_hard_gaps(hard_gaps: bool) -> Self {
        if hard_gaps { Self::Hard } else { Self::Soft }
    }
}

impl std::fmt::Display for GapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Soft => write!(f, "soft"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

const fn build_encoding(gap_code: u8) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < NUCLEOTIDES.len() {
        let (symbol, code) = NUCLEOTIDES[i];
        table[symbol as usize] = code;
        table[symbol.to_ascii_lowercase() as usize] = code;
        i += 1;
    }
    table[b'-' as usize] = gap_code;
    table[b'?' as usize] = UNKNOWN_CODE;
    table
}

const fn build_decoding() -> [u8; 256] {
    let mut table = [UNDEFINED_SYMBOL; 256];
    let mut i = 0;
    while i < NUCLEOTIDES.len() {
        let (symbol, code) = NUCLEOTIDES[i];
        table[code as usize] = symbol;
        i += 1;
    }
    table[SOFT_GAP_CODE as usize] = b'-';
    table[HARD_GAP_CODE as usize] = b'-';
    table[UNKNOWN_CODE as usize] = b'?';
    table
}

static SOFT_GAP_ENCODING: [u8; 256] = build_encoding(SOFT_GAP_CODE);
static HARD_GAP_ENCODING: [u8; 256] = build_encoding(HARD_GAP_CODE);
static DECODING: [u8; 256] = build_decoding();

/// Returns true if two codes share no base, i.e. the position is a SNP.
#[inline]
#[must_use]
pub const fn is_difference(reference: u8, query: u8) -> bool {
    (reference & query) < 16
}

/// Returns true if the code is one of the four unambiguous bases.
#[inline]
#[must_use]
pub const fn is_called(code: u8) -> bool {
    code & CALLED == CALLED
}

/// Encode/decode tables for one gap policy.
///
/// The tables are immutable statics, so a codec is `Copy` and can be handed to every
/// worker thread without synchronization.
#[derive(Debug, Clone, Copy)]
pub struct SymbolCodec {
    policy: GapPolicy,
    encoding: &'static [u8; 256],
}

impl SymbolCodec {
    /// Create the codec for the given gap policy.
    #[must_use]
    pub fn new(policy: GapPolicy) -> Self {
        let encoding = match policy {
            GapPolicy::Soft => &SOFT_GAP_ENCODING,
            GapPolicy::Hard => &HARD_GAP_ENCODING,
        };
        Self { policy, encoding }
    }

    /// The gap policy this codec encodes with.
    #[must_use]
    pub fn policy(&self) -> GapPolicy {
        self.policy
    }

    /// Encode a symbol. Bytes outside the IUPAC alphabet encode to 0.
    #[inline]
    #[must_use]
    pub fn encode(&self, symbol: u8) -> u8 {
        self.encoding[symbol as usize]
    }

    /// Decode a code to its upper-case symbol, or [`UNDEFINED_SYMBOL`].
    #[inline]
    #[must_use]
    pub fn decode(&self, code: u8) -> u8 {
        DECODING[code as usize]
    }

    /// Returns true if `symbol` is an IUPAC letter (either case), `-` or `?`.
    #[inline]
    #[must_use]
    pub fn is_symbol(&self, symbol: u8) -> bool {
        // every defined symbol has at least one flag or base bit set in both policies
        self.encoding[symbol as usize] != 0
    }

    /// Encode a slice of symbols, appending codes to `out`.
    ///
    /// Returns the first byte that is not a symbol, leaving `out` partially extended.
    pub fn encode_into(&self, symbols: &[u8], out: &mut Vec<u8>) -> Result<(), u8> {
        out.reserve(symbols.len());
        for &symbol in symbols {
            let code = self.encode(symbol);
            if code == 0 {
                return Err(symbol);
            }
            out.push(code);
        }
        Ok(())
    }
}
