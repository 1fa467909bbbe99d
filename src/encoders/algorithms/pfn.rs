//! Prime factorization notation (PFN).
//!
//! A positive integer is written as the exponents of its prime factors,
//! largest prime first, joined by `'`:
//!
//! ```text
//! 12 = 3^1 * 2^2          -> 1'2
//! 58 = 29 * 2             -> 1'0'0'0'0'0'0'0'0'1
//! ```
//!
//! Runs of two or more zero exponents are replaced by a group holding the
//! notation of the run length, so the codec compresses itself:
//!
//! ```text
//! 58                      -> 1'(3)'1      (eight zeros, 8 = 2^3)
//! ```
//!
//! `1` is written `0` and `0` is written with the sentinel `()`.

use std::ops::Range;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use super::errors::{PfeError, Result};
use super::primes::{Order, factorize_upto, first_primes, nth_prime_bound, primes_upto};

pub const SEPARATOR: char = '\'';
pub const GROUP_OPEN: char = '(';
pub const GROUP_CLOSE: char = ')';
/// Notation of zero.
pub const ZERO_SENTINEL: &str = "()";
/// Notation of one.
pub const ONE: &str = "0";
/// Exponents are single symbols.
pub const MAX_EXPONENT: usize = 9;
/// The encoder never sieves past this prime, whatever `max_run` allows.
const MAX_ENCODED_PRIME: u64 = 1 << 32;

/// Bounds applied while decoding untrusted notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest bracket nesting accepted
    pub max_depth: usize,
    /// Most exponent slots a notation may expand to, which also caps the
    /// zeros of a single group. Applies to encoding as well as decoding.
    pub max_run: usize,
}

impl Limits {
    pub const DEFAULT_MAX_DEPTH: usize = 32;
    pub const DEFAULT_MAX_RUN: usize = 1 << 20;
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_run: Self::DEFAULT_MAX_RUN,
        }
    }
}

/// Encodes `n` into simplified prime factorization notation under the
/// default [`Limits`].
pub fn encode_pfn(n: u64) -> Result<String> {
    encode_pfn_with_limits(n, &Limits::default())
}

/// Encodes `n`, accepting only values whose notation [`decode_pfn`] takes
/// back under the same `limits`.
///
/// # Errors
///
/// Returns `InvalidArgument` when a prime divides `n` ten times or more,
/// since every exponent occupies exactly one digit, or when `n` needs more
/// than `limits.max_run` exponent slots.
pub fn encode_pfn_with_limits(n: u64, limits: &Limits) -> Result<String> {
    match n {
        0 => return Ok(ZERO_SENTINEL.to_string()),
        1 => return Ok(ONE.to_string()),
        _ => {}
    }

    let exponents = exponents_of(n, limits)?;
    Ok(compress_runs(
        exponents.iter().map(|&e| DIGITS[usize::from(e)]),
        limits,
    ))
}

/// Encodes `n` and left-pads it with `0'` pairs up to `width` slots.
///
/// Padded notations all occupy the same number of slots, which is what lets
/// a sequence of them be split without delimiters of its own.
pub fn encode_pfn_padded(n: u64, width: usize) -> Result<String> {
    let body = encode_pfn(n)?;
    let used = slot_count(&body);
    if used > width {
        return Err(PfeError::invalid_argument(format!(
            "the notation of {} ({}) needs {} slots but the width is {}",
            n, body, used, width
        )));
    }
    Ok(format!("{}{}", "0'".repeat(width - used), body))
}

/// Counts the slots of a notation: one per digit, one per zero sentinel.
pub fn slot_count(notation: &str) -> usize {
    notation.bytes().filter(u8::is_ascii_digit).count() + notation.matches(ZERO_SENTINEL).count()
}

/// Replaces every run of two or more zero exponents with a group.
///
/// Groups already present are kept as they are, so simplifying twice is the
/// same as simplifying once.
pub fn simplify_pfn(unsimplified: &str) -> Result<String> {
    let parser = NotationParser::new(unsimplified, Limits::default());
    let slots = parser.slots(0..unsimplified.len())?;

    let tokens = slots.iter().map(|slot| match slot {
        Slot::Digit(d) => DIGITS[usize::from(*d)],
        Slot::Group(inner) => &unsimplified[inner.start - 1..inner.end + 1],
    });
    Ok(compress_runs(tokens, &Limits::default()))
}

/// Decodes a notation back into the integer it stands for.
pub fn decode_pfn(notation: &str, limits: &Limits) -> Result<BigUint> {
    NotationParser::new(notation, *limits).value(0..notation.len(), 0)
}

/// Expands every group, returning the flat one-digit-per-prime form.
pub fn expand_pfn(notation: &str, limits: &Limits) -> Result<String> {
    if notation == ZERO_SENTINEL {
        return Ok(ZERO_SENTINEL.to_string());
    }

    let exponents = NotationParser::new(notation, *limits).exponents(0..notation.len(), 0)?;
    let digits: Vec<String> = exponents.iter().map(u8::to_string).collect();
    Ok(digits.join("'"))
}

/// Multiplies out a flat notation: the i-th digit is the exponent of the
/// i-th prime, counting down from the largest prime the notation reaches.
pub fn normal_num(flat: &str) -> Result<BigUint> {
    let parser = NotationParser::new(flat, Limits::default());
    let mut exponents = Vec::new();
    for slot in parser.slots(0..flat.len())? {
        match slot {
            Slot::Digit(d) => exponents.push(d),
            Slot::Group(inner) => {
                return Err(PfeError::malformed_at(
                    "a flat notation cannot contain groups",
                    inner.start - 1,
                    flat,
                ));
            }
        }
    }
    Ok(multiply_out(&exponents))
}

/// Decodes the run length held by the group interior `inner` of `input`.
///
/// Error positions stay relative to `input`.
pub(crate) fn decode_run_length(input: &str, inner: Range<usize>, limits: &Limits) -> Result<usize> {
    NotationParser::new(input, *limits).count(inner, 1)
}

/// Exponents of `n` for every prime from its largest factor down to 2.
///
/// The slot count is the number of primes up to the largest factor, so it is
/// bounded before anything is sieved.
fn exponents_of(n: u64, limits: &Limits) -> Result<Vec<u8>> {
    let ceiling = nth_prime_bound(limits.max_run).min(MAX_ENCODED_PRIME);
    let factors = factorize_upto(n, ceiling).ok_or_else(|| {
        PfeError::invalid_argument(format!(
            "{} has a prime factor above {}, so it needs more than {} exponent slots",
            n, ceiling, limits.max_run
        ))
    })?;
    let Some(&largest) = factors.last() else {
        return Ok(Vec::new());
    };

    let primes = primes_upto(largest);
    if primes.len() > limits.max_run {
        return Err(PfeError::invalid_argument(format!(
            "{} needs {} exponent slots, more than the limit of {}",
            n,
            primes.len(),
            limits.max_run
        )));
    }

    let mut exponents = Vec::with_capacity(primes.len());
    for prime in primes.into_iter().rev() {
        // Factors are ascending, so each prime's instances are contiguous
        let start = factors.partition_point(|&f| f < prime);
        let end = factors.partition_point(|&f| f <= prime);
        let count = end - start;
        if count > MAX_EXPONENT {
            return Err(PfeError::invalid_argument(format!(
                "{} contains {}^{}; exponents above {} do not fit in a single digit",
                n, prime, count, MAX_EXPONENT
            )));
        }
        exponents.push(count as u8);
    }

    Ok(exponents)
}

/// Joins slot tokens with the separator, folding zero runs into groups.
fn compress_runs<'a>(tokens: impl IntoIterator<Item = &'a str>, limits: &Limits) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut zeros = 0usize;

    for token in tokens {
        if token == ONE {
            zeros += 1;
            continue;
        }
        flush_run(&mut parts, zeros, limits);
        zeros = 0;
        parts.push(token.to_string());
    }
    flush_run(&mut parts, zeros, limits);

    parts.join("'")
}

fn flush_run(parts: &mut Vec<String>, zeros: usize, limits: &Limits) {
    if zeros == 0 {
        return;
    }
    if zeros > 1 {
        match encode_pfn_with_limits(zeros as u64, limits) {
            Ok(count) => {
                tracing::trace!(zeros, %count, "folded zero run");
                parts.push(format!("{}{}{}", GROUP_OPEN, count, GROUP_CLOSE));
                return;
            }
            Err(_) => {
                tracing::trace!(zeros, "zero run length has no notation, kept verbatim");
            }
        }
    }
    parts.extend(std::iter::repeat_n(ONE.to_string(), zeros));
}

fn multiply_out(exponents: &[u8]) -> BigUint {
    let primes = first_primes(exponents.len(), Order::Descending);
    primes
        .into_iter()
        .zip(exponents)
        .filter(|(_, e)| **e > 0)
        .map(|(p, &e)| BigUint::from(p).pow(u32::from(e)))
        .product()
}

/// One separator-delimited position of a notation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Digit(u8),
    /// Byte range of the group interior, brackets excluded
    Group(Range<usize>),
}

/// Cursor-based reader over a notation. Ranges and positions are byte
/// offsets into `input`; every byte the parser steps over is ASCII.
struct NotationParser<'a> {
    input: &'a str,
    limits: Limits,
}

impl<'a> NotationParser<'a> {
    fn new(input: &'a str, limits: Limits) -> Self {
        NotationParser { input, limits }
    }

    /// Integer value of the notation in `range`.
    fn value(&self, range: Range<usize>, depth: usize) -> Result<BigUint> {
        if &self.input[range.clone()] == ZERO_SENTINEL {
            return Ok(BigUint::zero());
        }
        let exponents = self.exponents(range, depth)?;
        Ok(multiply_out(&exponents))
    }

    /// Flat exponent list of the notation in `range`.
    fn exponents(&self, range: Range<usize>, depth: usize) -> Result<Vec<u8>> {
        if depth > self.limits.max_depth {
            return Err(PfeError::malformed_at(
                format!("groups nest deeper than {} levels", self.limits.max_depth),
                range.start.saturating_sub(1),
                self.input,
            ));
        }

        let mut exponents = Vec::new();
        for slot in self.slots(range)? {
            match slot {
                Slot::Digit(d) => exponents.push(d),
                Slot::Group(inner) => {
                    let zeros = self.count(inner, depth + 1)?;
                    exponents.extend(std::iter::repeat_n(0, zeros));
                }
            }
            if exponents.len() > self.limits.max_run {
                return Err(PfeError::malformed(
                    format!(
                        "notation expands to more than {} exponent slots",
                        self.limits.max_run
                    ),
                    self.input,
                ));
            }
        }
        Ok(exponents)
    }

    /// Run length held by a group interior.
    fn count(&self, inner: Range<usize>, depth: usize) -> Result<usize> {
        let open = inner.start - 1;
        if inner.is_empty() {
            return Err(PfeError::malformed_at(
                "an empty group cannot stand for a run length",
                open,
                self.input,
            ));
        }

        let value = self.value(inner, depth)?;
        match value.to_usize() {
            Some(zeros) if (1..=self.limits.max_run).contains(&zeros) => Ok(zeros),
            _ => Err(PfeError::malformed_at(
                format!(
                    "group stands for {} zeros, outside 1..={}",
                    value, self.limits.max_run
                ),
                open,
                self.input,
            )),
        }
    }

    /// Splits `range` into slots. Grammar: `slot ('\'' slot)*` where a slot
    /// is a digit or a balanced group.
    fn slots(&self, range: Range<usize>) -> Result<Vec<Slot>> {
        let bytes = self.input.as_bytes();
        let mut slots = Vec::new();
        let mut pos = range.start;

        loop {
            if pos == range.end {
                let reason = if slots.is_empty() {
                    "empty notation"
                } else {
                    "expected a digit or a group after the separator"
                };
                return Err(PfeError::malformed_at(reason, pos, self.input));
            }

            match bytes[pos] {
                b @ b'0'..=b'9' => {
                    slots.push(Slot::Digit(b - b'0'));
                    pos += 1;
                }
                b'(' => {
                    let close = self.matching_close(pos, range.end)?;
                    slots.push(Slot::Group(pos + 1..close));
                    pos = close + 1;
                }
                _ => return Err(self.unexpected(pos)),
            }

            if pos == range.end {
                return Ok(slots);
            }
            if bytes[pos] != b'\'' {
                return Err(self.unexpected(pos));
            }
            pos += 1;
        }
    }

    /// Finds the `)` closing the `(` at `open`, tracking depth iteratively.
    fn matching_close(&self, open: usize, end: usize) -> Result<usize> {
        let bytes = self.input.as_bytes();
        let mut depth = 0usize;

        for (pos, &b) in bytes.iter().enumerate().take(end).skip(open) {
            match b {
                b'(' => {
                    depth += 1;
                    if depth > self.limits.max_depth {
                        return Err(PfeError::malformed_at(
                            format!("groups nest deeper than {} levels", self.limits.max_depth),
                            pos,
                            self.input,
                        ));
                    }
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(pos);
                    }
                }
                _ => {}
            }
        }

        Err(PfeError::malformed_at("unbalanced '('", open, self.input))
    }

    fn unexpected(&self, pos: usize) -> PfeError {
        let found = self.input[pos..].chars().next().unwrap_or(' ');
        let reason = match found {
            ')' => "unbalanced ')'".to_string(),
            '\'' => "unexpected separator".to_string(),
            c => format!("unexpected character '{}'", c),
        };
        PfeError::malformed_at(reason, pos, self.input)
    }
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(notation: &str) -> Result<BigUint> {
        decode_pfn(notation, &Limits::default())
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(encode_pfn(0).unwrap(), "()");
        assert_eq!(encode_pfn(1).unwrap(), "0");
        assert_eq!(decode("()").unwrap(), BigUint::zero());
        assert_eq!(decode("0").unwrap(), BigUint::from(1u8));
    }

    #[test]
    fn test_twelve_is_three_then_two_squared() {
        assert_eq!(encode_pfn(12).unwrap(), "1'2");
        assert_eq!(decode("1'2").unwrap(), BigUint::from(12u8));
    }

    #[test]
    fn test_known_notations() {
        assert_eq!(encode_pfn(2).unwrap(), "1");
        assert_eq!(encode_pfn(8).unwrap(), "3");
        assert_eq!(encode_pfn(9).unwrap(), "2'0");
        assert_eq!(encode_pfn(29).unwrap(), "1'(2'0)");
        assert_eq!(encode_pfn(58).unwrap(), "1'(3)'1");
        assert_eq!(encode_pfn(97).unwrap(), "1'(1'3)");
        assert_eq!(encode_pfn(251).unwrap(), "1'(1'(1'1'0))");
        assert_eq!(encode_pfn(255).unwrap(), "1'(1'0)'1'1'0");
    }

    #[test]
    fn test_round_trip_range() {
        for n in 0..3000u64 {
            let Ok(notation) = encode_pfn(n) else {
                continue;
            };
            assert_eq!(decode(&notation).unwrap(), BigUint::from(n), "n = {}", n);
        }
    }

    #[test]
    fn test_exponent_ceiling() {
        assert_eq!(encode_pfn(512).unwrap(), "9");
        assert!(matches!(
            encode_pfn(1024),
            Err(PfeError::InvalidArgument { .. })
        ));
        assert!(matches!(
            encode_pfn(3u64.pow(10)),
            Err(PfeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_encode_respects_slot_limit() {
        let tight = Limits {
            max_depth: 32,
            max_run: 100,
        };
        // 541 is the 100th prime, 547 the 101st
        let pfn = encode_pfn_with_limits(541, &tight).unwrap();
        assert_eq!(decode_pfn(&pfn, &tight).unwrap(), BigUint::from(541u32));

        for n in [547u64, 2 * 547, 547 * 547] {
            assert!(
                matches!(
                    encode_pfn_with_limits(n, &tight),
                    Err(PfeError::InvalidArgument { .. })
                ),
                "{} should not fit in 100 slots",
                n
            );
        }
    }

    #[test]
    fn test_large_prime_is_invalid_argument() {
        // Largest prime below 2^64
        assert!(matches!(
            encode_pfn(18_446_744_073_709_551_557),
            Err(PfeError::InvalidArgument { .. })
        ));
        // Composite with a large cofactor
        assert!(matches!(
            encode_pfn(2 * 9_223_372_036_854_775_783),
            Err(PfeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_encodable_values_decode_under_same_limits() {
        let tight = Limits {
            max_depth: 32,
            max_run: 30,
        };
        for n in 2..2000u64 {
            if let Ok(pfn) = encode_pfn_with_limits(n, &tight) {
                assert_eq!(decode_pfn(&pfn, &tight).unwrap(), BigUint::from(n), "n = {}", n);
            }
        }
    }

    #[test]
    fn test_padded() {
        assert_eq!(encode_pfn_padded(0, 7).unwrap(), "0'0'0'0'0'0'()");
        assert_eq!(encode_pfn_padded(1, 7).unwrap(), "0'0'0'0'0'0'0");
        assert_eq!(encode_pfn_padded(97, 7).unwrap(), "0'0'0'0'1'(1'3)");
        assert_eq!(encode_pfn_padded(237, 7).unwrap(), encode_pfn(237).unwrap());
        assert!(matches!(
            encode_pfn_padded(237, 6),
            Err(PfeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_padded_notation_decodes_to_same_value() {
        let padded = encode_pfn_padded(97, 7).unwrap();
        assert_eq!(decode(&padded).unwrap(), BigUint::from(97u8));
    }

    #[test]
    fn test_slot_count() {
        assert_eq!(slot_count("()"), 1);
        assert_eq!(slot_count("0'0'0'0'0'0'()"), 7);
        assert_eq!(slot_count("1'(1'(1'1'0))"), 5);
    }

    #[test]
    fn test_simplify_folds_runs() {
        assert_eq!(simplify_pfn("1'0'0'0'0'0'0'0'0'1").unwrap(), "1'(3)'1");
        assert_eq!(simplify_pfn("1'0'1").unwrap(), "1'0'1");
        assert_eq!(simplify_pfn("1'0'0").unwrap(), "1'(1)");
        assert_eq!(simplify_pfn("0'0'0'1").unwrap(), "(1'0)'1");
    }

    #[test]
    fn test_simplify_is_idempotent() {
        let once = simplify_pfn("1'0'0'0'0'0'0'0'0'1").unwrap();
        assert_eq!(simplify_pfn(&once).unwrap(), once);
    }

    #[test]
    fn test_simplify_never_expands() {
        for zeros in 0..300usize {
            let flat = format!("1'{}", vec!["0"; zeros + 1].join("'"));
            let simplified = simplify_pfn(&flat).unwrap();
            assert!(simplified.len() <= flat.len(), "{} -> {}", flat, simplified);
            assert_eq!(
                expand_pfn(&simplified, &Limits::default()).unwrap(),
                flat
            );
        }
    }

    #[test]
    fn test_expand() {
        let limits = Limits::default();
        assert_eq!(
            expand_pfn("1'(3)'1", &limits).unwrap(),
            "1'0'0'0'0'0'0'0'0'1"
        );
        assert_eq!(expand_pfn("()", &limits).unwrap(), "()");
    }

    #[test]
    fn test_normal_num() {
        assert_eq!(normal_num("1'2").unwrap(), BigUint::from(12u8));
        assert_eq!(normal_num("0'0'1'2").unwrap(), BigUint::from(12u8));
        assert!(normal_num("1'(3)'1").is_err());
    }

    #[test]
    fn test_large_values_decode_beyond_u64() {
        let value = decode("9'9'9'9'9'9'9'9'9'9'9'9'9'9'9'9'9").unwrap();
        assert!(value.to_u64().is_none());
    }

    #[test]
    fn test_unbalanced_brackets_are_malformed() {
        for input in ["(", "1'(3", "1'3)", "((1)", ")", "1'(3))'1"] {
            assert!(
                matches!(decode(input), Err(PfeError::MalformedInput { .. })),
                "{:?} should be malformed",
                input
            );
        }
    }

    #[test]
    fn test_bad_grammar_is_malformed() {
        for input in ["", "1''2", "1'", "'1", "12", "1'a", "1'[2]", "(())", "1'()"] {
            assert!(
                matches!(decode(input), Err(PfeError::MalformedInput { .. })),
                "{:?} should be malformed",
                input
            );
        }
    }

    #[test]
    fn test_error_position() {
        match decode("1'2'x") {
            Err(PfeError::MalformedInput { position, .. }) => assert_eq!(position, Some(4)),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_nesting_limit() {
        let shallow = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        assert_eq!(decode(&shallow).unwrap(), BigUint::from(1u8));

        let deep = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
        assert!(matches!(
            decode(&deep),
            Err(PfeError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_run_limit() {
        // 3^9 * 2^9 zeros
        assert!(matches!(
            decode("(9'9)'1"),
            Err(PfeError::MalformedInput { .. })
        ));

        let tight = Limits {
            max_depth: 4,
            max_run: 10,
        };
        assert_eq!(
            decode_pfn("1'(3)'1", &tight).unwrap(),
            BigUint::from(58u8)
        );
        // 97 spans 25 slots
        assert!(decode_pfn("1'(1'3)", &tight).is_err());
    }
}
