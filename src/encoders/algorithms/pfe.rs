//! Prime factorization encoding (PFE) of text.
//!
//! Each character becomes its padded notation from the [`CharacterTable`],
//! the notations are joined with `'`, and runs of zero slots in the joined
//! string are folded into `[...]` groups whose interior is the notation of
//! the number of zeros.

use std::ops::Range;

use super::errors::{PfeError, Result};
use super::pfn::{Limits, decode_run_length, encode_pfn_with_limits};
use crate::core::table::CharacterTable;

pub const RUN_OPEN: char = '[';
pub const RUN_CLOSE: char = ']';

/// Joins the padded notation of every character of `text`.
///
/// # Errors
///
/// Returns `InvalidArgument` for characters beyond U+00FF.
pub fn encode_pfe(text: &str, table: &CharacterTable) -> Result<String> {
    let blocks = text
        .chars()
        .map(|c| table.notation(c))
        .collect::<Result<Vec<_>>>()?;
    Ok(blocks.join("'"))
}

/// Folds every run of two or more `0'` pairs into a `[...]` group, under
/// the default [`Limits`].
///
/// A run reaching the end of the input may finish with a bare `0`; the
/// separator after a run is kept outside the group, so that
/// [`unsimplify_pfe`] restores the input byte for byte.
pub fn simplify_pfe(raw: &str) -> String {
    simplify_pfe_with_limits(raw, &Limits::default())
}

/// Like [`simplify_pfe`], but leaves verbatim any run longer than
/// `limits.max_run`, which [`unsimplify_pfe`] would refuse to expand.
pub fn simplify_pfe_with_limits(raw: &str, limits: &Limits) -> String {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'0' {
            let next = raw[pos..].find('0').map_or(raw.len(), |i| pos + i);
            out.push_str(&raw[pos..next]);
            pos = next;
            continue;
        }

        let start = pos;
        let mut zeros = 0usize;
        while bytes.get(pos) == Some(&b'0') && bytes.get(pos + 1) == Some(&b'\'') {
            zeros += 1;
            pos += 2;
        }

        let mut separated = zeros > 0;
        if pos + 1 == bytes.len() && bytes[pos] == b'0' {
            zeros += 1;
            pos += 1;
            separated = false;
        }

        if zeros == 0 {
            // A zero glued to a bracket is never part of a run
            out.push('0');
            pos += 1;
            continue;
        }

        match fold_run(zeros, limits) {
            Some(count) => {
                out.push(RUN_OPEN);
                out.push_str(&count);
                out.push(RUN_CLOSE);
                if separated {
                    out.push('\'');
                }
            }
            None => out.push_str(&raw[start..pos]),
        }
    }

    out
}

/// Expands every `[...]` group back into its run of zeros.
pub fn unsimplify_pfe(simplified: &str, limits: &Limits) -> Result<String> {
    let bytes = simplified.as_bytes();
    let mut out = String::with_capacity(simplified.len() * 2);
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'[' => {
                let close = matching_run_close(simplified, pos)?;
                let zeros = decode_run_length(simplified, pos + 1..close, limits)?;
                out.push('0');
                for _ in 1..zeros {
                    out.push_str("'0");
                }
                pos = close + 1;
            }
            b']' => {
                return Err(PfeError::malformed_at("unbalanced ']'", pos, simplified));
            }
            b @ (b'0'..=b'9' | b'\'' | b'(' | b')') => {
                out.push(char::from(b));
                pos += 1;
            }
            _ => return Err(unexpected(simplified, pos)),
        }
    }

    Ok(out)
}

/// Cuts an expanded PFE string into character blocks and looks each up.
///
/// A block ends at the first separator after `table.width()` slots have
/// been counted; every block must then match a table entry exactly.
pub fn decode_raw_pfe(raw: &str, table: &CharacterTable) -> Result<String> {
    let width = table.width();
    let bytes = raw.as_bytes();
    let mut text = String::new();
    let mut start = 0;
    let mut slots = 0;

    if raw.is_empty() {
        return Ok(text);
    }

    for (pos, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' if slots < width => slots += 1,
            b'(' if slots < width && bytes.get(pos + 1) == Some(&b')') => slots += 1,
            b'\'' if slots == width => {
                text.push(lookup_block(raw, start..pos, table)?);
                start = pos + 1;
                slots = 0;
            }
            b'0'..=b'9' => {
                return Err(PfeError::malformed_at(
                    format!("character block has more than {} slots", width),
                    pos,
                    raw,
                ));
            }
            b'\'' | b'(' | b')' => {}
            _ => return Err(unexpected(raw, pos)),
        }
    }

    if start == raw.len() {
        return Err(PfeError::malformed_at(
            "trailing separator after the last character block",
            raw.len() - 1,
            raw,
        ));
    }
    if slots < width {
        return Err(PfeError::malformed_at(
            format!(
                "final character block has {} of {} slots",
                slots, width
            ),
            start,
            raw,
        ));
    }
    text.push(lookup_block(raw, start..raw.len(), table)?);

    Ok(text)
}

fn fold_run(zeros: usize, limits: &Limits) -> Option<String> {
    if zeros < 2 || zeros > limits.max_run {
        return None;
    }
    match encode_pfn_with_limits(zeros as u64, limits) {
        Ok(count) => {
            tracing::trace!(zeros, %count, "folded zero slot run");
            Some(count)
        }
        Err(_) => None,
    }
}

fn lookup_block(raw: &str, block: Range<usize>, table: &CharacterTable) -> Result<char> {
    let notation = &raw[block.clone()];
    let c = table
        .lookup(notation)
        .ok_or_else(|| PfeError::unknown_encoding(notation, block.start))?;
    tracing::trace!(position = block.start, notation, ?c, "decoded character block");
    Ok(c)
}

fn matching_run_close(input: &str, open: usize) -> Result<usize> {
    for (pos, b) in input.bytes().enumerate().skip(open + 1) {
        match b {
            b']' => return Ok(pos),
            b'[' => {
                return Err(PfeError::malformed_at("run groups cannot nest", pos, input));
            }
            _ => {}
        }
    }
    Err(PfeError::malformed_at("unbalanced '['", open, input))
}

fn unexpected(input: &str, pos: usize) -> PfeError {
    let found = input[pos..].chars().next().unwrap_or(' ');
    PfeError::malformed_at(format!("unexpected character '{}'", found), pos, input)
}
