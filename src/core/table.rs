use std::collections::HashMap;

use crate::encoders::algorithms::errors::{PfeError, Result};
use crate::encoders::algorithms::pfn::encode_pfn_padded;

/// Number of code points the table covers (U+0000 to U+00FF).
pub const TABLE_SIZE: usize = 256;

/// Slot width of every padded notation in the default table.
pub const DEFAULT_WIDTH: usize = 7;

/// Bijection between the first 256 code points and their padded notations.
///
/// Entries are the padded, unsimplified-at-the-text-level notations from
/// [`encode_pfn_padded`]. Because every entry spans the same number of slots,
/// a run of entries can be cut back apart by counting slots.
///
/// # Example
///
/// ```
/// use pfe_codec::CharacterTable;
///
/// let table = CharacterTable::new().unwrap();
///
/// assert_eq!(table.notation('a').unwrap(), "0'0'0'0'1'(1'3)");
/// assert_eq!(table.lookup("0'0'0'0'1'(1'3)"), Some('a'));
/// ```
#[derive(Debug, Clone)]
pub struct CharacterTable {
    width: usize,
    notations: Vec<String>,
    reverse: HashMap<String, char>,
}

impl CharacterTable {
    /// Builds the table with the default width of 7 slots.
    pub fn new() -> Result<Self> {
        Self::with_width(DEFAULT_WIDTH)
    }

    /// Builds the table with a custom slot width.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if some code point needs more slots than
    /// `width`, or if two code points would share a notation.
    pub fn with_width(width: usize) -> Result<Self> {
        let mut notations = Vec::with_capacity(TABLE_SIZE);
        let mut reverse = HashMap::with_capacity(TABLE_SIZE);

        for code_point in 0..TABLE_SIZE as u32 {
            let notation = encode_pfn_padded(u64::from(code_point), width)?;
            let c = char::from_u32(code_point).ok_or_else(|| {
                PfeError::invalid_argument(format!("U+{:04X} is not a character", code_point))
            })?;

            if let Some(previous) = reverse.insert(notation.clone(), c) {
                return Err(PfeError::invalid_argument(format!(
                    "U+{:04X} and U+{:04X} share the notation {} at width {}",
                    previous as u32, code_point, notation, width
                )));
            }
            notations.push(notation);
        }

        tracing::debug!(width, entries = notations.len(), "built character table");

        Ok(CharacterTable {
            width,
            notations,
            reverse,
        })
    }

    /// Returns the slot width shared by every entry.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of entries (always 256).
    pub fn len(&self) -> usize {
        self.notations.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.notations.is_empty()
    }

    /// Returns the padded notation of `c`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `c` lies beyond U+00FF.
    pub fn notation(&self, c: char) -> Result<&str> {
        self.notations
            .get(c as usize)
            .map(String::as_str)
            .ok_or_else(|| {
                PfeError::invalid_argument(format!(
                    "'{}' (U+{:04X}) is outside the 256-entry character table",
                    c.escape_debug(),
                    c as u32
                ))
            })
    }

    /// Returns the character whose padded notation is exactly `notation`.
    pub fn lookup(&self, notation: &str) -> Option<char> {
        self.reverse.get(notation).copied()
    }

    /// Iterates over `(character, notation)` pairs in code point order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.notations
            .iter()
            .enumerate()
            .filter_map(|(i, n)| char::from_u32(i as u32).map(|c| (c, n.as_str())))
    }
}
