use std::convert::TryFrom;
use std::fmt;

use crate::error::ParseError;

/// Number of distinct symbols an alignment may contain: the 26 upper-case
/// and 26 lower-case letters, the stop marker `*` and the gap `-`.
pub const ALPHABET_SIZE: usize = 54;

const LOWER_OFFSET: usize = 26;
const STOP_INDEX: usize = 52;
const GAP_INDEX: usize = 53;

/// One aligned symbol: an amino-acid letter (standard or ambiguity code), a
/// stop or a gap.
///
/// Letters keep their case, so `a` and `A` are different symbols. Everything
/// outside `A-Z`, `a-z`, `*` and `-` is rejected when the symbol is created.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
    pub const GAP: Symbol = Symbol(b'-');
    pub const STOP: Symbol = Symbol(b'*');

    pub fn from_byte(byte: u8) -> Option<Symbol> {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'*' | b'-' => Some(Symbol(byte)),
            _ => None,
        }
    }

    /// Slot of this symbol in a table of `ALPHABET_SIZE` entries
    pub fn index(self) -> usize {
        match self.0 {
            b'*' => STOP_INDEX,
            b'-' => GAP_INDEX,
            letter @ b'a'..=b'z' => LOWER_OFFSET + (letter - b'a') as usize,
            letter => (letter - b'A') as usize,
        }
    }

    pub fn is_gap(self) -> bool {
        self == Symbol::GAP
    }

    pub fn as_byte(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Symbol {
    type Error = ParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii() {
            if let Some(symbol) = Symbol::from_byte(c as u8) {
                return Ok(symbol);
            }
        }
        Err(ParseError::somewhere(
            "amino-acid letter, '*' or '-'",
            c.to_string(),
        ))
    }
}

/// Convert a raw aligned sequence into symbols.
///
/// On failure the offending column and byte are returned so that the caller
/// can attach its own location information.
pub fn parse_symbols(seq: &[u8]) -> Result<Vec<Symbol>, (usize, u8)> {
    seq.iter()
        .enumerate()
        .map(|(column, &byte)| Symbol::from_byte(byte).ok_or((column, byte)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_byte() {
        assert_eq!(Symbol::from_byte(b'A'), Some(Symbol(b'A')));
        assert_eq!(Symbol::from_byte(b'a'), Some(Symbol(b'a')));
        assert_ne!(Symbol::from_byte(b'a'), Symbol::from_byte(b'A'));
        assert_eq!(Symbol::from_byte(b'x'), Some(Symbol(b'x')));
        assert_eq!(Symbol::from_byte(b'-'), Some(Symbol::GAP));
        assert_eq!(Symbol::from_byte(b'*'), Some(Symbol::STOP));
        assert_eq!(Symbol::from_byte(b'.'), None);
        assert_eq!(Symbol::from_byte(b'1'), None);
        assert_eq!(Symbol::from_byte(b' '), None);
    }

    #[test]
    fn test_index() {
        let mut seen = [false; ALPHABET_SIZE];
        for byte in (b'A'..=b'Z').chain(b'a'..=b'z').chain([b'*', b'-']) {
            let index = Symbol::from_byte(byte).unwrap().index();
            assert!(!seen[index], "index {} used twice", index);
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(Symbol::GAP.index(), ALPHABET_SIZE - 1);
        assert_eq!(Symbol::from_byte(b'A').unwrap().index(), 0);
        assert_eq!(Symbol::from_byte(b'a').unwrap().index(), 26);
    }

    #[test]
    fn test_try_from_char() {
        assert_eq!(Symbol::try_from('w').unwrap().as_char(), 'w');
        assert!(Symbol::try_from('?').is_err());
        assert!(Symbol::try_from('é').is_err());
    }

    #[test]
    fn test_parse_symbols() {
        let symbols = parse_symbols(b"Ac-*").unwrap();
        let rendered: String = symbols.iter().map(|s| s.as_char()).collect();
        assert_eq!(rendered, "Ac-*");
        assert_eq!(parse_symbols(b"AC.G"), Err((2, b'.')));
        assert_eq!(parse_symbols(b""), Ok(vec![]));
    }
}
