//! MARC record leader access.
//!
//! The MARC leader is a 24-byte fixed-length field at the start of every MARC record.
//! The transformer only reads it: positions 05 (record status), 06 (type of
//! record) and 07 (bibliographic level) drive suppression, record kind and
//! several defaults.
//!
//! # Structure
//!
//! - Positions 0-4: Record length (5 digits)
//! - Position 5: Record status (d = deleted)
//! - Position 6: Record type (a = language material, z = authority, x/y/u/v = holdings)
//! - Position 7: Bibliographic level (m = monograph, s = serial, etc.)
//! - Position 8: Control record type
//! - Position 9: Character coding (space = MARC-8, a = UTF-8)
//! - Positions 10-16: Indicator/subfield counts and base address
//! - Positions 17-19: Encoding level, cataloging form, multipart level
//! - Positions 20-23: Entry map (usually "4500")

use crate::error::{Result, XobisError};
use serde::{Deserialize, Serialize};

/// The kind of MARC record, decided by Leader/06.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// Bibliographic record (any Leader/06 not listed below)
    Bibliographic,
    /// Authority record (Leader/06 = z)
    Authority,
    /// Holdings record (Leader/06 = u, v, x or y)
    Holdings,
}

/// MARC Leader - 24 bytes at the start of every MARC record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    /// Record length (5 digits) - positions 0-4
    pub record_length: u32,
    /// Record status (1 char) - position 5
    pub record_status: char,
    /// Type of record (1 char) - position 6
    pub record_type: char,
    /// Bibliographic level (1 char) - position 7
    pub bibliographic_level: char,
    /// Type of control record (1 char) - position 8
    pub control_record_type: char,
    /// Character coding scheme (1 char) - position 9
    pub character_coding: char,
    /// Encoding level (1 char) - position 17
    pub encoding_level: char,
    /// Cataloging form (1 char) - position 18
    pub cataloging_form: char,
    /// Multipart resource record level (1 char) - position 19
    pub multipart_level: char,
}

impl Default for Leader {
    fn default() -> Self {
        Leader {
            record_length: 0,
            record_status: 'n',
            record_type: 'a',
            bibliographic_level: 'm',
            control_record_type: ' ',
            character_coding: 'a',
            encoding_level: ' ',
            cataloging_form: 'a',
            multipart_level: ' ',
        }
    }
}

impl Leader {
    /// Leader for an authority record.
    #[must_use]
    pub fn authority() -> Self {
        Leader {
            record_type: 'z',
            bibliographic_level: ' ',
            ..Leader::default()
        }
    }

    /// Leader for a holdings record.
    #[must_use]
    pub fn holdings() -> Self {
        Leader {
            record_type: 'y',
            bibliographic_level: ' ',
            ..Leader::default()
        }
    }

    /// Leader for a bibliographic record with the given type and level.
    #[must_use]
    pub fn bibliographic(record_type: char, bibliographic_level: char) -> Self {
        Leader {
            record_type,
            bibliographic_level,
            ..Leader::default()
        }
    }

    /// Parse a leader from its 24-character text form.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is shorter than 24 characters or the
    /// record length is not numeric.
    pub fn parse(text: &str) -> Result<Self> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() < 24 {
            return Err(XobisError::malformed(
                "LDR",
                format!("leader must be at least 24 characters, got {}", chars.len()),
            ));
        }

        let length: String = chars[0..5].iter().collect();
        let record_length = if length.trim().is_empty() {
            0
        } else {
            length
                .trim()
                .parse::<u32>()
                .map_err(|_| XobisError::malformed("LDR", format!("invalid record length '{length}'")))?
        };

        Ok(Leader {
            record_length,
            record_status: chars[5],
            record_type: chars[6],
            bibliographic_level: chars[7],
            control_record_type: chars[8],
            character_coding: chars[9],
            encoding_level: chars[17],
            cataloging_form: chars[18],
            multipart_level: chars[19],
        })
    }

    /// Character at a leader position, for the positions this crate models.
    #[must_use]
    pub fn byte(&self, position: usize) -> Option<char> {
        match position {
            5 => Some(self.record_status),
            6 => Some(self.record_type),
            7 => Some(self.bibliographic_level),
            8 => Some(self.control_record_type),
            9 => Some(self.character_coding),
            17 => Some(self.encoding_level),
            18 => Some(self.cataloging_form),
            19 => Some(self.multipart_level),
            _ => None,
        }
    }

    /// Record kind from Leader/06.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self.record_type {
            'z' => RecordKind::Authority,
            'u' | 'v' | 'x' | 'y' => RecordKind::Holdings,
            _ => RecordKind::Bibliographic,
        }
    }

    /// Whether Leader/05 marks the record as deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.record_status == 'd'
    }

    /// Whether the record is a monograph (Leader/07 = m).
    #[must_use]
    pub fn is_monograph(&self) -> bool {
        self.bibliographic_level == 'm'
    }

    /// Whether the record describes unpublished or manuscript material,
    /// for which places and dates are of production rather than publication.
    #[must_use]
    pub fn is_unpublished(&self) -> bool {
        matches!(self.record_type, 'd' | 'f' | 't' | 'k' | 'r')
            || matches!(self.bibliographic_level, 'c' | 'd')
    }

    /// Whether the record describes language material (Leader/06 = a or t).
    #[must_use]
    pub fn is_language_material(&self) -> bool {
        matches!(self.record_type, 'a' | 't')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leader_parse() {
        let leader = Leader::parse("01234cam a2200289 i 4500").unwrap();
        assert_eq!(leader.record_length, 1234);
        assert_eq!(leader.record_status, 'c');
        assert_eq!(leader.record_type, 'a');
        assert_eq!(leader.bibliographic_level, 'm');
        assert_eq!(leader.character_coding, 'a');
        assert_eq!(leader.cataloging_form, 'i');
        assert_eq!(leader.kind(), RecordKind::Bibliographic);
    }

    #[test]
    fn test_leader_too_short() {
        assert!(Leader::parse("01234cam").is_err());
    }

    #[test]
    fn test_leader_blank_length() {
        let leader = Leader::parse("     nz  a22     n  4500").unwrap();
        assert_eq!(leader.record_length, 0);
        assert_eq!(leader.kind(), RecordKind::Authority);
    }

    #[test]
    fn test_record_kinds() {
        assert_eq!(Leader::authority().kind(), RecordKind::Authority);
        assert_eq!(Leader::holdings().kind(), RecordKind::Holdings);
        for code in ['u', 'v', 'x', 'y'] {
            assert_eq!(Leader::bibliographic(code, ' ').kind(), RecordKind::Holdings);
        }
        assert_eq!(
            Leader::bibliographic('r', 'm').kind(),
            RecordKind::Bibliographic
        );
    }

    #[test]
    fn test_byte_access() {
        let leader = Leader::bibliographic('t', 'c');
        assert_eq!(leader.byte(6), Some('t'));
        assert_eq!(leader.byte(7), Some('c'));
        assert_eq!(leader.byte(0), None);
        assert!(leader.is_unpublished());
        assert!(leader.is_language_material());
        assert!(!leader.is_monograph());
    }
}
