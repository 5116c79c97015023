// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Bitmask and group derivation shared by all three decode-table tools.

use std::fmt;

use crate::error::{ToolError, ToolErrorKind};

/// Required-one / required-zero masks derived from a ternary bit pattern.
///
/// `pos` has a bit set where the pattern requires 1, `neg` where it requires
/// 0; wildcard positions are clear in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskPair {
    pub pos: u8,
    pub neg: u8,
}

impl MaskPair {
    /// Derives the mask pair from an 8-character pattern over {0, 1, X}.
    pub fn from_pattern(pattern: &str) -> Result<Self, ToolError> {
        if pattern.len() != 8 {
            return Err(ToolError::new(
                ToolErrorKind::Table,
                "bit pattern must be 8 characters",
                Some(pattern),
            ));
        }
        let mut pos = 0u8;
        let mut neg = 0u8;
        for ch in pattern.chars() {
            pos <<= 1;
            neg <<= 1;
            match ch {
                '1' => pos |= 1,
                '0' => neg |= 1,
                'X' => {}
                _ => {
                    return Err(ToolError::new(
                        ToolErrorKind::Table,
                        "bit pattern may only contain 0, 1, or X",
                        Some(pattern),
                    ));
                }
            }
        }
        Ok(Self { pos, neg })
    }

    /// True when `value` has a 1 at every required-one bit and a 0 at every
    /// required-zero bit.
    pub fn matches(self, value: u8) -> bool {
        value & self.pos == self.pos && !value & self.neg == self.neg
    }
}

/// Group tuple for an opcode, indexed by a declared group value 0-3.
///
/// Index 1 follows opcode bit 0, index 2 follows bit 1, index 3 means
/// neither bit is set. Index 0 is never true.
pub fn group_flags(opcode: u8) -> [bool; 4] {
    let b0 = opcode & 0x01 != 0;
    let b1 = opcode & 0x02 != 0;
    [false, b0, b1, !b0 && !b1]
}

/// Instruction-group symbol of a PLA row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    G1,
    G2,
    G3,
    Any,
}

impl Group {
    pub fn from_symbol(symbol: &str) -> Result<Self, ToolError> {
        match symbol {
            "1" => Ok(Self::G1),
            "2" => Ok(Self::G2),
            "3" => Ok(Self::G3),
            "X" => Ok(Self::Any),
            other => Err(ToolError::new(
                ToolErrorKind::Group,
                "bad group symbol",
                Some(other),
            )),
        }
    }

    /// True when the opcode's group tuple is set at this group's index.
    /// `Any` matches every opcode.
    pub fn matches(self, opcode: u8) -> bool {
        let flags = group_flags(opcode);
        match self {
            Self::G1 => flags[1],
            Self::G2 => flags[2],
            Self::G3 => flags[3],
            Self::Any => true,
        }
    }

    /// The (mask, value) pair tested by generated dispatch guards, or `None`
    /// for the wildcard group.
    pub fn mask_value(self) -> Option<(u8, u8)> {
        match self {
            Self::G1 => Some((1, 1)),
            Self::G2 => Some((2, 2)),
            Self::G3 => Some((3, 0)),
            Self::Any => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::G1 => "1",
            Self::G2 => "2",
            Self::G3 => "3",
            Self::Any => "X",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn masks_from_fixed_pattern() {
        let masks = MaskPair::from_pattern("11000000").unwrap();
        assert_eq!(masks.pos, 0xC0);
        assert_eq!(masks.neg, 0x3F);
    }

    #[test]
    fn masks_from_all_wildcards() {
        let masks = MaskPair::from_pattern("XXXXXXXX").unwrap();
        assert_eq!(masks.pos, 0x00);
        assert_eq!(masks.neg, 0x00);
    }

    #[test]
    fn pattern_rejects_wrong_length_and_alphabet() {
        assert!(MaskPair::from_pattern("1100000").is_err());
        assert!(MaskPair::from_pattern("110000000").is_err());
        assert!(MaskPair::from_pattern("1100200X").is_err());
        assert!(MaskPair::from_pattern("1100x000").is_err());
    }

    #[test]
    fn match_rule_example() {
        let masks = MaskPair { pos: 0x01, neg: 0x02 };
        assert!(masks.matches(0x05));
        assert!(!masks.matches(0x04));
        assert!(!masks.matches(0x07));
    }

    #[test]
    fn wildcard_high_bit_pattern() {
        let masks = MaskPair::from_pattern("1XXXXXXX").unwrap();
        assert!(masks.matches(0x80));
        assert!(!masks.matches(0x00));
    }

    #[test]
    fn group_tuple_for_low_bits() {
        assert_eq!(group_flags(0x01), [false, true, false, false]);
        assert_eq!(group_flags(0x02), [false, false, true, false]);
        assert_eq!(group_flags(0x03), [false, true, true, false]);
        assert_eq!(group_flags(0x04), [false, false, false, true]);
    }

    #[test]
    fn group_symbol_round_trip() {
        for symbol in ["1", "2", "3", "X"] {
            assert_eq!(Group::from_symbol(symbol).unwrap().symbol(), symbol);
        }
        let err = Group::from_symbol("4").unwrap_err();
        assert_eq!(err.to_string(), "bad group symbol: 4");
    }

    #[test]
    fn group_mask_values() {
        assert_eq!(Group::G1.mask_value(), Some((1, 1)));
        assert_eq!(Group::G2.mask_value(), Some((2, 2)));
        assert_eq!(Group::G3.mask_value(), Some((3, 0)));
        assert_eq!(Group::Any.mask_value(), None);
    }

    #[test]
    fn any_group_matches_everything() {
        for opcode in 0u8..=255 {
            assert!(Group::Any.matches(opcode));
        }
    }

    fn pattern_for(value: u8, wildcards: u8) -> String {
        (0..8)
            .map(|i| {
                let bit = 7 - i;
                if wildcards & (1 << bit) != 0 {
                    'X'
                } else if value & (1 << bit) != 0 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn derived_masks_are_disjoint(value in any::<u8>(), wildcards in any::<u8>()) {
            let masks = MaskPair::from_pattern(&pattern_for(value, wildcards)).unwrap();
            prop_assert_eq!(masks.pos & masks.neg, 0);
        }

        #[test]
        fn pattern_built_from_value_matches_it(value in any::<u8>(), wildcards in any::<u8>()) {
            let masks = MaskPair::from_pattern(&pattern_for(value, wildcards)).unwrap();
            prop_assert!(masks.matches(value));
        }

        #[test]
        fn fully_specified_pattern_matches_only_its_value(value in any::<u8>(), other in any::<u8>()) {
            let masks = MaskPair::from_pattern(&pattern_for(value, 0)).unwrap();
            prop_assert_eq!(masks.matches(other), value == other);
        }

        #[test]
        fn group_zero_is_unreachable_but_some_group_fires(opcode in any::<u8>()) {
            let flags = group_flags(opcode);
            prop_assert!(!flags[0]);
            prop_assert!(flags.iter().any(|flag| *flag));
        }
    }
}
