// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Decode-table code generator: one dispatch stub per unique PLA rule.
//!
//! The emitted stubs are meant to be pasted into the CPU core's decode loop,
//! which binds `self.opcode`, `self.time`, and the group accumulator `g`.

use std::collections::HashSet;
use std::io::{self, Write};

use crate::mask::{Group, MaskPair};
use crate::table::{PlaEntry, TimeStep};

/// Guard expression for one PLA rule. The bitmask clause is always present;
/// the group and time clauses are omitted when the rule wildcards them.
pub fn guard_expression(entry: &PlaEntry) -> String {
    let MaskPair { pos, neg } = entry.masks;
    let mut guard =
        format!("if self.opcode & {pos:#04x} == {pos:#04x} && !self.opcode & {neg:#04x} == {neg:#04x}");
    if let Some((mask, value)) = entry.group.mask_value() {
        guard.push_str(&format!(" && g & {mask} == {value}"));
    }
    if let TimeStep::Step(step) = entry.time {
        guard.push_str(&format!(" && self.time == {step}"));
    }
    guard
}

/// Emits one stub per unique (pattern, group, time) rule, first occurrence
/// wins, file order preserved.
pub fn run(entries: &[PlaEntry], out: &mut impl Write) -> io::Result<()> {
    let mut seen: HashSet<(&str, Group, TimeStep)> = HashSet::new();
    for entry in entries {
        if !seen.insert((entry.pattern.as_str(), entry.group, entry.time)) {
            continue;
        }
        writeln!(out, "\t\t{} {{", guard_expression(entry))?;
        writeln!(out, "\t\t\t// {}", entry.name)?;
        writeln!(out, "\t\t\tunimplemented!();")?;
        writeln!(out, "\t\t}}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_pla_table;

    fn render(pla: &str) -> String {
        let entries = parse_pla_table(pla).unwrap();
        let mut out = Vec::new();
        run(&entries, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_guard_has_all_three_clauses() {
        let text = render("11000000 1 2 LOAD_HI\n");
        assert_eq!(
            text,
            "\t\tif self.opcode & 0xc0 == 0xc0 && !self.opcode & 0x3f == 0x3f && g & 1 == 1 && self.time == 2 {\n\
             \t\t\t// LOAD_HI\n\
             \t\t\tunimplemented!();\n\
             \t\t}\n"
        );
    }

    #[test]
    fn wildcard_group_omits_group_clause() {
        let text = render("1XXXXXXX X 3 HIGH_HALF\n");
        assert!(text.contains(
            "if self.opcode & 0x80 == 0x80 && !self.opcode & 0x00 == 0x00 && self.time == 3 {"
        ));
        assert!(!text.contains("g &"));
    }

    #[test]
    fn wildcard_time_omits_time_clause() {
        let text = render("XXXXXX11 3 X NEITHER_BIT\n");
        assert!(text.contains("g & 3 == 0"));
        assert!(!text.contains("self.time"));
    }

    #[test]
    fn double_wildcard_keeps_only_bitmask_clause() {
        let text = render("XXXXXXXX X X FETCH\n");
        assert!(text
            .contains("\t\tif self.opcode & 0x00 == 0x00 && !self.opcode & 0x00 == 0x00 {\n"));
        assert!(!text.contains("g &"));
        assert!(!text.contains("self.time"));
    }

    #[test]
    fn duplicate_rules_keep_first_name_only() {
        let text = render("11000000 1 2 FIRST\n11000000 1 2 SECOND\n11000000 1 3 THIRD\n");
        assert!(text.contains("// FIRST"));
        assert!(!text.contains("// SECOND"));
        assert!(text.contains("// THIRD"));
    }

    #[test]
    fn output_preserves_first_occurrence_order() {
        let text = render("10000000 X 0 A\n01000000 X 0 B\n10000000 X 0 A_AGAIN\n");
        let a = text.find("// A\n").unwrap();
        let b = text.find("// B").unwrap();
        assert!(a < b);
        assert!(!text.contains("A_AGAIN"));
    }

    #[test]
    fn guard_masks_match_filter_derivation() {
        // The masks and group value in an emitted guard must be the ones the
        // opcode filter derives from the same pattern and group symbol.
        let entries = parse_pla_table("011XXXXX 2 1 ALU_OP\n").unwrap();
        let guard = guard_expression(&entries[0]);
        let masks = MaskPair::from_pattern("011XXXXX").unwrap();
        assert!(guard.contains(&format!("self.opcode & {:#04x} == {:#04x}", masks.pos, masks.pos)));
        assert!(guard.contains(&format!("!self.opcode & {:#04x} == {:#04x}", masks.neg, masks.neg)));
        let (gmask, gval) = Group::from_symbol("2").unwrap().mask_value().unwrap();
        assert!(guard.contains(&format!("g & {gmask} == {gval}")));
    }
}
