//! Vertical alignment of assignment/association operators.
//!
//! Groups contiguous lines into alignment regions, then pads the gap before
//! each qualifying operator so the operators of a region land on a common
//! column. Two-pass per operator class: one pass canonicalizes the gap and
//! measures columns, a second pads to the region maximum — no mutable
//! backtracking over a shared cursor.
//!
//! Region partitioning follows [`AlignMode`]; operator-class selection
//! follows [`AlignScope`]. Classes are aligned independently, never merged
//! into one column. Lines without a qualifying operator stay unpadded and do
//! not break a region; only blank lines and depth changes do.

use crate::config::{AlignMode, AlignScope, Config};
use crate::parser::lines::Line;
use crate::parser::token::{Token, TokenKind};

/// Operator classes aligned when no explicit keyword list is configured:
/// signal assignment, variable assignment, association.
const DEFAULT_ALIGN_CLASSES: &[&str] = &["<=", ":=", "=>"];

/// Align qualifying operators within each region to a common column.
pub fn align_signs(lines: &mut [Line], config: &Config) {
    let classes = match config.align_scope {
        AlignScope::Disabled => return,
        AlignScope::All => {
            let mut classes: Vec<String> = DEFAULT_ALIGN_CLASSES
                .iter()
                .map(|s| (*s).to_string())
                .collect();
            for extra in &config.align_keywords {
                if !classes.iter().any(|c| c.eq_ignore_ascii_case(extra)) {
                    classes.push(extra.clone());
                }
            }
            classes
        }
        AlignScope::Regional => {
            if config.align_keywords.is_empty() {
                DEFAULT_ALIGN_CLASSES
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect()
            } else {
                config.align_keywords.clone()
            }
        }
    };

    let unit_width = config.indent_unit.chars().count();
    for region in partition_regions(lines, config.align_mode) {
        for class in &classes {
            align_class(lines, &region, class, unit_width);
        }
    }
}

/// Partition line indices into alignment regions.
///
/// Blank lines always break a region (and belong to none). `Local`
/// additionally breaks on indentation-depth changes; `Global` spans the
/// whole file.
fn partition_regions(lines: &[Line], mode: AlignMode) -> Vec<Vec<usize>> {
    let mut regions: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_depth = 0;

    for (i, line) in lines.iter().enumerate() {
        if line.is_blank() {
            if mode != AlignMode::Global && !current.is_empty() {
                regions.push(std::mem::take(&mut current));
            }
            continue;
        }
        if mode == AlignMode::Local && !current.is_empty() && line.depth != current_depth {
            regions.push(std::mem::take(&mut current));
        }
        current_depth = line.depth;
        current.push(i);
    }
    if !current.is_empty() {
        regions.push(current);
    }
    regions
}

/// Index of the first token of a line matching an operator class.
fn find_operator(line: &Line, class: &str) -> Option<usize> {
    line.tokens.iter().position(|t| {
        matches!(
            t.kind,
            TokenKind::Operator | TokenKind::Delimiter | TokenKind::Keyword
        ) && t.text.eq_ignore_ascii_case(class)
    })
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn align_class(lines: &mut [Line], region: &[usize], class: &str, unit_width: usize) {
    // Pass 1: canonicalize the gap before each operator to a single space,
    // then measure the column it starts at.
    let mut columns: Vec<(usize, usize)> = Vec::new();
    for &i in region {
        let Some(pos) = find_operator(&lines[i], class) else {
            continue;
        };
        let pos = canonicalize_gap(&mut lines[i], pos);
        ensure_space_after(&mut lines[i], pos);
        let prefix: usize = lines[i].tokens[..pos].iter().map(|t| width(&t.text)).sum();
        columns.push((i, lines[i].depth * unit_width + prefix));
    }

    let Some(&(_, target)) = columns.iter().max_by_key(|(_, col)| *col) else {
        return;
    };

    // Pass 2: pad every other qualifying line out to the region maximum.
    for (i, column) in columns {
        let pad = target - column;
        if pad == 0 {
            continue;
        }
        let pos = find_operator(&lines[i], class).expect("operator found in pass 1");
        let line = &mut lines[i];
        if pos > 0 && line.tokens[pos - 1].kind == TokenKind::Whitespace {
            let extra = " ".repeat(pad);
            line.tokens[pos - 1].text.push_str(&extra);
        } else {
            let (ln, col) = (line.tokens[pos].line, line.tokens[pos].column);
            line.tokens
                .insert(pos, Token::new(TokenKind::Whitespace, " ".repeat(pad), ln, col));
        }
    }
}

/// Separate the operator from its right-hand side when the source had none.
/// Existing spacing after the operator is left alone.
fn ensure_space_after(line: &mut Line, pos: usize) {
    if pos + 1 < line.tokens.len() && line.tokens[pos + 1].kind != TokenKind::Whitespace {
        let (ln, col) = (line.tokens[pos].line, line.tokens[pos].column);
        line.tokens
            .insert(pos + 1, Token::new(TokenKind::Whitespace, " ", ln, col));
    }
}

/// Collapse the whitespace run before the operator to exactly one space
/// (inserting one when the operator abuts its left-hand side), so alignment
/// is independent of source padding and therefore idempotent.
///
/// Returns the operator's index after the rewrite.
fn canonicalize_gap(line: &mut Line, pos: usize) -> usize {
    if pos == 0 {
        return pos;
    }
    if line.tokens[pos - 1].kind == TokenKind::Whitespace {
        line.tokens[pos - 1].text = " ".to_string();
        pos
    } else {
        let (ln, col) = (line.tokens[pos].line, line.tokens[pos].column);
        line.tokens
            .insert(pos, Token::new(TokenKind::Whitespace, " ", ln, col));
        pos + 1
    }
}
