//! Stack-based indentation for VHDL blocks.
//!
//! Walks the Line view in order, keeping a stack of open [`BlockKind`]s.
//! Depth increments on block-opening keywords (entity, architecture, process,
//! if/case/loop/record, generate, ...) and decrements on `end`, with `end`
//! lines rendered at the depth of their opener. `begin`, `else` and `elsif`
//! render at the parent depth without changing the stack. Multiple
//! openers/closers on one line adjust depth once per keyword, left to right.
//!
//! Lines continuing inside an unclosed parenthesis group (port/generic maps,
//! long association lists) get one extra level.

use crate::error::FormatError;
use crate::parser::lines::Line;
use crate::parser::token::TokenKind;
use crate::scope::{is_continuation_keyword, BlockKind};

/// Assign an indentation depth to every line and drop its leading
/// whitespace; rendering replaces it with `depth × indent_unit`.
///
/// Fails with [`FormatError::UnbalancedBlock`] when an `end` has no matching
/// opener. Blocks left open at end of input are tolerated; partial design
/// files are still formattable.
pub fn assign_depths(lines: &mut [Line]) -> Result<(), FormatError> {
    let mut indenter = VhdlIndenter::new();
    for line in lines.iter_mut() {
        line.depth = indenter.process_line(line)?;
        while line
            .tokens
            .first()
            .is_some_and(|t| t.kind == TokenKind::Whitespace)
        {
            line.tokens.remove(0);
        }
    }
    Ok(())
}

/// Tracks open blocks and parenthesis nesting across lines.
pub struct VhdlIndenter {
    block_stack: Vec<BlockKind>,
    paren_depth: usize,
}

impl Default for VhdlIndenter {
    fn default() -> Self {
        Self::new()
    }
}

impl VhdlIndenter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            block_stack: Vec::new(),
            paren_depth: 0,
        }
    }

    /// Current block-nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.block_stack.len()
    }

    /// Compute the render depth for one line and update the stack.
    pub fn process_line(&mut self, line: &Line) -> Result<usize, FormatError> {
        let code: Vec<_> = line.code_tokens().cloned().collect();

        let starts_in_parens = self.paren_depth > 0;
        let line_has_is = code.iter().any(|t| t.is_keyword("is"));
        let line_has_loop_or_generate = code
            .iter()
            .any(|t| t.is_keyword("loop") || t.is_keyword("generate"));
        let ends_with_semicolon = code.last().is_some_and(|t| t.is_delimiter(";"));

        let mut render = self.block_stack.len();

        // begin/else/elsif lines belong to the enclosing construct header
        if let Some(first) = code.first() {
            if first.kind == TokenKind::Keyword
                && is_continuation_keyword(&first.text.to_ascii_lowercase())
            {
                render = render.saturating_sub(1);
            }
        }

        // Leading closers lower the render depth; `end`, the construct
        // keywords that follow it, and `;` keep the prefix "leading".
        let mut leading = true;
        let mut after_end = false;

        for (idx, token) in code.iter().enumerate() {
            match token.kind {
                TokenKind::Keyword => {
                    let word = token.text.to_ascii_lowercase();
                    if word == "end" {
                        if self.block_stack.pop().is_none() {
                            return Err(FormatError::UnbalancedBlock {
                                line: token.line,
                                column: token.column,
                            });
                        }
                        after_end = true;
                        if leading {
                            render = self.block_stack.len();
                        }
                    } else if !after_end {
                        let opener = if word == "for" && idx == 0 {
                            BlockKind::from_for_keyword(
                                line_has_loop_or_generate,
                                ends_with_semicolon,
                            )
                        } else {
                            classify_opener(&word, idx == 0, line_has_is)
                        };
                        if let Some(kind) = opener {
                            self.block_stack.push(kind);
                        }
                        if !is_continuation_keyword(&word) {
                            leading = false;
                        }
                    }
                }
                TokenKind::Delimiter => match token.text.as_str() {
                    ";" => after_end = false,
                    "(" => {
                        self.paren_depth += 1;
                        leading = false;
                    }
                    ")" => {
                        self.paren_depth = self.paren_depth.saturating_sub(1);
                    }
                    _ => leading = false,
                },
                _ => leading = false,
            }
        }

        // One extra level while inside an open parenthesis group, except for
        // the line whose first token closes it.
        let closes_first = code
            .first()
            .is_some_and(|t| t.is_delimiter(")"));
        if starts_in_parens && !closes_first {
            render += 1;
        }

        Ok(render)
    }
}

fn classify_opener(word: &str, first_code_token: bool, line_has_is: bool) -> Option<BlockKind> {
    if first_code_token {
        if let Some(kind) = BlockKind::from_leading_keyword(word) {
            return Some(kind);
        }
    }
    BlockKind::from_keyword(word).or_else(|| BlockKind::from_subprogram_keyword(word, line_has_is))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lines::group_lines;
    use crate::parser::scanner::tokenize;

    fn depths(input: &str) -> Vec<usize> {
        let mut lines = group_lines(tokenize(input).unwrap());
        assign_depths(&mut lines).unwrap();
        lines.iter().map(|l| l.depth).collect()
    }

    #[test]
    fn test_if_block() {
        let d = depths("if a = '1' then\nb <= c;\nend if;");
        assert_eq!(d, vec![0, 1, 0]);
    }

    #[test]
    fn test_if_else() {
        let d = depths("if a then\nb <= c;\nelse\nb <= d;\nend if;");
        assert_eq!(d, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_elsif_at_if_level() {
        let d = depths("if a then\nx <= b;\nelsif c then\nx <= d;\nend if;");
        assert_eq!(d, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_nested_if() {
        let d = depths("if a then\nif b then\nx <= y;\nend if;\nend if;");
        assert_eq!(d, vec![0, 1, 2, 1, 0]);
    }

    #[test]
    fn test_architecture_begin_end() {
        let d = depths(
            "architecture rtl of top is\nsignal x : bit;\nbegin\nx <= '1';\nend rtl;",
        );
        assert_eq!(d, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_process_inside_architecture() {
        let d = depths(
            "architecture rtl of top is\nbegin\np1 : process (clk)\nbegin\nq <= d;\nend process;\nend rtl;",
        );
        assert_eq!(d, vec![0, 0, 1, 1, 2, 1, 0]);
    }

    #[test]
    fn test_for_loop() {
        let d = depths("for i in 0 to 3 loop\nx(i) <= y(i);\nend loop;");
        assert_eq!(d, vec![0, 1, 0]);
    }

    #[test]
    fn test_case_block() {
        let d = depths("case sel is\nwhen others =>\ny <= a;\nend case;");
        assert_eq!(d, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_record_type() {
        let d = depths("type r is record\nfield : bit;\nend record;");
        assert_eq!(d, vec![0, 1, 0]);
    }

    #[test]
    fn test_generate_with_label() {
        let d = depths("g1 : for i in 0 to 3 generate\nx(i) <= y(i);\nend generate;");
        assert_eq!(d, vec![0, 1, 0]);
    }

    #[test]
    fn test_direct_instantiation_does_not_open() {
        let d = depths("u1 : entity work.counter port map (clk => clk);\nx <= y;");
        assert_eq!(d, vec![0, 0]);
    }

    #[test]
    fn test_port_list_continuation_indent() {
        let d = depths("entity e is\nport (\nclk : in bit;\nq : out bit\n);\nend e;");
        assert_eq!(d, vec![0, 1, 2, 2, 1, 0]);
    }

    #[test]
    fn test_function_declaration_does_not_open() {
        let d = depths("function f (x : integer) return integer;\nsignal s : bit;");
        assert_eq!(d, vec![0, 0]);
    }

    #[test]
    fn test_function_body_opens() {
        let d = depths(
            "function f (x : integer) return integer is\nbegin\nreturn x;\nend function;",
        );
        assert_eq!(d, vec![0, 0, 1, 0]);
    }

    #[test]
    fn test_multiple_closers_on_one_line() {
        let d = depths("if a then\nif b then\nx <= y;\nend if; end if;\nz <= w;");
        assert_eq!(d, vec![0, 1, 2, 0, 0]);
    }

    #[test]
    fn test_configuration_block() {
        let d = depths(
            "configuration cfg of top is\nfor rtl\nfor u1 : comp use entity work.gate;\nend for;\nend cfg;",
        );
        assert_eq!(d, vec![0, 1, 2, 1, 0]);
    }

    #[test]
    fn test_unbalanced_end() {
        let mut lines = group_lines(tokenize("end if;").unwrap());
        let err = assign_depths(&mut lines).unwrap_err();
        assert!(matches!(err, FormatError::UnbalancedBlock { line: 1, .. }));
    }

    #[test]
    fn test_unclosed_block_is_tolerated() {
        let d = depths("if a then\nx <= y;");
        assert_eq!(d, vec![0, 1]);
    }
}
