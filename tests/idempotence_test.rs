//! Idempotence and token-preservation properties.
//!
//! For any valid input and configuration, formatting a second time must
//! change nothing, and the formatted output must carry exactly the same
//! non-whitespace token texts as the input (modulo the requested case
//! changes and any stripped comments/reports).

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use vprettier::parser::{tokenize, TokenKind};
use vprettier::{beautify, AlignMode, AlignScope, Case, Config, NewLinePolicy};

const SAMPLES: &[&str] = &[
    "signal a : std_logic; signal bb : std_logic;",
    "a<=b;\nlongname<=c;\n",
    "\
entity adder is
port (
a : in std_logic_vector(7 downto 0);
b : in std_logic_vector(7 downto 0);
sum : out std_logic_vector(8 downto 0)
);
end adder;

architecture behav of adder is
begin
sum <= ('0' & a) + ('0' & b);
end behav;
",
    "\
process (clk, rst)
variable tmp : integer := 0;
begin
if rst = '1' then
tmp := 0;
elsif rising_edge(clk) then
case mode is
when \"01\" =>
tmp := tmp + 1;
when others =>
tmp := 0;
end case;
end if;
end process;
",
    "\
-- top level
library ieee; -- packages
use ieee.std_logic_1164.all;
type state_t is (idle, busy, done);
alias short is very_long_signal_name;
report \"elaboration checkpoint\";
",
];

fn configs() -> Vec<Config> {
    vec![
        Config::default(),
        Config {
            keyword_case: Case::Lower,
            type_case: Case::Lower,
            indent_unit: "  ".to_string(),
            ..Default::default()
        },
        Config {
            keyword_case: Case::Lower,
            type_case: Case::Upper,
            align_scope: AlignScope::Regional,
            align_mode: AlignMode::Local,
            ..Default::default()
        },
        Config {
            keyword_case: Case::Upper,
            type_case: Case::Upper,
            align_scope: AlignScope::All,
            align_mode: AlignMode::Global,
            newline_then: NewLinePolicy::Unchanged,
            newline_else: NewLinePolicy::Unchanged,
            ..Default::default()
        },
        Config {
            keyword_case: Case::Lower,
            type_case: Case::Lower,
            remove_comments: true,
            remove_reports: true,
            check_alias: true,
            ..Default::default()
        },
    ]
}

#[test]
fn test_idempotence_across_samples_and_configs() {
    for (si, sample) in SAMPLES.iter().enumerate() {
        for (ci, config) in configs().iter().enumerate() {
            let once = beautify(sample, config)
                .unwrap_or_else(|e| panic!("sample {si} config {ci} failed: {e}"));
            let twice = beautify(&once.text, config)
                .unwrap_or_else(|e| panic!("reformat of sample {si} config {ci} failed: {e}"));
            assert_eq!(
                once.text, twice.text,
                "sample {si} config {ci} is not idempotent"
            );
        }
    }
}

/// Lowercased non-blank token texts, comments excluded.
fn significant_texts(text: &str) -> Vec<String> {
    tokenize(text)
        .unwrap()
        .into_iter()
        .filter(|t| {
            !t.is_blank() && !matches!(t.kind, TokenKind::Comment | TokenKind::EndOfInput)
        })
        .map(|t| t.text.to_ascii_lowercase())
        .collect()
}

#[test]
fn test_token_preservation() {
    let config = Config {
        keyword_case: Case::Upper,
        type_case: Case::Lower,
        align_scope: AlignScope::Regional,
        align_mode: AlignMode::Local,
        ..Default::default()
    };
    for sample in SAMPLES {
        let out = beautify(sample, &config).unwrap();
        assert_eq!(
            significant_texts(sample),
            significant_texts(&out.text),
            "token sequence changed for sample: {sample:?}"
        );
    }
}

#[test]
fn test_token_preservation_modulo_stripping() {
    let config = Config {
        keyword_case: Case::Lower,
        type_case: Case::Lower,
        remove_comments: true,
        ..Default::default()
    };
    let input = "a <= b; -- gone\n-- also gone\nc <= d;\n";
    let out = beautify(input, &config).unwrap();
    assert_eq!(significant_texts(input), significant_texts(&out.text));
    assert!(!out.text.contains("gone"));
}

#[test]
fn test_semicolon_insert_property() {
    let config = Config {
        keyword_case: Case::Lower,
        type_case: Case::Lower,
        newline_semicolon: NewLinePolicy::Insert,
        ..Default::default()
    };
    let input = "a <= b; c <= d; e <= \"x;y\"; -- f; g\n";
    let out = beautify(input, &config).unwrap();
    for line in out.text.lines() {
        if let Some(pos) = line.find(';') {
            // every `;` outside literals/comments ends its line
            let in_string = line[..pos].matches('"').count() % 2 == 1;
            let in_comment = line[..pos].contains("--");
            if !in_string && !in_comment {
                assert!(
                    line[pos + 1..].trim_start().is_empty()
                        || line[pos + 1..].trim_start().starts_with("--"),
                    "semicolon not at end of line: {line:?}"
                );
            }
        }
    }
}
