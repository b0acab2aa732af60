//! Case conversion for VHDL keywords and built-in type names.
//!
//! Implements the `keyword_case` / `type_case` options. Classification into
//! Keyword/TypeName happened in the scanner against fixed tables; this pass is
//! purely a token-text rewrite. Case changes never alter character count in
//! ASCII VHDL, so no line/column shifts occur.

use crate::config::{Case, Config};
use crate::parser::token::{Token, TokenKind};

/// Case settings for the two normalized token classes.
#[derive(Debug, Clone, Copy)]
pub struct CaseSettings {
    pub keywords: Case,
    pub types: Case,
}

impl CaseSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            keywords: config.keyword_case,
            types: config.type_case,
        }
    }

    /// Check if any conversion is requested
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.keywords != Case::Unchanged || self.types != Case::Unchanged
    }
}

fn apply_case(text: &str, case: Case) -> Option<String> {
    match case {
        Case::Upper => Some(text.to_ascii_uppercase()),
        Case::Lower => Some(text.to_ascii_lowercase()),
        Case::Unchanged => None,
    }
}

/// Rewrite keyword and type-name tokens to the configured case.
///
/// User-defined identifiers, literals and comments are never touched.
pub fn convert_case(tokens: &mut [Token], settings: CaseSettings) {
    if !settings.is_enabled() {
        return;
    }
    for token in tokens.iter_mut() {
        let converted = match token.kind {
            TokenKind::Keyword => apply_case(&token.text, settings.keywords),
            TokenKind::TypeName => apply_case(&token.text, settings.types),
            _ => None,
        };
        if let Some(text) = converted {
            token.text = text;
        }
    }
}
