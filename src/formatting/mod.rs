//! Symbol alphabets used in report tables.
//!
//! The report is Markdown, so the default alphabet uses emoji. `--plain`
//! switches every table to ASCII symbols for renderers without emoji fonts.

use crate::core::{AttributeValue, CloneCode, ImpureMode, TriState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmojiMode {
    #[default]
    Always, // Always use emoji
    Never, // Never use emoji
}

impl EmojiMode {
    pub fn should_use_emoji(&self) -> bool {
        matches!(self, Self::Always)
    }
}

/// Symbols written into table cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSet {
    pub pure: &'static str,
    pub impure_overwrite: &'static str,
    pub impure_accumulate: &'static str,
    /// Impure, mode not recorded
    pub impure_unknown: &'static str,
    /// Tri-state `true` (immutable return, isolated callback argument)
    pub yes: &'static str,
    /// Tri-state `false`
    pub no: &'static str,
    /// Method absent from the version, or attribute missing
    pub not_applicable: &'static str,
    /// Clone code `-1`
    pub unknown_code: &'static str,
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self::emoji()
    }
}

impl SymbolSet {
    pub fn emoji() -> Self {
        Self {
            pure: "✅",
            impure_overwrite: "⚠️",
            impure_accumulate: "☠️",
            impure_unknown: "❌",
            yes: "✅",
            no: "☠️",
            not_applicable: "-",
            unknown_code: "?",
        }
    }

    pub fn plain() -> Self {
        Self {
            pure: "pure",
            impure_overwrite: "overwrite",
            impure_accumulate: "accumulate",
            impure_unknown: "impure",
            yes: "yes",
            no: "no",
            not_applicable: "-",
            unknown_code: "?",
        }
    }

    pub fn for_mode(mode: EmojiMode) -> Self {
        if mode.should_use_emoji() {
            Self::emoji()
        } else {
            Self::plain()
        }
    }

    /// Purity cell: pure, impure by mode, or N/A when unknown.
    pub fn purity(&self, pure: TriState, mode: ImpureMode) -> &'static str {
        match (pure, mode) {
            (TriState::True, _) => self.pure,
            (TriState::False, ImpureMode::Overwrite) => self.impure_overwrite,
            (TriState::False, ImpureMode::Accumulate) => self.impure_accumulate,
            (TriState::False, ImpureMode::Unknown) => self.impure_unknown,
            (TriState::Unknown, _) => self.not_applicable,
        }
    }

    /// Symbol for the boolean purity value used in the change log.
    pub fn purity_flag(&self, pure: bool) -> &'static str {
        if pure {
            self.pure
        } else {
            self.no
        }
    }

    pub fn tristate(&self, state: TriState) -> &'static str {
        match state {
            TriState::True => self.yes,
            TriState::False => self.no,
            TriState::Unknown => self.not_applicable,
        }
    }

    /// Clone code numeral; codes outside the documented domain still render.
    pub fn clone_code(&self, code: CloneCode) -> String {
        match code {
            CloneCode::Absent => self.not_applicable.to_string(),
            CloneCode::Code(CloneCode::UNKNOWN) => self.unknown_code.to_string(),
            CloneCode::Code(c) => c.to_string(),
        }
    }

    pub fn value(&self, value: AttributeValue) -> String {
        match value {
            AttributeValue::Absent => self.not_applicable.to_string(),
            AttributeValue::Flag(flag) => self
                .tristate(if flag { TriState::True } else { TriState::False })
                .to_string(),
            AttributeValue::Mode(mode) => self.purity(TriState::False, mode).to_string(),
            AttributeValue::Code(code) => self.clone_code(CloneCode::Code(code)),
        }
    }
}
