use crate::error::AsmError;
use crate::parser::ParsedLine;

/// A rewriting stage that runs between parsing and pass 1.
///
/// Implementations receive and return the same statement stream the
/// assembler would otherwise see directly. A label-only entry must stay
/// label-only: it may be dropped or moved, but it may never be turned into
/// something that occupies an address.
pub trait Frontend {
    fn rewrite(&self, lines: Vec<ParsedLine>) -> Result<Vec<ParsedLine>, AsmError>;
}

/// Hands the stream through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Frontend for Passthrough {
    fn rewrite(&self, lines: Vec<ParsedLine>) -> Result<Vec<ParsedLine>, AsmError> {
        Ok(lines)
    }
}

/// Number of statements in `lines` that occupy an address.
pub fn address_count(lines: &[ParsedLine]) -> usize {
    lines.iter().filter(|l| !l.is_label_only()).count()
}
