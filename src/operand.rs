use crate::error::EncodeError;
use crate::isa::Register;
use crate::symbols::SymbolTable;

/// An operand token after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Label { name: String, address: u32 },
    Literal(i64),
}

impl Operand {
    /// Classifies an operand token (already trimmed by the line parser):
    /// register, then label, then literal.
    /// Label lookup always wins over numeric parsing.
    pub fn resolve(t: &str, symbols: &SymbolTable) -> Result<Self, EncodeError> {
        if let Some(r) = Register::parse(t) {
            return Ok(Operand::Register(r));
        }
        if let Some(address) = symbols.resolve(t) {
            return Ok(Operand::Label { name: t.to_string(), address });
        }
        match parse_literal(t) {
            Some(v) => Ok(Operand::Literal(v)),
            None if looks_like_identifier(t) => Err(EncodeError::UndefinedLabel(t.to_string())),
            None => Err(EncodeError::MalformedOperand(t.to_string())),
        }
    }

    pub fn register(&self, token: &str) -> Result<Register, EncodeError> {
        match self {
            Operand::Register(r) => Ok(*r),
            _ => Err(EncodeError::ExpectedRegister(token.to_string())),
        }
    }

    pub fn value(&self) -> Result<i64, EncodeError> {
        match self {
            Operand::Register(r) => Err(EncodeError::ExpectedValue(r.to_string())),
            Operand::Label { address, .. } => Ok(i64::from(*address)),
            Operand::Literal(v) => Ok(*v),
        }
    }
}

/// Integer literal: `0x`/`0X` hex, `0b`/`0B` binary or decimal, with an
/// optional leading `-` and one optional pair of enclosing brackets.
pub fn parse_literal(token: &str) -> Option<i64> {
    let mut t = token;
    if let Some(inner) = t.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        t = inner.trim();
    }
    let (neg, t) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t),
    };
    // from_str_radix takes its own sign; only the leading `-` is allowed
    let v = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        if !hex.starts_with(|c: char| c.is_ascii_hexdigit()) {
            return None;
        }
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = t.strip_prefix("0b").or_else(|| t.strip_prefix("0B")) {
        if !bin.starts_with(['0', '1']) {
            return None;
        }
        i64::from_str_radix(bin, 2).ok()?
    } else {
        if !t.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        t.parse::<i64>().ok()?
    };
    Some(if neg { -v } else { v })
}

fn looks_like_identifier(t: &str) -> bool {
    let t = t.trim_start_matches('[');
    t.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_forms() {
        assert_eq!(parse_literal("0x1F"), Some(31));
        assert_eq!(parse_literal("0X1f"), Some(31));
        assert_eq!(parse_literal("0b101"), Some(5));
        assert_eq!(parse_literal("10"), Some(10));
        assert_eq!(parse_literal("[5]"), Some(5));
        assert_eq!(parse_literal("[0x10]"), Some(16));
        assert_eq!(parse_literal("-3"), Some(-3));
        assert_eq!(parse_literal("0x"), None);
        assert_eq!(parse_literal("+4"), None);
        assert_eq!(parse_literal("12abc"), None);
        assert_eq!(parse_literal("0x+1F"), None);
        assert_eq!(parse_literal("0x-5"), None);
        assert_eq!(parse_literal("-0x-5"), None);
        assert_eq!(parse_literal("0b+101"), None);
        assert_eq!(parse_literal("0b"), None);
        assert_eq!(parse_literal("-0x5"), Some(-5));
    }

    #[test]
    fn label_wins_over_literal() {
        let mut syms = SymbolTable::new();
        syms.bind("loop", 7, 1).unwrap();
        let op = Operand::resolve("loop", &syms).unwrap();
        assert_eq!(op, Operand::Label { name: "loop".into(), address: 7 });
        assert_eq!(op.value().unwrap(), 7);
    }

    #[test]
    fn unknown_identifier_is_undefined_label() {
        let syms = SymbolTable::new();
        assert_eq!(
            Operand::resolve("nowhere", &syms),
            Err(EncodeError::UndefinedLabel("nowhere".into()))
        );
        assert_eq!(
            Operand::resolve("12z", &syms),
            Err(EncodeError::MalformedOperand("12z".into()))
        );
    }
}
