use serde::{Deserialize, Serialize};

use crate::error::AsmError;

/// One non-empty source statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// 1-based line in the source file.
    pub line: usize,
    /// Uppercased mnemonic token; `None` for a label standing alone.
    pub mnemonic: Option<String>,
    pub operands: Vec<String>,
    pub label: Option<String>,
}

impl ParsedLine {
    pub fn instruction(line: usize, mnemonic: &str, operands: &[&str]) -> Self {
        Self {
            line,
            mnemonic: Some(mnemonic.to_uppercase()),
            operands: operands.iter().map(|s| s.to_string()).collect(),
            label: None,
        }
    }

    pub fn label_only(line: usize, label: &str) -> Self {
        Self { line, mnemonic: None, operands: Vec::new(), label: Some(label.to_string()) }
    }

    /// Pure-label entries never occupy an address.
    pub fn is_label_only(&self) -> bool {
        self.mnemonic.is_none()
    }
}

/// Parses one line; `Ok(None)` for blank and comment-only lines.
pub fn parse_line(line_no: usize, raw: &str) -> Result<Option<ParsedLine>, AsmError> {
    let mut s = raw;
    if let Some(p) = s.find(';') {
        s = &s[..p];
    }
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let (label, rest) = match s.split_once(':') {
        Some((name, rest)) => (Some(check_label(line_no, name.trim())?), rest.trim()),
        None => (None, s),
    };

    let mut tokens = rest
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(mnemonic) = tokens.next() else {
        return Ok(label.map(|l| ParsedLine {
            line: line_no,
            mnemonic: None,
            operands: Vec::new(),
            label: Some(l),
        }));
    };

    Ok(Some(ParsedLine {
        line: line_no,
        mnemonic: Some(mnemonic.to_uppercase()),
        operands: tokens.map(str::to_string).collect(),
        label,
    }))
}

fn check_label(line: usize, name: &str) -> Result<String, AsmError> {
    if name.is_empty() {
        return Err(AsmError::Syntax { line, reason: "missing label name before ':'".into() });
    }
    if name.contains(|c: char| c == ',' || c.is_whitespace()) {
        return Err(AsmError::Syntax { line, reason: format!("invalid label name `{name}`") });
    }
    Ok(name.to_string())
}

/// Parses a whole source file, keeping statements in source order.
pub fn parse_source(source: &str) -> Result<Vec<ParsedLine>, AsmError> {
    let mut out = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        if let Some(pl) = parse_line(i + 1, raw)? {
            out.push(pl);
        }
    }
    Ok(out)
}
