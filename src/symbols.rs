use std::collections::{BTreeMap, HashMap};

use crate::error::AsmError;
use crate::parser::ParsedLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Symbol {
    address: u32,
    line: usize,
}

/// Label name -> address, shared by both passes of one run.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a label. Labels are write-once; `line` is only used for diagnostics.
    pub fn bind(&mut self, label: &str, address: u32, line: usize) -> Result<(), AsmError> {
        if let Some(prev) = self.symbols.get(label) {
            return Err(AsmError::DuplicateLabel {
                label: label.to_string(),
                line,
                first_line: prev.line,
            });
        }
        self.symbols.insert(label.to_string(), Symbol { address, line });
        Ok(())
    }

    pub fn resolve(&self, label: &str) -> Option<u32> {
        self.symbols.get(label).map(|s| s.address)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Sorted snapshot, for listings and JSON output.
    pub fn to_map(&self) -> BTreeMap<String, u32> {
        self.symbols.iter().map(|(k, s)| (k.clone(), s.address)).collect()
    }
}

/// A statement that occupies an address.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    pub address: u32,
    pub line: &'a ParsedLine,
}

/// Pass 1: assigns addresses and binds every label before anything is encoded.
pub fn build_symbol_table(lines: &[ParsedLine]) -> Result<(SymbolTable, Vec<Placed<'_>>), AsmError> {
    let mut table = SymbolTable::new();
    let mut placed = Vec::with_capacity(lines.len());
    let mut address = 0u32;
    for pl in lines {
        if let Some(label) = &pl.label {
            table.bind(label, address, pl.line)?;
        }
        if !pl.is_label_only() {
            placed.push(Placed { address, line: pl });
            address += 1;
        }
    }
    tracing::debug!(labels = table.len(), instructions = address, "pass 1 complete");
    Ok((table, placed))
}
