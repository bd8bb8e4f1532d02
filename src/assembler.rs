use crate::config::AsmConfig;
use crate::encoder::{encode_program, EncodedInstruction};
use crate::error::AsmError;
use crate::frontend::{address_count, Frontend, Passthrough};
use crate::parser::{parse_source, ParsedLine};
use crate::symbols::{build_symbol_table, SymbolTable};

/// Output of a successful run.
#[derive(Debug, Clone)]
pub struct Program {
    pub symbols: SymbolTable,
    pub instructions: Vec<EncodedInstruction>,
}

impl Program {
    pub fn words(&self) -> Vec<u16> {
        self.instructions.iter().map(|i| i.word).collect()
    }
}

/// Parse -> front end -> pass 1 -> pass 2, each stage finishing before the
/// next one starts.
pub struct Assembler<F: Frontend = Passthrough> {
    pub cfg: AsmConfig,
    frontend: F,
}

impl Assembler<Passthrough> {
    pub fn new(cfg: AsmConfig) -> Self {
        Self { cfg, frontend: Passthrough }
    }
}

impl Default for Assembler<Passthrough> {
    fn default() -> Self {
        Self::new(AsmConfig::default())
    }
}

impl<F: Frontend> Assembler<F> {
    pub fn with_frontend(cfg: AsmConfig, frontend: F) -> Self {
        Self { cfg, frontend }
    }

    pub fn assemble(&self, source: &str) -> Result<Program, AsmError> {
        let lines = parse_source(source)?;
        tracing::debug!(statements = lines.len(), "parsed source");
        self.assemble_lines(lines)
    }

    pub fn assemble_lines(&self, lines: Vec<ParsedLine>) -> Result<Program, AsmError> {
        let before = address_count(&lines);
        let lines = self.frontend.rewrite(lines)?;
        tracing::debug!(before, after = address_count(&lines), "front end done");

        let (symbols, placed) = build_symbol_table(&lines)?;
        let instructions = encode_program(&placed, &symbols)?;
        Ok(Program { symbols, instructions })
    }
}

/// Assembles `source` with the default configuration.
pub fn assemble(source: &str) -> Result<Program, AsmError> {
    Assembler::new(AsmConfig::default()).assemble(source)
}
