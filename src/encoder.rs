use serde::{Deserialize, Serialize};

use crate::error::{AsmError, EncodeError};
use crate::isa::{Mnemonic, Register, FIELD_A_SHIFT, FIELD_B_SHIFT, LOW6_MAX, OPCODE_SHIFT};
use crate::operand::Operand;
use crate::symbols::{Placed, SymbolTable};

/// A word placed at an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedInstruction {
    pub address: u32,
    pub word: u16,
    /// Source line, kept for listings and diagnostics.
    pub line: usize,
}

/// Validated instruction, one variant per mnemonic with an encoding rule.
/// 6-bit fields are range-checked when the variant is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Loadi { rd: Register, imm: u8 },
    Add { rd: Register, rs1: Register, rs2: Register },
    Sub { rd: Register, rs1: Register, rs2: Register },
    Store { rs: Register, addr: u8 },
    Load { rd: Register, addr: u8 },
    Jump { addr: u8 },
    Jz { rs: Register, addr: u8 },
    Jnz { rs: Register, addr: u8 },
    Push { rs: Register },
    Pop { rd: Register },
    Mul { rd: Register, rs1: Register, rs2: Register },
    Halt,
    Reti,
}

/// Operand cursor that enforces the exact arity of one mnemonic.
struct Operands<'a> {
    mnemonic: Mnemonic,
    tokens: &'a [String],
    symbols: &'a SymbolTable,
    expected: usize,
    next: usize,
}

impl<'a> Operands<'a> {
    fn new(
        mnemonic: Mnemonic,
        tokens: &'a [String],
        symbols: &'a SymbolTable,
        expected: usize,
    ) -> Result<Self, EncodeError> {
        if tokens.len() > expected {
            return Err(EncodeError::UnexpectedOperand {
                mnemonic: mnemonic.name().to_string(),
                expected,
                found: tokens.len(),
            });
        }
        Ok(Self { mnemonic, tokens, symbols, expected, next: 0 })
    }

    fn take(&mut self) -> Result<(&'a str, Operand), EncodeError> {
        let index = self.next;
        let token = self.tokens.get(index).ok_or_else(|| EncodeError::MissingOperand {
            mnemonic: self.mnemonic.name().to_string(),
            expected: self.expected,
            index: index + 1,
        })?;
        self.next += 1;
        Ok((token.as_str(), Operand::resolve(token, self.symbols)?))
    }

    fn reg(&mut self) -> Result<Register, EncodeError> {
        match self.take() {
            Ok((token, op)) => op.register(token),
            Err(EncodeError::UndefinedLabel(t) | EncodeError::MalformedOperand(t)) => {
                Err(EncodeError::ExpectedRegister(t))
            }
            Err(e) => Err(e),
        }
    }

    fn low6(&mut self) -> Result<u8, EncodeError> {
        let (_, op) = self.take()?;
        let v = op.value()?;
        if !(0..=i64::from(LOW6_MAX)).contains(&v) {
            return Err(EncodeError::Range { value: v, max: LOW6_MAX });
        }
        Ok(v as u8)
    }
}

impl Instruction {
    /// Resolves operands for `mnemonic` against the finished symbol table.
    pub fn build(
        mnemonic: Mnemonic,
        operands: &[String],
        symbols: &SymbolTable,
    ) -> Result<Self, EncodeError> {
        let ops = |arity| Operands::new(mnemonic, operands, symbols, arity);
        let inst = match mnemonic {
            Mnemonic::Loadi => {
                let mut o = ops(2)?;
                Instruction::Loadi { rd: o.reg()?, imm: o.low6()? }
            }
            Mnemonic::Add => {
                let mut o = ops(3)?;
                Instruction::Add { rd: o.reg()?, rs1: o.reg()?, rs2: o.reg()? }
            }
            Mnemonic::Sub => {
                let mut o = ops(3)?;
                Instruction::Sub { rd: o.reg()?, rs1: o.reg()?, rs2: o.reg()? }
            }
            Mnemonic::Mul => {
                let mut o = ops(3)?;
                Instruction::Mul { rd: o.reg()?, rs1: o.reg()?, rs2: o.reg()? }
            }
            Mnemonic::Store => {
                let mut o = ops(2)?;
                Instruction::Store { rs: o.reg()?, addr: o.low6()? }
            }
            Mnemonic::Load => {
                let mut o = ops(2)?;
                Instruction::Load { rd: o.reg()?, addr: o.low6()? }
            }
            Mnemonic::Jump => Instruction::Jump { addr: ops(1)?.low6()? },
            Mnemonic::Jz => {
                let mut o = ops(2)?;
                Instruction::Jz { rs: o.reg()?, addr: o.low6()? }
            }
            Mnemonic::Jnz => {
                let mut o = ops(2)?;
                Instruction::Jnz { rs: o.reg()?, addr: o.low6()? }
            }
            Mnemonic::Push => Instruction::Push { rs: ops(1)?.reg()? },
            Mnemonic::Pop => Instruction::Pop { rd: ops(1)?.reg()? },
            Mnemonic::Halt => {
                ops(0)?;
                Instruction::Halt
            }
            Mnemonic::Reti => {
                ops(0)?;
                Instruction::Reti
            }
            Mnemonic::And
            | Mnemonic::Or
            | Mnemonic::Xor
            | Mnemonic::Shl
            | Mnemonic::Shr
            | Mnemonic::Mov
            | Mnemonic::Cmp
            | Mnemonic::Not
            | Mnemonic::Div
            | Mnemonic::In
            | Mnemonic::Out => {
                return Err(EncodeError::NotImplemented(mnemonic.name().to_string()))
            }
        };
        Ok(inst)
    }

    pub fn mnemonic(&self) -> Mnemonic {
        match self {
            Instruction::Loadi { .. } => Mnemonic::Loadi,
            Instruction::Add { .. } => Mnemonic::Add,
            Instruction::Sub { .. } => Mnemonic::Sub,
            Instruction::Store { .. } => Mnemonic::Store,
            Instruction::Load { .. } => Mnemonic::Load,
            Instruction::Jump { .. } => Mnemonic::Jump,
            Instruction::Jz { .. } => Mnemonic::Jz,
            Instruction::Jnz { .. } => Mnemonic::Jnz,
            Instruction::Push { .. } => Mnemonic::Push,
            Instruction::Pop { .. } => Mnemonic::Pop,
            Instruction::Mul { .. } => Mnemonic::Mul,
            Instruction::Halt => Mnemonic::Halt,
            Instruction::Reti => Mnemonic::Reti,
        }
    }

    /// `opcode[15:12] | A[11:9] | B[8:6] | low6[5:0]`
    pub fn encode(&self) -> u16 {
        let r = |reg: &Register| u16::from(reg.index());
        let (a, b, low) = match self {
            Instruction::Loadi { rd, imm } => (r(rd), 0, u16::from(*imm)),
            // rs2 is not part of the word
            Instruction::Add { rd, rs1, .. }
            | Instruction::Sub { rd, rs1, .. }
            | Instruction::Mul { rd, rs1, .. } => (r(rs1), r(rd), 0),
            Instruction::Store { rs, addr } => (r(rs), 0, u16::from(*addr)),
            Instruction::Load { rd, addr } => (r(rd), 0, u16::from(*addr)),
            Instruction::Jump { addr } => (0, 0, u16::from(*addr)),
            Instruction::Jz { rs, addr } | Instruction::Jnz { rs, addr } => (r(rs), 0, u16::from(*addr)),
            Instruction::Push { rs } => (r(rs), 0, 0),
            Instruction::Pop { rd } => (0, r(rd), 0),
            Instruction::Halt => (0, 0, 0x000),
            Instruction::Reti => (0, 0, 0x001),
        };
        let opcode = u16::from(self.mnemonic().opcode());
        (opcode << OPCODE_SHIFT) | (a << FIELD_A_SHIFT) | (b << FIELD_B_SHIFT) | low
    }
}

/// Encodes a single statement given its mnemonic token.
pub fn encode_statement(
    mnemonic: &str,
    operands: &[String],
    symbols: &SymbolTable,
) -> Result<u16, EncodeError> {
    let m = Mnemonic::from_name(mnemonic)
        .ok_or_else(|| EncodeError::UnknownInstruction(mnemonic.to_string()))?;
    Ok(Instruction::build(m, operands, symbols)?.encode())
}

/// Pass 2: encodes every placed statement in address order, stopping at the
/// first failure.
pub fn encode_program(
    placed: &[Placed<'_>],
    symbols: &SymbolTable,
) -> Result<Vec<EncodedInstruction>, AsmError> {
    let mut out = Vec::with_capacity(placed.len());
    for p in placed {
        let pl = p.line;
        let wrap = |error: EncodeError| AsmError::Encode { address: p.address, line: pl.line, error };
        let mnemonic = pl.mnemonic.as_deref().unwrap_or_default();
        let word = encode_statement(mnemonic, &pl.operands, symbols).map_err(wrap)?;
        tracing::trace!(address = p.address, word, mnemonic, "encoded");
        out.push(EncodedInstruction { address: p.address, word, line: pl.line });
    }
    tracing::debug!(instructions = out.len(), "pass 2 complete");
    Ok(out)
}
