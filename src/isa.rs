use serde::{Deserialize, Serialize};

/// Bit position of the opcode nibble.
pub const OPCODE_SHIFT: u16 = 12;
/// Bit position of the first 3-bit register field.
pub const FIELD_A_SHIFT: u16 = 9;
/// Bit position of the second 3-bit register field.
pub const FIELD_B_SHIFT: u16 = 6;
/// Largest value that fits the low 6-bit immediate/address slot.
pub const LOW6_MAX: u16 = 0x3F;

/// General purpose register R0..R7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Register(u8);

impl Register {
    pub const COUNT: u8 = 8;

    pub fn new(index: u8) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index))
    }

    /// Case-insensitive `R0`..`R7`.
    pub fn parse(token: &str) -> Option<Self> {
        let digits = token.strip_prefix('R').or_else(|| token.strip_prefix('r'))?;
        if digits.len() != 1 {
            return None;
        }
        let index = digits.parse::<u8>().ok()?;
        Self::new(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Every mnemonic in the opcode table, implemented or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mnemonic {
    Loadi,
    Add,
    Sub,
    And,
    Or,
    Xor,
    Store,
    Load,
    Shl,
    Shr,
    Mov,
    Cmp,
    Jump,
    Jz,
    Jnz,
    Not,
    Halt,
    Push,
    Pop,
    Mul,
    Div,
    In,
    Out,
    Reti,
}

#[derive(Debug, Clone, Copy)]
pub struct OpcodeDesc {
    pub mnemonic: Mnemonic,
    pub name: &'static str,
    pub opcode: u8,
    /// False for table entries that have no encoding rule yet.
    pub implemented: bool,
}

const fn op(mnemonic: Mnemonic, name: &'static str, opcode: u8, implemented: bool) -> OpcodeDesc {
    OpcodeDesc { mnemonic, name, opcode, implemented }
}

pub const OPCODES: &[OpcodeDesc] = &[
    op(Mnemonic::Loadi, "LOADI", 0x0, true),
    op(Mnemonic::Add, "ADD", 0x1, true),
    op(Mnemonic::Sub, "SUB", 0x2, true),
    op(Mnemonic::And, "AND", 0x3, false),
    op(Mnemonic::Or, "OR", 0x4, false),
    op(Mnemonic::Xor, "XOR", 0x5, false),
    op(Mnemonic::Store, "STORE", 0x6, true),
    op(Mnemonic::Load, "LOAD", 0x7, true),
    op(Mnemonic::Shl, "SHL", 0x8, false),
    op(Mnemonic::Shr, "SHR", 0x9, false),
    op(Mnemonic::Mov, "MOV", 0xA, false),
    op(Mnemonic::Cmp, "CMP", 0xB, false),
    op(Mnemonic::Jump, "JUMP", 0xC, true),
    op(Mnemonic::Jz, "JZ", 0xD, true),
    op(Mnemonic::Jnz, "JNZ", 0xE, true),
    op(Mnemonic::Not, "NOT", 0xF, false),
    op(Mnemonic::Halt, "HALT", 0xF, true),
    op(Mnemonic::Push, "PUSH", 0xE, true),
    op(Mnemonic::Pop, "POP", 0xE, true),
    op(Mnemonic::Mul, "MUL", 0xD, true),
    op(Mnemonic::Div, "DIV", 0xD, false),
    op(Mnemonic::In, "IN", 0xE, false),
    op(Mnemonic::Out, "OUT", 0xE, false),
    op(Mnemonic::Reti, "RETI", 0xF, true),
];

impl Mnemonic {
    /// Looks up an already-uppercased mnemonic token.
    pub fn from_name(name: &str) -> Option<Self> {
        OPCODES.iter().find(|d| d.name == name).map(|d| d.mnemonic)
    }

    pub fn desc(self) -> &'static OpcodeDesc {
        // OPCODES is declared in enum order.
        &OPCODES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.desc().name
    }

    pub fn opcode(self) -> u8 {
        self.desc().opcode
    }

    pub fn is_implemented(self) -> bool {
        self.desc().implemented
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
