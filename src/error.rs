use thiserror::Error;

/// Coarse error classes, for callers that only care which family failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    UnknownInstruction,
    NotImplemented,
    Operand,
    Range,
}

/// Failure while turning one statement into a word.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),
    #[error("Instruction encoding not implemented: {0}")]
    NotImplemented(String),
    #[error("{mnemonic} expects {expected} operand(s), operand {index} is missing")]
    MissingOperand { mnemonic: String, expected: usize, index: usize },
    #[error("{mnemonic} expects {expected} operand(s), got {found}")]
    UnexpectedOperand { mnemonic: String, expected: usize, found: usize },
    #[error("Invalid register: {0}")]
    ExpectedRegister(String),
    #[error("Expected an immediate or address, found register {0}")]
    ExpectedValue(String),
    #[error("Malformed operand: {0}")]
    MalformedOperand(String),
    #[error("Undefined label: {0}")]
    UndefinedLabel(String),
    #[error("Value {value} exceeds 6-bit range (0-{max})")]
    Range { value: i64, max: u16 },
}

impl EncodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::UnknownInstruction(_) => ErrorKind::UnknownInstruction,
            EncodeError::NotImplemented(_) => ErrorKind::NotImplemented,
            EncodeError::Range { .. } => ErrorKind::Range,
            EncodeError::MissingOperand { .. }
            | EncodeError::UnexpectedOperand { .. }
            | EncodeError::ExpectedRegister(_)
            | EncodeError::ExpectedValue(_)
            | EncodeError::MalformedOperand(_)
            | EncodeError::UndefinedLabel(_) => ErrorKind::Operand,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("line {line}: syntax error: {reason}")]
    Syntax { line: usize, reason: String },
    #[error("line {line}: label `{label}` already defined on line {first_line}")]
    DuplicateLabel { label: String, line: usize, first_line: usize },
    #[error("Error at address {address} (line {line}): {error}")]
    Encode { address: u32, line: usize, error: EncodeError },
    #[error("program has {count} instructions, memory holds {capacity} words")]
    ProgramTooLarge { count: usize, capacity: usize },
}

impl AsmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AsmError::Syntax { .. } | AsmError::DuplicateLabel { .. } => ErrorKind::Syntax,
            AsmError::Encode { error, .. } => error.kind(),
            AsmError::ProgramTooLarge { .. } => ErrorKind::Range,
        }
    }

    /// Address of the failing instruction, for pass 2 errors.
    pub fn address(&self) -> Option<u32> {
        match self {
            AsmError::Encode { address, .. } => Some(*address),
            _ => None,
        }
    }
}
