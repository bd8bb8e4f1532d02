pub mod assembler;
pub mod config;
pub mod encoder;
pub mod error;
pub mod format;
pub mod frontend;
pub mod isa;
pub mod operand;
pub mod parser;
pub mod symbols;

pub use assembler::{assemble, Assembler, Program};
pub use config::AsmConfig;
pub use encoder::{EncodedInstruction, Instruction};
pub use error::{AsmError, EncodeError, ErrorKind};
pub use isa::{Mnemonic, Register};
pub use parser::ParsedLine;
pub use symbols::SymbolTable;
