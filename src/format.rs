use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::assembler::Program;
use crate::config::AsmConfig;
use crate::encoder::EncodedInstruction;
use crate::error::AsmError;

/// Human readable listing: decimal address, hex word, binary word.
pub fn listing(instructions: &[EncodedInstruction]) -> String {
    let mut buf = String::from("Assembled instructions:\n");
    for i in instructions {
        let _ = writeln!(buf, "  {:3}: 0x{:04X} ({:016b})", i.address, i.word, i.word);
    }
    buf
}

#[derive(Debug, Serialize)]
struct JsonListing<'a> {
    symbols: BTreeMap<String, u32>,
    instructions: &'a [EncodedInstruction],
}

pub fn json_listing(program: &Program) -> serde_json::Result<String> {
    let out = JsonListing {
        symbols: program.symbols.to_map(),
        instructions: &program.instructions,
    };
    serde_json::to_string_pretty(&out)
}

/// Memory initializer body: zero-fill every word, then one assignment per
/// instruction in address order. Fails when the program does not fit the
/// configured memory.
pub fn memory_init(instructions: &[EncodedInstruction], cfg: &AsmConfig) -> Result<String, AsmError> {
    if instructions.len() > cfg.memory_words {
        return Err(AsmError::ProgramTooLarge {
            count: instructions.len(),
            capacity: cfg.memory_words,
        });
    }
    let mem = &cfg.memory_name;
    let mut lines = vec![
        "    // Initialize all memory to 0".to_string(),
        format!("    for (i = 0; i < {}; i = i + 1) begin", cfg.memory_words),
        format!("        {mem}[i] = 16'b{:016b};", 0),
        "    end".to_string(),
        String::new(),
        "    // Program instructions".to_string(),
    ];
    for i in instructions {
        lines.push(format!("    {mem}[{}] = 16'h{:04X};", i.address, i.word));
    }
    Ok(lines.join("\n"))
}
