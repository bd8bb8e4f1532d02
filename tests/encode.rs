use toy16_asm::encoder::encode_statement;
use toy16_asm::{EncodeError, ErrorKind, SymbolTable};

fn enc(mnemonic: &str, ops: &[&str]) -> Result<u16, EncodeError> {
    let ops: Vec<String> = ops.iter().map(|s| s.to_string()).collect();
    encode_statement(mnemonic, &ops, &SymbolTable::new())
}

#[test]
fn loadi_packs_rd_and_imm() {
    for rd in 0..8u16 {
        for imm in [0u16, 1, 31, 63] {
            let w = enc("LOADI", &[format!("R{rd}").as_str(), imm.to_string().as_str()]).unwrap();
            assert_eq!(w, (rd << 9) | imm);
        }
    }
}

#[test]
fn add_drops_rs2() {
    for rd in 0..8u16 {
        for rs1 in 0..8u16 {
            let a = enc("ADD", &[format!("R{rd}").as_str(), format!("R{rs1}").as_str(), "R0"]).unwrap();
            let b = enc("ADD", &[format!("R{rd}").as_str(), format!("R{rs1}").as_str(), "R7"]).unwrap();
            assert_eq!(a, b);
            assert_eq!(a >> 12, 0x1);
            assert_eq!((a >> 9) & 7, rs1);
            assert_eq!((a >> 6) & 7, rd);
            assert_eq!(a & 0x3F, 0);
        }
    }
}

#[test]
fn three_register_ops() {
    assert_eq!(enc("SUB", &["R3", "R5", "R1"]).unwrap(), 0x2000 | (5 << 9) | (3 << 6));
    // MUL shares JZ's nibble
    assert_eq!(enc("MUL", &["R1", "R2", "R3"]).unwrap(), 0xD000 | (2 << 9) | (1 << 6));
}

#[test]
fn memory_and_jumps() {
    assert_eq!(enc("STORE", &["R2", "[10]"]).unwrap(), 0x6000 | (2 << 9) | 10);
    assert_eq!(enc("LOAD", &["R7", "0x3F"]).unwrap(), 0x7000 | (7 << 9) | 63);
    assert_eq!(enc("JUMP", &["0b101"]).unwrap(), 0xC005);
    assert_eq!(enc("JZ", &["R1", "4"]).unwrap(), 0xD000 | (1 << 9) | 4);
    assert_eq!(enc("JNZ", &["R1", "4"]).unwrap(), 0xE000 | (1 << 9) | 4);
}

#[test]
fn stack_and_fixed_words() {
    assert_eq!(enc("PUSH", &["R5"]).unwrap(), 0xE000 | (5 << 9));
    assert_eq!(enc("POP", &["R5"]).unwrap(), 0xE000 | (5 << 6));
    assert_eq!(enc("HALT", &[]).unwrap(), 0xF000);
    assert_eq!(enc("RETI", &[]).unwrap(), 0xF001);
}

#[test]
fn registers_are_case_insensitive() {
    assert_eq!(enc("LOADI", &["r3", "1"]).unwrap(), enc("LOADI", &["R3", "1"]).unwrap());
}

#[test]
fn range_error_names_value_and_bound() {
    let err = enc("LOADI", &["R0", "64"]).unwrap_err();
    assert_eq!(err, EncodeError::Range { value: 64, max: 63 });
    assert_eq!(err.kind(), ErrorKind::Range);
    let msg = err.to_string();
    assert!(msg.contains("64") && msg.contains("63"), "{msg}");

    assert!(matches!(enc("JUMP", &["-1"]), Err(EncodeError::Range { value: -1, .. })));
    assert!(matches!(enc("STORE", &["R0", "[0x40]"]), Err(EncodeError::Range { value: 64, .. })));
}

#[test]
fn known_but_unimplemented_vs_unknown() {
    for m in ["AND", "OR", "XOR", "SHL", "SHR", "MOV", "CMP", "NOT", "DIV", "IN", "OUT"] {
        let err = enc(m, &["R0", "R1", "R2"]).unwrap_err();
        assert_eq!(err, EncodeError::NotImplemented(m.to_string()));
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }
    let err = enc("FOO", &["R0"]).unwrap_err();
    assert_eq!(err, EncodeError::UnknownInstruction("FOO".into()));
    assert_eq!(err.kind(), ErrorKind::UnknownInstruction);
    assert!(err.to_string().contains("FOO"));
}

#[test]
fn signs_inside_prefixed_literals_are_malformed() {
    for tok in ["-0x-5", "0x+1F", "0b-1"] {
        assert_eq!(
            enc("LOADI", &["R0", tok]),
            Err(EncodeError::MalformedOperand(tok.to_string()))
        );
    }
    assert_eq!(enc("LOADI", &["R0", "-0x5"]), Err(EncodeError::Range { value: -5, max: 63 }));
}

#[test]
fn operand_errors() {
    assert!(matches!(enc("LOADI", &["R0"]), Err(EncodeError::MissingOperand { index: 2, .. })));
    assert!(matches!(enc("HALT", &["R0"]), Err(EncodeError::UnexpectedOperand { found: 1, .. })));
    assert!(matches!(enc("PUSH", &["5"]), Err(EncodeError::ExpectedRegister(_))));
    assert!(matches!(enc("LOADI", &["R0", "R1"]), Err(EncodeError::ExpectedValue(_))));
    assert!(matches!(enc("LOADI", &["R9", "1"]), Err(EncodeError::ExpectedRegister(_))));
    assert!(matches!(enc("JZ", &["R1", "later"]), Err(EncodeError::UndefinedLabel(_))));
    assert!(matches!(enc("JUMP", &["0xZZ"]), Err(EncodeError::MalformedOperand(_))));
    for e in [enc("LOADI", &["R0"]), enc("JUMP", &["nowhere"])] {
        assert_eq!(e.unwrap_err().kind(), ErrorKind::Operand);
    }
}

#[test]
fn label_operands_use_bound_address() {
    let mut syms = SymbolTable::new();
    syms.bind("data", 40, 1).unwrap();
    let ops = vec!["R1".to_string(), "data".to_string()];
    assert_eq!(encode_statement("LOAD", &ops, &syms).unwrap(), 0x7000 | (1 << 9) | 40);
}
