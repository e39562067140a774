use crate::opcode::{self, AddrMode};

/// Renders the instruction starting a 3-byte window. `addr` is the address
/// of the opcode byte; relative operands are shown as the resolved branch
/// target with the raw signed offset appended. Never touches emulator state.
pub fn disassemble(window: [u8; 3], addr: u16) -> String {
    let Some(op) = opcode::decode(window[0]) else {
        return format!(
            "{:04X}  .DB ${:02X}          ; illegal instruction",
            addr, window[0]
        );
    };

    let word = ((window[2] as u16) << 8) | window[1] as u16;
    let operand = match op.mode {
        AddrMode::Implied => String::new(),
        AddrMode::Accumulator => "A".to_string(),
        AddrMode::Immediate => format!("#${:02X}", window[1]),
        AddrMode::ZeroPage => format!("${:02X}", window[1]),
        AddrMode::ZeroPageX => format!("${:02X},X", window[1]),
        AddrMode::ZeroPageY => format!("${:02X},Y", window[1]),
        AddrMode::Absolute => format!("${:04X}", word),
        AddrMode::AbsoluteX => format!("${:04X},X", word),
        AddrMode::AbsoluteY => format!("${:04X},Y", word),
        AddrMode::Relative => {
            let offset = window[1] as i8;
            // The offset is relative to the PC after the 2-byte instruction
            let target = addr.wrapping_add(2).wrapping_add(offset as u16);
            format!("${:04X}        ; {:+}", target, offset)
        }
        AddrMode::Indirect => format!("(${:04X})", word),
        AddrMode::IndexedIndirect => format!("(${:02X},X)", window[1]),
        AddrMode::IndirectIndexed => format!("(${:02X}),Y", window[1]),
    };

    if operand.is_empty() {
        format!("{:04X}  {}", addr, op.mnemonic)
    } else {
        format!("{:04X}  {} {}", addr, op.mnemonic, operand)
    }
}
