use bitflags::bitflags;
use std::error::Error;
use std::fmt;

use crate::bus::CpuBus;

#[cfg(test)]
mod tests;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b00000001;
        const ZERO = 0b00000010;
        const INTERRUPT_DISABLE = 0b00000100;
        const DECIMAL = 0b00001000;
        const BREAK = 0b00010000;
        const UNUSED = 0b00100000;
        const OVERFLOW = 0b01000000;
        const NEGATIVE = 0b10000000;

        // The six bits that exist as storage on the chip. BREAK and UNUSED
        // have no flip-flops; they read as 1 only in the byte pushed by
        // BRK/PHP and are masked off by PLP/RTI.
        const PHYSICAL = 0b11001111;
    }
}

/// Returned by `step()` when the fetched byte is not a documented opcode.
/// Registers and memory are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalOpcode {
    pub opcode: u8,
    pub pc: u16,
}

impl fmt::Display for IllegalOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "illegal opcode 0x{:02X} at PC 0x{:04X}",
            self.opcode, self.pc
        )
    }
}

impl Error for IllegalOpcode {}

pub struct Cpu {
    pub a: u8,      // Accumulator
    pub x: u8,      // X register
    pub y: u8,      // Y register
    pub sp: u8,     // Stack pointer, offset from $0100
    pub pc: u16,    // Program counter
    pub status: StatusFlags,
}

impl Cpu {
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: StatusFlags::INTERRUPT_DISABLE,
        }
    }

    /// Power-up state. RESET shares the interrupt push sequence with
    /// BRK/IRQ/NMI but the three stack writes are suppressed, so SP ends at
    /// $FD without anything being written; A/X/Y are cleared and only the
    /// interrupt-disable flag comes up set.
    pub fn reset(&mut self, bus: &mut dyn CpuBus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = StatusFlags::INTERRUPT_DISABLE;

        let low = bus.read(0xFFFC) as u16;
        let high = bus.read(0xFFFD) as u16;
        self.pc = (high << 8) | low;
    }

    /// Executes exactly one instruction. An undocumented opcode is reported
    /// to the caller with no register or memory mutation.
    pub fn step(&mut self, bus: &mut dyn CpuBus) -> Result<(), IllegalOpcode> {
        let opcode = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        let result = self.execute_instruction(opcode, bus);
        if result.is_err() {
            // Undo the fetch so a rejected opcode leaves no trace
            self.pc = self.pc.wrapping_sub(1);
        }
        result
    }

    fn execute_instruction(
        &mut self,
        opcode: u8,
        bus: &mut dyn CpuBus,
    ) -> Result<(), IllegalOpcode> {
        match opcode {
            0x00 => self.brk(bus),
            0x01 => self.ora_indexed_indirect(bus),
            0x05 => self.ora_zero_page(bus),
            0x06 => self.asl_zero_page(bus),
            0x08 => self.php(bus),
            0x09 => self.ora_immediate(bus),
            0x0A => self.asl_accumulator(),
            0x0D => self.ora_absolute(bus),
            0x0E => self.asl_absolute(bus),

            0x10 => self.bpl(bus),
            0x11 => self.ora_indirect_indexed(bus),
            0x15 => self.ora_zero_page_x(bus),
            0x16 => self.asl_zero_page_x(bus),
            0x18 => self.clc(),
            0x19 => self.ora_absolute_y(bus),
            0x1D => self.ora_absolute_x(bus),
            0x1E => self.asl_absolute_x(bus),

            0x20 => self.jsr(bus),
            0x21 => self.and_indexed_indirect(bus),
            0x24 => self.bit_zero_page(bus),
            0x25 => self.and_zero_page(bus),
            0x26 => self.rol_zero_page(bus),
            0x28 => self.plp(bus),
            0x29 => self.and_immediate(bus),
            0x2A => self.rol_accumulator(),
            0x2C => self.bit_absolute(bus),
            0x2D => self.and_absolute(bus),
            0x2E => self.rol_absolute(bus),

            0x30 => self.bmi(bus),
            0x31 => self.and_indirect_indexed(bus),
            0x35 => self.and_zero_page_x(bus),
            0x36 => self.rol_zero_page_x(bus),
            0x38 => self.sec(),
            0x39 => self.and_absolute_y(bus),
            0x3D => self.and_absolute_x(bus),
            0x3E => self.rol_absolute_x(bus),

            0x40 => self.rti(bus),
            0x41 => self.eor_indexed_indirect(bus),
            0x45 => self.eor_zero_page(bus),
            0x46 => self.lsr_zero_page(bus),
            0x48 => self.pha(bus),
            0x49 => self.eor_immediate(bus),
            0x4A => self.lsr_accumulator(),
            0x4C => self.jmp_absolute(bus),
            0x4D => self.eor_absolute(bus),
            0x4E => self.lsr_absolute(bus),

            0x50 => self.bvc(bus),
            0x51 => self.eor_indirect_indexed(bus),
            0x55 => self.eor_zero_page_x(bus),
            0x56 => self.lsr_zero_page_x(bus),
            0x58 => self.cli(),
            0x59 => self.eor_absolute_y(bus),
            0x5D => self.eor_absolute_x(bus),
            0x5E => self.lsr_absolute_x(bus),

            0x60 => self.rts(bus),
            0x61 => self.adc_indexed_indirect(bus),
            0x65 => self.adc_zero_page(bus),
            0x66 => self.ror_zero_page(bus),
            0x68 => self.pla(bus),
            0x69 => self.adc_immediate(bus),
            0x6A => self.ror_accumulator(),
            0x6C => self.jmp_indirect(bus),
            0x6D => self.adc_absolute(bus),
            0x6E => self.ror_absolute(bus),

            0x70 => self.bvs(bus),
            0x71 => self.adc_indirect_indexed(bus),
            0x75 => self.adc_zero_page_x(bus),
            0x76 => self.ror_zero_page_x(bus),
            0x78 => self.sei(),
            0x79 => self.adc_absolute_y(bus),
            0x7D => self.adc_absolute_x(bus),
            0x7E => self.ror_absolute_x(bus),

            0x81 => self.sta_indexed_indirect(bus),
            0x84 => self.sty_zero_page(bus),
            0x85 => self.sta_zero_page(bus),
            0x86 => self.stx_zero_page(bus),
            0x88 => self.dey(),
            0x8A => self.txa(),
            0x8C => self.sty_absolute(bus),
            0x8D => self.sta_absolute(bus),
            0x8E => self.stx_absolute(bus),

            0x90 => self.bcc(bus),
            0x91 => self.sta_indirect_indexed(bus),
            0x94 => self.sty_zero_page_x(bus),
            0x95 => self.sta_zero_page_x(bus),
            0x96 => self.stx_zero_page_y(bus),
            0x98 => self.tya(),
            0x99 => self.sta_absolute_y(bus),
            0x9A => self.txs(),
            0x9D => self.sta_absolute_x(bus),

            0xA0 => self.ldy_immediate(bus),
            0xA1 => self.lda_indexed_indirect(bus),
            0xA2 => self.ldx_immediate(bus),
            0xA4 => self.ldy_zero_page(bus),
            0xA5 => self.lda_zero_page(bus),
            0xA6 => self.ldx_zero_page(bus),
            0xA8 => self.tay(),
            0xA9 => self.lda_immediate(bus),
            0xAA => self.tax(),
            0xAC => self.ldy_absolute(bus),
            0xAD => self.lda_absolute(bus),
            0xAE => self.ldx_absolute(bus),

            0xB0 => self.bcs(bus),
            0xB1 => self.lda_indirect_indexed(bus),
            0xB4 => self.ldy_zero_page_x(bus),
            0xB5 => self.lda_zero_page_x(bus),
            0xB6 => self.ldx_zero_page_y(bus),
            0xB8 => self.clv(),
            0xB9 => self.lda_absolute_y(bus),
            0xBA => self.tsx(),
            0xBC => self.ldy_absolute_x(bus),
            0xBD => self.lda_absolute_x(bus),
            0xBE => self.ldx_absolute_y(bus),

            0xC0 => self.cpy_immediate(bus),
            0xC1 => self.cmp_indexed_indirect(bus),
            0xC4 => self.cpy_zero_page(bus),
            0xC5 => self.cmp_zero_page(bus),
            0xC6 => self.dec_zero_page(bus),
            0xC8 => self.iny(),
            0xC9 => self.cmp_immediate(bus),
            0xCA => self.dex(),
            0xCC => self.cpy_absolute(bus),
            0xCD => self.cmp_absolute(bus),
            0xCE => self.dec_absolute(bus),

            0xD0 => self.bne(bus),
            0xD1 => self.cmp_indirect_indexed(bus),
            0xD5 => self.cmp_zero_page_x(bus),
            0xD6 => self.dec_zero_page_x(bus),
            0xD8 => self.cld(),
            0xD9 => self.cmp_absolute_y(bus),
            0xDD => self.cmp_absolute_x(bus),
            0xDE => self.dec_absolute_x(bus),

            0xE0 => self.cpx_immediate(bus),
            0xE1 => self.sbc_indexed_indirect(bus),
            0xE4 => self.cpx_zero_page(bus),
            0xE5 => self.sbc_zero_page(bus),
            0xE6 => self.inc_zero_page(bus),
            0xE8 => self.inx(),
            0xE9 => self.sbc_immediate(bus),
            0xEA => self.nop(),
            0xEC => self.cpx_absolute(bus),
            0xED => self.sbc_absolute(bus),
            0xEE => self.inc_absolute(bus),

            0xF0 => self.beq(bus),
            0xF1 => self.sbc_indirect_indexed(bus),
            0xF5 => self.sbc_zero_page_x(bus),
            0xF6 => self.inc_zero_page_x(bus),
            0xF8 => self.sed(),
            0xF9 => self.sbc_absolute_y(bus),
            0xFD => self.sbc_absolute_x(bus),
            0xFE => self.inc_absolute_x(bus),

            _ => {
                return Err(IllegalOpcode {
                    opcode,
                    pc: self.pc.wrapping_sub(1),
                });
            }
        }
        Ok(())
    }

    // Operand fetch and stack helpers

    fn read_byte(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let byte = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    fn read_word(&mut self, bus: &mut dyn CpuBus) -> u16 {
        let low = self.read_byte(bus) as u16;
        let high = self.read_byte(bus) as u16;
        (high << 8) | low
    }

    fn push(&mut self, bus: &mut dyn CpuBus, value: u8) {
        let addr = 0x0100 | self.sp as u16;
        bus.write(addr, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pull(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let addr = 0x0100 | self.sp as u16;
        bus.read(addr)
    }

    // Effective-address resolution, one helper per indexed/indirect mode.
    // Plain zero page and absolute are read inline at the call sites.

    fn get_zero_page_x_addr(&mut self, bus: &mut dyn CpuBus) -> u16 {
        let base = self.read_byte(bus);
        // Stays inside the zero page, never carries into page 1
        base.wrapping_add(self.x) as u16
    }

    fn get_zero_page_y_addr(&mut self, bus: &mut dyn CpuBus) -> u16 {
        let base = self.read_byte(bus);
        base.wrapping_add(self.y) as u16
    }

    fn get_absolute_x_addr(&mut self, bus: &mut dyn CpuBus) -> u16 {
        self.read_word(bus).wrapping_add(self.x as u16)
    }

    fn get_absolute_y_addr(&mut self, bus: &mut dyn CpuBus) -> u16 {
        self.read_word(bus).wrapping_add(self.y as u16)
    }

    fn get_indexed_indirect_addr(&mut self, bus: &mut dyn CpuBus) -> u16 {
        // (ind,X): the pointer and its high byte both wrap inside page zero
        let ptr = self.read_byte(bus).wrapping_add(self.x);
        let low = bus.read(ptr as u16) as u16;
        let high = bus.read(ptr.wrapping_add(1) as u16) as u16;
        (high << 8) | low
    }

    fn get_indirect_indexed_addr(&mut self, bus: &mut dyn CpuBus) -> u16 {
        // (ind),Y: the pointer wraps inside page zero, the +Y does not
        let ptr = self.read_byte(bus);
        let low = bus.read(ptr as u16) as u16;
        let high = bus.read(ptr.wrapping_add(1) as u16) as u16;
        ((high << 8) | low).wrapping_add(self.y as u16)
    }

    // Flag computation shared across instruction families

    fn set_zero_negative_flags(&mut self, value: u8) {
        self.status.set(StatusFlags::ZERO, value == 0);
        self.status.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    fn compare(&mut self, reg: u8, value: u8) {
        // Carry is the inverse of borrow: set iff reg >= value unsigned
        let result = reg.wrapping_sub(value);
        self.status.set(StatusFlags::CARRY, reg >= value);
        self.status.set(StatusFlags::ZERO, reg == value);
        self.status.set(StatusFlags::NEGATIVE, result & 0x80 != 0);
    }

    fn adc(&mut self, value: u8) {
        // Flags always come from the binary sum; no BCD correction even
        // with the decimal flag set
        let carry = if self.status.contains(StatusFlags::CARRY) { 1 } else { 0 };
        let result = self.a as u16 + value as u16 + carry;

        self.status.set(StatusFlags::CARRY, result > 0xFF);
        self.status.set(
            StatusFlags::OVERFLOW,
            (self.a ^ result as u8) & (value ^ result as u8) & 0x80 != 0,
        );

        self.a = result as u8;
        self.set_zero_negative_flags(self.a);
    }

    fn sbc(&mut self, value: u8) {
        // The hardware negates the operand as a one's complement and reuses
        // the adder; the incoming carry supplies the +1 of the two's
        // complement, so the outgoing carry reads as "no borrow"
        self.adc(!value);
    }

    fn bit(&mut self, value: u8) {
        // Zero comes from A & M; N and V are bits 7 and 6 of the operand
        self.status.set(StatusFlags::ZERO, self.a & value == 0);
        self.status.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
        self.status.set(StatusFlags::OVERFLOW, value & 0x40 != 0);
    }

    // Shift and rotate helpers, uniform over accumulator and memory operands

    fn asl(&mut self, value: u8) -> u8 {
        self.status.set(StatusFlags::CARRY, value & 0x80 != 0);
        let result = value << 1;
        self.set_zero_negative_flags(result);
        result
    }

    fn lsr(&mut self, value: u8) -> u8 {
        self.status.set(StatusFlags::CARRY, value & 0x01 != 0);
        let result = value >> 1;
        self.set_zero_negative_flags(result);
        result
    }

    fn rol(&mut self, value: u8) -> u8 {
        // 9-bit rotate left through carry
        let carry_in = if self.status.contains(StatusFlags::CARRY) { 1 } else { 0 };
        self.status.set(StatusFlags::CARRY, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.set_zero_negative_flags(result);
        result
    }

    fn ror(&mut self, value: u8) -> u8 {
        // 9-bit rotate right through carry
        let carry_in = if self.status.contains(StatusFlags::CARRY) { 0x80 } else { 0 };
        self.status.set(StatusFlags::CARRY, value & 0x01 != 0);
        let result = carry_in | (value >> 1);
        self.set_zero_negative_flags(result);
        result
    }

    fn branch(&mut self, bus: &mut dyn CpuBus, condition: bool) {
        // The offset is relative to the PC after the operand byte
        let offset = self.read_byte(bus) as i8;
        if condition {
            self.pc = self.pc.wrapping_add(offset as u16);
        }
    }

    // Control flow and stack instructions

    fn brk(&mut self, bus: &mut dyn CpuBus) {
        self.push(bus, (self.pc >> 8) as u8);
        self.push(bus, self.pc as u8);
        self.push(
            bus,
            (self.status | StatusFlags::BREAK | StatusFlags::UNUSED).bits(),
        );
        self.status.insert(StatusFlags::INTERRUPT_DISABLE);
        let low = bus.read(0xFFFE) as u16;
        let high = bus.read(0xFFFF) as u16;
        self.pc = (high << 8) | low;
    }

    fn jsr(&mut self, bus: &mut dyn CpuBus) {
        // The target is fetched around the push, so the saved return address
        // points at the last byte of the JSR; RTS pops it and adds one
        let low = self.read_byte(bus) as u16;
        self.push(bus, (self.pc >> 8) as u8);
        self.push(bus, self.pc as u8);
        let high = self.read_byte(bus) as u16;
        self.pc = (high << 8) | low;
    }

    fn rts(&mut self, bus: &mut dyn CpuBus) {
        let low = self.pull(bus) as u16;
        let high = self.pull(bus) as u16;
        self.pc = ((high << 8) | low).wrapping_add(1);
    }

    fn rti(&mut self, bus: &mut dyn CpuBus) {
        self.status = StatusFlags::from_bits_truncate(self.pull(bus)) & StatusFlags::PHYSICAL;
        let low = self.pull(bus) as u16;
        let high = self.pull(bus) as u16;
        self.pc = (high << 8) | low;
    }

    fn jmp_absolute(&mut self, bus: &mut dyn CpuBus) {
        self.pc = self.read_word(bus);
    }

    fn jmp_indirect(&mut self, bus: &mut dyn CpuBus) {
        // The pointer's high byte comes from ptr+1 with full 16-bit carry;
        // the NMOS page-wrap quirk is not reproduced
        let ptr = self.read_word(bus);
        let low = bus.read(ptr) as u16;
        let high = bus.read(ptr.wrapping_add(1)) as u16;
        self.pc = (high << 8) | low;
    }

    fn bpl(&mut self, bus: &mut dyn CpuBus) {
        self.branch(bus, !self.status.contains(StatusFlags::NEGATIVE));
    }

    fn bmi(&mut self, bus: &mut dyn CpuBus) {
        self.branch(bus, self.status.contains(StatusFlags::NEGATIVE));
    }

    fn bvc(&mut self, bus: &mut dyn CpuBus) {
        self.branch(bus, !self.status.contains(StatusFlags::OVERFLOW));
    }

    fn bvs(&mut self, bus: &mut dyn CpuBus) {
        self.branch(bus, self.status.contains(StatusFlags::OVERFLOW));
    }

    fn bcc(&mut self, bus: &mut dyn CpuBus) {
        self.branch(bus, !self.status.contains(StatusFlags::CARRY));
    }

    fn bcs(&mut self, bus: &mut dyn CpuBus) {
        self.branch(bus, self.status.contains(StatusFlags::CARRY));
    }

    fn bne(&mut self, bus: &mut dyn CpuBus) {
        self.branch(bus, !self.status.contains(StatusFlags::ZERO));
    }

    fn beq(&mut self, bus: &mut dyn CpuBus) {
        self.branch(bus, self.status.contains(StatusFlags::ZERO));
    }

    fn pha(&mut self, bus: &mut dyn CpuBus) {
        self.push(bus, self.a);
    }

    fn pla(&mut self, bus: &mut dyn CpuBus) {
        self.a = self.pull(bus);
        self.set_zero_negative_flags(self.a);
    }

    fn php(&mut self, bus: &mut dyn CpuBus) {
        // Same convention as BRK: the pushed byte has BREAK and bit 5 set
        self.push(
            bus,
            (self.status | StatusFlags::BREAK | StatusFlags::UNUSED).bits(),
        );
    }

    fn plp(&mut self, bus: &mut dyn CpuBus) {
        self.status = StatusFlags::from_bits_truncate(self.pull(bus)) & StatusFlags::PHYSICAL;
    }

    // Flag set/clear

    fn clc(&mut self) {
        self.status.remove(StatusFlags::CARRY);
    }

    fn sec(&mut self) {
        self.status.insert(StatusFlags::CARRY);
    }

    fn cli(&mut self) {
        self.status.remove(StatusFlags::INTERRUPT_DISABLE);
    }

    fn sei(&mut self) {
        self.status.insert(StatusFlags::INTERRUPT_DISABLE);
    }

    fn clv(&mut self) {
        self.status.remove(StatusFlags::OVERFLOW);
    }

    fn cld(&mut self) {
        self.status.remove(StatusFlags::DECIMAL);
    }

    fn sed(&mut self) {
        self.status.insert(StatusFlags::DECIMAL);
    }

    fn nop(&mut self) {}

    // Register transfers

    fn tax(&mut self) {
        self.x = self.a;
        self.set_zero_negative_flags(self.x);
    }

    fn tay(&mut self) {
        self.y = self.a;
        self.set_zero_negative_flags(self.y);
    }

    fn txa(&mut self) {
        self.a = self.x;
        self.set_zero_negative_flags(self.a);
    }

    fn tya(&mut self) {
        self.a = self.y;
        self.set_zero_negative_flags(self.a);
    }

    fn tsx(&mut self) {
        self.x = self.sp;
        self.set_zero_negative_flags(self.x);
    }

    fn txs(&mut self) {
        // No flags affected
        self.sp = self.x;
    }

    // Increments and decrements on registers

    fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.set_zero_negative_flags(self.x);
    }

    fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.set_zero_negative_flags(self.y);
    }

    fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.set_zero_negative_flags(self.x);
    }

    fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.set_zero_negative_flags(self.y);
    }

    // LDA

    fn lda(&mut self, value: u8) {
        self.a = value;
        self.set_zero_negative_flags(self.a);
    }

    fn lda_immediate(&mut self, bus: &mut dyn CpuBus) {
        let value = self.read_byte(bus);
        self.lda(value);
    }

    fn lda_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.lda(value);
    }

    fn lda_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let value = bus.read(addr);
        self.lda(value);
    }

    fn lda_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.lda(value);
    }

    fn lda_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let value = bus.read(addr);
        self.lda(value);
    }

    fn lda_absolute_y(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_y_addr(bus);
        let value = bus.read(addr);
        self.lda(value);
    }

    fn lda_indexed_indirect(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indexed_indirect_addr(bus);
        let value = bus.read(addr);
        self.lda(value);
    }

    fn lda_indirect_indexed(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indirect_indexed_addr(bus);
        let value = bus.read(addr);
        self.lda(value);
    }

    // LDX

    fn ldx(&mut self, value: u8) {
        self.x = value;
        self.set_zero_negative_flags(self.x);
    }

    fn ldx_immediate(&mut self, bus: &mut dyn CpuBus) {
        let value = self.read_byte(bus);
        self.ldx(value);
    }

    fn ldx_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.ldx(value);
    }

    fn ldx_zero_page_y(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_y_addr(bus);
        let value = bus.read(addr);
        self.ldx(value);
    }

    fn ldx_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.ldx(value);
    }

    fn ldx_absolute_y(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_y_addr(bus);
        let value = bus.read(addr);
        self.ldx(value);
    }

    // LDY

    fn ldy(&mut self, value: u8) {
        self.y = value;
        self.set_zero_negative_flags(self.y);
    }

    fn ldy_immediate(&mut self, bus: &mut dyn CpuBus) {
        let value = self.read_byte(bus);
        self.ldy(value);
    }

    fn ldy_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.ldy(value);
    }

    fn ldy_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let value = bus.read(addr);
        self.ldy(value);
    }

    fn ldy_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.ldy(value);
    }

    fn ldy_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let value = bus.read(addr);
        self.ldy(value);
    }

    // STA/STX/STY

    fn sta_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        bus.write(addr, self.a);
    }

    fn sta_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        bus.write(addr, self.a);
    }

    fn sta_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        bus.write(addr, self.a);
    }

    fn sta_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        bus.write(addr, self.a);
    }

    fn sta_absolute_y(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_y_addr(bus);
        bus.write(addr, self.a);
    }

    fn sta_indexed_indirect(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indexed_indirect_addr(bus);
        bus.write(addr, self.a);
    }

    fn sta_indirect_indexed(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indirect_indexed_addr(bus);
        bus.write(addr, self.a);
    }

    fn stx_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        bus.write(addr, self.x);
    }

    fn stx_zero_page_y(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_y_addr(bus);
        bus.write(addr, self.x);
    }

    fn stx_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        bus.write(addr, self.x);
    }

    fn sty_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        bus.write(addr, self.y);
    }

    fn sty_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        bus.write(addr, self.y);
    }

    fn sty_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        bus.write(addr, self.y);
    }

    // ORA

    fn ora(&mut self, value: u8) {
        self.a |= value;
        self.set_zero_negative_flags(self.a);
    }

    fn ora_immediate(&mut self, bus: &mut dyn CpuBus) {
        let value = self.read_byte(bus);
        self.ora(value);
    }

    fn ora_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.ora(value);
    }

    fn ora_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let value = bus.read(addr);
        self.ora(value);
    }

    fn ora_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.ora(value);
    }

    fn ora_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let value = bus.read(addr);
        self.ora(value);
    }

    fn ora_absolute_y(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_y_addr(bus);
        let value = bus.read(addr);
        self.ora(value);
    }

    fn ora_indexed_indirect(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indexed_indirect_addr(bus);
        let value = bus.read(addr);
        self.ora(value);
    }

    fn ora_indirect_indexed(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indirect_indexed_addr(bus);
        let value = bus.read(addr);
        self.ora(value);
    }

    // AND

    fn and(&mut self, value: u8) {
        self.a &= value;
        self.set_zero_negative_flags(self.a);
    }

    fn and_immediate(&mut self, bus: &mut dyn CpuBus) {
        let value = self.read_byte(bus);
        self.and(value);
    }

    fn and_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.and(value);
    }

    fn and_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let value = bus.read(addr);
        self.and(value);
    }

    fn and_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.and(value);
    }

    fn and_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let value = bus.read(addr);
        self.and(value);
    }

    fn and_absolute_y(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_y_addr(bus);
        let value = bus.read(addr);
        self.and(value);
    }

    fn and_indexed_indirect(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indexed_indirect_addr(bus);
        let value = bus.read(addr);
        self.and(value);
    }

    fn and_indirect_indexed(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indirect_indexed_addr(bus);
        let value = bus.read(addr);
        self.and(value);
    }

    // EOR

    fn eor(&mut self, value: u8) {
        self.a ^= value;
        self.set_zero_negative_flags(self.a);
    }

    fn eor_immediate(&mut self, bus: &mut dyn CpuBus) {
        let value = self.read_byte(bus);
        self.eor(value);
    }

    fn eor_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.eor(value);
    }

    fn eor_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let value = bus.read(addr);
        self.eor(value);
    }

    fn eor_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.eor(value);
    }

    fn eor_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let value = bus.read(addr);
        self.eor(value);
    }

    fn eor_absolute_y(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_y_addr(bus);
        let value = bus.read(addr);
        self.eor(value);
    }

    fn eor_indexed_indirect(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indexed_indirect_addr(bus);
        let value = bus.read(addr);
        self.eor(value);
    }

    fn eor_indirect_indexed(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indirect_indexed_addr(bus);
        let value = bus.read(addr);
        self.eor(value);
    }

    // BIT

    fn bit_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.bit(value);
    }

    fn bit_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.bit(value);
    }

    // ADC

    fn adc_immediate(&mut self, bus: &mut dyn CpuBus) {
        let value = self.read_byte(bus);
        self.adc(value);
    }

    fn adc_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.adc(value);
    }

    fn adc_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let value = bus.read(addr);
        self.adc(value);
    }

    fn adc_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.adc(value);
    }

    fn adc_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let value = bus.read(addr);
        self.adc(value);
    }

    fn adc_absolute_y(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_y_addr(bus);
        let value = bus.read(addr);
        self.adc(value);
    }

    fn adc_indexed_indirect(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indexed_indirect_addr(bus);
        let value = bus.read(addr);
        self.adc(value);
    }

    fn adc_indirect_indexed(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indirect_indexed_addr(bus);
        let value = bus.read(addr);
        self.adc(value);
    }

    // SBC

    fn sbc_immediate(&mut self, bus: &mut dyn CpuBus) {
        let value = self.read_byte(bus);
        self.sbc(value);
    }

    fn sbc_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.sbc(value);
    }

    fn sbc_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let value = bus.read(addr);
        self.sbc(value);
    }

    fn sbc_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.sbc(value);
    }

    fn sbc_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let value = bus.read(addr);
        self.sbc(value);
    }

    fn sbc_absolute_y(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_y_addr(bus);
        let value = bus.read(addr);
        self.sbc(value);
    }

    fn sbc_indexed_indirect(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indexed_indirect_addr(bus);
        let value = bus.read(addr);
        self.sbc(value);
    }

    fn sbc_indirect_indexed(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indirect_indexed_addr(bus);
        let value = bus.read(addr);
        self.sbc(value);
    }

    // CMP/CPX/CPY

    fn cmp_immediate(&mut self, bus: &mut dyn CpuBus) {
        let value = self.read_byte(bus);
        self.compare(self.a, value);
    }

    fn cmp_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.compare(self.a, value);
    }

    fn cmp_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let value = bus.read(addr);
        self.compare(self.a, value);
    }

    fn cmp_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.compare(self.a, value);
    }

    fn cmp_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let value = bus.read(addr);
        self.compare(self.a, value);
    }

    fn cmp_absolute_y(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_y_addr(bus);
        let value = bus.read(addr);
        self.compare(self.a, value);
    }

    fn cmp_indexed_indirect(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indexed_indirect_addr(bus);
        let value = bus.read(addr);
        self.compare(self.a, value);
    }

    fn cmp_indirect_indexed(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_indirect_indexed_addr(bus);
        let value = bus.read(addr);
        self.compare(self.a, value);
    }

    fn cpx_immediate(&mut self, bus: &mut dyn CpuBus) {
        let value = self.read_byte(bus);
        self.compare(self.x, value);
    }

    fn cpx_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.compare(self.x, value);
    }

    fn cpx_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.compare(self.x, value);
    }

    fn cpy_immediate(&mut self, bus: &mut dyn CpuBus) {
        let value = self.read_byte(bus);
        self.compare(self.y, value);
    }

    fn cpy_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let value = bus.read(addr);
        self.compare(self.y, value);
    }

    fn cpy_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let value = bus.read(addr);
        self.compare(self.y, value);
    }

    // ASL

    fn asl_accumulator(&mut self) {
        self.a = self.asl(self.a);
    }

    fn asl_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let result = self.asl(bus.read(addr));
        bus.write(addr, result);
    }

    fn asl_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let result = self.asl(bus.read(addr));
        bus.write(addr, result);
    }

    fn asl_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let result = self.asl(bus.read(addr));
        bus.write(addr, result);
    }

    fn asl_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let result = self.asl(bus.read(addr));
        bus.write(addr, result);
    }

    // LSR

    fn lsr_accumulator(&mut self) {
        self.a = self.lsr(self.a);
    }

    fn lsr_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let result = self.lsr(bus.read(addr));
        bus.write(addr, result);
    }

    fn lsr_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let result = self.lsr(bus.read(addr));
        bus.write(addr, result);
    }

    fn lsr_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let result = self.lsr(bus.read(addr));
        bus.write(addr, result);
    }

    fn lsr_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let result = self.lsr(bus.read(addr));
        bus.write(addr, result);
    }

    // ROL

    fn rol_accumulator(&mut self) {
        self.a = self.rol(self.a);
    }

    fn rol_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let result = self.rol(bus.read(addr));
        bus.write(addr, result);
    }

    fn rol_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let result = self.rol(bus.read(addr));
        bus.write(addr, result);
    }

    fn rol_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let result = self.rol(bus.read(addr));
        bus.write(addr, result);
    }

    fn rol_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let result = self.rol(bus.read(addr));
        bus.write(addr, result);
    }

    // ROR

    fn ror_accumulator(&mut self) {
        self.a = self.ror(self.a);
    }

    fn ror_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let result = self.ror(bus.read(addr));
        bus.write(addr, result);
    }

    fn ror_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let result = self.ror(bus.read(addr));
        bus.write(addr, result);
    }

    fn ror_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let result = self.ror(bus.read(addr));
        bus.write(addr, result);
    }

    fn ror_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let result = self.ror(bus.read(addr));
        bus.write(addr, result);
    }

    // INC/DEC on memory

    fn inc_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let result = bus.read(addr).wrapping_add(1);
        bus.write(addr, result);
        self.set_zero_negative_flags(result);
    }

    fn inc_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let result = bus.read(addr).wrapping_add(1);
        bus.write(addr, result);
        self.set_zero_negative_flags(result);
    }

    fn inc_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let result = bus.read(addr).wrapping_add(1);
        bus.write(addr, result);
        self.set_zero_negative_flags(result);
    }

    fn inc_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let result = bus.read(addr).wrapping_add(1);
        bus.write(addr, result);
        self.set_zero_negative_flags(result);
    }

    fn dec_zero_page(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_byte(bus) as u16;
        let result = bus.read(addr).wrapping_sub(1);
        bus.write(addr, result);
        self.set_zero_negative_flags(result);
    }

    fn dec_zero_page_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_zero_page_x_addr(bus);
        let result = bus.read(addr).wrapping_sub(1);
        bus.write(addr, result);
        self.set_zero_negative_flags(result);
    }

    fn dec_absolute(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.read_word(bus);
        let result = bus.read(addr).wrapping_sub(1);
        bus.write(addr, result);
        self.set_zero_negative_flags(result);
    }

    fn dec_absolute_x(&mut self, bus: &mut dyn CpuBus) {
        let addr = self.get_absolute_x_addr(bus);
        let result = bus.read(addr).wrapping_sub(1);
        bus.write(addr, result);
        self.set_zero_negative_flags(result);
    }
}
