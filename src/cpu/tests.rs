use super::*;

#[path = "addressing_tests.rs"]
mod addressing_mode_tests;

struct TestBus {
    memory: [u8; 0x10000],
}

impl TestBus {
    fn new() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }

    fn load_program(&mut self, program: &[u8], start_addr: u16) {
        for (i, &byte) in program.iter().enumerate() {
            self.memory[start_addr as usize + i] = byte;
        }
    }
}

impl CpuBus for TestBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.memory[addr as usize] = data;
    }
}

fn setup_cpu() -> (Cpu, TestBus) {
    let cpu = Cpu::new();
    let mut bus = TestBus::new();
    // Set reset vector
    bus.write(0xFFFC, 0x00);
    bus.write(0xFFFD, 0x80);
    (cpu, bus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode;

    #[test]
    fn test_power_up_state() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        assert_eq!(cpu.a, 0);
        assert_eq!(cpu.x, 0);
        assert_eq!(cpu.y, 0);
        assert_eq!(cpu.sp, 0xFD);
        assert_eq!(cpu.pc, 0x8000); // From the vector at $FFFC/$FFFD
        assert_eq!(cpu.status, StatusFlags::INTERRUPT_DISABLE);
    }

    #[test]
    fn test_lda_immediate() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        // LDA #$42
        bus.load_program(&[0xA9, 0x42], 0x8000);

        cpu.step(&mut bus).unwrap();

        assert_eq!(cpu.a, 0x42);
        assert_eq!(cpu.pc, 0x8002);
        assert!(!cpu.status.contains(StatusFlags::ZERO));
        assert!(!cpu.status.contains(StatusFlags::NEGATIVE));
    }

    #[test]
    fn test_lda_zero_flag() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        // LDA #$00
        bus.load_program(&[0xA9, 0x00], 0x8000);

        cpu.step(&mut bus).unwrap();

        assert_eq!(cpu.a, 0x00);
        assert!(cpu.status.contains(StatusFlags::ZERO));
        assert!(!cpu.status.contains(StatusFlags::NEGATIVE));
    }

    #[test]
    fn test_lda_negative_flag() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        // LDA #$80
        bus.load_program(&[0xA9, 0x80], 0x8000);

        cpu.step(&mut bus).unwrap();

        assert_eq!(cpu.a, 0x80);
        assert!(!cpu.status.contains(StatusFlags::ZERO));
        assert!(cpu.status.contains(StatusFlags::NEGATIVE));
    }

    #[test]
    fn test_sta_zero_page() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.a = 0x42;
        // STA $10
        bus.load_program(&[0x85, 0x10], 0x8000);

        cpu.step(&mut bus).unwrap();

        assert_eq!(bus.read(0x0010), 0x42);
        assert_eq!(cpu.pc, 0x8002);
    }

    #[test]
    fn test_store_does_not_touch_flags() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.a = 0x00;
        cpu.status.insert(StatusFlags::NEGATIVE);
        // STA $10 stores zero but N/Z stay as they were
        bus.load_program(&[0x85, 0x10], 0x8000);

        cpu.step(&mut bus).unwrap();

        assert!(cpu.status.contains(StatusFlags::NEGATIVE));
        assert!(!cpu.status.contains(StatusFlags::ZERO));
    }

    #[test]
    fn test_ldx_ldy() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        // LDX #$10, LDY #$20
        bus.load_program(&[0xA2, 0x10, 0xA0, 0x20], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.x, 0x10);

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.y, 0x20);
    }

    #[test]
    fn test_transfers() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.a = 0x80;
        // TAX, TAY
        bus.load_program(&[0xAA, 0xA8], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.x, 0x80);
        assert!(cpu.status.contains(StatusFlags::NEGATIVE));

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.y, 0x80);
    }

    #[test]
    fn test_txs_does_not_touch_flags_tsx_does() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.x = 0x00;
        cpu.status.remove(StatusFlags::ZERO);
        // TXS, then TSX with SP = $80
        bus.load_program(&[0x9A, 0xBA], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.sp, 0x00);
        assert!(!cpu.status.contains(StatusFlags::ZERO));

        cpu.sp = 0x80;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.x, 0x80);
        assert!(cpu.status.contains(StatusFlags::NEGATIVE));
    }

    #[test]
    fn test_inx_wraparound() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.x = 0xFF;

        // INX
        bus.load_program(&[0xE8], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.x, 0x00);
        assert!(cpu.status.contains(StatusFlags::ZERO));
    }

    #[test]
    fn test_dey_wraparound() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.y = 0x00;

        // DEY
        bus.load_program(&[0x88], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.y, 0xFF);
        assert!(cpu.status.contains(StatusFlags::NEGATIVE));
    }

    #[test]
    fn test_adc_carry_overflow_matrix() {
        // (a, operand, carry_in) -> (result, carry_out, overflow)
        let cases = [
            (0x50u8, 0x10u8, false, 0x60u8, false, false),
            (0x50, 0x50, false, 0xA0, false, true),
            (0x50, 0x90, false, 0xE0, false, false),
            (0x50, 0xD0, false, 0x20, true, false),
            (0xD0, 0x90, false, 0x60, true, true),
            (0xFF, 0x01, false, 0x00, true, false),
            (0xFF, 0x01, true, 0x01, true, false),
            (0x7F, 0x00, true, 0x80, false, true),
        ];
        for (a, operand, carry_in, result, carry_out, overflow) in cases {
            let (mut cpu, mut bus) = setup_cpu();
            cpu.reset(&mut bus);

            cpu.a = a;
            cpu.status.set(StatusFlags::CARRY, carry_in);
            bus.load_program(&[0x69, operand], 0x8000); // ADC #

            cpu.step(&mut bus).unwrap();

            assert_eq!(cpu.a, result, "ADC {:02X}+{:02X}+{}", a, operand, carry_in as u8);
            assert_eq!(cpu.status.contains(StatusFlags::CARRY), carry_out);
            assert_eq!(cpu.status.contains(StatusFlags::OVERFLOW), overflow);
            assert_eq!(cpu.status.contains(StatusFlags::ZERO), result == 0);
            assert_eq!(cpu.status.contains(StatusFlags::NEGATIVE), result & 0x80 != 0);
        }
    }

    #[test]
    fn test_sbc_carry_overflow_matrix() {
        // Carry out is the inverse of borrow
        // (a, operand, carry_in) -> (result, carry_out, overflow)
        let cases = [
            (0x50u8, 0x20u8, true, 0x30u8, true, false),
            (0x50, 0xB0, true, 0xA0, false, true),
            (0x00, 0x01, true, 0xFF, false, false),
            (0x00, 0x00, false, 0xFF, false, false),
            (0x80, 0x01, true, 0x7F, true, true),
            (0x40, 0x40, true, 0x00, true, false),
        ];
        for (a, operand, carry_in, result, carry_out, overflow) in cases {
            let (mut cpu, mut bus) = setup_cpu();
            cpu.reset(&mut bus);

            cpu.a = a;
            cpu.status.set(StatusFlags::CARRY, carry_in);
            bus.load_program(&[0xE9, operand], 0x8000); // SBC #

            cpu.step(&mut bus).unwrap();

            assert_eq!(cpu.a, result, "SBC {:02X}-{:02X}-{}", a, operand, !carry_in as u8);
            assert_eq!(cpu.status.contains(StatusFlags::CARRY), carry_out);
            assert_eq!(cpu.status.contains(StatusFlags::OVERFLOW), overflow);
        }
    }

    #[test]
    fn test_decimal_flag_does_not_change_arithmetic() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        // SED, then ADC #$19 with A = $19: binary result, no BCD correction
        cpu.a = 0x19;
        bus.load_program(&[0xF8, 0x69, 0x19], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert!(cpu.status.contains(StatusFlags::DECIMAL));

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a, 0x32); // not $38
    }

    #[test]
    fn test_compare_carry_for_all_byte_pairs() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        for a in 0..=255u8 {
            for operand in 0..=255u8 {
                cpu.a = a;
                bus.load_program(&[0xC9, operand], 0x8000); // CMP #
                cpu.pc = 0x8000;

                cpu.step(&mut bus).unwrap();

                assert_eq!(
                    cpu.status.contains(StatusFlags::CARRY),
                    a >= operand,
                    "CMP {:02X},{:02X}",
                    a,
                    operand
                );
                assert_eq!(cpu.status.contains(StatusFlags::ZERO), a == operand);
                assert_eq!(
                    cpu.status.contains(StatusFlags::NEGATIVE),
                    a.wrapping_sub(operand) & 0x80 != 0
                );
            }
        }
    }

    #[test]
    fn test_cpx_cpy() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.x = 0x10;
        cpu.y = 0x20;
        bus.write(0x2000, 0x20);
        // CPX #$20, CPY $2000
        bus.load_program(&[0xE0, 0x20, 0xCC, 0x00, 0x20], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert!(!cpu.status.contains(StatusFlags::CARRY)); // X < $20

        cpu.step(&mut bus).unwrap();
        assert!(cpu.status.contains(StatusFlags::CARRY)); // Y == $20
        assert!(cpu.status.contains(StatusFlags::ZERO));
    }

    #[test]
    fn test_and_or_eor() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.a = 0xFF;
        // AND #$0F, ORA #$F0, EOR #$FF
        bus.load_program(&[0x29, 0x0F, 0x09, 0xF0, 0x49, 0xFF], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a, 0x0F);

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a, 0xFF);

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.status.contains(StatusFlags::ZERO));
    }

    #[test]
    fn test_bit_zero_from_a_and_m() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.a = 0x0F;
        bus.write(0x10, 0xF0);

        // BIT $10: A & M == 0 even though M itself is nonzero
        bus.load_program(&[0x24, 0x10], 0x8000);

        cpu.step(&mut bus).unwrap();

        assert!(cpu.status.contains(StatusFlags::ZERO));
        assert!(cpu.status.contains(StatusFlags::NEGATIVE)); // bit 7 of M
        assert!(cpu.status.contains(StatusFlags::OVERFLOW)); // bit 6 of M
        assert_eq!(cpu.a, 0x0F); // A unchanged
    }

    #[test]
    fn test_bit_clears_from_operand_bits() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.a = 0x01;
        cpu.status.insert(StatusFlags::NEGATIVE | StatusFlags::OVERFLOW);
        bus.write(0x2000, 0x01);

        // BIT $2000: M has bits 7/6 clear, A & M != 0
        bus.load_program(&[0x2C, 0x00, 0x20], 0x8000);

        cpu.step(&mut bus).unwrap();

        assert!(!cpu.status.contains(StatusFlags::ZERO));
        assert!(!cpu.status.contains(StatusFlags::NEGATIVE));
        assert!(!cpu.status.contains(StatusFlags::OVERFLOW));
    }

    #[test]
    fn test_shift_operations() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        // ASL A
        cpu.a = 0x81;
        bus.load_program(&[0x0A], 0x8000);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a, 0x02);
        assert!(cpu.status.contains(StatusFlags::CARRY));

        // LSR A
        cpu.a = 0x81;
        bus.load_program(&[0x4A], 0x8001);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a, 0x40);
        assert!(cpu.status.contains(StatusFlags::CARRY));

        // ROL A brings the carry into bit 0
        cpu.a = 0x80;
        cpu.status.insert(StatusFlags::CARRY);
        bus.load_program(&[0x2A], 0x8002);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a, 0x01);
        assert!(cpu.status.contains(StatusFlags::CARRY));

        // ROR A brings the carry into bit 7
        cpu.a = 0x01;
        cpu.status.insert(StatusFlags::CARRY);
        bus.load_program(&[0x6A], 0x8003);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.status.contains(StatusFlags::CARRY));
    }

    #[test]
    fn test_lsr_clears_negative() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.a = 0x02;
        cpu.status.insert(StatusFlags::NEGATIVE);
        bus.load_program(&[0x4A], 0x8000); // LSR A

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a, 0x01);
        assert!(!cpu.status.contains(StatusFlags::NEGATIVE));
        assert!(!cpu.status.contains(StatusFlags::CARRY));
    }

    #[test]
    fn test_rmw_shift_on_memory() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        bus.write(0x0010, 0xC0);
        // ASL $10
        bus.load_program(&[0x06, 0x10], 0x8000);

        cpu.step(&mut bus).unwrap();

        assert_eq!(bus.read(0x0010), 0x80);
        assert!(cpu.status.contains(StatusFlags::CARRY));
        assert!(cpu.status.contains(StatusFlags::NEGATIVE));
        assert_eq!(cpu.a, 0x00); // accumulator untouched
    }

    #[test]
    fn test_ror_through_carry_on_memory() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        bus.write(0x2000, 0x01);
        cpu.status.insert(StatusFlags::CARRY);
        // ROR $2000
        bus.load_program(&[0x6E, 0x00, 0x20], 0x8000);

        cpu.step(&mut bus).unwrap();

        assert_eq!(bus.read(0x2000), 0x80);
        assert!(cpu.status.contains(StatusFlags::CARRY));
    }

    #[test]
    fn test_inc_dec_memory() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        bus.write(0x0010, 0xFF);
        bus.write(0x0011, 0x00);
        // INC $10, DEC $11
        bus.load_program(&[0xE6, 0x10, 0xC6, 0x11], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert_eq!(bus.read(0x0010), 0x00);
        assert!(cpu.status.contains(StatusFlags::ZERO));

        cpu.step(&mut bus).unwrap();
        assert_eq!(bus.read(0x0011), 0xFF);
        assert!(cpu.status.contains(StatusFlags::NEGATIVE));
    }

    #[test]
    fn test_jmp_absolute() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        // JMP $1234
        bus.load_program(&[0x4C, 0x34, 0x12], 0x8000);

        cpu.step(&mut bus).unwrap();

        assert_eq!(cpu.pc, 0x1234);
    }

    #[test]
    fn test_jsr_rts_round_trip() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        // JSR $9000 at $8000, RTS at $9000
        bus.load_program(&[0x20, 0x00, 0x90], 0x8000);
        bus.load_program(&[0x60], 0x9000);
        cpu.sp = 0xFF;
        let status_before = cpu.status;

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.pc, 0x9000);
        assert_eq!(cpu.sp, 0xFD);

        // The pushed return address is the JSR's last byte, not the next
        // instruction
        assert_eq!(bus.read(0x01FF), 0x80); // High byte
        assert_eq!(bus.read(0x01FE), 0x02); // Low byte

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.pc, 0x8003);
        assert_eq!(cpu.sp, 0xFF);
        assert_eq!(cpu.status, status_before);
        assert_eq!(cpu.a, 0);
        assert_eq!(cpu.x, 0);
        assert_eq!(cpu.y, 0);
    }

    #[test]
    fn test_brk_rti_round_trip() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        // BRK/IRQ vector to $9000, RTI there
        bus.write(0xFFFE, 0x00);
        bus.write(0xFFFF, 0x90);
        bus.load_program(&[0x00], 0x8000);
        bus.load_program(&[0x40], 0x9000);
        cpu.status = StatusFlags::CARRY | StatusFlags::NEGATIVE;
        let status_before = cpu.status;

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.pc, 0x9000);
        assert!(cpu.status.contains(StatusFlags::INTERRUPT_DISABLE));
        // The pushed flags byte has BREAK and bit 5 forced set
        assert_eq!(
            bus.read(0x01FB),
            (status_before | StatusFlags::BREAK | StatusFlags::UNUSED).bits()
        );

        cpu.step(&mut bus).unwrap();
        // PC and the physical flags come back; BREAK/bit 5 were never stored
        assert_eq!(cpu.pc, 0x8001);
        assert_eq!(cpu.status, status_before);
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn test_php_forces_break_and_bit5_plp_masks_them() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.status = StatusFlags::CARRY;
        cpu.sp = 0xFF;
        // PHP, PLP
        bus.load_program(&[0x08, 0x28], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert_eq!(bus.read(0x01FF), 0x31); // C | BREAK | UNUSED

        // Feed back a byte with every bit set; only the physical six remain
        bus.write(0x01FF, 0xFF);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.status.bits(), 0xCF);
        assert!(!cpu.status.contains(StatusFlags::BREAK));
        assert!(!cpu.status.contains(StatusFlags::UNUSED));
    }

    #[test]
    fn test_pha_pla() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.a = 0x42;
        cpu.sp = 0xFF;
        // PHA, LDA #$00, PLA
        bus.load_program(&[0x48, 0xA9, 0x00, 0x68], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.sp, 0xFE);
        assert_eq!(bus.read(0x01FF), 0x42);

        cpu.step(&mut bus).unwrap();
        assert!(cpu.status.contains(StatusFlags::ZERO));

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a, 0x42);
        assert_eq!(cpu.sp, 0xFF);
        assert!(!cpu.status.contains(StatusFlags::ZERO));
    }

    #[test]
    fn test_branch_polarities() {
        // (opcode, flag, branches_when_set)
        let cases = [
            (0x10u8, StatusFlags::NEGATIVE, false), // BPL
            (0x30, StatusFlags::NEGATIVE, true),    // BMI
            (0x50, StatusFlags::OVERFLOW, false),   // BVC
            (0x70, StatusFlags::OVERFLOW, true),    // BVS
            (0x90, StatusFlags::CARRY, false),      // BCC
            (0xB0, StatusFlags::CARRY, true),       // BCS
            (0xD0, StatusFlags::ZERO, false),       // BNE
            (0xF0, StatusFlags::ZERO, true),        // BEQ
        ];
        for (opcode, flag, branches_when_set) in cases {
            for flag_set in [false, true] {
                let (mut cpu, mut bus) = setup_cpu();
                cpu.reset(&mut bus);

                cpu.status.set(flag, flag_set);
                bus.load_program(&[opcode, 0x10], 0x8000);

                cpu.step(&mut bus).unwrap();

                let expected = if flag_set == branches_when_set {
                    0x8012 // taken: $8002 + $10
                } else {
                    0x8002 // fall through
                };
                assert_eq!(cpu.pc, expected, "opcode {:02X} flag_set {}", opcode, flag_set);
            }
        }
    }

    #[test]
    fn test_branch_backward() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.status.insert(StatusFlags::ZERO);
        // BEQ -4
        bus.load_program(&[0xF0, 0xFC], 0x8000);

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.pc, 0x7FFE); // $8002 - 4
    }

    #[test]
    fn test_flag_instructions() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        // SEC, SED, SEI, CLC, CLD, CLI, CLV
        bus.load_program(&[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58, 0xB8], 0x8000);
        cpu.status.insert(StatusFlags::OVERFLOW);

        cpu.step(&mut bus).unwrap();
        assert!(cpu.status.contains(StatusFlags::CARRY));
        cpu.step(&mut bus).unwrap();
        assert!(cpu.status.contains(StatusFlags::DECIMAL));
        cpu.step(&mut bus).unwrap();
        assert!(cpu.status.contains(StatusFlags::INTERRUPT_DISABLE));

        cpu.step(&mut bus).unwrap();
        assert!(!cpu.status.contains(StatusFlags::CARRY));
        cpu.step(&mut bus).unwrap();
        assert!(!cpu.status.contains(StatusFlags::DECIMAL));
        cpu.step(&mut bus).unwrap();
        assert!(!cpu.status.contains(StatusFlags::INTERRUPT_DISABLE));
        cpu.step(&mut bus).unwrap();
        assert!(!cpu.status.contains(StatusFlags::OVERFLOW));
    }

    #[test]
    fn test_cld_leaves_carry_alone() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.status.insert(StatusFlags::CARRY | StatusFlags::DECIMAL);
        bus.load_program(&[0xD8], 0x8000); // CLD

        cpu.step(&mut bus).unwrap();
        assert!(cpu.status.contains(StatusFlags::CARRY));
        assert!(!cpu.status.contains(StatusFlags::DECIMAL));
    }

    #[test]
    fn test_stack_pointer_wraps_over_256_pushes() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        let program = [0x48u8; 256]; // PHA x 256
        bus.load_program(&program, 0x8000);
        cpu.sp = 0x42;

        for _ in 0..256 {
            cpu.step(&mut bus).unwrap();
        }
        assert_eq!(cpu.sp, 0x42);
    }

    #[test]
    fn test_stack_pointer_wraps_over_256_pops() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        let program = [0x68u8; 256]; // PLA x 256
        bus.load_program(&program, 0x8000);
        cpu.sp = 0x42;

        for _ in 0..256 {
            cpu.step(&mut bus).unwrap();
        }
        assert_eq!(cpu.sp, 0x42);
    }

    #[test]
    fn test_push_at_sp_zero_wraps_to_ff() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.a = 0x99;
        cpu.sp = 0x00;
        bus.load_program(&[0x48], 0x8000); // PHA

        cpu.step(&mut bus).unwrap();
        assert_eq!(bus.read(0x0100), 0x99);
        assert_eq!(cpu.sp, 0xFF);
    }

    #[test]
    fn test_illegal_opcode_reports_without_mutation() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.a = 0x11;
        cpu.x = 0x22;
        cpu.y = 0x33;
        cpu.sp = 0xF0;
        cpu.status.insert(StatusFlags::CARRY);
        let status_before = cpu.status;
        bus.load_program(&[0x02, 0xFF], 0x8000);

        let err = cpu.step(&mut bus).unwrap_err();

        assert_eq!(err, IllegalOpcode { opcode: 0x02, pc: 0x8000 });
        assert_eq!(cpu.pc, 0x8000);
        assert_eq!(cpu.a, 0x11);
        assert_eq!(cpu.x, 0x22);
        assert_eq!(cpu.y, 0x33);
        assert_eq!(cpu.sp, 0xF0);
        assert_eq!(cpu.status, status_before);
        assert_eq!(bus.read(0x8000), 0x02);
        assert_eq!(bus.read(0x8001), 0xFF);
    }

    #[test]
    fn test_dispatch_agrees_with_decode_table() {
        for opcode in 0..=255u8 {
            let (mut cpu, mut bus) = setup_cpu();
            cpu.reset(&mut bus);

            bus.write(0x8000, opcode);
            let result = cpu.step(&mut bus);

            assert_eq!(
                result.is_ok(),
                opcode::decode(opcode).is_some(),
                "opcode {:02X}",
                opcode
            );
        }
    }
}
