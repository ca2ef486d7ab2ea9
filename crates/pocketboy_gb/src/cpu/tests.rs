use super::*;
use crate::error::CoreError;
use crate::machine::Timer;

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

impl TestBus {
    fn with_program(program: &[u8]) -> Self {
        let mut bus = Self::default();
        bus.memory[..program.len()].copy_from_slice(program);
        bus
    }
}

fn setup(program: &[u8]) -> (Cpu, TestBus, Timer) {
    let mut cpu = Cpu::new();
    cpu.regs.sp = 0xFFFE;
    (cpu, TestBus::with_program(program), Timer::new())
}

fn step(cpu: &mut Cpu, bus: &mut TestBus, timer: &mut Timer) -> u32 {
    cpu.execute(bus, timer).expect("instruction should execute")
}

#[test]
fn nop_charges_four_cycles() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x00]);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 4);
    assert_eq!(cpu.pc(), 1);
    assert_eq!(timer.cycles(), 4);
}

#[test]
fn ld_rr_d16_loads_little_endian_word() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x01, 0x34, 0x12, 0x31, 0xF0, 0xDF]);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 12);
    assert_eq!(cpu.bc(), 0x1234);
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.sp(), 0xDFF0);
    assert_eq!(cpu.pc(), 6);
    assert_eq!(timer.cycles(), 24);
}

#[test]
fn jr_nz_cycles_depend_on_branch() {
    // Not taken: Z=1.
    let (mut cpu, mut bus, mut timer) = setup(&[0x20, 0x02]);
    cpu.set_flag(Flag::Z, true);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 8);
    assert_eq!(cpu.pc(), 2);

    // Taken: Z=0.
    let (mut cpu, mut bus, mut timer) = setup(&[0x20, 0x02]);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 12);
    assert_eq!(cpu.pc(), 4);
}

#[test]
fn jr_negative_offset() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x00, 0x00, 0x18, 0xFC]);
    cpu.regs.pc = 2;
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.pc(), 0);
}

#[test]
fn jp_cc_not_taken_consumes_operands() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xC2, 0x00, 0x80]);
    cpu.set_flag(Flag::Z, true);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 12);
    assert_eq!(cpu.pc(), 3);
}

#[test]
fn call_and_ret_use_stack() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xCD, 0x34, 0x12]);
    bus.memory[0x1234] = 0xC9;

    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 24);
    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(cpu.sp(), 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x00);
    assert_eq!(bus.memory[0xFFFC], 0x03);

    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 16);
    assert_eq!(cpu.pc(), 0x0003);
    assert_eq!(cpu.sp(), 0xFFFE);
}

#[test]
fn call_cc_not_taken_skips_push() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xDC, 0x34, 0x12]);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 12);
    assert_eq!(cpu.pc(), 3);
    assert_eq!(cpu.sp(), 0xFFFE);
}

#[test]
fn ret_cc_cycles() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xD8, 0xD8]);
    bus.memory[0xFFFC] = 0x00;
    bus.memory[0xFFFD] = 0x40;
    cpu.regs.sp = 0xFFFC;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 8);
    assert_eq!(cpu.pc(), 1);

    cpu.set_flag(Flag::C, true);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 20);
    assert_eq!(cpu.pc(), 0x4000);
    assert_eq!(cpu.sp(), 0xFFFE);
}

#[test]
fn rst_pushes_return_address() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x00, 0xEF]);
    cpu.regs.pc = 1;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 16);
    assert_eq!(cpu.pc(), 0x28);
    assert_eq!(bus.memory[0xFFFC], 0x02);
    assert_eq!(bus.memory[0xFFFD], 0x00);
}

#[test]
fn pop_af_masks_low_nibble() {
    // PUSH BC; POP AF
    let (mut cpu, mut bus, mut timer) = setup(&[0xC5, 0xF1]);
    cpu.regs.set_bc(0x12FF);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 16);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 12);
    assert_eq!(cpu.af(), 0x12F0);
    assert_eq!(cpu.regs.f & 0x0F, 0);
}

#[test]
fn ld_hl_increment_and_decrement() {
    // LD (HL+),A; LD A,(HL-)
    let (mut cpu, mut bus, mut timer) = setup(&[0x22, 0x3A]);
    cpu.regs.a = 0x5A;
    cpu.regs.set_hl(0xC000);
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(bus.memory[0xC000], 0x5A);
    assert_eq!(cpu.hl(), 0xC001);

    bus.memory[0xC001] = 0x77;
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 0x77);
    assert_eq!(cpu.hl(), 0xC000);
}

#[test]
fn ldh_uses_high_page() {
    // LDH (0x80),A; LD (C),A
    let (mut cpu, mut bus, mut timer) = setup(&[0xE0, 0x80, 0xE2]);
    cpu.regs.a = 0x42;
    cpu.regs.c = 0x81;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 12);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 8);
    assert_eq!(bus.memory[0xFF80], 0x42);
    assert_eq!(bus.memory[0xFF81], 0x42);
}

#[test]
fn ld_a16_sp_stores_both_bytes() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x08, 0x00, 0xC0]);
    cpu.regs.sp = 0xBEEF;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 20);
    assert_eq!(bus.memory[0xC000], 0xEF);
    assert_eq!(bus.memory[0xC001], 0xBE);
}

#[test]
fn inc_sets_half_carry_and_keeps_carry() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x3C]);
    cpu.regs.a = 0x0F;
    cpu.set_flag(Flag::C, true);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 4);
    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn dec_half_borrow_and_zero() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x05, 0x0D]);
    cpu.regs.b = 0x10;
    cpu.regs.c = 0x01;
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.b, 0x0F);
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::N));
    assert!(!cpu.get_flag(Flag::Z));

    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.c, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::H));
}

#[test]
fn inc_hl_indirect_costs_twelve() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x34]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0xFF;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 12);
    assert_eq!(bus.memory[0xC000], 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
}

#[test]
fn add_overflow_sets_all_carries() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x80]);
    cpu.regs.a = 0xFF;
    cpu.regs.b = 0x01;
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::N));
}

#[test]
fn adc_includes_carry_in_half_carry() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x88]);
    cpu.regs.a = 0x0E;
    cpu.regs.b = 0x01;
    cpu.set_flag(Flag::C, true);
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn sbc_flags_come_from_original_a() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x98]);
    cpu.regs.a = 0x10;
    cpu.regs.b = 0x0F;
    cpu.set_flag(Flag::C, true);
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn sub_borrow_sets_carry() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xD6, 0x01]);
    cpu.regs.a = 0x00;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 8);
    assert_eq!(cpu.regs.a, 0xFF);
    assert!(cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::H));
}

#[test]
fn cp_leaves_a_unchanged() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xFE, 0x40]);
    cpu.regs.a = 0x3C;
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 0x3C);
    assert!(cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::N));
    assert!(!cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::H));
}

#[test]
fn logic_ops_set_fixed_flags() {
    // AND B; XOR A; OR C
    let (mut cpu, mut bus, mut timer) = setup(&[0xA0, 0xAF, 0xB1]);
    cpu.regs.a = 0xF0;
    cpu.regs.b = 0x0F;
    cpu.regs.c = 0x81;
    cpu.set_flag(Flag::C, true);

    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.flags(), Flags::Z | Flags::H);

    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.flags(), Flags::Z);

    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 0x81);
    assert_eq!(cpu.regs.flags(), Flags::empty());
}

#[test]
fn add_hl_leaves_zero_flag() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x09]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.set_flag(Flag::Z, true);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 8);
    assert_eq!(cpu.hl(), 0x1000);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn add_sp_signed_uses_low_byte_carries() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xE8, 0x08]);
    cpu.regs.sp = 0xFFF8;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 16);
    assert_eq!(cpu.sp(), 0x0000);
    assert_eq!(cpu.regs.flags(), Flags::H | Flags::C);
}

#[test]
fn ld_hl_sp_negative_offset() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xF8, 0xFF]);
    cpu.regs.sp = 0x0000;
    cpu.set_flag(Flag::Z, true);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 12);
    assert_eq!(cpu.hl(), 0xFFFF);
    assert_eq!(cpu.regs.flags(), Flags::empty());
}

#[test]
fn rla_clears_zero_flag() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x17]);
    cpu.regs.a = 0x80;
    cpu.set_flag(Flag::Z, true);
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));
}

#[test]
fn rrca_rotates_through_bit_zero() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x0F]);
    cpu.regs.a = 0x01;
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 0x80);
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn daa_corrects_bcd_addition() {
    // ADD A,0x38; DAA
    let (mut cpu, mut bus, mut timer) = setup(&[0xC6, 0x38, 0x27]);
    cpu.regs.a = 0x45;
    step(&mut cpu, &mut bus, &mut timer);
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn cpl_scf_ccf() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x2F, 0x37, 0x3F]);
    cpu.regs.a = 0x0F;
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 0xF0);
    assert!(cpu.get_flag(Flag::N) && cpu.get_flag(Flag::H));

    step(&mut cpu, &mut bus, &mut timer);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::N) && !cpu.get_flag(Flag::H));

    step(&mut cpu, &mut bus, &mut timer);
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn cb_bit_on_hl_costs_twelve_and_keeps_carry() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xCB, 0x7E]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x80;
    cpu.set_flag(Flag::C, true);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 12);
    assert_eq!(cpu.pc(), 2);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn cb_set_and_res_on_hl() {
    // SET 3,(HL); RES 7,(HL)
    let (mut cpu, mut bus, mut timer) = setup(&[0xCB, 0xDE, 0xCB, 0xBE]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x80;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 16);
    assert_eq!(bus.memory[0xC000], 0x88);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 16);
    assert_eq!(bus.memory[0xC000], 0x08);
}

#[test]
fn cb_swap_and_srl() {
    // SWAP A; SRL B
    let (mut cpu, mut bus, mut timer) = setup(&[0xCB, 0x37, 0xCB, 0x38]);
    cpu.regs.a = 0xA5;
    cpu.regs.b = 0x01;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 8);
    assert_eq!(cpu.regs.a, 0x5A);
    assert_eq!(cpu.regs.flags(), Flags::empty());

    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.b, 0x00);
    assert_eq!(cpu.regs.flags(), Flags::Z | Flags::C);
}

#[test]
fn cb_sra_keeps_sign_bit() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xCB, 0x29]);
    cpu.regs.c = 0x81;
    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.c, 0xC0);
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn interrupt_dispatch_pushes_pc_and_clears_if() {
    let (mut cpu, mut bus, mut timer) = setup(&[]);
    cpu.regs.pc = 0x1234;
    cpu.ime.enabled = true;
    bus.memory[0xFFFF] = 0x1F;
    bus.memory[0xFF0F] = 0x05; // VBlank and timer

    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 20);
    assert_eq!(timer.cycles(), 20);
    assert_eq!(cpu.pc(), 0x0040);
    assert_eq!(cpu.sp(), 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x12);
    assert_eq!(bus.memory[0xFFFC], 0x34);
    assert_eq!(bus.memory[0xFF0F], 0x04);
    assert!(!cpu.ime_enabled());

    // Next call runs the handler's first instruction.
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 4);
    assert_eq!(cpu.pc(), 0x0041);
}

#[test]
fn disabled_interrupt_is_ignored() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x00]);
    cpu.ime.enabled = true;
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x04;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 4);
    assert_eq!(cpu.pc(), 1);
}

#[test]
fn ei_takes_effect_after_next_instruction() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xFB, 0x00, 0x00]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    step(&mut cpu, &mut bus, &mut timer);
    assert!(!cpu.ime_enabled());
    assert_eq!(cpu.pc(), 1);

    // The instruction after EI still runs.
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 4);
    assert!(cpu.ime_enabled());
    assert_eq!(cpu.pc(), 2);

    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 20);
    assert_eq!(cpu.pc(), 0x0040);
    assert_eq!(bus.memory[0xFFFC], 0x02);
}

#[test]
fn di_takes_effect_after_next_instruction() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xF3, 0x00]);
    cpu.ime.enabled = true;

    step(&mut cpu, &mut bus, &mut timer);
    assert!(cpu.ime_enabled());
    // An interrupt raised right after DI is still taken.
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 20);
    assert_eq!(cpu.pc(), 0x0040);
    assert_eq!(bus.memory[0xFFFC], 0x01);
    assert!(!cpu.ime_enabled());
}

#[test]
fn di_after_ei_leaves_interrupts_off() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xFB, 0xF3, 0x00, 0x00]);
    step(&mut cpu, &mut bus, &mut timer);
    step(&mut cpu, &mut bus, &mut timer);
    assert!(cpu.ime_enabled());
    step(&mut cpu, &mut bus, &mut timer);
    assert!(!cpu.ime_enabled());

    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 4);
    assert_eq!(cpu.pc(), 4);
}

#[test]
fn reti_enables_after_next_instruction() {
    let (mut cpu, mut bus, mut timer) = setup(&[]);
    bus.memory[0x0010] = 0xD9;
    cpu.regs.pc = 0x0010;
    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0x00;
    bus.memory[0xFFFD] = 0x02;
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 16);
    assert!(!cpu.ime_enabled());
    assert_eq!(cpu.pc(), 0x0200);

    // The instruction at the return address runs before the next dispatch.
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 4);
    assert!(cpu.ime_enabled());
    assert_eq!(cpu.pc(), 0x0201);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 20);
    assert_eq!(cpu.pc(), 0x0040);
}

#[test]
fn halt_idles_until_interrupt_requested() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x76, 0x00]);
    bus.memory[0xFFFF] = 0x01;

    step(&mut cpu, &mut bus, &mut timer);
    assert!(cpu.is_halted());
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 4);
    assert_eq!(cpu.pc(), 1);

    // IME is off: leave HALT without dispatching.
    bus.memory[0xFF0F] = 0x01;
    step(&mut cpu, &mut bus, &mut timer);
    assert!(!cpu.is_halted());
    assert_eq!(cpu.pc(), 2);
}

#[test]
fn halt_bug_repeats_next_byte() {
    // HALT; INC A
    let (mut cpu, mut bus, mut timer) = setup(&[0x76, 0x3C]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    step(&mut cpu, &mut bus, &mut timer);
    assert!(!cpu.is_halted());
    assert!(cpu.halt_bug);

    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 1);
    assert_eq!(cpu.pc(), 1);

    step(&mut cpu, &mut bus, &mut timer);
    assert_eq!(cpu.regs.a, 2);
    assert_eq!(cpu.pc(), 2);
}

#[test]
fn stop_consumes_padding_byte() {
    let (mut cpu, mut bus, mut timer) = setup(&[0x10, 0x00, 0x00]);
    assert_eq!(step(&mut cpu, &mut bus, &mut timer), 4);
    assert_eq!(cpu.pc(), 2);
}

#[test]
fn unimplemented_opcode_locks_cpu() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xD3]);
    let err = cpu.execute(&mut bus, &mut timer).unwrap_err();
    assert_eq!(
        err,
        CoreError::UnimplementedOpcode {
            opcode: 0xD3,
            prefixed: false,
            pc: 0
        }
    );
    assert!(cpu.is_locked());
    assert_eq!(timer.cycles(), 0);

    let err = cpu.execute(&mut bus, &mut timer).unwrap_err();
    assert_eq!(err, CoreError::Locked { pc: 0 });
}

#[test]
fn reset_clears_lock_and_registers() {
    let (mut cpu, mut bus, mut timer) = setup(&[0xFD]);
    assert!(cpu.execute(&mut bus, &mut timer).is_err());
    cpu.reset();
    assert!(!cpu.is_locked());
    assert_eq!(*cpu.regs(), Registers::default());
}

#[test]
fn dmg_boot_state_starts_at_cartridge_entry() {
    let mut cpu = Cpu::new();
    cpu.apply_dmg_boot_state();
    assert_eq!(cpu.pc(), 0x0100);
    assert_eq!(cpu.sp(), 0xFFFE);
    assert_eq!(cpu.af(), 0x01B0);
    assert_eq!(cpu.bc(), 0x0013);
    assert_eq!(cpu.de(), 0x00D8);
    assert_eq!(cpu.hl(), 0x014D);
}

#[test]
fn power_on_state_is_zeroed() {
    let cpu = Cpu::new();
    assert_eq!(*cpu.regs(), Registers::default());
    assert_eq!((cpu.pc(), cpu.sp(), cpu.af()), (0, 0, 0));
    for flag in Flag::ALL {
        assert!(!cpu.get_flag(flag));
    }
    assert!(!cpu.ime_enabled());
    assert!(!cpu.is_halted());
}

#[test]
fn push_then_pop_restores_sp() {
    let (mut cpu, mut bus, _) = setup(&[]);
    cpu.push_u16(&mut bus, 0xBEEF);
    assert_eq!(cpu.sp(), 0xFFFC);
    assert_eq!((bus.memory[0xFFFC], bus.memory[0xFFFD]), (0xEF, 0xBE));
    assert_eq!(cpu.pop_u16(&mut bus), 0xBEEF);
    assert_eq!(cpu.sp(), 0xFFFE);
}
