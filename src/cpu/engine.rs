use super::{Memory, Opcode};
use crate::io::Io;

/// Condition flags, derived from the last arithmetic result.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Flags {
    pub zero: bool,
    pub sign: bool,
    pub parity: bool,
    pub carry: bool,
    /// Reserved. Never computed.
    pub aux_carry: bool,
}

/// Control bus signals for the front panel. Decode never reads these.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Status {
    pub halted: bool,
    pub interrupts_enabled: bool,
    pub wait: bool,
    pub mem_read: bool,
    pub input: bool,
    pub output: bool,
    pub m1: bool,
}

/// An 8080 core executing one instruction per `step`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cpu {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub pc: u16,
    pub sp: u16,
    pub flags: Flags,
    pub status: Status,
}

impl Default for Cpu {
    fn default() -> Self {
        Cpu {
            a: 0,
            b: 0,
            c: 0,
            d: 0,
            e: 0,
            h: 0,
            l: 0,
            pc: 0,
            sp: 0xFFFF,
            flags: Flags::default(),
            status: Status::default(),
        }
    }
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu::default()
    }

    pub fn reset(&mut self) {
        *self = Cpu::default();
        tracing::debug!("cpu reset");
    }

    pub fn is_halted(&self) -> bool {
        self.status.halted
    }

    fn fetch(&mut self, memory: &Memory) -> u8 {
        let byte = memory.read(self.pc as u32);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    /// Executes one instruction and returns its cycle cost.
    /// A halted core does nothing and costs 0.
    pub fn step<I: Io>(&mut self, memory: &mut Memory, io: &mut I) -> u32 {
        if self.status.halted {
            return 0;
        }
        self.status.input = false;
        self.status.output = false;
        self.status.m1 = true;
        self.status.mem_read = true;
        let address = self.pc;
        let byte = self.fetch(memory);
        let opcode = match Opcode::decode(byte) {
            Some(opcode) => opcode,
            None => {
                tracing::warn!(
                    opcode = format_args!("{:#04x}", byte),
                    address = format_args!("{:#06x}", address),
                    "unimplemented opcode"
                );
                self.status.halted = true;
                self.status.m1 = false;
                self.status.mem_read = false;
                return 1;
            }
        };
        use Opcode::*;
        match opcode {
            Nop => {}
            Hlt => self.status.halted = true,
            Jmp => self.pc = memory.read_word(self.pc as u32),
            MviA => self.a = self.fetch(memory),
            AddB => {
                let sum = self.a as u16 + self.b as u16;
                self.a = (sum & 0xFF) as u8;
                self.update_flags(sum);
            }
            Out => {
                self.status.output = true;
                let port = self.fetch(memory);
                io.output(port, self.a);
            }
            In => {
                self.status.input = true;
                let port = self.fetch(memory);
                self.a = io.input(port);
            }
        }
        self.status.m1 = false;
        self.status.mem_read = false;
        opcode.cycles()
    }

    /// Flags from the untruncated result. Carry is bit 8.
    fn update_flags(&mut self, result: u16) {
        let value = (result & 0xFF) as u8;
        self.flags.zero = value == 0;
        self.flags.sign = value & 0x80 != 0;
        self.flags.parity = value.count_ones() % 2 == 0;
        self.flags.carry = result > 0xFF;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{PortIo, Transcript};
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_unimplemented_opcode_is_logged_and_halts() {
        let mut cpu = Cpu::new();
        let mut memory = Memory::new();
        let mut io = PortIo::new(Transcript::new());
        memory.load_program(0, &[0x00, 0xED]);
        assert_eq!(cpu.step(&mut memory, &mut io), 1);
        assert!(!cpu.is_halted());
        cpu.step(&mut memory, &mut io);
        assert!(cpu.is_halted());
        assert_eq!(cpu.pc, 2);
        assert!(logs_contain("unimplemented opcode"));
        assert!(logs_contain("0xed"));
        assert_eq!(cpu.step(&mut memory, &mut io), 0);
        assert_eq!(cpu.pc, 2);
    }

    #[test]
    fn test_flags() {
        let mut cpu = Cpu::new();
        cpu.update_flags(0x100);
        assert_eq!(
            cpu.flags,
            Flags {
                zero: true,
                sign: false,
                parity: true,
                carry: true,
                aux_carry: false,
            }
        );
        cpu.update_flags(0x81);
        assert!(cpu.flags.sign);
        assert!(cpu.flags.parity);
        assert!(!cpu.flags.carry);
        assert!(!cpu.flags.zero);
    }
}
