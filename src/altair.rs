/*!
## Altair Machine

Ties the CPU, its memory and port space to the BASIC runtime. The CPU
ticks the guest image while the runtime services the console; typed lines
go to a pending INPUT first and to the command interpreter otherwise.

*/

use crate::cpu::{Cpu, Memory, Opcode, Status};
use crate::io::{PortIo, Terminal, CONSOLE_PORT};
use crate::mach::{Event, Runtime};

/// Machine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub console_port: u8,
    /// Where the guest image's jump at address 0 lands.
    pub entry: u16,
    /// Print entered commands and INPUT replies back to the terminal.
    pub echo: bool,
    /// Sign-on text on the first run.
    pub banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            console_port: CONSOLE_PORT,
            entry: 0x1000,
            echo: true,
            banner: true,
        }
    }
}

/// What the front panel lights show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub address: u16,
    pub data: u8,
    pub status: Status,
    pub running: bool,
}

pub struct Altair<T> {
    pub cpu: Cpu,
    pub memory: Memory,
    pub io: PortIo<T>,
    pub basic: Runtime,
    config: Config,
    running: bool,
    banner_shown: bool,
}

impl<T: Terminal> Altair<T> {
    pub fn new(terminal: T) -> Altair<T> {
        Altair::with_config(Config::default(), terminal)
    }

    pub fn with_config(config: Config, terminal: T) -> Altair<T> {
        let mut basic = Runtime::new();
        basic.set_echo(config.echo);
        Altair {
            cpu: Cpu::new(),
            memory: Memory::new(),
            io: PortIo::with_console_port(config.console_port, terminal),
            basic,
            config,
            running: false,
            banner_shown: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clears the CPU and memory and stops any BASIC program.
    /// The stored program survives.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.memory.reset();
        self.io.clear_input();
        self.basic.halt();
        self.running = false;
        self.banner_shown = false;
        tracing::debug!("machine reset");
    }

    /// Resets, writes the guest image and starts the CPU.
    pub fn load_basic(&mut self) {
        self.io.terminal_mut().clear();
        self.reset();
        let [lo, hi] = self.config.entry.to_le_bytes();
        self.memory.load_program(0, &[Opcode::Jmp.byte(), lo, hi]);
        tracing::debug!(entry = format_args!("{:#06x}", self.config.entry), "guest loaded");
        self.run();
    }

    pub fn run(&mut self) {
        self.running = true;
        if self.config.banner && !self.banner_shown {
            self.banner_shown = true;
            self.basic.banner(&mut self.io);
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Runs up to `steps` instructions while the machine is running.
    /// Returns the cycles spent.
    pub fn tick(&mut self, steps: usize) -> u32 {
        if !self.running {
            return 0;
        }
        let mut cycles = 0;
        for _ in 0..steps {
            if self.cpu.is_halted() {
                break;
            }
            cycles += self.cpu.step(&mut self.memory, &mut self.io);
        }
        cycles
    }

    /// Single instruction. Only while stopped.
    pub fn step(&mut self) -> u32 {
        if self.running {
            return 0;
        }
        self.cpu.step(&mut self.memory, &mut self.io)
    }

    /// Loads `address` into the program counter and reads it.
    pub fn examine(&mut self, address: u16) -> u8 {
        self.cpu.pc = address;
        self.memory.read(address as u32)
    }

    pub fn deposit(&mut self, address: u16, value: u8) {
        self.cpu.pc = address;
        self.memory.write(address as u32, value as u32);
    }

    pub fn panel(&self) -> Panel {
        Panel {
            address: self.cpu.pc,
            data: self.memory.read(self.cpu.pc as u32),
            status: self.cpu.status,
            running: self.running,
        }
    }

    /// Routes a typed line to the pending INPUT or the command interpreter.
    pub fn enter(&mut self, line: &str) {
        if self.config.echo && !self.basic.is_waiting() {
            self.io.terminal_mut().println(line);
        }
        self.basic.enter(line, &mut self.io);
    }

    pub fn execute(&mut self, budget: usize) -> Event {
        self.basic.execute(budget, &mut self.io)
    }

    pub fn interrupt(&mut self) {
        self.basic.interrupt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Transcript;

    #[test]
    fn test_guest_image() {
        let mut altair = Altair::new(Transcript::new());
        altair.load_basic();
        assert_eq!(altair.memory.read(0), 0xC3);
        assert_eq!(altair.memory.read_word(1), 0x1000);
        altair.tick(1);
        assert_eq!(altair.cpu.pc, 0x1000);
    }

    #[test]
    fn test_step_only_when_stopped() {
        let mut altair = Altair::new(Transcript::new());
        altair.load_basic();
        assert_eq!(altair.step(), 0);
        altair.stop();
        assert_eq!(altair.step(), 3);
        assert_eq!(altair.panel().address, 0x1000);
    }
}
