pub const MEMORY_SIZE: usize = 0x10000;

/// Flat 64K address space. Addresses and values wrap; nothing faults.
pub struct Memory {
    data: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Memory {
            data: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memory {{ {} bytes }}", self.data.len())
    }
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    pub fn reset(&mut self) {
        for byte in self.data.iter_mut() {
            *byte = 0;
        }
    }

    pub fn read(&self, address: u32) -> u8 {
        self.data[(address & 0xFFFF) as usize]
    }

    pub fn write(&mut self, address: u32, value: u32) {
        self.data[(address & 0xFFFF) as usize] = (value & 0xFF) as u8;
    }

    /// Little-endian word at `address`; the high byte wraps past 0xFFFF.
    pub fn read_word(&self, address: u32) -> u16 {
        let lo = self.read(address) as u16;
        let hi = self.read(address.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Copies a guest image in at `base`, each byte wrapping on its own.
    pub fn load_program(&mut self, base: u32, program: &[u8]) {
        for (offset, &byte) in program.iter().enumerate() {
            self.write(base.wrapping_add(offset as u32), byte as u32);
        }
    }
}
