/// The supported subset of the 8080 instruction set.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Opcode {
    Nop,
    Hlt,
    Jmp,
    MviA,
    AddB,
    Out,
    In,
}

impl Opcode {
    pub fn decode(byte: u8) -> Option<Opcode> {
        use Opcode::*;
        Some(match byte {
            0x00 => Nop,
            0x76 => Hlt,
            0xC3 => Jmp,
            0x3E => MviA,
            0x80 => AddB,
            0xD3 => Out,
            0xDB => In,
            _ => return None,
        })
    }

    pub fn byte(self) -> u8 {
        use Opcode::*;
        match self {
            Nop => 0x00,
            Hlt => 0x76,
            Jmp => 0xC3,
            MviA => 0x3E,
            AddB => 0x80,
            Out => 0xD3,
            In => 0xDB,
        }
    }

    /// Cycle cost reported to the caller of `step`.
    pub fn cycles(self) -> u32 {
        use Opcode::*;
        match self {
            Nop | Hlt | AddB => 1,
            MviA | Out | In => 2,
            Jmp => 3,
        }
    }

    /// Operand bytes following the opcode.
    pub fn operand_len(self) -> u16 {
        use Opcode::*;
        match self {
            Nop | Hlt | AddB => 0,
            MviA | Out | In => 1,
            Jmp => 2,
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        let s = match self {
            Nop => "NOP",
            Hlt => "HLT",
            Jmp => "JMP",
            MviA => "MVI A",
            AddB => "ADD B",
            Out => "OUT",
            In => "IN",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_round_trip() {
        for byte in 0..=255u8 {
            if let Some(op) = Opcode::decode(byte) {
                assert_eq!(op.byte(), byte);
            }
        }
        assert_eq!(Opcode::decode(0x01), None);
        assert_eq!(Opcode::decode(0xFF), None);
    }
}
