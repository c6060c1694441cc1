//! ATtiny2313 registers used by the blinker.
//!
//! Addresses are data-space addresses (I/O address + 0x20) as listed in the
//! "Register Summary" section of the datasheet. On the device they only name
//! the register, `board::Board` reaches it through the PAC. The simulator
//! stores registers at these addresses.

/// An 8-bit register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reg8 {
    pub addr: u16,
}

/// A 16-bit register pair. The low byte lives at `addr`, the high byte at `addr + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reg16 {
    pub addr: u16,
}

impl Reg16 {
    #[must_use]
    pub const fn low(self) -> Reg8 {
        Reg8 { addr: self.addr }
    }

    #[must_use]
    pub const fn high(self) -> Reg8 {
        Reg8 { addr: self.addr + 1 }
    }
}

/// A group of adjacent bits inside an 8-bit register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub reg: Reg8,
    pub shift: u8,
    pub width: u8,
}

impl Field {
    #[must_use]
    pub const fn new(reg: Reg8, shift: u8, width: u8) -> Self {
        assert!(width > 0 && shift + width <= 8);
        Self { reg, shift, width }
    }

    /// A single-bit field.
    #[must_use]
    pub const fn bit(reg: Reg8, n: u8) -> Self {
        Self::new(reg, n, 1)
    }

    /// Mask of the field within its register.
    #[must_use]
    pub const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) as u8) << self.shift
    }

    /// Replace the field bits of `reg_value` with `value`.
    #[must_use]
    pub const fn insert(self, reg_value: u8, value: u8) -> u8 {
        (reg_value & !self.mask()) | ((value << self.shift) & self.mask())
    }

    /// Extract the field value from `reg_value`.
    #[must_use]
    pub const fn extract(self, reg_value: u8) -> u8 {
        (reg_value & self.mask()) >> self.shift
    }

    #[must_use]
    pub const fn set(self, reg_value: u8) -> u8 {
        reg_value | self.mask()
    }

    #[must_use]
    pub const fn clear(self, reg_value: u8) -> u8 {
        reg_value & !self.mask()
    }

    #[must_use]
    pub const fn is_set(self, reg_value: u8) -> bool {
        reg_value & self.mask() != 0
    }
}

pub const DDRB: Reg8 = Reg8 { addr: 0x37 };
pub const PORTB: Reg8 = Reg8 { addr: 0x38 };

pub const TCNT1: Reg16 = Reg16 { addr: 0x4C };
pub const TCCR1B: Reg8 = Reg8 { addr: 0x4E };
pub const TCCR1A: Reg8 = Reg8 { addr: 0x4F };

pub const TIFR: Reg8 = Reg8 { addr: 0x58 };
pub const TIMSK: Reg8 = Reg8 { addr: 0x59 };

pub const SREG: Reg8 = Reg8 { addr: 0x5F };

/// Clock select, `CS12:CS10`.
pub const CS1: Field = Field::new(TCCR1B, 0, 3);
/// Waveform generation mode, upper half (`WGM13:WGM12`).
pub const WGM1_HIGH: Field = Field::new(TCCR1B, 3, 2);
/// Waveform generation mode, lower half (`WGM11:WGM10`).
pub const WGM1_LOW: Field = Field::new(TCCR1A, 0, 2);

/// Timer/Counter1 overflow flag.
pub const TOV1: Field = Field::bit(TIFR, 7);
/// Timer/Counter1 overflow interrupt enable.
pub const TOIE1: Field = Field::bit(TIMSK, 7);

/// Global interrupt enable.
pub const SREG_I: Field = Field::bit(SREG, 7);

/// Access to the register file.
///
/// Implemented by the real device and by the host simulator, so the blinker
/// logic can be exercised off target.
pub trait RegisterFile {
    fn read(&mut self, reg: Reg8) -> u8;

    fn write(&mut self, reg: Reg8, value: u8);

    /// Read a 16-bit register. Low byte first, this latches the high byte.
    fn read_wide(&mut self, reg: Reg16) -> u16 {
        let low = self.read(reg.low());
        let high = self.read(reg.high());
        u16::from_le_bytes([low, high])
    }

    /// Write a 16-bit register. High byte first, it goes to the TEMP latch.
    fn write_wide(&mut self, reg: Reg16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.write(reg.high(), high);
        self.write(reg.low(), low);
    }

    /// Read, change and write back a register.
    fn modify<F>(&mut self, reg: Reg8, f: F)
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    fn read_field(&mut self, field: Field) -> u8 {
        field.extract(self.read(field.reg))
    }

    /// Update a field leaving the rest of its register intact.
    fn write_field(&mut self, field: Field, value: u8) {
        self.modify(field.reg, |r| field.insert(r, value));
    }

    /// Set the global interrupt enable flag.
    fn enable_interrupts(&mut self) {
        self.modify(SREG, |r| SREG_I.set(r));
    }
}
