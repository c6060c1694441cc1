//! Host model of the parts of the ATtiny2313 the blinker uses.
//!
//! [`SimRegisters`] is a plain byte array covering the register part of the
//! data space. [`SimDevice`] adds Timer/Counter1 in normal mode: it counts
//! prescaled CPU cycles, raises `TOV1` on wrap-around and dispatches the
//! overflow handler when `TOIE1` and the global interrupt flag allow it.

use crate::regs::{CS1, Reg8, RegisterFile, SREG_I, TCNT1, TOIE1, TOV1};
use crate::timing::{COUNTER_RANGE, Prescaler};

/// Size of the register part of the data space (general purpose and I/O registers).
const REGISTER_SPACE: usize = 0x60;

/// Register file with power-on reset contents (all zeroes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimRegisters {
    bytes: [u8; REGISTER_SPACE],
}

impl SimRegisters {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; REGISTER_SPACE],
        }
    }
}

impl Default for SimRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile for SimRegisters {
    fn read(&mut self, reg: Reg8) -> u8 {
        self.bytes[reg.addr as usize]
    }

    fn write(&mut self, reg: Reg8, value: u8) {
        self.bytes[reg.addr as usize] = value;
    }
}

/// Interrupt service routine bound to the Timer/Counter1 overflow event.
pub type OverflowHandler = fn(&mut SimRegisters);

/// Simulated CPU with Timer/Counter1.
pub struct SimDevice {
    regs: SimRegisters,
    handler: OverflowHandler,
    /// CPU cycles since reset.
    cycles: u64,
    /// CPU cycles into the current prescaler period.
    prescale_count: u32,
    /// Number of handler invocations.
    serviced: u32,
}

impl SimDevice {
    /// Create a device in reset state with `handler` bound to `TIMER1_OVF`.
    #[must_use]
    pub fn new(handler: OverflowHandler) -> Self {
        Self {
            regs: SimRegisters::new(),
            handler,
            cycles: 0,
            prescale_count: 0,
            serviced: 0,
        }
    }

    pub fn regs(&mut self) -> &mut SimRegisters {
        &mut self.regs
    }

    #[cfg(test)]
    fn cycles(&self) -> u64 {
        self.cycles
    }

    #[must_use]
    pub fn serviced(&self) -> u32 {
        self.serviced
    }

    /// Run for at most `max_cycles` CPU cycles, stopping right after the
    /// overflow handler has run.
    ///
    /// Returns the cycle count at which the handler was invoked.
    pub fn run_until_overflow(&mut self, max_cycles: u64) -> Option<u64> {
        let deadline = self.cycles + max_cycles;

        while self.cycles < deadline {
            if self.dispatch() {
                return Some(self.cycles);
            }

            let Some(prescaler) = Prescaler::from_cs_bits(self.regs.read_field(CS1)) else {
                // Timer stopped, nothing can happen.
                self.cycles = deadline;
                break;
            };

            let to_tick = u64::from(prescaler.divisor() - self.prescale_count);
            let remaining = deadline - self.cycles;
            if remaining < to_tick {
                self.prescale_count += remaining as u32;
                self.cycles = deadline;
                break;
            }

            self.cycles += to_tick;
            self.prescale_count = 0;
            self.tick();

            if self.dispatch() {
                return Some(self.cycles);
            }
        }

        None
    }

    /// Run for `cycles` CPU cycles, servicing every overflow on the way.
    pub fn run(&mut self, cycles: u64) {
        let deadline = self.cycles + cycles;
        while self.cycles < deadline {
            if self.run_until_overflow(deadline - self.cycles).is_none() {
                break;
            }
        }
    }

    /// Advance the counter by one prescaled tick.
    fn tick(&mut self) {
        let next = (u32::from(self.regs.read_wide(TCNT1)) + 1) % COUNTER_RANGE;
        self.regs.write_wide(TCNT1, next as u16);
        if next == 0 {
            self.regs.modify(TOV1.reg, |r| TOV1.set(r));
        }
    }

    /// Run the overflow handler if the interrupt is pending and enabled.
    fn dispatch(&mut self) -> bool {
        let flags = self.regs.read(TOV1.reg);
        let mask = self.regs.read(TOIE1.reg);
        let sreg = self.regs.read(SREG_I.reg);
        if !(TOV1.is_set(flags) && TOIE1.is_set(mask) && SREG_I.is_set(sreg)) {
            return false;
        }

        // Entering the vector clears the flag and masks interrupts, `reti` unmasks them.
        self.regs.write(TOV1.reg, TOV1.clear(flags));
        self.regs.write(SREG_I.reg, SREG_I.clear(sreg));
        (self.handler)(&mut self.regs);
        self.regs.modify(SREG_I.reg, |r| SREG_I.set(r));

        self.serviced += 1;
        true
    }
}
