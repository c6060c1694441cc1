use crate::{
    hal::{
        pac::{PORTB, TC1, portb::RegisterBlock as PortRegisters},
        port::{PB4, Pin, mode::Output},
    },
    regs::{self, Reg8, Reg16, RegisterFile},
};

/// Register file of the running device, backed by the PAC.
///
/// Owning a `Board` stands for exclusive access to `PB4` and Timer/Counter1.
/// Only the registers the blinker uses are mapped, anything else is a bug.
pub struct Board {
    tc1: TC1,
}

impl Board {
    /// Take over the LED pin and the timer.
    #[must_use]
    pub fn new(_led: Pin<Output, PB4>, tc1: TC1) -> Self {
        Self { tc1 }
    }

    /// Create a handle without owning the peripherals.
    ///
    /// # Safety
    ///
    /// No other context may access `PORTB`, `DDRB` or Timer/Counter1 while
    /// the returned handle is in use. The overflow handler relies on the main
    /// context leaving them alone once `blink::configure` has returned.
    #[must_use]
    pub unsafe fn steal() -> Self {
        // SAFETY: Forwarded to the caller.
        Self {
            tc1: unsafe { TC1::steal() },
        }
    }

    fn port(&self) -> &PortRegisters {
        // SAFETY: Only the PB4 bits are changed, and `Board` owns PB4. The
        // other pins are written back unchanged by read-modify-write.
        unsafe { &*PORTB::ptr() }
    }
}

impl RegisterFile for Board {
    fn read(&mut self, reg: Reg8) -> u8 {
        match reg {
            regs::DDRB => self.port().ddrb.read().bits(),
            regs::PORTB => self.port().portb.read().bits(),
            regs::TCCR1A => self.tc1.tccr1a.read().bits(),
            regs::TCCR1B => self.tc1.tccr1b.read().bits(),
            regs::TIMSK => self.tc1.timsk.read().bits(),
            _ => unreachable!(),
        }
    }

    fn write(&mut self, reg: Reg8, value: u8) {
        // SAFETY: The blinker only writes values built from the fields in `regs`.
        match reg {
            regs::DDRB => self.port().ddrb.write(|w| unsafe { w.bits(value) }),
            regs::PORTB => self.port().portb.write(|w| unsafe { w.bits(value) }),
            regs::TCCR1A => self.tc1.tccr1a.write(|w| unsafe { w.bits(value) }),
            regs::TCCR1B => self.tc1.tccr1b.write(|w| unsafe { w.bits(value) }),
            regs::TIMSK => self.tc1.timsk.write(|w| unsafe { w.bits(value) }),
            _ => unreachable!(),
        }
    }

    fn read_wide(&mut self, reg: Reg16) -> u16 {
        match reg {
            regs::TCNT1 => self.tc1.tcnt1.read().bits(),
            _ => unreachable!(),
        }
    }

    fn write_wide(&mut self, reg: Reg16, value: u16) {
        match reg {
            // SAFETY: Every counter value is valid.
            regs::TCNT1 => self.tc1.tcnt1.write(|w| unsafe { w.bits(value) }),
            _ => unreachable!(),
        }
    }

    fn enable_interrupts(&mut self) {
        // SAFETY: Called last by `blink::configure`, all shared state is set up.
        unsafe { avr_device::interrupt::enable() }
    }
}
