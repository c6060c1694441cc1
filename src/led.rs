use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::regs::{DDRB, Field, PORTB, RegisterFile};

/// Data direction bit of the LED pin (`DDB4`).
pub const LED_DDR: Field = Field::bit(DDRB, 4);
/// Output bit of the LED pin (`PORTB4`).
pub const LED_PORT: Field = Field::bit(PORTB, 4);

/// LED on `PB4`, driven through a register file.
///
/// Every operation is a read-modify-write of a single bit, other pins of the
/// port keep their state.
pub struct Led<'a, R> {
    regs: &'a mut R,
}

impl<'a, R> Led<'a, R>
where
    R: RegisterFile,
{
    pub fn new(regs: &'a mut R) -> Self {
        Self { regs }
    }

    /// Switch the pin to output mode.
    pub fn make_output(&mut self) {
        self.regs.modify(LED_DDR.reg, |r| LED_DDR.set(r));
    }
}

impl<R> ErrorType for Led<'_, R> {
    type Error = Infallible;
}

impl<R> OutputPin for Led<'_, R>
where
    R: RegisterFile,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.regs.modify(LED_PORT.reg, |r| LED_PORT.clear(r));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.regs.modify(LED_PORT.reg, |r| LED_PORT.set(r));
        Ok(())
    }
}

impl<R> StatefulOutputPin for Led<'_, R>
where
    R: RegisterFile,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(LED_PORT.is_set(self.regs.read(LED_PORT.reg)))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!LED_PORT.is_set(self.regs.read(LED_PORT.reg)))
    }

    /// Flip the output with an exclusive-or of the port register.
    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.regs.modify(LED_PORT.reg, |r| r ^ LED_PORT.mask());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::digital::{OutputPin, StatefulOutputPin};

    use super::Led;
    use crate::regs::{DDRB, PORTB, RegisterFile};
    use crate::sim::SimRegisters;

    #[test]
    fn output_mode_keeps_other_pins() {
        let mut regs = SimRegisters::new();
        regs.write(DDRB, 0b0000_0011);
        Led::new(&mut regs).make_output();
        assert_eq!(regs.read(DDRB), 0b0001_0011);
    }

    #[test]
    fn toggle_touches_only_pb4() {
        let mut regs = SimRegisters::new();
        regs.write(PORTB, 0b1010_0101);

        let mut led = Led::new(&mut regs);
        led.toggle().unwrap();
        assert!(led.is_set_high().unwrap());
        led.toggle().unwrap();
        assert!(led.is_set_low().unwrap());

        assert_eq!(regs.read(PORTB), 0b1010_0101);
    }

    #[test]
    fn set_and_clear() {
        let mut regs = SimRegisters::new();
        regs.write(PORTB, 0b0000_1000);

        let mut led = Led::new(&mut regs);
        led.set_high().unwrap();
        assert_eq!(regs.read(PORTB), 0b0001_1000);

        let mut led = Led::new(&mut regs);
        led.set_low().unwrap();
        assert_eq!(regs.read(PORTB), 0b0000_1000);
    }
}
