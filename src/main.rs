#![cfg_attr(target_arch = "avr", no_std, no_main, feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod firmware {
    use nano_fmt::NanoDisplay;
    use panic_halt as _;

    use ovf_blink::{blink, board::Board, hal, report, usart};

    /// UART baud rate.
    const BAUDRATE: u32 = 9600;

    /// TIMER1 overflow interrupt.
    /// Called when TCNT1 wraps from 0xFFFF to 0, once per blink period.
    #[avr_device::interrupt(attiny2313)]
    fn TIMER1_OVF() {
        // SAFETY: main does not touch PB4 or TC1 after `blink::configure`,
        // and this interrupt does not nest.
        let mut board = unsafe { Board::steal() };
        blink::on_overflow(&mut board);
    }

    #[hal::entry]
    fn main() -> ! {
        let dp = hal::Peripherals::take().unwrap();
        let pins = hal::pins!(dp);

        let mut serial = usart::Usart0::new(dp.USART, pins.pd1.into_output(), BAUDRATE);
        report::Armed.fmt(&mut serial);

        let mut board = Board::new(pins.pb4.into_output(), dp.TC1);
        blink::configure(&mut board);

        loop {
            // Set sleep mode to IDLE and enable sleep. Timer1 keeps running in IDLE.
            dp.CPU.mcucr.modify(|_, w| w.sm().idle().se().set_bit());
            // Go to sleep until next interrupt.
            avr_device::asm::sleep();
            // Disable sleep so we don't accidentally go to sleep.
            dp.CPU.mcucr.modify(|_, w| w.se().clear_bit());
        }
    }
}

/// `nano-fmt` adapter for an `io::Write`, keeping the first write error.
#[cfg(not(target_arch = "avr"))]
struct IoWriter<W> {
    inner: W,
    error: Option<std::io::Error>,
}

#[cfg(not(target_arch = "avr"))]
impl<W: std::io::Write> IoWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// Flush the writer, reporting the first error seen.
    fn finish(mut self) -> std::io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => self.inner.flush(),
        }
    }
}

#[cfg(not(target_arch = "avr"))]
impl<W: std::io::Write> nano_fmt::NanoWrite for IoWriter<W> {
    fn write_byte(&mut self, b: u8) {
        if self.error.is_none() {
            self.error = self.inner.write_all(&[b]).err();
        }
    }
}

/// Run the blinker on the simulated device and print the LED trace.
#[cfg(not(target_arch = "avr"))]
fn main() -> std::io::Result<()> {
    use embedded_hal::digital::StatefulOutputPin;
    use nano_fmt::NanoDisplay;
    use ovf_blink::{blink, clock::CLOCK_HZ, fixed::Millis, led::Led, report, sim::SimDevice};

    const PERIODS: u32 = 5;

    let mut out = IoWriter::new(std::io::stdout().lock());
    report::Armed.fmt(&mut out);

    let mut dev = SimDevice::new(blink::on_overflow);
    blink::configure(dev.regs());

    let timeout = 2 * u64::from(blink::TIMING.cycles());
    for _ in 0..PERIODS {
        let Some(at) = dev.run_until_overflow(timeout) else {
            "no overflow\n".fmt(&mut out);
            break;
        };

        let Ok(on) = Led::new(dev.regs()).is_set_high();
        Millis::from_cycles(at, CLOCK_HZ).fmt(&mut out);
        "s PB4=".fmt(&mut out);
        u8::from(on).fmt(&mut out);
        "\n".fmt(&mut out);
    }

    out.finish()
}
