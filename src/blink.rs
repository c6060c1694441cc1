use embedded_hal::digital::StatefulOutputPin;

use crate::{
    clock::CLOCK_HZ,
    led::Led,
    regs::{CS1, RegisterFile, TCCR1A, TCCR1B, TCNT1, TIMSK, TOIE1},
    timing::{Prescaler, Timing},
};

/// Blink timing: toggle PB4 once a second.
pub const TIMING: Timing = Timing::new(CLOCK_HZ, Prescaler::Div1024, 1000);

/// `TCNT1` start value, the counter overflows one period later.
pub const RELOAD: u16 = TIMING.reload();

/// Arm Timer/Counter1 and enable interrupts.
///
/// Must run once, with interrupts disabled, before `TIMER1_OVF` can fire.
/// Interrupts are enabled as the very last step.
pub fn configure<R: RegisterFile>(regs: &mut R) {
    // PB4 stays high-impedance unless it is an output.
    Led::new(regs).make_output();

    // Preload before the clock is selected so the first period is full length.
    regs.write_wide(TCNT1, RELOAD);

    // Normal mode, WGM13:0 = 0, output compare pins disconnected.
    regs.write(TCCR1A, 0);
    // Selecting the clock source starts the counter.
    regs.write(TCCR1B, CS1.insert(0, TIMING.prescaler.cs_bits()));

    // TIMSK is shared with Timer/Counter0.
    regs.modify(TIMSK, |r| TOIE1.set(r));

    regs.enable_interrupts();
}

/// Timer/Counter1 overflow handler body.
///
/// Flips the LED and restarts the period. Runs to completion with
/// interrupts masked.
pub fn on_overflow<R: RegisterFile>(regs: &mut R) {
    let Ok(()) = Led::new(regs).toggle();
    regs.write_wide(TCNT1, RELOAD);
}
