//! Timer/Counter1 period arithmetic.

/// Number of counter states of the 16-bit Timer/Counter1 (`MAX + 1`).
pub const COUNTER_RANGE: u32 = 1 << 16;

/// Timer/Counter1 clock source prescaler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prescaler {
    Direct,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    /// Clock divisor.
    #[must_use]
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Direct => 1,
            Self::Div8 => 8,
            Self::Div64 => 64,
            Self::Div256 => 256,
            Self::Div1024 => 1024,
        }
    }

    /// `CS12:CS10` bit pattern selecting this prescaler.
    #[must_use]
    pub const fn cs_bits(self) -> u8 {
        match self {
            Self::Direct => 0b001,
            Self::Div8 => 0b010,
            Self::Div64 => 0b011,
            Self::Div256 => 0b100,
            Self::Div1024 => 0b101,
        }
    }

    /// Decode a `CS12:CS10` pattern.
    ///
    /// Returns `None` for a stopped timer and for the external clock sources.
    #[must_use]
    pub const fn from_cs_bits(bits: u8) -> Option<Self> {
        match bits & 0b111 {
            0b001 => Some(Self::Direct),
            0b010 => Some(Self::Div8),
            0b011 => Some(Self::Div64),
            0b100 => Some(Self::Div256),
            0b101 => Some(Self::Div1024),
            _ => None,
        }
    }
}

/// The (clock, prescaler, period) triple the reload value is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub clock_hz: u32,
    pub prescaler: Prescaler,
    pub period_ms: u32,
}

impl Timing {
    #[must_use]
    pub const fn new(clock_hz: u32, prescaler: Prescaler, period_ms: u32) -> Self {
        Self {
            clock_hz,
            prescaler,
            period_ms,
        }
    }

    /// Prescaled counter ticks in one period, rounded to the nearest tick.
    #[must_use]
    pub const fn ticks(self) -> u32 {
        let div = self.prescaler.divisor() as u64 * 1000;
        let ticks = (self.period_ms as u64 * self.clock_hz as u64 + div / 2) / div;
        assert!(
            ticks > 0 && ticks <= COUNTER_RANGE as u64,
            "period does not fit into Timer/Counter1"
        );
        ticks as u32
    }

    /// Counter value that overflows after exactly [`Timing::ticks`] ticks.
    ///
    /// Panics during const evaluation when the period does not fit the counter.
    #[must_use]
    pub const fn reload(self) -> u16 {
        (COUNTER_RANGE - self.ticks()) as u16
    }

    /// CPU cycles between two overflows.
    #[must_use]
    pub const fn cycles(self) -> u32 {
        self.ticks() * self.prescaler.divisor()
    }
}

#[cfg(test)]
mod tests {
    use super::{Prescaler, Timing};

    #[test]
    fn one_second_at_16mhz() {
        let timing = Timing::new(16_000_000, Prescaler::Div1024, 1000);
        assert_eq!(timing.ticks(), 15625);
        assert_eq!(timing.reload(), 49911);
        assert_eq!(timing.cycles(), 16_000_000);
    }

    #[test]
    fn reload_formula() {
        let cases = [
            (8_000_000, Prescaler::Div256, 1000, 34286),
            (16_000_000, Prescaler::Div64, 1, 65286),
            (16_000_000, Prescaler::Div8, 10, 45536),
            (1_000_000, Prescaler::Direct, 50, 15536),
            (16_000_000, Prescaler::Div1024, 4000, 3036),
        ];
        for (clock_hz, prescaler, period_ms, reload) in cases {
            assert_eq!(Timing::new(clock_hz, prescaler, period_ms).reload(), reload);
        }
    }

    #[test]
    fn ticks_round_to_nearest() {
        // 100 ms at 16 MHz / 1024 is 1562.5 ticks.
        let timing = Timing::new(16_000_000, Prescaler::Div1024, 100);
        assert_eq!(timing.ticks(), 1563);
        assert_eq!(timing.reload(), 63973);

        // 1 s at 8 MHz / 1024 is 7812.5 ticks.
        assert_eq!(Timing::new(8_000_000, Prescaler::Div1024, 1000).ticks(), 7813);
        // 0.5 s at 8 MHz / 64 uses most of the counter range.
        assert_eq!(Timing::new(8_000_000, Prescaler::Div64, 500).ticks(), 62500);
    }

    #[test]
    fn full_range_period() {
        // 65536 ticks is the native overflow period, reload 0.
        let timing = Timing::new(1_024_000, Prescaler::Div1024, 65536);
        assert_eq!(timing.ticks(), 65536);
        assert_eq!(timing.reload(), 0);
    }

    #[test]
    #[should_panic(expected = "period does not fit")]
    fn period_too_long() {
        let _ = Timing::new(16_000_000, Prescaler::Div1024, 5000).reload();
    }

    #[test]
    #[should_panic(expected = "period does not fit")]
    fn period_too_short() {
        let _ = Timing::new(16_000_000, Prescaler::Div1024, 0).reload();
    }

    #[test]
    fn clock_select_bits() {
        let all = [
            Prescaler::Direct,
            Prescaler::Div8,
            Prescaler::Div64,
            Prescaler::Div256,
            Prescaler::Div1024,
        ];
        for prescaler in all {
            assert_eq!(Prescaler::from_cs_bits(prescaler.cs_bits()), Some(prescaler));
        }
        assert_eq!(Prescaler::Div1024.cs_bits(), 0b101);
        assert_eq!(Prescaler::from_cs_bits(0b000), None);
        assert_eq!(Prescaler::from_cs_bits(0b110), None);
        assert_eq!(Prescaler::from_cs_bits(0b111), None);
    }
}
