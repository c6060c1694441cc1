use nano_fmt::{NanoDisplay, NanoWrite};

/// Duration in milliseconds, displayed as seconds with 3 decimal digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Millis(u32);

impl Millis {
    #[must_use]
    pub const fn new(ms: u32) -> Self {
        Self(ms)
    }

    /// Duration of `cycles` CPU cycles at `clock_hz`, truncated to whole milliseconds.
    #[must_use]
    pub const fn from_cycles(cycles: u64, clock_hz: u32) -> Self {
        Self((cycles * 1000 / clock_hz as u64) as u32)
    }
}

impl NanoDisplay for Millis {
    fn fmt<F: NanoWrite>(self, f: &mut F) {
        let fract = (self.0 % 1000) as u16;
        let integer = self.0 / 1000;

        integer.fmt(f);

        f.write_byte(b'.');

        if fract < 100 {
            f.write_byte(b'0');
        }
        if fract < 10 {
            f.write_byte(b'0');
        }
        fract.fmt(f);
    }
}

#[cfg(test)]
mod tests {
    use nano_fmt::{NanoDisplay, NanoWrite};

    use super::Millis;

    struct Buf(Vec<u8>);

    impl NanoWrite for Buf {
        fn write_byte(&mut self, b: u8) {
            self.0.push(b);
        }
    }

    fn render(m: Millis) -> String {
        let mut buf = Buf(Vec::new());
        m.fmt(&mut buf);
        String::from_utf8(buf.0).unwrap()
    }

    #[test]
    fn seconds() {
        assert_eq!(render(Millis::new(0)), "0.000");
        assert_eq!(render(Millis::new(7)), "0.007");
        assert_eq!(render(Millis::new(42)), "0.042");
        assert_eq!(render(Millis::new(1000)), "1.000");
        assert_eq!(render(Millis::new(12_345)), "12.345");
    }

    #[test]
    fn from_cycles() {
        assert_eq!(Millis::from_cycles(16_000_000, 16_000_000), Millis::new(1000));
        assert_eq!(Millis::from_cycles(15_999, 16_000_000), Millis::new(0));
        assert_eq!(Millis::from_cycles(80_000_000, 16_000_000), Millis::new(5000));
    }
}
