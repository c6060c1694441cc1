use nano_fmt::{NanoDisplay, NanoWrite};

use crate::{
    blink::{RELOAD, TIMING},
    fixed::Millis,
};

/// Start-up line describing the armed blinker, e.g.
/// `PB4 1.000s TCNT1=49911 clk/1024`.
#[derive(Clone, Copy)]
pub struct Armed;

impl NanoDisplay for Armed {
    fn fmt<F: NanoWrite>(self, f: &mut F) {
        "PB4 ".fmt(f);
        Millis::new(TIMING.period_ms).fmt(f);
        "s TCNT1=".fmt(f);
        RELOAD.fmt(f);
        " clk/".fmt(f);
        TIMING.prescaler.divisor().fmt(f);
        "\r\n".fmt(f);
    }
}

#[cfg(test)]
mod tests {
    use nano_fmt::{NanoDisplay, NanoWrite};

    use super::Armed;

    struct Buf(Vec<u8>);

    impl NanoWrite for Buf {
        fn write_byte(&mut self, b: u8) {
            self.0.push(b);
        }
    }

    #[test]
    fn armed_line() {
        let mut out = Buf(Vec::new());
        Armed.fmt(&mut out);
        assert_eq!(out.0, b"PB4 1.000s TCNT1=49911 clk/1024\r\n");
    }
}
