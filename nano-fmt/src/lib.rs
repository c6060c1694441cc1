#![cfg_attr(not(test), no_std)]

/// Writer trait for resource constrained systems.
pub trait NanoWrite {
    /// Write a byte to the writer.
    fn write_byte(&mut self, b: u8);

    /// Write a run of bytes to the writer.
    fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }
}

/// Display trait for resource constrained systems.
pub trait NanoDisplay {
    /// Write formatted representation of `self` to `f`.
    fn fmt<F: NanoWrite>(self, f: &mut F);
}

impl NanoDisplay for &str {
    fn fmt<F: NanoWrite>(self, f: &mut F) {
        f.write_bytes(self.as_bytes());
    }
}

/// Implement NanoDisplay for an unsigned type.
macro_rules! display_unsigned {
    ($ty:ident) => {
        impl $crate::NanoDisplay for $ty {
            fn fmt<F: $crate::NanoWrite>(mut self, f: &mut F) {
                const MAX_POW10: $ty = <$ty>::pow(10, $ty::MAX.ilog10() as u32);

                let mut div = MAX_POW10;
                let mut print = false;

                while div > 0 {
                    let dig = (self / div) as u8;
                    self %= div;
                    div /= 10;

                    if !print && dig > 0 {
                        print = true;
                    }

                    if print || (div == 0) {
                        f.write_byte(b'0' + dig);
                    }
                }
            }
        }
    };
}

display_unsigned!(u8);
display_unsigned!(u16);
display_unsigned!(u32);
display_unsigned!(u64);

#[cfg(test)]
mod tests {
    use crate::{NanoDisplay, NanoWrite};

    impl NanoWrite for Vec<u8> {
        fn write_byte(&mut self, b: u8) {
            self.push(b);
        }
    }

    fn render<T: NanoDisplay>(value: T) -> String {
        let mut out = Vec::new();
        value.fmt(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn unsigned() {
        assert_eq!(render(0u8), "0");
        assert_eq!(render(7u8), "7");
        assert_eq!(render(255u8), "255");
        assert_eq!(render(100u16), "100");
        assert_eq!(render(49911u16), "49911");
        assert_eq!(render(u16::MAX), "65535");
        assert_eq!(render(16_000_000u32), "16000000");
        assert_eq!(render(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn strings() {
        assert_eq!(render(""), "");
        assert_eq!(render("TCNT1="), "TCNT1=");
    }
}
