//! IEEE 754 binary16 storage type.
//!
//! Values are stored as raw bits and widened to `f32` for every arithmetic
//! or formatting purpose.

use core::fmt;

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Half(u16);

impl Half {
    pub const ZERO: Half = Half(0);

    pub const fn from_bits(bits: u16) -> Self {
        Half(bits)
    }

    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Rounds to the nearest representable half, ties to even. Values out of
    /// range become infinities; NaN stays NaN.
    pub fn from_f32(value: f32) -> Self {
        let x = value.to_bits();
        let sign = ((x >> 16) & 0x8000) as u16;
        let exp = ((x >> 23) & 0xff) as i32;
        let man = x & 0x007f_ffff;

        if exp == 0xff {
            let nan_bit = if man != 0 { 0x0200 } else { 0 };
            return Half(sign | 0x7c00 | nan_bit | (man >> 13) as u16);
        }

        let half_exp = exp - 127 + 15;
        if half_exp >= 0x1f {
            return Half(sign | 0x7c00);
        }

        if half_exp <= 0 {
            // Subnormal result, or zero if even the leading bit shifts out.
            if 14 - half_exp > 24 {
                return Half(sign);
            }
            let man = man | 0x0080_0000;
            let shift = (14 - half_exp) as u32;
            let mut half_man = man >> shift;
            let round_bit = 1u32 << (shift - 1);
            if (man & round_bit) != 0 && (man & (3 * round_bit - 1)) != 0 {
                half_man += 1;
            }
            return Half(sign | half_man as u16);
        }

        let bits = u32::from(sign) | ((half_exp as u32) << 10) | (man >> 13);
        let round_bit = 0x0000_1000;
        if (man & round_bit) != 0 && (man & (3 * round_bit - 1)) != 0 {
            // A carry out of the mantissa correctly bumps the exponent.
            Half((bits + 1) as u16)
        } else {
            Half(bits as u16)
        }
    }

    /// Exact widening conversion.
    pub fn to_f32(self) -> f32 {
        let h = u32::from(self.0);
        let sign = (h & 0x8000) << 16;
        let exp = (h >> 10) & 0x1f;
        let man = h & 0x03ff;

        match exp {
            0 if man == 0 => f32::from_bits(sign),
            0 => {
                let magnitude = man as f32 * (1.0 / 16_777_216.0);
                f32::from_bits(magnitude.to_bits() | sign)
            }
            0x1f => f32::from_bits(sign | 0x7f80_0000 | (man << 13)),
            _ => f32::from_bits(sign | ((exp + 112) << 23) | (man << 13)),
        }
    }
}

impl From<f32> for Half {
    fn from(value: f32) -> Self {
        Half::from_f32(value)
    }
}

impl From<Half> for f32 {
    fn from(value: Half) -> Self {
        value.to_f32()
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}

impl fmt::Debug for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Half({})", self.to_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_values() {
        for v in [0.0f32, 1.0, -2.0, 0.5, 3.5, 65504.0, -0.25] {
            assert_eq!(Half::from_f32(v).to_f32(), v);
        }
        assert_eq!(Half::from_f32(1.0).to_bits(), 0x3c00);
        assert_eq!(Half::from_f32(-2.0).to_bits(), 0xc000);
    }

    #[test]
    fn test_overflow_and_specials() {
        assert_eq!(Half::from_f32(1.0e6).to_f32(), f32::INFINITY);
        assert_eq!(Half::from_f32(f32::NEG_INFINITY).to_f32(), f32::NEG_INFINITY);
        assert!(Half::from_f32(f32::NAN).to_f32().is_nan());
    }

    #[test]
    fn test_subnormals() {
        let two_pow_minus_24 = f32::from_bits(0x3380_0000);
        assert_eq!(Half::from_bits(0x0001).to_f32(), two_pow_minus_24);
        assert_eq!(Half::from_f32(two_pow_minus_24).to_bits(), 0x0001);
        assert_eq!(Half::from_f32(1.0e-10).to_bits(), 0x0000);
    }

    #[test]
    fn test_rounding_to_nearest() {
        // 1 + 2^-11 is exactly between 1.0 and the next half; ties to even.
        assert_eq!(Half::from_f32(1.0 + 1.0 / 2048.0).to_bits(), 0x3c00);
        // Slightly above the midpoint rounds up.
        assert_eq!(Half::from_f32(1.0 + 1.0 / 2048.0 + 1.0 / 65536.0).to_bits(), 0x3c01);
    }
}
