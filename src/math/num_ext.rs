//! Extensions for numbers that are not present in the stable standard library.

pub(crate) trait NumExt {
    /// Division with rounding up.
    fn div_ceil(self, other: Self) -> Self;

    /// Division with rounding down.
    ///
    /// Note this is different from truncating, which is rounding toward zero.
    fn div_floor(self, other: Self) -> Self;
}

impl NumExt for i32 {
    fn div_ceil(self, other: Self) -> Self {
        let d = self / other;
        let r = self % other;
        if (r > 0 && other > 0) || (r < 0 && other < 0) {
            d + 1
        } else {
            d
        }
    }

    fn div_floor(self, other: Self) -> Self {
        let d = self / other;
        let r = self % other;
        if (r > 0 && other < 0) || (r < 0 && other > 0) {
            d - 1
        } else {
            d
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_ceil_rounds_away_from_negative_infinity() {
        assert_eq!(<i32 as NumExt>::div_ceil(7, 2), 4);
        assert_eq!(<i32 as NumExt>::div_ceil(-7, 2), -3);
        assert_eq!(<i32 as NumExt>::div_ceil(7, -2), -3);
        assert_eq!(<i32 as NumExt>::div_ceil(6, 2), 3);
    }

    #[test]
    fn div_floor_rounds_toward_negative_infinity() {
        assert_eq!(<i32 as NumExt>::div_floor(7, 2), 3);
        assert_eq!(<i32 as NumExt>::div_floor(-7, 2), -4);
        assert_eq!(<i32 as NumExt>::div_floor(7, -2), -4);
        assert_eq!(<i32 as NumExt>::div_floor(-6, 2), -3);
    }
}
