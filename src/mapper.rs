/// Linearly maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Integer arithmetic, division truncates toward zero. Values outside the input
/// range extrapolate; clamping is up to the caller.
///
/// Panics if `in_min == in_max`.
pub fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGES: [(i32, i32, i32, i32); 5] = [
        (0, 4095, 0, 119),
        (0, 4095, 55, 0),
        (0, 1848, 4095, 0),
        (2248, 4095, 0, 4095),
        (-10, 10, -300, 300),
    ];

    #[test]
    fn endpoints_are_exact() {
        for (a, b, c, d) in RANGES {
            assert_eq!(map_range(a, a, b, c, d), c, "{a}..{b} -> {c}..{d}");
            assert_eq!(map_range(b, a, b, c, d), d, "{a}..{b} -> {c}..{d}");
        }
    }

    #[test]
    fn follows_output_direction() {
        for (a, b, c, d) in RANGES {
            let values: Vec<i32> = (a..=b).map(|v| map_range(v, a, b, c, d)).collect();
            for pair in values.windows(2) {
                if c < d {
                    assert!(pair[0] <= pair[1], "{a}..{b} -> {c}..{d}: {pair:?}");
                } else {
                    assert!(pair[0] >= pair[1], "{a}..{b} -> {c}..{d}: {pair:?}");
                }
            }
        }
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(map_range(2048, 0, 4095, 0, 119), 59);
        // (1847 * -4095) / 1848 = -4092.78.. -> -4092
        assert_eq!(map_range(1847, 0, 1848, 4095, 0), 3);
        assert_eq!(map_range(4094, 0, 4095, 55, 0), 1);
    }

    #[test]
    fn extrapolates_outside_input_range() {
        assert_eq!(map_range(20, 0, 10, 0, 100), 200);
        assert_eq!(map_range(-5, 0, 10, 0, 100), -50);
    }

    #[test]
    #[should_panic]
    fn equal_input_bounds_panic() {
        map_range(3, 5, 5, 0, 10);
    }
}
