use embedded_graphics::prelude::Point;

use crate::config::{ADC_MAX, CURSOR_X_CLAMP, CURSOR_X_RANGE, CURSOR_Y_CLAMP, CURSOR_Y_RANGE};
use crate::mapper::map_range;

/// Top-left corner of the cursor glyph for the given axis readings.
pub fn position(horizontal: u16, vertical: u16) -> Point {
    let max = i32::from(ADC_MAX);
    let x = map_range(i32::from(horizontal), 0, max, CURSOR_X_RANGE.0, CURSOR_X_RANGE.1);
    let y = map_range(i32::from(vertical), 0, max, CURSOR_Y_RANGE.0, CURSOR_Y_RANGE.1);

    Point::new(clamp(x, &CURSOR_X_CLAMP), clamp(y, &CURSOR_Y_CLAMP))
}

// Only the listed coordinates move. y == 0 is not in the table and stays put.
fn clamp(coordinate: i32, table: &[(i32, i32)]) -> i32 {
    table
        .iter()
        .find(|(from, _)| *from == coordinate)
        .map_or(coordinate, |(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_edges_are_pulled_in() {
        assert_eq!(clamp(118, &CURSOR_X_CLAMP), 116);
        assert_eq!(clamp(0, &CURSOR_X_CLAMP), 4);
    }

    #[test]
    fn y_edges_are_pulled_in() {
        assert_eq!(clamp(55, &CURSOR_Y_CLAMP), 52);
        assert_eq!(clamp(1, &CURSOR_Y_CLAMP), 4);
    }

    #[test]
    fn y_zero_is_left_alone() {
        assert_eq!(clamp(0, &CURSOR_Y_CLAMP), 0);
        assert_eq!(position(2048, 4095).y, 0);
    }

    #[test]
    fn other_values_pass_through() {
        for x in (1..118).chain([119]) {
            assert_eq!(clamp(x, &CURSOR_X_CLAMP), x);
        }
        for y in (2..55).chain([0]) {
            assert_eq!(clamp(y, &CURSOR_Y_CLAMP), y);
        }
    }

    #[test]
    fn vertical_axis_is_inverted() {
        assert_eq!(position(2048, 0), Point::new(59, 52));
        assert_eq!(position(2048, 4094).y, 4);
        assert!(position(2048, 1000).y > position(2048, 3000).y);
    }

    #[test]
    fn full_right_reaches_last_column() {
        assert_eq!(position(4095, 2048).x, 119);
        assert_eq!(position(0, 2048).x, 4);
    }
}
