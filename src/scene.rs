use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::config::{BORDER_DOT_PITCH, CURSOR_SIZE, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::toggle::BorderStyle;

const LAST_X: i32 = DISPLAY_WIDTH as i32 - 1;
const LAST_Y: i32 = DISPLAY_HEIGHT as i32 - 1;

/// Clears `target` and draws the border and the cursor at `cursor`.
pub fn draw<D>(target: &mut D, border: BorderStyle, cursor: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    match border {
        BorderStyle::Solid => draw_solid_border(target)?,
        BorderStyle::Dotted => draw_dotted_border(target)?,
    }

    draw_cursor(target, cursor)
}

pub fn draw_solid_border<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(target)
}

pub fn draw_dotted_border<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let horizontal = (0..=LAST_X)
        .step_by(BORDER_DOT_PITCH)
        .flat_map(|x| [Point::new(x, 0), Point::new(x, LAST_Y)]);
    let vertical = (0..=LAST_Y)
        .step_by(BORDER_DOT_PITCH)
        .flat_map(|y| [Point::new(0, y), Point::new(LAST_X, y)]);
    // The pitch does not divide the last row and column, so the far corner
    // would otherwise stay dark.
    let corner = core::iter::once(Point::new(LAST_X, LAST_Y));

    target.draw_iter(
        horizontal
            .chain(vertical)
            .chain(corner)
            .map(|point| Pixel(point, BinaryColor::On)),
    )
}

pub fn draw_cursor<D>(target: &mut D, top_left: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(top_left, Size::new_equal(CURSOR_SIZE))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target)
}
