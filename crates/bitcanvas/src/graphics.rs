//! `embedded-graphics` drawing target for [`Canvas`].
//!
//! Rectangle fills and clears go through whole-byte masks instead of the
//! per-pixel default path.

use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::BinaryColor,
    primitives::Rectangle,
};

use crate::Canvas;

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            self.write_pixel(x, y, color.is_on());
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }

        // intersecting with the canvas box leaves a non-negative origin
        let x0 = area.top_left.x as usize;
        let x1 = x0 + area.size.width as usize;
        let y0 = area.top_left.y as usize;
        for y in y0..y0 + area.size.height as usize {
            self.fill_span(y, x0, x1, color.is_on());
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.bytes_mut().fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_core::geometry::Point;

    use super::*;

    #[test]
    fn pixels_off_the_canvas_are_dropped() {
        let mut canvas = Canvas::new(10, 2);

        let pixels = [
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(0, -3), BinaryColor::On),
            Pixel(Point::new(9, 1), BinaryColor::On),
            Pixel(Point::new(10, 1), BinaryColor::On),
        ];
        canvas.draw_iter(pixels).unwrap();

        assert_eq!(canvas.size(), Size::new(10, 2));
        assert!(canvas.test_pixel(9, 1));
        assert_eq!(canvas.bytes().iter().map(|b| b.count_ones()).sum::<u32>(), 1);
    }

    #[test]
    fn fill_solid_is_clipped_to_the_canvas() {
        let mut canvas = Canvas::new(12, 3);

        let area = Rectangle::new(Point::new(-2, 1), Size::new(7, 5));
        canvas.fill_solid(&area, BinaryColor::On).unwrap();

        assert_eq!(canvas.row(0).unwrap(), &[0, 0]);
        assert_eq!(canvas.row(1).unwrap(), &[0b1111_1000, 0]);
        assert_eq!(canvas.row(2).unwrap(), &[0b1111_1000, 0]);

        let hole = Rectangle::new(Point::new(1, 2), Size::new(2, 1));
        canvas.fill_solid(&hole, BinaryColor::Off).unwrap();
        assert_eq!(canvas.row(2).unwrap(), &[0b1001_1000, 0]);

        let outside = Rectangle::new(Point::new(20, 0), Size::new(4, 4));
        canvas.fill_solid(&outside, BinaryColor::On).unwrap();
        assert_eq!(canvas.row(0).unwrap(), &[0, 0]);
    }
}
