use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb888, primitives::Rectangle};

/// Immediate-mode filled rectangle primitive.
///
/// Coordinates are pixels with the origin at the top-left corner.
pub trait RectDrawSink {
    type Error;

    fn fill_rect(&mut self, area: Rectangle, color: Rgb888, alpha: u8) -> Result<(), Self::Error>;
}

/// Draws into any `embedded-graphics` target, e.g. an LED matrix
/// framebuffer or a simulator display.
///
/// The target has no blending, so any non-zero alpha paints opaquely and
/// fully transparent rectangles are dropped.
pub struct DrawTargetSink<'a, D> {
    target: &'a mut D,
}

impl<'a, D> DrawTargetSink<'a, D>
where
    D: DrawTarget<Color = Rgb888>,
{
    pub fn new(target: &'a mut D) -> Self {
        Self { target }
    }
}

impl<D> RectDrawSink for DrawTargetSink<'_, D>
where
    D: DrawTarget<Color = Rgb888>,
{
    type Error = D::Error;

    fn fill_rect(&mut self, area: Rectangle, color: Rgb888, alpha: u8) -> Result<(), D::Error> {
        if alpha == 0 || area.is_zero_sized() {
            return Ok(());
        }
        self.target.fill_solid(&area, color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilledRect {
    pub area: Rectangle,
    pub color: Rgb888,
    pub alpha: u8,
}

/// Keeps every rectangle it is asked to fill, in call order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    rects: Vec<FilledRect>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> &[FilledRect] {
        &self.rects
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }
}

impl RectDrawSink for RecordingSink {
    type Error = Infallible;

    fn fill_rect(&mut self, area: Rectangle, color: Rgb888, alpha: u8) -> Result<(), Infallible> {
        self.rects.push(FilledRect { area, color, alpha });
        Ok(())
    }
}
