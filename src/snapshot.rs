//! Offscreen rendering of particle fields to PNG.

use crate::particles::{ParticleField, Surface};
use egui::{Color32, Pos2};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// A [`Surface`] backed by a tiny-skia pixmap.
///
/// Text particles are drawn as a small dot at their anchor since no font is loaded.
pub struct PixmapSurface {
    pixmap: Pixmap,
    background: Color32,
}

fn paint_for(color: Color32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

impl PixmapSurface {
    /// Creates a surface of `width` x `height` pixels; `None` if either is zero.
    pub fn new(width: u32, height: u32, background: Color32) -> Option<Self> {
        let pixmap = Pixmap::new(width, height)?;
        Some(Self { pixmap, background })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, String> {
        self.pixmap
            .encode_png()
            .map_err(|e| format!("Failed to encode PNG: {}", e))
    }
}

impl Surface for PixmapSurface {
    fn clear(&mut self) {
        let [r, g, b, a] = self.background.to_srgba_unmultiplied();
        self.pixmap.fill(Color::from_rgba8(r, g, b, a));
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            self.pixmap.fill_path(
                &path,
                &paint_for(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        if let Some(path) = builder.finish() {
            let stroke = Stroke {
                width,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint_for(color), &stroke, Transform::identity(), None);
        }
    }

    fn text(&mut self, anchor: Pos2, size: f32, _text: &str, color: Color32) {
        self.fill_circle(anchor, (size * 0.15).max(1.0), color);
    }
}

/// Renders the field's current frame and encodes it as PNG.
///
/// # Arguments
///
/// * `field` - The field to draw; its size decides the image size
/// * `background` - Fill color behind the particles
///
/// # Returns
///
/// The PNG bytes, or an error message if the field is empty-sized or encoding fails.
pub fn render_png(field: &ParticleField, background: Color32) -> Result<Vec<u8>, String> {
    let size = field.size();
    let width = size.x.round() as u32;
    let height = size.y.round() as u32;
    let mut surface = PixmapSurface::new(width, height, background)
        .ok_or_else(|| format!("Cannot render a {}x{} snapshot", width, height))?;
    field.render(&mut surface);
    surface.encode_png()
}
