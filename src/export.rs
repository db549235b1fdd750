use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use egui::{Color32, ColorImage, Context, Pos2, Rect};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::error::ExportError;

/// Encode canvas pixels as PNG.
pub fn encode_png(pixels: &ColorImage) -> Result<Vec<u8>, ExportError> {
    let [width, height] = pixels.size;
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyRegion { width, height });
    }

    let rgba = RgbaImage::from_fn(width as u32, height as u32, |x, y| {
        Rgba(pixels[(x as usize, y as usize)].to_srgba_unmultiplied())
    });

    let mut png_data = Vec::new();
    DynamicImage::ImageRgba8(rgba).write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)?;
    Ok(png_data)
}

/// Encode `pixels` and write them to `path`.
pub fn save_png(pixels: &ColorImage, path: &Path) -> Result<(), ExportError> {
    let png_data = encode_png(pixels)?;
    std::fs::write(path, &png_data).map_err(|source| ExportError::Write {
        path: path.to_owned(),
        source,
    })?;
    log::info!(
        "Exported {}x{} canvas to {} ({} bytes)",
        pixels.size[0],
        pixels.size[1],
        path.display(),
        png_data.len()
    );
    Ok(())
}

/// What an export of a canvas with nothing on it looks like.
pub fn blank_canvas(width: usize, height: usize, background: Color32) -> ColorImage {
    ColorImage::new([width, height], background)
}

/// Cut the canvas out of a full-window screenshot.
///
/// Only the part of the canvas inside the window is kept; a canvas that is
/// entirely off-screen is an error.
pub fn crop_to_canvas(
    screenshot: &ColorImage,
    canvas_rect: Rect,
    pixels_per_point: f32,
) -> Result<ColorImage, ExportError> {
    let [width, height] = screenshot.size;
    let screen = Rect::from_min_size(Pos2::ZERO, egui::vec2(width as f32, height as f32) / pixels_per_point);
    let visible = canvas_rect.intersect(screen);

    if !visible.is_positive() {
        return Err(ExportError::EmptyRegion { width: 0, height: 0 });
    }
    if visible != canvas_rect {
        log::warn!("Canvas {:?} does not fit the window, exporting the visible part {:?}", canvas_rect, visible);
    }

    let cropped = screenshot.region(&visible, Some(pixels_per_point));
    let [w, h] = cropped.size;
    if w == 0 || h == 0 {
        return Err(ExportError::EmptyRegion { width: w, height: h });
    }
    Ok(cropped)
}

/// Drives a screenshot-based export across frames.
///
/// egui delivers the screenshot of a frame as an input event of a later
/// frame, so a request stays pending until that event shows up.
#[derive(Debug)]
pub struct Exporter {
    path: PathBuf,
    pending: bool,
}

impl Exporter {
    pub fn new(path: PathBuf) -> Self {
        Self { path, pending: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// While pending, the canvas should be drawn without editor-only
    /// decorations such as the selection highlight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Ask the backend for a screenshot of the frame being built.
    pub fn request(&mut self, ctx: &Context) {
        if self.pending {
            return;
        }
        log::debug!("Requesting screenshot for export");
        self.pending = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
    }

    /// Finish a pending export once its screenshot has arrived.
    ///
    /// Returns `None` while nothing is pending or the screenshot is not here yet.
    pub fn poll(&mut self, ctx: &Context, canvas_rect: Rect) -> Option<Result<PathBuf, ExportError>> {
        if !self.pending {
            return None;
        }

        let screenshot: Option<Arc<ColorImage>> = ctx.input(|input| {
            input.events.iter().rev().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let screenshot = screenshot?;
        self.pending = false;

        let result = crop_to_canvas(&screenshot, canvas_rect, ctx.pixels_per_point())
            .and_then(|canvas| save_png(&canvas, &self.path))
            .map(|()| self.path.clone());
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_canvas_encodes_to_png() {
        let blank = blank_canvas(600, 400, Color32::WHITE);
        let png_data = encode_png(&blank).unwrap();

        let decoded = image::load_from_memory_with_format(&png_data, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (600, 400));
        assert_eq!(decoded.to_rgba8().get_pixel(10, 10).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_sized_region_is_an_error() {
        let empty = ColorImage::new([0, 10], Color32::WHITE);
        assert!(matches!(encode_png(&empty), Err(ExportError::EmptyRegion { .. })));
    }

    #[test]
    fn test_crop_respects_pixels_per_point() {
        let screenshot = blank_canvas(200, 200, Color32::RED);
        let canvas = Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(50.0, 40.0));

        let cropped = crop_to_canvas(&screenshot, canvas, 2.0).unwrap();
        assert_eq!(cropped.size, [100, 80]);
    }

    #[test]
    fn test_canvas_larger_than_window_is_clipped() {
        // A 600x400 canvas in a window shrunk to 400x300
        let screenshot = blank_canvas(400, 300, Color32::WHITE);
        let canvas = Rect::from_min_size(egui::pos2(248.0, 8.0), egui::vec2(600.0, 400.0));

        let cropped = crop_to_canvas(&screenshot, canvas, 1.0).unwrap();
        assert_eq!(cropped.size, [152, 292]);
        assert!(encode_png(&cropped).is_ok());
    }

    #[test]
    fn test_canvas_outside_window_is_an_error() {
        let screenshot = blank_canvas(400, 300, Color32::WHITE);
        let canvas = Rect::from_min_size(egui::pos2(500.0, 10.0), egui::vec2(600.0, 400.0));

        assert!(matches!(
            crop_to_canvas(&screenshot, canvas, 1.0),
            Err(ExportError::EmptyRegion { .. })
        ));
    }

    #[test]
    fn test_request_marks_export_pending() {
        let ctx = Context::default();
        let mut exporter = Exporter::new(PathBuf::from("unused.png"));

        exporter.request(&ctx);
        assert!(exporter.is_pending());

        // No screenshot has arrived yet, so the export stays pending
        assert!(exporter.poll(&ctx, Rect::NOTHING).is_none());
        assert!(exporter.is_pending());
    }

    #[test]
    fn test_exporter_idle_until_requested() {
        let ctx = Context::default();
        let mut exporter = Exporter::new(PathBuf::from("unused.png"));
        assert!(!exporter.is_pending());
        assert!(exporter.poll(&ctx, Rect::NOTHING).is_none());
    }
}
