//! Frequency-weighted word-cloud rendering.
//!
//! A deliberately simple renderer: words are scaled by relative frequency
//! and packed into rows on a white canvas. Layout math is pure and unit
//! tested; rasterization needs a TTF font supplied at construction time.

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::debug;

use crate::error::{HarvestError, Result};

const MARGIN: i32 = 10;
const PADDING: i32 = 6;

/// Fixed palette cycled through in frequency order.
const PALETTE: [Rgba<u8>; 6] = [
    Rgba([31, 119, 180, 255]),
    Rgba([214, 39, 40, 255]),
    Rgba([44, 160, 44, 255]),
    Rgba([148, 103, 189, 255]),
    Rgba([255, 127, 14, 255]),
    Rgba([23, 190, 207, 255]),
];

/// Scale frequencies to pixel sizes in `[min_px, max_px]`, proportional to
/// the maximum frequency, dropping zero-frequency words. Output is sorted
/// by descending frequency so the biggest words are placed first.
pub fn scale_frequencies(
    frequencies: &[(String, usize)],
    min_px: f32,
    max_px: f32,
) -> Vec<(String, f32)> {
    let max_freq = frequencies.iter().map(|(_, f)| *f).max().unwrap_or(0);
    if max_freq == 0 {
        return Vec::new();
    }

    let mut weighted: Vec<(String, usize)> = frequencies
        .iter()
        .filter(|(_, f)| *f > 0)
        .cloned()
        .collect();
    weighted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    weighted
        .into_iter()
        .map(|(word, freq)| {
            let ratio = freq as f32 / max_freq as f32;
            (word, min_px + (max_px - min_px) * ratio)
        })
        .collect()
}

/// Renders frequency tables to PNG word clouds.
pub struct WordCloudRenderer {
    font: FontVec,
    width: u32,
    height: u32,
    min_px: f32,
    max_px: f32,
}

impl WordCloudRenderer {
    /// Load the renderer's font from a TTF/OTF file.
    pub fn from_font_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| HarvestError::Render(format!("invalid font: {e}")))?;
        Ok(Self {
            font,
            width: 800,
            height: 400,
            min_px: 14.0,
            max_px: 64.0,
        })
    }

    /// Set the canvas dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Render a frequency table onto a white canvas.
    ///
    /// Words are placed biggest-first, left to right, wrapping to new rows;
    /// words that no longer fit are dropped.
    pub fn render(&self, frequencies: &[(String, usize)]) -> Result<RgbaImage> {
        let sized = scale_frequencies(frequencies, self.min_px, self.max_px);
        if sized.is_empty() {
            return Err(HarvestError::Render(
                "no words with a nonzero frequency".to_string(),
            ));
        }

        let mut canvas = RgbaImage::from_pixel(self.width, self.height, Rgba([255, 255, 255, 255]));

        let mut x = MARGIN;
        let mut y = MARGIN;
        let mut row_height = 0i32;
        let mut drawn = 0usize;

        for (i, (word, px)) in sized.iter().enumerate() {
            let scale = PxScale::from(*px);
            let (w, h) = text_size(scale, &self.font, word);
            let (w, h) = (w as i32, h as i32);

            if x + w > self.width as i32 - MARGIN {
                x = MARGIN;
                y += row_height + PADDING;
                row_height = 0;
            }
            if y + h > self.height as i32 - MARGIN {
                break;
            }

            let color = PALETTE[i % PALETTE.len()];
            draw_text_mut(&mut canvas, color, x, y, scale, &self.font, word);

            x += w + PADDING;
            row_height = row_height.max(h);
            drawn += 1;
        }

        debug!(words = drawn, total = sized.len(), "word cloud rendered");
        Ok(canvas)
    }

    /// Render and save a PNG.
    pub fn save_png(&self, frequencies: &[(String, usize)], path: impl AsRef<Path>) -> Result<()> {
        let canvas = self.render(frequencies)?;
        canvas
            .save(path.as_ref())
            .map_err(|e| HarvestError::Render(e.to_string()))
    }
}
