//! Prediction histogram rendering.
//!
//! Rasterizes the distribution of predicted classes into a small PNG and
//! base64-encodes it for embedding in a JSON response.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::error::{Result, TrainError};

const WIDTH: u32 = 480;
const HEIGHT: u32 = 320;
const MARGIN_LEFT: u32 = 48;
const MARGIN_RIGHT: u32 = 16;
const MARGIN_TOP: u32 = 16;
const MARGIN_BOTTOM: u32 = 32;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([64, 64, 64]);
const BAR: Rgb<u8> = Rgb([70, 130, 180]);

/// Render a histogram of predicted class counts as PNG bytes
pub fn prediction_histogram(predictions: &[i32], classes: &[String]) -> Result<Vec<u8>> {
    if predictions.is_empty() || classes.is_empty() {
        return Err(TrainError::Render("nothing to plot".to_string()));
    }

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    if classes.len() as u32 > plot_w {
        return Err(TrainError::Render(format!(
            "too many classes to plot: {}",
            classes.len()
        )));
    }

    let mut counts = vec![0usize; classes.len()];
    for &p in predictions {
        if p >= 0 {
            if let Some(count) = counts.get_mut(p as usize) {
                *count += 1;
            }
        }
    }
    let max_count = counts.iter().copied().max().unwrap_or(0).max(1);

    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    // y axis, then x axis along the baseline
    for y in MARGIN_TOP..=(HEIGHT - MARGIN_BOTTOM) {
        img.put_pixel(MARGIN_LEFT, y, AXIS);
    }
    for x in MARGIN_LEFT..=(WIDTH - MARGIN_RIGHT) {
        img.put_pixel(x, HEIGHT - MARGIN_BOTTOM, AXIS);
    }

    let slot = plot_w / counts.len() as u32;
    let bar_w = (slot * 3 / 4).max(1);
    for (i, &count) in counts.iter().enumerate() {
        let bar_h = ((count as f64 / max_count as f64) * plot_h as f64).round() as u32;
        if bar_h == 0 {
            continue;
        }
        let x0 = MARGIN_LEFT + 1 + i as u32 * slot + (slot.saturating_sub(bar_w)) / 2;
        let y0 = HEIGHT - MARGIN_BOTTOM - bar_h;
        fill_rect(&mut img, x0, y0, bar_w, bar_h, BAR);
    }

    encode_png(img)
}

/// [`prediction_histogram`] followed by base64 encoding
pub fn prediction_histogram_base64(predictions: &[i32], classes: &[String]) -> Result<String> {
    Ok(STANDARD.encode(prediction_histogram(predictions, classes)?))
}

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x1 = (x0 + w).min(WIDTH);
    let y1 = (y0 + h).min(HEIGHT - MARGIN_BOTTOM);
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, color);
        }
    }
}

fn encode_png(img: RgbImage) -> Result<Vec<u8>> {
    let mut bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| TrainError::Render(e.to_string()))?;
    Ok(bytes)
}
