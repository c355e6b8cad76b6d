//! Tray icon asset.
//!
//! The icon is drawn at runtime and stored as a single-image ICO whose
//! payload is PNG, so no binary asset ships with the program.

use crate::core::{ClickerError, ClickerResult};
use image::{Rgba, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

pub const ICON_SIZE: u32 = 64;

const CIRCLE_FILL: Rgba<u8> = Rgba([33, 150, 243, 255]);
const CIRCLE_OUTLINE: Rgba<u8> = Rgba([13, 71, 161, 255]);
const CURSOR_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CURSOR_OUTLINE: Rgba<u8> = Rgba([128, 128, 128, 255]);
const DOT_FILL: Rgba<u8> = Rgba([255, 193, 7, 255]);

const CURSOR: [(f32, f32); 7] = [
    (20.0, 12.0),
    (20.0, 46.0),
    (28.0, 38.0),
    (34.0, 51.0),
    (40.0, 48.0),
    (34.0, 36.0),
    (45.0, 36.0),
];

const DOTS: [(f32, f32); 3] = [(44.0, 15.0), (50.0, 22.0), (53.0, 30.0)];
const DOT_RADIUS: f32 = 3.0;

/// Renders the 64x64 application icon.
pub fn render() -> RgbaImage {
    let center = ICON_SIZE as f32 / 2.0;
    let radius = center - 2.0;

    RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;

        if DOTS
            .iter()
            .any(|&(dx, dy)| distance(px, py, dx, dy) <= DOT_RADIUS)
        {
            return DOT_FILL;
        }

        if distance_to_outline(px, py, &CURSOR) <= 1.0 {
            return CURSOR_OUTLINE;
        }

        if inside_polygon(px, py, &CURSOR) {
            return CURSOR_FILL;
        }

        let from_center = distance(px, py, center, center);
        if from_center <= radius - 2.0 {
            CIRCLE_FILL
        } else if from_center <= radius {
            CIRCLE_OUTLINE
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Writes `image` as a one-entry ICO with a PNG payload.
pub fn write_ico<W: Write>(image: &RgbaImage, writer: W) -> ClickerResult<()> {
    let (width, height) = image.dimensions();
    let icon_image = ico::IconImage::from_rgba_data(width, height, image.as_raw().clone());

    let entry = ico::IconDirEntry::encode_as_png(&icon_image)
        .map_err(|e| ClickerError::Icon(format!("Failed to encode icon: {}", e)))?;

    let mut dir = ico::IconDir::new(ico::ResourceType::Icon);
    dir.add_entry(entry);
    dir.write(writer)
        .map_err(|e| ClickerError::Icon(format!("Failed to write icon: {}", e)))
}

/// Creates the icon file at `path` unless one already exists.
pub fn ensure_icon(path: &Path) -> ClickerResult<()> {
    if path.exists() {
        debug!(path = %path.display(), "icon present");
        return Ok(());
    }

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_ico(&render(), &mut writer)?;
    writer.flush()?;

    info!(path = %path.display(), "icon generated");
    Ok(())
}

fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

fn inside_polygon(px: f32, py: f32, polygon: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];

        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

fn distance_to_outline(px: f32, py: f32, polygon: &[(f32, f32)]) -> f32 {
    let mut best = f32::MAX;

    for (i, &(ax, ay)) in polygon.iter().enumerate() {
        let (bx, by) = polygon[(i + 1) % polygon.len()];
        let (ex, ey) = (bx - ax, by - ay);
        let length_sq = ex * ex + ey * ey;

        let t = if length_sq == 0.0 {
            0.0
        } else {
            (((px - ax) * ex + (py - ay) * ey) / length_sq).clamp(0.0, 1.0)
        };

        best = best.min(distance(px, py, ax + t * ex, ay + t * ey));
    }

    best
}
