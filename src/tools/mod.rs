use crate::error::LocateError;
use crate::models::{BitMatrix, FinderPattern, Point};
use image::{GenericImageView, GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn max_dim_from_env() -> Option<u32> {
    match env::var("DM_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image as 8-bit grayscale, downscaling to `DM_MAX_DIM` if set.
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<GrayImage, LocateError> {
    let img = image::open(path)?;
    let gray = match max_dim_from_env() {
        Some(max_dim) if img.dimensions().0.max(img.dimensions().1) > max_dim => img
            .resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
            .to_luma8(),
        _ => img.to_luma8(),
    };
    Ok(gray)
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Summary statistics for a binary matrix.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of foreground pixels.
    pub foreground_pixels: usize,
    /// Total pixels in the matrix.
    pub total_pixels: usize,
    /// Ratio of foreground pixels to total pixels.
    pub foreground_ratio: f64,
}

/// Compute min/max/avg for grayscale values.
pub fn grayscale_stats(gray: &[u8]) -> GrayStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = if gray.is_empty() {
        0
    } else {
        (sum / gray.len() as u64) as u8
    };
    GrayStats { min, max, avg }
}

/// Compute foreground stats for a binary matrix.
pub fn binary_stats(binary: &BitMatrix) -> BinaryStats {
    let foreground = binary.count_ones();
    let total = binary.width() * binary.height();
    let ratio = if total == 0 {
        0.0
    } else {
        foreground as f64 / total as f64
    };
    BinaryStats {
        foreground_pixels: foreground,
        total_pixels: total,
        foreground_ratio: ratio,
    }
}

/// Draw finder patterns over a grayscale image.
///
/// The base edge is drawn red, the side edge green, the completing edges
/// blue, and the corner gets a yellow dot.
pub fn render_overlay(gray: &GrayImage, patterns: &[FinderPattern]) -> RgbImage {
    let mut canvas = RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0];
        Rgb([v, v, v])
    });

    for fp in patterns {
        let [corner, base_end, opposite, side_end] = fp.polygon();
        let seg = |a: Point, b: Point| ((a.x, a.y), (b.x, b.y));

        let (s, e) = seg(corner, base_end);
        draw_line_segment_mut(&mut canvas, s, e, Rgb([255, 0, 0]));
        let (s, e) = seg(corner, side_end);
        draw_line_segment_mut(&mut canvas, s, e, Rgb([0, 255, 0]));
        for (a, b) in [(base_end, opposite), (opposite, side_end)] {
            let (s, e) = seg(a, b);
            draw_line_segment_mut(&mut canvas, s, e, Rgb([0, 0, 255]));
        }
        draw_filled_circle_mut(
            &mut canvas,
            (corner.x.round() as i32, corner.y.round() as i32),
            3,
            Rgb([255, 255, 0]),
        );
    }

    canvas
}

/// Default dataset root from environment variables.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("DM_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("benches/images"))
}

/// Image limit from `DM_BENCH_LIMIT`; unset or `0` means no limit.
pub fn bench_limit_from_env() -> Option<usize> {
    match env::var("DM_BENCH_LIMIT") {
        Ok(value) => value
            .parse::<usize>()
            .ok()
            .and_then(|v| if v == 0 { None } else { Some(v) }),
        Err(_) => None,
    }
}

/// Iterate image paths below `root` in sorted order, up to `limit`.
pub fn dataset_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if ext == "png" || ext == "jpg" || ext == "jpeg" || ext == "gif" || ext == "bmp" {
                    images.push(path);
                }
            }
        }
    }

    images
}
