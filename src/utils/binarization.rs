//! Adaptive (local mean) thresholding of grayscale images

use crate::config::Polarity;
use crate::models::BitMatrix;

/// Summed-area table over the image padded by `radius` pixels on every side,
/// with border pixels replicated into the padding.
struct PaddedIntegral {
    stride: usize,
    sums: Vec<u64>,
}

impl PaddedIntegral {
    fn new(gray: &[u8], width: usize, height: usize, radius: usize) -> Self {
        let padded_w = width + 2 * radius;
        let padded_h = height + 2 * radius;
        let stride = padded_w + 1;
        let mut sums = vec![0u64; stride * (padded_h + 1)];

        for py in 0..padded_h {
            let sy = py.saturating_sub(radius).min(height - 1);
            let mut row_sum = 0u64;
            for px in 0..padded_w {
                let sx = px.saturating_sub(radius).min(width - 1);
                row_sum += gray[sy * width + sx] as u64;
                sums[(py + 1) * stride + px + 1] = sums[py * stride + px + 1] + row_sum;
            }
        }

        Self { stride, sums }
    }

    /// Sum over the padded-coordinate box `[x0, x1) x [y0, y1)`
    fn box_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> u64 {
        let s = self.stride;
        self.sums[y1 * s + x1] + self.sums[y0 * s + x0] - self.sums[y0 * s + x1] - self.sums[y1 * s + x0]
    }
}

/// Binarize with a threshold computed per pixel from its neighbourhood.
///
/// The threshold is the mean of the `block_size` x `block_size` window
/// centred on the pixel (borders replicated) minus `c`. With
/// [`Polarity::DarkForeground`] a pixel is foreground when it is at or below
/// the threshold; [`Polarity::LightForeground`] selects the complement.
///
/// `block_size` must be odd and greater than 1; callers validate this.
pub fn adaptive_mean_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    block_size: usize,
    c: f32,
    polarity: Polarity,
) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);
    if width == 0 || height == 0 {
        return binary;
    }

    let radius = block_size / 2;
    let integral = PaddedIntegral::new(gray, width, height, radius);
    let area = (block_size * block_size) as f32;

    for y in 0..height {
        for x in 0..width {
            // Pixel (x, y) sits at (x + radius, y + radius) in padded space,
            // so its window starts at (x, y) there.
            let sum = integral.box_sum(x, y, x + block_size, y + block_size);
            let threshold = sum as f32 / area - c;
            let dark = gray[y * width + x] as f32 <= threshold;
            let foreground = match polarity {
                Polarity::DarkForeground => dark,
                Polarity::LightForeground => !dark,
            };
            binary.set(x, y, foreground);
        }
    }

    binary
}
