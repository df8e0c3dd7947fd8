//! Binary morphology with a square structuring element.
//!
//! The element of side `size` is anchored at `size / 2`, so for a pixel at
//! `x` it covers `x - size / 2 ..= x + (size - 1 - size / 2)`. Pixels outside
//! the image never contribute: they neither grow a dilation nor shrink an
//! erosion.
//!
//! Odd sides `2k + 1` are the chessboard-distance operators of
//! `imageproc::morphology` with radius `k`. Even sides have no centred radius
//! and use separable row and column passes.

use crate::models::BitMatrix;
use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology;

#[derive(Clone, Copy)]
enum Op {
    Dilate,
    Erode,
}

/// One separable pass along rows (`horizontal`) or columns
fn pass(src: &BitMatrix, size: usize, op: Op, horizontal: bool) -> BitMatrix {
    let (w, h) = (src.width(), src.height());
    let before = size / 2;
    let after = size - 1 - before;
    let len = if horizontal { w } else { h };

    BitMatrix::from_fn(w, h, |x, y| {
        let pos = if horizontal { x } else { y };
        let lo = pos.saturating_sub(before);
        let hi = (pos + after).min(len - 1);
        let mut window = (lo..=hi).map(|p| if horizontal { src.get(p, y) } else { src.get(x, p) });
        match op {
            Op::Dilate => window.any(|v| v),
            Op::Erode => window.all(|v| v),
        }
    })
}

/// Radius for the imageproc operators, when they match the square element.
///
/// imageproc caps distances at `min(width + height, 255)`, so larger radii
/// would misclassify images that are all foreground or all background.
fn chessboard_radius(src: &BitMatrix, size: usize) -> Option<u8> {
    if size % 2 == 0 {
        return None;
    }
    let k = size / 2;
    let cap = (src.width() + src.height()).min(255);
    if k < cap { u8::try_from(k).ok() } else { None }
}

fn apply_with<F>(src: &BitMatrix, size: usize, op: Op, imageproc_op: F) -> BitMatrix
where
    F: Fn(&GrayImage, Norm, u8) -> GrayImage,
{
    if size <= 1 || src.width() == 0 || src.height() == 0 {
        return src.clone();
    }
    if let Some(k) = chessboard_radius(src, size) {
        return BitMatrix::from_gray_image(&imageproc_op(&src.to_gray_image(), Norm::LInf, k));
    }
    separable(src, size, op)
}

fn separable(src: &BitMatrix, size: usize, op: Op) -> BitMatrix {
    let rows = pass(src, size, op, true);
    pass(&rows, size, op, false)
}

/// Grow foreground by a `size` x `size` square
pub fn dilate(src: &BitMatrix, size: usize) -> BitMatrix {
    apply_with(src, size, Op::Dilate, morphology::dilate)
}

/// Shrink foreground by a `size` x `size` square
pub fn erode(src: &BitMatrix, size: usize) -> BitMatrix {
    apply_with(src, size, Op::Erode, morphology::erode)
}

/// Morphological closing: one dilation followed by one erosion.
/// Bridges foreground gaps narrower than `size` and fills small holes.
pub fn close(src: &BitMatrix, size: usize) -> BitMatrix {
    if size <= 1 || src.width() == 0 || src.height() == 0 {
        return src.clone();
    }
    match chessboard_radius(src, size) {
        Some(k) => {
            BitMatrix::from_gray_image(&morphology::close(&src.to_gray_image(), Norm::LInf, k))
        }
        None => separable(&separable(src, size, Op::Dilate), size, Op::Erode),
    }
}
