use image::{GrayImage, Luma};

/// Compact bit matrix for storing binary images (`true` = foreground)
#[derive(Debug, Clone, PartialEq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new bit matrix with given dimensions, all background
    ///
    /// # Panics
    /// If `width * height` overflows `usize`. Use [`BitMatrix::try_new`] for
    /// untrusted dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Some(matrix) => matrix,
            None => panic!("bit matrix dimensions {width}x{height} overflow usize"),
        }
    }

    /// Create an all-background matrix, or `None` if `width * height`
    /// overflows `usize`
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        let bytes_needed = width.checked_mul(height)?.div_ceil(8);
        Some(Self {
            width,
            height,
            data: vec![0; bytes_needed],
        })
    }

    /// Build a matrix from an 8-bit image; non-zero pixels are foreground
    pub fn from_gray_image(image: &GrayImage) -> Self {
        let (w, h) = image.dimensions();
        Self::from_fn(w as usize, h as usize, |x, y| {
            image.get_pixel(x as u32, y as u32)[0] > 0
        })
    }

    /// Build a matrix by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut matrix = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    matrix.set(x, y, true);
                }
            }
        }
        matrix
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out of bounds reads as background
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let bit = 1 << (index % 8);
        if value {
            self.data[index / 8] |= bit;
        } else {
            self.data[index / 8] &= !bit;
        }
    }

    /// Number of foreground pixels
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Render as an 8-bit image (foreground = 255) for contour tracing
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            if self.get(x as usize, y as usize) {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        })
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(8, 8);
        assert_eq!(matrix.width(), 8);
        assert_eq!(matrix.height(), 8);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(3, 3));
        assert_eq!(matrix.count_ones(), 1);

        matrix.set(3, 4, false);
        assert_eq!(matrix.count_ones(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(8, 8);
        matrix.set(10, 10, true); // Should not panic
        assert!(!matrix.get(10, 10));
    }

    #[test]
    fn test_try_new_rejects_overflowing_dimensions() {
        assert!(BitMatrix::try_new(usize::MAX, 2).is_none());
        assert!(BitMatrix::try_new(usize::MAX, 0).is_some());
        assert_eq!(BitMatrix::try_new(3, 5).map(|m| m.count_ones()), Some(0));
    }

    #[test]
    fn test_to_gray_image() {
        let matrix = BitMatrix::from_fn(3, 2, |x, y| x == 1 && y == 1);
        let img = matrix.to_gray_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(1, 1)[0], 255);
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(BitMatrix::from_gray_image(&img), matrix);
    }
}
