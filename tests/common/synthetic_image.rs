/// Even-odd test of a point against a closed polygon.
fn inside(px: f32, py: f32, polygon: &[(f32, f32)]) -> bool {
    let n = polygon.len();
    let mut result = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            result = !result;
        }
        j = i;
    }
    result
}

/// Renders filled polygons (pixel centres tested) as `fg` on a `bg` canvas.
pub fn fill_polygons_u8(
    width: usize,
    height: usize,
    polygons: &[Vec<(f32, f32)>],
    fg: u8,
    bg: u8,
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = vec![bg; width * height];
    for y in 0..height {
        for x in 0..width {
            let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
            if polygons.iter().any(|p| inside(cx, cy, p)) {
                img[y * width + x] = fg;
            }
        }
    }
    img
}

/// Outline of an 80x80 "L"-cornered block with notches cut into its right
/// and bottom sides. Top and left sides are intact and meet at `(x0, y0)`.
pub fn notched_block(x0: f32, y0: f32) -> Vec<(f32, f32)> {
    [
        (0.0, 0.0),
        (80.0, 0.0),
        (80.0, 25.0),
        (60.0, 25.0),
        (60.0, 50.0),
        (80.0, 50.0),
        (80.0, 80.0),
        (50.0, 80.0),
        (50.0, 60.0),
        (25.0, 60.0),
        (25.0, 80.0),
        (0.0, 80.0),
    ]
    .into_iter()
    .map(|(x, y)| (x0 + x, y0 + y))
    .collect()
}

/// Rotates a polygon by `degrees` about `(cx, cy)`.
pub fn rotate(polygon: &[(f32, f32)], cx: f32, cy: f32, degrees: f32) -> Vec<(f32, f32)> {
    let (s, c) = degrees.to_radians().sin_cos();
    polygon
        .iter()
        .map(|&(x, y)| {
            let (dx, dy) = (x - cx, y - cy);
            (cx + dx * c - dy * s, cy + dx * s + dy * c)
        })
        .collect()
}
