#![allow(dead_code)]

/// Constant-intensity image.
pub fn uniform_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}

/// Vertical step: columns `< split` are `left`, the rest `right`.
pub fn vertical_step_u8(width: usize, height: usize, split: usize, left: u8, right: u8) -> Vec<u8> {
    (0..width * height)
        .map(|i| if i % width < split { left } else { right })
        .collect()
}

/// Horizontal step: rows `< split` are `top`, the rest `bottom`.
pub fn horizontal_step_u8(width: usize, height: usize, split: usize, top: u8, bottom: u8) -> Vec<u8> {
    (0..width * height)
        .map(|i| if i / width < split { top } else { bottom })
        .collect()
}

/// High-contrast checkerboard.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(cell > 0, "cell size must be positive");
    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img[y * width + x] = if sum & 1 == 0 { 32 } else { 220 };
        }
    }
    img
}

/// Deterministic pseudo-random texture on top of a diagonal ramp.
pub fn textured_u8(width: usize, height: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    let mut img = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state >> 24) as i32 - 128;
            let ramp = ((x + y) * 255 / (width + height).max(1)) as i32;
            img.push((ramp + noise / 2).clamp(0, 255) as u8);
        }
    }
    img
}

/// Filled disk of `inside` on an `outside` background.
pub fn disk_u8(width: usize, height: usize, radius: f32, inside: u8, outside: u8) -> Vec<u8> {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    (0..width * height)
        .map(|i| {
            let dx = (i % width) as f32 + 0.5 - cx;
            let dy = (i / width) as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                inside
            } else {
                outside
            }
        })
        .collect()
}

pub fn count_edges(mask: &[u8]) -> usize {
    mask.iter().filter(|&&v| v == 255).count()
}

/// Copies a packed image into rows of `stride` bytes, padding with `fill`.
pub fn with_row_padding(packed: &[u8], width: usize, stride: usize, fill: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(packed.len() / width * stride);
    for row in packed.chunks(width) {
        out.extend_from_slice(row);
        out.extend(std::iter::repeat(fill).take(stride - width));
    }
    out
}
