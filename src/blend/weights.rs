//! Blend weight matrices.
//!
//! One block spans the overlap of four fragments. Each pixel of the block
//! takes a weighted mix of the four corner fragments; the weights depend only
//! on the pixel's position inside the block, so they are computed once and
//! shared by every block of the canvas.

use crate::gradient::Gradient;

/// The four corners of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::UpperLeft,
        Corner::UpperRight,
        Corner::LowerLeft,
        Corner::LowerRight,
    ];
}

/// A row-major matrix of per-pixel weights.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendMatrix {
    width: u32,
    height: u32,
    weights: Vec<f32>,
}

impl BlendMatrix {
    fn zeroed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            weights: vec![0.0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Weight at pixel `(x, y)` of the block.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.weights[(y * self.width + x) as usize]
    }

    /// All weights in row-major order.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    fn set(&mut self, x: u32, y: u32, value: f32) {
        self.weights[(y * self.width + x) as usize] = value;
    }
}

/// The four corner matrices of a block.
///
/// At every pixel the four weights sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendMatrices {
    pub upper_left: BlendMatrix,
    pub upper_right: BlendMatrix,
    pub lower_left: BlendMatrix,
    pub lower_right: BlendMatrix,
}

impl BlendMatrices {
    /// Compute the weights for a `width` by `height` block.
    pub fn new(width: u32, height: u32, gradient: &Gradient) -> Self {
        let mut matrices = Self {
            upper_left: BlendMatrix::zeroed(width, height),
            upper_right: BlendMatrix::zeroed(width, height),
            lower_left: BlendMatrix::zeroed(width, height),
            lower_right: BlendMatrix::zeroed(width, height),
        };

        // Progress along each axis only depends on one coordinate.
        let x_prog: Vec<f64> = (0..width).map(|i| progress(gradient, i, width)).collect();
        let x_remain: Vec<f64> = (0..width)
            .map(|i| progress(gradient, width - 1 - i, width))
            .collect();
        let y_prog: Vec<f64> = (0..height).map(|i| progress(gradient, i, height)).collect();
        let y_remain: Vec<f64> = (0..height)
            .map(|i| progress(gradient, height - 1 - i, height))
            .collect();

        for iy in 0..height {
            for ix in 0..width {
                let (xp, xr) = (x_prog[ix as usize], x_remain[ix as usize]);
                let (yp, yr) = (y_prog[iy as usize], y_remain[iy as usize]);

                let remains = [
                    remain(xp, yp),
                    remain(xr, yp),
                    remain(xp, yr),
                    remain(xr, yr),
                ];
                let [ul, ur, ll, lr] = normalize(remains);

                matrices.upper_left.set(ix, iy, ul as f32);
                matrices.upper_right.set(ix, iy, ur as f32);
                matrices.lower_left.set(ix, iy, ll as f32);
                matrices.lower_right.set(ix, iy, lr as f32);
            }
        }

        matrices
    }

    pub fn width(&self) -> u32 {
        self.upper_left.width()
    }

    pub fn height(&self) -> u32 {
        self.upper_left.height()
    }

    pub fn corner(&self, corner: Corner) -> &BlendMatrix {
        match corner {
            Corner::UpperLeft => &self.upper_left,
            Corner::UpperRight => &self.upper_right,
            Corner::LowerLeft => &self.lower_left,
            Corner::LowerRight => &self.lower_right,
        }
    }

    /// The four weights at pixel `(x, y)`, in [`Corner::ALL`] order.
    pub fn at(&self, x: u32, y: u32) -> [f32; 4] {
        [
            self.upper_left.get(x, y),
            self.upper_right.get(x, y),
            self.lower_left.get(x, y),
            self.lower_right.get(x, y),
        ]
    }
}

/// Gradient progress of `index` along a line of `count` pixels.
fn progress(gradient: &Gradient, index: u32, count: u32) -> f64 {
    let line_prog = if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.0
    };
    gradient.eval(line_prog)
}

/// Weight left for a corner whose 2-D progress is `(a, b)`.
fn remain(a: f64, b: f64) -> f64 {
    (1.0 - a.hypot(b)).clamp(0.0, 1.0)
}

fn normalize(remains: [f64; 4]) -> [f64; 4] {
    let sum: f64 = remains.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        remains.map(|r| r / sum)
    } else {
        [0.25; 4]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(matrices: &BlendMatrices) {
        for y in 0..matrices.height() {
            for x in 0..matrices.width() {
                let weights = matrices.at(x, y);
                let sum: f32 = weights.iter().sum();
                assert!((sum - 1.0).abs() < 1e-6, "sum {} at ({}, {})", sum, x, y);
                for w in weights {
                    assert!((0.0..=1.0).contains(&w), "weight {} at ({}, {})", w, x, y);
                }
            }
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert_invariants(&BlendMatrices::new(32, 32, &Gradient::LinearUnity));
        assert_invariants(&BlendMatrices::new(17, 5, &Gradient::LinearUnity));
    }

    #[test]
    fn test_weights_sum_to_one_custom_gradients() {
        for grad in [
            Gradient::custom(&[1.0], &[2.0]).unwrap(),
            Gradient::custom(&[1.0], &[0.5]).unwrap(),
            Gradient::custom(&[], &[]).unwrap(),
            Gradient::custom(&[2.0], &[0.0]).unwrap(),
        ] {
            assert_invariants(&BlendMatrices::new(16, 12, &grad));
        }
    }

    #[test]
    fn test_corner_dominance() {
        let m = BlendMatrices::new(32, 32, &Gradient::LinearUnity);

        assert!(m.upper_left.get(0, 0) > 0.999);
        assert!(m.upper_right.get(31, 0) > 0.999);
        assert!(m.lower_left.get(0, 31) > 0.999);
        assert!(m.lower_right.get(31, 31) > 0.999);

        // Weight vanishes toward the diagonally opposite corner.
        assert!(m.upper_left.get(31, 31) < 1e-3);
        assert!(m.lower_right.get(0, 0) < 1e-3);
    }

    #[test]
    fn test_padded_overflowing_term_keeps_edges_dominant() {
        let grad = Gradient::custom(&[1.0], &[1.0, -400.0]).unwrap();
        let m = BlendMatrices::new(16, 16, &grad);
        assert_invariants(&m);

        // Edge rows and columns keep their corner weighting.
        assert!(m.upper_left.get(0, 0) > 0.999);
        assert!(m.upper_left.get(0, 8) > m.upper_right.get(0, 8));
        assert!(m.upper_left.get(8, 0) > m.lower_left.get(8, 0));
        assert_eq!(m, BlendMatrices::new(16, 16, &Gradient::LinearUnity));
    }

    #[test]
    fn test_symmetry() {
        let m = BlendMatrices::new(20, 20, &Gradient::LinearUnity);
        for y in 0..20 {
            for x in 0..20 {
                let ul = m.upper_left.get(x, y);
                assert!((ul - m.upper_right.get(19 - x, y)).abs() < 1e-6);
                assert!((ul - m.lower_left.get(x, 19 - y)).abs() < 1e-6);
                assert!((ul - m.lower_right.get(19 - x, 19 - y)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_single_pixel_block_is_even() {
        let m = BlendMatrices::new(1, 1, &Gradient::LinearUnity);
        for w in m.at(0, 0) {
            assert!((w - 0.25).abs() < 1e-6);
        }
    }

    #[test]
    fn test_matrix_shape() {
        let m = BlendMatrices::new(8, 4, &Gradient::LinearUnity);
        for corner in Corner::ALL {
            assert_eq!(m.corner(corner).width(), 8);
            assert_eq!(m.corner(corner).height(), 4);
            assert_eq!(m.corner(corner).weights().len(), 32);
        }
    }
}
