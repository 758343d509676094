//! Fragment index and orientation planning.
//!
//! Decides, for every grid cell, which fragment goes there and how it is
//! flipped and rotated. All randomness comes from the caller's generator so a
//! fixed seed reproduces the same plan.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::RandomPolicy;

/// A row-major 2-D matrix addressed as `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid by calling `f(x, y)` for every cell in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

impl<T> std::ops::Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(x < self.width && y < self.height, "grid index out of bounds");
        &self.cells[y * self.width + x]
    }
}

/// Mirror flips applied to a fragment before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    /// Mirror top to bottom.
    Vertical,
    /// Mirror left to right.
    Horizontal,
    Both,
}

impl Flip {
    pub fn from_flags(vertical: bool, horizontal: bool) -> Self {
        match (vertical, horizontal) {
            (false, false) => Flip::None,
            (true, false) => Flip::Vertical,
            (false, true) => Flip::Horizontal,
            (true, true) => Flip::Both,
        }
    }

    pub fn vertical(self) -> bool {
        matches!(self, Flip::Vertical | Flip::Both)
    }

    pub fn horizontal(self) -> bool {
        matches!(self, Flip::Horizontal | Flip::Both)
    }
}

/// Report label: `x` marks a top-bottom mirror, `y` a left-right mirror.
impl fmt::Display for Flip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Flip::None => "",
            Flip::Vertical => "x",
            Flip::Horizontal => "y",
            Flip::Both => "xy",
        };
        f.write_str(label)
    }
}

/// Rotation applied after flipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Half,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::None => f.write_str(""),
            Rotation::Half => f.write_str("180"),
        }
    }
}

/// Per-cell fragment choice and orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub indices: Grid<usize>,
    pub flips: Grid<Flip>,
    pub rotations: Grid<Rotation>,
}

impl Plan {
    /// Plan an `x_count` by `y_count` grid over `frag_count` fragments.
    ///
    /// Draws happen in a fixed order (indices, then flips, then rotations,
    /// each row-major) so the plan depends only on the generator state.
    pub fn build<R: Rng + ?Sized>(
        x_count: usize,
        y_count: usize,
        frag_count: usize,
        policy: &RandomPolicy,
        rng: &mut R,
    ) -> Self {
        let indices = index_matrix(x_count, y_count, frag_count, policy, rng);
        let flips = flip_matrix(x_count, y_count, policy.random_flipping, rng);
        let rotations = rotation_matrix(x_count, y_count, policy.random_rotating, rng);

        Self {
            indices,
            flips,
            rotations,
        }
    }

    pub fn width(&self) -> usize {
        self.indices.width()
    }

    pub fn height(&self) -> usize {
        self.indices.height()
    }

    /// Fragment index, flip and rotation of a cell.
    pub fn cell(&self, x: usize, y: usize) -> (usize, Flip, Rotation) {
        (
            self.indices[(x, y)],
            self.flips[(x, y)],
            self.rotations[(x, y)],
        )
    }
}

/// Assign a fragment index to every cell.
pub fn index_matrix<R: Rng + ?Sized>(
    x_count: usize,
    y_count: usize,
    frag_count: usize,
    policy: &RandomPolicy,
    rng: &mut R,
) -> Grid<usize> {
    let frag_count = frag_count.max(1);

    if !policy.random_frags {
        return Grid::from_fn(x_count, y_count, |x, y| (y * x_count + x) % frag_count);
    }

    if policy.avoid_duplicates {
        let mut deck = ShuffledDeck::new(frag_count);
        return Grid::from_fn(x_count, y_count, |_, _| deck.draw(&mut *rng));
    }

    Grid::from_fn(x_count, y_count, |_, _| rng.gen_range(0..frag_count))
}

/// Assign flips; two fair coins per cell when enabled.
pub fn flip_matrix<R: Rng + ?Sized>(
    x_count: usize,
    y_count: usize,
    enabled: bool,
    rng: &mut R,
) -> Grid<Flip> {
    Grid::from_fn(x_count, y_count, |_, _| {
        if enabled {
            let vertical = rng.gen_bool(0.5);
            let horizontal = rng.gen_bool(0.5);
            Flip::from_flags(vertical, horizontal)
        } else {
            Flip::None
        }
    })
}

/// Assign 180 degree rotations; one fair coin per cell when enabled.
pub fn rotation_matrix<R: Rng + ?Sized>(
    x_count: usize,
    y_count: usize,
    enabled: bool,
    rng: &mut R,
) -> Grid<Rotation> {
    Grid::from_fn(x_count, y_count, |_, _| {
        if enabled && rng.gen_bool(0.5) {
            Rotation::Half
        } else {
            Rotation::None
        }
    })
}

/// Hands out shuffled permutations of `0..count`, reshuffling when empty.
struct ShuffledDeck {
    count: usize,
    remaining: Vec<usize>,
}

impl ShuffledDeck {
    fn new(count: usize) -> Self {
        Self {
            count,
            remaining: Vec::new(),
        }
    }

    fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        if self.remaining.is_empty() {
            let mut fresh: Vec<usize> = (0..self.count).collect();
            fresh.shuffle(rng);
            // pop() takes from the back
            fresh.reverse();
            self.remaining = fresh;
        }
        self.remaining.pop().unwrap_or(0)
    }
}
