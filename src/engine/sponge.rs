/// Menger sponge generator.
///
/// Expands a single root cube breadth-first: each pass splits every cube
/// into its 3×3×3 sub-cells and keeps the 20 cells that touch at least two
/// outer faces of the parent (the 12 edge cells and 8 corner cells). The
/// face centers and the body center are dropped.

use super::error::SpongeError;
use super::types::Vec3D;
use crate::math::math3d;

/// Deepest level accepted by [`generate_sponge`]; 20^4 = 160k cubes.
pub const MAX_LEVEL: u32 = 4;

/// Sub-cells kept per subdivision.
pub const CELLS_PER_LEVEL: usize = 20;

/// Offsets of the retained sub-cells, in i/j/k enumeration order.
pub const SUBCELL_OFFSETS: [(i8, i8, i8); CELLS_PER_LEVEL] = subcell_offsets();

/// Number of axis offsets equal to ±1.
#[inline]
pub const fn edge_count(i: i8, j: i8, k: i8) -> u32 {
    (i != 0) as u32 + (j != 0) as u32 + (k != 0) as u32
}

const fn subcell_offsets() -> [(i8, i8, i8); CELLS_PER_LEVEL] {
    let mut out = [(0i8, 0i8, 0i8); CELLS_PER_LEVEL];
    let mut n = 0;
    let mut i = -1i8;
    while i <= 1 {
        let mut j = -1i8;
        while j <= 1 {
            let mut k = -1i8;
            while k <= 1 {
                if edge_count(i, j, k) >= 2 {
                    out[n] = (i, j, k);
                    n += 1;
                }
                k += 1;
            }
            j += 1;
        }
        i += 1;
    }
    out
}

/// Generated cube centers plus the edge length shared by all of them.
#[derive(Clone, Debug)]
pub struct Sponge {
    pub positions: Vec<Vec3D>,
    pub size: f64,
}

impl Sponge {
    /// (minZ, maxZ) over all positions. Empty sponges yield (0, 0).
    pub fn depth_range(&self) -> (f64, f64) {
        if self.positions.is_empty() {
            return (0.0, 0.0);
        }
        self.positions.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.z), hi.max(p.z))
        })
    }
}

/// Check the generator's preconditions.
pub fn validate(level: u32, initial_size: f64) -> Result<(), SpongeError> {
    if !initial_size.is_finite() || initial_size <= 0.0 {
        return Err(SpongeError::InvalidSize(initial_size));
    }
    if level > MAX_LEVEL {
        return Err(SpongeError::LevelTooDeep { level, max: MAX_LEVEL });
    }
    Ok(())
}

/// Generate the cube centers of a level-`level` sponge whose root cube has
/// edge `initial_size` and is centered at the origin.
///
/// Level 0 is the root cube itself. Each level multiplies the count by 20
/// and divides the size by 3.
pub fn generate_sponge(level: u32, initial_size: f64) -> Result<Sponge, SpongeError> {
    validate(level, initial_size)?;

    let mut positions = vec![Vec3D::ORIGIN];
    let mut size = initial_size;

    for l in 1..=level {
        let step = size / 3.0;
        let mut next = Vec::with_capacity(positions.len() * CELLS_PER_LEVEL);
        for pos in &positions {
            for &(i, j, k) in &SUBCELL_OFFSETS {
                let offset = Vec3D::new(i as f64, j as f64, k as f64);
                next.push(math3d::vec3d_add(pos, &math3d::vec3d_scale(&offset, step)));
            }
        }
        positions = next;
        size = step;
        tracing::debug!(level = l, cubes = positions.len(), size, "subdivided sponge");
    }

    Ok(Sponge { positions, size })
}
