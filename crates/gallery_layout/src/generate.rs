//! Layout generation
//!
//! `generate` maps a config to an ordered list of world positions. Every
//! layout is deterministic except `Scattered`, which draws from the supplied
//! RNG.

use gallery_math::{consts, radians, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{pyramid_rows, Layout, ScatterBounds, TargetConfig};

/// Placement attempts per scattered target before the minimum distance is relaxed
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Generate target positions for a config
pub fn generate<R: Rng>(config: &TargetConfig, rng: &mut R) -> Vec<Vec3> {
    let positions = match &config.layout {
        Layout::Linear {
            count,
            base_position,
            spacing,
        }
        | Layout::Moving {
            count,
            base_position,
            spacing,
        } => linear(*count, *base_position, *spacing),
        Layout::Circular {
            count,
            center,
            radius,
            start_angle,
        } => circular(*count, *center, *radius, *start_angle),
        Layout::Grid {
            rows,
            cols,
            base_position,
            spacing_x,
            spacing_z,
        } => grid(*rows, *cols, *base_position, *spacing_x, *spacing_z),
        Layout::VFormation {
            count,
            base_position,
            spacing,
            angle_degrees,
        } => v_formation(*count, *base_position, *spacing, radians(*angle_degrees)),
        Layout::Scattered {
            count,
            bounds,
            min_distance,
        } => scattered(*count, bounds, *min_distance, rng),
        Layout::Pyramid {
            base_count,
            rows,
            base_position,
            spacing_x,
            spacing_z,
        } => pyramid(*base_count, *rows, *base_position, *spacing_x, *spacing_z),
    };

    debug_assert_eq!(positions.len(), config.effective_count());
    positions
}

/// Generate with a fresh seeded RNG
pub fn generate_seeded(config: &TargetConfig, seed: u64) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate(config, &mut rng)
}

fn linear(count: usize, base: Vec3, spacing: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| base + Vec3::new(i as f32 * spacing, 0.0, 0.0))
        .collect()
}

fn circular(count: usize, center: Vec3, radius: f32, start_angle: f32) -> Vec<Vec3> {
    let step = consts::TAU / count.max(1) as f32;
    (0..count)
        .map(|i| {
            let angle = start_angle + i as f32 * step;
            center + Vec3::new(angle.cos(), 0.0, angle.sin()) * radius
        })
        .collect()
}

fn grid(rows: usize, cols: usize, base: Vec3, spacing_x: f32, spacing_z: f32) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            positions.push(base + Vec3::new(col as f32 * spacing_x, 0.0, row as f32 * spacing_z));
        }
    }
    positions
}

fn v_formation(count: usize, base: Vec3, spacing: f32, angle: f32) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(count);
    if count == 0 {
        return positions;
    }
    positions.push(base);

    let (sin, cos) = angle.sin_cos();
    let mut k = 1usize;
    while positions.len() < count {
        // k = 1, 2 -> first pair; 3, 4 -> second pair; odd is the left wing
        let pair = ((k + 1) / 2) as f32;
        let side = if k % 2 == 1 { -1.0 } else { 1.0 };
        let distance = pair * spacing;
        positions.push(base + Vec3::new(side * distance * cos, 0.0, distance * sin));
        k += 1;
    }
    positions
}

fn scattered<R: Rng>(
    count: usize,
    bounds: &ScatterBounds,
    min_distance: f32,
    rng: &mut R,
) -> Vec<Vec3> {
    let min_distance_sq = min_distance * min_distance;
    let mut positions: Vec<Vec3> = Vec::with_capacity(count);

    for index in 0..count {
        let too_close = |candidate: Vec3, accepted: &[Vec3]| {
            accepted
                .iter()
                .any(|p| p.distance_squared(candidate) < min_distance_sq)
        };

        let mut candidate = sample_point(bounds, rng);
        let mut attempts = 1;
        while attempts < MAX_PLACEMENT_ATTEMPTS && too_close(candidate, &positions) {
            candidate = sample_point(bounds, rng);
            attempts += 1;
        }

        if too_close(candidate, &positions) {
            log::debug!(
                "Scattered target {} placed closer than {} after {} attempts",
                index,
                min_distance,
                MAX_PLACEMENT_ATTEMPTS
            );
        }
        positions.push(candidate);
    }

    positions
}

fn sample_point<R: Rng>(bounds: &ScatterBounds, rng: &mut R) -> Vec3 {
    let x = if bounds.min_x < bounds.max_x {
        rng.gen_range(bounds.min_x..bounds.max_x)
    } else {
        bounds.min_x
    };
    let z = if bounds.min_z < bounds.max_z {
        rng.gen_range(bounds.min_z..bounds.max_z)
    } else {
        bounds.min_z
    };
    Vec3::new(x, bounds.y, z)
}

fn pyramid(
    base_count: usize,
    rows: usize,
    base: Vec3,
    spacing_x: f32,
    spacing_z: f32,
) -> Vec<Vec3> {
    let mut positions = Vec::new();
    for row in 0..pyramid_rows(base_count, rows) {
        let in_row = base_count - row;
        let half_width = (in_row - 1) as f32 / 2.0;
        for i in 0..in_row {
            positions.push(
                base + Vec3::new(
                    (i as f32 - half_width) * spacing_x,
                    0.0,
                    row as f32 * spacing_z,
                ),
            );
        }
    }
    positions
}
