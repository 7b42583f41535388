//! Property checks for the level search on randomised terrain.

use ndarray::Array2;
use poseidon_grid::{Crs, Grid, GridTransform};
use poseidon_solver::{
    depth_grid, ponded_volume_m3, solve_level, Outcome, SolverConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_dem(rng: &mut StdRng, rows: usize, cols: usize) -> Grid<f64> {
    let transform = GridTransform::new(0.0, 0.0, 5.0).unwrap();
    let data = Array2::from_shape_fn((rows, cols), |_| {
        if rng.random_range(0.0..1.0) < 0.1 {
            -9999.0
        } else {
            rng.random_range(0.0..50.0)
        }
    });
    Grid::new(transform, Crs::local(), -9999.0, data)
}

#[test]
fn ponded_volume_is_monotone_on_random_terrain() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let dem = random_dem(&mut rng, 8, 8);
        let mut previous = 0.0;
        for step in 0..=100 {
            let level = step as f64 * 0.6;
            let volume = ponded_volume_m3(&dem, level);
            assert!(volume >= previous, "volume fell from {previous} to {volume}");
            previous = volume;
        }
    }
}

#[test]
fn solved_levels_pond_the_requested_volume() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = SolverConfig::new();
    for round in 0..50 {
        let dem = random_dem(&mut rng, 8, 8);
        let Some((_, hi)) = dem.valid_range() else {
            continue;
        };
        let capacity = ponded_volume_m3(&dem, hi);
        let target = rng.random_range(0.0..1.0) * capacity;

        let solution = solve_level(&dem, target, &config).unwrap();
        assert_eq!(solution.outcome(), Outcome::Solved, "round {round}");
        // The level is within half a tolerance of the true surface, so
        // the volume can be off by at most wet-cells * area * tol / 2.
        let bound = dem.valid_count() as f64 * dem.transform().cell_area() * 0.001;
        assert!(
            solution.residual_m3().abs() <= bound.max(1e-6),
            "round {round}: residual {} exceeds {bound}",
            solution.residual_m3()
        );
    }
}

#[test]
fn larger_targets_never_lower_the_surface() {
    let mut rng = StdRng::seed_from_u64(1001);
    let config = SolverConfig::new();
    for _ in 0..20 {
        let dem = random_dem(&mut rng, 6, 6);
        let Some((_, hi)) = dem.valid_range() else {
            continue;
        };
        let capacity = ponded_volume_m3(&dem, hi);
        if capacity <= 0.0 {
            continue;
        }
        let small = solve_level(&dem, 0.2 * capacity, &config).unwrap();
        let large = solve_level(&dem, 0.8 * capacity, &config).unwrap();
        assert!(large.level_m() >= small.level_m() - config.tolerance_m());
    }
}

#[test]
fn depth_raster_reproduces_the_ponded_volume() {
    let mut rng = StdRng::seed_from_u64(9);
    let config = SolverConfig::new();
    for _ in 0..10 {
        let dem = random_dem(&mut rng, 8, 8);
        let Some((_, hi)) = dem.valid_range() else {
            continue;
        };
        let capacity = ponded_volume_m3(&dem, hi);
        let target = 0.5 * capacity;
        let solution = solve_level(&dem, target, &config).unwrap();
        if solution.outcome() != Outcome::Solved {
            continue;
        }

        let depth = depth_grid(&dem, solution.level_m());
        let from_depths: f64 =
            depth.valid_values().iter().sum::<f64>() * dem.transform().cell_area();
        let diff = (from_depths - solution.ponded_volume_m3()).abs();
        assert!(diff < 1e-6, "depth raster volume drifted by {diff}");
    }
}

#[test]
fn rim_limited_watersheds_saturate_at_capacity() {
    let mut rng = StdRng::seed_from_u64(77);
    let config = SolverConfig::new();
    let dem = random_dem(&mut rng, 8, 8);
    let (_, hi) = dem.valid_range().unwrap();
    let capacity = ponded_volume_m3(&dem, hi);

    let solution = solve_level(&dem, capacity * 1.5, &config).unwrap();
    assert_eq!(solution.outcome(), Outcome::RimLimited);
    assert_eq!(solution.level_m(), hi);
    assert_eq!(solution.ponded_volume_m3(), capacity);
}
