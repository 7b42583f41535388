//! The level search.

use poseidon_grid::Grid;

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::result::{LevelSolution, Outcome};
use crate::volume::ponded_volume_m3;

/// Finds the water surface elevation at which `dem` ponds
/// `target_volume_m3` of water.
///
/// The answer always lies between the lowest and highest valid
/// elevation: below the lowest cell nothing is wet, and above the rim
/// water would leave the watershed. Within that bracket the ponded
/// volume is continuous and non-decreasing, so plain bisection is exact
/// enough and unconditionally stable. The search stops once the bracket
/// is narrower than the configured tolerance and reports the bracket
/// midpoint.
///
/// Watersheds with fewer valid cells than the configured floor are
/// reported as [`Outcome::Degenerate`] without searching; targets beyond
/// the rim capacity clamp to the rim as [`Outcome::RimLimited`].
///
/// # Errors
///
/// Returns a configuration error from [`SolverConfig::validate`], or
/// [`SolverError::InvalidTargetVolume`] when the target is negative or
/// not finite.
pub fn solve_level(
    dem: &Grid<f64>,
    target_volume_m3: f64,
    config: &SolverConfig,
) -> Result<LevelSolution, SolverError> {
    config.validate()?;
    if !target_volume_m3.is_finite() || target_volume_m3 < 0.0 {
        return Err(SolverError::InvalidTargetVolume {
            value: target_volume_m3,
        });
    }

    let Some((lo, hi)) = dem.valid_range() else {
        return Ok(LevelSolution::new(
            f64::NAN,
            0.0,
            target_volume_m3,
            0,
            Outcome::Degenerate,
        ));
    };
    if dem.valid_count() < config.min_valid_cells() {
        return Ok(LevelSolution::new(
            lo,
            0.0,
            target_volume_m3,
            0,
            Outcome::Degenerate,
        ));
    }

    if target_volume_m3 == 0.0 {
        return Ok(LevelSolution::new(
            lo,
            0.0,
            target_volume_m3,
            0,
            Outcome::Solved,
        ));
    }

    let capacity = ponded_volume_m3(dem, hi);
    if target_volume_m3 > capacity {
        return Ok(LevelSolution::new(
            hi,
            capacity,
            target_volume_m3,
            0,
            Outcome::RimLimited,
        ));
    }

    let mut lo_level = lo;
    let mut hi_level = hi;
    let mut iterations = 0;
    while hi_level - lo_level > config.tolerance_m() {
        if iterations == config.max_iterations() {
            let level = 0.5 * (lo_level + hi_level);
            return Ok(LevelSolution::new(
                level,
                ponded_volume_m3(dem, level),
                target_volume_m3,
                iterations,
                Outcome::IterationLimit,
            ));
        }
        let mid = 0.5 * (lo_level + hi_level);
        iterations += 1;
        if ponded_volume_m3(dem, mid) < target_volume_m3 {
            lo_level = mid;
        } else {
            hi_level = mid;
        }
    }

    let level = 0.5 * (lo_level + hi_level);
    Ok(LevelSolution::new(
        level,
        ponded_volume_m3(dem, level),
        target_volume_m3,
        iterations,
        Outcome::Solved,
    ))
}
