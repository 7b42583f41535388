//! The SCS runoff relation.

use crate::error::ScsError;

/// Runoff depth in mm produced by a storm of `storm_depth_mm` over
/// ground with the given mean curve number.
///
/// The boundary classes short-circuit to their exact closed forms: a
/// curve number of 0 absorbs everything and a curve number of 100 sheds
/// the whole storm. In between, storms not exceeding the initial
/// abstraction `0.2 * S` produce no runoff at all.
///
/// # Errors
///
/// Returns [`ScsError::InvalidStormDepth`] unless the storm depth is a
/// non-negative finite number, and [`ScsError::CurveNumberOutOfRange`]
/// when the curve number leaves 0..=100.
pub fn runoff_depth_mm(storm_depth_mm: f64, curve_number: f64) -> Result<f64, ScsError> {
    if !storm_depth_mm.is_finite() || storm_depth_mm < 0.0 {
        return Err(ScsError::InvalidStormDepth {
            value: storm_depth_mm,
        });
    }
    if !curve_number.is_finite() || !(0.0..=100.0).contains(&curve_number) {
        return Err(ScsError::CurveNumberOutOfRange {
            value: curve_number,
        });
    }
    if curve_number == 0.0 {
        return Ok(0.0);
    }
    if curve_number == 100.0 {
        return Ok(storm_depth_mm);
    }

    let retention = 25400.0 / curve_number - 254.0;
    let abstraction = 0.2 * retention;
    if storm_depth_mm <= abstraction {
        return Ok(0.0);
    }
    let effective = storm_depth_mm - abstraction;
    Ok(effective * effective / (effective + retention))
}

/// Volume of water in m^3 that a runoff depth spread over the
/// watershed's contributing cells amounts to.
///
/// The contributing area is the number of cells valid in both the
/// elevation and land-cover rasters times the ground area of one cell.
pub fn runoff_volume_m3(runoff_depth_mm: f64, valid_cells: usize, cell_area_m2: f64) -> f64 {
    runoff_depth_mm / 1000.0 * valid_cells as f64 * cell_area_m2
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn fully_pervious_ground_absorbs_everything() {
        assert_relative_eq!(runoff_depth_mm(297.343, 0.0).unwrap(), 0.0);
        assert_relative_eq!(runoff_depth_mm(1000.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn fully_impervious_ground_sheds_the_whole_storm() {
        assert_relative_eq!(runoff_depth_mm(297.343, 100.0).unwrap(), 297.343);
        assert_relative_eq!(runoff_depth_mm(0.0, 100.0).unwrap(), 0.0);
    }

    #[test]
    fn storms_below_the_initial_abstraction_produce_nothing() {
        // CN 85 gives S = 44.8235 mm and Ia = 8.9647 mm.
        assert_relative_eq!(runoff_depth_mm(8.0, 85.0).unwrap(), 0.0);
        let retention = 25400.0 / 85.0 - 254.0;
        assert_relative_eq!(runoff_depth_mm(0.2 * retention, 85.0).unwrap(), 0.0);
    }

    #[test]
    fn hundred_year_storm_over_urban_ground() {
        // P = 297.343 mm at CN 85: S = 44.8235, Ia = 8.9647,
        // Q = 288.3783^2 / 333.2018.
        let q = runoff_depth_mm(297.343, 85.0).unwrap();
        assert_relative_eq!(q, 249.5846, epsilon = 1e-3);
    }

    #[test]
    fn runoff_grows_with_curve_number_and_storm_depth() {
        let q60 = runoff_depth_mm(297.343, 60.0).unwrap();
        let q85 = runoff_depth_mm(297.343, 85.0).unwrap();
        let q99 = runoff_depth_mm(297.343, 99.0).unwrap();
        assert!(q60 < q85 && q85 < q99);
        assert!(q99 < 297.343);

        let p100 = runoff_depth_mm(297.343, 85.0).unwrap();
        let p500 = runoff_depth_mm(313.994, 85.0).unwrap();
        assert!(p100 < p500);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(matches!(
            runoff_depth_mm(-1.0, 85.0),
            Err(ScsError::InvalidStormDepth { .. })
        ));
        assert!(matches!(
            runoff_depth_mm(f64::NAN, 85.0),
            Err(ScsError::InvalidStormDepth { .. })
        ));
        assert!(matches!(
            runoff_depth_mm(100.0, -5.0),
            Err(ScsError::CurveNumberOutOfRange { .. })
        ));
        assert!(matches!(
            runoff_depth_mm(100.0, 104.5),
            Err(ScsError::CurveNumberOutOfRange { .. })
        ));
    }

    #[test]
    fn volume_scales_depth_over_the_contributing_area() {
        // 250 mm over 1000 cells of 100 m^2 is 25 000 m^3.
        assert_relative_eq!(runoff_volume_m3(250.0, 1000, 100.0), 25_000.0);
        assert_relative_eq!(runoff_volume_m3(250.0, 0, 100.0), 0.0);
    }
}
