//! # poseidon-scs
//!
//! The SCS curve-number rainfall-runoff transform.
//!
//! Runoff from a design storm is estimated in two steps. A [`CnTable`]
//! first translates land-cover codes into curve numbers (0 = fully
//! pervious, 100 = fully impervious), producing a CN raster for the
//! watershed. The mean curve number over the watershed then feeds the
//! classic SCS relation
//!
//! ```text
//! S  = 25400 / CN - 254          potential retention (mm)
//! Ia = 0.2 * S                   initial abstraction (mm)
//! Q  = (P - Ia)^2 / (P - Ia + S)   for P > Ia, else 0
//! ```
//!
//! which [`runoff_depth_mm`] evaluates for a storm depth `P` in mm. The
//! boundary classes short-circuit: CN 100 returns the full storm depth
//! and CN 0 returns zero, keeping both exact instead of relying on the
//! limit behaviour of the formula. [`runoff_volume_m3`] scales the depth
//! over the watershed's contributing area to the volume of water the
//! inundation solver must place.

mod cn;
mod error;
mod runoff;

pub use cn::{mean_curve_number, CnTable, CN_NODATA};
pub use error::ScsError;
pub use runoff::{runoff_depth_mm, runoff_volume_m3};
