//! # poseidon-merge
//!
//! Composites per-watershed depth tiles into one city-wide raster.
//!
//! Watershed tiles are small windows cut from the same city lattice, so
//! merging never resamples: [`MergeBuffer::composite`] locates each tile
//! by whole-cell offset and writes its valid cells into the frame. Where
//! watersheds overlap (shared boundary cells are common along ridge
//! lines) the [`OverlapPolicy`] decides: [`OverlapPolicy::Max`] keeps
//! the deeper water, which is the conservative choice for hazard maps,
//! while [`OverlapPolicy::LastWins`] reproduces the behaviour of
//! classic mosaic tools where later tiles paint over earlier ones.
//!
//! [`union_frame`] builds an empty frame spanning a set of tiles, for
//! merging tiles that were written to disk by an earlier run.

mod buffer;
mod error;
mod frame;

pub use buffer::{CompositeReport, MergeBuffer, OverlapPolicy};
pub use error::MergeError;
pub use frame::union_frame;
