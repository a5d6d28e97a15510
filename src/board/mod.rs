//! Board state: the standings ranking, the track, and the shared marker.
//!
//! - `Standings`: permutation of the seven colors, 0 = first place
//! - `TrackMap` / `CellEffect`: what each of the 32 cells does
//! - `Marker`: absolute-distance bookkeeping with lap counting and goal detection

mod marker;
mod standings;
mod track;

pub use marker::{Advance, Marker};
pub use standings::{RankChange, Standings};
pub use track::{CellEffect, TrackMap, TRACK_LEN};
