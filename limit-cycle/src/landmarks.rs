//! Representative trajectory points for annotation arrows.

use crate::segment::Segmentation;
use crate::types::OscillatorState;

/// Preferred trajectory index for the arrow-of-time marker.
pub const ARROW_OF_TIME_INDEX: usize = 4000;

/// A cycle with at most this many points is too short to pick landmarks from.
const MIN_CYCLE_POINTS: usize = 10;

/// Points that annotation arrows point at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmarks {
    /// A point one fifth into the limit cycle.
    pub cycle_early: OscillatorState,
    /// A point half way into the limit cycle.
    pub cycle_mid: OscillatorState,
    /// A point on the transient where the trajectory visibly spirals outward.
    pub arrow_of_time: OscillatorState,
}

/// Pick annotation landmarks from a segmentation.
///
/// Cycle landmarks fall back to the final point when the cycle has 10 points
/// or fewer. The arrow-of-time point sits at index
/// `min(4000, transient_len - 1)`, or at index 0 without a transient.
/// Returns `None` for an empty trajectory.
pub fn landmarks(segmentation: &Segmentation<'_>) -> Option<Landmarks> {
    let transient = &segmentation.transient;
    let cycle = &segmentation.cycle;

    let last = cycle.last().or_else(|| transient.last())?;

    let (cycle_early, cycle_mid) = if cycle.len() > MIN_CYCLE_POINTS {
        (cycle.state(cycle.len() / 5)?, cycle.state(cycle.len() / 2)?)
    } else {
        (last, last)
    };

    let arrow_of_time = if transient.is_empty() {
        cycle.state(0)?
    } else {
        transient.state(ARROW_OF_TIME_INDEX.min(transient.len() - 1))?
    };

    Some(Landmarks {
        cycle_early,
        cycle_mid,
        arrow_of_time,
    })
}
