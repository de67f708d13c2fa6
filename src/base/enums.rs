use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the state of a pore during the invasion
///
/// The only allowed transitions are:
///
/// ```text
/// Unvisited ⇄ Front → Occupied
/// Unvisited → Occupied
/// ```
///
/// `Occupied` is absorbing; see [crate::network::Pore].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum PoreStatus {
    /// Not invaded and not adjacent to the invaded region
    Unvisited,

    /// Not invaded but adjacent to an invaded pore (on the invasion front)
    Front,

    /// Invaded by the invading fluid
    Occupied,
}

/// Defines the reason why a simulation has stopped
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum StopReason {
    /// An outlet (end) pore has been invaded
    ReachedOutlet,

    /// The maximum number of iterations has been exceeded
    MaxIterations,

    /// The front became empty before reaching an outlet
    FrontExhausted,

    /// No front pore has a defined total pressure (e.g., grain types without contact angle)
    FrontUnrankable,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::ReachedOutlet => write!(f, "reached outlet"),
            StopReason::MaxIterations => write!(f, "max iterations exceeded"),
            StopReason::FrontExhausted => write!(f, "front exhausted"),
            StopReason::FrontUnrankable => write!(f, "front has no defined pressure"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
