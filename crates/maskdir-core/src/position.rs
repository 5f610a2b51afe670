//! Platform position capability.
//!
//! Geolocation is a best-effort platform service: callers that sort or
//! recenter by the user's position must treat every failure as a no-op.
//! Putting the capability behind a trait keeps the filter/sort pipeline
//! free of platform dependencies and fully testable headlessly.

use thiserror::Error;

use crate::geo::Point;

/// Why a position could not be produced. Callers never surface these to
/// the user; they only decide to skip the position-dependent operation.
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("no position source is available")]
    Unavailable,

    #[error("position access was denied")]
    Denied,

    #[error("position request timed out")]
    Timeout,
}

/// A single "get current position" operation.
pub trait PositionProvider {
    /// The current position as a lat/lng point.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] when no position can be produced; callers
    /// treat this as non-fatal.
    fn current_position(&self) -> Result<Point, PositionError>;
}

/// A provider pinned to one known point, for CLI flags and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Point);

impl PositionProvider for FixedPosition {
    fn current_position(&self) -> Result<Point, PositionError> {
        Ok(self.0)
    }
}

/// A provider with no position source, for the "flags absent" CLI path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPosition;

impl PositionProvider for NoPosition {
    fn current_position(&self) -> Result<Point, PositionError> {
        Err(PositionError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_position_returns_its_point() {
        let p = Point {
            lat: 25.0451957,
            lng: 121.5198828,
        };
        let got = FixedPosition(p).current_position().expect("position");
        assert_eq!(got, p);
    }

    #[test]
    fn no_position_is_unavailable() {
        let err = NoPosition.current_position().unwrap_err();
        assert!(matches!(err, PositionError::Unavailable));
    }
}
