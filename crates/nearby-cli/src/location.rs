//! Location provider for a terminal: the position comes from flags or config.

use nearby_core::{
    Coordinate, FailureCode, GeoFailure, LocationProvider, PermissionState, PositionOptions, RawFix,
};

/// Reports a fixed coordinate, or no capability at all when none was given.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedLocation {
    origin: Option<Coordinate>,
}

impl FixedLocation {
    pub(crate) fn new(origin: Option<Coordinate>) -> Self {
        Self { origin }
    }
}

impl LocationProvider for FixedLocation {
    fn is_supported(&self) -> bool {
        self.origin.is_some()
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<RawFix, GeoFailure> {
        self.origin
            .map(|c| RawFix {
                latitude: c.lat,
                longitude: c.lng,
            })
            .ok_or_else(|| GeoFailure::new(FailureCode::PositionUnavailable, "no coordinate set"))
    }

    async fn permission_state(&self) -> Option<PermissionState> {
        Some(PermissionState::Granted)
    }
}
