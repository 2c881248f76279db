//! Location-aware nearby place discovery.
//!
//! Acquires a position, reuses a recent result when the user has not moved,
//! queries a [`PlaceSource`] otherwise, and keeps a map and a list projection
//! of the results in sync by place id.

pub mod app_config;
pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod geo;
pub mod locate;
pub mod place;
pub mod session;
pub mod store;
pub mod sync;
pub mod view;

pub use app_config::AppConfig;
pub use cache::{CacheEntry, MemoryStorage, SessionStorage, SpatialCache};
pub use classify::{
    classify, Classification, FailureCategory, FailureCode, GeoFailure, PermissionState,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoordinateError, DiscoveryError, PlaceSourceError};
pub use geo::{distance_km, format_distance, Coordinate, LocationSample};
pub use locate::{LocationAcquirer, LocationProvider, PositionOptions, RawFix};
pub use place::{Place, PlaceId, PlaceSummary};
pub use session::{DiscoverySession, PlaceSource, SEARCH_RADIUS_M};
pub use store::PlaceStore;
pub use sync::{ListProjection, ListRow, MapProjection, SyncController, FOCUS_ZOOM};
pub use view::{status_line, ViewState};
