// One module per resource; each handler extracts a typed body, issues a
// single parameterized statement and remaps rows to the client convention.

pub mod auth;
pub mod dam_reports;
pub mod rain_reports;
pub mod users;
pub mod water_reports;

/// Defaults for administrative-location fields on report creation.
pub(crate) const DEFAULT_PLACE: &str = "-";
pub(crate) const DEFAULT_PROVINCE: &str = "ลำปาง";
