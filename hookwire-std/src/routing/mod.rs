//! Pattern-based request routing.
//!
//! Routes are matched in registration order and the first match wins; there
//! is no specificity ranking. Register literal routes such as `/admin/login`
//! before placeholder routes such as `/admin/{page}` that share their shape.

mod base_path;
mod pattern;
mod router;
pub mod uri;

pub use base_path::BasePath;
pub use pattern::{Pattern, Segment, match_pattern};
pub use router::{Redirect, RouteInfo, RouteResult, Router};
pub use uri::{normalize_path, normalize_uri, segments};
