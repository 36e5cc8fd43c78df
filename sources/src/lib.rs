//! Module to deal with the remote locations service.
//!
//! There is only one service, with a fixed URL, returning a JSON document like this:
//!
//! ```json
//! { "locations": [[37.5663, 126.9779], [37.5651, 126.9895]] }
//! ```
//!
//! Every pair is `[lat, lng]`, we hand back [`GeoCoordinate`](locmap_common::GeoCoordinate)
//! values in `(lon, lat)` order.
//!

pub use error::*;
pub use fetch::*;
pub use state::*;

mod error;
mod fetch;
mod state;

#[macro_use]
mod macros;

/// The one service we talk to.
pub const LOCATIONS_URL: &str =
    "https://angelswing-frontend-test-serverless-api.vercel.app/api/locations";

use clap::{crate_name, crate_version};

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
