//! Define our own macro to simplify the code
//!

/// Call the HTTP client with the proper arguments
///
/// - unauth GET call, we want JSON back
///
/// Needs `clap::{crate_name, crate_version}` in scope.
///
#[macro_export]
macro_rules! http_get {
    ($self:ident, $url:expr) => {
        $self
            .client
            .get($url)
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .header("accept", "application/json")
            .send()
    };
}
