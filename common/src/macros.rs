//! Small helper macros.
//!

/// Build a `PathBuf` from a list of components.
///
/// ```
/// use std::path::PathBuf;
/// use locmap_common::makepath;
///
/// let p: PathBuf = makepath!("/home", ".config", "locmap");
/// assert_eq!(PathBuf::from("/home/.config/locmap"), p);
/// ```
///
#[macro_export]
macro_rules! makepath {
    ($($item:expr),+ $(,)?) => {{
        let mut path = ::std::path::PathBuf::new();
        $(path.push($item);)+
        path
    }};
}
