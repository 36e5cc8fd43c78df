//! State of the one fetch we do at startup.
//!

use serde::Serialize;
use strum::{Display, EnumString};

/// Drives what the panel shows: a loading indicator or the list.
///
/// Only two transitions exist: `Pending -> Loaded` and `Pending -> Failed`.
///
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum FetchState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

impl FetchState {
    #[inline]
    pub fn is_pending(&self) -> bool {
        *self == FetchState::Pending
    }

    /// Move out of `Pending` depending on the fetch result, later results are ignored.
    ///
    pub fn complete<T, E>(&mut self, res: &Result<T, E>) -> FetchState {
        if self.is_pending() {
            *self = FetchState::from(res);
        }
        *self
    }
}

impl<T, E> From<&Result<T, E>> for FetchState {
    fn from(value: &Result<T, E>) -> Self {
        match value {
            Ok(_) => FetchState::Loaded,
            Err(_) => FetchState::Failed,
        }
    }
}
