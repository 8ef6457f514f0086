//! Playback dispatcher port, the seam between the HTTP adapter and the
//! launch chain.

use super::CoreError;
use crate::domain::PlaybackRequest;

/// Hands a validated request to the launch chain without waiting for it.
pub trait PlaybackDispatcher: Send + Sync {
    /// Start processing `request` in the background.
    ///
    /// Returns the request id used in launch events. Errors here mean the
    /// request could not even be scheduled; launch outcomes are never
    /// reported through this return value.
    fn dispatch(&self, request: PlaybackRequest) -> Result<u64, CoreError>;
}
