//! Playback endpoint.

use axum::extract::{Query, State};
use axum::extract::rejection::QueryRejection;
use serde::Deserialize;
use tracing::debug;

use magplay_core::{CoreError, PlaybackRequest};

use crate::error::HttpError;
use crate::state::AppState;

/// Body returned once a request has been handed to the launch chain.
pub const LAUNCHED: &str = "launched";

/// Query parameters for `/play`.
#[derive(Debug, Default, Deserialize)]
pub struct PlayParams {
    pub link: Option<String>,
    /// Older clients send the link under this name.
    pub magnet: Option<String>,
}

impl PlayParams {
    fn link(&self) -> Option<&str> {
        [&self.link, &self.magnet]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }
}

/// Validate the link and dispatch it.
///
/// Answers as soon as the request is dispatched. Whether a player actually
/// starts is only visible through launch events and the log.
pub async fn play(
    State(state): State<AppState>,
    params: Result<Query<PlayParams>, QueryRejection>,
) -> Result<&'static str, HttpError> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            debug!(%rejection, "unparseable query string");
            return Err(HttpError::BadRequest(rejection.body_text()));
        }
    };

    let request = PlaybackRequest::parse(params.link()).map_err(CoreError::from)?;
    let request_id = state.dispatcher.dispatch(request)?;
    debug!(request_id, "playback request accepted");

    Ok(LAUNCHED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_takes_precedence_over_alias() {
        let params = PlayParams {
            link: Some("magnet:?xt=a".into()),
            magnet: Some("magnet:?xt=b".into()),
        };
        assert_eq!(params.link(), Some("magnet:?xt=a"));
    }

    #[test]
    fn empty_link_falls_back_to_alias() {
        let params = PlayParams {
            link: Some(String::new()),
            magnet: Some("magnet:?xt=b".into()),
        };
        assert_eq!(params.link(), Some("magnet:?xt=b"));
        assert_eq!(PlayParams::default().link(), None);
    }
}
