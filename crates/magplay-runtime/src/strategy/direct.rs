//! Direct player strategy, the end of every chain.

use async_trait::async_trait;
use std::path::PathBuf;

use magplay_core::{
    Invocation, PlaybackRequest, ResolutionError, ServiceConfig, StrategyKind, ToolLocator,
};

use super::PlaybackStrategy;

/// Opens the link straight in the configured player.
///
/// The player path comes from configuration and is not probed; if it is
/// wrong the spawn fails and that failure is final.
#[derive(Debug, Clone)]
pub struct DirectPlayerStrategy {
    player_path: PathBuf,
    meta_title: String,
}

impl DirectPlayerStrategy {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            player_path: config.player_path.clone(),
            meta_title: config.meta_title.clone(),
        }
    }
}

#[async_trait]
impl PlaybackStrategy for DirectPlayerStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DirectPlayer
    }

    async fn resolve(&self, _locator: &dyn ToolLocator) -> Result<Invocation, ResolutionError> {
        Ok(Invocation::direct(self.player_path.to_string_lossy()))
    }

    fn arguments(&self, request: &PlaybackRequest) -> Vec<String> {
        vec![
            request.link().to_string(),
            "--play-and-exit".to_string(),
            format!("--meta-title={}", self.meta_title),
            "--intf=dummy".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_suppress_player_interface() {
        let config = ServiceConfig::with_defaults().with_player_path("/usr/bin/vlc");
        let request = PlaybackRequest::parse(Some("magnet:?xt=urn:btih:abc")).unwrap();

        let strategy = DirectPlayerStrategy::new(&config);

        assert_eq!(strategy.kind(), StrategyKind::DirectPlayer);
        assert_eq!(
            strategy.arguments(&request),
            vec![
                "magnet:?xt=urn:btih:abc",
                "--play-and-exit",
                "--meta-title=Jackett",
                "--intf=dummy",
            ]
        );
    }
}
