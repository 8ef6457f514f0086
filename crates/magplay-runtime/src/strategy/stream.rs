//! Buffered-stream strategies.
//!
//! The same streaming tool can be reachable two ways: as a command on the
//! search path, or only as a script under the package manager's global
//! root. The primary form tries both tiers; the alternate form re-resolves
//! from the package root alone and runs the script through the interpreter.

use async_trait::async_trait;

use magplay_core::{
    Invocation, PlaybackRequest, ResolutionError, ServiceConfig, StrategyKind, ToolLocator,
};

use super::PlaybackStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamForm {
    Primary,
    Alternate,
}

/// Streams the link through the buffered-stream tool, which hands it on
/// to the player.
#[derive(Debug, Clone)]
pub struct StreamStrategy {
    form: StreamForm,
    tool: String,
    buffer_kb: u32,
    meta_title: String,
}

impl StreamStrategy {
    /// Search path first, then package root.
    pub fn primary(config: &ServiceConfig) -> Self {
        Self::with_form(StreamForm::Primary, config)
    }

    /// Package root only, run through the interpreter.
    pub fn alternate(config: &ServiceConfig) -> Self {
        Self::with_form(StreamForm::Alternate, config)
    }

    fn with_form(form: StreamForm, config: &ServiceConfig) -> Self {
        Self {
            form,
            tool: config.stream.tool.clone(),
            buffer_kb: config.stream.buffer_kb,
            meta_title: config.meta_title.clone(),
        }
    }
}

#[async_trait]
impl PlaybackStrategy for StreamStrategy {
    fn kind(&self) -> StrategyKind {
        match self.form {
            StreamForm::Primary => StrategyKind::BufferedStream,
            StreamForm::Alternate => StrategyKind::AlternateBufferedStream,
        }
    }

    async fn resolve(&self, locator: &dyn ToolLocator) -> Result<Invocation, ResolutionError> {
        match self.form {
            StreamForm::Primary => locator.locate(&self.tool).await,
            StreamForm::Alternate => locator.locate_in_package_root(&self.tool).await,
        }
    }

    fn arguments(&self, request: &PlaybackRequest) -> Vec<String> {
        vec![
            request.link().to_string(),
            "--vlc".to_string(),
            format!("--buffer={}", self.buffer_kb),
            // Everything after `--` is forwarded to the player.
            "--".to_string(),
            "--play-and-exit".to_string(),
            format!("--meta-title={}", self.meta_title),
        ]
    }

    fn on_launch_failure(&self, locator: &dyn ToolLocator) {
        locator.invalidate(&self.tool);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forms_map_to_distinct_kinds() {
        let config = ServiceConfig::with_defaults();
        assert_eq!(StreamStrategy::primary(&config).kind(), StrategyKind::BufferedStream);
        assert_eq!(
            StreamStrategy::alternate(&config).kind(),
            StrategyKind::AlternateBufferedStream
        );
    }

    #[test]
    fn arguments_follow_tool_cli_contract() {
        let config = ServiceConfig::with_defaults();
        let request = PlaybackRequest::parse(Some("magnet:?xt=urn:btih:abc")).unwrap();

        let args = StreamStrategy::primary(&config).arguments(&request);

        assert_eq!(
            args,
            vec![
                "magnet:?xt=urn:btih:abc",
                "--vlc",
                "--buffer=1024",
                "--",
                "--play-and-exit",
                "--meta-title=Jackett",
            ]
        );
    }
}
