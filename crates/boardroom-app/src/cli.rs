//! CLI argument definitions for the Boardroom binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use boardroom_core::{BoardroomConfig, ToolKind};

/// Boardroom: a business-advisory assistant in the terminal.
#[derive(Parser, Debug)]
#[command(name = "boardroom", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Model identifier, overriding the config file.
    #[arg(short = 'm', long = "model", global = true)]
    pub model: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Start an interactive advisory chat.
    Chat,
    /// Generate one document with a tool.
    Generate {
        /// Tool slug or name (see `boardroom tools`).
        #[arg(short = 't', long = "tool", default_value = "business-plan", value_parser = parse_tool)]
        tool: ToolKind,

        /// Business context the document is built from.
        #[arg(long = "context")]
        context: String,

        /// Write the markdown document to this file instead of stdout.
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// List the available tools.
    Tools,
}

fn parse_tool(value: &str) -> Result<ToolKind, String> {
    value.parse()
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > BOARDROOM_CONFIG env var > ~/.boardroom/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("BOARDROOM_CONFIG") {
            if !p.trim().is_empty() {
                return PathBuf::from(p);
            }
        }
        default_config_path()
    }

    /// Resolve the log level: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Apply command-line overrides to a loaded config.
    pub fn apply_overrides(&self, config: &mut BoardroomConfig) {
        if let Some(ref model) = self.model {
            config.generation.model = model.clone();
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".boardroom").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".boardroom").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_with_global_flags() {
        let args = CliArgs::try_parse_from([
            "boardroom",
            "chat",
            "--model",
            "gemini-2.5-pro",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.command, Command::Chat);
        assert_eq!(args.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(args.resolve_log_level("info"), "debug");
    }

    #[test]
    fn test_parse_generate() {
        let args = CliArgs::try_parse_from([
            "boardroom",
            "generate",
            "--tool",
            "swot-analysis",
            "--context",
            "Company X, SaaS, Series A",
            "-o",
            "swot.md",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Command::Generate {
                tool: ToolKind::SwotAnalysis,
                context: "Company X, SaaS, Series A".to_string(),
                output: Some(PathBuf::from("swot.md")),
            }
        );
    }

    #[test]
    fn test_generate_defaults_to_business_plan() {
        let args =
            CliArgs::try_parse_from(["boardroom", "generate", "--context", "Bakery"]).unwrap();
        match args.command {
            Command::Generate { tool, output, .. } => {
                assert_eq!(tool, ToolKind::BusinessPlan);
                assert!(output.is_none());
            }
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tool_rejected() {
        let result = CliArgs::try_parse_from([
            "boardroom",
            "generate",
            "--tool",
            "pitch-deck",
            "--context",
            "x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_flag_wins() {
        let args =
            CliArgs::try_parse_from(["boardroom", "--config", "/tmp/custom.toml", "tools"])
                .unwrap();
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn test_log_level_falls_back_to_config() {
        let args = CliArgs::try_parse_from(["boardroom", "tools"]).unwrap();
        assert_eq!(args.resolve_log_level("warn"), "warn");
    }

    #[test]
    fn test_apply_overrides() {
        let args =
            CliArgs::try_parse_from(["boardroom", "-m", "gemini-2.5-pro", "chat"]).unwrap();
        let mut config = BoardroomConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.generation.model, "gemini-2.5-pro");
        assert_eq!(config.general.log_level, "info");
    }
}
