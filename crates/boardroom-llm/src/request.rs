//! Backend-neutral request shape.

use boardroom_core::config::GenerationConfig;
use boardroom_core::{HistoryEntry, Role};
use serde::{Deserialize, Serialize};

/// Sampling parameters shared by every request of one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingSettings {
    pub model: String,
    pub temperature: f64,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
        }
    }
}

impl From<&GenerationConfig> for SamplingSettings {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

/// One call to a text backend: instruction, prior turns, and the new prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub sampling: SamplingSettings,
    /// Prior turns in transcript order. Empty for single-shot requests.
    pub history: Vec<HistoryEntry>,
    /// Text of the newest user turn.
    pub prompt: String,
}

impl GenerationRequest {
    /// Every turn the backend should see, newest last.
    pub fn contents(&self) -> impl Iterator<Item = (Role, &str)> + '_ {
        self.history
            .iter()
            .map(|entry| (entry.role, entry.text.as_str()))
            .chain(std::iter::once((Role::User, self.prompt.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_from_generation_config() {
        let config = GenerationConfig {
            model: "gemini-2.5-pro".to_string(),
            temperature: 0.2,
            ..GenerationConfig::default()
        };
        let sampling = SamplingSettings::from(&config);
        assert_eq!(sampling.model, "gemini-2.5-pro");
        assert!((sampling.temperature - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_contents_appends_prompt_after_history() {
        let request = GenerationRequest {
            system_instruction: "persona".to_string(),
            sampling: SamplingSettings::default(),
            history: vec![
                HistoryEntry::new(Role::Model, "hello"),
                HistoryEntry::new(Role::User, "first"),
                HistoryEntry::new(Role::Model, "answer"),
            ],
            prompt: "second".to_string(),
        };
        let contents: Vec<(Role, &str)> = request.contents().collect();
        assert_eq!(
            contents,
            vec![
                (Role::Model, "hello"),
                (Role::User, "first"),
                (Role::Model, "answer"),
                (Role::User, "second"),
            ]
        );
    }

    #[test]
    fn test_single_shot_contents() {
        let request = GenerationRequest {
            system_instruction: String::new(),
            sampling: SamplingSettings::default(),
            history: vec![],
            prompt: "only".to_string(),
        };
        assert_eq!(request.contents().count(), 1);
    }

    #[test]
    fn test_default_sampling() {
        let sampling = SamplingSettings::default();
        assert_eq!(sampling.model, "gemini-2.5-flash");
        assert!((sampling.temperature - 0.7).abs() < f64::EPSILON);
    }
}
