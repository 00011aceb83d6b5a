use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Conversation
// =============================================================================

/// Author of a turn. Serialized with the backend's own role names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a turn within its transcript. Strictly increasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnId(pub u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One message in a chat transcript. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Marks a model turn that reports a failed generation.
    #[serde(default)]
    pub is_error: bool,
}

impl Turn {
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Local wall-clock time of the turn as `HH:MM`.
    pub fn display_time(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }

    /// Project this turn into the `(role, text)` pair sent as history.
    pub fn to_history(&self) -> HistoryEntry {
        HistoryEntry {
            role: self.role,
            text: self.text.clone(),
        }
    }
}

/// A prior turn as the generation backend sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub text: String,
}

impl HistoryEntry {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

// =============================================================================
// Document tools
// =============================================================================

/// The closed set of document generators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    BusinessPlan,
    SwotAnalysis,
    MarketingStrategy,
    MarketResearch,
    EmailDrafter,
}

impl ToolKind {
    /// Every kind, in catalog order.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::BusinessPlan,
        ToolKind::SwotAnalysis,
        ToolKind::MarketingStrategy,
        ToolKind::MarketResearch,
        ToolKind::EmailDrafter,
    ];

    /// Name shown to users and embedded in generation prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::BusinessPlan => "Business Plan Generator",
            ToolKind::SwotAnalysis => "SWOT Analysis",
            ToolKind::MarketingStrategy => "Marketing Strategy Builder",
            ToolKind::MarketResearch => "Market Research Generator",
            ToolKind::EmailDrafter => "Professional Email Drafter",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::BusinessPlan => "Full structured plan with exec summary.",
            ToolKind::SwotAnalysis => "Strengths, Weaknesses, Opps, Threats.",
            ToolKind::MarketingStrategy => "Channels, KPIs and growth tactics.",
            ToolKind::MarketResearch => "Competitor analysis and trends.",
            ToolKind::EmailDrafter => "Professional corporate communication.",
        }
    }

    /// Stable kebab-case identifier for command lines and config.
    pub fn slug(&self) -> &'static str {
        match self {
            ToolKind::BusinessPlan => "business-plan",
            ToolKind::SwotAnalysis => "swot-analysis",
            ToolKind::MarketingStrategy => "marketing-strategy",
            ToolKind::MarketResearch => "market-research",
            ToolKind::EmailDrafter => "email-drafter",
        }
    }

    /// Label of the generate action, e.g. `Generate SWOT`.
    pub fn action_label(&self) -> String {
        let first_word = self
            .display_name()
            .split_whitespace()
            .next()
            .unwrap_or_default();
        format!("Generate {}", first_word)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    /// Accepts either the slug or the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ToolKind::ALL
            .into_iter()
            .find(|kind| {
                kind.slug().eq_ignore_ascii_case(wanted)
                    || kind.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown tool kind: {}", wanted))
    }
}

/// The current output of the document generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub id: Uuid,
    pub tool_kind: ToolKind,
    /// Markdown-formatted document.
    pub content: String,
    pub generated_at: DateTime<Utc>,
}

impl ToolResult {
    pub fn new(tool_kind: ToolKind, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool_kind,
            content,
            generated_at: Utc::now(),
        }
    }

    /// Standalone markdown document suitable for saving to disk.
    pub fn to_export_document(&self) -> String {
        format!(
            "# {}\n\n_Generated {}_\n\n{}\n",
            self.tool_kind.display_name(),
            self.generated_at.format("%Y-%m-%d %H:%M UTC"),
            self.content.trim_end()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_turn(role: Role, text: &str) -> Turn {
        Turn {
            id: TurnId(7),
            role,
            text: text.to_string(),
            created_at: Utc::now(),
            is_error: false,
        }
    }

    #[test]
    fn test_role_serializes_as_backend_names() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
        assert_eq!(Role::Model.to_string(), "model");
    }

    #[test]
    fn test_turn_ids_order() {
        assert!(TurnId(1) < TurnId(2));
        assert_eq!(TurnId(3).to_string(), "3");
    }

    #[test]
    fn test_turn_to_history_keeps_role_and_text() {
        let turn = make_turn(Role::User, "  spaced  text ");
        let entry = turn.to_history();
        assert_eq!(entry, HistoryEntry::new(Role::User, "  spaced  text "));
        assert!(turn.is_user());
    }

    #[test]
    fn test_turn_display_time_format() {
        let turn = make_turn(Role::Model, "hi");
        let shown = turn.display_time();
        assert_eq!(shown.len(), 5);
        assert_eq!(&shown[2..3], ":");
    }

    #[test]
    fn test_turn_is_error_defaults_false_when_missing() {
        let json = r#"{"id":1,"role":"model","text":"hi","created_at":"2024-01-01T00:00:00Z"}"#;
        let turn: Turn = serde_json::from_str(json).unwrap();
        assert!(!turn.is_error);
    }

    #[test]
    fn test_tool_kind_display_names() {
        let names: Vec<&str> = ToolKind::ALL.iter().map(|k| k.display_name()).collect();
        assert_eq!(
            names,
            vec![
                "Business Plan Generator",
                "SWOT Analysis",
                "Marketing Strategy Builder",
                "Market Research Generator",
                "Professional Email Drafter",
            ]
        );
        assert_eq!(ToolKind::default(), ToolKind::BusinessPlan);
    }

    #[test]
    fn test_tool_kind_action_labels() {
        assert_eq!(ToolKind::BusinessPlan.action_label(), "Generate Business");
        assert_eq!(ToolKind::SwotAnalysis.action_label(), "Generate SWOT");
        assert_eq!(ToolKind::EmailDrafter.action_label(), "Generate Professional");
    }

    #[test]
    fn test_tool_kind_from_str() {
        assert_eq!("swot-analysis".parse::<ToolKind>(), Ok(ToolKind::SwotAnalysis));
        assert_eq!(
            "market research generator".parse::<ToolKind>(),
            Ok(ToolKind::MarketResearch)
        );
        assert_eq!(" EMAIL-DRAFTER ".parse::<ToolKind>(), Ok(ToolKind::EmailDrafter));
        assert!("pitch-deck".parse::<ToolKind>().is_err());
    }

    #[test]
    fn test_tool_kind_slugs_are_unique() {
        for (i, a) in ToolKind::ALL.iter().enumerate() {
            for b in ToolKind::ALL.iter().skip(i + 1) {
                assert_ne!(a.slug(), b.slug());
            }
        }
    }

    #[test]
    fn test_tool_result_export_document() {
        let result = ToolResult {
            id: Uuid::nil(),
            tool_kind: ToolKind::SwotAnalysis,
            content: "## SWOT\n- Strength\n\n".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
        };
        assert_eq!(
            result.to_export_document(),
            "# SWOT Analysis\n\n_Generated 2024-03-05 14:30 UTC_\n\n## SWOT\n- Strength\n"
        );
    }

    #[test]
    fn test_tool_result_new_assigns_fresh_ids() {
        let a = ToolResult::new(ToolKind::BusinessPlan, "a".to_string());
        let b = ToolResult::new(ToolKind::BusinessPlan, "b".to_string());
        assert_ne!(a.id, b.id);
    }
}
