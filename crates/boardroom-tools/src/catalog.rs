//! The fixed set of document generators offered to users.

use boardroom_core::ToolKind;

use crate::error::ToolError;

/// Every generator, in display order.
pub fn catalog() -> &'static [ToolKind] {
    &ToolKind::ALL
}

/// Resolve a slug or display name to its generator.
pub fn lookup(name: &str) -> Result<ToolKind, ToolError> {
    name.parse::<ToolKind>()
        .map_err(|_| ToolError::UnknownTool(name.trim().to_string()))
}
