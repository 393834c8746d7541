//! Helpers shared by the `classhub-cli` commands.

use classhub_models::UserRole;

/// Parses a role argument. `none` clears the role.
pub fn parse_role_arg(value: &str) -> Result<Option<UserRole>, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" | "null" | "" => Ok(None),
        other => other.parse::<UserRole>().map(Some),
    }
}

pub fn describe_role(role: Option<UserRole>) -> &'static str {
    role.map_or("none", |r| r.as_str())
}
