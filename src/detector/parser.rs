//! Permission extraction from inspection tool output

use regex::Regex;

use crate::core::{GuardResult, Permission};

/// Matches `permission:` or `uses-permission:` followed by a qualified name
///
/// The name needs at least two dot-separated segments; anything else on the
/// line is skipped.
const PERMISSION_PATTERN: &str = r#"(?:uses-)?permission:\s.*?((?:[^'"\s.]+\.)+[^'"\s.]+)"#;

/// Extracts permissions from individual output lines
#[derive(Debug, Clone)]
pub struct PermissionParser {
    pattern: Regex,
}

impl PermissionParser {
    /// Create a parser with the standard pattern
    pub fn new() -> GuardResult<Self> {
        Ok(Self {
            pattern: Regex::new(PERMISSION_PATTERN)?,
        })
    }

    /// Extract the permission declared on a line, if any
    pub fn parse_line(&self, line: &str) -> Option<Permission> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| Permission::new(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<String> {
        PermissionParser::new()
            .unwrap()
            .parse_line(line)
            .map(|p| p.name().to_string())
    }

    #[test]
    fn test_uses_permission_with_quoted_name() {
        assert_eq!(
            parse("uses-permission: name='android.permission.CAMERA'"),
            Some("android.permission.CAMERA".to_string())
        );
        assert_eq!(
            parse("uses-permission: name='android.permission.WRITE_EXTERNAL_STORAGE' maxSdkVersion='18'"),
            Some("android.permission.WRITE_EXTERNAL_STORAGE".to_string())
        );
    }

    #[test]
    fn test_bare_permission_lines() {
        assert_eq!(
            parse("uses-permission: android.permission.INTERNET"),
            Some("android.permission.INTERNET".to_string())
        );
        assert_eq!(
            parse("permission: com.example.app.permission.C2D_MESSAGE"),
            Some("com.example.app.permission.C2D_MESSAGE".to_string())
        );
        assert_eq!(
            parse(r#"permission: name="com.example.READ""#),
            Some("com.example.READ".to_string())
        );
    }

    #[test]
    fn test_first_qualified_name_wins() {
        assert_eq!(
            parse("permission: foo.bar 'baz.qux'"),
            Some("foo.bar".to_string())
        );
        assert_eq!(
            parse(r#"permission: foo.bar "baz.qux""#),
            Some("foo.bar".to_string())
        );
    }

    #[test]
    fn test_non_matching_lines() {
        assert_eq!(parse("package: com.example.app"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("uses-feature: name='android.hardware.camera'"), None);
        // Requires whitespace after the colon
        assert_eq!(parse("permission:android.permission.CAMERA"), None);
    }

    #[test]
    fn test_single_segment_names_are_skipped() {
        assert_eq!(parse("uses-permission: name='CAMERA'"), None);
    }
}
