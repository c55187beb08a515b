//! Centralized rule IDs and categories for sharplint.

/// Naming: boolean variable declared with a `not` prefix (`bool notReady`)
pub const RULE_ID_NEGATED_BOOL: &str = "SL-N001";

/// Code style: `.ToString()` on a class without a `ToString` method in its chain
pub const RULE_ID_MISSING_TO_STRING: &str = "SL-S001";

/// Category for naming conventions.
pub const CAT_NAMING: &str = "Naming";
/// Category for code style conventions.
pub const CAT_CODE_STYLE: &str = "CodeStyle";

/// Severity used by every built-in rule.
pub const SEVERITY_WARNING: &str = "WARNING";

/// All built-in rule IDs, in registration order.
pub const ALL_RULE_IDS: &[&str] = &[RULE_ID_NEGATED_BOOL, RULE_ID_MISSING_TO_STRING];
