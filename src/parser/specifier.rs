//! Package specifier parser
//!
//! Grammar: optional `dev:` prefix, package name, optional `@version` suffix.
//! - `react`
//! - `react@^18.0.0`
//! - `dev:typescript@next`
//! - `@types/node@20`

use crate::domain::{Failure, Outcome, PackageRequest, DEFAULT_CONSTRAINT};
use crate::output::Reporter;
use regex::Regex;
use std::sync::LazyLock;

/// Prefix marking a single specifier as a dev dependency
pub const DEV_PREFIX: &str = "dev:";

// The name is non-greedy so that only the last `@` starts the version;
// a leading `@` belongs to the scope.
static SPECIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(dev:)?(.+?)(?:@(.+))?$").unwrap());

/// Parse one command-line token into a package request.
///
/// `global_dev` is the value of `-D/--dev`. A `dev:` prefix always makes the
/// request dev; when both are given, an advisory warning is reported.
pub fn parse_specifier(
    token: &str,
    global_dev: bool,
    reporter: &dyn Reporter,
) -> Outcome<PackageRequest> {
    let is_dev = if token.starts_with(DEV_PREFIX) {
        if global_dev {
            reporter.warn("dev: prefix is ignored when -D or --dev is specified");
        }
        true
    } else {
        global_dev
    };

    let Some(captures) = SPECIFIER_RE.captures(token) else {
        return Err(Failure::new(format!("Invalid package name: {}", token)));
    };

    let name = captures.get(2).map_or("", |m| m.as_str());
    let constraint = captures.get(3).map_or(DEFAULT_CONSTRAINT, |m| m.as_str());

    Ok(PackageRequest::new(name, is_dev, constraint))
}

/// Parse every token, keeping input order
pub fn parse_specifiers(
    tokens: &[String],
    global_dev: bool,
    reporter: &dyn Reporter,
) -> Vec<Outcome<PackageRequest>> {
    tokens
        .iter()
        .map(|token| parse_specifier(token, global_dev, reporter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TextReporter;

    fn parse(token: &str, global_dev: bool) -> (Outcome<PackageRequest>, String) {
        let reporter = TextReporter::buffered();
        let result = parse_specifier(token, global_dev, &reporter);
        (result, reporter.output())
    }

    #[test]
    fn test_plain_name_defaults_to_star() {
        let (result, _) = parse("lodash", false);
        let request = result.unwrap();
        assert_eq!(request.name, "lodash");
        assert_eq!(request.constraint, "*");
        assert!(!request.is_dev);
    }

    #[test]
    fn test_name_with_range() {
        let (result, _) = parse("react@^18.2.0", false);
        let request = result.unwrap();
        assert_eq!(request.name, "react");
        assert_eq!(request.constraint, "^18.2.0");
    }

    #[test]
    fn test_name_with_tag() {
        let (result, _) = parse("typescript@next", false);
        assert_eq!(result.unwrap().constraint, "next");
    }

    #[test]
    fn test_scoped_name_without_version() {
        let (result, _) = parse("@types/node", false);
        let request = result.unwrap();
        assert_eq!(request.name, "@types/node");
        assert_eq!(request.constraint, "*");
    }

    #[test]
    fn test_scoped_name_with_version() {
        let (result, _) = parse("@scope/pkg@~1.2", false);
        let request = result.unwrap();
        assert_eq!(request.name, "@scope/pkg");
        assert_eq!(request.constraint, "~1.2");
    }

    #[test]
    fn test_global_dev_flag_applies_without_prefix() {
        let (result, output) = parse("jest", true);
        assert!(result.unwrap().is_dev);
        assert!(output.is_empty());
    }

    #[test]
    fn test_dev_prefix_without_flag() {
        let (result, output) = parse("dev:eslint@^8", false);
        let request = result.unwrap();
        assert!(request.is_dev);
        assert_eq!(request.name, "eslint");
        assert_eq!(request.constraint, "^8");
        assert!(output.is_empty());
    }

    #[test]
    fn test_dev_prefix_with_flag_warns() {
        let (result, output) = parse("dev:eslint@^8", true);
        assert!(result.unwrap().is_dev);
        assert_eq!(
            output,
            "!) dev: prefix is ignored when -D or --dev is specified\n"
        );
    }

    #[test]
    fn test_dev_prefix_scoped() {
        let (result, _) = parse("dev:@types/react@18", false);
        let request = result.unwrap();
        assert_eq!(request.name, "@types/react");
        assert_eq!(request.constraint, "18");
        assert!(request.is_dev);
    }

    #[test]
    fn test_empty_token_is_invalid() {
        let (result, _) = parse("", false);
        assert_eq!(result.unwrap_err().message(), "Invalid package name: ");
    }

    #[test]
    fn test_parse_specifiers_keeps_order() {
        let reporter = TextReporter::buffered();
        let tokens = vec!["b".to_string(), String::new(), "a@1".to_string()];
        let outcomes = parse_specifiers(&tokens, false, &reporter);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].as_ref().unwrap().name, "b");
        assert!(outcomes[1].is_err());
        assert_eq!(outcomes[2].as_ref().unwrap().constraint, "1");
    }
}
