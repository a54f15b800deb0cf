//! npm version ranges on top of the `semver` crate
//!
//! `semver::VersionReq` follows Cargo's rules, which differ from npm's in a few
//! places: a bare `1.2.3` is a caret requirement, comparators are separated by
//! commas, and there is no `||` or hyphen syntax. [`NpmRange`] translates npm
//! syntax into one `VersionReq` per `||` alternative:
//! - `1.2.3`, `1.2`, `1.x`, `*` → exact / partial matches
//! - `>= 2.1.2 < 3.0.0` → `>=2.1.2, <3.0.0`
//! - `1.0.0 - 2.0.0` → `>=1.0.0, <=2.0.0`
//! - `^1.0.0 || ^2.0.0` → two alternatives
//!
//! Prerelease handling is the same in both worlds: a prerelease only matches a
//! comparator set naming a prerelease of the same `major.minor.patch`.

use crate::domain::SemanticVersion;
use semver::{Version, VersionReq};
use thiserror::Error;

/// Error for strings that are not npm ranges (e.g. dist-tags like `next`)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version range '{range}': {message}")]
pub struct RangeError {
    pub range: String,
    pub message: String,
}

/// Operators in matching order; longer prefixes first
const OPERATORS: &[&str] = &[">=", "<=", "~>", ">", "<", "=", "^", "~"];

/// Matches nothing: no version precedes `0.0.0-0`
const NOTHING: &str = "<0.0.0-0";

/// A parsed npm range: a version satisfies it if any alternative matches
#[derive(Debug, Clone)]
pub struct NpmRange {
    alternatives: Vec<VersionReq>,
}

impl NpmRange {
    /// Parse an npm range
    pub fn parse(input: &str) -> Result<Self, RangeError> {
        let alternatives = input
            .split("||")
            .map(|alternative| parse_comparator_set(alternative.trim()))
            .collect::<Result<Vec<_>, String>>()
            .map_err(|message| RangeError {
                range: input.to_string(),
                message,
            })?;

        Ok(Self { alternatives })
    }

    /// Returns true if the string is an npm range rather than a tag name
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Check whether a version satisfies the range
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }

    /// The highest version satisfying the range
    pub fn max_satisfying<'a, I>(&self, versions: I) -> Option<&'a SemanticVersion>
    where
        I: IntoIterator<Item = &'a SemanticVersion>,
    {
        versions
            .into_iter()
            .filter(|v| self.matches(v.version()))
            .max()
    }
}

/// Parse one `||` alternative into a Cargo-style requirement
fn parse_comparator_set(set: &str) -> Result<VersionReq, String> {
    if set.is_empty() {
        return Ok(VersionReq::STAR);
    }

    let comparators = if let Some((lower, upper)) = set.split_once(" - ") {
        hyphen_comparators(lower.trim(), upper.trim())?
    } else {
        let mut comparators = Vec::new();
        for token in join_operators(set) {
            if let Some(comparator) = convert_comparator(&token)? {
                comparators.push(comparator);
            }
        }
        comparators
    };

    if comparators.is_empty() {
        return Ok(VersionReq::STAR);
    }

    VersionReq::parse(&comparators.join(", ")).map_err(|e| e.to_string())
}

/// `1.2.3 - 2.3.4` is inclusive on both ends; partial bounds widen the range
fn hyphen_comparators(lower: &str, upper: &str) -> Result<Vec<String>, String> {
    let mut comparators = Vec::new();
    if let Some(lower) = normalize_version(lower)? {
        comparators.push(format!(">={}", lower));
    }
    if let Some(upper) = normalize_version(upper)? {
        comparators.push(format!("<={}", upper));
    }
    Ok(comparators)
}

/// Split on whitespace, re-attaching bare operators to the version that follows
///
/// npm allows `>= 1.2.3`, which splits into `>=` and `1.2.3`.
fn join_operators(set: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut pending = String::new();

    for part in set.split_whitespace() {
        if OPERATORS.contains(&part) {
            pending.push_str(part);
            continue;
        }
        tokens.push(format!("{}{}", pending, part));
        pending.clear();
    }

    if !pending.is_empty() {
        tokens.push(pending);
    }
    tokens
}

/// Convert one npm comparator into Cargo syntax; `None` means "any version"
fn convert_comparator(token: &str) -> Result<Option<String>, String> {
    let (operator, rest) = split_operator(token);
    let Some(version) = normalize_version(rest)? else {
        return Ok(match operator {
            // `<*` and `>*` cannot be satisfied
            "<" | ">" => Some(NOTHING.to_string()),
            _ => None,
        });
    };

    let operator = match operator {
        "" => "=",
        "~>" => "~",
        other => other,
    };
    Ok(Some(format!("{}{}", operator, version)))
}

fn split_operator(token: &str) -> (&str, &str) {
    OPERATORS
        .iter()
        .find_map(|op| token.strip_prefix(op).map(|rest| (*op, rest)))
        .unwrap_or(("", token))
}

/// Strip a `v` prefix and cut the version at its first wildcard component.
///
/// Returns `None` when nothing concrete is left (`*`, `x`, empty).
fn normalize_version(raw: &str) -> Result<Option<String>, String> {
    let raw = raw.trim();
    let raw = raw.strip_prefix('v').unwrap_or(raw);
    let raw = raw.strip_prefix('=').unwrap_or(raw);
    if raw.is_empty() {
        return Ok(None);
    }

    let core_end = raw.find(['-', '+']).unwrap_or(raw.len());
    let (core, suffix) = raw.split_at(core_end);

    let mut kept = Vec::new();
    for component in core.split('.') {
        if matches!(component, "x" | "X" | "*") {
            break;
        }
        if component.is_empty() || !component.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("invalid version component '{}'", component));
        }
        kept.push(component);
    }

    if kept.len() > 3 {
        return Err(format!("too many version components in '{}'", raw));
    }
    if kept.is_empty() {
        return Ok(None);
    }

    // A prerelease only means something on a full version
    let suffix = if kept.len() == 3 { suffix } else { "" };
    Ok(Some(format!("{}{}", kept.join("."), suffix)))
}
