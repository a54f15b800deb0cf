//! Summary of installed packages

use crate::domain::{ResolvedPackage, TypesCompanion};
use crate::output::Severity;

/// One line of the install summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub severity: Severity,
    pub text: String,
}

impl SummaryLine {
    fn info(text: String) -> Self {
        Self {
            severity: Severity::Info,
            text,
        }
    }

    fn warning(text: String) -> Self {
        Self {
            severity: Severity::Warning,
            text,
        }
    }
}

/// Build the summary, production packages first, then dev packages, each by name.
///
/// In a typed project an untyped package is shown with its companion, or with a
/// `(not typed)` warning when no companion was found.
pub fn summary_lines(
    resolved: &[ResolvedPackage],
    companions: &[TypesCompanion],
    typed_project: bool,
) -> Vec<SummaryLine> {
    let mut ordered: Vec<&ResolvedPackage> = resolved.iter().collect();
    ordered.sort_by(|a, b| a.is_dev.cmp(&b.is_dev).then_with(|| a.name.cmp(&b.name)));

    ordered
        .into_iter()
        .map(|package| {
            if package.typed || !typed_project {
                return SummaryLine::info(format!("  {}", package));
            }
            match companions.iter().find(|c| c.subject == package.name) {
                Some(companion) => SummaryLine::info(format!("  {} + {}", package, companion)),
                None => SummaryLine::warning(format!("  {} (not typed)", package)),
            }
        })
        .collect()
}
