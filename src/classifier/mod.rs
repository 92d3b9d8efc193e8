//! Classification rule engine.
//!
//! Rules are evaluated in a fixed order and the first matching branch
//! decides the category:
//!
//! 1. any platform dependency: `PlatformUi` with a UI signal, else `PlatformLogic`
//! 2. any host-runtime dependency: `PlatformUncommittedLibrary`
//! 3. first dependency is adaptable: `AdaptableLibrary`
//! 4. any UI signal: `CommonUi`
//! 5. otherwise `CommonLogic`
//!
//! A UI signal is a UI marker annotation, a view-like supertype, or a
//! dependency that [`RuleTable::is_ui`] accepts.

pub mod rules;

pub use rules::RuleTable;

use crate::core::{Category, DependencyId, SourceDeclaration, StructuralFlags};
use serde::Serialize;

/// Category plus the reasons that led to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub category: Category,
    pub reasons: Vec<String>,
}

/// A declaration together with its classification.
#[derive(Debug, Clone)]
pub struct ClassificationResult<'a> {
    pub declaration: SourceDeclaration<'a>,
    pub category: Category,
    pub reasons: Vec<String>,
}

pub struct Classifier<'r> {
    rules: &'r RuleTable,
}

impl<'r> Classifier<'r> {
    pub fn new(rules: &'r RuleTable) -> Self {
        Self { rules }
    }

    pub fn classify<'a>(&self, declaration: SourceDeclaration<'a>) -> ClassificationResult<'a> {
        let Decision { category, reasons } =
            self.categorize(declaration.dependencies(), declaration.flags());
        ClassificationResult {
            declaration,
            category,
            reasons,
        }
    }

    pub fn classify_all<'a>(
        &self,
        declarations: Vec<SourceDeclaration<'a>>,
    ) -> Vec<ClassificationResult<'a>> {
        declarations.into_iter().map(|d| self.classify(d)).collect()
    }

    /// Apply the rule order to a dependency list (first occurrence first)
    /// and structural flags.
    pub fn categorize(&self, dependencies: &[DependencyId], flags: StructuralFlags) -> Decision {
        let rules = self.rules;

        let platform_hit = dependencies
            .iter()
            .find_map(|dep| rules.platform_match(dep).map(|prefix| (dep, prefix)));
        if let Some((dep, prefix)) = platform_hit {
            let mut reasons = vec![format!("platform dependency {dep} (matches {prefix})")];
            let ui_reasons = self.ui_signals(dependencies, flags);
            let category = if ui_reasons.is_empty() {
                Category::PlatformLogic
            } else {
                reasons.extend(ui_reasons);
                Category::PlatformUi
            };
            return Decision { category, reasons };
        }

        let host_hit = dependencies
            .iter()
            .find_map(|dep| rules.host_runtime_match(dep).map(|prefix| (dep, prefix)));
        if let Some((dep, prefix)) = host_hit {
            return Decision {
                category: Category::PlatformUncommittedLibrary,
                reasons: vec![format!("host runtime dependency {dep} (matches {prefix})")],
            };
        }

        if let Some(first) = dependencies.first() {
            if let Some(prefix) = rules.adaptable_match(first) {
                return Decision {
                    category: Category::AdaptableLibrary,
                    reasons: vec![format!(
                        "first dependency {first} has a multiplatform equivalent (matches {prefix})"
                    )],
                };
            }
        }

        let ui_reasons = self.ui_signals(dependencies, flags);
        if !ui_reasons.is_empty() {
            return Decision {
                category: Category::CommonUi,
                reasons: ui_reasons,
            };
        }

        let reason = if dependencies.is_empty() {
            "no external dependencies".to_string()
        } else {
            format!(
                "no platform, host runtime or UI dependency among {} import(s)",
                dependencies.len()
            )
        };
        Decision {
            category: Category::CommonLogic,
            reasons: vec![reason],
        }
    }

    fn ui_signals(&self, dependencies: &[DependencyId], flags: StructuralFlags) -> Vec<String> {
        let mut reasons = Vec::new();
        if flags.ui_annotated {
            reasons.push("annotated with a UI marker".to_string());
        }
        if flags.extends_view_like_base {
            reasons.push("extends a view-like base type".to_string());
        }
        if let Some(dep) = dependencies.iter().find(|dep| self.rules.is_ui(dep)) {
            reasons.push(format!("UI dependency {dep}"));
        }
        reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn deps(names: &[&str]) -> Vec<DependencyId> {
        names.iter().map(|n| DependencyId::new(*n)).collect()
    }

    fn categorize(names: &[&str], flags: StructuralFlags) -> Decision {
        let rules = RuleTable::default();
        Classifier::new(&rules).categorize(&deps(names), flags)
    }

    const NO_FLAGS: StructuralFlags = StructuralFlags {
        ui_annotated: false,
        extends_view_like_base: false,
    };

    #[test]
    fn test_no_dependencies_is_common_logic() {
        let decision = categorize(&[], NO_FLAGS);
        assert_eq!(decision.category, Category::CommonLogic);
        assert_eq!(decision.reasons, vec!["no external dependencies"]);
    }

    #[test]
    fn test_platform_wins_over_host_runtime() {
        let decision = categorize(&["java.io.File", "android.content.Context"], NO_FLAGS);
        assert_eq!(decision.category, Category::PlatformLogic);
        assert!(decision.reasons[0].contains("android.content.Context"));
    }

    #[test]
    fn test_platform_with_ui_dependency_is_platform_ui() {
        let decision = categorize(&["android.widget.TextView"], NO_FLAGS);
        assert_eq!(decision.category, Category::PlatformUi);
        assert!(decision
            .reasons
            .iter()
            .any(|r| r == "UI dependency android.widget.TextView"));
    }

    #[test]
    fn test_blacklisted_platform_dependency_stays_logic() {
        let decision = categorize(&["android.app.NotificationManager"], NO_FLAGS);
        assert_eq!(decision.category, Category::PlatformLogic);
    }

    #[test]
    fn test_view_like_base_from_platform_import_is_platform_ui() {
        let flags = StructuralFlags {
            ui_annotated: false,
            extends_view_like_base: true,
        };
        let decision = categorize(&["com.google.android.gms.maps.MapView"], flags);
        assert_eq!(decision.category, Category::PlatformUi);
    }

    #[test]
    fn test_host_runtime_dependency() {
        let decision = categorize(&["kotlin.math.abs", "okhttp3.OkHttpClient"], NO_FLAGS);
        assert_eq!(decision.category, Category::PlatformUncommittedLibrary);
    }

    #[test]
    fn test_adaptable_first_dependency() {
        let decision = categorize(&["java.util.ArrayList", "kotlin.math.max"], NO_FLAGS);
        assert_eq!(decision.category, Category::AdaptableLibrary);
    }

    #[test]
    fn test_adaptable_only_checks_first_dependency() {
        let decision = categorize(&["com.example.Model", "kotlin.math.max"], NO_FLAGS);
        assert_eq!(decision.category, Category::CommonLogic);
    }

    #[test]
    fn test_compose_without_platform_is_common_ui() {
        let flags = StructuralFlags {
            ui_annotated: true,
            extends_view_like_base: false,
        };
        let decision = categorize(&[], flags);
        assert_eq!(decision.category, Category::CommonUi);
        assert_eq!(decision.reasons, vec!["annotated with a UI marker"]);
    }

    #[test]
    fn test_every_decision_has_reasons() {
        for names in [
            &[][..],
            &["android.os.Bundle"][..],
            &["java.net.URL"][..],
            &["kotlin.collections.List"][..],
            &["com.example.Thing"][..],
        ] {
            assert!(!categorize(names, NO_FLAGS).reasons.is_empty());
        }
    }
}
