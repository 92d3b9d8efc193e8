//! Dependency snippets for `build.gradle.kts`, inferred from imports.

use std::collections::BTreeSet;

pub const COMMON_SNIPPET_FILE: &str = "common-deps-snippet.gradle.kts";
pub const ANDROID_SNIPPET_FILE: &str = "android-deps-snippet.gradle.kts";

/// Import prefix -> version catalog accessor
const CATALOG_MAPPING: &[(&str, &str)] = &[
    ("kotlinx.coroutines", "libs.kotlinx.coroutines.core"),
    ("kotlinx.serialization", "libs.kotlinx.serialization.json"),
    ("androidx.activity", "libs.androidx.activity"),
    ("androidx.compose.ui", "libs.androidx.compose.ui"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradleSnippets {
    pub common: BTreeSet<&'static str>,
    pub android: BTreeSet<&'static str>,
}

impl GradleSnippets {
    pub fn from_imports<'i>(imports: impl IntoIterator<Item = &'i str>) -> Self {
        let mut snippets = Self::default();
        for import in imports {
            for (prefix, accessor) in CATALOG_MAPPING {
                if !import.starts_with(prefix) {
                    continue;
                }
                if prefix.starts_with("android") {
                    snippets.android.insert(accessor);
                } else {
                    snippets.common.insert(accessor);
                }
            }
        }
        snippets
    }

    pub fn render_common(&self) -> String {
        render(&self.common)
    }

    pub fn render_android(&self) -> String {
        render(&self.android)
    }
}

fn render(accessors: &BTreeSet<&'static str>) -> String {
    let mut out = String::from(
        "// Generated by kmpmap: review before copying into build.gradle.kts\ndependencies {\n",
    );
    for accessor in accessors {
        out.push_str(&format!("    implementation({accessor})\n"));
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_between_common_and_android() {
        let snippets = GradleSnippets::from_imports([
            "kotlinx.coroutines.flow.Flow",
            "kotlinx.coroutines.launch",
            "androidx.compose.ui.Modifier",
            "java.io.File",
        ]);
        assert_eq!(
            snippets.common.iter().copied().collect::<Vec<_>>(),
            vec!["libs.kotlinx.coroutines.core"]
        );
        assert_eq!(
            snippets.android.iter().copied().collect::<Vec<_>>(),
            vec!["libs.androidx.compose.ui"]
        );
    }

    #[test]
    fn test_render_empty_block() {
        let rendered = GradleSnippets::default().render_common();
        assert!(rendered.ends_with("dependencies {\n}\n"));
    }

    #[test]
    fn test_render_lists_accessors() {
        let snippets = GradleSnippets::from_imports(["androidx.activity.ComponentActivity"]);
        assert!(snippets
            .render_android()
            .contains("    implementation(libs.androidx.activity)\n"));
    }
}
