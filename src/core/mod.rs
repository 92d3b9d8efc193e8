pub mod declaration;

pub use declaration::SourceDeclaration;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified, dot-segmented name a declaration depends on
/// (e.g. `android.content.Context`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyId(String);

impl DependencyId {
    pub fn new(fq_name: impl Into<String>) -> Self {
        Self(fq_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// True when this id is `name` itself or a nested member of it
    /// (`android.app.Notification.Builder` is a member of `android.app.Notification`).
    pub fn is_member_of(&self, name: &str) -> bool {
        match self.0.strip_prefix(name) {
            Some("") => true,
            Some(rest) => rest.starts_with('.'),
            None => false,
        }
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DependencyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Syntactic kind of a top-level declaration.
///
/// The set is closed: declarations of any other shape are dropped during
/// signal extraction and never reach classification or generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeclarationKind {
    Function,
    Property,
    Class,
    Interface,
    Object,
    DataClass,
    EnumClass,
}

impl DeclarationKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Function => "FUNCTION",
            Self::Property => "PROPERTY",
            Self::Class => "CLASS",
            Self::Interface => "INTERFACE",
            Self::Object => "OBJECT",
            Self::DataClass => "DATA_CLASS",
            Self::EnumClass => "ENUM_CLASS",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structural signals that mark a declaration as UI code independently of
/// its imports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralFlags {
    /// Carries an annotation from the configured UI marker list (`@Composable`)
    pub ui_annotated: bool,
    /// Extends or implements a view-like base type (`AppCompatActivity`, `RecyclerView.Adapter`)
    pub extends_view_like_base: bool,
}

impl StructuralFlags {
    pub const fn any(self) -> bool {
        self.ui_annotated || self.extends_view_like_base
    }
}

/// Migration category of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Pure Kotlin logic, ready for `commonMain`
    CommonLogic,
    /// UI code with no Android dependency (Compose-only, view-like by shape)
    CommonUi,
    /// Android logic that needs an `expect`/`actual` split
    PlatformLogic,
    /// Android UI that needs an `expect`/`actual` split
    PlatformUi,
    /// JVM platform library with no direct multiplatform substitute
    PlatformUncommittedLibrary,
    /// Depends only on JVM/Kotlin APIs with direct multiplatform equivalents
    AdaptableLibrary,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::CommonLogic,
        Category::CommonUi,
        Category::PlatformLogic,
        Category::PlatformUi,
        Category::PlatformUncommittedLibrary,
        Category::AdaptableLibrary,
    ];

    /// Label used in `migration_report.txt`
    pub const fn label(self) -> &'static str {
        match self {
            Self::CommonLogic => "COMMON_LOGIC",
            Self::CommonUi => "COMMON_UI",
            Self::PlatformLogic => "PLATFORM_LOGIC",
            Self::PlatformUi => "PLATFORM_UI",
            Self::PlatformUncommittedLibrary => "PLATFORM_UNCOMMITTED_LIBRARY",
            Self::AdaptableLibrary => "ADAPTABLE_LIBRARY",
        }
    }

    /// Top-level folder under the output directory
    pub const fn folder(self) -> &'static str {
        match self {
            Self::CommonLogic => "common_logic",
            Self::CommonUi => "common_ui",
            Self::PlatformLogic => "platform_logic",
            Self::PlatformUi => "platform_ui",
            Self::PlatformUncommittedLibrary => "library_substitution",
            Self::AdaptableLibrary => "adaptable_library",
        }
    }

    /// Categories that get an `expect`/`actual` pair instead of a copy
    pub const fn needs_stub_pair(self) -> bool {
        matches!(self, Self::PlatformLogic | Self::PlatformUi)
    }

    pub const fn is_ui(self) -> bool {
        matches!(self, Self::CommonUi | Self::PlatformUi)
    }

    /// Collapse into the four-way taxonomy that ignores the UI/logic split.
    pub const fn coarse(self) -> CoarseCategory {
        match self {
            Self::CommonLogic | Self::CommonUi => CoarseCategory::Common,
            Self::AdaptableLibrary => CoarseCategory::AdaptableJava,
            Self::PlatformUncommittedLibrary => CoarseCategory::JavaPlatform,
            Self::PlatformLogic | Self::PlatformUi => CoarseCategory::AndroidPlatform,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Four-way dependency taxonomy without the UI/logic split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoarseCategory {
    Common,
    AdaptableJava,
    JavaPlatform,
    AndroidPlatform,
}

impl CoarseCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::AdaptableJava => "ADAPTABLE_JAVA",
            Self::JavaPlatform => "JAVA_PLATFORM",
            Self::AndroidPlatform => "ANDROID_PLATFORM",
        }
    }
}

impl fmt::Display for CoarseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
