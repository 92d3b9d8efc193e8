//! Namespace prefix tables driving classification.

use crate::config::RulesConfig;
use crate::core::DependencyId;

const PLATFORM_PREFIXES: &[&str] = &[
    "android.",
    "androidx.",
    "com.google.android.",
    "dalvik.",
    "org.json.",
    "org.robolectric.",
    "com.google.firebase.",
    "dagger.hilt.",
    "com.jakewharton.rxbinding",
    "coil.",
    "com.bumptech.glide.",
    "com.squareup.picasso.",
];

const HOST_RUNTIME_PREFIXES: &[&str] = &[
    "java.io.",
    "java.nio.",
    "java.net.",
    "javax.net.",
    "java.sql.",
    "javax.sql.",
    "java.awt.",
    "java.applet.",
    "java.time.",
    "java.util.concurrent.",
    "java.lang.reflect.",
    "com.google.gson.",
    "retrofit2.",
    "okhttp3.",
];

const ADAPTABLE_PREFIXES: &[&str] = &[
    "java.util.",
    "java.lang.",
    "java.math.",
    "java.text.",
    "kotlin.",
    "kotlinx.",
    "org.jetbrains.annotations.",
];

const UI_PREFIXES: &[&str] = &[
    "android.view.",
    "android.widget.",
    "android.app.",
    "androidx.appcompat.",
    "androidx.fragment.",
    "androidx.constraintlayout.",
    "androidx.recyclerview.",
    "androidx.viewpager.",
    "androidx.cardview.",
    "androidx.swiperefreshlayout.",
    "com.google.android.material.",
    "androidx.compose.ui.",
    "androidx.compose.foundation.",
    "androidx.compose.material",
    "androidx.compose.runtime.Composable",
];

const UI_BLACKLIST: &[&str] = &[
    "android.app.Application",
    "android.app.Service",
    "android.app.IntentService",
    "android.app.JobSchedulerService",
    "android.app.Notification",
    "android.app.NotificationManager",
    "android.app.NotificationChannel",
    "android.app.AlarmManager",
    "android.app.DownloadManager",
    "android.app.SearchManager",
    "android.app.UiModeManager",
    "android.app.ActivityManager",
    "android.app.PendingIntent",
    "android.app.TaskStackBuilder",
];

/// Ordered prefix lists used by the classifier.
///
/// Built once per run and shared by reference with every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    pub platform: Vec<String>,
    pub host_runtime: Vec<String>,
    pub adaptable: Vec<String>,
    pub ui: Vec<String>,
    pub ui_blacklist: Vec<String>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            platform: owned(PLATFORM_PREFIXES),
            host_runtime: owned(HOST_RUNTIME_PREFIXES),
            adaptable: owned(ADAPTABLE_PREFIXES),
            ui: owned(UI_PREFIXES),
            ui_blacklist: owned(UI_BLACKLIST),
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn extend_unique(target: &mut Vec<String>, extra: &[String]) {
    for item in extra {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

impl RuleTable {
    /// Defaults extended (or replaced) by the `[rules]` section.
    pub fn from_config(config: &RulesConfig) -> Self {
        let mut table = if config.replace_defaults {
            Self::empty()
        } else {
            Self::default()
        };
        extend_unique(&mut table.platform, &config.platform);
        extend_unique(&mut table.host_runtime, &config.host_runtime);
        extend_unique(&mut table.adaptable, &config.adaptable);
        extend_unique(&mut table.ui, &config.ui);
        extend_unique(&mut table.ui_blacklist, &config.ui_blacklist);
        table
    }

    pub fn empty() -> Self {
        Self {
            platform: Vec::new(),
            host_runtime: Vec::new(),
            adaptable: Vec::new(),
            ui: Vec::new(),
            ui_blacklist: Vec::new(),
        }
    }

    pub fn platform_match(&self, dep: &DependencyId) -> Option<&str> {
        first_prefix(&self.platform, dep)
    }

    pub fn host_runtime_match(&self, dep: &DependencyId) -> Option<&str> {
        first_prefix(&self.host_runtime, dep)
    }

    pub fn adaptable_match(&self, dep: &DependencyId) -> Option<&str> {
        first_prefix(&self.adaptable, dep)
    }

    /// Blacklisted names and their members are never UI, whatever the whitelist says.
    pub fn is_ui(&self, dep: &DependencyId) -> bool {
        if self.ui_blacklist.iter().any(|name| dep.is_member_of(name)) {
            return false;
        }
        first_prefix(&self.ui, dep).is_some()
    }
}

fn first_prefix<'t>(prefixes: &'t [String], dep: &DependencyId) -> Option<&'t str> {
    prefixes
        .iter()
        .find(|prefix| dep.starts_with(prefix))
        .map(String::as_str)
}
