mod common;

use common::KotlinProject;
use indoc::indoc;
use kmpmap::classifier::RuleTable;
use kmpmap::config::DetectionConfig;
use kmpmap::core::Category;
use kmpmap::errors::KmpmapError;
use kmpmap::pipeline::run_migration;
use kmpmap::progress::ProgressManager;
use pretty_assertions::assert_eq;
use std::fs;

fn sample_project() -> KotlinProject {
    let project = KotlinProject::new();
    project
        .add(
            "com/example/Greeting.kt",
            indoc! {r#"
                package com.example

                fun greet(name: String) = "Hello, $name"
            "#},
        )
        .add(
            "com/example/util/Numbers.kt",
            indoc! {"
                package com.example.util

                import java.util.ArrayList
                import kotlin.math.max

                fun largest(values: ArrayList<Int>): Int = values.fold(0) { acc, v -> max(acc, v) }
            "},
        )
        .add(
            "com/example/data/Storage.kt",
            indoc! {"
                package com.example.data

                import android.content.Context
                import java.io.File

                fun cacheDir(context: Context): File = context.cacheDir
            "},
        )
        .add(
            "com/example/ui/MainActivity.kt",
            indoc! {"
                package com.example.ui

                import android.os.Bundle
                import androidx.appcompat.app.AppCompatActivity

                class MainActivity : AppCompatActivity() {
                    override fun onCreate(savedInstanceState: Bundle?) {
                        super.onCreate(savedInstanceState)
                    }
                }
            "},
        );
    project
}

#[test]
fn test_migration_writes_category_layout() {
    let project = sample_project();
    let rules = RuleTable::default();
    let summary = run_migration(
        &project.options(),
        &rules,
        &DetectionConfig::default(),
        &ProgressManager::hidden(),
    )
    .unwrap();

    assert_eq!(summary.files_found, 4);
    assert_eq!(summary.processed, 4);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.declarations, 4);
    assert_eq!(summary.by_category.get(&Category::CommonLogic), Some(&1));
    assert_eq!(summary.by_category.get(&Category::AdaptableLibrary), Some(&1));
    assert_eq!(summary.by_category.get(&Category::PlatformLogic), Some(&1));
    assert_eq!(summary.by_category.get(&Category::PlatformUi), Some(&1));

    assert_eq!(
        project.output("common_logic/com/example/greet.kt"),
        "package com.example\n\nfun greet(name: String) = \"Hello, $name\"\n"
    );
    assert!(project.output_exists("adaptable_library/com/example/util/largest.kt"));

    let expect = project.output("platform_logic/commonMain/kotlin/com/example/data/cacheDir.kt");
    let actual = project.output("platform_logic/androidMain/kotlin/com/example/data/cacheDir.kt");
    let signature = "fun cacheDir(context: Context): File";
    assert!(expect.contains(&format!("expect {signature}")));
    assert!(actual.contains(&format!("actual {signature} {{")));
    assert!(actual.contains("NotImplementedError"));
    assert!(expect.contains("import android.content.Context\nimport java.io.File\n"));

    assert!(project
        .output("platform_ui/commonMain/kotlin/com/example/ui/MainActivity.kt")
        .contains("expect class MainActivity"));
    assert!(project.output_exists("platform_ui/androidMain/kotlin/com/example/ui/MainActivity.kt"));
}

#[test]
fn test_migration_report_and_graphs() {
    let project = sample_project();
    run_migration(
        &project.options(),
        &RuleTable::default(),
        &DetectionConfig::default(),
        &ProgressManager::hidden(),
    )
    .unwrap();

    let report = project.output("migration_report.txt");
    assert!(report.contains("  [PLATFORM_LOGIC] FUNCTION: cacheDir\n"));
    assert!(report.contains("  [PLATFORM_UI] CLASS: MainActivity\n"));
    assert!(report.contains("  [ADAPTABLE_LIBRARY] FUNCTION: largest\n"));
    assert!(report.contains("  [COMMON_LOGIC] FUNCTION: greet\n"));
    assert_eq!(report.matches("Source: ").count(), 4);

    let graph = project.output("dependency-graph.dot");
    assert!(graph.starts_with("digraph G {\n"));
    assert!(graph.contains("\"com_example_data_Storage\" -> \"android_content_Context\";"));

    let android = project.output("android-deps-snippet.gradle.kts");
    assert!(android.contains("dependencies {"));
    assert!(project.output_exists("common-deps-snippet.gradle.kts"));
    assert!(!project.output_exists("ast"));
}

#[test]
fn test_overloads_get_numbered_files() {
    let project = KotlinProject::new();
    project.add(
        "Launcher.kt",
        indoc! {"
            package app

            import android.content.Context

            fun open(context: Context) {}
            fun open(context: Context, flags: Int) {}
        "},
    );
    run_migration(
        &project.options(),
        &RuleTable::default(),
        &DetectionConfig::default(),
        &ProgressManager::hidden(),
    )
    .unwrap();

    for side in ["commonMain", "androidMain"] {
        let base = format!("platform_logic/{side}/kotlin/app");
        assert!(project
            .output(&format!("{base}/open.kt"))
            .contains("fun open(context: Context): Unit"));
        assert!(project
            .output(&format!("{base}/open_2.kt"))
            .contains("fun open(context: Context, flags: Int): Unit"));
    }
}

#[test]
fn test_unparseable_file_is_skipped() {
    let project = sample_project();
    project.add("com/example/Broken.kt", "class {\n");

    let summary = run_migration(
        &project.options(),
        &RuleTable::default(),
        &DetectionConfig::default(),
        &ProgressManager::hidden(),
    )
    .unwrap();

    assert_eq!(summary.files_found, 5);
    assert_eq!(summary.processed, 4);
    assert_eq!(summary.failed, 1);
    assert!(summary.failures[0].path.ends_with("Broken.kt"));
    assert!(!project.output("migration_report.txt").contains("Broken.kt"));
}

#[test]
fn test_blocked_output_path_rolls_back_whole_file() {
    let project = KotlinProject::new();
    project.add(
        "a/Util.kt",
        indoc! {"
            package a

            fun first() = 1
            fun second() = 2
        "},
    );
    fs::create_dir_all(project.output_dir().join("common_logic/a/second.kt")).unwrap();
    let mut options = project.options();
    options.clean = false;

    let summary = run_migration(
        &options,
        &RuleTable::default(),
        &DetectionConfig::default(),
        &ProgressManager::hidden(),
    )
    .unwrap();

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.declarations, 0);
    assert!(summary.failures[0].path.ends_with("Util.kt"));
    assert!(!project.output_exists("common_logic/a/first.kt"));
    let report =
        fs::read_to_string(project.output_dir().join("migration_report.txt")).unwrap_or_default();
    assert!(!report.contains("Util.kt"));
}

#[test]
fn test_missing_source_dir_leaves_output_untouched() {
    let project = KotlinProject::new();
    let mut options = project.options();
    options.source_dir = project.root().join("does-not-exist");

    fs::create_dir_all(project.output_dir()).unwrap();
    fs::write(project.output_dir().join("keep.txt"), "previous run").unwrap();

    let err = run_migration(
        &options,
        &RuleTable::default(),
        &DetectionConfig::default(),
        &ProgressManager::hidden(),
    )
    .unwrap_err();

    assert!(matches!(err, KmpmapError::SourceDirMissing { .. }));
    assert!(err.is_fatal());
    assert_eq!(project.output("keep.txt"), "previous run");
}

#[test]
fn test_missing_source_dir_creates_no_output() {
    let project = KotlinProject::new();
    let mut options = project.options();
    options.source_dir = project.root().join("nowhere");

    assert!(run_migration(
        &options,
        &RuleTable::default(),
        &DetectionConfig::default(),
        &ProgressManager::hidden(),
    )
    .is_err());
    assert!(!project.output_dir().exists());
}

#[test]
fn test_clean_removes_previous_output() {
    let project = sample_project();
    fs::create_dir_all(project.output_dir()).unwrap();
    fs::write(project.output_dir().join("stale.kt"), "old").unwrap();

    run_migration(
        &project.options(),
        &RuleTable::default(),
        &DetectionConfig::default(),
        &ProgressManager::hidden(),
    )
    .unwrap();
    assert!(!project.output_exists("stale.kt"));
}

#[test]
fn test_ast_graphs_are_optional_output() {
    let project = sample_project();
    let mut options = project.options();
    options.ast_graphs = true;

    run_migration(
        &options,
        &RuleTable::default(),
        &DetectionConfig::default(),
        &ProgressManager::hidden(),
    )
    .unwrap();

    let ast = project.output("ast/Storage.kt.dot");
    assert!(ast.starts_with("digraph AST {\n"));
    assert!(ast.contains("fillcolor=lightblue"));
}

#[test]
fn test_parallel_and_sequential_runs_match() {
    let sequential = sample_project();
    let parallel = sample_project();
    let mut parallel_options = parallel.options();
    parallel_options.parallel = true;

    let rules = RuleTable::default();
    let detection = DetectionConfig::default();
    run_migration(&sequential.options(), &rules, &detection, &ProgressManager::hidden()).unwrap();
    run_migration(&parallel_options, &rules, &detection, &ProgressManager::hidden()).unwrap();

    let strip_roots = |project: &KotlinProject| {
        project
            .output("migration_report.txt")
            .replace(&project.source_dir().display().to_string(), "<src>")
    };
    assert_eq!(strip_roots(&sequential), strip_roots(&parallel));
}
