//! Keyword scan of raw Kotlin text for platform API usage.
//!
//! Matching is textual: comments are blanked out first and every pattern
//! uses word boundaries, but string literals and unrelated identifiers that
//! happen to match still count.

use super::UsageKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static USAGE_PATTERNS: Lazy<Vec<(UsageKind, Regex)>> = Lazy::new(|| {
    let table: &[(UsageKind, &str)] = &[
        (
            UsageKind::Storage,
            r"\bSharedPreferences\b|\bandroidx\.room\b|\bandroidx\.datastore\b",
        ),
        (
            UsageKind::Logging,
            r"\bandroid\.util\.Log\b|\bLog\.(d|e|w|i|v|wtf)\(",
        ),
        (UsageKind::Threading, r"\bHandler\(|\bLooper\b|\bAsyncTask\b"),
        (UsageKind::Time, r"\bSystemClock\b"),
        (
            UsageKind::State,
            r"\w*ViewModel\b|\w*LiveData\b|\bSavedStateHandle\b",
        ),
        (
            UsageKind::Ui,
            r"\bandroid\.widget\b|\w*Activity\b|\w*Fragment\b|\b\w*View\b|\b(Local)?Context\b|\b(Pending)?Intent\b",
        ),
        (
            UsageKind::Resources,
            r"\bR\.(string|drawable|layout|id|color|dimen|raw|mipmap|style|menu|anim|plurals|array|xml|font|bool|integer)\b",
        ),
        (
            UsageKind::Network,
            r"\bConnectivityManager\b|\bNetworkInfo\b|\bNetworkCallback\b",
        ),
        (UsageKind::Http, r"\bokhttp3\b|\bretrofit2\b"),
        (UsageKind::Json, r"\bGson\b|\borg\.json\b|\bcom\.google\.gson\b"),
        (
            UsageKind::DependencyInjection,
            r"\bdagger\.|@HiltViewModel\b|@AndroidEntryPoint\b|@HiltAndroidApp\b",
        ),
    ];
    table
        .iter()
        .map(|(kind, pattern)| (*kind, Regex::new(pattern).expect("valid usage pattern")))
        .collect()
});

/// Usage kinds found in `source`, comments excluded.
pub fn detect_usages(source: &str) -> BTreeSet<UsageKind> {
    let code = strip_comments(source);
    USAGE_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&code))
        .map(|(kind, _)| *kind)
        .collect()
}

/// Replace `//` and (nested) `/* */` comments with spaces, keeping newlines
/// and string literals intact.
pub fn strip_comments(source: &str) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Code,
        Line,
        Block(u32),
        Str,
        RawStr,
    }

    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut i = 0;

    let blank = |c: char| if c == '\n' { '\n' } else { ' ' };

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match state {
            State::Code => {
                if c == '/' && next == Some('/') {
                    state = State::Line;
                    out.push_str("  ");
                    i += 2;
                    continue;
                }
                if c == '/' && next == Some('*') {
                    state = State::Block(1);
                    out.push_str("  ");
                    i += 2;
                    continue;
                }
                if c == '"' {
                    if next == Some('"') && chars.get(i + 2) == Some(&'"') {
                        state = State::RawStr;
                        out.push_str("\"\"\"");
                        i += 3;
                        continue;
                    }
                    state = State::Str;
                }
                out.push(c);
            }
            State::Line => {
                if c == '\n' {
                    state = State::Code;
                }
                out.push(blank(c));
            }
            State::Block(depth) => {
                if c == '*' && next == Some('/') {
                    state = if depth == 1 {
                        State::Code
                    } else {
                        State::Block(depth - 1)
                    };
                    out.push_str("  ");
                    i += 2;
                    continue;
                }
                if c == '/' && next == Some('*') {
                    state = State::Block(depth + 1);
                    out.push_str("  ");
                    i += 2;
                    continue;
                }
                out.push(blank(c));
            }
            State::Str => {
                if c == '\\' {
                    out.push(c);
                    if let Some(escaped) = next {
                        out.push(escaped);
                    }
                    i += 2;
                    continue;
                }
                if c == '"' || c == '\n' {
                    state = State::Code;
                }
                out.push(c);
            }
            State::RawStr => {
                if c == '"' && next == Some('"') && chars.get(i + 2) == Some(&'"') {
                    state = State::Code;
                    out.push_str("\"\"\"");
                    i += 3;
                    continue;
                }
                out.push(c);
            }
        }
        i += 1;
    }
    out
}
