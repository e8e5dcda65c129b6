//! Reconciliation of declared tasks against stored preferences
//!
//! Everything here is pure: declarations and the preference store go in,
//! effective items or a replacement store come out. The caller owns all I/O
//! and passes the global default run mode explicitly.
//!
//! Colors for tasks without a stored color come from [`DEFAULT_COLORS`],
//! assigned round-robin in manifest order. The cursor is threaded through each
//! pass and advances only for color-less tasks, so the Nth color-less task
//! always gets `DEFAULT_COLORS[N % len]` no matter how many tasks before it
//! carry their own color.

use indexmap::IndexMap;
use script_bar_sdk::{PreferenceStore, RunMode, TaskDeclaration, TaskItem, TaskPreference};

/// Default button color palette
pub const DEFAULT_COLORS: [&str; 6] = [
    "#4CAF50", // green
    "#2196F3", // blue
    "#FF9800", // orange
    "#9C27B0", // purple
    "#00BCD4", // cyan
    "#E91E63", // pink
];

const NICKNAME_SEPARATORS: [char; 3] = ['-', '_', ':'];

/// Palette position for one reconciliation pass
#[derive(Debug, Default, Clone, Copy)]
struct ColorCursor(usize);

impl ColorCursor {
    fn next(&mut self) -> String {
        let color = DEFAULT_COLORS[self.0 % DEFAULT_COLORS.len()];
        self.0 += 1;
        color.to_string()
    }
}

/// Human-readable form of a task name: `build:prod-fast` -> `Build Prod Fast`
pub fn auto_format(name: &str) -> String {
    name.split(NICKNAME_SEPARATORS)
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn resolve_item(
    declaration: &TaskDeclaration,
    stored: Option<&TaskPreference>,
    default_mode: RunMode,
    cursor: &mut ColorCursor,
) -> TaskItem {
    let stored = stored.cloned().unwrap_or_default();

    TaskItem {
        name: declaration.name.clone(),
        command: declaration.command.clone(),
        enabled: stored.enabled.unwrap_or(true),
        run_mode: stored.run_mode.unwrap_or(default_mode),
        nickname: stored
            .nickname
            .unwrap_or_else(|| auto_format(&declaration.name)),
        color: stored.color.unwrap_or_else(|| cursor.next()),
    }
}

/// Every declared task with its resolved preference, disabled ones included
pub fn compute_all_items(
    declarations: &[TaskDeclaration],
    store: &PreferenceStore,
    default_mode: RunMode,
) -> Vec<TaskItem> {
    declarations
        .iter()
        .scan(ColorCursor::default(), |cursor, declaration| {
            Some(resolve_item(
                declaration,
                store.get(&declaration.name),
                default_mode,
                cursor,
            ))
        })
        .collect()
}

/// The tasks to show: resolved like [`compute_all_items`], enabled only.
///
/// Disabled tasks still take part in color assignment, so hiding a task never
/// shifts the default colors of the others.
pub fn compute_effective_items(
    declarations: &[TaskDeclaration],
    store: &PreferenceStore,
    default_mode: RunMode,
) -> Vec<TaskItem> {
    compute_all_items(declarations, store, default_mode)
        .into_iter()
        .filter(|item| item.enabled)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Replacement store with exactly one fully populated entry per declaration.
///
/// Stored fields carry over; empty nicknames and colors are treated as unset.
/// Entries for names that are no longer declared are dropped. Top-level keys
/// other than `tasks` are kept.
pub fn rescan(
    declarations: &[TaskDeclaration],
    store: &PreferenceStore,
    default_mode: RunMode,
) -> PreferenceStore {
    let mut cursor = ColorCursor::default();
    let mut tasks = IndexMap::with_capacity(declarations.len());

    for declaration in declarations {
        let saved = store.get(&declaration.name).cloned().unwrap_or_default();

        let preference = TaskPreference {
            enabled: Some(saved.enabled.unwrap_or(true)),
            run_mode: Some(saved.run_mode.unwrap_or(default_mode)),
            nickname: Some(
                non_empty(saved.nickname).unwrap_or_else(|| auto_format(&declaration.name)),
            ),
            color: Some(non_empty(saved.color).unwrap_or_else(|| cursor.next())),
        };
        tasks.insert(declaration.name.clone(), preference);
    }

    PreferenceStore {
        tasks,
        extra: store.extra.clone(),
    }
}
