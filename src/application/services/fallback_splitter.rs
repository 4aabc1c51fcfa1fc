use std::sync::LazyLock;

use regex::Regex;

use crate::domain::TaskList;

pub const MAX_FALLBACK_TASKS: usize = 10;

const MIN_TASK_CHARS: usize = 2;
const MAX_TASK_CHARS: usize = 200;

static TASK_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+and\s+|,\s*(?:and\s+)?|;\s+|\.\s+|\b(?:then|also|plus)\s+")
        .expect("task boundary pattern is valid")
});

static DIRECTIVE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:i need to|i have to|i want to|remind me to|don't forget to)\s+")
        .expect("directive prefix pattern is valid")
});

/// Segments free text into task-like fragments using punctuation and
/// conjunction cues. Total: always returns a list, empty only for blank
/// input. Pure and deterministic so the degradation path stays testable
/// without any remote provider.
pub fn split_into_tasks(text: &str) -> TaskList {
    let candidates = TASK_BOUNDARY.split(text).map(clean_fragment).filter(|f| {
        let chars = f.chars().count();
        chars > MIN_TASK_CHARS && chars < MAX_TASK_CHARS
    });

    let tasks = TaskList::from_candidates(candidates, MAX_FALLBACK_TASKS);
    if !tasks.is_empty() {
        return tasks;
    }

    // Last resort: the whole input as a single task.
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return TaskList::default();
    }
    TaskList::from_candidates([capitalize(trimmed)], 1)
}

fn clean_fragment(fragment: &str) -> String {
    let trimmed = fragment.trim();
    let stripped = DIRECTIVE_PREFIX.replace(trimmed, "");
    capitalize(stripped.trim())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
