/// Ordered list of human-readable task strings. Duplicates are dropped on
/// construction (first occurrence wins) and insertion order is preserved;
/// nothing downstream may sort it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList(Vec<String>);

impl TaskList {
    pub fn from_candidates<I>(candidates: I, max_tasks: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut tasks: Vec<String> = Vec::new();
        for candidate in candidates {
            if tasks.len() >= max_tasks {
                break;
            }
            if !tasks.contains(&candidate) {
                tasks.push(candidate);
            }
        }
        Self(tasks)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
