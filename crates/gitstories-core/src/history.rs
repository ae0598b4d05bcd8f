use serde::{Deserialize, Serialize};

/// One commit as produced by the history extractor.
///
/// Paths are `/`-delimited and relative to the repository root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    pub hash: String,
    pub new_files: Vec<String>,
    pub deleted_files: Vec<String>,
    pub changed_files: Vec<String>,
    /// Aggregated lint error score for the commit.
    pub errors: i32,
}

impl Commit {
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(7)
            .map(|(i, _)| i)
            .unwrap_or(self.hash.len());
        &self.hash[..end]
    }
}

/// Ordered oldest-first commit list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    pub commits: Vec<Commit>,
}

impl History {
    pub fn new(commits: Vec<Commit>) -> Self {
        Self { commits }
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Commit> {
        self.commits.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Commit> {
        self.commits.iter()
    }
}

impl FromIterator<Commit> for History {
    fn from_iter<I: IntoIterator<Item = Commit>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
