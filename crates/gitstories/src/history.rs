//! Commit history documents.
//!
//! Accepts either `{"commits": [...]}` or a bare list of commits, in JSON or YAML.

use std::path::Path;

use gitstories_core::{Commit, History};
use serde::Deserialize;

use crate::error::Result;
use crate::load::{self, Format};

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryDoc {
    Bare(Vec<Commit>),
    Wrapped(History),
}

impl From<HistoryDoc> for History {
    fn from(doc: HistoryDoc) -> Self {
        match doc {
            HistoryDoc::Bare(commits) => History::new(commits),
            HistoryDoc::Wrapped(history) => history,
        }
    }
}

pub fn load_history(path: &Path) -> Result<History> {
    load::load::<HistoryDoc>(path).map(History::from)
}

pub fn parse_history(text: &str, format: Format) -> Result<History> {
    load::parse::<HistoryDoc>(text, format, &load::inline_origin()).map(History::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_wrapped_lists_are_equivalent() {
        let bare = parse_history(r#"[{"hash":"a1","new_files":["x.rs"]}]"#, Format::Json).unwrap();
        let wrapped = parse_history(
            r#"{"commits":[{"hash":"a1","new_files":["x.rs"]}]}"#,
            Format::Json,
        )
        .unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare.commits[0].errors, 0);
        assert!(bare.commits[0].deleted_files.is_empty());
    }

    #[test]
    fn yaml_history() {
        let yaml = "commits:\n  - hash: b2\n    new_files: [src/lib.rs]\n    errors: 12\n";
        let h = parse_history(yaml, Format::Yaml).unwrap();
        assert_eq!(h.len(), 1);
        assert_eq!(h.commits[0].errors, 12);
    }

    #[test]
    fn malformed_history_is_reported() {
        assert!(parse_history("{not json", Format::Json).is_err());
    }
}
