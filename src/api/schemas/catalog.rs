use crate::domain::catalog::{ContentEntry, Course};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CoursesResponse {
    pub success: bool,
    pub courses: &'static [Course],
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: Option<String>,
}

impl SearchParams {
    /// Collects the parameters from raw query pairs. A repeated `q` keeps its first value.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { q: pairs.into_iter().find(|(key, _)| key == "q").map(|(_, value)| value) }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub results: Vec<ContentEntry>,
    pub count: usize,
}

impl SearchResponse {
    #[must_use]
    pub fn new(query: String, results: Vec<ContentEntry>) -> Self {
        Self { success: true, query, count: results.len(), results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn test_repeated_q_keeps_first_value() {
        let params = SearchParams::from_pairs(pairs(&[("page", "2"), ("q", "web"), ("q", "about")]));
        assert_eq!(params.q.as_deref(), Some("web"));
    }

    #[test]
    fn test_missing_q_is_none() {
        assert_eq!(SearchParams::from_pairs(pairs(&[("query", "web")])), SearchParams::default());
    }
}
