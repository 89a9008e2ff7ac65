use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub level: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Course,
    Section,
}

/// A piece of site content that the search endpoint matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: &'static str,
    pub description: &'static str,
}

impl ContentEntry {
    /// `needle` must already be lower-cased.
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

pub static COURSES: [Course; 4] = [
    Course {
        id: 1,
        name: "Programming",
        description: "Learn fundamental programming concepts",
        duration: "12 weeks",
        level: "Beginner",
    },
    Course {
        id: 2,
        name: "Web Development",
        description: "Build modern web applications",
        duration: "16 weeks",
        level: "Intermediate",
    },
    Course {
        id: 3,
        name: "Data Science",
        description: "Analyze and visualize data",
        duration: "20 weeks",
        level: "Advanced",
    },
    Course {
        id: 4,
        name: "Cyber Security",
        description: "Protect systems from cyber threats",
        duration: "18 weeks",
        level: "Intermediate",
    },
];

pub static SEARCHABLE_CONTENT: [ContentEntry; 3] = [
    ContentEntry { kind: ContentKind::Course, title: "Programming", description: "Learn programming basics" },
    ContentEntry { kind: ContentKind::Course, title: "Web Development", description: "Build websites and web apps" },
    ContentEntry { kind: ContentKind::Section, title: "About IT", description: "Information about IT field" },
];

/// Case-insensitive substring search over titles and descriptions.
///
/// Returns every matching entry in catalog order.
#[must_use]
pub fn search(query: &str) -> Vec<ContentEntry> {
    let needle = query.to_lowercase();
    SEARCHABLE_CONTENT.iter().filter(|entry| entry.matches(&needle)).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_programming_is_case_insensitive() {
        for query in ["programming", "PROGRAMMING", "Program"] {
            let results = search(query);
            assert_eq!(results.len(), 1, "query {query}");
            assert_eq!(results[0].title, "Programming");
        }
    }

    #[test]
    fn test_search_matches_description() {
        let results = search("field");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, ContentKind::Section);
    }

    #[test]
    fn test_search_without_match() {
        assert!(search("quantum").is_empty());
    }

    #[test]
    fn test_search_multiple_matches_keep_order() {
        let titles: Vec<_> = search("b").iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Programming", "Web Development", "About IT"]);
    }

    #[test]
    fn test_content_kind_serializes_as_type() {
        let json = serde_json::to_value(SEARCHABLE_CONTENT[2]).unwrap();
        assert_eq!(json["type"], "section");
        assert_eq!(json["title"], "About IT");
    }
}
