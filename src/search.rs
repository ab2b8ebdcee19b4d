use crate::error::{Result, SmileError};
use crate::model::Moment;
use regex::Regex;

/// Search query with optional field-specific and regex support
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// Simple substring search (case-insensitive) over content and tags
    Simple(String),
    /// Regex search over content and tags
    Regex(Regex),
    /// Field-specific search
    Field {
        field: SearchField,
        pattern: Box<SearchQuery>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Content,
    Tag,
    Category,
    Collection,
    Mood,
}

impl SearchQuery {
    /// Parse a search query string
    /// Supports:
    /// - Simple: "beach" -> searches content and tags
    /// - Field-specific: "tag:beach" -> searches tags only
    /// - Regex: "regex:sun(set|rise)" -> regex search
    /// - Combined: "content:regex:^Coffee" -> regex in the content field
    pub fn parse(query: &str) -> Result<Self> {
        if query.is_empty() {
            return Err(SmileError::Validation("Empty query".to_string()));
        }

        if let Some((field_str, pattern)) = query.split_once(':') {
            if let Ok(field) = field_str.parse::<SearchField>() {
                let sub_query = Self::parse(pattern)?;
                return Ok(SearchQuery::Field {
                    field,
                    pattern: Box::new(sub_query),
                });
            }

            if field_str == "regex" {
                let regex = Regex::new(pattern)
                    .map_err(|e| SmileError::Validation(format!("Invalid regex: {}", e)))?;
                return Ok(SearchQuery::Regex(regex));
            }
        }

        Ok(SearchQuery::Simple(query.to_string()))
    }

    /// Match against a single text value
    fn matches_text(&self, text: &str) -> bool {
        match self {
            SearchQuery::Simple(p) => text.to_lowercase().contains(&p.to_lowercase()),
            SearchQuery::Regex(r) => r.is_match(text),
            SearchQuery::Field { .. } => false,
        }
    }

    pub fn matches_moment(&self, moment: &Moment) -> bool {
        match self {
            SearchQuery::Simple(_) | SearchQuery::Regex(_) => {
                self.matches_text(&moment.content)
                    || moment.tags.iter().any(|tag| self.matches_text(tag))
            }
            SearchQuery::Field { field, pattern } => match field {
                SearchField::Content => pattern.matches_text(&moment.content),
                SearchField::Tag => moment.tags.iter().any(|tag| pattern.matches_text(tag)),
                SearchField::Category => pattern.matches_text(&moment.category),
                SearchField::Collection => moment
                    .collection
                    .as_deref()
                    .is_some_and(|c| pattern.matches_text(c)),
                SearchField::Mood => moment
                    .mood
                    .as_deref()
                    .is_some_and(|m| pattern.matches_text(m)),
            },
        }
    }
}

impl std::str::FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "content" | "text" => Ok(SearchField::Content),
            "tag" | "tags" => Ok(SearchField::Tag),
            "category" | "feeling" => Ok(SearchField::Category),
            "collection" => Ok(SearchField::Collection),
            "mood" => Ok(SearchField::Mood),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewMoment;
    use chrono::Utc;

    fn create_test_moment() -> Moment {
        let new = NewMoment::new("Watched the sunset with grandma at the pier")
            .with_category("family")
            .with_collection(Some("family-time".to_string()))
            .with_mood(Some("grateful".to_string()))
            .with_tags(vec!["Beach".to_string(), "evening".to_string()]);
        Moment::from_new("test-123".to_string(), new, Utc::now())
    }

    #[test]
    fn test_simple_search() {
        let moment = create_test_moment();

        assert!(SearchQuery::parse("sunset").unwrap().matches_moment(&moment));
        assert!(SearchQuery::parse("beach").unwrap().matches_moment(&moment));
        assert!(!SearchQuery::parse("office").unwrap().matches_moment(&moment));
    }

    #[test]
    fn test_simple_search_ignores_category() {
        let moment = create_test_moment();
        assert!(!SearchQuery::parse("family").unwrap().matches_moment(&moment));
    }

    #[test]
    fn test_field_specific_search() {
        let moment = create_test_moment();

        let query = SearchQuery::parse("content:grandma").unwrap();
        assert!(query.matches_moment(&moment));

        let query = SearchQuery::parse("content:beach").unwrap();
        assert!(!query.matches_moment(&moment));

        let query = SearchQuery::parse("tag:even").unwrap();
        assert!(query.matches_moment(&moment));

        let query = SearchQuery::parse("category:fam").unwrap();
        assert!(query.matches_moment(&moment));

        let query = SearchQuery::parse("collection:family-time").unwrap();
        assert!(query.matches_moment(&moment));

        let query = SearchQuery::parse("mood:happy").unwrap();
        assert!(!query.matches_moment(&moment));
    }

    #[test]
    fn test_regex_search() {
        let moment = create_test_moment();

        let query = SearchQuery::parse("regex:sun(set|rise)").unwrap();
        assert!(query.matches_moment(&moment));

        let query = SearchQuery::parse("content:regex:^Watched").unwrap();
        assert!(query.matches_moment(&moment));

        assert!(SearchQuery::parse("regex:[invalid").is_err());
    }

    #[test]
    fn test_case_insensitive_field_name() {
        let moment = create_test_moment();
        let query = SearchQuery::parse("TAG:BEACH").unwrap();
        assert!(query.matches_moment(&moment));
    }

    #[test]
    fn test_empty_query_rejected() {
        assert!(SearchQuery::parse("").is_err());
    }
}
