use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Comment entity - a viewer's reply under a blog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment locally, with a generated id.
    pub fn new(id: impl Into<String>, name: String, comment: String) -> Self {
        Self {
            id: id.into(),
            name,
            comment,
            created_at: Utc::now(),
        }
    }

    /// Up to two uppercase initials of the author's name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Form input for a new comment. Cleared only after a successful submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    pub name: String,
    pub comment: String,
}

impl CommentDraft {
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
        }
    }

    /// Trimmed `(name, comment)` if both are present.
    pub fn validate(&self) -> Result<(String, String), DomainError> {
        let name = self.name.trim();
        let comment = self.comment.trim();

        if name.is_empty() {
            return Err(DomainError::Validation("Name is required".to_string()));
        }
        if comment.is_empty() {
            return Err(DomainError::Validation("Comment is required".to_string()));
        }

        Ok((name.to_string(), comment.to_string()))
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.comment.clear();
    }
}

/// Human-friendly age of a timestamp ("just now", "5 minutes ago", ...).
/// Anything older than a week is shown as a date.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds().max(0);

    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    };

    match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => plural(s / 60, "minute"),
        s if s < 86_400 => plural(s / 3_600, "hour"),
        s if s < 604_800 => plural(s / 86_400, "day"),
        _ => at.format("%b %-d, %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_draft_requires_name_and_comment() {
        assert!(CommentDraft::new("  ", "hello").validate().is_err());
        assert!(CommentDraft::new("Ann", "\n").validate().is_err());
        assert_eq!(
            CommentDraft::new(" Ann ", " hi there ").validate().unwrap(),
            ("Ann".to_string(), "hi there".to_string())
        );
    }

    #[test]
    fn test_initials() {
        let comment = Comment::new("c1", "ada king lovelace".to_string(), "x".to_string());
        assert_eq!(comment.initials(), "AK");
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(relative_time(now - Duration::seconds(30), now), "just now");
        assert_eq!(relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_time(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(relative_time(now - Duration::days(2), now), "2 days ago");
        assert_eq!(relative_time(now - Duration::days(30), now), "Feb 9, 2024");
    }
}
