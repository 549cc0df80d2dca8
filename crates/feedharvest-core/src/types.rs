//! Record model shared by the crawler stages.
//!
//! A [`FeedItem`] is what the search feed shows for one note. The crawler
//! wraps it in an [`EnrichedRecord`] and attaches an [`AuthorProfile`] and a
//! [`NoteDetail`] once the corresponding pages have been read. Either part
//! stays `None` when its page never loaded.

use serde::{Deserialize, Serialize};

/// One note card discovered in the search feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Card title, empty when the card has none
    pub title: String,
    /// Author display name
    pub author_name: String,
    /// Absolute URL of the author profile
    pub author_link: String,
    /// Absolute URL of the note; unique key of the record set
    pub note_link: String,
}

/// Fields read from an author profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    /// Self description, empty when the profile has none
    pub desc: String,
    /// Display-formatted follows count
    pub follows: String,
    /// Display-formatted following count
    pub following: String,
    /// Display-formatted likes-and-collects count
    pub likes_and_collects: String,
}

/// Fields read from a note detail page.
///
/// Counters are `None` when the page renders a placeholder instead of the
/// real value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDetail {
    /// Collect counter
    pub collects: Option<String>,
    /// Comment counter
    pub comments: Option<String>,
    /// Like counter
    pub likes: Option<String>,
    /// Publication date as displayed
    pub date: String,
    /// Body text
    pub content: String,
    /// Cleaned topic labels in page order
    pub tags: Vec<String>,
}

/// A feed item plus whatever enrichment has been attached so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// Data from the search feed
    pub item: FeedItem,
    /// Author page data, `None` until read
    pub author: Option<AuthorProfile>,
    /// Note page data, `None` until read
    pub note: Option<NoteDetail>,
}

impl From<FeedItem> for EnrichedRecord {
    fn from(item: FeedItem) -> Self {
        Self {
            item,
            author: None,
            note: None,
        }
    }
}

impl EnrichedRecord {
    /// Unique key of this record.
    #[must_use]
    pub fn note_link(&self) -> &str {
        &self.item.note_link
    }

    /// Attach author page data.
    #[must_use]
    pub fn with_author(mut self, author: AuthorProfile) -> Self {
        self.author = Some(author);
        self
    }

    /// Attach note page data.
    #[must_use]
    pub fn with_note(mut self, note: NoteDetail) -> Self {
        self.note = Some(note);
        self
    }

    /// Whether both detail pages have been read.
    #[must_use]
    pub fn is_fully_enriched(&self) -> bool {
        self.author.is_some() && self.note.is_some()
    }

    /// Column/value pairs for tabular output, in column order.
    ///
    /// Only keys this record actually carries are listed: author columns
    /// appear once the author page was read, note columns once the note page
    /// was read. A hidden counter is listed with a `None` value.
    #[must_use]
    pub fn columns(&self) -> Vec<(&'static str, Option<String>)> {
        let mut columns = vec![
            ("title", Some(self.item.title.clone())),
            ("author_name", Some(self.item.author_name.clone())),
            ("author_link", Some(self.item.author_link.clone())),
            ("note_link", Some(self.item.note_link.clone())),
        ];

        if let Some(author) = &self.author {
            columns.extend([
                ("author_desc", Some(author.desc.clone())),
                ("author_follows", Some(author.follows.clone())),
                ("author_following", Some(author.following.clone())),
                (
                    "author_likes_and_collects",
                    Some(author.likes_and_collects.clone()),
                ),
            ]);
        }

        if let Some(note) = &self.note {
            columns.extend([
                ("note_collects", note.collects.clone()),
                ("note_comments", note.comments.clone()),
                ("note_likes", note.likes.clone()),
                ("note_date", Some(note.date.clone())),
                ("note_content", Some(note.content.clone())),
                ("tags", Some(note.tags.join(","))),
            ]);
        }

        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> FeedItem {
        FeedItem {
            title: "Mac 必装软件".to_string(),
            author_name: "阿明".to_string(),
            author_link: "https://www.xiaohongshu.com/user/profile/u1".to_string(),
            note_link: "https://www.xiaohongshu.com/explore/n1".to_string(),
        }
    }

    fn author() -> AuthorProfile {
        AuthorProfile {
            desc: "效率工具爱好者".to_string(),
            follows: "12".to_string(),
            following: "1.2万".to_string(),
            likes_and_collects: "3.4万".to_string(),
        }
    }

    fn note() -> NoteDetail {
        NoteDetail {
            collects: None,
            comments: Some("88".to_string()),
            likes: Some("1024".to_string()),
            date: "2024-03-01".to_string(),
            content: "推荐几款软件".to_string(),
            tags: vec!["mac".to_string(), "效率".to_string()],
        }
    }

    #[test]
    fn test_raw_record_has_only_feed_columns() {
        let record = EnrichedRecord::from(item());
        let names: Vec<_> = record.columns().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["title", "author_name", "author_link", "note_link"]);
        assert!(!record.is_fully_enriched());
    }

    #[test]
    fn test_enriched_record_columns() {
        let record = EnrichedRecord::from(item())
            .with_author(author())
            .with_note(note());
        assert!(record.is_fully_enriched());

        let columns = record.columns();
        assert_eq!(columns.len(), 14);
        assert_eq!(columns[4], ("author_desc", Some("效率工具爱好者".to_string())));
        assert_eq!(columns[8], ("note_collects", None));
        assert_eq!(columns[13], ("tags", Some("mac,效率".to_string())));
    }

    #[test]
    fn test_note_without_author_skips_author_columns() {
        let record = EnrichedRecord::from(item()).with_note(note());
        let names: Vec<_> = record.columns().into_iter().map(|(k, _)| k).collect();
        assert!(!names.contains(&"author_follows"));
        assert!(names.contains(&"note_date"));
    }

    #[test]
    fn test_record_serialization() {
        let record = EnrichedRecord::from(item()).with_note(note());
        let json = serde_json::to_string(&record).expect("serialize record");
        let parsed: EnrichedRecord = serde_json::from_str(&json).expect("parse record");
        assert_eq!(parsed.note_link(), "https://www.xiaohongshu.com/explore/n1");
        assert_eq!(parsed.note.and_then(|n| n.collects), None);
    }
}
