use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title stored when the user leaves the title blank.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Post entity - a single entry on the board.
///
/// `id` and `created_at` are fixed at construction. The remaining fields only
/// change through [`Post::revise`], which the board calls when an edit is
/// submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    id: Uuid,
    title: String,
    comment: String,
    #[serde(default)]
    image: Option<String>,
    created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with a generated ID and the current timestamp.
    pub fn new(title: String, comment: String, image: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            comment,
            image,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Embedded image as a `data:` URI, if any.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn revise(&mut self, title: String, comment: String, image: Option<String>) {
        self.title = title;
        self.comment = comment;
        self.image = image;
    }
}
