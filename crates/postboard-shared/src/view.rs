//! View models - what a front-end needs to draw the form and the list.

use std::fmt;

use chrono::{Local, TimeZone};
use serde::Serialize;
use uuid::Uuid;

use postboard_core::domain::{DataUri, Draft, FormField, Post, Theme};
use postboard_core::{Board, EMOJI_PALETTE};

/// Format used for post creation times.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Everything on screen.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub theme: Theme,
    pub form: FormView,
    /// Newest first.
    pub posts: Vec<PostView>,
}

/// The compose/edit form.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub title: String,
    pub comment: String,
    /// Raw file picked for upload, if any. Empty while editing until the
    /// user picks a new file.
    pub selected_file: Option<String>,
    /// Shown only while the draft holds an encoded image.
    pub preview: Option<ImageSummary>,
    pub submit_label: &'static str,
    pub editing: bool,
    pub emoji: Vec<&'static str>,
    #[serde(skip)]
    pub focus: Option<FormField>,
}

/// One entry in the list.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: Uuid,
    /// 1-based position in the list.
    pub position: usize,
    pub title: String,
    pub created_at: String,
    pub comment_lines: Vec<String>,
    pub image: Option<ImageSummary>,
    /// This post is loaded in the form.
    pub editing: bool,
}

/// Description of an embedded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    pub media_type: String,
    pub bytes: usize,
}

impl ImageSummary {
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let parsed = DataUri::parse(uri)?;
        Some(Self {
            media_type: parsed.media_type.to_string(),
            bytes: parsed.decoded_len(),
        })
    }
}

impl fmt::Display for ImageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bytes < 1024 {
            write!(f, "{}, {} B", self.media_type, self.bytes)
        } else if self.bytes < 1024 * 1024 {
            write!(f, "{}, {:.1} KB", self.media_type, self.bytes as f64 / 1024.0)
        } else {
            write!(
                f,
                "{}, {:.1} MB",
                self.media_type,
                self.bytes as f64 / (1024.0 * 1024.0)
            )
        }
    }
}

impl BoardView {
    /// Build the view with timestamps in the local time zone.
    pub fn build(board: &Board) -> Self {
        Self::build_in(board, &Local)
    }

    pub fn build_in<Tz>(board: &Board, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let editing_id = board.editing_id();

        let posts = board
            .posts()
            .iter()
            .enumerate()
            .map(|(i, post)| PostView::new(i + 1, post, editing_id == Some(post.id()), tz))
            .collect();

        Self {
            theme: board.theme(),
            form: FormView::new(board),
            posts,
        }
    }
}

impl FormView {
    fn new(board: &Board) -> Self {
        let draft: &Draft = board.draft();

        Self {
            title: draft.title().to_string(),
            comment: draft.comment().to_string(),
            selected_file: draft
                .pending_image()
                .map(|s| s.path().display().to_string()),
            preview: draft.preview().and_then(ImageSummary::from_data_uri),
            submit_label: board.submit_label(),
            editing: board.is_editing(),
            emoji: EMOJI_PALETTE.to_vec(),
            focus: board.focus(),
        }
    }
}

impl PostView {
    fn new<Tz>(position: usize, post: &Post, editing: bool, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            id: post.id(),
            position,
            title: post.title().to_string(),
            created_at: post
                .created_at()
                .with_timezone(tz)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            comment_lines: post.comment().lines().map(str::to_string).collect(),
            image: post.image().and_then(ImageSummary::from_data_uri),
            editing,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use postboard_core::domain::ImageSelection;
    use postboard_core::ports::StorageKeys;
    use postboard_infra::InMemoryStore;

    use super::*;

    fn board() -> Board {
        Board::load(Arc::new(InMemoryStore::new()), StorageKeys::default())
    }

    #[test]
    fn test_posts_are_numbered_newest_first() {
        let mut board = board();
        for comment in ["first", "second"] {
            board.set_comment(comment);
            board.submit_draft();
        }

        let view = BoardView::build_in(&board, &Utc);
        let positions: Vec<_> = view.posts.iter().map(|p| (p.position, p.comment_lines[0].as_str())).collect();
        assert_eq!(positions, vec![(1, "second"), (2, "first")]);
    }

    #[test]
    fn test_comment_lines_preserved() {
        let mut board = board();
        board.set_title("Trip");
        board.set_comment("day one\n\nday two");
        board.submit_draft();

        let view = BoardView::build_in(&board, &Utc);
        assert_eq!(view.posts[0].comment_lines, vec!["day one", "", "day two"]);
        assert_eq!(view.posts[0].title, "Trip");
    }

    #[test]
    fn test_timestamp_uses_fixed_format() {
        let mut board = board();
        board.set_comment("x");
        board.submit_draft();

        let view = BoardView::build_in(&board, &Utc);
        let expected = board.posts()[0].created_at().format(TIMESTAMP_FORMAT).to_string();
        assert_eq!(view.posts[0].created_at, expected);
        assert_eq!(view.posts[0].created_at.len(), "2024-01-01 00:00".len());
    }

    #[test]
    fn test_form_reflects_edit_state() {
        let mut board = board();
        board.set_comment("x");
        board.submit_draft();
        let id = board.posts()[0].id();

        let idle = BoardView::build_in(&board, &Utc);
        assert_eq!(idle.form.submit_label, "Add");
        assert!(!idle.posts[0].editing);

        board.start_edit(id);
        let editing = BoardView::build_in(&board, &Utc);
        assert_eq!(editing.form.submit_label, "Update");
        assert!(editing.form.editing);
        assert!(editing.posts[0].editing);
        assert_eq!(editing.form.comment, "x");
        assert_eq!(editing.form.focus, Some(FormField::Comment));
    }

    #[test]
    fn test_preview_shown_only_with_encoded_image() {
        let mut board = board();
        let ticket = board.select_image(ImageSelection::new("cat.png"));

        let pending = BoardView::build_in(&board, &Utc);
        assert_eq!(pending.form.selected_file.as_deref(), Some("cat.png"));
        assert_eq!(pending.form.preview, None);

        board.apply_encoded(ticket, Ok("data:image/png;base64,aGV5".to_string()));
        let ready = BoardView::build_in(&board, &Utc);
        assert_eq!(
            ready.form.preview,
            Some(ImageSummary {
                media_type: "image/png".into(),
                bytes: 3
            })
        );
    }

    #[test]
    fn test_image_summary_display() {
        let small = ImageSummary { media_type: "image/gif".into(), bytes: 512 };
        let medium = ImageSummary { media_type: "image/png".into(), bytes: 1536 };
        let large = ImageSummary { media_type: "image/jpeg".into(), bytes: 3 * 1024 * 1024 };

        assert_eq!(small.to_string(), "image/gif, 512 B");
        assert_eq!(medium.to_string(), "image/png, 1.5 KB");
        assert_eq!(large.to_string(), "image/jpeg, 3.0 MB");
    }

    #[test]
    fn test_serializes_for_other_front_ends() {
        let mut board = board();
        board.toggle_theme();

        let json = serde_json::to_value(BoardView::build_in(&board, &Utc)).unwrap();
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["form"]["submit_label"], "Add");
        assert_eq!(json["form"]["emoji"].as_array().unwrap().len(), EMOJI_PALETTE.len());
        assert!(json["form"].get("focus").is_none());
    }
}
