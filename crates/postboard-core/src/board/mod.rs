//! Board controller - owns the post list, the compose/edit draft, and the
//! theme, and writes posts and theme back to the store on every change.
//!
//! All operations run to completion on the caller's thread. The only
//! asynchronous step is image encoding, which is split into
//! [`Board::select_image`] and [`Board::apply_encoded`] so a front-end can run
//! the encoder elsewhere and hand the result back later.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    DEFAULT_TITLE, Draft, FormField, ImageSelection, ImageTicket, PendingImage, Post, Theme,
    UnknownTheme,
};
use crate::error::DomainError;
use crate::ports::{ConfirmPrompt, EncodeError, ImageEncoder, KeyValueStore, StorageKeys};


/// Quick-insert glyphs offered under the comment field.
pub const EMOJI_PALETTE: [&str; 8] = ["😀", "😂", "😍", "👍", "🎉", "🔥", "❤️", "😢"];

/// Result of submitting the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new post was prepended.
    Created(Uuid),
    /// The post being edited was revised in place.
    Updated(Uuid),
    /// The post being edited no longer exists. Nothing changed except the
    /// form, which was reset.
    StaleEdit(Uuid),
    /// Empty comment and no image. Nothing changed; focus is on the comment.
    Rejected,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Declined,
    NotFound,
}

/// The application state controller.
pub struct Board {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    posts: Vec<Post>,
    draft: Draft,
    editing_id: Option<Uuid>,
    theme: Theme,
    focus: Option<FormField>,
    last_ticket: u64,
}

impl Board {
    /// Load posts and theme from the store.
    ///
    /// Never fails: a missing key yields the default, unreadable or malformed
    /// data is logged and replaced by the default.
    pub fn load(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        let posts = Self::read_posts(store.as_ref(), &keys.posts).unwrap_or_else(|e| {
            tracing::warn!(key = %keys.posts, error = %e, "Stored posts unreadable, starting empty");
            Vec::new()
        });

        let theme = Self::read_theme(store.as_ref(), &keys.theme).unwrap_or_else(|e| {
            tracing::warn!(key = %keys.theme, error = %e, "Stored theme unreadable, using default");
            Theme::default()
        });

        tracing::info!(posts = posts.len(), theme = %theme, "Board loaded");

        Self {
            store,
            keys,
            posts,
            draft: Draft::default(),
            editing_id: None,
            theme,
            focus: None,
            last_ticket: 0,
        }
    }

    fn read_posts(store: &dyn KeyValueStore, key: &str) -> Result<Vec<Post>, DomainError> {
        match store.load(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn read_theme(store: &dyn KeyValueStore, key: &str) -> Result<Theme, DomainError> {
        match store.load(key)? {
            Some(raw) => raw
                .parse()
                .map_err(|e: UnknownTheme| DomainError::Validation(e.to_string())),
            None => Ok(Theme::default()),
        }
    }

    // --- Accessors ---

    /// Posts, newest first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: Uuid) -> Option<&Post> {
        self.posts.iter().find(|p| p.id() == id)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn editing_id(&self) -> Option<Uuid> {
        self.editing_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Field that should hold input focus after the last operation.
    pub fn focus(&self) -> Option<FormField> {
        self.focus
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() { "Update" } else { "Add" }
    }

    /// Resolve a user reference to a post: either a full post id or a
    /// 1-based position in the list.
    pub fn resolve(&self, reference: &str) -> Result<Uuid, DomainError> {
        let reference = reference.trim();

        if let Ok(id) = reference.parse::<Uuid>() {
            return self.post(id).map(Post::id).ok_or(DomainError::NotFound {
                entity_type: "post",
                id,
            });
        }

        match reference.parse::<usize>() {
            Ok(position) => position
                .checked_sub(1)
                .and_then(|index| self.posts.get(index))
                .map(Post::id)
                .ok_or(DomainError::NoSuchPosition(position)),
            Err(_) => Err(DomainError::Validation(format!(
                "expected a list position or post id, got {reference:?}"
            ))),
        }
    }

    // --- Draft input ---

    pub fn set_title(&mut self, title: &str) {
        self.draft.title = title.to_string();
        self.focus = Some(FormField::Title);
    }

    pub fn set_comment(&mut self, comment: &str) {
        self.draft.comment = comment.to_string();
        self.focus = Some(FormField::Comment);
    }

    /// Append a glyph verbatim to the comment.
    pub fn append_emoji(&mut self, glyph: &str) {
        self.draft.comment.push_str(glyph);
        self.focus = Some(FormField::Comment);
    }

    // --- Compose / edit ---

    /// Create a post from the draft, or revise the post being edited.
    pub fn submit_draft(&mut self) -> SubmitOutcome {
        let title = match self.draft.title.trim() {
            "" => DEFAULT_TITLE.to_string(),
            trimmed => trimmed.to_string(),
        };
        let comment = self.draft.comment.trim().to_string();
        let image = self.draft.preview.clone();

        if comment.is_empty() && image.is_none() {
            self.focus = Some(FormField::Comment);
            return SubmitOutcome::Rejected;
        }

        let outcome = match self.editing_id {
            Some(id) => match self.posts.iter_mut().find(|p| p.id() == id) {
                Some(post) => {
                    post.revise(title, comment, image);
                    self.persist_posts();
                    tracing::debug!(post_id = %id, "Post updated");
                    SubmitOutcome::Updated(id)
                }
                None => {
                    tracing::debug!(post_id = %id, "Edited post no longer exists");
                    SubmitOutcome::StaleEdit(id)
                }
            },
            None => {
                let post = Post::new(title, comment, image);
                let id = post.id();
                self.posts.insert(0, post);
                self.persist_posts();
                tracing::debug!(post_id = %id, total = self.posts.len(), "Post created");
                SubmitOutcome::Created(id)
            }
        };

        self.clear_form(true);
        outcome
    }

    /// Load a post into the draft for editing. Returns `false` if no post has
    /// that id.
    ///
    /// Only the encoded preview is restored, never a raw file selection; the
    /// user has to pick a file again to change the image.
    pub fn start_edit(&mut self, id: Uuid) -> bool {
        let Some(post) = self.post(id) else {
            return false;
        };

        self.draft = Draft {
            title: post.title().to_string(),
            comment: post.comment().to_string(),
            pending_image: None,
            preview: post.image().map(str::to_string),
        };
        self.editing_id = Some(id);
        self.focus = Some(FormField::Comment);

        tracing::debug!(post_id = %id, "Editing post");
        true
    }

    /// Delete a post after the user confirms.
    pub fn remove_post(&mut self, id: Uuid, prompt: &mut dyn ConfirmPrompt) -> RemoveOutcome {
        let Some(index) = self.posts.iter().position(|p| p.id() == id) else {
            return RemoveOutcome::NotFound;
        };

        let question = format!("Delete \"{}\"?", self.posts[index].title());
        if !prompt.confirm(&question) {
            return RemoveOutcome::Declined;
        }

        self.posts.remove(index);
        self.persist_posts();
        tracing::debug!(post_id = %id, total = self.posts.len(), "Post removed");
        RemoveOutcome::Removed
    }

    /// Reset the whole draft and leave edit mode. Posts are untouched.
    pub fn clear_form(&mut self, refocus: bool) {
        self.draft = Draft::default();
        self.editing_id = None;
        if refocus {
            self.focus = Some(FormField::Comment);
        }
    }

    // --- Image ---

    /// Record a raw file selection and return the ticket its encoding result
    /// must carry.
    pub fn select_image(&mut self, selection: ImageSelection) -> ImageTicket {
        self.last_ticket += 1;
        let ticket = ImageTicket(self.last_ticket);

        tracing::debug!(%ticket, path = %selection.path().display(), "Image selected");
        self.draft.pending_image = Some(PendingImage { selection, ticket });
        ticket
    }

    /// Apply an encoding result. Results for anything but the current
    /// selection are dropped; a failure keeps the previous preview.
    ///
    /// Returns `true` when the preview changed.
    pub fn apply_encoded(&mut self, ticket: ImageTicket, result: Result<String, EncodeError>) -> bool {
        if self.draft.pending_ticket() != Some(ticket) {
            tracing::debug!(%ticket, "Discarding stale image encoding");
            return false;
        }

        match result {
            Ok(uri) => {
                self.draft.preview = Some(uri);
                true
            }
            Err(e) => {
                tracing::warn!(%ticket, error = %e, "Image encoding failed, keeping previous preview");
                false
            }
        }
    }

    /// Select and encode in one step.
    pub async fn attach_image(
        &mut self,
        encoder: &dyn ImageEncoder,
        selection: ImageSelection,
    ) -> bool {
        let ticket = self.select_image(selection.clone());
        let result = encoder.encode(&selection).await;
        self.apply_encoded(ticket, result)
    }

    /// Drop the raw selection and the preview. Other draft fields stay.
    pub fn clear_image(&mut self) {
        self.draft.clear_image();
    }

    // --- Theme ---

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.persist_theme();
        tracing::debug!(theme = %self.theme, "Theme toggled");
        self.theme
    }

    // --- Persistence ---

    fn persist_posts(&self) {
        let result = serde_json::to_string(&self.posts)
            .map_err(DomainError::from)
            .and_then(|raw| {
                self.store
                    .save(&self.keys.posts, &raw)
                    .map_err(DomainError::from)
            });

        if let Err(e) = result {
            tracing::error!(key = %self.keys.posts, error = %e, "Failed to persist posts");
        }
    }

    fn persist_theme(&self) {
        if let Err(e) = self.store.save(&self.keys.theme, self.theme.as_str()) {
            tracing::error!(key = %self.keys.theme, error = %e, "Failed to persist theme");
        }
    }
}
