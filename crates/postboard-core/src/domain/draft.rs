use std::fmt;
use std::path::{Path, PathBuf};

/// Form fields that can hold input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Comment,
}

/// A raw image file picked by the user, before encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelection {
    path: PathBuf,
}

impl ImageSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Identity of one image selection.
///
/// Tickets are strictly increasing per board, so an encoding result can be
/// matched against the selection that is current when it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageTicket(pub(crate) u64);

impl fmt::Display for ImageTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingImage {
    pub(crate) selection: ImageSelection,
    pub(crate) ticket: ImageTicket,
}

/// Transient compose/edit buffer. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub(crate) title: String,
    pub(crate) comment: String,
    pub(crate) pending_image: Option<PendingImage>,
    pub(crate) preview: Option<String>,
}

impl Draft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// The raw file selection, if one has been made since the form was last
    /// reset. Starting an edit never restores this.
    pub fn pending_image(&self) -> Option<&ImageSelection> {
        self.pending_image.as_ref().map(|p| &p.selection)
    }

    /// Ticket of the selection whose encoding is still awaited.
    pub fn pending_ticket(&self) -> Option<ImageTicket> {
        self.pending_image.as_ref().map(|p| p.ticket)
    }

    /// Encoded image currently shown in the preview.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.comment.is_empty()
            && self.pending_image.is_none()
            && self.preview.is_none()
    }

    pub(crate) fn clear_image(&mut self) {
        self.pending_image = None;
        self.preview = None;
    }
}
