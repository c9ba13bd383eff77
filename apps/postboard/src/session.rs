//! Interactive session - turns input lines and finished image encodings into
//! board operations, and redraws after each one.

use std::io::{self, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use uuid::Uuid;

use postboard_core::domain::{ImageSelection, ImageTicket};
use postboard_core::ports::{EncodeError, ImageEncoder};
use postboard_core::{Board, RemoveOutcome, SubmitOutcome};
use postboard_shared::BoardView;

use crate::command::{self, Command};
use crate::render;
use crate::state::AppState;

/// A finished encoding, tagged with the selection it belongs to.
pub type Encoded = (ImageTicket, Result<String, EncodeError>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    board: Board,
    encoder: Arc<dyn ImageEncoder>,
    encoded_tx: mpsc::UnboundedSender<Encoded>,
    /// Post awaiting a yes/no answer on the next line.
    pending_delete: Option<Uuid>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(state: AppState, out: W) -> (Self, mpsc::UnboundedReceiver<Encoded>) {
        let (encoded_tx, encoded_rx) = mpsc::unbounded_channel();
        let session = Self {
            board: state.board,
            encoder: state.encoder,
            encoded_tx,
            pending_delete: None,
            out,
        };
        (session, encoded_rx)
    }

    pub fn draw(&mut self) -> io::Result<()> {
        let text = render::render(&BoardView::build(&self.board));
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        let text = render::notice(self.board.theme(), message);
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        if self.pending_delete.is_none() {
            self.out.write_all(b"> ")?;
        }
        self.out.flush()
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        if let Some(id) = self.pending_delete.take() {
            let accepted = command::is_yes(line);
            match self.board.remove_post(id, &mut |_: &str| accepted) {
                RemoveOutcome::Removed => self.draw()?,
                RemoveOutcome::Declined => self.say("Kept.")?,
                RemoveOutcome::NotFound => {
                    tracing::debug!(post_id = %id, "Post to delete no longer exists");
                    self.draw()?;
                }
            }
            return Ok(Flow::Continue);
        }

        let parsed = match command::parse(line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                self.say(&e.to_string())?;
                return Ok(Flow::Continue);
            }
        };

        tracing::trace!(command = ?parsed, "Handling command");

        match parsed {
            Command::Title(title) => {
                self.board.set_title(&title);
                self.draw()?;
            }
            Command::Comment(comment) => {
                self.board.set_comment(&comment);
                self.draw()?;
            }
            Command::Image(path) => {
                let selection = ImageSelection::new(path);
                let ticket = self.board.select_image(selection.clone());
                self.spawn_encode(ticket, selection);
                self.draw()?;
            }
            Command::ClearImage => {
                self.board.clear_image();
                self.draw()?;
            }
            Command::Clear => {
                self.board.clear_form(true);
                self.draw()?;
            }
            Command::Submit => match self.board.submit_draft() {
                SubmitOutcome::Rejected => {
                    self.say("Write a comment or attach an image first.")?;
                }
                SubmitOutcome::StaleEdit(id) => {
                    tracing::debug!(post_id = %id, "Edited post is gone, draft discarded");
                    self.draw()?;
                }
                SubmitOutcome::Created(_) | SubmitOutcome::Updated(_) => self.draw()?,
            },
            Command::Edit(reference) => match self.board.resolve(&reference) {
                Ok(id) => {
                    self.board.start_edit(id);
                    self.draw()?;
                }
                Err(e) => self.say(&e.to_string())?,
            },
            Command::Delete(reference) => match self.board.resolve(&reference) {
                Ok(id) => {
                    self.pending_delete = Some(id);
                    self.ask_delete()?;
                }
                Err(e) => self.say(&e.to_string())?,
            },
            Command::Emoji(glyph) => {
                self.board.append_emoji(&glyph);
                self.draw()?;
            }
            Command::Theme => {
                self.board.toggle_theme();
                self.draw()?;
            }
            Command::Show => self.draw()?,
            Command::Help => writeln!(self.out, "{}", command::HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Print the yes/no question for the post awaiting deletion, if any.
    fn ask_delete(&mut self) -> io::Result<()> {
        let Some(id) = self.pending_delete else {
            return Ok(());
        };
        let title = self
            .board
            .post(id)
            .map(|p| p.title().to_string())
            .unwrap_or_default();
        write!(self.out, "Delete \"{title}\"? [y/N] ")?;
        self.out.flush()
    }

    /// Apply a finished encoding. Anything printed here lands after an open
    /// delete question, so the question is asked again.
    pub fn handle_encoded(&mut self, (ticket, result): Encoded) -> io::Result<()> {
        let current = self.board.draft().pending_ticket() == Some(ticket);
        let failure = result.as_ref().err().map(ToString::to_string);

        if self.board.apply_encoded(ticket, result) {
            self.draw()?;
        } else if let (true, Some(reason)) = (current, failure) {
            self.say(&format!("Could not attach image: {reason}"))?;
        } else {
            return Ok(());
        }
        self.ask_delete()
    }

    fn spawn_encode(&self, ticket: ImageTicket, selection: ImageSelection) {
        let encoder = self.encoder.clone();
        let tx = self.encoded_tx.clone();

        tokio::spawn(async move {
            let result = encoder.encode(&selection).await;
            // The receiver only goes away when the session has ended.
            let _ = tx.send((ticket, result));
        });
    }

    #[cfg(test)]
    fn board(&self) -> &Board {
        &self.board
    }
}

/// Run the interactive loop on stdin/stdout until `quit` or end of input.
pub async fn run(state: AppState) -> anyhow::Result<()> {
    let (mut session, mut encoded_rx) = Session::new(state, io::stdout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    session.draw()?;
    session.prompt()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if session.handle_line(&line)? == Flow::Quit {
                    break;
                }
            }
            Some(encoded) = encoded_rx.recv() => session.handle_encoded(encoded)?,
        }
        session.prompt()?;
    }

    tracing::info!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use postboard_core::ports::StorageKeys;
    use postboard_infra::{DataUriEncoder, InMemoryStore};

    use super::*;

    fn session() -> (Session<Vec<u8>>, mpsc::UnboundedReceiver<Encoded>) {
        let state = AppState {
            board: Board::load(Arc::new(InMemoryStore::new()), StorageKeys::default()),
            encoder: Arc::new(DataUriEncoder::default()),
        };
        Session::new(state, Vec::new())
    }

    fn feed(session: &mut Session<Vec<u8>>, lines: &[&str]) {
        for line in lines {
            assert_eq!(session.handle_line(line).unwrap(), Flow::Continue, "{line}");
        }
    }

    fn output(session: &mut Session<Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(&mut session.out)).unwrap()
    }

    #[test]
    fn test_trip_scenario_through_commands() {
        let (mut session, _rx) = session();

        feed(&mut session, &["title Trip", "comment Great day", "submit"]);
        feed(&mut session, &["title", "comment second", "add"]);
        assert_eq!(session.board().posts().len(), 2);
        assert_eq!(session.board().posts()[0].comment(), "second");

        feed(&mut session, &["edit 2", "comment Amazing day", "update"]);
        assert_eq!(session.board().posts()[1].comment(), "Amazing day");

        feed(&mut session, &["delete 1"]);
        assert!(output(&mut session).ends_with("Delete \"Untitled\"? [y/N] "));
        feed(&mut session, &["y"]);

        let posts = session.board().posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title(), "Trip");
        assert_eq!(posts[0].comment(), "Amazing day");
    }

    #[test]
    fn test_delete_declined_by_default() {
        let (mut session, _rx) = session();
        feed(&mut session, &["comment keep me", "submit", "delete 1", ""]);

        assert_eq!(session.board().posts().len(), 1);
        assert!(output(&mut session).contains("Kept."));
    }

    #[test]
    fn test_invalid_submit_reports_and_keeps_draft() {
        let (mut session, _rx) = session();
        feed(&mut session, &["title Only a title", "comment   ", "submit"]);

        assert!(session.board().posts().is_empty());
        assert_eq!(session.board().draft().title(), "Only a title");
        assert!(output(&mut session).contains("Write a comment or attach an image first."));
    }

    #[test]
    fn test_bad_references_and_commands_are_reported() {
        let (mut session, _rx) = session();
        feed(&mut session, &["edit 4", "delete abc", "frobnicate"]);

        let text = output(&mut session);
        assert!(text.contains("No post at position 4"));
        assert!(text.contains("expected a list position or post id"));
        assert!(text.contains("Unknown command"));
    }

    #[test]
    fn test_emoji_and_theme() {
        let (mut session, _rx) = session();
        feed(&mut session, &["comment hi", "emoji 6", "theme"]);

        assert_eq!(session.board().draft().comment(), "hi🔥");
        assert_eq!(
            session.board().theme(),
            postboard_core::domain::Theme::Dark
        );
    }

    #[test]
    fn test_quit() {
        let (mut session, _rx) = session();
        assert_eq!(session.handle_line("quit").unwrap(), Flow::Quit);
    }

    #[tokio::test]
    async fn test_image_attaches_when_encoding_arrives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();

        let (mut session, mut rx) = session();
        let attach = format!("image {}", path.display());
        feed(&mut session, &[attach.as_str()]);
        assert_eq!(session.board().draft().preview(), None);

        let encoded = rx.recv().await.unwrap();
        session.handle_encoded(encoded).unwrap();

        let preview = session.board().draft().preview().unwrap();
        assert!(preview.starts_with("data:image/png;base64,"));

        feed(&mut session, &["submit"]);
        assert!(session.board().posts()[0].image().is_some());
    }

    #[tokio::test]
    async fn test_encoding_for_cleared_image_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();

        let (mut session, mut rx) = session();
        let attach = format!("image {}", path.display());
        feed(&mut session, &[attach.as_str(), "clear-image"]);

        let encoded = rx.recv().await.unwrap();
        session.handle_encoded(encoded).unwrap();
        assert_eq!(session.board().draft().preview(), None);
    }

    #[tokio::test]
    async fn test_failed_encoding_is_reported() {
        let (mut session, mut rx) = session();
        feed(&mut session, &["image /no/such/file.png"]);
        output(&mut session);

        let encoded = rx.recv().await.unwrap();
        session.handle_encoded(encoded).unwrap();

        assert!(output(&mut session).contains("Could not attach image"));
        assert_eq!(session.board().draft().preview(), None);
    }

    #[test]
    fn test_stale_edit_and_delete_are_silent() {
        let (mut session, _rx) = session();
        feed(&mut session, &["comment a", "submit", "edit 1", "delete 1", "y"]);
        assert!(session.board().posts().is_empty());
        assert!(session.board().is_editing());

        feed(&mut session, &["comment edited", "submit"]);
        assert!(session.board().posts().is_empty());
        assert!(!session.board().is_editing());

        let text = output(&mut session);
        assert!(!text.contains("no longer exists"));
        assert!(!text.contains("already gone"));
    }

    #[test]
    fn test_delete_of_vanished_post_only_redraws() {
        let (mut session, _rx) = session();
        feed(&mut session, &["comment a", "submit", "delete 1"]);
        let id = session.board().posts()[0].id();
        session.board.remove_post(id, &mut |_: &str| true);
        output(&mut session);

        feed(&mut session, &["y"]);
        let text = output(&mut session);
        assert!(text.contains("No posts yet."));
        assert!(!text.contains("Kept."));
    }

    #[tokio::test]
    async fn test_delete_question_survives_encoding_redraw() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();

        let (mut session, mut rx) = session();
        feed(&mut session, &["title Old", "comment bye", "submit"]);
        let attach = format!("image {}", path.display());
        feed(&mut session, &[attach.as_str(), "delete 1"]);
        output(&mut session);

        let encoded = rx.recv().await.unwrap();
        session.handle_encoded(encoded).unwrap();
        assert!(session.board().draft().preview().is_some());
        assert!(output(&mut session).ends_with("Delete \"Old\"? [y/N] "));

        feed(&mut session, &["y"]);
        assert!(session.board().posts().is_empty());
    }

    #[tokio::test]
    async fn test_failed_encoding_during_delete_question_asks_again() {
        let (mut session, mut rx) = session();
        feed(&mut session, &["comment keep", "submit", "image /no/such/file.png", "delete 1"]);
        output(&mut session);

        let encoded = rx.recv().await.unwrap();
        session.handle_encoded(encoded).unwrap();
        let text = output(&mut session);
        assert!(text.contains("Could not attach image"));
        assert!(text.ends_with("Delete \"Untitled\"? [y/N] "));

        feed(&mut session, &["n"]);
        assert_eq!(session.board().posts().len(), 1);
    }
}
