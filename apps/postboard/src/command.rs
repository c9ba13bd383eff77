//! Line-oriented command language for the terminal front-end.

use std::path::PathBuf;

use postboard_core::EMOJI_PALETTE;

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Title(String),
    Comment(String),
    Image(PathBuf),
    ClearImage,
    Clear,
    Submit,
    Edit(String),
    Delete(String),
    Emoji(String),
    Theme,
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command {0:?}. Type `help` for the list.")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("No emoji #{0}; pick 1-{max}", max = EMOJI_PALETTE.len())]
    NoSuchEmoji(usize),
}

pub const HELP: &str = "\
title <text>      set the title
comment <text>    set the comment (\\n starts a new line)
image <path>      attach an image file
clear-image       remove the attached image
clear             reset the form and stop editing
submit            add the post, or update the one being edited
edit <n>          load post n (or its id) into the form
delete <n>        delete post n (or its id), after confirmation
emoji <n|glyph>   append palette emoji n, or any glyph, to the comment
theme             toggle light/dark
show              redraw the board
help              this text
quit              exit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (line.trim_end(), ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        // Title and comment keep their text as typed; the board trims on submit.
        "title" => Command::Title(rest.to_string()),
        "comment" => Command::Comment(rest.replace("\\n", "\n")),
        "image" => Command::Image(PathBuf::from(required("image", rest)?)),
        "clear-image" => Command::ClearImage,
        "clear" => Command::Clear,
        "submit" | "add" | "update" => Command::Submit,
        "edit" => Command::Edit(required("edit", rest)?.to_string()),
        "delete" | "rm" => Command::Delete(required("delete", rest)?.to_string()),
        "emoji" => Command::Emoji(emoji(required("emoji", rest)?)?),
        "theme" => Command::Theme,
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

/// `y`/`yes`, any case. Everything else declines.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn required<'a>(verb: &'static str, rest: &'a str) -> Result<&'a str, CommandError> {
    match rest.trim() {
        "" => Err(CommandError::MissingArgument(verb)),
        arg => Ok(arg),
    }
}

fn emoji(arg: &str) -> Result<String, CommandError> {
    match arg.parse::<usize>() {
        Ok(n) => n
            .checked_sub(1)
            .and_then(|i| EMOJI_PALETTE.get(i))
            .map(|glyph| glyph.to_string())
            .ok_or(CommandError::NoSuchEmoji(n)),
        Err(_) => Ok(arg.to_string()),
    }
}
