//! Terminal rendering of board views.
//!
//! The theme picks the palette for every element, so toggling it changes the
//! whole screen on the next draw.

use std::fmt;

use crossterm::style::{Color, Stylize};

use postboard_core::domain::{FormField, Theme};
use postboard_shared::{BoardView, FormView, PostView};

struct Palette {
    heading: Color,
    text: Color,
    muted: Color,
    accent: Color,
    warn: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            heading: Color::DarkBlue,
            text: Color::Black,
            muted: Color::DarkGrey,
            accent: Color::DarkMagenta,
            warn: Color::DarkRed,
        },
        Theme::Dark => Palette {
            heading: Color::Cyan,
            text: Color::White,
            muted: Color::Grey,
            accent: Color::Magenta,
            warn: Color::Red,
        },
    }
}

/// Draw the form followed by the list.
pub fn render(view: &BoardView) -> String {
    Screen(view).to_string()
}

/// A full redraw of one board view.
struct Screen<'a>(&'a BoardView);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let p = palette(view.theme);

        let mode = match view.theme {
            Theme::Light => "☀ light",
            Theme::Dark => "☾ dark",
        };
        writeln!(f, "{}  {}", "postboard".bold().with(p.heading), mode.with(p.muted))?;
        writeln!(f)?;

        write_form(f, &view.form, &p)?;
        writeln!(f)?;
        write_posts(f, &view.posts, &p)
    }
}

fn write_form(f: &mut fmt::Formatter<'_>, form: &FormView, p: &Palette) -> fmt::Result {
    let heading = if form.editing { "Edit post" } else { "New post" };
    writeln!(f, "{}", heading.bold().with(p.heading))?;

    let marker = |field: FormField| if form.focus == Some(field) { "›" } else { " " };

    writeln!(
        f,
        "{} {} {}",
        marker(FormField::Title).with(p.accent),
        "title  ".with(p.muted),
        form.title.as_str().with(p.text)
    )?;

    let mut lines = form.comment.split('\n');
    let first = lines.next().unwrap_or_default();
    writeln!(
        f,
        "{} {} {}",
        marker(FormField::Comment).with(p.accent),
        "comment".with(p.muted),
        first.with(p.text)
    )?;
    for line in lines {
        writeln!(f, "          {}", line.with(p.text))?;
    }

    if let Some(file) = &form.selected_file {
        writeln!(f, "  {} {}", "file   ".with(p.muted), file.as_str().with(p.text))?;
    }
    if let Some(preview) = &form.preview {
        writeln!(
            f,
            "  {} {}",
            "preview".with(p.muted),
            format!("[image: {preview}]").with(p.accent)
        )?;
    }

    let palette_line = form
        .emoji
        .iter()
        .enumerate()
        .map(|(i, glyph)| format!("{}:{glyph}", i + 1))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(f, "  {} {}", "emoji  ".with(p.muted), palette_line)?;
    writeln!(
        f,
        "  [{}]  [clear]  [clear-image]",
        form.submit_label.bold().with(p.accent)
    )
}

fn write_posts(f: &mut fmt::Formatter<'_>, posts: &[PostView], p: &Palette) -> fmt::Result {
    if posts.is_empty() {
        return writeln!(f, "{}", "No posts yet.".with(p.muted));
    }

    for post in posts {
        let editing = if post.editing { " (editing)" } else { "" };
        writeln!(
            f,
            "{} {}  {}{}",
            format!("{}.", post.position).with(p.muted),
            post.title.as_str().bold().with(p.heading),
            post.created_at.as_str().with(p.muted),
            editing.with(p.warn)
        )?;
        for line in &post.comment_lines {
            writeln!(f, "   {}", line.as_str().with(p.text))?;
        }
        if let Some(image) = &post.image {
            writeln!(f, "   {}", format!("[image: {image}]").with(p.accent))?;
        }
        writeln!(
            f,
            "   {}",
            format!("[edit {0}] [delete {0}]", post.position).with(p.muted)
        )?;
    }
    Ok(())
}

/// A one-line message in the theme's colours.
pub fn notice(theme: Theme, message: &str) -> String {
    format!("{}\n", message.with(palette(theme).warn))
}
