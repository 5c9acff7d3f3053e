//! The interactive form surface: the login/register form while logged out,
//! the feed with its new-post and comment forms while logged in. State
//! errors are shown as notifications and the loop continues; there is no
//! logout, only process exit.

use crate::ui::forms::{AuthSubmit, Command};
use lichtbild_common::model::user::{User, Username};
use lichtbild_state::store::{SessionState, StateError};
use std::io::{self, BufRead, Write};

mod forms;
mod render;

const DEMO_USERNAMES: [&str; 2] = ["john_doe", "jane_smith"];

/// Puts the demo accounts from the landing page into the registry without
/// logging anyone in.
pub fn seed_demo_users(state: &mut SessionState) -> Result<(), StateError> {
    for name in DEMO_USERNAMES {
        let username = Username::new(name.to_owned()).expect("Demo usernames are valid.");
        state.create_user(username)?;
    }

    Ok(())
}

/// Drives the form loop until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    state: &mut SessionState,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "Lichtbild")?;

    loop {
        let session = state.current_session().cloned();
        let keep_going = match session {
            None => auth_form(state, &mut input, &mut output)?,
            Some(user) => feed_form(state, &user, &mut input, &mut output)?,
        };

        if !keep_going {
            return Ok(());
        }
    }
}

fn auth_form<R: BufRead, W: Write>(
    state: &mut SessionState,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    writeln!(output, "Log in or register:")?;

    let Some(line) = read_line(input)? else {
        return Ok(false);
    };
    if line.trim().is_empty() {
        return Ok(true);
    }
    let Some(submit) = forms::parse_auth(&line) else {
        writeln!(output, "Usage: `login <username>` or `register <username>`")?;
        return Ok(true);
    };

    let result = match submit {
        AuthSubmit::Login(username) => state.login(&username),
        AuthSubmit::Register(username) => state.register(username),
    };
    match result {
        Ok(user) => {
            writeln!(output, "Welcome, {}", user.username)?;
            render::feed(output, state.posts())?;
        }
        Err(error) => notify(output, &error)?,
    }

    Ok(true)
}

fn feed_form<R: BufRead, W: Write>(
    state: &mut SessionState,
    user: &User,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    writeln!(output, "(post | comment <n> [text] | feed | quit)")?;

    let Some(line) = read_line(input)? else {
        return Ok(false);
    };
    if line.trim().is_empty() {
        return Ok(true);
    }
    let Some(command) = forms::parse_command(&line) else {
        writeln!(
            output,
            "Usage: `post`, `comment <post-number> [text]`, `feed` or `quit`"
        )?;
        return Ok(true);
    };

    match command {
        Command::NewPost => new_post_form(state, user, input, output),
        Command::Comment { post_number, text } => {
            comment_form(state, post_number, text, input, output)
        }
        Command::Feed => {
            render::feed(output, state.posts())?;
            Ok(true)
        }
        Command::Quit => Ok(false),
    }
}

fn new_post_form<R: BufRead, W: Write>(
    state: &mut SessionState,
    user: &User,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    writeln!(output, "Image URL:")?;
    let Some(image_line) = read_line(input)? else {
        return Ok(false);
    };
    let Some(image_url) = forms::field(&image_line) else {
        return Ok(true);
    };

    writeln!(output, "Description:")?;
    let Some(description_line) = read_line(input)? else {
        return Ok(false);
    };
    let Some(description) = forms::field(&description_line) else {
        return Ok(true);
    };

    state.create_post(user.clone(), image_url.to_owned(), description.to_owned());
    render::feed(output, state.posts())?;

    Ok(true)
}

fn comment_form<R: BufRead, W: Write>(
    state: &mut SessionState,
    post_number: usize,
    text: Option<String>,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    let post_id = post_number
        .checked_sub(1)
        .and_then(|index| state.posts().get(index))
        .map(|post| post.id);
    let Some(post_id) = post_id else {
        writeln!(output, "! There is no post #{post_number} on the feed.")?;
        return Ok(true);
    };

    let comment = match text {
        Some(text) => text,
        None => {
            writeln!(output, "Add a comment:")?;
            let Some(comment_line) = read_line(input)? else {
                return Ok(false);
            };
            let Some(comment) = forms::field(&comment_line) else {
                return Ok(true);
            };
            comment.to_owned()
        }
    };

    match state.add_comment(post_id, comment) {
        Ok(()) => render::feed(output, state.posts())?,
        Err(error) => notify(output, &error)?,
    }

    Ok(true)
}

fn notify<W: Write>(output: &mut W, error: &StateError) -> io::Result<()> {
    writeln!(output, "! {error}")
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}
