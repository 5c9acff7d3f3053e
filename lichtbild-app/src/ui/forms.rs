//! Parsing for the interactive forms. Non-empty validation lives here, at
//! the boundary; the state manager never re-checks it.

use lichtbild_common::model::user::Username;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum AuthSubmit {
    Login(Username),
    Register(Username),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Command {
    NewPost,
    Comment {
        post_number: usize,
        text: Option<String>,
    },
    Feed,
    Quit,
}

/// Parses a submission of the login/register form. `None` means the
/// submission is not acted on (empty or malformed input).
#[must_use]
pub fn parse_auth(line: &str) -> Option<AuthSubmit> {
    let (action, rest) = line.trim().split_once(' ')?;
    let username = Username::new(rest.trim().to_owned()).ok()?;

    match action {
        "login" => Some(AuthSubmit::Login(username)),
        "register" => Some(AuthSubmit::Register(username)),
        _ => None,
    }
}

/// Parses a command entered while logged in.
#[must_use]
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (action, rest) = match line.split_once(char::is_whitespace) {
        Some((action, rest)) => (action, rest.trim()),
        None => (line, ""),
    };

    match action {
        "post" if rest.is_empty() => Some(Command::NewPost),
        "feed" if rest.is_empty() => Some(Command::Feed),
        "quit" if rest.is_empty() => Some(Command::Quit),
        // `comment <n>` prompts for the text; `comment <n> <text...>`
        // carries it inline.
        "comment" => {
            let (number, text) = match rest.split_once(char::is_whitespace) {
                Some((number, text)) => (number, Some(text.trim().to_owned())),
                None => (rest, None),
            };
            number
                .parse()
                .ok()
                .map(|post_number| Command::Comment { post_number, text })
        }
        _ => None,
    }
}

/// A single text field. Whitespace-only submissions are ignored; accepted
/// input is passed on verbatim.
#[must_use]
pub fn field(input: &str) -> Option<&str> {
    (!input.trim().is_empty()).then_some(input)
}
