use lichtbild_common::model::post::Post;
use std::io::{self, Write};

/// Renders the feed, newest post first, numbered for the comment form.
pub fn feed<W: Write>(output: &mut W, posts: &[Post]) -> io::Result<()> {
    if posts.is_empty() {
        writeln!(output, "No posts yet.")?;
        return Ok(());
    }

    for (number, post) in (1..).zip(posts) {
        writeln!(output)?;
        writeln!(output, "#{number} {}", post.author.username)?;
        writeln!(output, "   image: {}", post.image_url)?;
        writeln!(output, "   {}: {}", post.author.username, post.description)?;
        for comment in &post.comments {
            writeln!(output, "   - {comment}")?;
        }
    }

    Ok(())
}
