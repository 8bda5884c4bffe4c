// UI layer: turns typed payloads into the text shown on stdout. Every
// renderer returns a `String`; the caller writes it out in one go, so a
// command that fails never leaves half its output behind.

use crate::models::{
    comment_author_name, signed, submolt_name, Comment, Post, Submolt, User,
};
use crate::time::format_time;
use std::fmt::Write;

/// Replies nested deeper than this are collapsed into a single marker line.
pub const MAX_COMMENT_DEPTH: usize = 64;

const RULE_WIDTH: usize = 40;

/// One feed entry per post, separated by blank lines.
pub fn render_feed(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "No posts found\n".into();
    }
    let mut out = String::new();
    for post in posts {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", post.title.as_deref().unwrap_or("Untitled"));
        let _ = writeln!(
            out,
            "  {} points | {} comments | {}",
            signed(post.score()),
            post.comment_count,
            format_time(post.created_at.as_deref())
        );
        let _ = writeln!(out, "  by {} in {}", post.author_name(), submolt_name(post));
        let _ = writeln!(out, "  id: {}", post.id.as_deref().unwrap_or(""));
    }
    out
}

/// A post header, its body between rules, then the comment thread.
pub fn render_post(post: &Post, comments: &[Comment]) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", post.title.as_deref().unwrap_or("Untitled"));
    let _ = writeln!(
        out,
        "by {} | {} points | {}",
        post.author_name(),
        signed(post.score()),
        format_time(post.created_at.as_deref())
    );
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}", post.content.as_deref().unwrap_or(""));
    let _ = writeln!(out, "{}", rule);

    if comments.is_empty() {
        let _ = writeln!(out, "\nNo comments yet");
    } else {
        let _ = writeln!(out, "\nComments ({}):", comments.len());
        out.push_str(&render_comments(comments, 0));
    }
    out
}

/// Render a reply tree depth-first, siblings in server order, two spaces of
/// indentation per level starting at `indent`.
///
/// Walks an explicit stack rather than recursing, and stops descending at
/// [`MAX_COMMENT_DEPTH`].
pub fn render_comments(comments: &[Comment], indent: usize) -> String {
    let mut out = String::new();
    // Reversed so the first sibling is popped first.
    let mut stack: Vec<(&Comment, usize)> = comments.iter().rev().map(|c| (c, indent)).collect();

    while let Some((c, depth)) = stack.pop() {
        let prefix = "  ".repeat(depth);
        let _ = writeln!(
            out,
            "{}{} ({}) {}",
            prefix,
            comment_author_name(c),
            signed(c.score()),
            format_time(c.created_at.as_deref())
        );
        let _ = writeln!(out, "{}  {}", prefix, c.content.as_deref().unwrap_or(""));

        if c.replies.is_empty() {
            continue;
        }
        if depth + 1 - indent >= MAX_COMMENT_DEPTH {
            let _ = writeln!(out, "{}  [deeper replies hidden]", prefix);
            continue;
        }
        stack.extend(c.replies.iter().rev().map(|r| (r, depth + 1)));
    }
    out
}

pub fn render_user(user: &User) -> String {
    let username = user.username.as_deref().unwrap_or("");
    let heading = user
        .name
        .as_deref()
        .or(user.username.as_deref())
        .unwrap_or("Unknown");

    let mut out = String::new();
    let _ = writeln!(out, "\n{}", heading);
    let _ = writeln!(out, "@{}", username);
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
        let _ = writeln!(out, "\n{}", bio);
    }
    let _ = writeln!(out, "\nKarma: {}", user.karma);
    let _ = writeln!(out, "Followers: {}", user.follower_count);
    let _ = writeln!(out, "Following: {}", user.following_count);
    let _ = writeln!(out, "Joined: {}", format_time(user.created_at.as_deref()));
    out
}

pub fn render_submolts(submolts: &[Submolt]) -> String {
    if submolts.is_empty() {
        return "No submolts found\n".into();
    }
    let mut out = String::new();
    for s in submolts {
        let name = s.name.as_deref().unwrap_or("");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} (m/{})",
            s.display_name.as_deref().unwrap_or(name),
            name
        );
        if let Some(desc) = s.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "  {}", desc);
        }
        let _ = writeln!(out, "  {} members", s.member_count);
    }
    out
}
