// Command dispatcher: maps each subcommand to one API call and picks the
// renderer. Returns the complete stdout text so `main` can print it once.

use crate::api::{decode, handle_error, ApiClient};
use crate::cli::Command;
use crate::error::CliError;
use crate::models::{ActionResponse, FeedResponse, PostResponse, SubmoltsResponse, UserResponse};
use crate::ui;
use serde_json::{json, Value};
use tracing::debug;

/// Rendering options that apply to every command.
#[derive(Clone, Debug)]
pub struct Output {
    /// Print the decoded body pretty-printed instead of formatted text.
    pub json: bool,
    /// Prefix for relative post URLs.
    pub web_url: String,
}

#[derive(Clone, Copy)]
enum Vote {
    Up,
    Down,
}

impl Vote {
    fn path(self) -> &'static str {
        match self {
            Vote::Up => "upvote",
            Vote::Down => "downvote",
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            Vote::Up => "Upvoted!",
            Vote::Down => "Downvoted!",
        }
    }
}

/// Run one command against the API and return what should go to stdout.
pub fn execute(api: &ApiClient, command: &Command, output: &Output) -> Result<String, CliError> {
    debug!(?command, "dispatching");
    match command {
        Command::Feed {
            sort,
            limit,
            submolt,
        } => {
            let mut query = vec![("sort", sort.as_str().to_string()), ("limit", limit.to_string())];
            if let Some(s) = submolt {
                query.push(("submolt", s.clone()));
            }
            let data = api.get("/posts", &query)?;
            read(data, output, |data| {
                let feed: FeedResponse = decode(data)?;
                Ok(ui::render_feed(&feed.posts))
            })
        }
        Command::Post { post_id } => {
            let data = api.get(&format!("/posts/{}", post_id), &[])?;
            read(data, output, |data| {
                if is_blank(data.get("post")) {
                    return Ok("Post not found\n".into());
                }
                let resp: PostResponse = decode(data)?;
                let post = resp.post.unwrap_or_default();
                Ok(ui::render_post(&post, &resp.comments))
            })
        }
        Command::User { username } => {
            let data = api.get(&format!("/users/{}", username), &[])?;
            read(data, output, |data| {
                if is_blank(data.get("user")) {
                    return Ok("User not found\n".into());
                }
                let resp: UserResponse = decode(data)?;
                Ok(ui::render_user(&resp.user.unwrap_or_default()))
            })
        }
        Command::Submolts => {
            let data = api.get("/submolts", &[])?;
            read(data, output, |data| {
                let resp: SubmoltsResponse = decode(data)?;
                Ok(ui::render_submolts(&resp.submolts))
            })
        }
        Command::Create {
            title,
            content,
            submolt,
        } => {
            let body = json!({"title": title, "content": content, "submolt": submolt});
            let data = api.post("/posts", Some(&body))?;
            write(data, output, |resp| {
                let post = resp.post.unwrap_or_default();
                let mut out = line(resp.message, "Post created!");
                if let Some(url) = post.url.filter(|u| !u.is_empty()) {
                    out.push_str(&format!("URL: {}{}\n", output.web_url, url));
                }
                out.push_str(&format!("ID: {}\n", post.id.unwrap_or_default()));
                out
            })
        }
        Command::Delete { post_id } => {
            let data = api.delete(&format!("/posts/{}", post_id))?;
            write(data, output, |resp| line(resp.message, "Post deleted"))
        }
        Command::Comment {
            post_id,
            content,
            reply_to,
        } => {
            let mut body = json!({"content": content});
            if let Some(parent) = reply_to {
                body["parent_id"] = json!(parent);
            }
            let data = api.post(&format!("/posts/{}/comments", post_id), Some(&body))?;
            write(data, output, |resp| {
                let id = resp.comment.and_then(|c| c.id).unwrap_or_default();
                let mut out = line(resp.message, "Comment added!");
                out.push_str(&format!("Comment ID: {}\n", id));
                out
            })
        }
        Command::Upvote { post_id } => vote(api, output, "posts", post_id, Vote::Up),
        Command::Downvote { post_id } => vote(api, output, "posts", post_id, Vote::Down),
        Command::UpvoteComment { comment_id } => {
            vote(api, output, "comments", comment_id, Vote::Up)
        }
        Command::DownvoteComment { comment_id } => {
            vote(api, output, "comments", comment_id, Vote::Down)
        }
    }
}

fn vote(
    api: &ApiClient,
    output: &Output,
    kind: &str,
    id: &str,
    vote: Vote,
) -> Result<String, CliError> {
    let data = api.post(&format!("/{}/{}/{}", kind, id, vote.path()), None)?;
    write(data, output, |resp| line(resp.message, vote.default_message()))
}

/// Read commands: raw JSON is passed through untouched; text mode checks
/// for a failure envelope before rendering.
fn read<F>(data: Value, output: &Output, render: F) -> Result<String, CliError>
where
    F: FnOnce(Value) -> Result<String, CliError>,
{
    if output.json {
        return pretty(&data);
    }
    handle_error(&data)?;
    render(data)
}

/// Write commands always check for a failure envelope first.
fn write<F>(data: Value, output: &Output, render: F) -> Result<String, CliError>
where
    F: FnOnce(ActionResponse) -> String,
{
    handle_error(&data)?;
    if output.json {
        return pretty(&data);
    }
    Ok(render(decode(data)?))
}

/// Absent, null or an object with no fields.
fn is_blank(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::Object(m)) => m.is_empty(),
        Some(_) => false,
    }
}

fn pretty(data: &Value) -> Result<String, CliError> {
    let mut s = serde_json::to_string_pretty(data).map_err(|_| CliError::Decode)?;
    s.push('\n');
    Ok(s)
}

fn line(message: Option<String>, default: &str) -> String {
    format!("{}\n", message.unwrap_or_else(|| default.to_string()))
}
