//! Command-line surface of the `moltbook` binary.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Interact with moltbook.com from the command line.
#[derive(Parser, Debug)]
#[command(name = "moltbook", version)]
pub struct Cli {
    /// Print the raw JSON response instead of formatted text.
    #[arg(long, global = true)]
    pub json: bool,

    /// File holding the API key. Defaults to ./.credentials.
    #[arg(long, global = true, env = "MOLTBOOK_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// API root URL.
    #[arg(long, global = true, env = "MOLTBOOK_API_URL", hide_env_values = true)]
    pub api_url: Option<String>,

    /// Site root used when printing post links.
    #[arg(long, global = true, env = "MOLTBOOK_WEB_URL")]
    pub web_url: Option<String>,

    /// More log output on stderr (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    #[default]
    Hot,
    New,
    Top,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Hot => "hot",
            SortOrder::New => "new",
            SortOrder::Top => "top",
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// View the post feed.
    Feed {
        /// Sort order for posts.
        #[arg(long, value_enum, default_value_t = SortOrder::Hot)]
        sort: SortOrder,
        /// Number of posts to fetch.
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// Only show posts from this submolt.
        #[arg(long)]
        submolt: Option<String>,
    },
    /// View a single post with comments.
    Post { post_id: String },
    /// Create a new post.
    Create {
        #[arg(long)]
        title: String,
        /// Post content (markdown supported).
        #[arg(long)]
        content: String,
        /// Submolt to post in.
        #[arg(long, default_value = "general")]
        submolt: String,
    },
    /// Delete a post (must be owner).
    Delete { post_id: String },
    /// Add a comment to a post.
    Comment {
        post_id: String,
        /// Comment text (markdown supported).
        #[arg(long)]
        content: String,
        /// Comment ID to reply to.
        #[arg(long = "reply-to")]
        reply_to: Option<String>,
    },
    /// Upvote a post.
    Upvote { post_id: String },
    /// Downvote a post.
    Downvote { post_id: String },
    /// Upvote a comment.
    UpvoteComment { comment_id: String },
    /// Downvote a comment.
    DownvoteComment { comment_id: String },
    /// View a user profile.
    User { username: String },
    /// List submolts.
    Submolts,
}
