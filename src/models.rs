// Typed views of the API payloads. Nested objects the server may omit or
// send as `null` are `Option`s, so the "anonymous"/"general" defaults live
// in one place instead of being scattered across renderers.

use serde::{Deserialize, Deserializer};

/// User summary embedded in posts and comments.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Author {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    /// Display name. Comments carry this one, not `username`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub karma: Option<i64>,
}

/// Community summary embedded in posts.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SubmoltRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Post {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub submolt: Option<SubmoltRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvotes: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downvotes: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Comment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvotes: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downvotes: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    /// `None` for top-level comments.
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub replies: Vec<Comment>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub karma: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub follower_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub following_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Submolt {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub member_count: u64,
}

// Response bodies, one per endpoint family.

#[derive(Deserialize, Debug, Default)]
pub struct FeedResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts: Vec<Post>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PostResponse {
    #[serde(default)]
    pub post: Option<Post>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UserResponse {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SubmoltsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub submolts: Vec<Submolt>,
}

/// Reply to create/delete/comment/vote calls.
#[derive(Deserialize, Debug, Default)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub post: Option<Post>,
    #[serde(default)]
    pub comment: Option<Comment>,
}

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Post author's username, or "anonymous".
pub fn author_name(author: Option<&Author>) -> &str {
    author
        .and_then(|a| a.username.as_deref())
        .unwrap_or("anonymous")
}

/// Comment author's display name, or "anonymous". Comments key on `name`.
pub fn comment_author_name(comment: &Comment) -> &str {
    comment
        .author
        .as_ref()
        .and_then(|a| a.name.as_deref())
        .unwrap_or("anonymous")
}

pub fn submolt_name(post: &Post) -> &str {
    post.submolt
        .as_ref()
        .and_then(|s| s.name.as_deref())
        .unwrap_or("general")
}

/// Net votes. May be negative.
pub fn score(upvotes: i64, downvotes: i64) -> i64 {
    upvotes - downvotes
}

/// Score with an explicit sign: `+8`, `-8`, `+0`.
pub fn signed(score: i64) -> String {
    format!("{:+}", score)
}

impl Post {
    pub fn score(&self) -> i64 {
        score(self.upvotes, self.downvotes)
    }

    pub fn author_name(&self) -> &str {
        author_name(self.author.as_ref())
    }
}

impl Comment {
    pub fn score(&self) -> i64 {
        score(self.upvotes, self.downvotes)
    }
}
