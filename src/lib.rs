// Library root
// ------------
// The binary (`main.rs`) parses arguments and hands off to these modules.
//
// Module responsibilities:
// - `cli`: clap definitions of the subcommands and global flags.
// - `config`: per-invocation settings and credential file lookup.
// - `api`: the blocking HTTP transport and failure-envelope check.
// - `models`: typed payloads and the defaults for missing fields.
// - `time`: relative timestamps ("3h ago").
// - `ui`: text rendering of feeds, posts, comment threads and profiles.
// - `commands`: maps each subcommand to a request and a renderer.
// - `error`: the error kinds that end an invocation.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod time;
pub mod ui;
