//! Plain-text views of board snapshots for the command line.

use std::borrow::Cow;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use minijinja::{Environment, context};
use regex::Regex;
use serde::Serialize;

use crate::board::{GroupEntry, GroupPage};
use crate::core::preview::{is_truncated, preview};
use crate::model::Thread;

const GROUPS_TEMPLATE: &str = include_str!("templates/groups.txt");
const GROUP_PAGE_TEMPLATE: &str = include_str!("templates/group_page.txt");

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern should be valid"));

/// Collapse whitespace runs (including newlines) into single spaces.
pub fn single_line(text: &str) -> Cow<'_, str> {
    let trimmed = text.trim();
    WHITESPACE_RE.replace_all(trimmed, " ")
}

#[derive(Debug, Clone, Serialize)]
struct GroupRow<'a> {
    id: &'a str,
    name: Cow<'a, str>,
    description: Cow<'a, str>,
    joined: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ThreadView<'a> {
    id: &'a str,
    title: Cow<'a, str>,
    has_image: bool,
    body_lines: Vec<String>,
    truncated: bool,
    replies: Vec<ReplyView<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct ReplyView<'a> {
    id: &'a str,
    content: Cow<'a, str>,
}

impl<'a> ThreadView<'a> {
    fn from_thread(thread: &'a Thread, preview_chars: Option<usize>) -> Self {
        let (body, truncated) = match preview_chars {
            Some(limit) => (
                preview(&thread.content, limit),
                is_truncated(&thread.content, limit),
            ),
            None => (Cow::Borrowed(thread.content.as_str()), false),
        };
        Self {
            id: &thread.id,
            title: single_line(&thread.title),
            has_image: thread.image.is_some(),
            body_lines: body.lines().map(str::to_string).collect(),
            truncated,
            replies: thread
                .replies
                .iter()
                .map(|reply| ReplyView {
                    id: &reply.id,
                    content: single_line(&reply.content),
                })
                .collect(),
        }
    }
}

/// Template engine wrapper around minijinja.
pub struct Renderer {
    env: Environment<'static>,
    preview_chars: usize,
}

impl Renderer {
    pub fn new(preview_chars: usize) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("groups.txt", GROUPS_TEMPLATE)
            .context("load groups template")?;
        env.add_template("group_page.txt", GROUP_PAGE_TEMPLATE)
            .context("load group page template")?;
        Ok(Self { env, preview_chars })
    }

    pub fn groups(&self, entries: &[GroupEntry]) -> Result<String> {
        let rows: Vec<GroupRow<'_>> = entries
            .iter()
            .map(|entry| GroupRow {
                id: &entry.group.id,
                name: single_line(&entry.group.name),
                description: single_line(&entry.group.description),
                joined: entry.joined,
            })
            .collect();
        let template = self.env.get_template("groups.txt")?;
        Ok(template.render(context! { groups => rows })?)
    }

    /// Render a group page. Thread bodies are cut to the preview length
    /// unless `full` is set.
    pub fn group_page(&self, page: &GroupPage<'_>, full: bool) -> Result<String> {
        let limit = (!full).then_some(self.preview_chars);
        let threads: Vec<ThreadView<'_>> = page
            .threads
            .iter()
            .map(|thread| ThreadView::from_thread(thread, limit))
            .collect();
        let template = self.env.get_template("group_page.txt")?;
        Ok(template.render(context! {
            group => &page.group,
            joined => page.joined,
            threads => threads,
        })?)
    }
}
