//! Saved post storage
//!
//! Posts are stored one record per platform as markdown files: a readable
//! body followed by a fenced JSON block that is parsed back on read.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const JSON_FENCE: &str = "\n```json\n";
const MAX_SLUG_LEN: usize = 48;

/// One persisted platform output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPost {
    pub id: u64,
    pub title: String,
    pub tone: String,
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Read-path filter
#[derive(Debug, Clone, Copy)]
pub struct PostQuery {
    pub user_id: Option<i64>,
    pub limit: usize,
    pub include_content: bool,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            limit: crate::config::constants::defaults::HISTORY_LIMIT,
            include_content: false,
        }
    }
}

pub trait PostStore: Send + Sync {
    /// Store one record per platform whose trimmed content is non-empty.
    ///
    /// Returns the stored records; nothing is written when every output is blank.
    fn save(
        &self,
        title: &str,
        tone: &str,
        outputs: &IndexMap<String, String>,
        user_id: Option<i64>,
    ) -> Result<Vec<SavedPost>>;

    /// Records newest first, filtered by user and bounded by `limit`
    fn list(&self, query: &PostQuery) -> Result<Vec<SavedPost>>;
}

/// Markdown file store rooted at one directory
pub struct MarkdownPostStore {
    storage_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl MarkdownPostStore {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Initialize storage directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.storage_dir).with_context(|| {
            format!(
                "Failed to create storage directory: {}",
                self.storage_dir.display()
            )
        })
    }

    /// Record files as (id, path), highest id first
    fn record_files(&self) -> Result<Vec<(u64, PathBuf)>> {
        if !self.storage_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let entries = fs::read_dir(&self.storage_dir).with_context(|| {
            format!("Failed to read storage directory: {}", self.storage_dir.display())
        })?;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(id) = record_id(name) else {
                continue;
            };
            files.push((id, path));
        }

        files.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(files)
    }

    fn next_id(&self) -> Result<u64> {
        Ok(self
            .record_files()?
            .first()
            .map(|(id, _)| id + 1)
            .unwrap_or(1))
    }

    fn record_path(&self, post: &SavedPost) -> PathBuf {
        self.storage_dir.join(format!("{:06}-{}.md", post.id, slugify(&post.title)))
    }

    /// Write every record or none of them.
    ///
    /// Records are staged as `.md.tmp` files and renamed into place; on any
    /// failure the staged and already renamed files are removed.
    fn commit(&self, records: &[(PathBuf, String)]) -> Result<()> {
        let mut staged = Vec::with_capacity(records.len());
        for (path, markdown) in records {
            let staging = path.with_extension("md.tmp");
            if let Err(err) = fs::write(&staging, markdown) {
                discard(&staged);
                return Err(err)
                    .with_context(|| format!("Failed to write post: {}", staging.display()));
            }
            staged.push(staging);
        }

        let mut committed = Vec::with_capacity(records.len());
        for ((path, _), staging) in records.iter().zip(&staged) {
            if let Err(err) = fs::rename(staging, path) {
                discard(&committed);
                discard(&staged);
                return Err(err)
                    .with_context(|| format!("Failed to write post: {}", path.display()));
            }
            committed.push(path.clone());
        }
        Ok(())
    }

    fn read_record(path: &Path) -> Result<SavedPost> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read post: {}", path.display()))?;
        let block = extract_json_block(&content)
            .ok_or_else(|| anyhow::anyhow!("No record block in {}", path.display()))?;
        serde_json::from_str(block)
            .with_context(|| format!("Failed to parse record in {}", path.display()))
    }
}

impl PostStore for MarkdownPostStore {
    fn save(
        &self,
        title: &str,
        tone: &str,
        outputs: &IndexMap<String, String>,
        user_id: Option<i64>,
    ) -> Result<Vec<SavedPost>> {
        let pending: Vec<(&String, &str)> = outputs
            .iter()
            .map(|(platform, content)| (platform, content.trim()))
            .filter(|(_, content)| !content.is_empty())
            .collect();
        if pending.is_empty() {
            return Ok(Vec::new());
        }

        let _guard = self.write_lock.lock();
        self.init()?;

        let created_at = Utc::now();
        let first_id = self.next_id()?;
        let saved: Vec<SavedPost> = pending
            .into_iter()
            .zip(first_id..)
            .map(|((platform, content), id)| SavedPost {
                id,
                title: title.trim().to_string(),
                tone: tone.trim().to_string(),
                platform: platform.clone(),
                content: Some(content.to_string()),
                user_id,
                created_at,
            })
            .collect();

        let records = saved
            .iter()
            .map(|post| Ok((self.record_path(post), render_markdown(post)?)))
            .collect::<Result<Vec<_>>>()?;
        self.commit(&records)?;

        tracing::info!(
            records = saved.len(),
            dir = %self.storage_dir.display(),
            "saved generated posts"
        );
        Ok(saved)
    }

    fn list(&self, query: &PostQuery) -> Result<Vec<SavedPost>> {
        let mut posts = Vec::new();
        for (_, path) in self.record_files()? {
            if posts.len() >= query.limit {
                break;
            }
            let mut post = match Self::read_record(&path) {
                Ok(post) => post,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable post record");
                    continue;
                }
            };
            if query.user_id.is_some() && post.user_id != query.user_id {
                continue;
            }
            if !query.include_content {
                post.content = None;
            }
            posts.push(post);
        }
        Ok(posts)
    }
}

/// Best-effort removal of files from an aborted save
fn discard(paths: &[PathBuf]) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to remove partial post"
                );
            }
        }
    }
}

/// Id prefix of a `<id>-<slug>.md` record file name
fn record_id(file_name: &str) -> Option<u64> {
    let stem = file_name.strip_suffix(".md")?;
    let (id, _slug) = stem.split_once('-')?;
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id.parse().ok()
}

/// Lowercase ASCII slug used in record file names
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let mut slug = slug.trim_matches('-').to_string();
    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        slug = slug.trim_end_matches('-').to_string();
    }
    if slug.is_empty() {
        "post".to_string()
    } else {
        slug
    }
}

fn render_markdown(post: &SavedPost) -> Result<String> {
    let json = serde_json::to_string_pretty(post).context("Failed to serialize post")?;
    let user = post
        .user_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    Ok(format!(
        "# {title}\n\n\
        - **Platform**: {platform}\n\
        - **Tone**: {tone}\n\
        - **User**: {user}\n\
        - **Saved**: {saved}\n\n\
        {content}\n\n\
        ## Record\n\
        ```json\n\
        {json}\n\
        ```\n",
        title = post.title,
        platform = post.platform,
        tone = post.tone,
        saved = post.created_at.to_rfc3339(),
        content = post.content.as_deref().unwrap_or_default(),
    ))
}

/// The last fenced JSON block; earlier fences may come from post content.
fn extract_json_block(content: &str) -> Option<&str> {
    let start = content.rfind(JSON_FENCE)? + JSON_FENCE.len();
    let end = content[start..].find("\n```")?;
    Some(content[start..start + end].trim())
}
