use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// How source text is split into candidate tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extractor {
    /// Split on whitespace, quotes, `;`, `{` and `}`.
    Default,
    /// Like [`Extractor::Default`], but separators inside `[...]` belong to
    /// the token, so `[&>*]:m-1` and `content-['a_b']` survive.
    #[default]
    ArbitraryVariants,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub tokens: Vec<String>,
    pub files_scanned: usize,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan requires at least one glob pattern")]
    NoPatterns,
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid glob pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("failed to build glob set: {0}")]
    GlobSet(#[source] globset::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanGlobOptions {
    pub base_path: PathBuf,
    pub respect_gitignore: bool,
    pub include_node_modules: bool,
    pub include_style_files: bool,
    pub include_lock_files: bool,
}

impl Default for ScanGlobOptions {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            respect_gitignore: true,
            include_node_modules: false,
            include_style_files: false,
            include_lock_files: false,
        }
    }
}

pub fn scan(paths: &[PathBuf], extractor: Extractor) -> Result<ScanResult, ScanError> {
    let mut tokens = Vec::new();
    let mut seen = HashSet::new();
    let mut files_scanned = 0;

    for path in paths {
        scan_path(path, extractor, &mut tokens, &mut seen, &mut files_scanned)?;
    }

    Ok(ScanResult {
        tokens,
        files_scanned,
    })
}

pub fn scan_globs(
    patterns: &[String],
    ignore_patterns: &[String],
    options: &ScanGlobOptions,
    extractor: Extractor,
) -> Result<ScanResult, ScanError> {
    if patterns.is_empty() {
        return Err(ScanError::NoPatterns);
    }

    let globset = build_globset(patterns)?;
    let ignore_set = build_globset(ignore_patterns)?;
    let mut paths = Vec::new();
    let mut seen = HashSet::new();

    let mut builder = WalkBuilder::new(&options.base_path);
    builder
        .hidden(false)
        .git_ignore(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .git_exclude(options.respect_gitignore);

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        let relative_path = path.strip_prefix(&options.base_path).unwrap_or(path);
        if !globset.is_match(relative_path) && !globset.is_match(path) {
            continue;
        }
        if ignore_set.is_match(relative_path) || ignore_set.is_match(path) {
            continue;
        }
        if should_skip_file(path, options) {
            debug!(path = %path.display(), "skipping file");
            continue;
        }
        if seen.insert(path.to_path_buf()) {
            paths.push(path.to_path_buf());
        }
    }

    scan(&paths, extractor)
}

fn should_skip_file(path: &Path, options: &ScanGlobOptions) -> bool {
    if !options.include_node_modules
        && path
            .components()
            .any(|component| component.as_os_str() == "node_modules")
    {
        return true;
    }

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");
    if !options.include_lock_files && is_lock_file(file_name) {
        return true;
    }

    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase());
    match ext.as_deref() {
        Some(ext) if !options.include_style_files && is_style_extension(ext) => true,
        Some(ext) => is_binary_extension(ext),
        None => false,
    }
}

// Mini-program style sheets are outputs, not sources.
fn is_style_extension(ext: &str) -> bool {
    matches!(
        ext,
        "css" | "wxss" | "acss" | "ttss" | "qss" | "jxss" | "scss" | "less"
    )
}

fn is_binary_extension(ext: &str) -> bool {
    matches!(
        ext,
        "png"
            | "jpg"
            | "jpeg"
            | "gif"
            | "webp"
            | "ico"
            | "svga"
            | "mp3"
            | "mp4"
            | "zip"
            | "gz"
            | "woff"
            | "woff2"
            | "ttf"
            | "otf"
    )
}

fn is_lock_file(file_name: &str) -> bool {
    matches!(
        file_name,
        "package-lock.json" | "pnpm-lock.yaml" | "yarn.lock" | "bun.lockb" | "Cargo.lock"
    )
}

fn scan_path(
    path: &Path,
    extractor: Extractor,
    tokens: &mut Vec<String>,
    seen: &mut HashSet<String>,
    files_scanned: &mut usize,
) -> Result<(), ScanError> {
    if !path.exists() {
        return Err(ScanError::NotFound {
            path: path.to_path_buf(),
        });
    }

    if path.is_dir() {
        let entries = fs::read_dir(path).map_err(|source| ScanError::ReadDir {
            path: path.to_path_buf(),
            source,
        })?;
        for entry in entries.flatten() {
            scan_path(&entry.path(), extractor, tokens, seen, files_scanned)?;
        }
        return Ok(());
    }

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable file");
            return Ok(());
        }
    };
    *files_scanned += 1;
    for token in extract(&text, extractor) {
        if seen.insert(token.clone()) {
            tokens.push(token);
        }
    }
    Ok(())
}

/// Candidate tokens in `text`, deduplicated in first-seen order.
pub fn extract(text: &str, extractor: Extractor) -> Vec<String> {
    let mut seen = HashSet::new();
    split_tokens(text, extractor)
        .into_iter()
        .map(trim_token)
        .filter(|token| is_valid_token(token))
        .filter(|token| seen.insert(token.to_string()))
        .map(str::to_string)
        .collect()
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '\'' | '"' | '`' | ';' | '{' | '}')
}

fn split_tokens(text: &str, extractor: Extractor) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut bracket_depth = 0usize;

    for (idx, ch) in text.char_indices() {
        let nested = extractor == Extractor::ArbitraryVariants && bracket_depth > 0;
        if is_separator(ch) && !(nested && !ch.is_whitespace()) {
            if let Some(begin) = start.take() {
                tokens.push(&text[begin..idx]);
            }
            bracket_depth = 0;
            continue;
        }
        if start.is_none() {
            start = Some(idx);
        }
        match ch {
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            _ => {}
        }
    }
    if let Some(begin) = start {
        tokens.push(&text[begin..]);
    }
    tokens
}

// A trailing `\` or `:` is left over from `\"` escapes and `key:` pairs.
fn trim_token(token: &str) -> &str {
    token.trim_end_matches(['\\', ':'])
}

fn is_valid_token(token: &str) -> bool {
    !token.is_empty()
        && token.chars().any(|ch| ch.is_ascii_alphanumeric())
        && token.chars().all(|ch| ch.is_ascii_graphic())
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ScanError::Glob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(ScanError::GlobSet)
}
