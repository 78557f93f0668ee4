//! Guide and tutorial manifests bundled with the application.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, de::DeserializeOwned};
use walkdir::WalkDir;

use super::{
    ExtractError, StringTable, StringUnit,
    content::{Block, CommentTable, default_comment, walk_blocks},
    is_valid_id,
};

const GUIDE_COMMENTS: CommentTable = &[
    ("text", "Standard text in a guide block"),
    ("title", "Title in a guide block"),
    ("list", "Bullet list item in a guide block"),
];

#[derive(Debug, Deserialize)]
pub struct GuideFile {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
pub struct TutorialFile {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub steps: Vec<TutorialStepFile>,
}

#[derive(Debug, Deserialize)]
pub struct TutorialStepFile {
    pub id: String,
    pub tooltip: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// `*.json` files directly inside `dir`, sorted by name.
///
/// A missing directory has no manifests.
pub fn manifest_files(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| ExtractError::Read {
            path: dir.to_path_buf(),
            source: io::Error::from(e),
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ExtractError> {
    let content = fs::read_to_string(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ExtractError::Schema {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn check_id(id: &str, path: &Path) -> Result<(), ExtractError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(ExtractError::InvalidId {
            path: path.to_path_buf(),
            id: id.to_string(),
        })
    }
}

pub fn guide_units(guide: &GuideFile, path: &Path) -> Result<Vec<StringUnit>, ExtractError> {
    check_id(&guide.id, path)?;
    let prefix = format!("guide.{}", guide.id);

    let mut units = vec![StringUnit::new(
        format!("{}.title", prefix),
        guide.title.as_str(),
        Some(guide.comment.as_deref().unwrap_or("Title for a guide view")),
    )];
    walk_blocks(&guide.blocks, &prefix, path, &mut |leaf| {
        let comment = leaf
            .comment
            .unwrap_or_else(|| default_comment(GUIDE_COMMENTS, leaf.kind));
        units.push(StringUnit::new(leaf.string_id, leaf.text, Some(comment)));
        Ok(())
    })?;
    Ok(units)
}

pub fn tutorial_units(tutorial: &TutorialFile, path: &Path) -> Result<Vec<StringUnit>, ExtractError> {
    check_id(&tutorial.id, path)?;
    let prefix = format!("tutorial.{}", tutorial.id);

    let mut units = vec![StringUnit::new(
        format!("{}.title", prefix),
        tutorial.title.as_str(),
        Some(tutorial.comment.as_deref().unwrap_or("Title for a tutorial view")),
    )];
    for step in &tutorial.steps {
        check_id(&step.id, path)?;
        units.push(StringUnit::new(
            format!("{}.step.{}", prefix, step.id),
            step.tooltip.as_str(),
            Some(step.comment.as_deref().unwrap_or("A tutorial step tooltip")),
        ));
    }
    Ok(units)
}

pub fn collect_guides(dir: &Path, table: &mut StringTable) -> Result<(), ExtractError> {
    for path in manifest_files(dir)? {
        let guide: GuideFile = read_json(&path)?;
        table.extend(guide_units(&guide, &path)?, &path)?;
    }
    Ok(())
}

pub fn collect_tutorials(dir: &Path, table: &mut StringTable) -> Result<(), ExtractError> {
    for path in manifest_files(dir)? {
        let tutorial: TutorialFile = read_json(&path)?;
        table.extend(tutorial_units(&tutorial, &path)?, &path)?;
    }
    Ok(())
}
