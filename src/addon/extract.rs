//! Strings of an addon manifest.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::manifest::{AddonManifest, AddonType, GuideBody, MessageBody, TutorialBody};
use crate::strings::{
    ExtractError, StringTable, StringUnit,
    content::{Block, CommentTable, default_comment, walk_blocks},
    manifests::check_id,
    yaml::{APP_STRING_PREFIX, parse_strings_file},
};

const ADDON_COMMENTS: CommentTable = &[
    ("text", "Standard text in a composer block"),
    ("title", "Title in a composer block"),
    ("ulist", "Bullet unordered list item in a composer block"),
    ("olist", "Bullet ordered list item in a composer block"),
];

/// Shared string definitions of an addon: `strings.yaml` in the directory
/// above the addon's own directory.
pub fn shared_strings_file(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .unwrap_or(Path::new(""))
        .join("..")
        .join("strings.yaml")
}

/// Extract the strings of `manifest`, read from `path`.
///
/// Shared string definitions are loaded from [`shared_strings_file`] when the
/// manifest uses them.
pub fn extract(manifest: &AddonManifest, path: &Path) -> Result<StringTable, ExtractError> {
    let shared = if is_translatable(manifest)
        && manifest.kind == AddonType::Message
        && manifest.uses_shared_strings()
    {
        let file = shared_strings_file(path);
        debug!(path = %file.display(), "Loading shared strings");
        let mut shared = StringTable::new();
        shared.extend(parse_strings_file(&file, APP_STRING_PREFIX)?, &file)?;
        Some(shared)
    } else {
        None
    };
    extract_with(manifest, path, shared.as_ref())
}

/// Extract with already loaded shared strings.
pub fn extract_with(
    manifest: &AddonManifest,
    path: &Path,
    shared: Option<&StringTable>,
) -> Result<StringTable, ExtractError> {
    let mut table = StringTable::new();
    if !is_translatable(manifest) {
        return Ok(table);
    }

    let units = match manifest.kind {
        AddonType::Guide => guide_units(section(&manifest.guide, manifest.kind, path)?, path)?,
        AddonType::Tutorial => {
            tutorial_units(section(&manifest.tutorial, manifest.kind, path)?, path)?
        }
        AddonType::Message => {
            let message = section(&manifest.message, manifest.kind, path)?;
            if manifest.uses_shared_strings() {
                if manifest.short_version().is_none() {
                    return Err(ExtractError::MissingShortVersion {
                        path: path.to_path_buf(),
                    });
                }
                let shared = shared.ok_or_else(|| ExtractError::UnknownSharedString {
                    path: path.to_path_buf(),
                    id: message.title.clone(),
                })?;
                shared_message_units(message, path, shared)?
            } else {
                message_units(message, path)?
            }
        }
        AddonType::Replacer => Vec::new(),
    };

    table.extend(units, path)?;
    Ok(table)
}

fn is_translatable(manifest: &AddonManifest) -> bool {
    manifest.translatable && manifest.kind != AddonType::Replacer
}

fn section<'a, T>(section: &'a Option<T>, kind: AddonType, path: &Path) -> Result<&'a T, ExtractError> {
    section.as_ref().ok_or_else(|| ExtractError::MissingSection {
        path: path.to_path_buf(),
        kind: kind.as_str().to_string(),
    })
}

fn guide_units(guide: &GuideBody, path: &Path) -> Result<Vec<StringUnit>, ExtractError> {
    check_id(&guide.id, path)?;
    let prefix = format!("guide.{}", guide.id);

    let mut units = vec![StringUnit::new(
        format!("{}.title", prefix),
        guide.title.as_str(),
        Some(guide.title_comment.as_deref().unwrap_or("Title for a guide view")),
    )];
    if let Some(subtitle) = guide.subtitle.as_deref().filter(|s| !s.is_empty()) {
        units.push(StringUnit::new(
            format!("{}.subtitle", prefix),
            subtitle,
            Some(guide.subtitle_comment.as_deref().unwrap_or("Subtitle for a guide view")),
        ));
    }
    block_units(&guide.blocks, &prefix, path, &mut units)?;
    Ok(units)
}

fn tutorial_units(tutorial: &TutorialBody, path: &Path) -> Result<Vec<StringUnit>, ExtractError> {
    check_id(&tutorial.id, path)?;
    let prefix = format!("tutorial.{}", tutorial.id);

    let mut units = vec![
        StringUnit::new(
            format!("{}.title", prefix),
            tutorial.title.as_str(),
            Some(tutorial.title_comment.as_deref().unwrap_or("Title for a tutorial view")),
        ),
        StringUnit::new(
            format!("{}.subtitle", prefix),
            tutorial.subtitle.as_str(),
            Some(
                tutorial
                    .subtitle_comment
                    .as_deref()
                    .unwrap_or("Subtitle for a tutorial view"),
            ),
        ),
        StringUnit::new(
            format!("{}.completion_message", prefix),
            tutorial.completion_message.as_str(),
            Some(
                tutorial
                    .completion_message_comment
                    .as_deref()
                    .unwrap_or("Completion message for a tutorial view"),
            ),
        ),
    ];
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

fn message_units(message: &MessageBody, path: &Path) -> Result<Vec<StringUnit>, ExtractError> {
    check_id(&message.id, path)?;
    let prefix = format!("message.{}", message.id);

    let mut units = vec![StringUnit::new(
        format!("{}.title", prefix),
        message.title.as_str(),
        Some(message.title_comment.as_deref().unwrap_or("Title for a message view")),
    )];
    if let Some(subtitle) = &message.subtitle {
        units.push(StringUnit::new(
            format!("{}.subtitle", prefix),
            subtitle.as_str(),
            Some(
                message
                    .subtitle_comment
                    .as_deref()
                    .unwrap_or("Subtitle for a message view"),
            ),
        ));
    }
    block_units(&message.blocks, &prefix, path, &mut units)?;
    Ok(units)
}

fn block_units(
    blocks: &[Block],
    prefix: &str,
    path: &Path,
    units: &mut Vec<StringUnit>,
) -> Result<(), ExtractError> {
    walk_blocks(blocks, prefix, path, &mut |leaf| {
        let comment = leaf
            .comment
            .unwrap_or_else(|| default_comment(ADDON_COMMENTS, leaf.kind));
        units.push(StringUnit::new(leaf.string_id, leaf.text, Some(comment)));
        Ok(())
    })
}

/// Message whose title, subtitle and leaf contents are shared string ids.
///
/// Each unit is keyed by its shared id and remembers the id older clients
/// look it up with.
fn shared_message_units(
    message: &MessageBody,
    path: &Path,
    shared: &StringTable,
) -> Result<Vec<StringUnit>, ExtractError> {
    check_id(&message.id, path)?;
    let prefix = format!("message.{}", message.id);

    let mut units = vec![shared_unit(shared, &message.title, format!("{}.title", prefix), path)?];
    if let Some(subtitle) = &message.subtitle {
        units.push(shared_unit(shared, subtitle, format!("{}.subtitle", prefix), path)?);
    }

    let mut leaves = Vec::new();
    walk_blocks(&message.blocks, &prefix, path, &mut |leaf| {
        leaves.push((leaf.text, leaf.string_id));
        Ok(())
    })?;
    for (shared_id, legacy_id) in leaves {
        units.push(shared_unit(shared, shared_id, legacy_id, path)?);
    }
    Ok(units)
}

fn shared_unit(
    shared: &StringTable,
    shared_id: &str,
    legacy_id: String,
    path: &Path,
) -> Result<StringUnit, ExtractError> {
    let definition = shared
        .get(shared_id)
        .filter(|unit| !unit.value.is_empty())
        .ok_or_else(|| ExtractError::UnknownSharedString {
            path: path.to_path_buf(),
            id: shared_id.to_string(),
        })?;

    let mut unit = StringUnit::new(
        shared_id,
        definition.value[0].as_str(),
        definition.comments.first().map(String::as_str),
    );
    unit.legacy_id = Some(legacy_id);
    Ok(unit)
}
