use crate::errors::QuestError;
use std::fs;
use std::path::{Path, PathBuf};

/// Moves `active` aside as `<stem>.<n>.<ext>` once it grows past `threshold_bytes`.
/// Returns the rotated path when a rotation happened.
pub fn rotate_if_needed(
    active: &Path,
    threshold_bytes: u64,
) -> Result<Option<PathBuf>, QuestError> {
    let len = match fs::metadata(active) {
        Ok(meta) => meta.len(),
        Err(_) => return Ok(None),
    };
    if len <= threshold_bytes {
        return Ok(None);
    }
    let next = rotated_logs(active)?
        .last()
        .map(|(index, _)| index + 1)
        .unwrap_or(1);
    let target = rotated_name(active, next);
    fs::rename(active, &target).map_err(|e| QuestError::Io(e.to_string()))?;
    Ok(Some(target))
}

/// Deletes the oldest rotated siblings of `active` until the active log plus its
/// rotations fit in `budget_bytes`. Other files in the directory are never touched.
pub fn enforce_total_budget(
    active: &Path,
    budget_bytes: u64,
) -> Result<Vec<PathBuf>, QuestError> {
    let rotated = rotated_logs(active)?;
    let mut total = fs::metadata(active).map(|meta| meta.len()).unwrap_or(0)
        + rotated
            .iter()
            .filter_map(|(_, path)| fs::metadata(path).ok().map(|meta| meta.len()))
            .sum::<u64>();

    let mut deleted = Vec::new();
    for (_, path) in rotated {
        if total <= budget_bytes {
            break;
        }
        let len = fs::metadata(&path)
            .map_err(|e| QuestError::Io(e.to_string()))?
            .len();
        fs::remove_file(&path).map_err(|e| QuestError::Io(e.to_string()))?;
        total = total.saturating_sub(len);
        deleted.push(path);
    }

    Ok(deleted)
}

fn rotated_name(active: &Path, index: u64) -> PathBuf {
    let stem = active
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match active.extension() {
        Some(ext) => format!("{stem}.{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{index}"),
    };
    active.with_file_name(name)
}

/// Rotated siblings of `active`, oldest first.
fn rotated_logs(active: &Path) -> Result<Vec<(u64, PathBuf)>, QuestError> {
    let Some(dir) = active.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(Vec::new());
    };
    let stem = active
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = active
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let prefix = format!("{stem}.");

    let mut found = fs::read_dir(dir)
        .map_err(|e| QuestError::Io(e.to_string()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            let index = name
                .strip_prefix(&prefix)?
                .strip_suffix(suffix.as_str())?
                .parse::<u64>()
                .ok()?;
            Some((index, path))
        })
        .collect::<Vec<_>>();
    found.sort_by_key(|(index, _)| *index);
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::{enforce_total_budget, rotate_if_needed};
    use std::fs;

    #[test]
    fn prunes_oldest_rotations_until_budget_is_met() {
        let dir = tempfile::tempdir().expect("tempdir");
        let active = dir.path().join("quest.jsonl");
        fs::write(dir.path().join("quest.1.jsonl"), vec![0u8; 40]).expect("one");
        fs::write(dir.path().join("quest.2.jsonl"), vec![0u8; 40]).expect("two");
        fs::write(&active, vec![0u8; 10]).expect("active");

        let deleted = enforce_total_budget(&active, 60).expect("pruned");
        assert_eq!(deleted.len(), 1);
        assert!(deleted[0].ends_with("quest.1.jsonl"));
        assert!(dir.path().join("quest.2.jsonl").exists());
        assert!(active.exists());
    }

    #[test]
    fn unrelated_files_in_the_log_directory_survive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let notes = dir.path().join("my-notes.txt");
        let other_jsonl = dir.path().join("other.1.jsonl");
        fs::write(&notes, vec![b'n'; 2048]).expect("notes");
        fs::write(&other_jsonl, vec![b'o'; 2048]).expect("other");
        let active = dir.path().join("quest.jsonl");
        fs::write(&active, vec![0u8; 10]).expect("active");
        fs::write(dir.path().join("quest.1.jsonl"), vec![0u8; 100]).expect("rotated");

        let deleted = enforce_total_budget(&active, 16).expect("pruned");
        assert_eq!(deleted.len(), 1);
        assert!(notes.exists());
        assert!(other_jsonl.exists());
    }

    #[test]
    fn rotation_renames_only_oversized_active_log() {
        let dir = tempfile::tempdir().expect("tempdir");
        let active = dir.path().join("quest.jsonl");
        fs::write(&active, vec![0u8; 8]).expect("small");
        assert!(rotate_if_needed(&active, 16).expect("noop").is_none());

        fs::write(&active, vec![0u8; 32]).expect("large");
        fs::write(dir.path().join("quest.4.jsonl"), b"old").expect("older rotation");
        let rotated = rotate_if_needed(&active, 16)
            .expect("rotate")
            .expect("rotated path");
        assert!(rotated.ends_with("quest.5.jsonl"));
        assert!(!active.exists());
    }
}
