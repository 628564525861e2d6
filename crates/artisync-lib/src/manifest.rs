use crate::error::ArtifactSyncError;

/// Ordered list of artifact filenames to fetch from a build.
///
/// Entries are plain filenames: they are appended to the artifact base URL and
/// joined onto the destination directory, so separators and `.`/`..` are
/// rejected. Duplicates are kept and fetched again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<String>,
}

impl Manifest {
    pub fn new<I, S>(entries: I) -> Result<Self, ArtifactSyncError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(Into::into)
            .map(|entry| validate_entry(&entry).map(|()| entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

fn validate_entry(entry: &str) -> Result<(), ArtifactSyncError> {
    let reason = if entry.is_empty() {
        "filename is empty"
    } else if entry == "." || entry == ".." {
        "filename refers to a directory"
    } else if entry.contains(['/', '\\']) {
        "filename must not contain path separators"
    } else {
        return Ok(());
    };

    Err(ArtifactSyncError::InvalidManifestEntry {
        entry: entry.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_keeps_order_and_duplicates() {
        let manifest = Manifest::new(["b.jar", "a.zip", "b.jar"]).unwrap();
        assert_eq!(manifest.entries(), &["b.jar", "a.zip", "b.jar"]);
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn test_empty_manifest_is_valid() {
        let manifest = Manifest::new(Vec::<String>::new()).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_manifest_rejects_traversal_and_separators() {
        for entry in ["", ".", "..", "../evil.jar", "lib/a.jar", "lib\\a.jar"] {
            let err = Manifest::new([entry]).expect_err(entry);
            assert!(
                matches!(err, ArtifactSyncError::InvalidManifestEntry { .. }),
                "unexpected error for {entry:?}: {err}"
            );
        }
    }

    #[test]
    fn test_manifest_accepts_dotted_filenames() {
        let manifest = Manifest::new(["common.sdo.jar", "..hidden.jar"]).unwrap();
        assert_eq!(manifest.len(), 2);
    }
}
