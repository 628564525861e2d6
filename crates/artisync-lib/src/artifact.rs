use crate::error::ArtifactSyncError;
use std::fmt;
use url::Url;

/// URL of the directory holding a build's published libraries. Always ends with `/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactBase(Url);

impl ArtifactBase {
    pub fn from_build_url(build_url: &str, subpath: &str) -> Result<Self, ArtifactSyncError> {
        let mut base = build_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        base.push_str(subpath.trim_start_matches('/'));
        if !base.ends_with('/') {
            base.push('/');
        }

        let url = Url::parse(&base).map_err(|e| ArtifactSyncError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ArtifactSyncError::InvalidUrl {
                url: base,
                reason: "URL cannot hold artifact paths".to_string(),
            });
        }

        Ok(Self(url))
    }

    /// Appends `filename` as a single percent-encoded path segment.
    pub fn url_for(&self, filename: &str) -> String {
        let mut url = self.0.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(filename);
        }
        url.into()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ArtifactBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
