use crate::error::ArtifactSyncError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use xml::reader::XmlEvent;

pub const BUILD_ELEMENT: &str = "lastSuccessfulBuild";
pub const URL_ELEMENT: &str = "url";

/// Reads the status document at `path` and returns the URL of the last successful build.
pub fn extract_last_successful_build_url(path: &Path) -> Result<String, ArtifactSyncError> {
    let file = File::open(path).map_err(|e| ArtifactSyncError::XmlParse {
        document: path.display().to_string(),
        reason: format!("unable to open for reading: {e}"),
    })?;

    parse_last_successful_build_url(BufReader::new(file)).map_err(|e| match e {
        ArtifactSyncError::XmlParse { reason, .. } => ArtifactSyncError::XmlParse {
            document: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

/// Returns the text of the first `url` element below the first `lastSuccessfulBuild` element.
///
/// Only text nodes that are direct children of `url` are concatenated; nothing is trimmed.
/// The whole document is read, so malformed XML after the match is still an error.
pub fn parse_last_successful_build_url<R: Read>(reader: R) -> Result<String, ArtifactSyncError> {
    let mut depth = 0usize;
    let mut build_depth: Option<usize> = None;
    let mut url_depth: Option<usize> = None;
    let mut url_text = String::new();
    let mut build_url: Option<String> = None;
    let mut build_closed = false;
    let mut extra_builds = 0usize;

    for event in xml::EventReader::new(reader) {
        let event = event.map_err(|e| ArtifactSyncError::XmlParse {
            document: "<status feed>".to_string(),
            reason: e.to_string(),
        })?;

        match event {
            XmlEvent::StartElement { name, .. } => {
                depth += 1;
                if name.prefix.is_some() {
                    continue;
                }
                if build_url.is_some() || build_closed {
                    if name.local_name == BUILD_ELEMENT {
                        extra_builds += 1;
                    }
                    continue;
                }
                match (build_depth, url_depth) {
                    (None, _) if name.local_name == BUILD_ELEMENT => build_depth = Some(depth),
                    (Some(_), None) if name.local_name == URL_ELEMENT => url_depth = Some(depth),
                    _ => {}
                }
            }
            XmlEvent::EndElement { .. } => {
                if url_depth == Some(depth) {
                    build_url = Some(std::mem::take(&mut url_text));
                    url_depth = None;
                } else if build_depth == Some(depth) {
                    // Only the first build element is searched.
                    build_closed = true;
                }
                depth -= 1;
            }
            XmlEvent::Characters(text) | XmlEvent::Whitespace(text)
                if url_depth == Some(depth) =>
            {
                url_text.push_str(&text);
            }
            _ => {}
        }
    }

    if extra_builds > 0 {
        tracing::debug!(
            extra_builds,
            "Status document has more than one {} element, using the first",
            BUILD_ELEMENT
        );
    }

    match (build_url, build_depth) {
        (Some(url), _) => Ok(url),
        (None, None) => Err(ArtifactSyncError::MissingNode {
            path: BUILD_ELEMENT.to_string(),
        }),
        (None, Some(_)) => Err(ArtifactSyncError::MissingNode {
            path: format!("{BUILD_ELEMENT}/{URL_ELEMENT}"),
        }),
    }
}
