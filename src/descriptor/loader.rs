//! Descriptor discovery and parsing.
//!
//! Descriptors are JSON or YAML. Both are parsed into an untyped value
//! first so that a document without a template label is skipped before
//! its objects are checked against the schema.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::descriptor::schema::Descriptor;
use crate::error::{DescriptorError, TemplateDocError};

/// File name fragment marking image stream documents, which are never
/// documented.
pub const IMAGE_STREAM_MARKER: &str = "image-stream";

/// Extension of generated documentation files.
pub const DOC_EXTENSION: &str = "adoc";

/// Serialization format of a descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.json`
    Json,
    /// `.yaml`
    Yaml,
}

impl Format {
    /// Detects the format from a path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Returns `true` if the path names an image stream document.
///
/// Only the file name is checked, so the directories above it never
/// hide a descriptor.
#[must_use]
pub fn is_image_stream(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().contains(IMAGE_STREAM_MARKER))
}

/// Lists the descriptor candidates in `dir`, sorted by file name.
///
/// Returned paths are `dir` joined with each entry name. A missing
/// directory yields no candidates.
///
/// # Errors
///
/// Returns an I/O error if the directory exists but cannot be read.
pub fn candidates(dir: &Path) -> Result<Vec<PathBuf>, TemplateDocError> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "source directory not present");
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| TemplateDocError::io(dir, e))? {
        let entry = entry.map_err(|e| TemplateDocError::io(dir, e))?;
        names.push(entry.file_name());
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| dir.join(name))
        .filter(|path| Format::from_path(path).is_some())
        .filter(|path| !is_image_stream(path))
        .collect())
}

/// Parses descriptor text in the given format.
///
/// Returns `Ok(None)` when the document has no `labels.template`.
///
/// # Errors
///
/// Returns `DescriptorError::Parse` for malformed text or a document
/// whose objects do not match the schema.
pub fn parse(
    path: &Path,
    text: &str,
    format: Format,
) -> Result<Option<Descriptor>, DescriptorError> {
    let parse_err = |message: String| DescriptorError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let raw: serde_json::Value = match format {
        Format::Json => serde_json::from_str(text).map_err(|e| parse_err(e.to_string()))?,
        Format::Yaml => serde_yaml::from_str(text).map_err(|e| parse_err(e.to_string()))?,
    };

    if raw
        .get("labels")
        .and_then(|labels| labels.get("template"))
        .is_none()
    {
        return Ok(None);
    }

    serde_json::from_value(raw)
        .map(Some)
        .map_err(|e| parse_err(e.to_string()))
}

/// Reads and parses the descriptor at `path`.
///
/// A descriptor without a template label is reported with a warning and
/// yields `Ok(None)`; the caller skips it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Option<Descriptor>, TemplateDocError> {
    let format = Format::from_path(path).ok_or_else(|| {
        TemplateDocError::Usage(format!(
            "{} is not a .json or .yaml descriptor",
            path.display()
        ))
    })?;
    let text = fs::read_to_string(path).map_err(|e| TemplateDocError::io(path, e))?;

    let descriptor = parse(path, &text, format)?;
    if descriptor.is_none() {
        warn!(
            "no template label for template {}, can't generate documentation",
            path.display()
        );
    }
    Ok(descriptor)
}

/// Maps a descriptor path (relative to the source root) to its
/// documentation path under `output_root`.
#[must_use]
pub fn output_path(output_root: &Path, relative: &Path) -> PathBuf {
    output_root.join(relative.with_extension(DOC_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("a/b.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a/b.yml")), None);
        assert_eq!(Format::from_path(Path::new("README")), None);
    }

    #[test]
    fn candidates_are_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "zeta.yaml",
            "alpha.json",
            "jboss-image-streams.json",
            "eap-image-stream.json",
            "notes.txt",
            "mid.json",
        ] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }

        let found: Vec<_> = candidates(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(found, vec!["alpha.json", "mid.json", "zeta.yaml"]);
    }

    #[test]
    fn marker_in_parent_directory_is_ignored() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("openshift-image-streams-docs/templates");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("web.json"), "{}").unwrap();

        let found = candidates(&dir).unwrap();
        assert_eq!(found, vec![dir.join("web.json")]);
        assert!(!is_image_stream(&found[0]));
        let streams = Path::new("templates/jboss-image-streams.json");
        assert!(is_image_stream(streams));
    }

    #[test]
    fn missing_directory_has_no_candidates() {
        let dir = tempfile::tempdir().unwrap();
        assert!(candidates(&dir.path().join("absent")).unwrap().is_empty());
    }

    #[test]
    fn unlabelled_document_is_skipped() {
        let text = r#"{"metadata": {"name": "x"}, "objects": [{"kind": "Service"}]}"#;
        let parsed = parse(Path::new("x.json"), text, Format::Json).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn labelled_yaml_document_parses() {
        let text = "labels:\n  template: demo\nparameters:\n  - name: A\n    description: a\n";
        let parsed = parse(Path::new("x.yaml"), text, Format::Yaml)
            .unwrap()
            .unwrap();
        assert_eq!(parsed.template_label(), Some("demo"));
        assert_eq!(parsed.parameters().len(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse(Path::new("bad.json"), "{", Format::Json).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn load_skips_unlabelled_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.json");
        fs::write(&path, r#"{"labels": {}}"#).unwrap();
        assert!(load(&path).unwrap().is_none());
    }

    #[test]
    fn output_path_swaps_extension() {
        assert_eq!(
            output_path(Path::new("docs"), Path::new("templates/eap-basic.json")),
            PathBuf::from("docs/templates/eap-basic.adoc")
        );
    }
}
