//! Index page generation.
//!
//! Produces `README.adoc`: the header fragment, then one section per
//! source directory linking each of its documents, then the footer
//! fragment.

use std::fs;
use std::path::Path;

use crate::config::Settings;
use crate::descriptor::loader::{DOC_EXTENSION, IMAGE_STREAM_MARKER};
use crate::docgen::fragments::FragmentCache;
use crate::error::TemplateDocError;

/// One source directory's entry in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSection {
    /// Directory name, relative to the root.
    pub dir: String,
    /// Section title.
    pub title: String,
    /// Linked document names, sorted.
    pub stems: Vec<String>,
}

/// Lists the document names in `dir`: every entry's file stem, sorted by
/// entry name, leaving out image streams.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be read.
pub fn list_stems(dir: &Path) -> Result<Vec<String>, TemplateDocError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| TemplateDocError::io(dir, e))? {
        let entry = entry.map_err(|e| TemplateDocError::io(dir, e))?;
        names.push(entry.file_name());
    }
    names.sort();

    Ok(names
        .iter()
        .filter_map(|name| Path::new(name).file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.contains(IMAGE_STREAM_MARKER))
        .collect())
}

/// Collects the index sections for every existing source directory
/// under `root`, in sorted directory order.
///
/// # Errors
///
/// Returns an I/O error if a source directory cannot be read.
pub fn collect_sections(
    root: &Path,
    settings: &Settings,
) -> Result<Vec<IndexSection>, TemplateDocError> {
    let mut sections = Vec::new();
    for dir in settings.sorted_source_dirs() {
        let path = root.join(dir);
        if !path.is_dir() {
            continue;
        }
        sections.push(IndexSection {
            dir: dir.to_string(),
            title: settings.display_name(dir).to_string(),
            stems: list_stems(&path)?,
        });
    }
    Ok(sections)
}

/// Renders the index body between `header` and `footer`.
#[must_use]
pub fn render_index(header: &str, sections: &[IndexSection], footer: &str) -> String {
    let mut text = String::from(header);
    for section in sections {
        text.push_str(&format!("\n== {}\n\n", section.title));
        for stem in &section.stems {
            text.push_str(&format!(
                "* link:./{dir}/{stem}.{DOC_EXTENSION}[{stem}]\n",
                dir = section.dir
            ));
        }
    }
    text.push_str(footer);
    text
}

/// Builds the index page for `root`, without the generated-file banner.
///
/// # Errors
///
/// Returns an I/O error if a fragment or source directory cannot be read.
pub fn generate_index(
    root: &Path,
    settings: &Settings,
    fragments: &mut FragmentCache,
) -> Result<String, TemplateDocError> {
    let sections = collect_sections(root, settings)?;
    let header = fragments.get(&settings.fragments.index_header)?.to_string();
    let footer = fragments.get(&settings.fragments.index_footer)?;
    Ok(render_index(&header, &sections, footer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn two_directories_two_sections() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "templates/eap64-basic-s2i.json");
        touch(dir.path(), "secrets/eap-app-secret.json");
        fs::write(dir.path().join("README.adoc.in"), "= Templates\n").unwrap();
        fs::write(dir.path().join("release-notes.adoc.in"), "\n== Notes\n").unwrap();

        let mut cache = FragmentCache::new(dir.path());
        let text = generate_index(dir.path(), &Settings::default(), &mut cache).unwrap();
        assert_eq!(
            text,
            "= Templates\n\
             \n== secrets\n\n\
             * link:./secrets/eap-app-secret.adoc[eap-app-secret]\n\
             \n== templates\n\n\
             * link:./templates/eap64-basic-s2i.adoc[eap64-basic-s2i]\n\
             \n== Notes\n"
        );
    }

    #[test]
    fn missing_directories_are_skipped() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "templates/a.yaml");
        let sections = collect_sections(dir.path(), &Settings::default()).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].dir, "templates");
    }

    #[test]
    fn stems_skip_image_streams_and_keep_other_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.json");
        touch(dir.path(), "a.yaml");
        touch(dir.path(), "jboss-image-streams.json");
        touch(dir.path(), "notes.txt");
        assert_eq!(list_stems(dir.path()).unwrap(), vec!["a", "b", "notes"]);
    }

    #[test]
    fn display_name_titles_section() {
        let mut settings = Settings::default();
        settings.source_dirs = vec!["decisionserver".to_string()];
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "decisionserver/ds.json");
        let sections = collect_sections(dir.path(), &settings).unwrap();
        let text = render_index("", &sections, "");
        assert!(text.starts_with("\n== Red Hat JBoss BRMS decision server\n\n"));
    }
}
