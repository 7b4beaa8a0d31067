//! Documentation generation.
//!
//! A [`Generator`] owns everything one run needs: the settings, the
//! fragment cache, and the parsed page template. It turns descriptors
//! into pages and, for a full run, writes the index.

pub mod assemble;
pub mod extract;
pub mod format;
pub mod fragments;
pub mod index;
pub mod render;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Settings;
use crate::descriptor::{self, loader};
use crate::docgen::fragments::FragmentCache;
use crate::docgen::render::PageTemplate;
use crate::error::TemplateDocError;

/// Banner opening every generated file.
pub const AUTOGEN_WARNING: &str = "////
    AUTOGENERATED FILE - this file was generated via templatedoc.
    Changes to .adoc or HTML files may be overwritten! Please change the
    generator or the input template (./*.in)
////

";

/// Name of the index page under the output root.
pub const INDEX_FILE: &str = "README.adoc";

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages written.
    pub written: usize,
    /// Descriptors skipped for lack of a template label.
    pub skipped: usize,
    /// Whether the index page was written.
    pub index: bool,
}

/// One generation run.
#[derive(Debug)]
pub struct Generator {
    root: PathBuf,
    output_dir: PathBuf,
    settings: Settings,
    fragments: FragmentCache,
    page: Option<PageTemplate>,
    quiet: bool,
    summary: RunSummary,
}

impl Generator {
    /// Creates a generator for the sources under `root`.
    ///
    /// `output_dir` overrides the settings' output root; either way a
    /// relative output root is resolved against `root`. With `quiet`
    /// the per-page progress lines are not printed.
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        settings: Settings,
        output_dir: Option<PathBuf>,
        quiet: bool,
    ) -> Self {
        let root = root.into();
        let output_dir = output_dir.unwrap_or_else(|| settings.output_dir.clone());
        Self {
            fragments: FragmentCache::new(&root),
            root,
            output_dir,
            settings,
            page: None,
            quiet,
            summary: RunSummary::default(),
        }
    }

    /// Documents every descriptor in the source directories, then writes
    /// the index.
    ///
    /// # Errors
    ///
    /// Returns the first error; pages written before it stay on disk.
    pub fn generate_all(mut self) -> Result<RunSummary, TemplateDocError> {
        for dir in self.settings.source_dirs.clone() {
            for path in loader::candidates(&self.root.join(&dir))? {
                let relative = Path::new(&dir).join(path.file_name().unwrap_or_default());
                self.generate_file(&path, &relative)?;
            }
        }
        self.write_index()?;
        Ok(self.finish())
    }

    /// Documents only the given descriptors. No index is written.
    ///
    /// Relative paths are taken relative to the root.
    ///
    /// # Errors
    ///
    /// Returns the first error; pages written before it stay on disk.
    pub fn generate_paths(mut self, paths: &[PathBuf]) -> Result<RunSummary, TemplateDocError> {
        for path in paths {
            if loader::is_image_stream(path) {
                debug!(path = %path.display(), "skipping image stream");
                continue;
            }
            let (full, relative) = self.resolve(path)?;
            self.generate_file(&full, &relative)?;
        }
        Ok(self.finish())
    }

    /// Splits a command-line path into the file to read and the path
    /// relative to the root that names its page.
    fn resolve(&self, path: &Path) -> Result<(PathBuf, PathBuf), TemplateDocError> {
        if path.is_relative() {
            return Ok((self.root.join(path), path.to_path_buf()));
        }

        let root = fs::canonicalize(&self.root).map_err(|e| TemplateDocError::io(&self.root, e))?;
        let full = fs::canonicalize(path).map_err(|e| TemplateDocError::io(path, e))?;
        let relative = match full.strip_prefix(&root) {
            Ok(rest) => rest.to_path_buf(),
            Err(_) => PathBuf::from(full.file_name().unwrap_or_default()),
        };
        Ok((full, relative))
    }

    /// Documents one descriptor.
    ///
    /// Returns the page path relative to the root, or `None` if the
    /// descriptor was skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor cannot be loaded or documented,
    /// or the page cannot be written.
    pub fn generate_file(
        &mut self,
        full: &Path,
        relative: &Path,
    ) -> Result<Option<PathBuf>, TemplateDocError> {
        let Some(descriptor) = descriptor::load(full)? else {
            self.summary.skipped += 1;
            return Ok(None);
        };

        let data = assemble::assemble(&descriptor, relative, &self.settings, &mut self.fragments)?;
        let body = self.page_template()?.render(&data.to_value()?);

        let outfile = descriptor::output_path(&self.output_dir, relative);
        self.write(&outfile, &body)?;
        if !self.quiet {
            println!("Generating {}...", outfile.display());
        }
        self.summary.written += 1;
        Ok(Some(outfile))
    }

    /// Writes the index page.
    ///
    /// # Errors
    ///
    /// Returns an error if a fragment or source directory cannot be read,
    /// or the page cannot be written.
    pub fn write_index(&mut self) -> Result<PathBuf, TemplateDocError> {
        let body = index::generate_index(&self.root, &self.settings, &mut self.fragments)?;
        let outfile = self.output_dir.join(INDEX_FILE);
        self.write(&outfile, &body)?;
        self.summary.index = true;
        Ok(outfile)
    }

    fn page_template(&mut self) -> Result<&PageTemplate, TemplateDocError> {
        let page = match self.page.take() {
            Some(page) => page,
            None => {
                let text = self.fragments.get(&self.settings.fragments.page_template)?;
                PageTemplate::parse(text)?
            }
        };
        Ok(&*self.page.insert(page))
    }

    /// Writes the banner and `body` to `outfile` under the root,
    /// creating parent directories.
    fn write(&self, outfile: &Path, body: &str) -> Result<(), TemplateDocError> {
        let path = self.root.join(outfile);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TemplateDocError::io(parent, e))?;
        }
        fs::write(&path, format!("{AUTOGEN_WARNING}{body}"))
            .map_err(|e| TemplateDocError::io(&path, e))
    }

    fn finish(self) -> RunSummary {
        info!(
            written = self.summary.written,
            skipped = self.summary.skipped,
            index = self.summary.index,
            fragments = self.fragments.len(),
            "generation finished"
        );
        self.summary
    }
}
