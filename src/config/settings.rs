//! Generator settings.
//!
//! Every fixed table the generator consults lives here. The defaults
//! describe the decision server image repository; a YAML settings file
//! overrides individual keys and leaves the rest at their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::config::family::{FamilyRule, SecretRef};
use crate::error::ConfigError;

/// Names of the static text fragments, relative to the root directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FragmentPaths {
    /// Page template every descriptor is rendered through.
    pub page_template: PathBuf,

    /// Index page header.
    pub index_header: PathBuf,

    /// Index page footer.
    pub index_footer: PathBuf,
}

impl Default for FragmentPaths {
    fn default() -> Self {
        Self {
            page_template: PathBuf::from("template.adoc.in"),
            index_header: PathBuf::from("README.adoc.in"),
            index_footer: PathBuf::from("release-notes.adoc.in"),
        }
    }
}

/// Generator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directories scanned for descriptors, relative to the root.
    pub source_dirs: Vec<String>,

    /// Output root for generated pages, relative to the root.
    pub output_dir: PathBuf,

    /// Static text fragments.
    pub fragments: FragmentPaths,

    /// Documentation links for source-strategy builder images.
    pub links: IndexMap<String, String>,

    /// Fallback display values for parameters with no value of their own.
    pub parameter_values: IndexMap<String, String>,

    /// Index section titles keyed by source directory.
    pub display_names: IndexMap<String, String>,

    /// Descriptor families that get special-cased content.
    pub families: Vec<FamilyRule>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dirs: vec!["secrets".to_string(), "templates".to_string()],
            output_dir: PathBuf::from("docs"),
            fragments: FragmentPaths::default(),
            links: string_table(&[(
                "jboss-decisionserver64-openshift:1.4",
                "../../decisionserver/decisionserver-openshift{outfilesuffix}[`jboss-decisionserver-6/decisionserver64-openshift`]",
            )]),
            parameter_values: string_table(&[
                ("APPLICATION_DOMAIN", "secure-app.test.router.default.local"),
                (
                    "SOURCE_REPOSITORY_URL",
                    "https://github.com/jboss-openshift/openshift-examples.git",
                ),
                ("SOURCE_REPOSITORY_REF", "master"),
                ("CONTEXT_DIR", "helloworld"),
                ("GITHUB_WEBHOOK_SECRET", "secret101"),
                ("GENERIC_WEBHOOK_SECRET", "secret101"),
            ]),
            display_names: string_table(&[(
                "decisionserver",
                "Red Hat JBoss BRMS decision server",
            )]),
            families: default_families(),
        }
    }
}

impl Settings {
    /// Loads settings, overlaying the YAML file at `path` on the defaults.
    ///
    /// With no path the defaults are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parses settings YAML; omitted keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed YAML or unknown keys.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as null, not as an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Index section title for a source directory.
    #[must_use]
    pub fn display_name<'a>(&'a self, dir: &'a str) -> &'a str {
        self.display_names.get(dir).map_or(dir, String::as_str)
    }

    /// Source directories in sorted order, as the index lists them.
    #[must_use]
    pub fn sorted_source_dirs(&self) -> Vec<&str> {
        let mut dirs: Vec<&str> = self.source_dirs.iter().map(String::as_str).collect();
        dirs.sort_unstable();
        dirs
    }
}

fn string_table(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Built-in families.
///
/// - AMQ SSL templates carry an extra description of keystore setup.
/// - Data Grid templates carry an extra description of cache setup.
/// - Data Virtualization templates use a fixed secret.
/// - EAP templates document clustering.
/// - The secrets templates themselves get no secrets section.
fn default_families() -> Vec<FamilyRule> {
    vec![
        FamilyRule {
            id: "amq-ssl".to_string(),
            prefix: "amq".to_string(),
            suffix: Some("ssl.json".to_string()),
            description_fragment: Some(PathBuf::from("amq-ssl.adoc.in")),
            ..FamilyRule::default()
        },
        FamilyRule {
            id: "datagrid".to_string(),
            prefix: "datagrid".to_string(),
            description_fragment: Some(PathBuf::from("datagrid.adoc.in")),
            ..FamilyRule::default()
        },
        FamilyRule {
            id: "datavirt".to_string(),
            prefix: "datavirt".to_string(),
            secret: Some(SecretRef {
                name: "datavirt-app-secret".to_string(),
                file: "datavirt-app-secret.yaml".to_string(),
            }),
            ..FamilyRule::default()
        },
        FamilyRule {
            id: "eap".to_string(),
            prefix: "eap".to_string(),
            clustering: true,
            ..FamilyRule::default()
        },
        FamilyRule {
            id: "secrets".to_string(),
            prefix: "secrets".to_string(),
            omit_secrets: true,
            ..FamilyRule::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_builtin_tables() {
        let settings = Settings::default();
        assert_eq!(settings.source_dirs, vec!["secrets", "templates"]);
        assert_eq!(settings.output_dir, PathBuf::from("docs"));
        let reference = settings.parameter_values.get("SOURCE_REPOSITORY_REF");
        assert_eq!(reference.map(String::as_str), Some("master"));
        let decision_server = "jboss-decisionserver64-openshift:1.4";
        assert!(settings.links.contains_key(decision_server));
        assert_eq!(settings.families.len(), 5);
    }

    #[test]
    fn overlay_keeps_omitted_keys() {
        let settings = Settings::from_yaml(
            r"
source_dirs: [eap, amq]
display_names:
  eap: JBoss EAP
",
        )
        .unwrap();
        assert_eq!(settings.source_dirs, vec!["eap", "amq"]);
        assert_eq!(settings.display_name("eap"), "JBoss EAP");
        assert_eq!(settings.output_dir, PathBuf::from("docs"));
        assert_eq!(settings.fragments, FragmentPaths::default());
        assert_eq!(settings.families.len(), 5);
    }

    #[test]
    fn partial_fragments_keep_other_defaults() {
        let settings = Settings::from_yaml("fragments:\n  page_template: page.in\n").unwrap();
        assert_eq!(settings.fragments.page_template, PathBuf::from("page.in"));
        assert_eq!(
            settings.fragments.index_header,
            PathBuf::from("README.adoc.in")
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_yaml("sources: [a]\n").is_err());
    }

    #[test]
    fn empty_document_is_defaults() {
        let settings = Settings::from_yaml("\n").unwrap();
        assert_eq!(settings.source_dirs.len(), 2);
    }

    #[test]
    fn display_name_defaults_to_directory() {
        let settings = Settings::default();
        assert_eq!(
            settings.display_name("decisionserver"),
            "Red Hat JBoss BRMS decision server"
        );
        assert_eq!(settings.display_name("templates"), "templates");
    }

    #[test]
    fn sorted_source_dirs() {
        let settings = Settings::from_yaml("source_dirs: [templates, amq, secrets]\n").unwrap();
        assert_eq!(
            settings.sorted_source_dirs(), vec!["amq", "secrets",
            "templates"]
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Settings::load(Some(Path::new("/nonexistent/templatedoc.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_without_path_is_default() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("docs"));
    }
}
