//! Descriptor families.
//!
//! A family is a group of descriptors, recognised by the shape of their
//! path relative to the source root, whose pages get extra content. Each
//! descriptor's matching rules are folded into one [`FamilyProfile`]
//! before its page is assembled.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A fixed secret documented for every descriptor of a family.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecretRef {
    /// Secret name.
    pub name: String,

    /// File defining the secret.
    pub file: String,
}

/// One family rule from the settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyRule {
    /// Family identifier, used in logs.
    pub id: String,

    /// The relative descriptor path must start with this.
    pub prefix: String,

    /// If set, the relative descriptor path must also end with this.
    #[serde(default)]
    pub suffix: Option<String>,

    /// Fragment appended to the template description.
    #[serde(default)]
    pub description_fragment: Option<PathBuf>,

    /// Secret documented instead of one found among the parameters.
    #[serde(default)]
    pub secret: Option<SecretRef>,

    /// Whether pages get the clustering section.
    #[serde(default)]
    pub clustering: bool,

    /// Whether the secrets section is left out entirely.
    #[serde(default)]
    pub omit_secrets: bool,
}

impl FamilyRule {
    /// Returns `true` if the rule applies to `relative`.
    #[must_use]
    pub fn matches(&self, relative: &str) -> bool {
        relative.starts_with(&self.prefix)
            && self
                .suffix
                .as_deref()
                .is_none_or(|suffix| relative.ends_with(suffix))
    }
}

/// Special-case content resolved for a single descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyProfile {
    /// Identifiers of every matching family.
    pub families: Vec<String>,

    /// Fragments appended to the description, in rule order.
    pub description_fragments: Vec<PathBuf>,

    /// Fixed secret, from the first matching rule that defines one.
    pub secret: Option<SecretRef>,

    /// Include the clustering section.
    pub clustering: bool,

    /// Leave out the secrets section.
    pub omit_secrets: bool,
}

impl FamilyProfile {
    /// Folds every rule matching `relative` into one profile.
    #[must_use]
    pub fn resolve(rules: &[FamilyRule], relative: &Path) -> Self {
        let relative = relative.to_string_lossy();
        let mut profile = Self::default();

        for rule in rules.iter().filter(|rule| rule.matches(&relative)) {
            profile.families.push(rule.id.clone());
            if let Some(ref fragment) = rule.description_fragment {
                profile.description_fragments.push(fragment.clone());
            }
            if profile.secret.is_none() {
                profile.secret.clone_from(&rule.secret);
            }
            profile.clustering |= rule.clustering;
            profile.omit_secrets |= rule.omit_secrets;
        }

        profile
    }
}
