//! Document assembly: everything the page template is rendered with.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{FamilyProfile, SecretRef, Settings};
use crate::descriptor::Descriptor;
use crate::descriptor::schema::Parameter;
use crate::docgen::extract::{Table, parameter_table};
use crate::docgen::fragments::FragmentCache;
use crate::error::{RenderError, TemplateDocError};

/// Suffix of parameter values that name an application secret.
const APP_SECRET_SUFFIX: &str = "-app-secret";

/// Render data for one page.
///
/// Sections are lists so the template can iterate them; an absent
/// section is an empty list and is left out of the serialized data.
#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub template: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSection>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<ObjectSections>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterSection {
    pub parametertable: String,
}

/// Table sections keyed by [`Table::key`], plus the secrets and
/// clustering sections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectSections {
    #[serde(flatten)]
    pub tables: IndexMap<&'static str, Vec<TableSection>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<SecretSection>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clustering: Vec<Marker>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSection {
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretSection {
    pub secret_name: String,
    pub secret_file: String,
}

impl From<SecretRef> for SecretSection {
    fn from(secret: SecretRef) -> Self {
        Self {
            secret_name: secret.name,
            secret_file: secret.file,
        }
    }
}

/// A section with no fields of its own; its presence is the content.
#[derive(Debug, Clone, Serialize)]
pub struct Marker {}

impl PageData {
    /// Converts to the untyped form the page template reads.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Data` if serialization fails.
    pub fn to_value(&self) -> Result<Value, RenderError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Builds the page data for `descriptor`.
///
/// `relative` is the descriptor path relative to the root; it selects
/// the descriptor's families.
///
/// # Errors
///
/// Returns an error if a table cannot be extracted or a description
/// fragment cannot be read.
pub fn assemble(
    descriptor: &Descriptor,
    relative: &Path,
    settings: &Settings,
    fragments: &mut FragmentCache,
) -> Result<PageData, TemplateDocError> {
    let profile = FamilyProfile::resolve(&settings.families, relative);
    if !profile.families.is_empty() {
        debug!(path = %relative.display(), families = ?profile.families, "descriptor families");
    }

    let mut description = descriptor.description().map(str::to_string);
    for name in &profile.description_fragments {
        let fragment = fragments.get(name)?;
        description = Some(match description {
            Some(text) => format!("{text}\n\n{fragment}"),
            None => fragment.to_string(),
        });
    }

    let parameters = if descriptor.objects.is_some() && !descriptor.parameters().is_empty() {
        vec![ParameterSection {
            parametertable: parameter_table(descriptor, &settings.parameter_values)?,
        }]
    } else {
        Vec::new()
    };

    let objects = if descriptor.objects.is_some() {
        vec![object_sections(descriptor, settings, &profile)?]
    } else {
        Vec::new()
    };

    Ok(PageData {
        template: descriptor
            .labels
            .get("template")
            .cloned()
            .unwrap_or_default(),
        description,
        parameters,
        objects,
    })
}

fn object_sections(
    descriptor: &Descriptor,
    settings: &Settings,
    profile: &FamilyProfile,
) -> Result<ObjectSections, TemplateDocError> {
    let mut sections = ObjectSections::default();

    for table in Table::ALL {
        if table.applies(descriptor) {
            let text = table.render(descriptor, settings)?;
            let section = vec![TableSection { table: text }];
            sections.tables.insert(table.key(), section);
        }
    }

    if !profile.omit_secrets {
        sections.secrets.extend(secret_section(descriptor, profile));
    }
    if profile.clustering {
        sections.clustering.push(Marker {});
    }

    Ok(sections)
}

/// The secret documented for a descriptor, if any.
///
/// Secrets are bound to service accounts, so only descriptors with a
/// deployment that names one get a secret. A family secret wins over the
/// first parameter value naming an application secret.
fn secret_section(descriptor: &Descriptor, profile: &FamilyProfile) -> Option<SecretSection> {
    let has_account = descriptor
        .deployment_configs()
        .any(|dc| dc.pod().service_account_name.is_some());
    if !has_account {
        return None;
    }

    if let Some(secret) = &profile.secret {
        return Some(secret.clone().into());
    }

    descriptor
        .parameters()
        .iter()
        .filter_map(Parameter::value_str)
        .find(|value| value.ends_with(APP_SECRET_SUFFIX))
        .map(|name| SecretSection {
            secret_name: name.to_string(),
            secret_file: format!("{name}.json"),
        })
}
