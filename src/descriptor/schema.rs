//! Typed view of an application-template descriptor.
//!
//! Only the fields the documentation tables read are modelled. Objects
//! are discriminated by their `kind`; anything that is not one of the
//! five documented kinds lands in [`TemplateObject::Other`].
//!
//! Fields that every table for a kind reads are required at parse time.
//! Fields read only on some paths are optional here and checked at the
//! point of use, so a missing key is reported with its object name.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::DescriptorError;

/// A parsed application-template document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Descriptor {
    /// Template labels; `labels.template` names the template.
    #[serde(default)]
    pub labels: IndexMap<String, serde_json::Value>,

    /// Template metadata.
    #[serde(default)]
    pub metadata: Option<ObjectMeta>,

    /// Template parameters, in declaration order.
    #[serde(default)]
    pub parameters: Option<Vec<Parameter>>,

    /// Objects instantiated by the template.
    #[serde(default)]
    pub objects: Option<Vec<TemplateObject>>,
}

impl Descriptor {
    /// The `labels.template` value, if it is a string.
    #[must_use]
    pub fn template_label(&self) -> Option<&str> {
        self.labels
            .get("template")
            .and_then(serde_json::Value::as_str)
    }

    /// The `metadata.annotations.description` value.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.annotations.get("description"))
            .map(String::as_str)
    }

    /// Parameters, or an empty slice when the key is absent.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        self.parameters.as_deref().unwrap_or_default()
    }

    /// Objects, or an empty slice when the key is absent.
    #[must_use]
    pub fn objects(&self) -> &[TemplateObject] {
        self.objects.as_deref().unwrap_or_default()
    }

    /// All `DeploymentConfig` objects, in document order.
    pub fn deployment_configs(&self) -> impl Iterator<Item = &DeploymentConfig> {
        self.objects()
            .iter()
            .filter_map(TemplateObject::as_deployment_config)
    }
}

/// Object metadata shared by templates and their objects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectMeta {
    /// Object name.
    #[serde(default)]
    pub name: Option<String>,

    /// Free-form annotations.
    #[serde(default)]
    pub annotations: IndexMap<String, String>,
}

impl ObjectMeta {
    /// Object name, or an empty string when unnamed.
    #[must_use]
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// A template parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,

    /// Default value. Usually a string, but YAML descriptors may carry
    /// bare numbers or flags.
    #[serde(default)]
    pub value: Option<serde_json::Value>,

    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the parameter must be supplied; `None` renders as unknown.
    #[serde(default)]
    pub required: Option<bool>,
}

impl Parameter {
    /// The value when it is a string.
    #[must_use]
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(serde_json::Value::as_str)
    }

    /// The description, which every parameter row displays.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::MissingField` if the parameter has none.
    pub fn require_description(&self) -> Result<&str, DescriptorError> {
        self.description
            .as_deref()
            .ok_or_else(|| {
                DescriptorError::missing("Parameter", &self.name, "description")
            })
    }
}

// ============================================================================
// Objects
// ============================================================================

/// An entry of the descriptor's `objects` sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum TemplateObject {
    /// `kind: Service`
    Service(Service),
    /// `kind: Route`
    Route(Route),
    /// `kind: BuildConfig`
    BuildConfig(BuildConfig),
    /// `kind: PersistentVolumeClaim`
    PersistentVolumeClaim(PersistentVolumeClaim),
    /// `kind: DeploymentConfig`
    DeploymentConfig(DeploymentConfig),
    /// Any other kind; never documented.
    #[serde(other)]
    Other,
}

impl TemplateObject {
    /// The `kind` discriminator this object was parsed from.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Service(_) => "Service",
            Self::Route(_) => "Route",
            Self::BuildConfig(_) => "BuildConfig",
            Self::PersistentVolumeClaim(_) => "PersistentVolumeClaim",
            Self::DeploymentConfig(_) => "DeploymentConfig",
            Self::Other => "Other",
        }
    }

    #[must_use]
    pub const fn as_service(&self) -> Option<&Service> {
        match self {
            Self::Service(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_route(&self) -> Option<&Route> {
        match self {
            Self::Route(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_build_config(&self) -> Option<&BuildConfig> {
        match self {
            Self::BuildConfig(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_persistent_volume_claim(&self) -> Option<&PersistentVolumeClaim> {
        match self {
            Self::PersistentVolumeClaim(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_deployment_config(&self) -> Option<&DeploymentConfig> {
        match self {
            Self::DeploymentConfig(d) => Some(d),
            _ => None,
        }
    }
}

// ----------------------------------------------------------------------------
// Service
// ----------------------------------------------------------------------------

/// `kind: Service`
#[derive(Debug, Clone, Deserialize)]
pub struct Service {
    pub metadata: ObjectMeta,
    pub spec: ServiceSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSpec {
    pub ports: Vec<ServicePort>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServicePort {
    #[serde(default)]
    pub port: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

// ----------------------------------------------------------------------------
// Route
// ----------------------------------------------------------------------------

/// `kind: Route`
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    /// Legacy route identifier; newer templates only carry `metadata.name`.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: RouteSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteSpec {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub tls: Option<RouteTls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteTls {
    pub termination: String,
}

// ----------------------------------------------------------------------------
// BuildConfig
// ----------------------------------------------------------------------------

/// `kind: BuildConfig`
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: BuildConfigSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfigSpec {
    pub strategy: BuildStrategy,
    #[serde(default)]
    pub output: Option<BuildOutput>,
    #[serde(default)]
    pub triggers: Option<Vec<Trigger>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStrategy {
    #[serde(rename = "type")]
    pub strategy_type: String,
    #[serde(default)]
    pub source_strategy: Option<SourceStrategy>,
    #[serde(default)]
    pub docker_strategy: Option<DockerStrategy>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceStrategy {
    pub from: ObjectReference,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerStrategy {
    #[serde(default)]
    pub dockerfile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildOutput {
    pub to: ObjectReference,
}

/// A reference to an image or image stream tag.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectReference {
    pub name: String,
}

/// A build or deployment trigger.
#[derive(Debug, Clone, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub trigger_type: String,
}

// ----------------------------------------------------------------------------
// PersistentVolumeClaim
// ----------------------------------------------------------------------------

/// `kind: PersistentVolumeClaim`
#[derive(Debug, Clone, Deserialize)]
pub struct PersistentVolumeClaim {
    pub metadata: ObjectMeta,
    pub spec: PersistentVolumeClaimSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaimSpec {
    pub access_modes: Vec<String>,
}

// ----------------------------------------------------------------------------
// DeploymentConfig
// ----------------------------------------------------------------------------

/// `kind: DeploymentConfig`
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentConfig {
    pub metadata: ObjectMeta,
    pub spec: DeploymentConfigSpec,
}

impl DeploymentConfig {
    /// Deployment name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata.name_or_empty()
    }

    /// The first container of the pod template; the only one documented.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::MissingField` if the pod has no containers.
    pub fn first_container(&self) -> Result<&Container, DescriptorError> {
        self.spec
            .template
            .spec
            .containers
            .first()
            .ok_or_else(|| {
                DescriptorError::missing(
                    "DeploymentConfig",
                    self.name(),
                    "spec.template.spec.containers[0]",
                )
            })
    }

    /// The pod template spec.
    #[must_use]
    pub const fn pod(&self) -> &PodSpec {
        &self.spec.template.spec
    }
}

/// DeploymentConfig spec.
///
/// `volumes` and `serviceAccountName` belong on the pod spec; they are
/// accepted here too because some templates misplace them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigSpec {
    #[serde(default)]
    pub triggers: Option<Vec<Trigger>>,
    #[serde(default)]
    pub replicas: Option<u32>,
    #[serde(default)]
    pub volumes: Option<Vec<Volume>>,
    #[serde(default)]
    pub service_account_name: Option<String>,
    pub template: PodTemplate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PodTemplate {
    pub spec: PodSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(default)]
    pub containers: Vec<Container>,
    #[serde(default)]
    pub volumes: Option<Vec<Volume>>,
    #[serde(default)]
    pub service_account_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ports: Option<Vec<ContainerPort>>,
    #[serde(default)]
    pub env: Option<Vec<EnvVar>>,
    #[serde(default)]
    pub volume_mounts: Option<Vec<VolumeMount>>,
    #[serde(default)]
    pub readiness_probe: Option<Probe>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub container_port: Option<u32>,
    #[serde(default)]
    pub protocol: Option<String>,
}

/// A container environment variable. `valueFrom` entries carry no value.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvVar {
    pub name: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub mount_path: String,
    #[serde(default)]
    pub read_only: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Probe {
    #[serde(default)]
    pub exec: Option<ExecAction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecAction {
    pub command: Vec<String>,
}
