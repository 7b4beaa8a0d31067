//! Field extractors: one AsciiDoc table body per documented aspect.
//!
//! [`Table`] maps each page section to the extractor that fills it and
//! to the condition under which the section appears at all.

pub mod container;
pub mod deployment;
pub mod objects;
pub mod parameters;

use crate::config::Settings;
use crate::descriptor::Descriptor;
use crate::error::DescriptorError;

pub use deployment::volume_purpose;
pub use parameters::parameter_table;

/// Every table that can appear under a page's `objects` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Service,
    Route,
    BuildConfig,
    PersistentVolumeClaim,
    Image,
    ReadinessProbe,
    Ports,
    Env,
    Triggers,
    Replicas,
    Volumes,
    ServiceAccountName,
}

impl Table {
    /// All tables, in page order.
    pub const ALL: [Self; 12] = [
        Self::Service,
        Self::Route,
        Self::BuildConfig,
        Self::PersistentVolumeClaim,
        Self::Image,
        Self::ReadinessProbe,
        Self::Ports,
        Self::Env,
        Self::Triggers,
        Self::Replicas,
        Self::Volumes,
        Self::ServiceAccountName,
    ];

    /// Section name the page template refers to.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Route => "Route",
            Self::BuildConfig => "BuildConfig",
            Self::PersistentVolumeClaim => "PersistentVolumeClaim",
            Self::Image => "image",
            Self::ReadinessProbe => "readinessProbe",
            Self::Ports => "ports",
            Self::Env => "env",
            Self::Triggers => "triggers",
            Self::Replicas => "replicas",
            Self::Volumes => "volumes",
            Self::ServiceAccountName => "serviceAccountName",
        }
    }

    /// Whether the section appears on the page for `descriptor`.
    ///
    /// Object tables need an object of their kind. Container tables and
    /// the trigger and replica tables need any `DeploymentConfig`. The
    /// volume and service account tables need a pod spec that sets them.
    #[must_use]
    pub fn applies(self, descriptor: &Descriptor) -> bool {
        let objects = descriptor.objects();
        match self {
            Self::Service => objects.iter().any(|o| o.as_service().is_some()),
            Self::Route => objects.iter().any(|o| o.as_route().is_some()),
            Self::BuildConfig => objects.iter().any(|o| o.as_build_config().is_some()),
            Self::PersistentVolumeClaim => objects
                .iter()
                .any(|o| o.as_persistent_volume_claim().is_some()),
            Self::Image
            | Self::ReadinessProbe
            | Self::Ports
            | Self::Env
            | Self::Triggers
            | Self::Replicas => descriptor.deployment_configs().next().is_some(),
            Self::Volumes => descriptor
                .deployment_configs()
                .any(|dc| dc.pod().volumes.is_some()),
            Self::ServiceAccountName => descriptor
                .deployment_configs()
                .any(|dc| dc.pod().service_account_name.is_some()),
        }
    }

    /// Renders the table body.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError` if a field the table reads is missing.
    pub fn render(
        self,
        descriptor: &Descriptor,
        settings: &Settings,
    ) -> Result<String, DescriptorError> {
        match self {
            Self::Service => objects::service_table(descriptor),
            Self::Route => Ok(objects::route_table(descriptor)),
            Self::BuildConfig => objects::build_config_table(descriptor, &settings.links),
            Self::PersistentVolumeClaim => objects::persistent_volume_claim_table(descriptor),
            Self::Image => container::image_table(descriptor),
            Self::ReadinessProbe => container::readiness_probe_table(descriptor),
            Self::Ports => container::ports_table(descriptor),
            Self::Env => container::env_table(descriptor),
            Self::Triggers => deployment::triggers_table(descriptor),
            Self::Replicas => Ok(deployment::replicas_table(descriptor)),
            Self::Volumes => deployment::volumes_table(descriptor),
            Self::ServiceAccountName => deployment::service_account_table(descriptor),
        }
    }
}

/// Everything after the first character of `s`.
fn tail(s: &str) -> &str {
    s.char_indices().nth(1).map_or("", |(i, _)| &s[i..])
}

/// Loose name match linking parameters and environment variables.
///
/// Matches when the names are equal, or when either name minus its first
/// character occurs inside the other. Names differing only by a leading
/// prefix character link up this way; unrelated names can too.
#[must_use]
pub fn names_match(candidate: &str, name: &str) -> bool {
    candidate == name || candidate.contains(tail(name)) || name.contains(tail(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(json: &str) -> Descriptor {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn names_match_exact_and_loose() {
        assert!(names_match("HTTPS_NAME", "HTTPS_NAME"));
        // Leading character stripped from the parameter name.
        assert!(names_match("HORNETQ_QUEUES", "MQ_QUEUES"));
        // Leading character stripped from the candidate name.
        assert!(names_match("XDB_USERNAME", "DB_USERNAME"));
        assert!(!names_match("JAVA_OPTS", "DB_PASSWORD"));
    }

    #[test]
    fn names_match_is_case_sensitive() {
        assert!(!names_match("db_username", "DB_USERNAME"));
    }

    #[test]
    fn single_character_names_match_everything() {
        // An empty tail is a substring of any name.
        assert!(names_match("X", "ANYTHING"));
    }

    #[test]
    fn tail_handles_short_and_multibyte() {
        assert_eq!(tail(""), "");
        assert_eq!(tail("A"), "");
        assert_eq!(tail("éAB"), "AB");
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = Table::ALL.iter().map(|t| t.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Table::ALL.len());
    }

    #[test]
    fn applicability_follows_kinds() {
        let d = descriptor(
            r#"{"labels": {"template": "t"}, "objects": [
                {"kind": "Route", "id": "r", "spec": {}}
            ]}"#,
        );
        assert!(Table::Route.applies(&d));
        assert!(!Table::Service.applies(&d));
        assert!(!Table::Image.applies(&d));
        assert!(!Table::Triggers.applies(&d));
    }

    #[test]
    fn volume_tables_need_pod_fields() {
        let d = descriptor(
            r#"{"objects": [
                {"kind": "DeploymentConfig", "metadata": {"name": "app"},
                 "spec": {"template": {"spec": {"containers": [{"image": "x"}]}}}}
            ]}"#,
        );
        assert!(Table::Image.applies(&d));
        assert!(Table::Replicas.applies(&d));
        assert!(!Table::Volumes.applies(&d));
        assert!(!Table::ServiceAccountName.applies(&d));
    }
}
