//! Tables for the top-level object kinds: services, routes, build
//! configurations, and persistent volume claims.

use indexmap::IndexMap;
use serde_json::Value;

use crate::descriptor::schema::{BuildConfig, Route, Service, Trigger};
use crate::descriptor::{Descriptor, TemplateObject};
use crate::docgen::format::{build_row, merged_cell, or_placeholder};
use crate::error::DescriptorError;

/// Host shown for routes that let the router pick one.
pub const DEFAULT_HOST: &str = "<default>";

/// Services: a header cell spanning the ports, one row per port, and the
/// description cell spanning the same rows after the first port.
///
/// # Errors
///
/// Returns `DescriptorError::MissingField` for a service with ports but
/// no description annotation.
pub fn service_table(descriptor: &Descriptor) -> Result<String, DescriptorError> {
    let mut text = String::new();
    for service in descriptor
        .objects()
        .iter()
        .filter_map(TemplateObject::as_service)
    {
        text.push_str(&service_rows(service)?);
    }
    Ok(text)
}

fn service_rows(service: &Service) -> Result<String, DescriptorError> {
    let name = service.metadata.name_or_empty();
    let ports = &service.spec.ports;
    let mut text = merged_cell(ports.len(), &format!("`{name}`"));

    for (i, port) in ports.iter().enumerate() {
        text.push_str(&build_row(&[
            or_placeholder(port.port.filter(|&p| p != 0)),
            or_placeholder(port.name.as_deref().filter(|n| !n.is_empty())),
        ]));
        if i == 0 {
            let description = service
                .metadata
                .annotations
                .get("description")
                .ok_or_else(|| {
                    DescriptorError::missing("Service", name, "metadata.annotations.description")
                })?;
            text.push_str(&merged_cell(ports.len(), description));
        }
    }

    Ok(text)
}

/// Routes: identifier, TLS termination, and host.
#[must_use]
pub fn route_table(descriptor: &Descriptor) -> String {
    descriptor
        .objects()
        .iter()
        .filter_map(TemplateObject::as_route)
        .map(|route| build_row(&route_row(route)))
        .collect()
}

fn route_row(route: &Route) -> [Value; 3] {
    let id = route
        .id
        .as_deref()
        .unwrap_or_else(|| route.metadata.name_or_empty());
    let tls = route
        .spec
        .tls
        .as_ref()
        .map_or_else(
            || "none".to_string(),
            |tls| format!("TLS {}", tls.termination),
        );
    let host = route.spec.host.as_deref().unwrap_or(DEFAULT_HOST);

    [id.into(), tls.into(), host.into()]
}

/// Build configurations: builder image or Dockerfile, documentation link,
/// output image, and trigger types.
///
/// # Errors
///
/// Returns `DescriptorError` for an unsupported strategy, a builder image
/// without a configured link, or a missing field the row reads.
pub fn build_config_table(
    descriptor: &Descriptor,
    links: &IndexMap<String, String>,
) -> Result<String, DescriptorError> {
    let mut text = String::new();
    for build in descriptor
        .objects()
        .iter()
        .filter_map(TemplateObject::as_build_config)
    {
        text.push_str(&build_row(&build_config_row(build, links)?));
    }
    Ok(text)
}

fn build_config_row(
    build: &BuildConfig,
    links: &IndexMap<String, String>,
) -> Result<[Value; 4], DescriptorError> {
    let name = build.metadata.name_or_empty();
    let strategy = &build.spec.strategy;

    let (source, link) = match strategy.strategy_type.as_str() {
        "Source" => {
            let image = &strategy
                .source_strategy
                .as_ref()
                .ok_or_else(|| {
                    DescriptorError::missing("BuildConfig", name, "spec.strategy.sourceStrategy")
                })?
                .from
                .name;
            let link = links
                .get(image)
                .ok_or_else(|| DescriptorError::UnknownBuilderImage(image.clone()))?;
            (image.clone(), format!(" link:{link}"))
        }
        "Docker" => {
            let path = strategy
                .docker_strategy
                .as_ref()
                .and_then(|docker| docker.dockerfile_path.clone())
                .ok_or_else(|| {
                    DescriptorError::missing(
                        "BuildConfig",
                        name,
                        "spec.strategy.dockerStrategy.dockerfilePath",
                    )
                })?;
            (path, String::new())
        }
        other => {
            return Err(DescriptorError::UnsupportedStrategy {
                object: name.to_string(),
                strategy: other.to_string(),
            });
        }
    };

    let output = build
        .spec
        .output
        .as_ref()
        .ok_or_else(|| {
            DescriptorError::missing("BuildConfig", name, "spec.output.to.name")
        })?;
    let triggers = build
        .spec
        .triggers
        .as_deref()
        .ok_or_else(|| {
            DescriptorError::missing("BuildConfig", name, "spec.triggers")
        })?;

    Ok([
        source.into(),
        link.into(),
        output.to.name.clone().into(),
        join_trigger_types(triggers).into(),
    ])
}

fn join_trigger_types(triggers: &[Trigger]) -> String {
    triggers
        .iter()
        .map(|t| t.trigger_type.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Persistent volume claims: name and first access mode.
///
/// # Errors
///
/// Returns `DescriptorError::MissingField` for a claim with no access modes.
pub fn persistent_volume_claim_table(descriptor: &Descriptor) -> Result<String, DescriptorError> {
    let mut text = String::new();
    for claim in descriptor
        .objects()
        .iter()
        .filter_map(TemplateObject::as_persistent_volume_claim)
    {
        let name = claim.metadata.name_or_empty();
        let mode = claim.spec.access_modes.first().ok_or_else(|| {
            DescriptorError::missing("PersistentVolumeClaim", name, "spec.accessModes[0]")
        })?;
        text.push_str(&build_row(&[name.into(), mode.as_str().into()]));
    }
    Ok(text)
}
