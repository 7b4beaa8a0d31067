//! Tables describing the first container of each deployment: image,
//! readiness probe, ports, and environment.

use serde_json::Value;

use crate::descriptor::Descriptor;
use crate::descriptor::schema::{DeploymentConfig, EnvVar, Parameter};
use crate::docgen::extract::names_match;
use crate::docgen::format::{PLACEHOLDER, build_row, merged_cell, or_placeholder};
use crate::error::DescriptorError;

/// Deployment name and container image.
///
/// # Errors
///
/// Returns `DescriptorError::MissingField` for a container without an image.
pub fn image_table(descriptor: &Descriptor) -> Result<String, DescriptorError> {
    let mut text = String::new();
    for dc in descriptor.deployment_configs() {
        let image = dc.first_container()?.image.as_deref().ok_or_else(|| {
            DescriptorError::missing(
                "DeploymentConfig",
                dc.name(),
                "spec.template.spec.containers[0].image",
            )
        })?;
        text.push_str(&build_row(&[dc.name().into(), image.into()]));
    }
    Ok(text)
}

/// A titled listing block with the probe command, for each deployment
/// whose container has a readiness probe.
///
/// # Errors
///
/// Returns `DescriptorError::MissingField` for a probe without an `exec`
/// action.
pub fn readiness_probe_table(descriptor: &Descriptor) -> Result<String, DescriptorError> {
    let mut text = String::new();
    for dc in descriptor.deployment_configs() {
        let Some(probe) = dc.first_container()?.readiness_probe.as_ref() else {
            continue;
        };
        let exec = probe.exec.as_ref().ok_or_else(|| {
            DescriptorError::missing(
                "DeploymentConfig",
                dc.name(),
                "spec.template.spec.containers[0].readinessProbe.exec.command",
            )
        })?;
        text.push_str(&format!(
            "\n.{}\n----\n{}\n----\n",
            dc.name(),
            exec.command.join(" ")
        ));
    }
    Ok(text)
}

/// Per deployment, a header cell spanning its ports, then the name, port
/// number, and protocol of each.
///
/// # Errors
///
/// Returns `DescriptorError::MissingField` for a container without ports.
pub fn ports_table(descriptor: &Descriptor) -> Result<String, DescriptorError> {
    let mut text = String::new();
    for dc in descriptor.deployment_configs() {
        let ports = dc.first_container()?.ports.as_deref().ok_or_else(|| {
            DescriptorError::missing(
                "DeploymentConfig",
                dc.name(),
                "spec.template.spec.containers[0].ports",
            )
        })?;

        text.push_str(&deployment_header(dc, ports.len()));
        for port in ports {
            text.push_str(&build_row(&[
                or_placeholder(port.name.as_deref().filter(|n| !n.is_empty())),
                or_placeholder(port.container_port.filter(|&p| p != 0)),
                or_placeholder(port.protocol.as_deref().filter(|p| !p.is_empty())),
            ]));
        }
    }
    Ok(text)
}

/// Per deployment, a header cell spanning its variables, then the name,
/// linked parameter description, and value of each.
///
/// # Errors
///
/// Returns `DescriptorError::MissingField` for a container without an
/// `env` list or a linked parameter without a description.
pub fn env_table(descriptor: &Descriptor) -> Result<String, DescriptorError> {
    let parameters = descriptor.parameters();

    let mut text = String::new();
    for dc in descriptor.deployment_configs() {
        let env = dc.first_container()?.env.as_deref().ok_or_else(|| {
            DescriptorError::missing(
                "DeploymentConfig",
                dc.name(),
                "spec.template.spec.containers[0].env",
            )
        })?;

        text.push_str(&deployment_header(dc, env.len()));
        for var in env {
            text.push_str(&build_row(&env_row(var, parameters)?));
        }
    }
    Ok(text)
}

fn env_row(var: &EnvVar, parameters: &[Parameter]) -> Result<[Value; 3], DescriptorError> {
    let description = match parameters.iter().find(|p| names_match(&p.name, &var.name)) {
        Some(param) => param.require_description()?,
        None => PLACEHOLDER,
    };
    let value = var.value.clone().unwrap_or_else(|| PLACEHOLDER.into());

    Ok([var.name.as_str().into(), description.into(), value])
}

fn deployment_header(dc: &DeploymentConfig, rows: usize) -> String {
    merged_cell(rows, &format!("`{}`", dc.name()))
}
