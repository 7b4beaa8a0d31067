//! Deployment configuration tables: triggers, replicas, volumes, and
//! service accounts.
//!
//! Each table has one row per `DeploymentConfig` that sets the field,
//! either on its pod template spec or on its own spec.

use crate::descriptor::Descriptor;
use crate::descriptor::schema::{DeploymentConfig, Volume};
use crate::docgen::format::{PLACEHOLDER, bool_text, build_row};

/// Read-only cell text for a mount that does not set the flag.
const READ_ONLY_DEFAULT: &str = "false";
use crate::error::DescriptorError;

/// Deployment name and first trigger type.
///
/// # Errors
///
/// Infallible today; kept fallible like the other deployment tables.
pub fn triggers_table(descriptor: &Descriptor) -> Result<String, DescriptorError> {
    let mut text = String::new();
    for dc in descriptor.deployment_configs() {
        if let Some(trigger) = dc.spec.triggers.as_deref().and_then(<[_]>::first) {
            text.push_str(&build_row(&[
                dc.name().into(),
                trigger.trigger_type.as_str().into(),
            ]));
        }
    }
    Ok(text)
}

/// Deployment name and replica count. A count of zero is treated as unset.
#[must_use]
pub fn replicas_table(descriptor: &Descriptor) -> String {
    descriptor
        .deployment_configs()
        .filter_map(|dc| {
            dc.spec
                .replicas
                .filter(|&n| n != 0)
                .map(|n| build_row(&[dc.name().into(), n.to_string().into()]))
        })
        .collect()
}

/// Deployment name and service account.
///
/// # Errors
///
/// Returns `DescriptorError::MissingField` when the account is set on the
/// deployment spec but not on its pod template.
pub fn service_account_table(descriptor: &Descriptor) -> Result<String, DescriptorError> {
    let mut text = String::new();
    for dc in descriptor.deployment_configs() {
        if !is_set(dc.pod().service_account_name.as_deref())
            && !is_set(dc.spec.service_account_name.as_deref())
        {
            continue;
        }
        let account = dc.pod().service_account_name.as_deref().ok_or_else(|| {
            DescriptorError::missing(
                "DeploymentConfig",
                dc.name(),
                "spec.template.spec.serviceAccountName",
            )
        })?;
        text.push_str(&build_row(&[dc.name().into(), account.into()]));
    }
    Ok(text)
}

/// Deployment name, first volume, where the first container mounts it,
/// what it holds, and whether the mount is read-only.
///
/// # Errors
///
/// Returns `DescriptorError::MissingField` when the pod has no volumes or
/// the first container has no volume mounts.
pub fn volumes_table(descriptor: &Descriptor) -> Result<String, DescriptorError> {
    let mut text = String::new();
    for dc in descriptor.deployment_configs() {
        if !has_volumes(dc.pod().volumes.as_deref())
            && !has_volumes(dc.spec.volumes.as_deref())
        {
            continue;
        }
        text.push_str(&volume_row(dc)?);
    }
    Ok(text)
}

fn volume_row(dc: &DeploymentConfig) -> Result<String, DescriptorError> {
    let mount = dc
        .first_container()?
        .volume_mounts
        .as_deref()
        .and_then(<[_]>::first)
        .ok_or_else(|| {
            DescriptorError::missing(
                "DeploymentConfig",
                dc.name(),
                "spec.template.spec.containers[0].volumeMounts[0]",
            )
        })?;
    let volume = dc
        .pod()
        .volumes
        .as_deref()
        .and_then(<[_]>::first)
        .ok_or_else(|| {
            DescriptorError::missing(
                "DeploymentConfig",
                dc.name(),
                "spec.template.spec.volumes[0]",
            )
        })?;
    let read_only = mount.read_only.map_or(READ_ONLY_DEFAULT, bool_text);

    Ok(build_row(&[
        dc.name().into(),
        volume.name.as_str().into(),
        mount.mount_path.as_str().into(),
        volume_purpose(&volume.name).into(),
        read_only.into(),
    ]))
}

fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn has_volumes(volumes: Option<&[Volume]>) -> bool {
    volumes.is_some_and(|v| !v.is_empty())
}

/// What a volume holds, guessed from the hyphen-separated parts of its name.
///
/// - any part `certificate`, `keystore`, or `secret` → `ssl certs`
/// - else any part `amq` → `kahadb`
/// - else any part `pvol` → the second part of the name, or the
///   placeholder when there is none
/// - else the placeholder
#[must_use]
pub fn volume_purpose(name: &str) -> String {
    let parts: Vec<&str> = name.split('-').collect();
    let has = |part: &str| parts.contains(&part);

    if has("certificate") || has("keystore") || has("secret") {
        "ssl certs".to_string()
    } else if has("amq") {
        "kahadb".to_string()
    } else if has("pvol") {
        parts.get(1).unwrap_or(&PLACEHOLDER).to_string()
    } else {
        PLACEHOLDER.to_string()
    }
}
