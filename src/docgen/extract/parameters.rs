//! The template parameters table.

use indexmap::IndexMap;
use serde_json::Value;

use crate::descriptor::Descriptor;
use crate::descriptor::schema::{EnvVar, Parameter};
use crate::docgen::extract::names_match;
use crate::docgen::format::{PLACEHOLDER, build_row};
use crate::error::DescriptorError;

/// Cell text for a parameter whose `required` flag is absent.
const UNKNOWN_REQUIRED: &str = "?";

/// Environment variables of every deployment's first container, in
/// document order.
///
/// # Errors
///
/// Returns `DescriptorError::MissingField` for a deployment whose first
/// container is absent or has no `env` list.
pub fn container_environment(descriptor: &Descriptor) -> Result<Vec<&EnvVar>, DescriptorError> {
    let mut environment = Vec::new();
    for dc in descriptor.deployment_configs() {
        let env = dc.first_container()?.env.as_deref().ok_or_else(|| {
            DescriptorError::missing(
                "DeploymentConfig",
                dc.name(),
                "spec.template.spec.containers[0].env",
            )
        })?;
        environment.extend(env);
    }
    Ok(environment)
}

/// One row per parameter: name, linked environment variable, description,
/// displayed value, and required flag.
///
/// # Errors
///
/// Returns `DescriptorError::MissingField` for a parameter without a
/// description or a deployment without an `env` list.
pub fn parameter_table(
    descriptor: &Descriptor,
    fallback_values: &IndexMap<String, String>,
) -> Result<String, DescriptorError> {
    let environment = container_environment(descriptor)?;

    let mut text = String::new();
    for param in descriptor.parameters() {
        let row = parameter_row(param, &environment, fallback_values)?;
        text.push_str(&build_row(&row));
    }
    Ok(text)
}

fn parameter_row(
    param: &Parameter,
    environment: &[&EnvVar],
    fallback_values: &IndexMap<String, String>,
) -> Result<[Value; 5], DescriptorError> {
    let linked = environment
        .iter()
        .find(|env| names_match(&env.name, &param.name));

    let env_name = linked.map_or(PLACEHOLDER, |env| env.name.as_str());
    let value = resolve_value(param, linked.copied(), fallback_values);
    let required = param
        .required
        .map_or_else(|| Value::from(UNKNOWN_REQUIRED), Value::Bool);

    Ok([
        param.name.as_str().into(),
        env_name.into(),
        param.require_description()?.into(),
        value,
        required,
    ])
}

/// Displayed value of a parameter.
///
/// An explicit value wins unless it is empty, zero, `false` or null.
/// Otherwise the first linked environment variable decides, even when it
/// carries no literal value. Unlinked parameters fall back to the fixed
/// table, then the placeholder.
#[must_use]
pub fn resolve_value(
    param: &Parameter,
    linked: Option<&EnvVar>,
    fallback_values: &IndexMap<String, String>,
) -> Value {
    if let Some(value) = param.value.as_ref().filter(|v| is_truthy(v)) {
        return value.clone();
    }

    match linked {
        Some(env) => env.value.clone().unwrap_or_else(|| PLACEHOLDER.into()),
        None => fallback_values
            .get(&param.name)
            .map_or(PLACEHOLDER, String::as_str)
            .into(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn descriptor(json: &str) -> Descriptor {
        serde_json::from_str(json).unwrap()
    }

    const EAP: &str = r#"{
        "labels": {"template": "eap-basic"},
        "parameters": [
            {"name": "APPLICATION_NAME", "value": "eap-app",
             "description": "The name for the application.", "required": true},
            {"name": "HOSTNAME_HTTP", "description": "Custom hostname.", "required": false},
            {"name": "SOURCE_REPOSITORY_REF", "description": "Git branch/tag reference"},
            {"name": "HORNETQ_QUEUES", "description": "Queue names"},
            {"name": "UNRELATED", "description": "Nothing links here"}
        ],
        "objects": [
            {"kind": "DeploymentConfig", "metadata": {"name": "eap-app"},
             "spec": {"template": {"spec": {"containers": [{
                "image": "eap-app",
                "env": [
                    {"name": "APPLICATION_NAME", "value": "${APPLICATION_NAME}"},
                    {"name": "HOSTNAME_HTTP", "value": "${HOSTNAME_HTTP}"},
                    {"name": "MQ_QUEUES", "value": "${HORNETQ_QUEUES}"}
                ]}]}}}}
        ]
    }"#;

    fn rows() -> Vec<String> {
        let d = descriptor(EAP);
        parameter_table(&d, &Settings::default().parameter_values)
            .unwrap()
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn explicit_value_wins_over_environment() {
        assert_eq!(
            rows()[0],
            "|`APPLICATION_NAME` | `APPLICATION_NAME` | The name for the application. | eap-app | True"
        );
    }

    #[test]
    fn environment_value_used_without_explicit_value() {
        assert_eq!(
            rows()[1],
            "|`HOSTNAME_HTTP` | `HOSTNAME_HTTP` | Custom hostname. | `${HOSTNAME_HTTP}` | False"
        );
    }

    #[test]
    fn fallback_table_then_unknown_required() {
        assert_eq!(
            rows()[2],
            "|`SOURCE_REPOSITORY_REF` | -- | Git branch/tag reference | master | ?"
        );
    }

    #[test]
    fn prefix_differing_env_var_links() {
        assert_eq!(
            rows()[3],
            "|`HORNETQ_QUEUES` | `MQ_QUEUES` | Queue names | `${HORNETQ_QUEUES}` | ?"
        );
    }

    #[test]
    fn unlinked_parameter_gets_placeholders() {
        assert_eq!(rows()[4], "|`UNRELATED` | -- | Nothing links here | -- | ?");
    }

    #[test]
    fn empty_explicit_value_falls_through() {
        let param: Parameter =
            serde_json::from_str(r#"{"name": "CONTEXT_DIR", "value": ""}"#).unwrap();
        let fallback = Settings::default().parameter_values;
        assert_eq!(resolve_value(&param, None, &fallback), "helloworld");
    }

    #[test]
    fn scalar_values_are_shown() {
        let fallback = IndexMap::new();
        let param: Parameter =
            serde_json::from_str(r#"{"name": "REPLICAS", "value": 2}"#).unwrap();
        assert_eq!(resolve_value(&param, None, &fallback), 2);

        // Zero counts as unset, like the empty string.
        let param: Parameter =
            serde_json::from_str(r#"{"name": "REPLICAS", "value": 0}"#).unwrap();
        let env: EnvVar = serde_json::from_str(r#"{"name": "REPLICAS", "value": 3}"#).unwrap();
        assert_eq!(resolve_value(&param, Some(&env), &fallback), 3);
    }

    #[test]
    fn yaml_descriptor_with_bare_scalars_renders() {
        let yaml = "
labels:
  template: t
parameters:
  - name: REPLICAS
    value: 2
    description: Pod count
    required: true
  - name: DEBUG
    value: true
    description: Debug mode
objects: []
";
        let d: Descriptor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parameter_table(&d, &IndexMap::new()).unwrap(),
            "\n|`REPLICAS` | -- | Pod count | `2` | True\
             \n|`DEBUG` | -- | Debug mode | True | ?"
        );
    }

    #[test]
    fn linked_env_without_value_shows_placeholder() {
        let param: Parameter = serde_json::from_str(r#"{"name": "DB_PASSWORD"}"#).unwrap();
        let env: EnvVar = serde_json::from_str(r#"{"name": "DB_PASSWORD"}"#).unwrap();
        let fallback = IndexMap::new();
        assert_eq!(resolve_value(&param, Some(&env), &fallback), PLACEHOLDER);
    }

    #[test]
    fn missing_description_fails() {
        let d = descriptor(
            r#"{"labels": {"template": "t"}, "parameters": [{"name": "X"}], "objects": []}"#,
        );
        assert!(parameter_table(&d, &IndexMap::new()).is_err());
    }

    #[test]
    fn deployment_without_env_fails() {
        let d = descriptor(
            r#"{"labels": {"template": "t"},
                "parameters": [{"name": "X", "description": "x"}],
                "objects": [{"kind": "DeploymentConfig", "metadata": {"name": "app"},
                             "spec": {"template": {"spec": {"containers": [{"image": "i"}]}}}}]}"#,
        );
        let err = parameter_table(&d, &IndexMap::new()).unwrap_err();
        assert!(err.to_string().contains("env"));
    }
}
