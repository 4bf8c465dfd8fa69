use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;

/// Opaque handle to a server owned managed object. Only valid for the lifetime of the
/// session that resolved it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ManagedObjectReference {
    #[serde(rename = "type")]
    pub ref_type: String,
    pub value: String,
}

impl fmt::Display for ManagedObjectReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ref_type, self.value)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by the session endpoint on login, holds the handles every later call
/// starts from.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct ServiceContent {
    pub session_key: String,
    pub root_folder: ManagedObjectReference,
    // product name and version as reported by the endpoint
    pub full_name: Option<String>,
}

/// Request a view of all objects of one type reachable under a container, keyed by
/// display name. The traversal happens server side.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct ContainerViewRequest {
    pub container: ManagedObjectReference,
    pub view_type: String,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub struct ContainerViewResponse {
    pub objects: HashMap<String, ManagedObjectReference>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct PropertyRequest {
    pub obj: ManagedObjectReference,
    pub path_set: Vec<String>,
}

/// Property values come back as raw JSON, the caller deserialises the ones it asked
/// for into typed models.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub struct PropertyResponse {
    pub props: HashMap<String, Value>,
}

/// Subset of a host's configManager property. Only the network system handle is
/// used by this client.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct HostConfigManager {
    pub network_system: Option<ManagedObjectReference>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct RemoveVirtualSwitchRequest {
    pub vswitch_name: String,
}

/// Fault envelope returned by the service when a call fails. Both fields are
/// optional, a broken or proxied endpoint may return either or neither.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "snake_case")]
pub struct FaultEnvelope {
    pub faultstring: Option<String>,
    pub detail: Option<serde_json::Map<String, Value>>,
}

impl FaultEnvelope {
    /// Local name of the first element under the detail node, if there is one. This
    /// names the fault type the server raised.
    pub fn detail_local_name(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|d| d.keys().next().map(|k| k.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_moref_serialises_with_type_key() {
        let moref = ManagedObjectReference {
            ref_type: "HostSystem".into(),
            value: "host-42".into(),
        };
        let as_json = serde_json::to_value(&moref).unwrap();
        assert_eq!(as_json, json!({"type": "HostSystem", "value": "host-42"}));
    }

    #[test]
    fn test_fault_envelope_detail_local_name() {
        let envelope: FaultEnvelope = serde_json::from_value(json!({
            "faultstring": "The resource 'vSwitch1' is in use.",
            "detail": {"ResourceInUseFault": {"name": "vSwitch1"}}
        }))
        .unwrap();
        assert_eq!(envelope.detail_local_name(), Some("ResourceInUseFault"));
        assert_eq!(
            envelope.faultstring.as_deref(),
            Some("The resource 'vSwitch1' is in use.")
        );
    }

    #[test]
    fn test_fault_envelope_tolerates_missing_fields() {
        let envelope: FaultEnvelope = serde_json::from_value(json!({})).unwrap();
        assert_eq!(envelope.detail_local_name(), None);
        assert_eq!(envelope.faultstring, None);
    }
}
