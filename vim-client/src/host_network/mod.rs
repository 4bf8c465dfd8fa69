use crate::connection::VimConnection;
use async_trait::async_trait;
use thiserror::Error;
use vim_client_schemas::vim_models::{
    FaultEnvelope, ManagedObjectReference, RemoveVirtualSwitchRequest,
};

/// This enum represents the kinds of faults a host network configuration call can
/// raise. The first four are the classified server faults, `Protocol` carries an
/// envelope this client does not recognise, and `Http` is a request level transport
/// failure that never produced an envelope at all.
#[derive(Error, Debug)]
pub enum VimFault {
    /// The host's configuration subsystem rejected the change.
    #[error("{0}")]
    HostConfig(String),
    /// The named object does not exist on the host.
    #[error("{0}")]
    NotFound(String),
    /// The object is still in use and cannot be removed.
    #[error("{0}")]
    ResourceInUse(String),
    /// Generic server side runtime fault.
    #[error("{0}")]
    Runtime(String),
    #[error("unrecognised fault from server")]
    Protocol {
        detail: Option<String>,
        message: Option<String>,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl VimFault {
    /// Classify a fault envelope by the local name of its detail element. Anything
    /// without a recognised detail name becomes `Protocol`, keeping whatever parts
    /// of the envelope were present.
    pub fn classify(envelope: FaultEnvelope) -> Self {
        let detail = envelope.detail_local_name().map(str::to_string);
        let FaultEnvelope { faultstring, .. } = envelope;
        match detail.as_deref() {
            Some("HostConfigFault") => VimFault::HostConfig(faultstring.unwrap_or_default()),
            Some("NotFoundFault") => VimFault::NotFound(faultstring.unwrap_or_default()),
            Some("ResourceInUseFault") => VimFault::ResourceInUse(faultstring.unwrap_or_default()),
            Some("RuntimeFault") => VimFault::Runtime(faultstring.unwrap_or_default()),
            _ => VimFault::Protocol {
                detail,
                message: faultstring,
            },
        }
    }
}

/// Mutating calls against a host's network configuration subsystem. Like
/// `InventoryQuery` this is a seam, tests substitute a stub that records the call
/// and raises a chosen fault.
#[async_trait]
pub trait HostNetworkPort {
    async fn remove_virtual_switch(
        &self,
        network_system: &ManagedObjectReference,
        vswitch_id: &str,
    ) -> Result<(), VimFault>;
}

#[async_trait]
impl HostNetworkPort for VimConnection {
    async fn remove_virtual_switch(
        &self,
        network_system: &ManagedObjectReference,
        vswitch_id: &str,
    ) -> Result<(), VimFault> {
        tracing::info!("removing virtual switch {vswitch_id} on {network_system}");
        let body = RemoveVirtualSwitchRequest {
            vswitch_name: vswitch_id.to_string(),
        };
        let resp = self
            .post(&format!(
                "network-system/{}/remove-virtual-switch",
                network_system.value
            ))
            .json(&body)
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(());
        }
        // not successful, the body should be a fault envelope. A body that does not
        // decode classifies as a protocol fault with nothing to report
        let envelope = resp.json::<FaultEnvelope>().await.unwrap_or_default();
        Err(VimFault::classify(envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> FaultEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_classify_known_detail_names() {
        let fault = VimFault::classify(envelope(json!({
            "faultstring": "A specified parameter was not correct.",
            "detail": {"HostConfigFault": {}}
        })));
        assert!(matches!(fault, VimFault::HostConfig(_)));

        let fault = VimFault::classify(envelope(json!({
            "faultstring": "The object or item referred to could not be found.",
            "detail": {"NotFoundFault": {}}
        })));
        match fault {
            VimFault::NotFound(description) => {
                assert_eq!(description, "The object or item referred to could not be found.");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }

        let fault = VimFault::classify(envelope(json!({
            "faultstring": "The resource 'vSwitch1' is in use.",
            "detail": {"ResourceInUseFault": {}}
        })));
        assert!(matches!(fault, VimFault::ResourceInUse(_)));

        let fault = VimFault::classify(envelope(json!({
            "faultstring": "A general system error occurred.",
            "detail": {"RuntimeFault": {}}
        })));
        assert!(matches!(fault, VimFault::Runtime(_)));
    }

    #[test]
    fn test_classify_unknown_detail_is_protocol() {
        let fault = VimFault::classify(envelope(json!({
            "faultstring": "ServerFaultCode",
            "detail": {"InvalidLoginFault": {}}
        })));
        match fault {
            VimFault::Protocol { detail, message } => {
                assert_eq!(detail.as_deref(), Some("InvalidLoginFault"));
                assert_eq!(message.as_deref(), Some("ServerFaultCode"));
            }
            other => panic!("expected Protocol, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_empty_envelope_is_protocol() {
        let fault = VimFault::classify(FaultEnvelope::default());
        match fault {
            VimFault::Protocol { detail, message } => {
                assert_eq!(detail, None);
                assert_eq!(message, None);
            }
            other => panic!("expected Protocol, got {other:?}"),
        }
    }

    #[test]
    fn test_classified_faults_display_the_description() {
        let fault = VimFault::classify(envelope(json!({
            "faultstring": "The object or item referred to could not be found.",
            "detail": {"NotFoundFault": {}}
        })));
        assert_eq!(
            fault.to_string(),
            "The object or item referred to could not be found."
        );
    }
}
