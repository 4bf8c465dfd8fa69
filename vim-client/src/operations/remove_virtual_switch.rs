use crate::host_network::{HostNetworkPort, VimFault};
use crate::inventory::InventoryQuery;
use anyhow::{bail, Context};
use std::io::Write;
use vim_client_schemas::vim_models::{HostConfigManager, ManagedObjectReference};

/// Terminal result of a removal attempt. Everything except an unclassified
/// transport error ends up here, the caller only reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Removed { vswitch_id: String },
    ConfigFailure,
    SwitchMissing { description: String },
    SwitchInUse { vswitch_id: String },
    RuntimeFailure { vswitch_id: String },
    ProtocolFault {
        detail: Option<String>,
        message: Option<String>,
    },
    HostNotFound,
}

impl Outcome {
    /// Write the outcome to the output stream. The wording (including the
    /// "falilures" spelling) is kept exactly as the long standing sample output,
    /// scripts in the field match on these lines.
    pub fn report(&self, out: &mut impl Write) -> std::io::Result<()> {
        match self {
            Outcome::Removed { vswitch_id } => {
                writeln!(out, " : Successful removing : {}", vswitch_id)
            }
            Outcome::ConfigFailure => writeln!(out, " : Failed : Configuration falilures. "),
            Outcome::SwitchMissing { description } => writeln!(out, "Failed : {}", description),
            Outcome::SwitchInUse { vswitch_id } => {
                writeln!(out, " : Failed removing switch {}", vswitch_id)?;
                writeln!(
                    out,
                    "There are virtual network adapters associated with the virtual switch."
                )
            }
            Outcome::RuntimeFailure { vswitch_id } => {
                writeln!(out, " : Failed removing switch: {}", vswitch_id)
            }
            Outcome::ProtocolFault { detail, message } => {
                writeln!(out, "Fault -")?;
                if let Some(detail) = detail {
                    writeln!(out, "{}", detail)?;
                }
                if let Some(message) = message {
                    writeln!(out, "\n Message: {}", message)?;
                }
                Ok(())
            }
            Outcome::HostNotFound => writeln!(out, "Host not found"),
        }
    }
}

/// Remove a named virtual switch from a host's network configuration. Resolves the
/// host by display name, follows its configManager to the network system handle and
/// issues exactly one removal call.
pub struct RemoveVirtualSwitch {
    pub host: String,
    pub vswitch_id: String,
}

impl RemoveVirtualSwitch {
    pub fn new(host: String, vswitch_id: String) -> Self {
        Self { host, vswitch_id }
    }

    pub async fn run(
        &self,
        inventory: &impl InventoryQuery,
        port: &impl HostNetworkPort,
        root_folder: &ManagedObjectReference,
    ) -> anyhow::Result<Outcome> {
        // the switch name goes to the server verbatim, only emptiness is checked here
        if self.vswitch_id.is_empty() {
            bail!("vswitchid must not be empty");
        }

        let hosts = inventory
            .resolve_by_type(root_folder, "HostSystem")
            .await
            .context("resolving hosts under the root folder")?;
        let Some(host_ref) = hosts.get(&self.host) else {
            return Ok(Outcome::HostNotFound);
        };

        let mut props = inventory
            .get_properties(host_ref, &["configManager"])
            .await
            .context("fetching configManager of host")?;
        let config_manager = props
            .remove("configManager")
            .with_context(|| format!("host {} has no configManager property", self.host))?;
        let config_manager: HostConfigManager = serde_json::from_value(config_manager)
            .context("deserialising configManager")?;
        let network_system = config_manager
            .network_system
            .with_context(|| format!("host {} has no network system", self.host))?;

        match port
            .remove_virtual_switch(&network_system, &self.vswitch_id)
            .await
        {
            Ok(()) => Ok(Outcome::Removed {
                vswitch_id: self.vswitch_id.clone(),
            }),
            Err(VimFault::HostConfig(_)) => Ok(Outcome::ConfigFailure),
            Err(fault @ VimFault::NotFound(_)) => Ok(Outcome::SwitchMissing {
                description: fault.to_string(),
            }),
            Err(VimFault::ResourceInUse(_)) => Ok(Outcome::SwitchInUse {
                vswitch_id: self.vswitch_id.clone(),
            }),
            Err(VimFault::Runtime(_)) => Ok(Outcome::RuntimeFailure {
                vswitch_id: self.vswitch_id.clone(),
            }),
            Err(VimFault::Protocol { detail, message }) => {
                Ok(Outcome::ProtocolFault { detail, message })
            }
            // not one of the handled fault kinds, let it escape to the caller
            Err(VimFault::Http(err)) => {
                Err(err).context("issuing remove virtual switch request")
            }
        }
    }
}
