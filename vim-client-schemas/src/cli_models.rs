use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(version = "0.1")]
pub struct Opts {
    #[arg(long, help = "URL of the management service, e.g. https://vcenter.lab/")]
    pub url: String,
    #[arg(long, help = "Username for the authentication")]
    pub username: String,
    #[arg(long, help = "Password for the authentication")]
    pub password: String,
    #[arg(long, action, help = "Accept self signed TLS certificates from the endpoint")]
    pub insecure: bool,
    #[arg(short, long)]
    pub verbosity: Option<String>,
    #[command(subcommand)]
    pub sub_command: SubCommand,
}

/// Each sample action against the management service is a subcommand, sharing the
/// connection arguments above.
#[derive(Subcommand, Debug, Deserialize, Serialize)]
pub enum SubCommand {
    #[command(about = "Remove a virtual switch from a host's network configuration")]
    RemoveVirtualSwitch(RemoveVirtualSwitchCmd),
}

impl SubCommand {
    pub fn name(&self) -> String {
        match &self {
            SubCommand::RemoveVirtualSwitch(_) => "remove virtual switch".into(),
        }
    }
}

/// Host and switch the removal applies to
#[derive(Parser, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct RemoveVirtualSwitchCmd {
    #[arg(long, help = "Name of the host")]
    pub hostname: String,
    #[arg(long, help = "Name of the switch to be removed")]
    pub vswitchid: String,
}
