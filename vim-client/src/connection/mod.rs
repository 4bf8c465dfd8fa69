use crate::normalize_endpoint;
use anyhow::{bail, Context};
use reqwest::{Client, RequestBuilder};
use vim_client_schemas::vim_models::{LoginRequest, ManagedObjectReference, ServiceContent};
use vim_client_schemas::SESSION_HEADER;

/// An authenticated session against the management service. Operations borrow the
/// connection read only, they never open or close session state themselves.
pub struct VimConnection {
    http: Client,
    base_url: String,
    service_content: ServiceContent,
}

impl VimConnection {
    /// Probe the endpoint, then authenticate and fetch the service content that all
    /// later calls start from.
    pub async fn connect(
        url: &str,
        username: &str,
        password: &str,
        insecure: bool,
    ) -> anyhow::Result<Self> {
        let base_url = normalize_endpoint(url);
        tracing::trace!("server connection = {:?}", base_url);
        if insecure {
            tracing::warn!("TLS certificate verification is disabled");
        }
        let http = Client::builder()
            .danger_accept_invalid_certs(insecure)
            .build()
            .context("building http client")?;

        // check the service is reachable before attempting to authenticate
        let probe = http
            .get(format!("{}api/", base_url))
            .send()
            .await
            .context("connecting to management service");
        if probe.is_err() {
            bail!(
                "could not connect to the management service at {}, is it running?",
                base_url
            );
        }

        let login = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = http
            .post(format!("{}api/session", base_url))
            .json(&login)
            .send()
            .await?;
        if !resp.status().is_success() {
            bail!("authentication failed for {}: {}", username, resp.text().await?);
        }
        let service_content: ServiceContent = resp
            .json()
            .await
            .context("deserialising service content from login response")?;
        if let Some(full_name) = &service_content.full_name {
            tracing::info!("connected to {}", full_name);
        }

        Ok(Self {
            http,
            base_url,
            service_content,
        })
    }

    /// Top of the inventory tree, the starting container for name resolution.
    pub fn root_folder(&self) -> &ManagedObjectReference {
        &self.service_content.root_folder
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(format!("{}api/{}", self.base_url, path))
            .header(SESSION_HEADER, &self.service_content.session_key)
    }

    /// Log out. Best effort, the session expires server side regardless.
    pub async fn disconnect(self) {
        let resp = self
            .http
            .delete(format!("{}api/session", self.base_url))
            .header(SESSION_HEADER, &self.service_content.session_key)
            .send()
            .await;
        match resp {
            Ok(_) => tracing::debug!("session closed"),
            Err(err) => tracing::warn!("could not close session: {err:#}"),
        }
    }
}
