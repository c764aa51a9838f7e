//! HTTP client for the appliance's configuration API.

use crate::api::{SetUsbIdentityReq, SetUsbIdentityRsp, UsbIdentityRsp};
use crate::config::DeviceConfig;
use crate::error::{Error, Result};
use crate::identity::Identity;
use crate::sync::IdentityService;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::COOKIE;
use std::time::Duration;
use tracing::{debug, trace};

/// Endpoint serving both get and set.
pub const USB_IDENTITY_PATH: &str = "/api/hid/usb-identity";

/// Session cookie the appliance expects.
pub const TOKEN_COOKIE: &str = "nano-kvm-token";

/// Blocking client for `getUsbIdentity` / `setUsbIdentity`.
#[derive(Debug, Clone)]
pub struct HttpService {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpService {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("client init: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint_url(base_url),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn from_config(config: &DeviceConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            config.token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.header(COOKIE, format!("{TOKEN_COOKIE}={token}")),
            None => req,
        }
    }
}

impl IdentityService for HttpService {
    fn get_usb_identity(&self) -> Result<Identity> {
        trace!(url = %self.endpoint, "GET usb identity");
        let rsp: UsbIdentityRsp = self
            .authorize(self.client.get(&self.endpoint))
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| Error::Transport(format!("get usb identity: {e}")))?;

        let identity = rsp.into_result()?;
        debug!(identity = %identity, "Fetched USB identity");
        Ok(identity)
    }

    fn set_usb_identity(&self, identity: &Identity) -> Result<()> {
        trace!(url = %self.endpoint, identity = %identity, "POST usb identity");
        let body: &SetUsbIdentityReq = identity;
        let rsp: SetUsbIdentityRsp = self
            .authorize(self.client.post(&self.endpoint))
            .json(body)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| Error::Transport(format!("set usb identity: {e}")))?;

        rsp.into_status()
    }
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}{USB_IDENTITY_PATH}", base_url.trim_end_matches('/'))
}
