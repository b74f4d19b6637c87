// Dashboard endpoints
//
// Summary data for the dashboard widgets.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::DeviceStatusResponse;

impl ApiClient {
    /// Device health split for the status pie chart.
    ///
    /// `GET /dashboards/devices/status`
    pub async fn device_status(
        &self,
        access_token: Option<&SecretString>,
    ) -> Result<DeviceStatusResponse, Error> {
        debug!("fetching device status");
        let params: Vec<(String, String)> = access_token
            .map(|t| ("access_token".to_owned(), t.expose_secret().to_owned()))
            .into_iter()
            .collect();
        self.get_with_params("dashboards/devices/status", &params)
            .await
    }
}
