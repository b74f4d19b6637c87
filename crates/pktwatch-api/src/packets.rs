// Packet endpoints
//
// Count, paged listing and read acknowledgment for monitored packets.

use secrecy::SecretString;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{PacketCountResponse, PacketId, PacketListResponse, PacketQuery};

impl ApiClient {
    /// Count the packets matching `query`.
    ///
    /// `GET /packets/count`
    pub async fn packet_count(
        &self,
        access_token: Option<&SecretString>,
        query: &PacketQuery,
    ) -> Result<u64, Error> {
        debug!("counting packets");
        let params = query.to_params(access_token);
        let resp: PacketCountResponse = self.get_with_params("packets/count", &params).await?;
        Ok(resp.count)
    }

    /// Fetch one page of packets plus the aggregate counters.
    ///
    /// `GET /packets?page&row`
    pub async fn packet_list(
        &self,
        access_token: Option<&SecretString>,
        query: &PacketQuery,
        page: u32,
        row: u32,
    ) -> Result<PacketListResponse, Error> {
        debug!(page, row, "listing packets");
        let mut params = query.to_params(access_token);
        params.push(("page".to_owned(), page.to_string()));
        params.push(("row".to_owned(), row.to_string()));
        self.get_with_params("packets", &params).await
    }

    /// Mark a packet as read. The response body is ignored.
    ///
    /// `PATCH /packets/{packet_id}`
    pub async fn mark_packet_read(&self, packet_id: &PacketId) -> Result<(), Error> {
        debug!(%packet_id, "marking packet read");
        let url = self.segment_url(&["packets", &packet_id.to_string()])?;
        self.patch_empty(url).await
    }
}
