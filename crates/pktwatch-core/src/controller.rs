// ── Packet board controller ──
//
// Owns the filter selection, pagination and fetched results of the
// packets page. Every filter change re-runs the count and list fetches;
// each fetch kind keeps a generation counter plus a cancellation token so
// a superseded request can never overwrite fresher state.

use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use pktwatch_api::ApiClient;

use crate::config::BoardConfig;
use crate::convert;
use crate::error::CoreError;
use crate::model::{
    DeviceStatus, FilterState, PacketId, PacketInfo, PacketRow, SelectedFilter,
};
use crate::session::Session;
use crate::store::{
    FilterAction, UnreadAction, UnreadState, project_selected, reduce_filters, reduce_unread,
};

const NAVIGATION_CHANNEL_SIZE: usize = 16;

// ── Navigation ───────────────────────────────────────────────────

/// Why the UI is being sent to the login route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// The session carries no access token.
    MissingToken,
    /// A filter-driven fetch failed; the token is presumed stale.
    RequestFailed,
}

/// Navigation side effects requested by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Login { path: String, reason: RedirectReason },
}

// ── Fetch outcomes ───────────────────────────────────────────────

/// What happened to a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Response applied to the board state.
    Applied,
    /// A newer fetch of the same kind started; this one was dropped.
    Superseded,
    /// Request failed and a login redirect was emitted.
    Redirected,
    /// Request failed; state left as it was.
    Failed,
}

/// Outcomes of the count + list pair run after a filter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub count: FetchOutcome,
    pub list: FetchOutcome,
}

// ── FetchSlot ────────────────────────────────────────────────────

struct SlotState {
    generation: u64,
    token: CancellationToken,
}

/// Sequencing for one fetch kind: last writer wins.
struct FetchSlot {
    state: Mutex<SlotState>,
}

impl FetchSlot {
    fn new(parent: &CancellationToken) -> Self {
        Self {
            state: Mutex::new(SlotState {
                generation: 0,
                token: parent.child_token(),
            }),
        }
    }

    /// Cancel the in-flight fetch (if any) and hand out a fresh generation.
    async fn begin(&self, parent: &CancellationToken) -> (u64, CancellationToken) {
        let mut slot = self.state.lock().await;
        slot.token.cancel();
        slot.generation += 1;
        slot.token = parent.child_token();
        (slot.generation, slot.token.clone())
    }
}

// ── PacketBoard ──────────────────────────────────────────────────

/// State owner of the packets page.
///
/// Cheaply cloneable via `Arc<BoardInner>`. Readers take snapshots or
/// subscribe to `watch` receivers; login redirects are broadcast as
/// [`Navigation`] events.
#[derive(Clone)]
pub struct PacketBoard {
    inner: Arc<BoardInner>,
}

struct BoardInner {
    config: BoardConfig,
    session: Session,
    api: ApiClient,
    filters: watch::Sender<Arc<FilterState>>,
    selected: watch::Sender<Arc<Vec<SelectedFilter>>>,
    page: watch::Sender<u32>,
    packet_count: watch::Sender<u64>,
    packet_list: watch::Sender<Arc<Vec<PacketRow>>>,
    packet_info: watch::Sender<Option<PacketInfo>>,
    unread: watch::Sender<Arc<UnreadState>>,
    device_status: watch::Sender<Option<DeviceStatus>>,
    navigation: broadcast::Sender<Navigation>,
    cancel: CancellationToken,
    count_fetch: FetchSlot,
    list_fetch: FetchSlot,
}

impl PacketBoard {
    /// Build a board and its HTTP client from configuration. Does not fetch.
    pub fn new(config: BoardConfig, session: Session) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.url.as_str(), &config.transport())?;
        Ok(Self::with_api(config, session, api))
    }

    /// Build a board around an existing API client.
    pub fn with_api(config: BoardConfig, session: Session, api: ApiClient) -> Self {
        let cancel = CancellationToken::new();
        let (navigation, _) = broadcast::channel(NAVIGATION_CHANNEL_SIZE);

        Self {
            inner: Arc::new(BoardInner {
                config,
                session,
                api,
                filters: watch::Sender::new(Arc::new(FilterState::default())),
                selected: watch::Sender::new(Arc::new(Vec::new())),
                page: watch::Sender::new(1),
                packet_count: watch::Sender::new(0),
                packet_list: watch::Sender::new(Arc::new(Vec::new())),
                packet_info: watch::Sender::new(None),
                unread: watch::Sender::new(Arc::new(UnreadState::default())),
                device_status: watch::Sender::new(None),
                navigation,
                count_fetch: FetchSlot::new(&cancel),
                list_fetch: FetchSlot::new(&cancel),
                cancel,
            }),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    // ── Snapshots ────────────────────────────────────────────────

    pub fn filters(&self) -> Arc<FilterState> {
        self.inner.filters.borrow().clone()
    }

    pub fn selected_filters(&self) -> Arc<Vec<SelectedFilter>> {
        self.inner.selected.borrow().clone()
    }

    pub fn page(&self) -> u32 {
        *self.inner.page.borrow()
    }

    pub fn packet_count(&self) -> u64 {
        *self.inner.packet_count.borrow()
    }

    pub fn packet_list(&self) -> Arc<Vec<PacketRow>> {
        self.inner.packet_list.borrow().clone()
    }

    pub fn packet_info(&self) -> Option<PacketInfo> {
        *self.inner.packet_info.borrow()
    }

    pub fn unread(&self) -> Arc<UnreadState> {
        self.inner.unread.borrow().clone()
    }

    pub fn device_status(&self) -> Option<DeviceStatus> {
        *self.inner.device_status.borrow()
    }

    // ── Subscriptions ────────────────────────────────────────────

    pub fn subscribe_filters(&self) -> watch::Receiver<Arc<FilterState>> {
        self.inner.filters.subscribe()
    }

    pub fn subscribe_selected_filters(&self) -> watch::Receiver<Arc<Vec<SelectedFilter>>> {
        self.inner.selected.subscribe()
    }

    pub fn subscribe_page(&self) -> watch::Receiver<u32> {
        self.inner.page.subscribe()
    }

    pub fn subscribe_packet_list(&self) -> watch::Receiver<Arc<Vec<PacketRow>>> {
        self.inner.packet_list.subscribe()
    }

    pub fn subscribe_unread(&self) -> watch::Receiver<Arc<UnreadState>> {
        self.inner.unread.subscribe()
    }

    /// Login redirects emitted from now on.
    pub fn navigation(&self) -> broadcast::Receiver<Navigation> {
        self.inner.navigation.subscribe()
    }

    // ── Filters ──────────────────────────────────────────────────

    /// Install a filter state (e.g. options loaded at startup) without fetching.
    pub fn load_filters(&self, state: FilterState) {
        let selected = project_selected(&state);
        self.inner.filters.send_replace(Arc::new(state));
        self.inner.selected.send_replace(Arc::new(selected));
    }

    /// Reduce `action` into the filter state, then re-run count and list.
    ///
    /// A rejected action returns the error before any state changes.
    pub async fn dispatch_filter(&self, action: FilterAction) -> Result<RefreshOutcome, CoreError> {
        let next = reduce_filters(&self.filters(), action)?;
        self.load_filters(next);
        Ok(self.refresh().await)
    }

    /// Count first (it resets the page), then list the current page.
    pub async fn refresh(&self) -> RefreshOutcome {
        let (count, _) = self.run_count().await;
        let list = self.fetch_list().await;
        RefreshOutcome { count, list }
    }

    // ── Pagination ───────────────────────────────────────────────

    /// Move to `page` (1-based) and fetch it.
    pub async fn set_page(&self, page: u32) -> Result<FetchOutcome, CoreError> {
        if page == 0 {
            return Err(CoreError::ValidationFailed {
                message: "page numbers start at 1".into(),
            });
        }
        self.inner.page.send_replace(page);
        Ok(self.fetch_list().await)
    }

    // ── Fetches ──────────────────────────────────────────────────

    /// Fetch the number of packets matching the filters; resets the page to 1.
    ///
    /// When that moves the board off another page, page 1 is listed too so
    /// the rows never lag behind the page number.
    pub async fn fetch_count(&self) -> FetchOutcome {
        let (outcome, rewound) = self.run_count().await;
        if rewound {
            debug!("count rewound the page, relisting");
            self.fetch_list().await;
        }
        outcome
    }

    /// The count request itself. Also reports whether the page moved back to 1.
    async fn run_count(&self) -> (FetchOutcome, bool) {
        let inner = &self.inner;
        let (generation, token) = inner.count_fetch.begin(&inner.cancel).await;
        self.check_session();

        let query = self.filters().to_query();
        let result = tokio::select! {
            biased;
            () = token.cancelled() => return (FetchOutcome::Superseded, false),
            r = inner.api.packet_count(inner.session.access_token(), &query) => r,
        };

        let slot = inner.count_fetch.state.lock().await;
        if slot.generation != generation {
            debug!(generation, "discarding superseded packet count");
            return (FetchOutcome::Superseded, false);
        }

        match result {
            Ok(count) => {
                inner.packet_count.send_replace(count);
                let previous = inner.page.send_replace(1);
                (FetchOutcome::Applied, previous != 1)
            }
            Err(e) => {
                warn!(error = %e, "Token has an exception while get informations. Re-login please.");
                self.redirect(RedirectReason::RequestFailed);
                (FetchOutcome::Redirected, false)
            }
        }
    }

    /// Fetch the current page, normalize it and reseed the unread set.
    pub async fn fetch_list(&self) -> FetchOutcome {
        let inner = &self.inner;
        let (generation, token) = inner.list_fetch.begin(&inner.cancel).await;
        self.check_session();

        let page = self.page();
        let row = inner.config.page_size;
        let query = self.filters().to_query();
        let result = tokio::select! {
            biased;
            () = token.cancelled() => return FetchOutcome::Superseded,
            r = inner.api.packet_list(inner.session.access_token(), &query, page, row) => r,
        };

        let slot = inner.list_fetch.state.lock().await;
        if slot.generation != generation {
            debug!(generation, page, "discarding superseded packet list");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(resp) => {
                let rows = convert::packet_rows(&resp.list, page, row);
                let unread = UnreadState::new(convert::unread_ids(&resp.list));
                debug!(page, rows = rows.len(), unread = unread.len(), "packet page loaded");

                inner.packet_list.send_replace(Arc::new(rows));
                self.dispatch_unread(UnreadAction::Initialize(unread));
                inner.packet_info.send_replace(Some(PacketInfo::from(resp.info)));
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, page, "Token has an exception while get informations. Re-login please.");
                self.redirect(RedirectReason::RequestFailed);
                FetchOutcome::Redirected
            }
        }
    }

    /// Fetch the device health split. Failures are logged, not redirected.
    pub async fn fetch_device_status(&self) -> FetchOutcome {
        let inner = &self.inner;
        self.check_session();

        let result = tokio::select! {
            biased;
            () = inner.cancel.cancelled() => return FetchOutcome::Superseded,
            r = inner.api.device_status(inner.session.access_token()) => r,
        };

        match result {
            Ok(status) => {
                inner.device_status.send_replace(Some(DeviceStatus::from(status)));
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "device status request failed");
                FetchOutcome::Failed
            }
        }
    }

    // ── Unread tracking ──────────────────────────────────────────

    pub fn dispatch_unread(&self, action: UnreadAction) {
        self.inner
            .unread
            .send_modify(|state| *state = Arc::new(reduce_unread(state, action)));
    }

    /// Mark `packet_id` read.
    ///
    /// The id leaves the unread set immediately; the server acknowledgment
    /// runs in the background and is never rolled back. Awaiting the
    /// returned handle is optional.
    pub fn mark_read(&self, packet_id: PacketId) -> JoinHandle<Result<(), CoreError>> {
        self.dispatch_unread(UnreadAction::Click(packet_id.clone()));

        let api = self.inner.api.clone();
        tokio::spawn(async move {
            api.mark_packet_read(&packet_id).await.map_err(|e| {
                warn!(%packet_id, error = %e, "read acknowledgment failed");
                CoreError::from(e)
            })
        })
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Cancel every in-flight fetch. Later fetches return `Superseded`.
    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
    }

    // ── Private helpers ──────────────────────────────────────────

    /// Missing tokens redirect up front; the request is still attempted.
    fn check_session(&self) {
        if !self.inner.session.has_token() {
            warn!("There has no access_token. Go back to the login page.");
            self.redirect(RedirectReason::MissingToken);
        }
    }

    fn redirect(&self, reason: RedirectReason) {
        // Zero receivers is fine: nobody is listening for navigation.
        let _ = self.inner.navigation.send(Navigation::Login {
            path: self.inner.config.login_path.clone(),
            reason,
        });
    }
}
