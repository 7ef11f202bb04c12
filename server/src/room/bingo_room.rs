use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use common::bingo::SessionRng;
use common::{log, ClientId, PlayerSummary};

use super::broadcaster::RoomBroadcaster;
use super::game_state::{BingoGame, GamePhase, Recipient};

pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(20);

struct PendingReset {
    epoch: u64,
    handle: JoinHandle<()>,
}

struct RoomInner {
    game: BingoGame,
    pending_reset: Option<PendingReset>,
}

/// Serialises every client event through one lock and delivers whatever the
/// game queued before the lock is released, so clients see messages in the
/// same order the state changed.
pub struct BingoRoom<B: RoomBroadcaster> {
    inner: Arc<Mutex<RoomInner>>,
    broadcaster: B,
    reset_delay: Duration,
}

impl<B: RoomBroadcaster> Clone for BingoRoom<B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            broadcaster: self.broadcaster.clone(),
            reset_delay: self.reset_delay,
        }
    }
}

impl<B: RoomBroadcaster> BingoRoom<B> {
    pub fn new(broadcaster: B, reset_delay: Duration) -> Self {
        Self::with_rng(broadcaster, reset_delay, SessionRng::from_random())
    }

    pub fn with_rng(broadcaster: B, reset_delay: Duration, rng: SessionRng) -> Self {
        log!("[room] created with seed {}", rng.seed());
        Self {
            inner: Arc::new(Mutex::new(RoomInner {
                game: BingoGame::new(rng),
                pending_reset: None,
            })),
            broadcaster,
            reset_delay,
        }
    }

    pub async fn connect(&self, client_id: &ClientId) {
        let mut inner = self.inner.lock().await;
        inner.game.connect(client_id);
        self.flush(&mut inner).await;
    }

    pub async fn join(&self, client_id: &ClientId, name: &str) {
        self.apply("join", client_id, |game| game.join(client_id, name))
            .await;
    }

    pub async fn regenerate_board(&self, client_id: &ClientId) {
        self.apply("regenerate-board", client_id, |game| {
            game.regenerate_board(client_id)
        })
        .await;
    }

    pub async fn declare_ready_to_play(&self, client_id: &ClientId) {
        self.apply("declare-ready-to-play", client_id, |game| {
            game.declare_ready_to_play(client_id)
        })
        .await;
    }

    pub async fn dial(&self, client_id: &ClientId) -> bool {
        let mut inner = self.inner.lock().await;
        let valid = inner.game.dial(client_id);
        self.flush(&mut inner).await;
        valid
    }

    pub async fn declare_ready_for_next(&self, client_id: &ClientId) {
        self.apply("declare-ready-for-next", client_id, |game| {
            game.declare_ready_for_next(client_id)
        })
        .await;
    }

    pub async fn claim_bingo(&self, client_id: &ClientId) {
        self.apply("claim-bingo", client_id, |game| game.claim_bingo(client_id))
            .await;
    }

    pub async fn disconnect(&self, client_id: &ClientId) {
        let mut inner = self.inner.lock().await;
        inner.game.disconnect(client_id);
        self.flush(&mut inner).await;
    }

    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.game.reset();
        self.flush(&mut inner).await;
    }

    pub async fn phase(&self) -> GamePhase {
        self.inner.lock().await.game.phase()
    }

    pub async fn roster(&self) -> Vec<PlayerSummary> {
        self.inner.lock().await.game.roster()
    }

    pub async fn drawn_numbers(&self) -> Vec<u8> {
        self.inner.lock().await.game.drawn_numbers().to_vec()
    }

    pub async fn has_pending_reset(&self) -> bool {
        self.inner.lock().await.pending_reset.is_some()
    }

    async fn apply<F>(&self, action: &str, client_id: &ClientId, operation: F)
    where
        F: FnOnce(&mut BingoGame) -> Result<(), String>,
    {
        let mut inner = self.inner.lock().await;
        if let Err(e) = operation(&mut inner.game) {
            log!("[room] {} from {} ignored: {}", action, client_id, e);
        }
        self.flush(&mut inner).await;
    }

    async fn flush(&self, inner: &mut RoomInner) {
        for dispatch in inner.game.take_dispatches() {
            match dispatch.recipient {
                Recipient::Client(client_id) => {
                    self.broadcaster
                        .send_to_client(&client_id, dispatch.message)
                        .await;
                }
                Recipient::All => {
                    self.broadcaster.broadcast_to_all(dispatch.message).await;
                }
            }
        }

        // A reset moved the room to a new epoch; the old timer must not fire into it.
        let epoch = inner.game.epoch();
        if inner
            .pending_reset
            .as_ref()
            .is_some_and(|pending| pending.epoch != epoch)
        {
            self.cancel_pending_reset(inner);
        }

        if inner.game.take_reset_request() {
            self.schedule_reset(inner);
        }
    }

    fn cancel_pending_reset(&self, inner: &mut RoomInner) {
        if let Some(pending) = inner.pending_reset.take() {
            log!("[room] cancelled reset scheduled in epoch {}", pending.epoch);
            pending.handle.abort();
        }
    }

    fn schedule_reset(&self, inner: &mut RoomInner) {
        self.cancel_pending_reset(inner);

        let epoch = inner.game.epoch();
        let delay = self.reset_delay;
        let room = self.clone();
        log!("[room] resetting in {:?}", delay);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            room.reset_if_current(epoch).await;
        });
        inner.pending_reset = Some(PendingReset { epoch, handle });
    }

    async fn reset_if_current(&self, epoch: u64) {
        let mut inner = self.inner.lock().await;
        if inner.game.epoch() != epoch {
            log!("[room] skipping stale reset from epoch {}", epoch);
            return;
        }
        inner.pending_reset = None;
        inner.game.reset();
        self.flush(&mut inner).await;
    }
}
