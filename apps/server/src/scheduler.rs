//! Background settlement of scheduled transactions.
//!
//! Funds move when a transaction is sent; this job only flips due `pending`
//! transactions to `completed`.

use chrono::Utc;
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::main_lib::AppState;

/// Initial delay before the first run, to let the server finish starting.
const INITIAL_DELAY_SECS: u64 = 5;

/// Starts the settlement loop on the given interval.
pub fn start_settlement_scheduler(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        info!("Settlement scheduler started ({}s interval)", every.as_secs());

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            run_settlement(&state).await;
        }
    });
}

/// Runs a single settlement pass. Returns the number of transactions settled.
pub async fn run_settlement(state: &AppState) -> usize {
    match state.transfer_service.settle_due_transfers(Utc::now()).await {
        Ok(settled) => {
            debug!("Settlement run finished: {} settled", settled);
            settled
        }
        Err(e) => {
            warn!("Settlement run failed: {}", e);
            0
        }
    }
}
