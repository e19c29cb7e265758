// =============================================================================
// Execution Engine — turns a Signal into an order at the venue, with full
// demo-mode simulation support
// =============================================================================
//
// Order management stops here: the bot tracks no positions, so whether a
// repeated signal should be acted on again is the caller's (or a downstream
// order manager's) decision, not ours.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::types::{AccountMode, OrderSide};
use crate::venue::BinanceClient;

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// Outcome of an execution attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExecutionResult {
    /// Order was placed on the exchange (live mode).
    Placed(serde_json::Value),
    /// Order was simulated locally (demo mode).
    Simulated(String),
    /// An error occurred during execution.
    Error(String),
}

impl std::fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placed(v) => write!(f, "Placed({})", v),
            Self::Simulated(msg) => write!(f, "Simulated({msg})"),
            Self::Error(err) => write!(f, "Error({err})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Submits market orders through the venue client, or simulates them in demo
/// mode.  Stop-loss / take-profit levels are derived from the entry price and
/// the configured percentage distances; in live mode they are placed at the
/// venue as a protective OCO pair right after the entry fill.
pub struct ExecutionEngine {
    client: Arc<BinanceClient>,
    account_mode: AccountMode,
}

impl ExecutionEngine {
    pub fn new(client: Arc<BinanceClient>, account_mode: AccountMode) -> Self {
        Self {
            client,
            account_mode,
        }
    }

    /// Protective price levels for an entry at `price`.
    ///
    /// Buy: stop below / target above; Sell: mirrored.
    fn protective_levels(
        side: OrderSide,
        price: f64,
        stop_loss_pct: f64,
        take_profit_pct: f64,
    ) -> (f64, f64) {
        let sl = stop_loss_pct / 100.0;
        let tp = take_profit_pct / 100.0;
        match side {
            OrderSide::Buy => (price * (1.0 - sl), price * (1.0 + tp)),
            OrderSide::Sell => (price * (1.0 + sl), price * (1.0 - tp)),
        }
    }

    /// Execute one directional signal as a market order.
    ///
    /// In **demo mode** no request reaches the venue; a synthetic fill with a
    /// generated order id is logged instead.  In **live mode** the entry goes
    /// through the signed REST client and is then bracketed with a protective
    /// OCO at the stop-loss / take-profit levels.
    pub async fn execute_signal(
        &self,
        symbol: &str,
        side: OrderSide,
        last_close: f64,
        quantity: f64,
        stop_loss_pct: f64,
        take_profit_pct: f64,
    ) -> ExecutionResult {
        let (stop_loss, take_profit) =
            Self::protective_levels(side, last_close, stop_loss_pct, take_profit_pct);

        info!(
            symbol,
            side = %side,
            last_close,
            quantity,
            stop_loss,
            take_profit,
            account_mode = %self.account_mode,
            "executing signal"
        );

        match self.account_mode {
            AccountMode::Demo => self.execute_demo(symbol, side, last_close, quantity),
            AccountMode::Live => {
                self.execute_live(symbol, side, quantity, stop_loss, take_profit)
                    .await
            }
        }
    }

    // -------------------------------------------------------------------------
    // Demo execution
    // -------------------------------------------------------------------------

    fn execute_demo(
        &self,
        symbol: &str,
        side: OrderSide,
        price: f64,
        quantity: f64,
    ) -> ExecutionResult {
        let sim_order_id = Uuid::new_v4().to_string();

        let msg = format!(
            "Demo fill: symbol={symbol} side={side} price={price} qty={quantity} \
             sim_order_id={sim_order_id}"
        );
        info!("{}", msg);
        ExecutionResult::Simulated(msg)
    }

    // -------------------------------------------------------------------------
    // Live execution
    // -------------------------------------------------------------------------

    async fn execute_live(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: f64,
        stop_loss: f64,
        take_profit: f64,
    ) -> ExecutionResult {
        debug!(symbol, side = %side, quantity, "sending live market order");

        match self.client.place_market_order(symbol, side, quantity).await {
            Ok(order_response) => {
                info!(
                    symbol,
                    side = %side,
                    order_id = %order_response.get("orderId").and_then(|v| v.as_u64()).unwrap_or(0),
                    "live order placed"
                );

                // Bracket the fresh position: the OCO exits on the opposite
                // side at either the stop or the target.
                match self
                    .client
                    .place_oco_order(symbol, side.opposite(), quantity, take_profit, stop_loss)
                    .await
                {
                    Ok(oco_response) => info!(
                        symbol,
                        order_list_id = %oco_response
                            .get("orderListId")
                            .and_then(|v| v.as_i64())
                            .unwrap_or(-1),
                        stop_loss,
                        take_profit,
                        "protective OCO placed"
                    ),
                    Err(e) => warn!(
                        symbol,
                        error = %e,
                        "protective OCO placement failed — position is unprotected"
                    ),
                }

                ExecutionResult::Placed(order_response)
            }
            Err(e) => {
                warn!(symbol, side = %side, error = %e, "live order placement failed");
                ExecutionResult::Error(format!("order placement failed: {e}"))
            }
        }
    }
}

impl std::fmt::Debug for ExecutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionEngine")
            .field("client", &self.client)
            .finish()
    }
}
