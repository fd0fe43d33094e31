use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

/// Domain events emitted by the core after a transaction commits.
/// Consumers (reporting, sync, notifications) live outside the crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    VoucherCreated {
        voucher_id: i32,
        code: String,
    },
    VoucherLinesApplied {
        voucher_id: i32,
        line_count: usize,
    },
    VoucherInactivated {
        voucher_id: i32,
    },
    StockAdjusted {
        warehouse_id: i32,
        article_id: i32,
        quantity: Decimal,
        average_cost: Decimal,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel, logging each event. Spawn as a task at startup;
/// the loop ends when every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::VoucherCreated { voucher_id, code } => {
                info!(voucher_id, code = %code, "Voucher created");
            }
            Event::VoucherLinesApplied {
                voucher_id,
                line_count,
            } => {
                info!(voucher_id, line_count, "Voucher lines applied");
            }
            Event::VoucherInactivated { voucher_id } => {
                info!(voucher_id, "Voucher inactivated");
            }
            Event::StockAdjusted {
                warehouse_id,
                article_id,
                quantity,
                average_cost,
            } => {
                info!(
                    warehouse_id,
                    article_id,
                    quantity = %quantity,
                    average_cost = %average_cost,
                    "Stock balance adjusted"
                );
            }
        }
    }

    info!("Event processing loop stopped");
}
