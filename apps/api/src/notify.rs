//! Low-stock notifier.
//!
//! The ledger writers emit a [`StockEvent`] after every commit; a single
//! notifier task consumes them, re-reads the item, and sends an email when
//! stock sits at or under the reorder level.
//!
//! Failure domains are deliberately decoupled: the HTTP request that
//! triggered the event never waits on SMTP, and every notifier failure is
//! logged at warn and dropped. Without SMTP configuration the task still
//! drains events and does nothing else.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::SmtpConfig;
use stockroom_core::Item;
use stockroom_db::Database;

/// Post-commit notification that an item's stock level changed.
#[derive(Debug, Clone)]
pub struct StockEvent {
    pub item_id: String,
}

/// Creates the stock event channel.
///
/// Bounded: if the notifier falls behind, senders drop events rather than
/// block a request.
pub fn channel() -> (mpsc::Sender<StockEvent>, mpsc::Receiver<StockEvent>) {
    mpsc::channel(256)
}

/// The notifier task state.
pub struct LowStockNotifier {
    db: Database,
    mailer: Option<Mailer>,
}

impl LowStockNotifier {
    /// Creates a notifier. `smtp: None` disables the transport; the task
    /// then drains events as silent no-ops.
    pub fn new(db: Database, smtp: Option<SmtpConfig>) -> Self {
        let mailer = smtp.and_then(|config| match Mailer::new(&config) {
            Ok(mailer) => Some(mailer),
            Err(reason) => {
                warn!(reason = %reason, "SMTP configuration unusable, low-stock alerts disabled");
                None
            }
        });

        LowStockNotifier { db, mailer }
    }

    /// Consumes stock events until the channel closes.
    pub async fn run(self, mut events: mpsc::Receiver<StockEvent>) {
        while let Some(event) = events.recv().await {
            self.check_and_notify(&event.item_id).await;
        }
        debug!("Stock event channel closed, notifier exiting");
    }

    /// Re-reads the item and sends an alert if it is low. All failures are
    /// swallowed here; nothing propagates to the ledger writers.
    async fn check_and_notify(&self, item_id: &str) {
        let item = match self.db.items().get_by_id(item_id).await {
            Ok(Some(item)) => item,
            Ok(None) => return,
            Err(e) => {
                warn!(item_id = %item_id, error = %e, "Low-stock check failed");
                return;
            }
        };

        if !item.is_low_stock() {
            return;
        }

        let Some(mailer) = &self.mailer else {
            debug!(sku = %item.sku, "Item is low on stock, no SMTP transport configured");
            return;
        };

        // SMTP I/O is blocking; keep it off the async workers.
        let mailer = mailer.clone();
        let send = tokio::task::spawn_blocking(move || mailer.send_alert(&item)).await;

        match send {
            Ok(Ok(sku)) => info!(sku = %sku, "Low-stock alert sent"),
            Ok(Err(e)) => warn!(item_id = %item_id, error = %e, "Low-stock alert failed"),
            Err(e) => warn!(item_id = %item_id, error = %e, "Low-stock alert task failed"),
        }
    }
}

/// SMTP mailer for alert delivery.
#[derive(Clone)]
struct Mailer {
    transport: SmtpTransport,
    from: Mailbox,
    recipient: Mailbox,
}

impl Mailer {
    fn new(config: &SmtpConfig) -> Result<Self, String> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| format!("invalid SMTP_FROM address: {e}"))?;
        let recipient: Mailbox = config
            .recipient
            .parse()
            .map_err(|e| format!("invalid alert recipient address: {e}"))?;

        let mut builder = SmtpTransport::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP relay setup failed: {e}"))?
            .port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Mailer {
            transport: builder.build(),
            from,
            recipient,
        })
    }

    /// Sends one alert; returns the item's SKU for logging.
    fn send_alert(&self, item: &Item) -> Result<String, String> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.recipient.clone())
            .subject(format!("Low stock alert: {}", item.name))
            .body(format!(
                "{} ({}) is low on stock.\nQuantity: {} (reorder level: {})\n\nStockroom Inventory",
                item.name, item.sku, item.quantity, item.reorder_level
            ))
            .map_err(|e| format!("failed to build message: {e}"))?;

        self.transport
            .send(&email)
            .map_err(|e| format!("send failed: {e}"))?;

        Ok(item.sku.clone())
    }
}
