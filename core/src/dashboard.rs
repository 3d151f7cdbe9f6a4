//! The dashboard's view state and its fetch-on-mount lifecycle.
//!
//! # Design
//! A mounted [`Dashboard`] owns one spawned task that fetches the listing,
//! maps it, and publishes the result on a `watch` channel. The state only ever
//! moves `Empty -> Loaded`, at most once. A failed fetch is deliberately
//! ignored and leaves the state `Empty`.
//!
//! The sender lives in a slot shared by the task and the dashboard. The task
//! publishes only while holding the slot's lock, and unmounting empties the
//! slot under that same lock, so no state is published once `unmount`
//! returns, even if the task is mid-poll on another worker.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::TransactionsClient;
use crate::error::MapError;
use crate::mapper::{to_balance_view, to_transaction_view, BalanceView, TransactionView};
use crate::transport::Transport;
use crate::types::{TransactionKind, TransactionsResponse};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DashboardState {
    #[default]
    Empty,
    Loaded {
        balance: BalanceView,
        transactions: Vec<TransactionView>,
    },
}

impl DashboardState {
    /// Map a fetched listing into the loaded state.
    ///
    /// Transactions that fail to map are dropped (and logged); the others keep
    /// the order the API returned them in.
    ///
    /// Fails only when the balance cannot be formatted.
    pub fn from_response(response: &TransactionsResponse) -> Result<Self, MapError> {
        let balance = to_balance_view(&response.balance)?;
        let transactions = response
            .transactions
            .iter()
            .filter_map(|wire| match to_transaction_view(wire) {
                Ok(view) => Some(view),
                Err(err) => {
                    tracing::warn!(error = %err, "dropping transaction from dashboard");
                    None
                }
            })
            .collect();

        Ok(DashboardState::Loaded {
            balance,
            transactions,
        })
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, DashboardState::Loaded { .. })
    }

    pub fn balance(&self) -> Option<&BalanceView> {
        match self {
            DashboardState::Empty => None,
            DashboardState::Loaded { balance, .. } => Some(balance),
        }
    }

    pub fn transactions(&self) -> &[TransactionView] {
        match self {
            DashboardState::Empty => &[],
            DashboardState::Loaded { transactions, .. } => transactions,
        }
    }

    /// The three summary cells; blank until the balance has loaded.
    pub fn summary(&self) -> SummaryCards {
        match self.balance() {
            Some(balance) => SummaryCards {
                income: balance.income.clone(),
                outcome: balance.outcome.clone(),
                total: balance.total.clone(),
            },
            None => SummaryCards::default(),
        }
    }

    /// One table row per loaded transaction.
    pub fn rows(&self) -> Vec<TableRow> {
        self.transactions().iter().map(TableRow::from).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryCards {
    pub income: String,
    pub outcome: String,
    pub total: String,
}

/// A transaction as the listing table shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub title: String,
    pub kind: TransactionKind,
    /// Formatted amount, prefixed with `"- "` for outcomes.
    pub value: String,
    pub category: String,
    pub date: String,
}

impl From<&TransactionView> for TableRow {
    fn from(view: &TransactionView) -> Self {
        let value = match view.kind {
            TransactionKind::Income => view.formatted_value.clone(),
            TransactionKind::Outcome => format!("- {}", view.formatted_value),
        };
        Self {
            id: view.id.clone(),
            title: view.title.clone(),
            kind: view.kind,
            value,
            category: view.category.clone(),
            date: view.formatted_date.clone(),
        }
    }
}

type SenderSlot = Arc<Mutex<Option<watch::Sender<DashboardState>>>>;

fn lock(slot: &SenderSlot) -> MutexGuard<'_, Option<watch::Sender<DashboardState>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mounted dashboard: its state plus the one fetch that may fill it.
#[derive(Debug)]
pub struct Dashboard {
    state: watch::Receiver<DashboardState>,
    sender: SenderSlot,
    task: JoinHandle<()>,
}

impl Dashboard {
    /// Mount a dashboard and start fetching in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount<T>(client: TransactionsClient, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        let (tx, rx) = watch::channel(DashboardState::Empty);
        let sender: SenderSlot = Arc::new(Mutex::new(Some(tx)));

        let slot = sender.clone();
        let task = tokio::spawn(async move {
            let state = match client.fetch_transactions(&transport).await {
                Ok(response) => match DashboardState::from_response(&response) {
                    Ok(state) => Some(state),
                    Err(err) => {
                        tracing::warn!(error = %err, "ignoring transactions with unusable balance");
                        None
                    }
                },
                // No error state: the dashboard stays empty.
                Err(err) => {
                    tracing::debug!(error = %err, "ignoring failed transactions fetch");
                    None
                }
            };

            // Taking the sender closes the channel once we are done with it.
            match (lock(&slot).take(), state) {
                (Some(tx), Some(state)) => {
                    let _ = tx.send(state);
                }
                (Some(_), None) => {}
                (None, _) => tracing::debug!("dashboard went away before transactions arrived"),
            }
        });

        Self {
            state: rx,
            sender,
            task,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified when the state changes.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.clone()
    }

    /// Wait until the fetch has finished, successfully or not.
    pub async fn settled(&mut self) -> DashboardState {
        // `changed` errors once the fetch task has dropped its sender.
        while self.state.changed().await.is_ok() {}
        self.state()
    }

    /// Tear the dashboard down, abandoning an in-flight fetch.
    pub fn unmount(self) {
        drop(self);
    }

    fn teardown(&mut self) {
        lock(&self.sender).take();
        self.task.abort();
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::Notify;

    use super::*;
    use crate::error::ApiError;
    use crate::http::{HttpRequest, HttpResponse};
    use crate::types::{BalanceWire, CategoryWire, TransactionWire};

    #[derive(Clone)]
    struct StubTransport {
        status: u16,
        body: String,
        unreachable: bool,
    }

    impl StubTransport {
        fn ok(body: impl Into<String>) -> Self {
            Self {
                status: 200,
                body: body.into(),
                unreachable: false,
            }
        }

        fn status(status: u16) -> Self {
            Self {
                status,
                body: String::new(),
                unreachable: false,
            }
        }

        fn unreachable() -> Self {
            Self {
                status: 0,
                body: String::new(),
                unreachable: true,
            }
        }
    }

    impl Transport for StubTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            if self.unreachable {
                return Err(ApiError::TransportError("connection refused".to_string()));
            }
            Ok(HttpResponse::new(self.status, self.body.clone()))
        }
    }

    struct GatedTransport {
        started: Arc<Notify>,
        release: Arc<Notify>,
        body: String,
    }

    impl Transport for GatedTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(HttpResponse::new(200, self.body.clone()))
        }
    }

    /// Holds its worker thread mid-poll, so the response is decoded and
    /// mapped while the caller is free to run on another worker.
    struct BlockingTransport {
        started: Arc<Notify>,
        hold: Duration,
        body: String,
    }

    impl Transport for BlockingTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.started.notify_one();
            std::thread::sleep(self.hold);
            Ok(HttpResponse::new(200, self.body.clone()))
        }
    }

    fn client() -> TransactionsClient {
        TransactionsClient::new("http://localhost:3333")
    }

    fn transaction(id: &str, kind: TransactionKind, value: &str) -> TransactionWire {
        TransactionWire {
            id: id.to_string(),
            title: format!("transaction {id}"),
            kind,
            value: value.to_string(),
            created_at: "2020-05-24T00:00:00.000Z".to_string(),
            category: CategoryWire {
                title: "Others".to_string(),
            },
        }
    }

    fn body(transactions: Vec<TransactionWire>, balance: BalanceWire) -> String {
        serde_json::to_string(&TransactionsResponse {
            transactions,
            balance,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn starts_empty_with_blank_cells() {
        let dashboard = Dashboard::mount(client(), StubTransport::status(500));
        let state = dashboard.state();
        assert_eq!(state.summary(), SummaryCards::default());
        assert!(state.rows().is_empty());
    }

    #[tokio::test]
    async fn loads_transactions_in_api_order() {
        let transport = StubTransport::ok(body(
            vec![
                transaction("b", TransactionKind::Income, "200"),
                transaction("a", TransactionKind::Outcome, "50.5"),
            ],
            BalanceWire {
                income: 200.0,
                outcome: 50.5,
                total: 149.5,
            },
        ));
        let mut dashboard = Dashboard::mount(client(), transport);

        let state = dashboard.settled().await;
        assert!(state.is_loaded());

        let rows = state.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "b");
        assert_eq!(rows[0].value, "R$\u{a0}200,00");
        assert_eq!(rows[1].id, "a");
        assert_eq!(rows[1].value, "- R$\u{a0}50,50");
        assert_eq!(rows[1].date, "24/05/2020");
        assert_eq!(rows[1].category, "Others");

        let summary = state.summary();
        assert_eq!(summary.income, "R$\u{a0}200,00");
        assert_eq!(summary.outcome, "R$\u{a0}50,50");
        assert_eq!(summary.total, "R$\u{a0}149,50");
    }

    #[tokio::test]
    async fn zero_transactions_render_zero_balances() {
        let transport = StubTransport::ok(body(
            Vec::new(),
            BalanceWire {
                income: 0.0,
                outcome: 0.0,
                total: 0.0,
            },
        ));
        let mut dashboard = Dashboard::mount(client(), transport);

        let state = dashboard.settled().await;
        assert!(state.rows().is_empty());
        let summary = state.summary();
        assert_eq!(summary.income, "R$\u{a0}0,00");
        assert_eq!(summary.outcome, "R$\u{a0}0,00");
        assert_eq!(summary.total, "R$\u{a0}0,00");
    }

    #[tokio::test]
    async fn http_failure_leaves_state_empty() {
        let mut dashboard = Dashboard::mount(client(), StubTransport::status(503));
        assert_eq!(dashboard.settled().await, DashboardState::Empty);
    }

    #[tokio::test]
    async fn transport_failure_leaves_state_empty() {
        let mut dashboard = Dashboard::mount(client(), StubTransport::unreachable());
        let state = dashboard.settled().await;
        assert_eq!(state, DashboardState::Empty);
        assert!(state.balance().is_none());
    }

    #[tokio::test]
    async fn undecodable_body_leaves_state_empty() {
        let mut dashboard = Dashboard::mount(client(), StubTransport::ok("<html>"));
        assert_eq!(dashboard.settled().await, DashboardState::Empty);
    }

    #[tokio::test]
    async fn malformed_rows_are_dropped() {
        let transport = StubTransport::ok(body(
            vec![
                transaction("good-1", TransactionKind::Income, "10"),
                transaction("bad", TransactionKind::Income, "ten"),
                transaction("good-2", TransactionKind::Outcome, "5"),
            ],
            BalanceWire {
                income: 10.0,
                outcome: 5.0,
                total: 5.0,
            },
        ));
        let mut dashboard = Dashboard::mount(client(), transport);

        let state = dashboard.settled().await;
        let ids: Vec<String> = state.rows().into_iter().map(|row| row.id).collect();
        assert_eq!(ids, vec!["good-1".to_string(), "good-2".to_string()]);
        assert_eq!(state.summary().total, "R$\u{a0}5,00");
    }

    #[tokio::test]
    async fn settled_twice_returns_same_state() {
        let transport = StubTransport::ok(body(
            Vec::new(),
            BalanceWire {
                income: 1.0,
                outcome: 0.0,
                total: 1.0,
            },
        ));
        let mut dashboard = Dashboard::mount(client(), transport);
        let first = dashboard.settled().await;
        let second = dashboard.settled().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unmount_discards_late_response() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let transport = GatedTransport {
            started: started.clone(),
            release: release.clone(),
            body: body(
                vec![transaction("late", TransactionKind::Income, "1")],
                BalanceWire {
                    income: 1.0,
                    outcome: 0.0,
                    total: 1.0,
                },
            ),
        };

        let dashboard = Dashboard::mount(client(), transport);
        let mut observer = dashboard.subscribe();

        started.notified().await;
        dashboard.unmount();
        release.notify_one();

        assert!(observer.changed().await.is_err());
        assert_eq!(*observer.borrow(), DashboardState::Empty);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn unmount_wins_over_a_response_being_processed() {
        let started = Arc::new(Notify::new());
        let hold = Duration::from_millis(300);
        let transport = BlockingTransport {
            started: started.clone(),
            hold,
            body: body(
                vec![transaction("late", TransactionKind::Income, "1")],
                BalanceWire {
                    income: 1.0,
                    outcome: 0.0,
                    total: 1.0,
                },
            ),
        };

        let dashboard = Dashboard::mount(client(), transport);
        let mut observer = dashboard.subscribe();

        started.notified().await;
        dashboard.unmount();

        assert!(observer.changed().await.is_err());
        // Let the fetch task run to completion on its worker.
        tokio::time::sleep(hold * 2).await;
        assert!(!observer.has_changed().unwrap_or(false));
        assert_eq!(*observer.borrow(), DashboardState::Empty);
    }

    #[tokio::test]
    async fn unformattable_balance_leaves_state_empty() {
        let transport = StubTransport::ok(body(
            vec![transaction("a", TransactionKind::Income, "10")],
            BalanceWire {
                income: 1e20,
                outcome: 0.0,
                total: 1e20,
            },
        ));
        let mut dashboard = Dashboard::mount(client(), transport);
        assert_eq!(dashboard.settled().await, DashboardState::Empty);
    }
}
