use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Outcome,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
}

/// A stored transaction, in the shape the API sends it: the value is a
/// two-decimal string and `created_at` an RFC 3339 timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub value: String,
    pub created_at: String,
    pub category: Category,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub income: f64,
    pub outcome: f64,
    pub total: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
    pub balance: Balance,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateTransaction {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub value: f64,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

struct Stored {
    transaction: Transaction,
    amount: f64,
}

#[derive(Clone, Default)]
pub struct Db {
    rows: Arc<RwLock<Vec<Stored>>>,
}

pub fn app() -> Router {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .with_state(Db::default())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn balance(rows: &[Stored]) -> Balance {
    let (income, outcome) = rows.iter().fold((0.0, 0.0), |(income, outcome), row| {
        match row.transaction.kind {
            TransactionType::Income => (income + row.amount, outcome),
            TransactionType::Outcome => (income, outcome + row.amount),
        }
    });
    Balance {
        income,
        outcome,
        total: income - outcome,
    }
}

async fn list_transactions(State(db): State<Db>) -> Json<TransactionList> {
    let rows = db.rows.read().await;
    Json(TransactionList {
        transactions: rows.iter().map(|row| row.transaction.clone()).collect(),
        balance: balance(&rows),
    })
}

async fn create_transaction(
    State(db): State<Db>,
    Json(input): Json<CreateTransaction>,
) -> Result<(StatusCode, Json<Transaction>), (StatusCode, Json<ErrorBody>)> {
    // The listed string and the balance must agree, so keep whole cents only.
    let amount = (input.value * 100.0).round() / 100.0;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(bad_request("value must be a positive amount"));
    }

    let mut rows = db.rows.write().await;
    if input.kind == TransactionType::Outcome && amount > balance(&rows).total {
        return Err(bad_request("outcome exceeds the available balance"));
    }

    let transaction = Transaction {
        id: Uuid::new_v4(),
        title: input.title,
        kind: input.kind,
        value: format!("{amount:.2}"),
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        category: Category {
            title: input.category,
        },
    };
    tracing::debug!(id = %transaction.id, kind = ?transaction.kind, "stored transaction");
    rows.push(Stored {
        transaction: transaction.clone(),
        amount,
    });
    Ok((StatusCode::CREATED, Json(transaction)))
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}
