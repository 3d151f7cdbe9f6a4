//! The listing page: three summary cards and the transactions table.

use axum::extract::State;
use gofinances_core::{Dashboard, DashboardState, Transport};
use maud::{html, Markup};

use crate::header::{HeaderSize, Page};
use crate::routes::AppState;

/// Mount a dashboard for this request and render it once the fetch settles.
///
/// A failed fetch still renders the page, with blank cards and no rows.
pub async fn dashboard_page<T>(State(state): State<AppState<T>>) -> Markup
where
    T: Transport + Clone + 'static,
{
    let mut dashboard = Dashboard::mount(state.client.clone(), state.transport.clone());
    let loaded = dashboard.settled().await;
    dashboard.unmount();

    super::base(
        "Listagem",
        Some(Page::Dashboard),
        HeaderSize::Large,
        dashboard_content(&loaded),
    )
}

pub fn dashboard_content(state: &DashboardState) -> Markup {
    let summary = state.summary();

    html! {
        section class="cards" {
            (card("Entradas", "balance-income", &summary.income, false))
            (card("Saídas", "balance-outcome", &summary.outcome, false))
            (card("Total", "balance-total", &summary.total, true))
        }

        section class="table" {
            table {
                thead {
                    tr {
                        th { "Título" }
                        th { "Preço" }
                        th { "Categoria" }
                        th { "Data" }
                    }
                }
                tbody {
                    @for row in state.rows() {
                        tr id=(row.id) {
                            td class="title" { (row.title) }
                            td class=(row.kind.as_str()) { (row.value) }
                            td { (row.category) }
                            td { (row.date) }
                        }
                    }
                }
            }
        }
    }
}

fn card(label: &str, test_id: &str, amount: &str, total: bool) -> Markup {
    let class = if total { "card total" } else { "card" };
    html! {
        div class=(class) {
            header {
                p { (label) }
            }
            h1 data-testid=(test_id) { (amount) }
        }
    }
}
