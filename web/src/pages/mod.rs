//! Full-page templates.

mod dashboard;
mod import;

pub use dashboard::{dashboard_content, dashboard_page};
pub use import::import_page;

use axum::http::StatusCode;
use maud::{html, Markup, DOCTYPE};

use crate::header::{header, HeaderSize, Page};

/// The page shell shared by every route.
fn base(title: &str, page: Option<Page>, size: HeaderSize, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | GoFinances" }
            }
            body {
                (header(page, size))
                main class="container" {
                    (content)
                }
            }
        }
    }
}

pub async fn not_found_page() -> (StatusCode, Markup) {
    let content = html! {
        h1 { "Página não encontrada" }
        a href=(crate::routes::DASHBOARD) { "Voltar para a listagem" }
    };
    (
        StatusCode::NOT_FOUND,
        base("Not found", None, HeaderSize::Small, content),
    )
}
