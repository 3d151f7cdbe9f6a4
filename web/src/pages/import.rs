use maud::{html, Markup};

use crate::header::{HeaderSize, Page};

pub async fn import_page() -> Markup {
    let content = html! {
        h1 { "Importar uma transação" }
        p { "Envie um arquivo CSV com as transações pela API de importação." }
        a href=(crate::routes::DASHBOARD) { "Voltar para a listagem" }
    };
    super::base("Importar", Some(Page::Import), HeaderSize::Small, content)
}
