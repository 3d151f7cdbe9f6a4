//! The page header: brand plus the navigation links.

use maud::{html, Markup};

use crate::routes;

/// The page a header is rendered for; its link is marked `selected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Import,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderSize {
    Small,
    #[default]
    Large,
}

impl HeaderSize {
    fn class(self) -> &'static str {
        match self {
            HeaderSize::Small => "header small",
            HeaderSize::Large => "header large",
        }
    }
}

struct Link {
    url: &'static str,
    title: &'static str,
    is_current: bool,
}

impl Link {
    fn into_html(self) -> Markup {
        let class = if self.is_current { "selected" } else { "" };
        html!( a href=(self.url) class=(class) { (self.title) } )
    }
}

/// Render the header. With `page` set to `None` no link is selected.
pub fn header(page: Option<Page>, size: HeaderSize) -> Markup {
    let links = [
        Link {
            url: routes::DASHBOARD,
            title: "Listagem",
            is_current: page == Some(Page::Dashboard),
        },
        Link {
            url: routes::IMPORT,
            title: "Importar",
            is_current: page == Some(Page::Import),
        },
    ];

    html! {
        div class=(size.class()) {
            header {
                span class="logo" { "GoFinances" }
                nav {
                    @for link in links {
                        (link.into_html())
                    }
                }
            }
        }
    }
}
