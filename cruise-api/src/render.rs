//! HTML rendering of [`ListingView`].

use cruise_core::pagination::PageLink;
use cruise_core::view::{CruiseCard, ResultsView, SortMenu};
use cruise_core::{ListingView, SortOrder};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

const PAGE_TITLE: &str = "Cruise Search Results";

pub fn render_page(view: &ListingView) -> String {
    let body = match view {
        ListingView::Error { title, error } => format!(
            r#"<div class="error" role="alert"><div class="error-title">{}</div><div class="error-message">{}</div></div>"#,
            text(title),
            text(&error.message)
        ),
        ListingView::Loading { message } => format!(
            r#"<div class="loading" aria-busy="true"><span class="spinner"></span><span>{}</span></div>"#,
            text(message)
        ),
        ListingView::Ready(results) => render_results(results),
    };

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8"><title>{title}</title></head>"#,
            r#"<body><div class="container">{body}</div></body></html>"#,
            "\n"
        ),
        title = PAGE_TITLE,
        body = body
    )
}

fn render_results(results: &ResultsView) -> String {
    let sort = results.sort.active;
    let mut out = String::new();

    out.push_str(&format!(r#"<header><h1>{}</h1>"#, PAGE_TITLE));
    if let Some(summary) = &results.header.summary {
        out.push_str(&format!(r#"<p class="summary">{}</p>"#, text(summary)));
    }
    out.push_str(&render_sort_menu(&results.sort, results.header.current_page));
    out.push_str("</header><main>");

    match results.empty_message {
        Some(message) => out.push_str(&format!(r#"<div class="empty">{}</div>"#, text(message))),
        None => {
            out.push_str(r#"<div class="results">"#);
            for card in &results.cards {
                out.push_str(&render_card(card));
            }
            out.push_str("</div>");
        }
    }
    out.push_str("</main>");

    if let Some(controls) = &results.pagination {
        out.push_str(r#"<nav class="pagination" aria-label="Pagination">"#);
        out.push_str(&nav_button("Previous", controls.previous, sort));

        for link in &controls.links {
            match link {
                PageLink::Page(page) if *page == controls.current_page => {
                    out.push_str(&format!(r#"<span class="page current" aria-current="page">{}</span>"#, page));
                }
                PageLink::Page(page) => {
                    out.push_str(&format!(r#"<a class="page" href="{}">{}</a>"#, attr(&href(*page, sort)), page));
                }
                PageLink::Ellipsis => out.push_str(r#"<span class="page ellipsis">...</span>"#),
            }
        }

        out.push_str(&nav_button("Next", controls.next, sort));
        out.push_str("</nav>");
    }

    out
}

fn render_sort_menu(menu: &SortMenu, current_page: usize) -> String {
    let mut out = format!(
        r#"<div class="sort"><span>Sort by:</span><span class="sort-label">{}</span><ul class="sort-options">"#,
        text(&menu.label)
    );

    for entry in &menu.options {
        if entry.active {
            out.push_str(&format!(
                r#"<li class="active"><a href="{}">{}</a> <span class="check">&#10003;</span></li>"#,
                attr(&href(current_page, entry.order)),
                text(entry.label)
            ));
        } else {
            // A new order starts from the first page
            out.push_str(&format!(r#"<li><a href="{}">{}</a></li>"#, attr(&href(1, entry.order)), text(entry.label)));
        }
    }

    out.push_str("</ul></div>");
    out
}

fn render_card(card: &CruiseCard) -> String {
    let mut out = String::from(r#"<article class="cruise-card">"#);

    out.push_str(r#"<div class="ship-image">"#);
    match &card.ship_image {
        Some(src) => out.push_str(&format!(r#"<img src="{}" alt="{}">"#, attr(src), attr(&card.ship_name))),
        None => out.push_str(r#"<span class="no-image">No image available</span>"#),
    }
    if !card.date_range.is_empty() {
        out.push_str(&format!(r#"<span class="date-range">{}</span>"#, text(&card.date_range)));
    }
    out.push_str("</div>");

    out.push_str(&format!(
        concat!(
            r#"<div class="details"><h2>{}</h2>"#,
            r#"<div class="meta"><span class="region">{}</span><span class="duration">{}</span>"#,
            r#"<span class="rating">{}</span><span class="reviews">{} reviews</span></div>"#
        ),
        text(&card.name),
        text(&card.region),
        text(&card.duration_text),
        text(&card.rating_text),
        card.reviews
    ));

    out.push_str(r#"<ol class="itinerary">"#);
    for stop in &card.itinerary.inline {
        out.push_str(&format!("<li>{}</li>", text(stop)));
    }
    if let Some(more) = card.itinerary.more_label() {
        out.push_str(&format!(
            r#"<li class="more" title="{}">{}</li>"#,
            attr(&card.itinerary.all.join(" → ")),
            text(&more)
        ));
    }
    out.push_str("</ol>");

    out.push_str(r#"<div class="line">"#);
    match &card.line_logo {
        Some(logo) => out.push_str(&format!(r#"<img class="logo" src="{}" alt="{}">"#, attr(logo), attr(&card.line_name))),
        None => out.push_str(&format!(r#"<span class="line-name">{}</span>"#, text(&card.line_name))),
    }
    out.push_str(&format!(r#"<span class="ship-name">{}</span></div></div>"#, text(&card.ship_name)));

    out.push_str(&format!(
        r#"<div class="price"><span>Interior from</span><strong>{}</strong></div></article>"#,
        text(&card.price_text)
    ));

    out
}

fn nav_button(label: &str, target: Option<usize>, sort: SortOrder) -> String {
    match target {
        Some(page) => format!(r#"<a class="nav" href="{}">{}</a>"#, attr(&href(page, sort)), label),
        None => format!(r#"<span class="nav disabled" aria-disabled="true">{}</span>"#, label),
    }
}

fn href(page: usize, sort: SortOrder) -> String {
    format!("?page={}&sort={}&dir={}", page, sort.field.as_str(), sort.direction.as_str())
}
