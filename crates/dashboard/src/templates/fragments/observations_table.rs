use maud::{html, Markup};
use serde_json::json;

use crate::render::TableView;

pub const TABLE_ID: &str = "observations-table";

/// Table region with pagination. Paging swaps only this container.
pub fn observations_table(view: &TableView) -> Markup {
    html! {
        div id=(TABLE_ID) class="observations-table mb-5" {
            div class="table-scroll" {
                table class="table is-fullwidth is-narrow" {
                    thead {
                        tr {
                            @for column in &view.columns {
                                th { (column) }
                            }
                        }
                    }
                    tbody {
                        @for (i, row) in view.rows.iter().enumerate() {
                            tr class=[(i % 2 == 1).then_some("is-odd")] {
                                td { (row.date) }
                                @for cell in &row.cells {
                                    td {
                                        @match cell {
                                            Some(value) => { (value) }
                                            None => { span class="absent" { "-" } }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            (pagination(view))
        }
    }
}

fn page_vals(view: &TableView, page: usize) -> String {
    json!({ "city": view.city.label(), "page": page }).to_string()
}

fn pagination(view: &TableView) -> Markup {
    html! {
        nav class="pagination is-small is-centered" role="navigation" aria-label="pagination" {
            @if view.has_previous() {
                a class="pagination-previous"
                    hx-get="/fragments/table"
                    hx-vals=(page_vals(view, view.page - 1))
                    hx-target={ "#" (TABLE_ID) }
                    hx-swap="outerHTML" { "Anterior" }
            } @else {
                a class="pagination-previous is-disabled" disabled { "Anterior" }
            }
            @if view.has_next() {
                a class="pagination-next"
                    hx-get="/fragments/table"
                    hx-vals=(page_vals(view, view.page + 1))
                    hx-target={ "#" (TABLE_ID) }
                    hx-swap="outerHTML" { "Próxima" }
            } @else {
                a class="pagination-next is-disabled" disabled { "Próxima" }
            }
            p class="pagination-list is-size-7 has-text-grey" {
                (format!("Página {} de {} ({} dias)", view.page, view.page_count, view.total_rows))
            }
        }
    }
}
