use maud::{html, Markup};

use crate::Choice;

pub const CITY_VIEWS_ID: &str = "city-views";
pub const CHART_ID: &str = "chart";

/// Dropdown of every known city, starting on an empty placeholder.
pub fn city_select<C: Choice>() -> Markup {
    html! {
        div class="field" {
            label class="label" for="city" { "Cidade" }
            div class="control" {
                div class="select" {
                    select id="city" name=(C::FIELD)
                        hx-get="/fragments/city"
                        hx-trigger="change"
                        hx-target={ "#" (CITY_VIEWS_ID) } {
                        option value="" selected { "Selecione uma cidade" }
                        @for choice in C::all() {
                            option value=(choice.value()) { (choice.label()) }
                        }
                    }
                }
            }
        }
    }
}

/// Radio group with no option checked.
pub fn variable_radios<C: Choice>() -> Markup {
    html! {
        div class="field" {
            label class="label" { "Variável escolhida" }
            div class="control radios" {
                @for choice in C::all() {
                    label class="radio mr-4" {
                        input type="radio" name=(C::FIELD) value=(choice.value())
                            hx-get="/fragments/chart"
                            hx-trigger="change"
                            hx-target={ "#" (CHART_ID) };
                        " " (choice.label())
                    }
                }
            }
        }
    }
}
