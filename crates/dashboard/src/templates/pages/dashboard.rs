use clima_core::City;
use maud::{html, Markup};

use crate::{
    templates::{
        components::{city_select, variable_radios, CHART_ID, CITY_VIEWS_ID},
        layouts::{base, PageConfig},
    },
    ChartVariable,
};

/// The single dashboard page. Both regions start empty and are filled by
/// htmx fragments when a selection is made.
pub fn dashboard_page() -> Markup {
    let config = PageConfig { title: "Clima" };
    base(&config, dashboard_content())
}

fn dashboard_content() -> Markup {
    html! {
        div class="dashboard-header" {
            h4 class="title is-4" { "Clima" }
        }

        div class="box" {
            (city_select::<City>())
            div id=(CITY_VIEWS_ID) {}
        }

        div class="box" {
            (variable_radios::<ChartVariable>())
            div id=(CHART_ID) class="chart-region" {}
        }
    }
}
