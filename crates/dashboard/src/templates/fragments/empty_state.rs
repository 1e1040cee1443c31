use maud::{html, Markup};

/// Shown in a region whose selection has nothing to display.
pub fn empty_state() -> Markup {
    html! {
        div class="has-text-centered has-text-grey py-4 empty-state" {
            p { "Nenhum dado disponível." }
        }
    }
}
