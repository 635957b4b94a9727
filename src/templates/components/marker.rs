use maud::{html, Markup};

/// The element shown on the map for each visible listing.
pub fn marker_element() -> Markup {
    html! {
        div class="custom-marker" {
            i class="fa fa-home" {}
        }
    }
}
