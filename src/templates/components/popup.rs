use crate::domain::Listing;
use maud::{html, Markup, PreEscaped};

/// Detail popup attached to every marker.
pub fn listing_popup(listing: &Listing) -> Markup {
    let [baths, beds, area, _] = &listing.features;

    html! {
        div class="popup-content" {
            h3 { (listing.name) }
            img src=(listing.image) alt=(listing.name) class="popup-image";
            p class="popup-address" { (listing.address) }
            p class="popup-price" { "Price: " (display_price(listing.price)) }
            hr;
            p class="popup-features-label" { "Features:" }
            p class="popup-features" {
                i class="fas fa-bath property-icon" {} (baths) (PreEscaped(" &nbsp;"))
                i class="fas fa-bed property-icon" {} (beds) (PreEscaped(" &nbsp;"))
                i class="fas fa-expand property-icon" {} (area)
            }
        }
    }
}

fn display_price(price: Option<f64>) -> String {
    match price {
        Some(price) => price.to_string(),
        None => "N/A".to_string(),
    }
}
