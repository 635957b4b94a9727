// .location
//  ├── data-id
//  ├── data-name
//  ├── data-address
//  ├── data-price      "₹5,00,000"
//  ├── data-prop1..4   free-form features
//  ├── data-img
//  ├── data-lat        "28.6139"
//  ├── data-lng        "77.209"
//  ├── data-cat
//  └── data-loc

/// A listing exactly as the page markup carries it: every attribute is a
/// string and nothing has been validated yet. Missing attributes are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub id: String,
    pub name: String,
    pub address: String,
    pub price: String,
    pub prop1: String,
    pub prop2: String,
    pub prop3: String,
    pub prop4: String,
    pub img: String,
    pub lat: String,
    pub lng: String,
    pub cat: String,
    pub loc: String,
}
