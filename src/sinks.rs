// sinks.rs
use serde::Serialize;

/// Per-listing presentation cards, keyed by listing identifier.
pub trait CardSink {
    fn card_ids(&self) -> Vec<String>;
    fn set_visible(&mut self, id: &str, visible: bool);
}

/// The "N Properties Found" heading.
pub trait CountSink {
    fn set_text(&mut self, text: &str);
}

pub fn result_count_text(count: usize) -> String {
    if count == 1 {
        format!("{count} Property Found")
    } else {
        format!("{count} Properties Found")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardDisplay {
    Flex,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: String,
    pub display: CardDisplay,
}

/// In-memory card list. Cards start visible, as the page renders them.
#[derive(Debug, Default)]
pub struct CardBoard {
    cards: Vec<Card>,
}

impl CardBoard {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cards = ids
            .into_iter()
            .map(|id| Card {
                id: id.into(),
                display: CardDisplay::Flex,
            })
            .collect();

        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
impl CardBoard {
    pub fn visible_ids(&self) -> Vec<&str> {
        self.cards
            .iter()
            .filter(|card| card.display == CardDisplay::Flex)
            .map(|card| card.id.as_str())
            .collect()
    }
}

impl CardSink for CardBoard {
    fn card_ids(&self) -> Vec<String> {
        self.cards.iter().map(|card| card.id.clone()).collect()
    }

    // Several cards may share an identifier; all of them follow the listing.
    fn set_visible(&mut self, id: &str, visible: bool) {
        let display = if visible { CardDisplay::Flex } else { CardDisplay::None };
        for card in self.cards.iter_mut().filter(|card| card.id == id) {
            card.display = display;
        }
    }
}

#[derive(Debug, Default)]
pub struct ResultHeading {
    text: String,
}

impl ResultHeading {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl CountSink for ResultHeading {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}
