use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use uuid::Uuid;

/// Site sections, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
pub enum Page {
    Home,
    Solutions,
    Products,
    About,
    Contact,
}

impl Page {
    /// Dictionary key for the nav label of this page.
    pub fn title_key(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Solutions => "solutions",
            Page::Products => "products",
            Page::About => "about",
            Page::Contact => "contact",
        }
    }

    pub fn next(&self) -> Page {
        match self {
            Page::Home => Page::Solutions,
            Page::Solutions => Page::Products,
            Page::Products => Page::About,
            Page::About => Page::Contact,
            Page::Contact => Page::Home,
        }
    }

    pub fn previous(&self) -> Page {
        match self {
            Page::Home => Page::Contact,
            Page::Solutions => Page::Home,
            Page::Products => Page::Solutions,
            Page::About => Page::Products,
            Page::Contact => Page::About,
        }
    }
}

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// Role string used in the upstream request body.
    pub fn role(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

/// One message in the conversation transcript. `text` grows while the
/// message is in flight and is frozen once its stream ends.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    /// Empty assistant message created before streaming begins.
    pub fn placeholder() -> Self {
        Self::new(Sender::Assistant, String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn page_navigation_wraps_in_both_directions() {
        for page in Page::iter() {
            assert_eq!(page.next().previous(), page);
            assert_eq!(page.previous().next(), page);
        }
        assert_eq!(Page::Contact.next(), Page::Home);
        assert_eq!(Page::Home.previous(), Page::Contact);
    }

    #[test]
    fn placeholder_is_an_empty_assistant_message() {
        let placeholder = Message::placeholder();
        assert_eq!(placeholder.sender, Sender::Assistant);
        assert!(placeholder.text.is_empty());
    }
}
