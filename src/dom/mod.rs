pub use self::document::{Document, HtmlDocument};
pub use self::events::{Subscription, WeekField};
pub use self::select::{SelectBox, SelectField, SelectOption};

pub mod document;
pub mod events;
pub mod select;
