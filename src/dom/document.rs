use std::collections::HashMap;

pub trait Document {
    /// Replaces the markup of `element_id`. Returns `false` when no such element exists.
    fn set_inner_html(&mut self, element_id: &str, html: String) -> bool;
}

#[derive(Debug, Default)]
struct Element {
    html: String,
    writes: usize,
}

#[derive(Debug, Default)]
pub struct HtmlDocument {
    elements: HashMap<String, Element>,
}

impl HtmlDocument {
    pub fn new() -> Self {
        HtmlDocument::default()
    }

    pub fn with_element(mut self, element_id: &str) -> Self {
        self.elements.insert(element_id.to_owned(), Element::default());
        self
    }

    pub fn inner_html(&self, element_id: &str) -> Option<&str> {
        self.elements.get(element_id).map(|element| element.html.as_str())
    }

    pub fn write_count(&self, element_id: &str) -> usize {
        self.elements.get(element_id).map_or(0, |element| element.writes)
    }
}

impl Document for HtmlDocument {
    fn set_inner_html(&mut self, element_id: &str, html: String) -> bool {
        match self.elements.get_mut(element_id) {
            Some(element) => {
                element.html = html;
                element.writes += 1;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod html_document_test {
    use super::*;

    #[test]
    fn test_set_inner_html_replaces_content() {
        let mut document = HtmlDocument::new().with_element("weather-content");

        assert!(document.set_inner_html("weather-content", String::from("<p>a</p>")));
        assert!(document.set_inner_html("weather-content", String::from("<p>b</p>")));

        assert_eq!(document.inner_html("weather-content"), Some("<p>b</p>"));
        assert_eq!(document.write_count("weather-content"), 2);
    }

    #[test]
    fn test_set_inner_html_on_missing_element() {
        let mut document = HtmlDocument::new();

        assert!(!document.set_inner_html("weather-content", String::from("<p>a</p>")));
        assert!(document.inner_html("weather-content").is_none());
    }
}
