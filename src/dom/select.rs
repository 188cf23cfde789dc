use crate::app::teams::TeamOption;

pub const SENTINEL_LABEL: &str = "---------";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        SelectOption {
            value: value.to_owned(),
            label: label.to_owned(),
        }
    }

    pub fn sentinel() -> Self {
        SelectOption::new("", SENTINEL_LABEL)
    }

    pub fn is_sentinel(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<TeamOption> for SelectOption {
    fn from(team: TeamOption) -> Self {
        SelectOption {
            value: team.id,
            label: team.name,
        }
    }
}

pub trait SelectField {
    fn value(&self) -> Option<String>;

    /// Selects `value`; a value that is not among the options selects the sentinel.
    fn set_value(&mut self, value: Option<&str>);

    fn clear_options(&mut self);

    fn append_option(&mut self, option: SelectOption);

    fn set_disabled(&mut self, disabled: bool);

    fn is_disabled(&self) -> bool;

    fn options(&self) -> &[SelectOption];
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectBox {
    options: Vec<SelectOption>,
    selected: Option<String>,
    disabled: bool,
}

impl SelectBox {
    pub fn new() -> Self {
        SelectBox {
            options: vec![SelectOption::sentinel()],
            selected: None,
            disabled: false,
        }
    }

    pub fn with_options(options: Vec<SelectOption>, selected: Option<&str>) -> Self {
        let mut select = SelectBox::new();
        options.into_iter().for_each(|option| select.append_option(option));
        select.set_value(selected);
        select
    }

    pub fn option_values(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|option| !option.is_sentinel())
            .map(|option| option.value.as_str())
            .collect()
    }
}

impl Default for SelectBox {
    fn default() -> Self {
        SelectBox::new()
    }
}

impl SelectField for SelectBox {
    fn value(&self) -> Option<String> {
        self.selected.clone()
    }

    fn set_value(&mut self, value: Option<&str>) {
        self.selected = value
            .filter(|v| !v.is_empty())
            .filter(|v| self.options.iter().any(|option| option.value == *v))
            .map(|v| v.to_owned());
    }

    fn clear_options(&mut self) {
        self.options.truncate(1);
        self.selected = None;
    }

    fn append_option(&mut self, option: SelectOption) {
        if !option.is_sentinel() {
            self.options.push(option);
        }
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn options(&self) -> &[SelectOption] {
        &self.options
    }
}

#[cfg(test)]
mod select_box_test {
    use super::*;

    fn create_select() -> SelectBox {
        SelectBox::with_options(
            vec![SelectOption::new("1", "Smith & Jones"), SelectOption::new("2", "Brown & Green")],
            Some("2"),
        )
    }

    #[test]
    fn test_new_select_holds_only_sentinel() {
        let select = SelectBox::new();

        assert_eq!(select.options(), &[SelectOption::sentinel()]);
        assert!(select.value().is_none());
    }

    #[test]
    fn test_set_value_selects_existing_option() {
        let mut select = create_select();
        select.set_value(Some("1"));

        assert_eq!(select.value(), Some(String::from("1")));
    }

    #[test]
    fn test_set_value_falls_back_to_sentinel_for_missing_option() {
        let mut select = create_select();
        select.set_value(Some("42"));

        assert!(select.value().is_none());
    }

    #[test]
    fn test_clear_options_keeps_sentinel() {
        let mut select = create_select();
        select.clear_options();

        assert_eq!(select.options(), &[SelectOption::sentinel()]);
        assert!(select.value().is_none());
    }
}
