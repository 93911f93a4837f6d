//! Form field value objects

use serde::{Deserialize, Serialize};

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Empty strings and `false` are falsy, everything else is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Flag(b) => *b,
        }
    }

    /// Get the text value (returns empty string for flags)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => "",
        }
    }

    /// Get the flag value (returns false for text)
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(_) => false,
        }
    }

    /// The zero value of the same kind
    pub fn cleared(&self) -> FieldValue {
        match self {
            FieldValue::Text(_) => FieldValue::Text(String::new()),
            FieldValue::Flag(_) => FieldValue::Flag(false),
        }
    }

    /// Whether `other` can be stored where `self` lives
    pub fn accepts(&self, other: &FieldValue) -> bool {
        matches!(
            (self, other),
            (FieldValue::Text(_), FieldValue::Text(_)) | (FieldValue::Flag(_), FieldValue::Flag(_))
        )
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Input widget a field is edited with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Choice(Vec<String>),
    Checkbox,
}

impl FieldKind {
    /// The value a field of this kind starts with and is cleared to
    pub fn zero_value(&self) -> FieldValue {
        match self {
            FieldKind::Text | FieldKind::Choice(_) => FieldValue::Text(String::new()),
            FieldKind::Checkbox => FieldValue::Flag(false),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Choice(_) => "choice",
            FieldKind::Checkbox => "checkbox",
        }
    }
}

/// Declaration of a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
}

impl FieldSpec {
    /// Create a required text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
            required: true,
            placeholder: None,
        }
    }

    /// Create a required choice field
    pub fn choice(name: &str, label: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Choice(options.iter().map(|o| o.to_string()).collect()),
            required: true,
            placeholder: None,
        }
    }

    /// Create a checkbox; optional unless marked required
    pub fn checkbox(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Checkbox,
            required: false,
            placeholder: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn zero_value(&self) -> FieldValue {
        self.kind.zero_value()
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self.kind, FieldKind::Checkbox)
    }

    /// Options of a choice field (empty for other kinds)
    pub fn options(&self) -> &[String] {
        match &self.kind {
            FieldKind::Choice(options) => options,
            _ => &[],
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self, value: &FieldValue) -> String {
        match (&self.kind, value) {
            (FieldKind::Checkbox, v) => {
                if v.as_flag() {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            (FieldKind::Choice(_), v) if v.as_text().is_empty() => "< select >".to_string(),
            (FieldKind::Choice(_), v) => format!("< {} >", v.as_text()),
            (FieldKind::Text, v) => v.as_text().to_string(),
        }
    }

    /// Cycle a choice value forwards or backwards through the options
    ///
    /// An empty value moves to the first (or last) option.
    pub fn cycle_choice(&self, current: &str, forward: bool) -> Option<String> {
        let options = self.options();
        if options.is_empty() {
            return None;
        }
        let len = options.len();
        let next = match options.iter().position(|o| o == current) {
            None if forward => 0,
            None => len - 1,
            Some(i) if forward => (i + 1) % len,
            Some(0) => len - 1,
            Some(i) => i - 1,
        };
        Some(options[next].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!FieldValue::Text(String::new()).is_truthy());
        assert!(FieldValue::Text("  ".to_string()).is_truthy());
        assert!(FieldValue::Text("Jo".to_string()).is_truthy());
        assert!(!FieldValue::Flag(false).is_truthy());
        assert!(FieldValue::Flag(true).is_truthy());
    }

    #[test]
    fn test_zero_values_per_kind() {
        assert_eq!(FieldKind::Text.zero_value(), FieldValue::Text(String::new()));
        assert_eq!(
            FieldKind::Choice(vec!["CA".to_string()]).zero_value(),
            FieldValue::Text(String::new())
        );
        assert_eq!(FieldKind::Checkbox.zero_value(), FieldValue::Flag(false));
    }

    #[test]
    fn test_required_defaults() {
        assert!(FieldSpec::text("a", "A").required);
        assert!(!FieldSpec::text("a", "A").optional().required);
        assert!(FieldSpec::choice("s", "S", &["CA"]).required);
        assert!(!FieldSpec::checkbox("c", "C").required);
        assert!(FieldSpec::checkbox("c", "C").required().required);
    }

    #[test]
    fn test_accepts_same_kind_only() {
        let text = FieldValue::from("x");
        let flag = FieldValue::from(true);
        assert!(text.accepts(&FieldValue::from("y")));
        assert!(!text.accepts(&flag));
        assert!(flag.accepts(&FieldValue::from(false)));
    }

    #[test]
    fn test_cycle_choice_wraps() {
        let field = FieldSpec::choice("state", "State", &["CA", "NY", "TX"]);
        assert_eq!(field.cycle_choice("", true).as_deref(), Some("CA"));
        assert_eq!(field.cycle_choice("", false).as_deref(), Some("TX"));
        assert_eq!(field.cycle_choice("TX", true).as_deref(), Some("CA"));
        assert_eq!(field.cycle_choice("CA", false).as_deref(), Some("TX"));
        assert_eq!(field.cycle_choice("NY", true).as_deref(), Some("TX"));
        assert!(FieldSpec::text("a", "A").cycle_choice("", true).is_none());
    }

    #[test]
    fn test_display_value() {
        let checkbox = FieldSpec::checkbox("same", "Same");
        assert_eq!(checkbox.display_value(&FieldValue::Flag(true)), "[x]");
        assert_eq!(checkbox.display_value(&FieldValue::Flag(false)), "[ ]");

        let choice = FieldSpec::choice("state", "State", &["CA"]);
        assert_eq!(choice.display_value(&FieldValue::from("")), "< select >");
        assert_eq!(choice.display_value(&FieldValue::from("CA")), "< CA >");

        let text = FieldSpec::text("city", "City");
        assert_eq!(text.display_value(&FieldValue::from("Austin")), "Austin");
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_string(&FieldValue::from("Austin")).unwrap();
        assert_eq!(json, "\"Austin\"");
        let json = serde_json::to_string(&FieldValue::from(true)).unwrap();
        assert_eq!(json, "true");
    }
}
