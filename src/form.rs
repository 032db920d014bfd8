//! Multi-step quote request form: per-step validation of required fields
//! and the step/indicator bookkeeping.

use std::sync::OnceLock;

use regex::Regex;

pub const ERROR_CLASS: &str = "field-error";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Other,
}

impl FieldKind {
    /// Maps an input's `type` attribute.
    pub fn from_input_type(kind: &str) -> FieldKind {
        match kind {
            "email" => FieldKind::Email,
            "text" | "" => FieldKind::Text,
            _ => FieldKind::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
}

impl FormField {
    pub fn new(name: &str, kind: FieldKind, required: bool, value: &str) -> Self {
        FormField {
            name: name.to_owned(),
            kind,
            required,
            value: value.to_owned(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldErrorKind {
    Missing,
    InvalidEmail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Position of the field in the slice passed to `validate_fields`.
    pub index: usize,
    pub name: String,
    pub reason: FieldErrorKind,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Checks the required fields of one step. Optional fields are never
/// reported. An email field with only whitespace is both missing and
/// malformed.
pub fn validate_fields(fields: &[FormField]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for (index, field) in fields.iter().enumerate().filter(|(_, f)| f.required) {
        if field.value.trim().is_empty() {
            errors.push(FieldError {
                index,
                name: field.name.clone(),
                reason: FieldErrorKind::Missing,
            });
        }
        if field.kind == FieldKind::Email && !field.value.is_empty() && !is_valid_email(&field.value) {
            errors.push(FieldError {
                index,
                name: field.name.clone(),
                reason: FieldErrorKind::InvalidEmail,
            });
        }
    }
    errors
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Indicator {
    Active,
    Completed,
    Upcoming,
}

impl Indicator {
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Indicator::Active => Some("active"),
            Indicator::Completed => Some("completed"),
            Indicator::Upcoming => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepFlow {
    current: u32,
    steps: u32,
}

impl StepFlow {
    pub fn new(steps: u32) -> Self {
        StepFlow {
            current: 1,
            steps: steps.max(1),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn go_to(&mut self, step: u32) {
        self.current = step.max(1).min(self.steps);
    }

    /// Moves forward only when the current step validated.
    pub fn advance(&mut self, target: u32, current_valid: bool) -> bool {
        if current_valid {
            self.go_to(target);
        }
        current_valid
    }

    pub fn back(&mut self, target: u32) {
        self.go_to(target);
    }

    pub fn indicator(&self, step: u32) -> Indicator {
        if step == self.current {
            Indicator::Active
        } else if step < self.current {
            Indicator::Completed
        } else {
            Indicator::Upcoming
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_matches_page_rules() {
        assert!(is_valid_email("jean@exemple.fr"));
        assert!(is_valid_email("a.b+c@sous.domaine.com"));
        assert!(!is_valid_email("jean@exemple"));
        assert!(!is_valid_email("jean exemple@site.fr"));
        assert!(!is_valid_email("@site.fr"));
        assert!(!is_valid_email("jean@@site.fr"));
    }

    #[test]
    fn blank_required_fields_are_missing() {
        let fields = vec![
            FormField::new("nom", FieldKind::Text, true, "   "),
            FormField::new("societe", FieldKind::Text, false, ""),
            FormField::new("service", FieldKind::Other, true, "site-vitrine"),
        ];
        assert_eq!(
            validate_fields(&fields),
            vec![FieldError {
                index: 0,
                name: "nom".to_owned(),
                reason: FieldErrorKind::Missing
            }]
        );
    }

    #[test]
    fn malformed_required_email_is_reported() {
        let fields = vec![FormField::new("email", FieldKind::Email, true, "jean@exemple")];
        let errors = validate_fields(&fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].reason, FieldErrorKind::InvalidEmail);
    }

    #[test]
    fn whitespace_email_is_missing_and_invalid() {
        let fields = vec![FormField::new("email", FieldKind::Email, true, " ")];
        let reasons: Vec<_> = validate_fields(&fields).into_iter().map(|e| e.reason).collect();
        assert_eq!(reasons, vec![FieldErrorKind::Missing, FieldErrorKind::InvalidEmail]);
    }

    #[test]
    fn optional_email_is_not_checked() {
        let fields = vec![FormField::new("email2", FieldKind::Email, false, "nope")];
        assert!(validate_fields(&fields).is_empty());
    }

    #[test]
    fn input_types_map_to_kinds() {
        assert_eq!(FieldKind::from_input_type("email"), FieldKind::Email);
        assert_eq!(FieldKind::from_input_type("text"), FieldKind::Text);
        assert_eq!(FieldKind::from_input_type("tel"), FieldKind::Other);
    }

    #[test]
    fn advance_requires_valid_step() {
        let mut flow = StepFlow::new(3);
        assert!(!flow.advance(2, false));
        assert_eq!(flow.current(), 1);
        assert!(flow.advance(2, true));
        assert_eq!(flow.current(), 2);
        flow.back(1);
        assert_eq!(flow.current(), 1);
    }

    #[test]
    fn go_to_clamps_to_known_steps() {
        let mut flow = StepFlow::new(3);
        flow.go_to(9);
        assert_eq!(flow.current(), 3);
        flow.go_to(0);
        assert_eq!(flow.current(), 1);
    }

    #[test]
    fn indicators_follow_current_step() {
        let mut flow = StepFlow::new(3);
        flow.go_to(2);
        assert_eq!(flow.indicator(1), Indicator::Completed);
        assert_eq!(flow.indicator(2), Indicator::Active);
        assert_eq!(flow.indicator(3), Indicator::Upcoming);
        assert_eq!(Indicator::Upcoming.class(), None);
    }
}
