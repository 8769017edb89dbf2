//! Draft validation.
//!
//! [`validate`] checks a [`CustomerDraft`] against a [`RuleSet`] and returns
//! the messages keyed by field. It is pure: no I/O, no state, and the same
//! draft always produces the same errors.
//!
//! The create and edit forms grew separate phone and email rules. Both are
//! kept as named variants so either form reports exactly what it always has:
//!
//! | Field   | [`RuleSet::Create`]                   | [`RuleSet::Edit`]                        |
//! |---------|---------------------------------------|------------------------------------------|
//! | `phone` | exactly ten ASCII digits              | exactly ten characters of any kind       |
//! | `email` | no whitespace or extra `@`, one `.`   | ASCII local part, TLD of two+ letters    |
//!
//! Names and addresses are checked identically by both.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{AddressField, CustomerDraft, CustomerField, FieldErrors, FieldKey};

pub const FIRST_NAME_REQUIRED: &str = "First Name is required";
pub const LAST_NAME_REQUIRED: &str = "Last Name is required";
pub const PHONE_TEN_DIGIT_NUMBER: &str = "Phone must be a 10-digit number";
pub const PHONE_TEN_DIGITS: &str = "Phone must be 10 digits";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const STREET_REQUIRED: &str = "Street is required";
pub const CITY_REQUIRED: &str = "City is required";
pub const STATE_REQUIRED: &str = "State is required";
pub const ZIP_REQUIRED: &str = "Zip code is required";
pub const ZIP_FIVE_DIGITS: &str = "Zip code must be a 5-digit number";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid regex"));

/// Whitespace as trimmed by the browser forms: ECMAScript `WhiteSpace` plus
/// `LineTerminator`. Differs from Unicode `White_Space`: U+FEFF is in, U+0085 is out.
const JS_WHITESPACE_CLASS: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static CREATE_EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let part = format!("[^{JS_WHITESPACE_CLASS}@]+");
    Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("Invalid regex")
});

static EDIT_EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid regex")
});

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("Invalid regex"));

/// Which form's rules to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSet {
    /// Rules of the create form.
    Create,
    /// Rules of the edit form.
    Edit,
}

impl RuleSet {
    /// Phone message for this rule set, or `None` if the phone passes.
    #[must_use]
    pub fn check_phone(self, phone: &str) -> Option<&'static str> {
        match self {
            Self::Create => (!PHONE_RE.is_match(phone)).then_some(PHONE_TEN_DIGIT_NUMBER),
            // Counted in UTF-16 code units.
            Self::Edit => (phone.encode_utf16().count() != 10).then_some(PHONE_TEN_DIGITS),
        }
    }

    /// Email message for this rule set, or `None` if the email passes.
    #[must_use]
    pub fn check_email(self, email: &str) -> Option<&'static str> {
        let pattern = match self {
            Self::Create => &*CREATE_EMAIL_RE,
            Self::Edit => &*EDIT_EMAIL_RE,
        };
        (!pattern.is_match(email)).then_some(EMAIL_INVALID)
    }
}

/// Validate a draft under the given rules.
///
/// Returns an empty [`FieldErrors`] when the draft is valid.
#[must_use]
pub fn validate(draft: &CustomerDraft, rules: RuleSet) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&draft.first_name) {
        errors.insert(CustomerField::FirstName, FIRST_NAME_REQUIRED);
    }
    if is_blank(&draft.last_name) {
        errors.insert(CustomerField::LastName, LAST_NAME_REQUIRED);
    }
    if let Some(message) = rules.check_phone(&draft.phone) {
        errors.insert(CustomerField::Phone, message);
    }
    if let Some(message) = rules.check_email(&draft.email) {
        errors.insert(CustomerField::Email, message);
    }

    for (index, address) in draft.addresses.iter().enumerate() {
        let key = |field| FieldKey::Address { field, index };

        if is_blank(&address.street) {
            errors.insert(key(AddressField::Street), STREET_REQUIRED);
        }
        if is_blank(&address.city) {
            errors.insert(key(AddressField::City), CITY_REQUIRED);
        }
        if is_blank(&address.state) {
            errors.insert(key(AddressField::State), STATE_REQUIRED);
        }
        if is_blank(&address.zip) {
            errors.insert(key(AddressField::Zip), ZIP_REQUIRED);
        } else if !ZIP_RE.is_match(&address.zip) {
            errors.insert(key(AddressField::Zip), ZIP_FIVE_DIGITS);
        }
    }

    errors
}

/// Validate with the create form's rules.
#[must_use]
pub fn validate_create(draft: &CustomerDraft) -> FieldErrors {
    validate(draft, RuleSet::Create)
}

/// Validate with the edit form's rules.
#[must_use]
pub fn validate_edit(draft: &CustomerDraft) -> FieldErrors {
    validate(draft, RuleSet::Edit)
}

const fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn is_blank(value: &str) -> bool {
    value.trim_matches(is_js_whitespace).is_empty()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Address;

    fn valid_draft() -> CustomerDraft {
        CustomerDraft {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            phone: "5551234567".to_string(),
            email: "john.doe@example.com".to_string(),
            addresses: vec![Address {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62701".to_string(),
                primary: None,
            }],
        }
    }

    fn zip_key(index: usize) -> FieldKey {
        FieldKey::Address {
            field: AddressField::Zip,
            index,
        }
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        assert!(validate_create(&valid_draft()).is_empty());
        assert!(validate_edit(&valid_draft()).is_empty());
    }

    #[test]
    fn test_blank_names_are_required_under_both_rules() {
        for name in ["", " ", "\t\n"] {
            let mut draft = valid_draft();
            draft.first_name = name.to_string();
            draft.last_name = name.to_string();

            for rules in [RuleSet::Create, RuleSet::Edit] {
                let errors = validate(&draft, rules);
                assert_eq!(errors.get_by_name("firstName"), Some(FIRST_NAME_REQUIRED));
                assert_eq!(errors.get_by_name("lastName"), Some(LAST_NAME_REQUIRED));
            }
        }
    }

    #[test]
    fn test_create_phone_requires_ten_digits() {
        for phone in ["12345", "555-123-4567", "555 123 4567", "+15551234567", "55512345678", "abcdefghij", ""] {
            let mut draft = valid_draft();
            draft.phone = phone.to_string();
            let errors = validate_create(&draft);
            assert_eq!(
                errors.get_by_name("phone"),
                Some(PHONE_TEN_DIGIT_NUMBER),
                "phone {phone:?}"
            );
        }
    }

    #[test]
    fn test_create_phone_rejects_non_ascii_digits() {
        let mut draft = valid_draft();
        draft.phone = "５５５１２３４５６７".to_string();
        assert!(validate_create(&draft).get_by_name("phone").is_some());
    }

    #[test]
    fn test_edit_phone_only_checks_length() {
        let mut draft = valid_draft();

        // Ten characters that are not digits still pass the edit check.
        draft.phone = "abcdefghij".to_string();
        assert!(validate_edit(&draft).get_by_name("phone").is_none());
        assert_eq!(
            validate_create(&draft).get_by_name("phone"),
            Some(PHONE_TEN_DIGIT_NUMBER)
        );

        draft.phone = "555-1234".to_string();
        assert_eq!(validate_edit(&draft).get_by_name("phone"), Some(PHONE_TEN_DIGITS));

        draft.phone = "55512345678".to_string();
        assert_eq!(validate_edit(&draft).get_by_name("phone"), Some(PHONE_TEN_DIGITS));
    }

    #[test]
    fn test_create_email_pattern() {
        for email in ["a@b.c", "first.last+tag@sub.example.org", "ÜSER@example.com"] {
            assert!(RuleSet::Create.check_email(email).is_none(), "{email}");
        }
        for email in ["", "plain", "a@b", "a b@c.d", "a@b@c.d", "@b.c", "a@.c "] {
            assert_eq!(RuleSet::Create.check_email(email), Some(EMAIL_INVALID), "{email}");
        }
    }

    #[test]
    fn test_edit_email_pattern() {
        for email in ["John@Example.COM", "a_b%c@d-e.io", "x@y.z.museum"] {
            assert!(RuleSet::Edit.check_email(email).is_none(), "{email}");
        }
        // Single-letter TLD passes create but fails edit
        assert!(RuleSet::Create.check_email("a@b.c").is_none());
        assert_eq!(RuleSet::Edit.check_email("a@b.c"), Some(EMAIL_INVALID));
        // Non-ASCII local part passes create but fails edit
        assert_eq!(RuleSet::Edit.check_email("ÜSER@example.com"), Some(EMAIL_INVALID));
        assert_eq!(RuleSet::Edit.check_email("a@b.c0"), Some(EMAIL_INVALID));
    }

    #[test]
    fn test_address_fields_required_per_position() {
        let mut draft = valid_draft();
        draft.addresses.push(Address::blank());

        let errors = validate_create(&draft);
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get_by_name("addressStreet_1"), Some(STREET_REQUIRED));
        assert_eq!(errors.get_by_name("addressCity_1"), Some(CITY_REQUIRED));
        assert_eq!(errors.get_by_name("addressState_1"), Some(STATE_REQUIRED));
        assert_eq!(errors.get_by_name("addressZip_1"), Some(ZIP_REQUIRED));
        assert!(errors.get_by_name("addressStreet_0").is_none());
    }

    #[test]
    fn test_zip_must_be_five_digits() {
        for zip in ["1234", "123456", "1234a", " 12345", "12 45"] {
            let mut draft = valid_draft();
            draft.addresses[0].zip = zip.to_string();
            let errors = validate_edit(&draft);
            assert_eq!(errors.get(&zip_key(0)), Some(ZIP_FIVE_DIGITS), "zip {zip:?}");
        }

        let mut draft = valid_draft();
        draft.addresses[0].zip = "   ".to_string();
        assert_eq!(validate_create(&draft).get(&zip_key(0)), Some(ZIP_REQUIRED));
    }

    #[test]
    fn test_removed_address_leaves_no_stale_error() {
        let mut draft = valid_draft();
        let mut bad = draft.addresses[0].clone();
        bad.zip = "999".to_string();
        draft.addresses.insert(0, bad);

        assert!(validate_create(&draft).contains(&zip_key(0)));

        draft.addresses.remove(0);
        let errors = validate_create(&draft);
        assert!(!errors.contains(&zip_key(0)));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_addresses_are_valid() {
        let mut draft = valid_draft();
        draft.addresses.clear();
        assert!(validate_create(&draft).is_empty());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let draft = CustomerDraft::with_blank_address();
        assert_eq!(validate_create(&draft), validate_create(&draft));
        assert_eq!(validate_create(&draft).len(), 8);
    }

    #[test]
    fn test_browser_whitespace_set() {
        // U+FEFF trims away like a space; U+0085 is ordinary text
        assert!(is_blank("\u{FEFF}"));
        assert!(is_blank(" \u{A0}\u{3000}\t"));
        assert!(!is_blank("\u{85}"));

        let mut draft = valid_draft();
        draft.first_name = "\u{FEFF}".to_string();
        draft.addresses[0].street = "\u{2028}".to_string();
        draft.addresses[0].city = "\u{85}".to_string();
        let errors = validate_create(&draft);
        assert_eq!(errors.get_by_name("firstName"), Some(FIRST_NAME_REQUIRED));
        assert_eq!(errors.get_by_name("addressStreet_0"), Some(STREET_REQUIRED));
        assert!(errors.get_by_name("addressCity_0").is_none());

        assert_eq!(RuleSet::Create.check_email("a\u{FEFF}b@c.d"), Some(EMAIL_INVALID));
        assert_eq!(RuleSet::Create.check_email("a b@c.d"), Some(EMAIL_INVALID));
        assert_eq!(RuleSet::Create.check_email("a\u{85}b@c.d"), None);
        assert_eq!(RuleSet::Create.check_email("a.b@c.d"), None);
    }
}
