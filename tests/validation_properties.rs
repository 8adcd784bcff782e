//! Property tests for the contact form schema.

use proptest::prelude::*;

use portfolio::contact::{ContactForm, Field, validate};

fn valid_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z .'-]{1,30}"
}

fn valid_email() -> impl Strategy<Value = String> {
    "[a-z0-9_+]{1,10}(\\.[a-z0-9]{1,5})?@[a-z0-9][a-z0-9-]{0,9}\\.[a-z]{2,6}"
}

fn valid_message() -> impl Strategy<Value = String> {
    ".{10,80}"
}

fn valid_form() -> impl Strategy<Value = ContactForm> {
    (valid_name(), valid_email(), valid_message())
        .prop_map(|(name, email, message)| ContactForm::new(name, email, message))
}

/// A bad value for `field`: too short, or an email with no `@`.
fn bad_value(field: Field) -> BoxedStrategy<String> {
    match field {
        Field::Name => ".{0,1}".boxed(),
        Field::Email => "[a-z0-9. ]{0,20}".boxed(),
        Field::Message => ".{0,9}".boxed(),
    }
}

fn one_violation() -> impl Strategy<Value = (Field, ContactForm)> {
    prop_oneof![Just(Field::Name), Just(Field::Email), Just(Field::Message)]
        .prop_flat_map(|field| (Just(field), valid_form(), bad_value(field)))
        .prop_map(|(field, form, bad)| (field, portfolio::contact::apply(form, field, bad)))
}

proptest! {
    #[test]
    fn well_formed_input_has_no_errors(form in valid_form()) {
        prop_assert!(validate(&form).is_empty(), "{form:?}");
    }

    #[test]
    fn single_violation_reports_only_that_field((field, form) in one_violation()) {
        let errors = validate(&form);
        prop_assert_eq!(errors.len(), 1);
        prop_assert!(errors.get(field).is_some());
    }

    #[test]
    fn validation_is_repeatable((_, form) in one_violation()) {
        prop_assert_eq!(validate(&form), validate(&form));
    }
}
