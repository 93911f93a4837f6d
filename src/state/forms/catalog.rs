//! Built-in forms

use super::{FieldSpec, FormDefinition, StepCondition, StepDefinition, SyncRule};

const STATES: &[&str] = &["CA", "NY", "TX"];

/// Names accepted by [`by_name`]
pub const FORM_NAMES: &[&str] = &["checkout", "onboarding"];

/// Look up a built-in form by name
pub fn by_name(name: &str) -> Option<FormDefinition> {
    match name.trim().to_ascii_lowercase().as_str() {
        "checkout" => Some(checkout()),
        "onboarding" => Some(onboarding()),
        _ => None,
    }
}

fn address_fields(prefix: &str) -> Vec<FieldSpec> {
    let name = |suffix: &str| format!("{prefix}{suffix}");
    vec![
        FieldSpec::text(&name("FirstName"), "First Name").with_placeholder("Jhon"),
        FieldSpec::text(&name("LastName"), "Last Name").with_placeholder("Doe"),
        FieldSpec::text(&name("Address1"), "Address").with_placeholder("Address 1"),
        FieldSpec::text(&name("Address2"), "Address 2")
            .with_placeholder("Address 2")
            .optional(),
        FieldSpec::text(&name("City"), "City").with_placeholder("city"),
        FieldSpec::choice(&name("State"), "State", STATES),
        FieldSpec::text(&name("Zip"), "Zip").with_placeholder("zip"),
    ]
}

/// Billing, shipping (optionally copied from billing) and newsletter opt-in
pub fn checkout() -> FormDefinition {
    let mut shipping = vec![FieldSpec::checkbox("sameAsBilling", "Same as Billing Info")];
    shipping.extend(address_fields("ship"));

    FormDefinition::new(
        "Checkout",
        vec![
            StepDefinition::new("billing", "Billing Info", address_fields("bill")),
            StepDefinition::new("shipping", "Shipping Info", shipping),
            StepDefinition::new(
                "updates",
                "Send Updates",
                vec![FieldSpec::checkbox(
                    "sendUpdates",
                    "Receive our newsletter by email",
                )],
            ),
        ],
    )
    .with_sync(SyncRule::new(
        "sameAsBilling",
        &[
            ("billFirstName", "shipFirstName"),
            ("billLastName", "shipLastName"),
            ("billAddress1", "shipAddress1"),
            ("billAddress2", "shipAddress2"),
            ("billCity", "shipCity"),
            ("billState", "shipState"),
            ("billZip", "shipZip"),
        ],
    ))
}

/// Account onboarding with an extra step for under-18 users
pub fn onboarding() -> FormDefinition {
    FormDefinition::new(
        "Onboarding",
        vec![
            StepDefinition::new(
                "account",
                "Welcome",
                vec![
                    FieldSpec::text("name", "Name"),
                    FieldSpec::text("email", "Email").with_placeholder("you@example.com"),
                ],
            ),
            StepDefinition::new(
                "security",
                "About You",
                vec![
                    FieldSpec::text("age", "Age"),
                    FieldSpec::text("password", "Password"),
                ],
            ),
            StepDefinition::new(
                "age_restriction",
                "Age Restriction",
                vec![FieldSpec::checkbox("visit", "A parent or guardian approves this account")
                    .required()],
            )
            .when(StepCondition::LessThan("age".to_string(), 18)),
            StepDefinition::new(
                "profile",
                "Profile",
                vec![
                    FieldSpec::text("address", "Address"),
                    FieldSpec::text("occupation", "Occupation").optional(),
                ],
            ),
        ],
    )
}
