#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Mocked "Upgrade to Pro" flow.
//!
//! A plan picker followed by one of three payment forms. Nothing is charged:
//! confirming only produces an acknowledgment and closes the wizard.

mod catalog;
mod wizard;

pub use catalog::{COUNTRY_CODES, CountryCode, MobileNetwork, PLANS, Plan, best_value_plan, find_plan};
pub use wizard::{
    Acknowledgment, MobileMoneyForm, PaymentMethod, UpgradeWizard, WizardError, WizardState,
    WizardStep,
};
