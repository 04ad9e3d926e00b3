use crate::catalog::{COUNTRY_CODES, CountryCode, MobileNetwork, Plan, best_value_plan, find_plan};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectPlan,
    Card,
    PayPal,
    MobileMoney,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    PayPal,
    MobileMoney,
}

impl PaymentMethod {
    const fn step(self) -> WizardStep {
        match self {
            Self::Card => WizardStep::Card,
            Self::PayPal => WizardStep::PayPal,
            Self::MobileMoney => WizardStep::MobileMoney,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("the upgrade wizard is not open")]
    Closed,

    #[error("unknown plan: {0}")]
    UnknownPlan(String),

    #[error("plans can only be changed on the plan selection step")]
    NotSelectingPlan,

    #[error("not on a payment step")]
    NotOnPaymentStep,

    #[error("unknown country code: {0}")]
    UnknownCountry(String),

    #[error("Please enter a phone number.")]
    MissingPhoneNumber,
}

/// Fields of the Mobile Money form. Discarded when leaving the step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileMoneyForm {
    pub country: &'static CountryCode,
    pub network: MobileNetwork,
    pub phone_number: String,
}

impl Default for MobileMoneyForm {
    fn default() -> Self {
        Self {
            country: &COUNTRY_CODES[0],
            network: MobileNetwork::default(),
            phone_number: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    selected_plan_id: &'static str,
    step: WizardStep,
    mobile: MobileMoneyForm,
}

impl WizardState {
    fn new() -> Self {
        Self {
            selected_plan_id: best_value_plan().id,
            step: WizardStep::SelectPlan,
            mobile: MobileMoneyForm::default(),
        }
    }

    #[must_use]
    pub const fn selected_plan_id(&self) -> &'static str {
        self.selected_plan_id
    }

    #[must_use]
    pub fn selected_plan(&self) -> &'static Plan {
        find_plan(self.selected_plan_id).unwrap_or_else(best_value_plan)
    }

    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub const fn mobile(&self) -> &MobileMoneyForm {
        &self.mobile
    }
}

/// What the user is told after confirming a payment step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgment {
    pub plan: Plan,
    pub method: PaymentMethod,
    pub notices: Vec<String>,
}

/// The upgrade wizard. Holds a [`WizardState`] only while open.
#[derive(Debug, Default)]
pub struct UpgradeWizard {
    state: Option<WizardState>,
}

impl UpgradeWizard {
    #[must_use]
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Open with a fresh state: best-value plan, plan selection step.
    pub fn open(&mut self) {
        info!("Opening upgrade wizard");
        self.state = Some(WizardState::new());
    }

    pub fn close(&mut self) {
        if self.state.take().is_some() {
            info!("Upgrade wizard closed");
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub const fn state(&self) -> Option<&WizardState> {
        self.state.as_ref()
    }

    pub fn step(&self) -> Result<WizardStep, WizardError> {
        Ok(self.current()?.step)
    }

    pub fn selected_plan(&self) -> Result<&'static Plan, WizardError> {
        Ok(self.current()?.selected_plan())
    }

    /// Change the plan. Only allowed on [`WizardStep::SelectPlan`].
    pub fn select_plan(&mut self, id: &str) -> Result<(), WizardError> {
        let state = self.current_mut()?;
        if state.step != WizardStep::SelectPlan {
            return Err(WizardError::NotSelectingPlan);
        }
        let plan = find_plan(id).ok_or_else(|| WizardError::UnknownPlan(id.to_string()))?;
        debug!("Selected plan {}", plan.id);
        state.selected_plan_id = plan.id;
        Ok(())
    }

    /// Move from plan selection to a payment form.
    pub fn choose_method(&mut self, method: PaymentMethod) -> Result<(), WizardError> {
        let state = self.current_mut()?;
        if state.step != WizardStep::SelectPlan {
            return Err(WizardError::NotSelectingPlan);
        }
        debug!("SelectPlan -> {:?}", method.step());
        state.step = method.step();
        state.mobile = MobileMoneyForm::default();
        Ok(())
    }

    /// Return to plan selection, keeping the selected plan.
    pub fn back(&mut self) -> Result<(), WizardError> {
        let state = self.current_mut()?;
        if state.step == WizardStep::SelectPlan {
            return Err(WizardError::NotOnPaymentStep);
        }
        debug!("{:?} -> SelectPlan", state.step);
        state.step = WizardStep::SelectPlan;
        state.mobile = MobileMoneyForm::default();
        Ok(())
    }

    pub fn set_phone_number(&mut self, phone_number: impl Into<String>) -> Result<(), WizardError> {
        self.mobile_form()?.phone_number = phone_number.into();
        Ok(())
    }

    pub fn select_country(&mut self, code: &str) -> Result<(), WizardError> {
        let country =
            CountryCode::find(code).ok_or_else(|| WizardError::UnknownCountry(code.to_string()))?;
        self.mobile_form()?.country = country;
        Ok(())
    }

    pub fn select_network(&mut self, network: MobileNetwork) -> Result<(), WizardError> {
        self.mobile_form()?.network = network;
        Ok(())
    }

    /// Acknowledge the mocked payment and close the wizard.
    ///
    /// Mobile Money needs a phone number; without one the wizard stays open on
    /// the same step.
    pub fn confirm(&mut self) -> Result<Acknowledgment, WizardError> {
        let state = self.current()?;
        let method = match state.step {
            WizardStep::SelectPlan => return Err(WizardError::NotOnPaymentStep),
            WizardStep::Card => PaymentMethod::Card,
            WizardStep::PayPal => PaymentMethod::PayPal,
            WizardStep::MobileMoney => PaymentMethod::MobileMoney,
        };

        let plan = *state.selected_plan();
        let mut notices = Vec::new();

        if method == PaymentMethod::MobileMoney {
            let phone = state.mobile.phone_number.trim();
            if phone.is_empty() {
                return Err(WizardError::MissingPhoneNumber);
            }
            notices.push(format!(
                "Simulating payment for {}{phone}",
                state.mobile.country.code
            ));
        }

        notices.push(format!(
            "This is a UI demo for the {} plan. No payment was processed.",
            plan.display_name
        ));

        info!("Upgrade acknowledged: plan={} method={method:?}", plan.id);
        self.state = None;

        Ok(Acknowledgment {
            plan,
            method,
            notices,
        })
    }

    fn current(&self) -> Result<&WizardState, WizardError> {
        self.state.as_ref().ok_or(WizardError::Closed)
    }

    fn current_mut(&mut self) -> Result<&mut WizardState, WizardError> {
        self.state.as_mut().ok_or(WizardError::Closed)
    }

    fn mobile_form(&mut self) -> Result<&mut MobileMoneyForm, WizardError> {
        let state = self.current_mut()?;
        if state.step != WizardStep::MobileMoney {
            return Err(WizardError::NotOnPaymentStep);
        }
        Ok(&mut state.mobile)
    }
}
