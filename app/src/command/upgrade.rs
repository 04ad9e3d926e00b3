//! Line-driven front end for the upgrade wizard.

use ghat_upgrade::{
    Acknowledgment, COUNTRY_CODES, MobileNetwork, PLANS, PaymentMethod, UpgradeWizard, WizardStep,
};
use std::io::{BufRead, Write};
use tracing::debug;

/// Strategy for running the upgrade flow on its own.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeStrategy;

impl super::CommandStrategy for UpgradeStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut out = std::io::stdout();
        run_wizard(&mut input, &mut out)?;
        Ok(())
    }
}

/// One line of wizard input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum WizardInput {
    Plan(String),
    Method(PaymentMethod),
    Phone(String),
    Country(String),
    Network(MobileNetwork),
    Pay,
    Back,
    Close,
    Unknown(String),
}

impl WizardInput {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, a)| (w, a.trim()));

        match word.to_lowercase().as_str() {
            "card" | "visa" | "mastercard" => Self::Method(PaymentMethod::Card),
            "paypal" => Self::Method(PaymentMethod::PayPal),
            "momo" | "mobile" => Self::Method(PaymentMethod::MobileMoney),
            "phone" => Self::Phone(arg.to_string()),
            "country" => Self::Country(arg.to_string()),
            "network" => match arg.to_lowercase().as_str() {
                "mtn" => Self::Network(MobileNetwork::Mtn),
                "vodafone" => Self::Network(MobileNetwork::Vodafone),
                "airteltigo" => Self::Network(MobileNetwork::AirtelTigo),
                _ => Self::Unknown(line.to_string()),
            },
            "pay" | "confirm" => Self::Pay,
            "back" => Self::Back,
            "close" | "cancel" | "exit" | "quit" => Self::Close,
            _ if PLANS.iter().any(|p| p.id == word) => Self::Plan(word.to_string()),
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Drive the wizard from `input` until it is confirmed or closed.
///
/// End of input closes the wizard.
pub fn run_wizard<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<Acknowledgment>> {
    let mut wizard = UpgradeWizard::new();
    wizard.open();
    writeln!(out, "\n=== Upgrade to Pro ===")?;

    loop {
        render(&wizard, out)?;
        write!(out, "upgrade> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            wizard.close();
            return Ok(None);
        }

        let command = WizardInput::parse(&line);
        debug!("Wizard input: {command:?}");

        let result = match command {
            WizardInput::Plan(id) => wizard.select_plan(&id),
            WizardInput::Method(method) => wizard.choose_method(method),
            WizardInput::Phone(number) => wizard.set_phone_number(number),
            WizardInput::Country(code) => wizard.select_country(&code),
            WizardInput::Network(network) => wizard.select_network(network),
            WizardInput::Back => wizard.back(),
            WizardInput::Close => {
                wizard.close();
                writeln!(out, "Upgrade cancelled.")?;
                return Ok(None);
            }
            WizardInput::Pay => match wizard.confirm() {
                Ok(ack) => {
                    for notice in &ack.notices {
                        writeln!(out, "{notice}")?;
                    }
                    return Ok(Some(ack));
                }
                Err(e) => Err(e),
            },
            WizardInput::Unknown(text) => {
                writeln!(out, "Unrecognized input: {text}")?;
                Ok(())
            }
        };

        if let Err(e) = result {
            writeln!(out, "{e}")?;
        }
    }
}

fn render<W: Write>(wizard: &UpgradeWizard, out: &mut W) -> anyhow::Result<()> {
    let Some(state) = wizard.state() else {
        return Ok(());
    };
    let plan = state.selected_plan();

    match state.step() {
        WizardStep::SelectPlan => {
            writeln!(
                out,
                "Choose your plan to unlock premium features, priority access, and faster responses."
            )?;
            for candidate in &PLANS {
                let marker = if candidate.id == plan.id { '*' } else { ' ' };
                let badge = if candidate.is_best_value {
                    "  [Best Value]"
                } else {
                    ""
                };
                writeln!(
                    out,
                    " {marker} {:<4} {:<9} {:>7}  ({} / month){badge}",
                    candidate.id,
                    candidate.display_name,
                    candidate.price(),
                    candidate.per_month_price()
                )?;
            }
            writeln!(
                out,
                "Type a plan id to select it, then pay with: card | paypal | momo (or close)"
            )?;
        }
        WizardStep::Card => {
            writeln!(out, "Pay {} with Card", plan.price())?;
            writeln!(out, "This is a UI demo. Do not enter real card details.")?;
            writeln!(out, "Commands: pay | back | close")?;
        }
        WizardStep::PayPal => {
            writeln!(out, "Pay {} with PayPal", plan.price())?;
            writeln!(
                out,
                "You will be redirected to PayPal to complete your payment securely."
            )?;
            writeln!(out, "Commands: pay | back | close")?;
        }
        WizardStep::MobileMoney => {
            let form = state.mobile();
            writeln!(out, "Pay {} with Mobile Money", plan.price())?;
            writeln!(out, "This is a UI demo. Do not enter real information.")?;
            writeln!(
                out,
                "Phone: {} {} {}   Network: {}",
                form.country.flag,
                form.country.code,
                if form.phone_number.is_empty() {
                    "(not set)"
                } else {
                    form.phone_number.as_str()
                },
                form.network
            )?;
            let codes: Vec<&str> = COUNTRY_CODES.iter().map(|c| c.code).collect();
            writeln!(out, "Countries: {}", codes.join(" "))?;
            writeln!(
                out,
                "Commands: phone <number> | country <code> | network <mtn|vodafone|airteltigo> | pay | back | close"
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Option<Acknowledgment>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let ack = run_wizard(&mut input, &mut out).unwrap();
        (ack, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_inputs() {
        assert_eq!(WizardInput::parse("12m"), WizardInput::Plan("12m".into()));
        assert_eq!(
            WizardInput::parse("visa"),
            WizardInput::Method(PaymentMethod::Card)
        );
        assert_eq!(
            WizardInput::parse("phone  241234567 "),
            WizardInput::Phone("241234567".into())
        );
        assert_eq!(
            WizardInput::parse("network MTN"),
            WizardInput::Network(MobileNetwork::Mtn)
        );
        assert_eq!(
            WizardInput::parse("network orange"),
            WizardInput::Unknown("network orange".into())
        );
    }

    #[test]
    fn card_flow_acknowledges_selected_plan() {
        let (ack, out) = run("1m\ncard\npay\n");

        let ack = ack.unwrap();
        assert_eq!(ack.plan.id, "1m");
        assert!(out.contains("Pay $9.99 with Card"));
        assert!(out.contains("This is a UI demo for the 1 Month plan. No payment was processed."));
    }

    #[test]
    fn mobile_money_needs_phone_before_paying() {
        let (ack, out) = run("momo\npay\ncountry +234\nphone 8012345\npay\n");

        assert!(out.contains("Please enter a phone number."));
        assert!(out.contains("Simulating payment for +2348012345"));
        assert_eq!(ack.unwrap().method, PaymentMethod::MobileMoney);
    }

    #[test]
    fn back_returns_to_plan_list() {
        let (ack, out) = run("paypal\nback\n12m\npaypal\npay\n");

        assert_eq!(ack.unwrap().plan.id, "12m");
        assert!(out.contains("Pay $89.99 with PayPal"));
    }

    #[test]
    fn close_and_eof_cancel() {
        let (ack, out) = run("close\n");
        assert!(ack.is_none());
        assert!(out.contains("Upgrade cancelled."));

        let (ack, _) = run("card\n");
        assert!(ack.is_none());
    }

    #[test]
    fn plan_cannot_change_on_payment_step() {
        let (ack, out) = run("card\n1m\npay\n");

        assert!(out.contains("plans can only be changed on the plan selection step"));
        assert_eq!(ack.unwrap().plan.id, "6m");
    }
}
