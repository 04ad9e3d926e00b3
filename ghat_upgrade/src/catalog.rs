//! Fixed catalogs: plans, dialing codes and mobile networks.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub id: &'static str,
    pub duration_months: u32,
    pub price_cents: u32,
    pub display_name: &'static str,
    pub is_best_value: bool,
}

impl Plan {
    /// Price formatted as `$49.99`.
    #[must_use]
    pub fn price(&self) -> String {
        format_cents(f64::from(self.price_cents))
    }

    /// Price spread over the plan duration, formatted as `$8.33`.
    #[must_use]
    pub fn per_month_price(&self) -> String {
        format_cents(f64::from(self.price_cents) / f64::from(self.duration_months.max(1)))
    }
}

fn format_cents(cents: f64) -> String {
    format!("${:.2}", cents / 100.0)
}

pub static PLANS: [Plan; 3] = [
    Plan {
        id: "1m",
        duration_months: 1,
        price_cents: 999,
        display_name: "1 Month",
        is_best_value: false,
    },
    Plan {
        id: "6m",
        duration_months: 6,
        price_cents: 4999,
        display_name: "6 Months",
        is_best_value: true,
    },
    Plan {
        id: "12m",
        duration_months: 12,
        price_cents: 8999,
        display_name: "1 Year",
        is_best_value: false,
    },
];

#[must_use]
pub fn find_plan(id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|p| p.id == id)
}

/// The entry flagged best value, falling back to the first plan.
#[must_use]
pub fn best_value_plan() -> &'static Plan {
    PLANS.iter().find(|p| p.is_best_value).unwrap_or(&PLANS[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryCode {
    pub name: &'static str,
    pub code: &'static str,
    pub flag: &'static str,
}

const fn country(name: &'static str, code: &'static str, flag: &'static str) -> CountryCode {
    CountryCode { name, code, flag }
}

pub static COUNTRY_CODES: [CountryCode; 7] = [
    country("Ghana", "+233", "🇬🇭"),
    country("Nigeria", "+234", "🇳🇬"),
    country("Kenya", "+254", "🇰🇪"),
    country("South Africa", "+27", "🇿🇦"),
    country("United States", "+1", "🇺🇸"),
    country("United Kingdom", "+44", "🇬🇧"),
    country("India", "+91", "🇮🇳"),
];

impl CountryCode {
    #[must_use]
    pub fn find(code: &str) -> Option<&'static Self> {
        COUNTRY_CODES.iter().find(|c| c.code == code)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MobileNetwork {
    #[default]
    Mtn,
    Vodafone,
    AirtelTigo,
}

impl MobileNetwork {
    pub const ALL: [Self; 3] = [Self::Mtn, Self::Vodafone, Self::AirtelTigo];
}

impl fmt::Display for MobileNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mtn => "MTN",
            Self::Vodafone => "Vodafone",
            Self::AirtelTigo => "AirtelTigo",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_best_value_plan() {
        assert_eq!(PLANS.iter().filter(|p| p.is_best_value).count(), 1);
        assert_eq!(best_value_plan().id, "6m");
    }

    #[test]
    fn prices_format_like_the_plan_cards() {
        let six = find_plan("6m").unwrap();
        assert_eq!(six.price(), "$49.99");
        assert_eq!(six.per_month_price(), "$8.33");

        let year = find_plan("12m").unwrap();
        assert_eq!(year.per_month_price(), "$7.50");

        assert!(find_plan("3m").is_none());
    }

    #[test]
    fn country_lookup_by_code() {
        assert_eq!(CountryCode::find("+254").map(|c| c.name), Some("Kenya"));
        assert!(CountryCode::find("+999").is_none());
        assert_eq!(COUNTRY_CODES[0].name, "Ghana");
    }

    #[test]
    fn network_names() {
        let names: Vec<String> = MobileNetwork::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["MTN", "Vodafone", "AirtelTigo"]);
    }
}
