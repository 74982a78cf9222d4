use std::str::FromStr;

use crate::errors::ServiceError;

/// Callback payload of the "all numbers" menu entry.
pub const ALL_NUMBERS_KEY: &str = "all_numbers";

/// One category of the static emergency directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmergencyService {
    Police,
    Emergency,
    Fire,
    Ambulance,
    Gas,
}

impl EmergencyService {
    /// Display order for menus and the combined listing.
    pub const ALL: [EmergencyService; 5] = [
        EmergencyService::Police,
        EmergencyService::Emergency,
        EmergencyService::Fire,
        EmergencyService::Ambulance,
        EmergencyService::Gas,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            EmergencyService::Police => "police",
            EmergencyService::Emergency => "emergency",
            EmergencyService::Fire => "fire",
            EmergencyService::Ambulance => "ambulance",
            EmergencyService::Gas => "gas",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            EmergencyService::Police => "Police number",
            EmergencyService::Emergency => "Emergency number",
            EmergencyService::Fire => "Fire service",
            EmergencyService::Ambulance => "Ambulance",
            EmergencyService::Gas => "Gas emergency",
        }
    }

    pub fn number(&self) -> &'static str {
        match self {
            EmergencyService::Police => "102",
            EmergencyService::Emergency => "112",
            EmergencyService::Fire => "101",
            EmergencyService::Ambulance => "103",
            EmergencyService::Gas => "104",
        }
    }

    pub fn describe(&self) -> String {
        let title = match self {
            EmergencyService::Police => "Police number",
            EmergencyService::Emergency => "Emergency number (General help)",
            EmergencyService::Fire => "Fire service number",
            EmergencyService::Ambulance => "Ambulance number",
            EmergencyService::Gas => "Gas emergency number",
        };
        format!("{}: {}!", title, self.number())
    }
}

impl FromStr for EmergencyService {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmergencyService::ALL
            .into_iter()
            .find(|service| service.key() == s)
            .ok_or_else(|| ServiceError::Validation(format!("Unknown emergency service: {}", s)))
    }
}

pub fn all_numbers() -> String {
    EmergencyService::ALL
        .iter()
        .map(EmergencyService::describe)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_each_service() {
        assert_eq!(EmergencyService::Police.describe(), "Police number: 102!");
        assert_eq!(
            EmergencyService::Emergency.describe(),
            "Emergency number (General help): 112!"
        );
        assert_eq!(EmergencyService::Fire.describe(), "Fire service number: 101!");
        assert_eq!(EmergencyService::Ambulance.describe(), "Ambulance number: 103!");
        assert_eq!(EmergencyService::Gas.describe(), "Gas emergency number: 104!");
    }

    #[test]
    fn test_all_numbers_order() {
        let expected = [
            EmergencyService::Police,
            EmergencyService::Emergency,
            EmergencyService::Fire,
            EmergencyService::Ambulance,
            EmergencyService::Gas,
        ]
        .iter()
        .map(|s| s.describe())
        .collect::<Vec<_>>()
        .join("\n");

        assert_eq!(all_numbers(), expected);
        assert!(all_numbers().starts_with("Police number: 102!\n"));
        assert!(all_numbers().ends_with("Gas emergency number: 104!"));
    }

    #[test]
    fn test_from_str() {
        for service in EmergencyService::ALL {
            assert_eq!(service.key().parse::<EmergencyService>().unwrap(), service);
        }
        assert!("all_numbers".parse::<EmergencyService>().is_err());
        assert!("Police".parse::<EmergencyService>().is_err());
    }
}
