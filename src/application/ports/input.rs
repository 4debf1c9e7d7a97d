//! Operator input port
//!
//! Adapters only supply raw lines; parsing of menu selections, vehicle
//! classes and registration numbers is shared by every adapter.

use tracing::warn;

use crate::domain::{DomainError, DomainResult, VehicleClass};
use crate::shared::validations::validate_registration;

pub const VEHICLE_CLASS_PROMPT: &str = "Please select vehicle type from menu\n1 CAR\n2 BIKE";
pub const REGISTRATION_PROMPT: &str =
    "Please type the vehicle registration number and press enter key";

/// Source of operator input.
pub trait InputSource: Send + Sync {
    /// Show `prompt` (when non-empty) and return the next line, without its
    /// line terminator. `None` once the input is exhausted.
    fn next_line(&self, prompt: &str) -> Option<String>;

    /// Next menu selection. `Ok(None)` once the input is exhausted.
    fn read_selection(&self) -> DomainResult<Option<u32>> {
        let Some(line) = self.next_line("") else {
            return Ok(None);
        };
        line.trim().parse::<u32>().map(Some).map_err(|_| {
            warn!(input = %line, "Error while reading menu selection");
            DomainError::InvalidSelection(line)
        })
    }

    /// Vehicle class picked from the `1 CAR / 2 BIKE` menu.
    fn read_vehicle_class(&self) -> DomainResult<VehicleClass> {
        let line = self
            .next_line(VEHICLE_CLASS_PROMPT)
            .ok_or_else(|| DomainError::InvalidSelection(String::new()))?;
        line.trim()
            .parse::<u32>()
            .ok()
            .and_then(VehicleClass::from_selection)
            .ok_or_else(|| {
                warn!(input = %line, "Error parsing user input for type of vehicle");
                DomainError::InvalidSelection(line)
            })
    }

    /// Registration number, trimmed. Blank input is rejected.
    fn read_registration_number(&self) -> DomainResult<String> {
        let line = self
            .next_line(REGISTRATION_PROMPT)
            .ok_or_else(|| DomainError::InvalidRegistration(String::new()))?;
        validate_registration(&line).inspect_err(|_| {
            warn!("Error while reading vehicle registration number");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::testing::ScriptedInput;

    #[test]
    fn selection_parses_numbers() {
        let input = ScriptedInput::new([" 2 ", "x"]);
        assert_eq!(input.read_selection(), Ok(Some(2)));
        assert_eq!(
            input.read_selection(),
            Err(DomainError::InvalidSelection("x".into()))
        );
        assert_eq!(input.read_selection(), Ok(None));
    }

    #[test]
    fn vehicle_class_from_menu() {
        let input = ScriptedInput::new(["1", "2", "3", "car"]);
        assert_eq!(input.read_vehicle_class(), Ok(VehicleClass::Car));
        assert_eq!(input.read_vehicle_class(), Ok(VehicleClass::Bike));
        assert_eq!(
            input.read_vehicle_class(),
            Err(DomainError::InvalidSelection("3".into()))
        );
        assert_eq!(
            input.read_vehicle_class(),
            Err(DomainError::InvalidSelection("car".into()))
        );
        assert_eq!(
            input.read_vehicle_class(),
            Err(DomainError::InvalidSelection(String::new()))
        );
    }

    #[test]
    fn registration_number() {
        let input = ScriptedInput::new([" ABCDEF ", "   "]);
        assert_eq!(input.read_registration_number(), Ok("ABCDEF".to_string()));
        assert_eq!(
            input.read_registration_number(),
            Err(DomainError::InvalidRegistration("   ".into()))
        );
        assert_eq!(
            input.read_registration_number(),
            Err(DomainError::InvalidRegistration(String::new()))
        );
    }

    #[test]
    fn prompts_are_forwarded() {
        let input = ScriptedInput::new(["1", "AB-123"]);
        input.read_vehicle_class().unwrap();
        input.read_registration_number().unwrap();
        assert_eq!(input.prompts(), vec![VEHICLE_CLASS_PROMPT, REGISTRATION_PROMPT]);
    }
}
