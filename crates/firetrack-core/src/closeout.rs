//! Fire alarm system inspection closeout form
//!
//! The form is stored per project as a JSON document with camelCase keys.
//! Checklist items are simple pass/fail flags; the form is complete once
//! every item has passed and the inspection is dated and signed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::parse_date;

/// Closeout inspection form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloseoutForm {
    /// Inspection date as entered, `YYYY-MM-DD`
    pub inspection_date: String,
    /// Inspector who signs the form
    pub inspector_name: String,
    /// Panel is powered and shows no trouble
    pub system_operational: bool,
    /// System runs on standby batteries
    pub battery_backup: bool,
    /// Horns and speakers are audible
    pub audio_audible: bool,
    /// Strobes are flashing
    pub visual_flashing: bool,
    /// Initiating devices were tested
    pub devices_tested: bool,
    /// Manual pull stations were tested
    pub manual_pull_tested: bool,
    /// Measured main power, e.g. `120V`
    pub main_power_voltage: String,
    /// Measured battery voltage, e.g. `27.2V`
    pub battery_voltage: String,
    /// Inspector notes
    pub notes: String,
}

impl CloseoutForm {
    /// Checklist items with their labels, in form order
    pub fn checklist(&self) -> [(&'static str, bool); 6] {
        [
            ("System operational", self.system_operational),
            ("Battery backup", self.battery_backup),
            ("Audible devices", self.audio_audible),
            ("Visual devices flashing", self.visual_flashing),
            ("Devices tested", self.devices_tested),
            ("Manual pull stations tested", self.manual_pull_tested),
        ]
    }

    /// Number of checklist items that passed
    pub fn passed_count(&self) -> usize {
        self.checklist().iter().filter(|(_, passed)| *passed).count()
    }

    /// Labels of checklist items that have not passed
    pub fn outstanding(&self) -> Vec<&'static str> {
        self.checklist()
            .into_iter()
            .filter(|(_, passed)| !passed)
            .map(|(label, _)| label)
            .collect()
    }

    /// Parsed inspection date; `None` when the field is blank
    pub fn parsed_inspection_date(&self) -> Result<Option<NaiveDate>> {
        if self.inspection_date.trim().is_empty() {
            return Ok(None);
        }
        parse_date(&self.inspection_date).map(Some)
    }

    /// Every item passed, and the inspection is dated and has an inspector
    pub fn is_complete(&self) -> bool {
        self.passed_count() == self.checklist().len()
            && !self.inspector_name.trim().is_empty()
            && matches!(self.parsed_inspection_date(), Ok(Some(_)))
    }
}
