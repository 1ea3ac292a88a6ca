use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The consultation booking wizard, kept separate from any transport or
/// rendering concern so the flow can be driven and tested on its own.
///
/// Stages advance date -> time -> details -> submitted. Moving back never
/// discards what was already entered; a visitor can revise the date without
/// retyping their contact details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStage {
    SelectingDate,
    SelectingTime,
    EnteringDetails,
    Submitted,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub budget: Option<String>,
    pub property_type: Option<String>,
    pub investment_type: Option<String>,
    pub reason: Option<String>,
    pub referral_source: Option<String>,
    pub desired_properties: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReservationDraft {
    pub date: NaiveDate,
    pub time: String,
    pub details: ContactDetails,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WizardError {
    #[error("a date must be selected first")]
    NoDateSelected,
    #[error("a time must be selected first")]
    NoTimeSelected,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("the booking was already submitted")]
    AlreadySubmitted,
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    stage: WizardStage,
    date: Option<NaiveDate>,
    time: Option<String>,
    details: ContactDetails,
}

impl BookingWizard {
    pub fn new() -> Self {
        Self {
            stage: WizardStage::SelectingDate,
            date: None,
            time: None,
            details: ContactDetails::default(),
        }
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn details(&self) -> &ContactDetails {
        &self.details
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        if self.stage == WizardStage::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        self.date = Some(date);
        self.stage = WizardStage::SelectingTime;
        Ok(())
    }

    pub fn select_time(&mut self, time: String) -> Result<(), WizardError> {
        if self.stage == WizardStage::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        if self.date.is_none() {
            return Err(WizardError::NoDateSelected);
        }
        self.time = Some(time);
        self.stage = WizardStage::EnteringDetails;
        Ok(())
    }

    pub fn set_details(&mut self, details: ContactDetails) -> Result<(), WizardError> {
        if self.stage == WizardStage::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        self.details = details;
        Ok(())
    }

    /// Steps back one stage. Everything entered so far is kept.
    pub fn back(&mut self) -> Result<(), WizardError> {
        self.stage = match self.stage {
            WizardStage::Submitted => return Err(WizardError::AlreadySubmitted),
            WizardStage::EnteringDetails => WizardStage::SelectingTime,
            WizardStage::SelectingTime | WizardStage::SelectingDate => WizardStage::SelectingDate,
        };
        Ok(())
    }

    /// Validates the accumulated state and produces the draft to persist.
    /// The wizard only reaches `Submitted` via `complete`, after the insert
    /// actually succeeded; a failed insert leaves it on the details stage.
    pub fn submit(&self) -> Result<ReservationDraft, WizardError> {
        if self.stage == WizardStage::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        let date = self.date.ok_or(WizardError::NoDateSelected)?;
        let time = self.time.clone().ok_or(WizardError::NoTimeSelected)?;

        if self.details.name.trim().is_empty() {
            return Err(WizardError::MissingField("name"));
        }
        if self.details.email.trim().is_empty() {
            return Err(WizardError::MissingField("email"));
        }
        if !self.details.email.contains('@') {
            return Err(WizardError::InvalidEmail);
        }
        if self.details.phone.trim().is_empty() {
            return Err(WizardError::MissingField("phone"));
        }

        Ok(ReservationDraft {
            date,
            time,
            details: self.details.clone(),
        })
    }

    pub fn complete(&mut self) {
        self.stage = WizardStage::Submitted;
    }
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}
