use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::Timestamp;
use crate::constants::{MAX_TITLE_CHARS, MIN_DESCRIPTION_CHARS, PHONE_DIGITS, POSTAL_CODE_DIGITS};

// =============================================================================
// Wizard steps
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Details,
    Dimensions,
    Pricing,
    Location,
    Contact,
    Delivery,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        Self::Details,
        Self::Dimensions,
        Self::Pricing,
        Self::Location,
        Self::Contact,
        Self::Delivery,
        Self::Review,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Details => "Details",
            Self::Dimensions => "Dimensions",
            Self::Pricing => "Pricing",
            Self::Location => "Location",
            Self::Contact => "Contact",
            Self::Delivery => "Delivery",
            Self::Review => "Review",
        }
    }
}

// =============================================================================
// Field groups
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sofa,
    Bed,
    Table,
    Chair,
    Storage,
    Decor,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingDetails {
    pub title: String,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DimensionUnit {
    #[default]
    Cm,
    Inch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    pub unit: DimensionUnit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    pub price: Option<u64>,
    /// Retail price when new, shown struck through
    pub original_price: Option<u64>,
    pub negotiable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    #[default]
    Chat,
    Phone,
    Email,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub preferred: ContactMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOptions {
    pub pickup: bool,
    pub delivery: bool,
    /// Only kept when `delivery` is offered
    pub delivery_fee: Option<u64>,
    pub notes: String,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            pickup: true,
            delivery: false,
            delivery_fee: None,
            notes: String::new(),
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("{step:?} step has {} invalid field(s)", .errors.len())]
    Invalid {
        step: WizardStep,
        errors: Vec<FieldError>,
    },
    #[error("already at the last step")]
    AtEnd,
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

impl ListingDetails {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        } else if title.chars().count() > MAX_TITLE_CHARS {
            errors.push(FieldError::new(
                "title",
                format!("Title must be at most {MAX_TITLE_CHARS} characters"),
            ));
        }
        if self.category.is_none() {
            errors.push(FieldError::new("category", "Choose a category"));
        }
        if self.condition.is_none() {
            errors.push(FieldError::new("condition", "Choose a condition"));
        }
        if self.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
            errors.push(FieldError::new(
                "description",
                format!("Description needs at least {MIN_DESCRIPTION_CHARS} characters"),
            ));
        }
        errors
    }
}

impl Dimensions {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for (field, value, required) in [
            ("width", self.width, true),
            ("height", self.height, true),
            ("depth", self.depth, false),
        ] {
            match value {
                None if required => errors.push(FieldError::new(field, "Required")),
                Some(v) if !(v.is_finite() && v > 0.0) => {
                    errors.push(FieldError::new(field, "Must be greater than zero"))
                }
                _ => {}
            }
        }
        errors
    }
}

impl Pricing {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match self.price {
            None | Some(0) => errors.push(FieldError::new("price", "Enter a price")),
            Some(price) => {
                if self.original_price.is_some_and(|original| original < price) {
                    errors.push(FieldError::new(
                        "original_price",
                        "Original price cannot be below the asking price",
                    ));
                }
            }
        }
        errors
    }
}

impl Address {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.city.trim().is_empty() {
            errors.push(FieldError::new("city", "City is required"));
        }
        if !is_digits(self.postal_code.trim(), POSTAL_CODE_DIGITS) {
            errors.push(FieldError::new(
                "postal_code",
                format!("Postal code must be {POSTAL_CODE_DIGITS} digits"),
            ));
        }
        errors
    }
}

impl ContactInfo {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }

        let phone = self.phone.trim();
        let email = self.email.trim();
        if phone.is_empty() && email.is_empty() {
            errors.push(FieldError::new("phone", "Add a phone number or email"));
        }
        if !phone.is_empty() && !is_digits(phone, PHONE_DIGITS) {
            errors.push(FieldError::new(
                "phone",
                format!("Phone must be {PHONE_DIGITS} digits"),
            ));
        }
        if !email.is_empty() && !looks_like_email(email) {
            errors.push(FieldError::new("email", "Enter a valid email"));
        }
        match self.preferred {
            ContactMethod::Phone if phone.is_empty() => {
                errors.push(FieldError::new("preferred", "No phone number to contact"))
            }
            ContactMethod::Email if email.is_empty() => {
                errors.push(FieldError::new("preferred", "No email to contact"))
            }
            _ => {}
        }
        errors
    }
}

impl DeliveryOptions {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !self.pickup && !self.delivery {
            errors.push(FieldError::new(
                "delivery",
                "Offer pickup, delivery, or both",
            ));
        }
        errors
    }
}

// =============================================================================
// ListingDraft - the wizard state machine
// =============================================================================

/// A completed listing produced by [`ListingDraft::submit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: String,
    pub details: ListingDetails,
    pub dimensions: Dimensions,
    pub pricing: Pricing,
    pub address: Address,
    pub contact: ContactInfo,
    pub delivery: DeliveryOptions,
    pub created_at: Timestamp,
}

/// State of the multi-step "create listing" form.
///
/// Each field group has its own update function; there is no string-keyed
/// setter. Moving forward requires the current step to validate, moving
/// back never does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDraft {
    step: Option<WizardStep>,
    details: ListingDetails,
    dimensions: Dimensions,
    pricing: Pricing,
    address: Address,
    contact: ContactInfo,
    delivery: DeliveryOptions,
}

impl ListingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill contact details from the signed-in user.
    pub fn for_seller(name: &str, email: &str) -> Self {
        let mut draft = Self::new();
        draft.update_contact(|c| {
            c.name = name.to_string();
            c.email = email.to_string();
        });
        draft
    }

    pub fn step(&self) -> WizardStep {
        self.step.unwrap_or(WizardStep::Details)
    }

    pub fn details(&self) -> &ListingDetails {
        &self.details
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn delivery(&self) -> &DeliveryOptions {
        &self.delivery
    }

    // ===== Per-group updates =====

    pub fn update_details(&mut self, f: impl FnOnce(&mut ListingDetails)) {
        f(&mut self.details);
    }

    pub fn update_dimensions(&mut self, f: impl FnOnce(&mut Dimensions)) {
        f(&mut self.dimensions);
    }

    pub fn update_pricing(&mut self, f: impl FnOnce(&mut Pricing)) {
        f(&mut self.pricing);
    }

    pub fn update_address(&mut self, f: impl FnOnce(&mut Address)) {
        f(&mut self.address);
    }

    pub fn update_contact(&mut self, f: impl FnOnce(&mut ContactInfo)) {
        f(&mut self.contact);
    }

    pub fn update_delivery(&mut self, f: impl FnOnce(&mut DeliveryOptions)) {
        f(&mut self.delivery);
        if !self.delivery.delivery {
            self.delivery.delivery_fee = None;
        }
    }

    // ===== Transitions =====

    pub fn validate(&self, step: WizardStep) -> Vec<FieldError> {
        match step {
            WizardStep::Details => self.details.validate(),
            WizardStep::Dimensions => self.dimensions.validate(),
            WizardStep::Pricing => self.pricing.validate(),
            WizardStep::Location => self.address.validate(),
            WizardStep::Contact => self.contact.validate(),
            WizardStep::Delivery => self.delivery.validate(),
            WizardStep::Review => Vec::new(),
        }
    }

    fn check(&self, step: WizardStep) -> Result<(), WizardError> {
        let errors = self.validate(step);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(WizardError::Invalid { step, errors })
        }
    }

    /// Advance one step if the current one is valid.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        let current = self.step();
        self.check(current)?;
        let next = current.next().ok_or(WizardError::AtEnd)?;
        self.step = Some(next);
        Ok(next)
    }

    /// Go back one step; stays on the first step.
    pub fn back(&mut self) -> WizardStep {
        let prev = self.step().prev().unwrap_or(WizardStep::Details);
        self.step = Some(prev);
        prev
    }

    /// Jump to a step. Backwards is always allowed; forwards requires every
    /// step before the target to be valid.
    pub fn go_to(&mut self, target: WizardStep) -> Result<WizardStep, WizardError> {
        if target > self.step() {
            for step in WizardStep::ALL.iter().take(target.index()) {
                self.check(*step)?;
            }
        }
        self.step = Some(target);
        Ok(target)
    }

    /// Validate every step and produce the listing.
    pub fn submit(&self, now: Timestamp) -> Result<Listing, WizardError> {
        for step in WizardStep::ALL {
            self.check(step)?;
        }

        let mut details = self.details.clone();
        details.title = details.title.trim().to_string();
        details.description = details.description.trim().to_string();

        Ok(Listing {
            id: format!("listing-{}", Uuid::new_v4()),
            details,
            dimensions: self.dimensions.clone(),
            pricing: self.pricing.clone(),
            address: self.address.clone(),
            contact: self.contact.clone(),
            delivery: self.delivery.clone(),
            created_at: now,
        })
    }
}
