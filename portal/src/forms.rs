//! Local validation for everything the user submits. Each builder returns the
//! request body only when the input is acceptable, so nothing reaches the
//! network before these checks pass.

use api_types::{
    AmcInquiryRequest, AmcPlan, AmcServiceRequest, AmcSubscription, ChangePasswordRequest,
    NewServiceTicket, RefundRequest, UpdateProfileRequest, UserProfile,
};
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::display;

pub const SERVICE_TYPES: [&str; 4] = [
    "Service Request",
    "Filter Change",
    "Installation",
    "Other Issue",
];
pub const SERVICE_PRIORITY: &str = "Medium";
pub const AMC_INQUIRY_KIND: &str = "AMC Inquiry";
pub const DEFAULT_SERVICE_NOTE: &str = "Service requested";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Please enter your email and password")]
    MissingCredentials,
    #[error("Please describe the issue")]
    MissingDescription,
    #[error("Please tell us why you want a refund")]
    MissingRefundReason,
    #[error("Please enter your current and new password")]
    MissingPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("All service visits have been used. Please renew your AMC.")]
    NoServicesRemaining,
    #[error("This AMC has expired. Please renew it to request a service.")]
    AmcExpired,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(FormError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequestData {
    pub kind: String,
    pub issue: String,
    pub address: String,
    pub preferred_date: Option<NaiveDate>,
    pub phone: String,
}

impl ServiceRequestData {
    /// Empty request prefilled with the contact details on the profile.
    pub fn for_user(user: Option<&UserProfile>) -> Self {
        ServiceRequestData {
            kind: SERVICE_TYPES[0].to_owned(),
            issue: String::new(),
            address: user
                .and_then(UserProfile::primary_address)
                .unwrap_or_default()
                .to_owned(),
            preferred_date: None,
            phone: user
                .and_then(|user| user.phone.clone())
                .unwrap_or_default(),
        }
    }

    /// Clears what describes this particular request, keeping contact
    /// details for the next one.
    pub fn reset_message(&mut self) {
        self.issue.clear();
        self.preferred_date = None;
    }

    pub fn to_ticket(&self, now: DateTime<Utc>) -> Result<NewServiceTicket, FormError> {
        let issue = self.issue.trim();
        if issue.is_empty() {
            return Err(FormError::MissingDescription);
        }
        let preferred_date = self
            .preferred_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "As soon as possible".to_owned());
        let description = format!(
            "Issue: {issue}\nAddress: {address}\nPreferred Date: {preferred_date}\nPhone: {phone}",
            address = self.address.trim(),
            phone = self.phone.trim(),
        );
        Ok(NewServiceTicket {
            kind: self.kind.clone(),
            description,
            date: now,
            priority: SERVICE_PRIORITY.to_owned(),
        })
    }
}

pub fn refund_request(reason: &str) -> Result<RefundRequest, FormError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(FormError::MissingRefundReason);
    }
    Ok(RefundRequest {
        reason: reason.to_owned(),
    })
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PasswordChangeData {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChangeData {
    pub fn to_request(&self) -> Result<ChangePasswordRequest, FormError> {
        if self.current_password.is_empty() || self.new_password.is_empty() {
            return Err(FormError::MissingPassword);
        }
        if self.new_password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileData {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl ProfileData {
    pub fn from_user(user: &UserProfile) -> Self {
        ProfileData {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    pub fn to_request(&self) -> UpdateProfileRequest {
        UpdateProfileRequest {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
        }
    }
}

/// Refuses visits the AMC no longer covers; blank notes get the default.
pub fn amc_service_request(
    amc: &AmcSubscription,
    notes: &str,
) -> Result<AmcServiceRequest, FormError> {
    if amc.is_expired() {
        return Err(FormError::AmcExpired);
    }
    if amc.services_remaining <= 0 {
        return Err(FormError::NoServicesRemaining);
    }
    let notes = match notes.trim() {
        "" => DEFAULT_SERVICE_NOTE,
        notes => notes,
    };
    Ok(AmcServiceRequest {
        notes: notes.to_owned(),
    })
}

pub fn amc_inquiry(plan: &AmcPlan, now: DateTime<Utc>) -> AmcInquiryRequest {
    AmcInquiryRequest {
        kind: AMC_INQUIRY_KIND.to_owned(),
        notes: format!(
            "User is interested in purchasing the AMC Plan: {} (Price: {}, Duration: {} months).",
            plan.name,
            display::rupees(plan.price),
            plan.duration_months
        ),
        date: now,
    }
}

#[cfg(test)]
mod tests {
    use api_types::Address;
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn blank_credentials_are_not_submitted() {
        let credentials = Credentials {
            email: "  ".to_owned(),
            password: "pw".to_owned(),
        };
        assert_eq!(credentials.validate(), Err(FormError::MissingCredentials));
        let credentials = Credentials {
            email: "a@example.com".to_owned(),
            password: String::new(),
        };
        assert_eq!(credentials.validate(), Err(FormError::MissingCredentials));
    }

    #[test]
    fn service_request_requires_a_description() {
        let mut data = ServiceRequestData::for_user(None);
        assert_eq!(data.to_ticket(now()), Err(FormError::MissingDescription));
        data.issue = " \n\t ".to_owned();
        assert_eq!(data.to_ticket(now()), Err(FormError::MissingDescription));
    }

    #[test]
    fn service_ticket_embeds_contact_details() {
        let user = UserProfile {
            phone: Some("9876543210".to_owned()),
            addresses: vec![Address {
                address_line1: Some("12 MG Road".to_owned()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut data = ServiceRequestData::for_user(Some(&user));
        data.kind = "Filter Change".to_owned();
        data.issue = "Water tastes odd".to_owned();

        let ticket = data.to_ticket(now()).unwrap();
        assert_eq!(ticket.kind, "Filter Change");
        assert_eq!(ticket.priority, "Medium");
        assert_eq!(
            ticket.description,
            "Issue: Water tastes odd\nAddress: 12 MG Road\nPreferred Date: As soon as possible\nPhone: 9876543210"
        );

        data.preferred_date = NaiveDate::from_ymd_opt(2025, 6, 3);
        let ticket = data.to_ticket(now()).unwrap();
        assert!(ticket.description.contains("Preferred Date: 2025-06-03"));

        data.reset_message();
        assert!(data.issue.is_empty());
        assert_eq!(data.phone, "9876543210");
    }

    #[test]
    fn refund_needs_a_reason() {
        assert_eq!(refund_request("   "), Err(FormError::MissingRefundReason));
        assert_eq!(refund_request(" damaged ").unwrap().reason, "damaged");
    }

    #[test]
    fn password_confirmation_must_match() {
        let data = PasswordChangeData {
            current_password: "old".to_owned(),
            new_password: "new-one".to_owned(),
            confirm_password: "new-two".to_owned(),
        };
        assert_eq!(data.to_request(), Err(FormError::PasswordMismatch));
        assert_eq!(
            FormError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );

        let data = PasswordChangeData {
            confirm_password: "new-one".to_owned(),
            ..data
        };
        assert_eq!(data.to_request().unwrap().new_password, "new-one");
    }

    #[test]
    fn amc_service_request_is_refused_locally() {
        let expired = AmcSubscription {
            status: Some("Expired".to_owned()),
            services_remaining: 2,
            ..Default::default()
        };
        assert_eq!(
            amc_service_request(&expired, "noisy pump"),
            Err(FormError::AmcExpired)
        );

        let used_up = AmcSubscription {
            status: Some("Active".to_owned()),
            services_remaining: 0,
            ..Default::default()
        };
        assert_eq!(
            amc_service_request(&used_up, ""),
            Err(FormError::NoServicesRemaining)
        );

        let active = AmcSubscription {
            services_remaining: 1,
            ..used_up
        };
        assert_eq!(
            amc_service_request(&active, "  ").unwrap().notes,
            DEFAULT_SERVICE_NOTE
        );
    }

    #[test]
    fn inquiry_names_the_plan() {
        let plan = AmcPlan {
            id: "p1".to_owned(),
            name: "Gold".to_owned(),
            price: 4999.0,
            duration_months: 12,
            services_included: Some(4),
            parts_included: true,
            features: vec![],
            is_popular: false,
        };
        let inquiry = amc_inquiry(&plan, now());
        assert_eq!(inquiry.kind, "AMC Inquiry");
        assert_eq!(
            inquiry.notes,
            "User is interested in purchasing the AMC Plan: Gold (Price: ₹4,999, Duration: 12 months)."
        );
    }
}
