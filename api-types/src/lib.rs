use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Server-owned profile. Fields the portal does not know about are kept in
/// `extra` so that a cached copy round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            "User".to_owned()
        } else {
            full.to_owned()
        }
    }

    pub fn initial(&self) -> char {
        self.first_name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }

    pub fn primary_address(&self) -> Option<&str> {
        self.addresses
            .first()
            .and_then(|address| address.address_line1.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// Auth and profile

#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignInResponse {
    pub user: UserProfile,
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// Dashboard

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    #[serde(default)]
    pub stats: Option<DashboardStats>,
    #[serde(default)]
    pub amc: Option<CoverageCard>,
    #[serde(default)]
    pub rental: Option<CoverageCard>,
    #[serde(default)]
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub active_orders: u32,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub total_orders: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageCard {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Order,
    Service,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    #[serde(rename = "type", default)]
    pub kind: ActivityKind,
    #[serde(default)]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}

// Orders

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    #[serde(default)]
    pub main_image: Option<ProductImage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub product_price: Option<f64>,
    #[serde(default)]
    pub product: Option<ProductRef>,
}

fn default_quantity() -> u32 {
    1
}

impl OrderItem {
    pub fn image_url(&self) -> Option<&str> {
        self.product
            .as_ref()
            .and_then(|product| product.main_image.as_ref())
            .map(|image| image.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, EnumString, AsRefStr, Display)]
#[strum(ascii_case_insensitive)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub subtotal: Option<f64>,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl Order {
    /// Unknown or missing statuses read as pending.
    pub fn status(&self) -> OrderStatus {
        self.status
            .as_deref()
            .and_then(|status| status.parse().ok())
            .unwrap_or_default()
    }

    /// Last six characters of the id, upper-cased.
    pub fn short_id(&self) -> String {
        let start = self.id.len().saturating_sub(6);
        self.id.get(start..).unwrap_or(&self.id).to_uppercase()
    }

    pub fn item_names(&self) -> String {
        self.items
            .iter()
            .map(|item| item.product_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn counts_towards_spending(&self) -> bool {
        !matches!(
            self.status(),
            OrderStatus::Cancelled | OrderStatus::Returned | OrderStatus::Failed
        )
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self.status(), OrderStatus::Pending | OrderStatus::Confirmed)
    }

    pub fn can_request_refund(&self) -> bool {
        self.status() == OrderStatus::Delivered
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderResponse {
    #[serde(default)]
    pub order: Option<Order>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefundRequest {
    pub reason: String,
}

// Rentals and AMC

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub machine_model: Option<String>,
    #[serde(default)]
    pub machine_image: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub next_due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RentalResponse {
    #[serde(default)]
    pub rental: Option<Rental>,
    #[serde(default)]
    pub amc: Option<AmcSubscription>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmcPlan {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub duration_months: u32,
    #[serde(default)]
    pub services_included: Option<u32>,
    #[serde(default)]
    pub parts_included: bool,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AmcPlansResponse {
    #[serde(default)]
    pub plans: Vec<AmcPlan>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceVisit {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub technician_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmcSubscription {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub amc_plan_name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub days_remaining: Option<i64>,
    #[serde(default)]
    pub duration_months: Option<u32>,
    #[serde(default)]
    pub services_used: u32,
    #[serde(default)]
    pub services_total: u32,
    #[serde(default)]
    pub services_remaining: i64,
    #[serde(default)]
    pub progress_percent: f64,
    #[serde(default)]
    pub parts_included: bool,
    #[serde(default)]
    pub service_history: Vec<ServiceVisit>,
}

impl AmcSubscription {
    pub fn is_expired(&self) -> bool {
        self.status.as_deref() == Some("Expired")
    }

    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("Active")
    }

    pub fn display_plan_name(&self) -> &str {
        self.amc_plan_name
            .as_deref()
            .or(self.plan_name.as_deref())
            .unwrap_or("AMC Plan")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SubscriptionsResponse {
    #[serde(default)]
    pub amc: Vec<AmcSubscription>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MyAmcsResponse {
    #[serde(default)]
    pub amcs: Vec<AmcSubscription>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmcSummary {
    #[serde(default)]
    pub active_amcs: u32,
    #[serde(default)]
    pub expired_amcs: u32,
    #[serde(default)]
    pub total_services_used: u32,
    #[serde(default)]
    pub upcoming_expiry: Vec<AmcSubscription>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AmcSummaryResponse {
    #[serde(default)]
    pub summary: Option<AmcSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmcServiceRequest {
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmcInquiryRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub notes: String,
    pub date: DateTime<Utc>,
}

// Service support

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTicket {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub ticket_id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_technician: Option<String>,
    #[serde(default)]
    pub resolution_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ServiceTicketsResponse {
    #[serde(default)]
    pub requests: Vec<ServiceTicket>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewServiceTicket {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub priority: String,
}

// Notifications

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ref_id: Option<String>,
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_keeps_unknown_fields() {
        let raw = r#"{"_id":"u1","firstName":"Asha","lastName":"Rao","email":"asha@example.com","role":"customer"}"#;
        let profile: UserProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.first_name, "Asha");
        assert_eq!(profile.extra.get("role"), Some(&Value::from("customer")));

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["role"], "customer");
        assert_eq!(back["_id"], "u1");
    }

    #[test]
    fn profile_display_helpers() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.display_name(), "User");
        assert_eq!(profile.initial(), 'U');

        profile.first_name = "ravi".to_owned();
        assert_eq!(profile.display_name(), "ravi");
        assert_eq!(profile.initial(), 'R');
    }

    #[test]
    fn order_status_parsing_is_lenient() {
        let raw = r#"{"_id":"65f1c2a9e4b0a1b2c3d4e5f6","status":"delivered","createdAt":"2024-03-01T10:00:00.000Z","items":[{"productName":"RO Alpha"},{"productName":"Filter"}],"total":1500}"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
        assert_eq!(order.short_id(), "D4E5F6");
        assert_eq!(order.item_names(), "RO Alpha, Filter");
        assert_eq!(order.items[0].quantity, 1);
        assert!(order.can_request_refund());
        assert!(!order.can_cancel());

        let mut unknown = order.clone();
        unknown.status = Some("on-hold".to_owned());
        assert_eq!(unknown.status(), OrderStatus::Pending);
        assert!(unknown.can_cancel());
    }

    #[test]
    fn cancelled_orders_do_not_count_towards_spending() {
        let raw = r#"{"_id":"abc","status":"Cancelled","createdAt":"2024-03-01T10:00:00Z"}"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert!(!order.counts_towards_spending());
        assert_eq!(order.short_id(), "ABC");
    }

    #[test]
    fn activity_kind_tolerates_unknown_types() {
        let raw = r#"[{"type":"order","refId":"o1","title":"Order placed"},{"type":"payment","title":"Paid"}]"#;
        let items: Vec<ActivityItem> = serde_json::from_str(raw).unwrap();
        assert_eq!(items[0].kind, ActivityKind::Order);
        assert_eq!(items[1].kind, ActivityKind::Other);
    }

    #[test]
    fn counts_unread_notifications() {
        let raw = r#"[{"_id":"1","title":"a","isRead":true},{"_id":"2","title":"b"},{"_id":"3","title":"c","isRead":false}]"#;
        let notifications: Vec<Notification> = serde_json::from_str(raw).unwrap();
        assert_eq!(unread_count(&notifications), 2);
    }

    #[test]
    fn service_ticket_serializes_type_field() {
        let ticket = NewServiceTicket {
            kind: "Filter Change".to_owned(),
            description: "Issue: slow flow".to_owned(),
            date: DateTime::parse_from_rfc3339("2024-05-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            priority: "Medium".to_owned(),
        };
        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["type"], "Filter Change");
        assert_eq!(value["priority"], "Medium");
    }
}
