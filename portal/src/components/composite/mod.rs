pub mod amc_card;
pub mod confirm_button;
pub mod layout;
pub mod login_form;
pub mod orders_table;
pub mod password_form;
pub mod plan_card;
pub mod profile_form;
pub mod refund_modal;
pub mod service_request_form;
