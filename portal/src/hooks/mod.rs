pub mod use_fetch;
pub mod use_unread_count;
