pub mod input_date;
pub mod input_text;
pub mod notice;
pub mod select;
pub mod spinner;
pub mod status_badge;
pub mod text_area;
