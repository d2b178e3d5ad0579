pub mod flash;
pub mod i18n;
pub mod item_id;
