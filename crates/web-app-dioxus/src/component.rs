pub mod element;
pub mod form;
pub mod navbar;
pub mod notification_panel;
