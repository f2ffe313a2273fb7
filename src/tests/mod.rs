pub mod support;
mod correction_tests;
mod views_tests;
mod lifecycle_tests;
mod notification_tests;
