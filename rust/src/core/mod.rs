// Файл: core/mod.rs
// Сессия, ответ и хелперы декодирования.

pub mod error;
pub mod http;
pub mod json;
pub mod plist;
pub mod response;
