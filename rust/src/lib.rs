//! Внутренний асинхронный HTTP-хелпер: одна ленивая сессия на менеджер
//! и декодирование тела ответа как текста, JSON или plist.

pub mod core;

pub use crate::core::error::{CoreError, ErrorKind};
pub use crate::core::http::{BasicAuth, HttpSession, RequestOptions};
pub use crate::core::plist::{decode_plist, PLIST_HEADER};
pub use crate::core::response::HttpResponse;

/// Подключает `env_logger`. Повторный вызов ничего не делает.
pub fn init_logger() {
    let _ = env_logger::try_init();
}
