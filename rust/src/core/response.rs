// Файл: core/response.rs
// Результат одного завершённого запроса `HttpSession`.

use super::error::CoreError;
use super::json::{parse_json, parse_json_object};
use super::plist::{decode_plist_as, decode_plist_dictionary};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Полностью прочитанный ответ: статус и сырые байты тела.
///
/// Значение неизменяемо. Представления `text`, `json` и `plist` ничего
/// не кешируют и пересчитываются при каждом вызове.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status_code: u16,
    content: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status_code: u16, content: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code,
            content: content.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// `true` для любого статуса 2xx.
    pub fn ok(&self) -> bool {
        (200..=299).contains(&self.status_code)
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Тело как строка UTF-8.
    pub fn text(&self) -> Result<String, CoreError> {
        Ok(std::str::from_utf8(&self.content)?.to_owned())
    }

    /// Тело как JSON-объект.
    pub fn json(&self) -> Result<Map<String, Value>, CoreError> {
        parse_json_object(&self.text()?, "HttpResponse::json")
    }

    /// Тело как JSON, разобранный в пользовательский тип.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T, CoreError> {
        parse_json(&self.text()?, "HttpResponse::json_as")
    }

    /// Тело как plist-словарь. Заголовок XML дописывается, если его нет.
    pub fn plist(&self) -> Result<plist::Dictionary, CoreError> {
        decode_plist_dictionary(&self.content)
    }

    pub fn plist_as<T: DeserializeOwned>(&self) -> Result<T, CoreError> {
        decode_plist_as(&self.content)
    }
}
