// Файл: core/json.rs
// Хелперы для разбора JSON-тела ответа.

use super::error::CoreError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Разбирает JSON в произвольный тип.
/// @param text Сырой текст ответа.
/// @param context Контекст для логирования (например, URL запроса).
pub fn parse_json<T: DeserializeOwned>(text: &str, context: &str) -> Result<T, CoreError> {
    serde_json::from_str(text).map_err(|e| {
        log::warn!("Failed to parse JSON for {}: {}", context, e);
        CoreError::from(e)
    })
}

/// Разбирает JSON, верхний уровень которого обязан быть объектом.
/// Массив или скаляр на верхнем уровне отклоняет сам serde_json.
pub fn parse_json_object(text: &str, context: &str) -> Result<Map<String, Value>, CoreError> {
    parse_json::<Map<String, Value>>(text, context)
}
