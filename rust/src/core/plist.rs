// Файл: core/plist.rs
// Декодирование Apple property list, включая фрагменты без XML-заголовка.

use super::error::CoreError;
use plist::{Dictionary, Value};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::io::Cursor;

/// Заголовок, который дописывается к "голым" фрагментам `<plist>...</plist>`.
pub const PLIST_HEADER: &[u8] = b"<?xml version='1.0' encoding='UTF-8'?>\
<!DOCTYPE plist PUBLIC '-//Apple//DTD PLIST 1.0//EN' 'http://www.apple.com/DTDs/PropertyList-1.0.dtd'>";

const XML_DECLARATION_PREFIX: &[u8] = b"<?xml";

// Некоторые серверы отдают plist без декларации; копируем только в этом случае.
fn with_header(data: &[u8]) -> Cow<'_, [u8]> {
    if data.starts_with(XML_DECLARATION_PREFIX) {
        return Cow::Borrowed(data);
    }

    let mut buf = Vec::with_capacity(PLIST_HEADER.len() + data.len());
    buf.extend_from_slice(PLIST_HEADER);
    buf.extend_from_slice(data);
    Cow::Owned(buf)
}

/// Декодирует plist в произвольное значение (словарь, массив, скаляр).
pub fn decode_plist(data: &[u8]) -> Result<Value, CoreError> {
    let data = with_header(data);
    Ok(Value::from_reader(Cursor::new(data.as_ref()))?)
}

/// Декодирует plist сразу в пользовательский тип через serde.
pub fn decode_plist_as<T: DeserializeOwned>(data: &[u8]) -> Result<T, CoreError> {
    let data = with_header(data);
    Ok(plist::from_bytes::<T>(&data)?)
}

// Только имя типа: само значение может быть очень большим.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "Array",
        Value::Dictionary(_) => "Dictionary",
        Value::Boolean(_) => "Boolean",
        Value::Data(_) => "Data",
        Value::Date(_) => "Date",
        Value::Real(_) => "Real",
        Value::Integer(_) => "Integer",
        Value::String(_) => "String",
        Value::Uid(_) => "Uid",
        _ => "Unknown",
    }
}

/// Декодирует plist, верхний уровень которого обязан быть словарём.
pub fn decode_plist_dictionary(data: &[u8]) -> Result<Dictionary, CoreError> {
    match decode_plist(data)? {
        Value::Dictionary(dict) => Ok(dict),
        other => Err(CoreError::UnexpectedPlistType(type_name(&other).to_string())),
    }
}
