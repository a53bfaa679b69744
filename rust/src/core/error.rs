// Файл: core/error.rs
// Единый тип ошибок HTTP-хелпера.

use thiserror::Error;

// --- 1. Внутренняя ошибка (CoreError) ---

#[derive(Debug, Error)]
pub enum CoreError {
    // Сеть, таймаут, DNS, а также ошибка сборки клиента
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Invalid headers or header JSON: {0}")]
    InvalidHeader(String),

    #[error("Response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Failed to parse JSON response or payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to parse plist response: {0}")]
    Plist(#[from] plist::Error),

    // Не ошибка данных сервера, а нарушение контракта вызывающего кода
    #[error("Unknown Plist-encoded data type: {0}. This is a bug, please report it.")]
    UnexpectedPlistType(String),
}

// --- 2. Грубая классификация ---

/// Категория ошибки: транспорт, декодирование тела или нарушение контракта.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Decode,
    Contract,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // Всё, что мешает отправить запрос или получить ответ
            CoreError::Network(_)
            | CoreError::UrlParse(_)
            | CoreError::InvalidMethod(_)
            | CoreError::InvalidHeader(_) => ErrorKind::Transport,

            CoreError::Utf8(_) | CoreError::Parse(_) | CoreError::Plist(_) => ErrorKind::Decode,

            CoreError::UnexpectedPlistType(_) => ErrorKind::Contract,
        }
    }
}
