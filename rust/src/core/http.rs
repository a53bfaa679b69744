// Файл: core/http.rs
// Асинхронный менеджер HTTP-сессии. Только для внутреннего использования.

use super::error::CoreError;
use super::response::HttpResponse;
use log::debug;
use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client, Method,
};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

const APP_USER_AGENT: &str = "findmy-http/0.1";
// Общий таймаут на весь запрос, не настраивается per-call
const DEFAULT_TIMEOUT_SEC: u64 = 5;

/// Логин и пароль для HTTP Basic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone)]
enum RequestBody {
    Bytes(Vec<u8>),
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

/// Дополнительные параметры запроса, передаваемые транспорту как есть.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    auth: Option<BasicAuth>,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(BasicAuth::new(username, password));
        self
    }

    pub fn auth(mut self, auth: Option<BasicAuth>) -> Self {
        self.auth = auth;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Заголовки из JSON-объекта вида `{"Name": "value"}`.
    /// Имена и значения проходят ту же валидацию, что и в `reqwest`.
    pub fn headers_json(mut self, headers_json: &str) -> Result<Self, CoreError> {
        let headers_map: HashMap<String, String> = serde_json::from_str(headers_json)
            .map_err(|e| CoreError::InvalidHeader(format!("Failed to parse JSON headers: {}", e)))?;

        for (k, v) in headers_map {
            let name = HeaderName::from_str(&k)
                .map_err(|e| CoreError::InvalidHeader(format!("Invalid header name ({}): {}", k, e)))?;
            let value = HeaderValue::from_str(&v)
                .map_err(|e| CoreError::InvalidHeader(format!("Invalid header value for {}: {}", k, e)))?;
            self.headers.append(name, value);
        }

        Ok(self)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    // Тело задаётся одним из трёх способов; последний вызов побеждает.

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(RequestBody::Bytes(body.into()));
        self
    }

    pub fn json(mut self, json: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(json));
        self
    }

    pub fn form(mut self, form: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(form));
        self
    }

    fn apply(self, mut builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(auth) = self.auth {
            builder = builder.basic_auth(auth.username, Some(auth.password));
        }
        if !self.headers.is_empty() {
            builder = builder.headers(self.headers);
        }
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        match self.body {
            Some(RequestBody::Bytes(bytes)) => builder.body(bytes),
            Some(RequestBody::Json(json)) => builder.json(&json),
            Some(RequestBody::Form(form)) => builder.form(&form),
            None => builder,
        }
    }
}

/// Менеджер одной ленивой HTTP-сессии.
///
/// Сессия (`reqwest::Client`) создаётся при первом запросе и живёт до
/// `close()`, после чего может быть создана заново. Одновременно у менеджера
/// не больше одной живой сессии: ленивое создание идёт под мьютексом.
///
/// Поддерживаемый способ освобождения ресурсов - явный `close()`.
/// `Drop` освобождает незакрытую сессию по мере возможности.
///
/// Запросы, начатые до `close()`, держат свой клон клиента до завершения,
/// поэтому новый запрос сразу после `close()` может недолго жить рядом со
/// старым пулом соединений.
#[derive(Debug, Default)]
pub struct HttpSession {
    session: Mutex<Option<Client>>,
    default_headers: HeaderMap,
}

impl HttpSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Менеджер, чьи сессии отправляют `headers` с каждым запросом.
    pub fn with_headers(headers: HeaderMap) -> Self {
        Self {
            session: Mutex::new(None),
            default_headers: headers,
        }
    }

    fn build_client(&self) -> Result<Client, CoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(APP_USER_AGENT),
        );
        headers.extend(self.default_headers.clone());

        // Проверка TLS-сертификатов отключена намеренно
        let client = Client::builder()
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SEC))
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(client)
    }

    // Клиент дешево клонируется (Arc внутри), поэтому запросы не держат мьютекс.
    async fn client(&self) -> Result<Client, CoreError> {
        let mut guard = self.session.lock().await;
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        debug!("Creating HTTP session");
        let client = self.build_client()?;
        *guard = Some(client.clone());
        Ok(client)
    }

    /// Создаёт сессию, если её ещё нет. Повторный вызов ничего не делает.
    pub async fn ensure_session(&self) -> Result<(), CoreError> {
        self.client().await.map(|_| ())
    }

    pub async fn has_session(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Закрывает сессию. Должен вызываться, когда менеджер больше не нужен.
    /// Без открытой сессии ничего не делает.
    pub async fn close(&self) {
        if let Some(client) = self.session.lock().await.take() {
            debug!("Closing HTTP session");
            // Пул соединений освобождается вместе с последним клоном клиента
            drop(client);
        }
    }

    /// Выполняет HTTP-запрос и полностью читает тело ответа.
    ///
    /// Ответы 4xx/5xx не считаются ошибкой и возвращаются как есть.
    /// Ошибки сети и таймаут пробрасываются без повторов.
    pub async fn request(
        &self,
        method: &str,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, CoreError> {
        let url = Url::parse(url)?;
        // Метод в любом регистре уходит в сеть заглавными буквами
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map_err(|_| CoreError::InvalidMethod(method.to_string()))?;

        let client = self.client().await?;

        debug!("Executing request [{}]: {}", method, url);

        let builder = options.apply(client.request(method, url));
        let response = builder.send().await?;

        let status = response.status().as_u16();
        let content = response.bytes().await?;

        Ok(HttpResponse::new(status, content.to_vec()))
    }

    /// Синоним `request("GET", ...)`.
    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<HttpResponse, CoreError> {
        self.request("GET", url, options).await
    }

    /// Синоним `request("POST", ...)`.
    pub async fn post(&self, url: &str, options: RequestOptions) -> Result<HttpResponse, CoreError> {
        self.request("POST", url, options).await
    }
}

impl Drop for HttpSession {
    fn drop(&mut self) {
        // &mut self: блокировка не нужна, рантайм тоже
        if self.session.get_mut().take().is_some() {
            debug!("HTTP session dropped without close(), releasing it");
        }
    }
}
