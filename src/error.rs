//! Error types for the homework status bot.
//!
//! Each variant carries a stable error code (SCREAMING_SNAKE_CASE) that is
//! included in the Display output and accessible via [`BotError::code()`].
//! Display texts are in Russian because they are forwarded verbatim to the
//! chat recipient when a cycle fails.

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// A required credential or recipient identifier is missing.
    pub const CONFIGURATION_MISSING: &str = "CONFIGURATION_MISSING";

    /// Settings file or HTTP client setup is invalid.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    /// The status endpoint could not be reached at all.
    pub const ENDPOINT_UNREACHABLE: &str = "ENDPOINT_UNREACHABLE";

    /// The status endpoint answered with a non-200 status.
    pub const ENDPOINT_ERROR: &str = "ENDPOINT_ERROR";

    /// The payload does not have the documented shape.
    pub const MALFORMED_RESPONSE: &str = "MALFORMED_RESPONSE";

    /// A required key is absent from the payload.
    pub const MISSING_KEY: &str = "MISSING_KEY";

    /// The `homeworks` list is empty.
    pub const EMPTY_WORK_LIST: &str = "EMPTY_WORK_LIST";

    /// The work item status is not in the verdict table.
    pub const UNRECOGNIZED_STATUS: &str = "UNRECOGNIZED_STATUS";

    /// The chat message could not be delivered.
    pub const DELIVERY_FAILED: &str = "DELIVERY_FAILED";

    /// Local I/O failure (log file, settings file).
    pub const IO_ERROR: &str = "IO_ERROR";
}

/// Errors produced by the bot.
///
/// The Display impl formats as `[CODE] message`.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// One or more required environment variables are absent or blank.
    #[error(
        "[{}] Отсутствие обязательных переменных окружения: {}",
        error_codes::CONFIGURATION_MISSING,
        .0.join(", ")
    )]
    ConfigurationMissing(Vec<String>),

    /// Invalid settings file or client configuration.
    #[error("[{}] Ошибка конфигурации: {}", error_codes::CONFIG_INVALID, .0)]
    Config(String),

    /// Transport failure (DNS, refused connection, timeout).
    #[error("[{}] Недоступность эндпоинта: {}", error_codes::ENDPOINT_UNREACHABLE, .0)]
    EndpointUnreachable(String),

    /// Endpoint responded with a status other than 200.
    #[error(
        "[{}] Сбои при запросе к эндпоинту: HTTP {status}",
        error_codes::ENDPOINT_ERROR
    )]
    EndpointError {
        /// HTTP status code returned by the endpoint.
        status: u16,
    },

    /// Payload shape violation.
    #[error("[{}] Ответ API не соответствует документации: {}", error_codes::MALFORMED_RESPONSE, .0)]
    MalformedResponse(String),

    /// Required key absent from the payload.
    #[error("[{}] Отсутствие ожидаемого ключа в ответе API: {}", error_codes::MISSING_KEY, .0)]
    MissingKey(String),

    /// No work items in the response.
    #[error("[{}] Список домашних работ пуст", error_codes::EMPTY_WORK_LIST)]
    EmptyWorkList,

    /// Status code outside the verdict table.
    #[error("[{}] Неожиданный статус домашней работы: {}", error_codes::UNRECOGNIZED_STATUS, .0)]
    UnrecognizedStatus(String),

    /// Chat transport refused or failed to deliver a message.
    #[error("[{}] Сбой при отправке сообщения в Telegram: {}", error_codes::DELIVERY_FAILED, .0)]
    DeliveryFailed(String),

    /// I/O error.
    #[error("[{}] Ошибка ввода-вывода: {}", error_codes::IO_ERROR, .0)]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing(_) => error_codes::CONFIGURATION_MISSING,
            Self::Config(_) => error_codes::CONFIG_INVALID,
            Self::EndpointUnreachable(_) => error_codes::ENDPOINT_UNREACHABLE,
            Self::EndpointError { .. } => error_codes::ENDPOINT_ERROR,
            Self::MalformedResponse(_) => error_codes::MALFORMED_RESPONSE,
            Self::MissingKey(_) => error_codes::MISSING_KEY,
            Self::EmptyWorkList => error_codes::EMPTY_WORK_LIST,
            Self::UnrecognizedStatus(_) => error_codes::UNRECOGNIZED_STATUS,
            Self::DeliveryFailed(_) => error_codes::DELIVERY_FAILED,
            Self::Io(_) => error_codes::IO_ERROR,
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, BotError>;
