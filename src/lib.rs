//! Homework status bot: polls a homework-review API and forwards status
//! changes to a Telegram chat.
//!
//! # Architecture
//!
//! One sequential loop, repeated on a fixed interval:
//! - **Endpoint client** ([`practicum`]): `GET` statuses since the cursor
//! - **Validation** ([`homework::check_response`]): enforce the payload shape
//! - **Translation** ([`homework::parse_status`]): status code → verdict text
//! - **Notification** ([`channels::Notifier`]): deliver text to the recipient
//!
//! Every failure inside a cycle is logged, reported to the recipient and
//! followed by the usual sleep. Only missing configuration stops the process.

pub mod channels;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod homework;
pub mod poller;
pub mod practicum;

pub use config::{BotConfig, Credentials};
pub use error::{BotError, Result};
pub use homework::HomeworkStatus;
pub use poller::Poller;
