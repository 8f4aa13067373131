//! bulkdns Domain Layer
pub mod answer;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod input;
pub mod resolution;
pub mod response;

pub use answer::{AnswerParser, AnswerRecord, AnswerSection, ParsedAnswer};
pub use config::{
    AttemptCap, CliOverrides, Config, ConfigError, RetryPolicy, RotationPolicy,
};
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use input::InputLine;
pub use resolution::ResolutionResult;
pub use response::{DnsResponse, ResponseCode};
