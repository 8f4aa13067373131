use super::AnswerSection;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Other(u16),
}

impl ResponseCode {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::NoError,
            1 => Self::FormErr,
            2 => Self::ServFail,
            3 => Self::NXDomain,
            4 => Self::NotImp,
            5 => Self::Refused,
            other => Self::Other(other),
        }
    }

    pub fn is_success(&self) -> bool {
        *self == Self::NoError
    }

    /// Codes that say the server itself is unusable, as opposed to an
    /// authoritative negative answer.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ServFail | Self::Refused | Self::NotImp)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoError => f.write_str("NOERROR"),
            Self::FormErr => f.write_str("FORMERR"),
            Self::ServFail => f.write_str("SERVFAIL"),
            Self::NXDomain => f.write_str("NXDOMAIN"),
            Self::NotImp => f.write_str("NOTIMP"),
            Self::Refused => f.write_str("REFUSED"),
            Self::Other(code) => write!(f, "RCODE{}", code),
        }
    }
}

/// A decoded upstream response, reduced to what the resolver inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResponse {
    pub rcode: ResponseCode,
    pub answers: AnswerSection,
    pub truncated: bool,
}

impl DnsResponse {
    pub fn new(rcode: ResponseCode, answers: AnswerSection) -> Self {
        Self {
            rcode,
            answers,
            truncated: false,
        }
    }

    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }
}
