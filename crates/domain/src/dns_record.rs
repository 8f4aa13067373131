use std::fmt;
use std::str::FromStr;

/// Record types the bulk resolver asks for or has to recognise in answers.
///
/// Forward lookups query `A` (CNAME chains come back inside the same answer),
/// reverse lookups query `PTR`. Anything else seen in an answer section is
/// carried as `Other` with its wire code so the parser can skip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    CNAME,
    PTR,
    Other(u16),
}

impl RecordType {
    /// Convert from wire format number.
    pub fn from_u16(value: u16) -> Self {
        match value {
            1 => RecordType::A,
            5 => RecordType::CNAME,
            12 => RecordType::PTR,
            other => RecordType::Other(other),
        }
    }

    /// Convert to wire format number.
    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::CNAME => 5,
            RecordType::PTR => 12,
            RecordType::Other(code) => *code,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::A => f.write_str("A"),
            RecordType::CNAME => f.write_str("CNAME"),
            RecordType::PTR => f.write_str("PTR"),
            RecordType::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        match upper.as_str() {
            "A" => Ok(RecordType::A),
            "CNAME" => Ok(RecordType::CNAME),
            "PTR" => Ok(RecordType::PTR),
            // Types that show up next to A/CNAME in presentation output.
            "NS" => Ok(RecordType::Other(2)),
            "SOA" => Ok(RecordType::Other(6)),
            "MX" => Ok(RecordType::Other(15)),
            "TXT" => Ok(RecordType::Other(16)),
            "AAAA" => Ok(RecordType::Other(28)),
            "DNAME" => Ok(RecordType::Other(39)),
            "RRSIG" => Ok(RecordType::Other(46)),
            _ => upper
                .strip_prefix("TYPE")
                .and_then(|code| code.parse::<u16>().ok())
                .map(RecordType::from_u16)
                .ok_or_else(|| format!("Invalid record type: {}", s)),
        }
    }
}
