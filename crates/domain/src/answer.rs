use super::{DomainError, RecordType};

const ANSWER_SECTION_MARKER: &str = ";; ANSWER SECTION:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub name: String,
    pub record_type: RecordType,
    pub value: String,
}

impl AnswerRecord {
    pub fn new(name: impl Into<String>, record_type: RecordType, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type,
            value: value.into(),
        }
    }
}

/// Answer records of one response, in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSection {
    records: Vec<AnswerRecord>,
}

impl AnswerSection {
    pub fn new(records: Vec<AnswerRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reads the `;; ANSWER SECTION:` block out of dig-style presentation
    /// text. The block ends at the first blank line or `;;` comment.
    ///
    /// Accepts both `name ttl class type value` and `name type value` rows.
    /// Returns `Ok(None)` when the text has no answer block at all.
    pub fn from_presentation(text: &str) -> Result<Option<Self>, DomainError> {
        let mut lines = text.lines();
        if !lines.any(|l| l.trim_start().starts_with(ANSWER_SECTION_MARKER)) {
            return Ok(None);
        }

        let mut records = Vec::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;") {
                break;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                return Err(DomainError::MalformedResponse(format!(
                    "answer row has too few fields: '{}'",
                    line
                )));
            }
            let record_type = fields[fields.len() - 2]
                .parse::<RecordType>()
                .map_err(DomainError::MalformedResponse)?;
            records.push(AnswerRecord::new(
                fields[0],
                record_type,
                fields[fields.len() - 1],
            ));
        }
        Ok(Some(Self { records }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnswer {
    pub domain: String,
    pub addresses: Vec<String>,
}

/// Pulls the addresses for a query out of an answer section.
pub struct AnswerParser;

impl AnswerParser {
    /// The owner of the first record must be the queried domain; CNAME hops
    /// after it are skipped and every record of `wanted` type contributes its
    /// value, in order.
    pub fn parse(
        domain: &str,
        section: &AnswerSection,
        wanted: RecordType,
    ) -> Result<ParsedAnswer, DomainError> {
        let first = section
            .records()
            .first()
            .ok_or_else(|| DomainError::NoAnswerFound(domain.to_string()))?;

        let parsed_domain = normalize(&first.name);
        if !parsed_domain.eq_ignore_ascii_case(normalize(domain)) {
            return Err(DomainError::DomainMismatch {
                expected: domain.to_string(),
                found: parsed_domain.to_string(),
            });
        }

        let addresses = section
            .records()
            .iter()
            .filter(|r| r.record_type == wanted)
            .map(|r| match wanted {
                RecordType::PTR => normalize(&r.value).to_string(),
                _ => r.value.clone(),
            })
            .collect();

        Ok(ParsedAnswer {
            domain: domain.to_string(),
            addresses,
        })
    }

    pub fn parse_presentation(
        domain: &str,
        message: &str,
        wanted: RecordType,
    ) -> Result<ParsedAnswer, DomainError> {
        match AnswerSection::from_presentation(message)? {
            Some(section) => Self::parse(domain, &section, wanted),
            None => Err(DomainError::NoAnswerFound(domain.to_string())),
        }
    }
}

fn normalize(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
