use super::record_type_map::RecordTypeMapper;
use bulkdns_domain::{AnswerRecord, AnswerSection, DnsResponse, DomainError, ResponseCode};
use hickory_proto::op::{Message, ResponseCode as HickoryResponseCode};
use hickory_proto::rr::RData;
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Decodes a wire-format response into the domain view: response code,
    /// truncation flag and the answer records in server order.
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::MalformedResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = Self::map_rcode(message.response_code());
        let truncated = message.truncated();

        let records = message
            .answers()
            .iter()
            .map(|record| {
                let value = match record.data() {
                    RData::A(a) => a.0.to_string(),
                    RData::CNAME(canonical) => canonical.to_utf8(),
                    RData::PTR(ptr) => ptr.to_utf8(),
                    other => other.to_string(),
                };
                AnswerRecord::new(
                    record.name().to_utf8(),
                    RecordTypeMapper::from_hickory(record.record_type()),
                    value,
                )
            })
            .collect::<Vec<_>>();

        debug!(
            id = message.id(),
            rcode = %rcode,
            answers = records.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            rcode,
            answers: AnswerSection::new(records),
            truncated,
        })
    }

    /// Reads the ID from the first two bytes without decoding the rest.
    pub fn peek_id(response_bytes: &[u8]) -> Option<u16> {
        match response_bytes {
            [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
            _ => None,
        }
    }

    fn map_rcode(rcode: HickoryResponseCode) -> ResponseCode {
        match rcode {
            HickoryResponseCode::NoError => ResponseCode::NoError,
            HickoryResponseCode::FormErr => ResponseCode::FormErr,
            HickoryResponseCode::ServFail => ResponseCode::ServFail,
            HickoryResponseCode::NXDomain => ResponseCode::NXDomain,
            HickoryResponseCode::NotImp => ResponseCode::NotImp,
            HickoryResponseCode::Refused => ResponseCode::Refused,
            other => ResponseCode::Other(u16::from(other)),
        }
    }
}
