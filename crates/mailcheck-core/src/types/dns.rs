use serde::{Deserialize, Serialize};

use super::RecordType;

/// DoH rcode for NXDOMAIN
pub const RCODE_NXDOMAIN: u32 = 3;

/// JSON body returned by a DNS-over-HTTPS resolver (`application/dns-json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DohResponse {
    /// DNS response code (0 = NOERROR)
    #[serde(default, rename = "Status")]
    pub status: u32,

    /// Answer section; absent when there are no records
    #[serde(default, rename = "Answer")]
    pub answer: Vec<DohAnswer>,
}

impl DohResponse {
    /// Returns true if the resolver reported NXDOMAIN
    #[must_use]
    pub const fn is_nxdomain(&self) -> bool {
        self.status == RCODE_NXDOMAIN
    }

    /// Answer data strings for the requested type.
    ///
    /// Answers without a type are kept; answers of another type
    /// (CNAME links in the chain) are dropped.
    #[must_use]
    pub fn data_for(&self, record_type: RecordType) -> Vec<String> {
        self.answer
            .iter()
            .filter(|a| a.record_type.map_or(true, |t| t == record_type.code()))
            .map(|a| a.data.clone())
            .collect()
    }
}

/// Single entry of the `Answer` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DohAnswer {
    /// Owner name
    #[serde(default)]
    pub name: Option<String>,

    /// Numeric RR type
    #[serde(default, rename = "type")]
    pub record_type: Option<u16>,

    /// Time to live in seconds
    #[serde(default, rename = "TTL")]
    pub ttl: Option<u32>,

    /// Presentation-format record data
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_answer_means_no_records() {
        let resp: DohResponse = serde_json::from_str(r#"{"Status":0}"#).unwrap();
        assert!(resp.answer.is_empty());
        assert!(resp.data_for(RecordType::Txt).is_empty());
    }

    #[test]
    fn cname_links_are_filtered() {
        let resp: DohResponse = serde_json::from_str(
            r#"{"Status":0,"Answer":[
                {"name":"mail.example.com.","type":5,"TTL":300,"data":"mx.example.net."},
                {"name":"mx.example.net.","type":15,"TTL":300,"data":"10 mx1.example.net."}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resp.data_for(RecordType::Mx), vec!["10 mx1.example.net."]);
    }

    #[test]
    fn untyped_answers_are_kept() {
        let resp: DohResponse =
            serde_json::from_str(r#"{"Answer":[{"data":"\"v=spf1 -all\""}]}"#).unwrap();
        assert_eq!(resp.data_for(RecordType::Txt).len(), 1);
    }
}
