use crate::Result;
use anyhow::Context;
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// A bid normalized for the calculator: who bid, and when (unix seconds).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BidRecord {
    pub bidder: String,
    pub timestamp: u64,
}

impl BidRecord {
    pub fn new(bidder: impl Into<String>, timestamp: u64) -> Self {
        Self {
            bidder: bidder.into(),
            timestamp,
        }
    }
}

/// Bid as served by the game's REST API. Everything else on the record
/// (amounts, tx hashes, round numbers) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidDto {
    #[serde(rename = "BidderAddr", default)]
    pub bidder_addr: Option<String>,
    #[serde(rename = "TimeStamp", default)]
    pub time_stamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BidListPayload {
    List(Option<Vec<Value>>),
    Envelope {
        #[serde(rename = "Bids", default)]
        bids: Option<Vec<Value>>,
    },
}

impl BidDto {
    fn to_record(&self) -> Option<BidRecord> {
        let bidder = self.bidder_addr.as_deref()?.trim().to_string();
        if bidder.is_empty() {
            return None;
        }
        let timestamp = u64::try_from(self.time_stamp?).ok()?;
        Some(BidRecord { bidder, timestamp })
    }
}

/// Drops records the calculator can't use, keeping the survivors in order.
pub fn normalize_bids(raw: Vec<BidDto>) -> Vec<BidRecord> {
    let total = raw.len();
    let records: Vec<BidRecord> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, dto)| {
            let record = dto.to_record();
            if record.is_none() {
                tracing::warn!("skipping malformed bid #{}: {:?}", index, dto);
            }
            record
        })
        .collect();
    if records.len() != total {
        tracing::info!("kept {} of {} bids", records.len(), total);
    }
    records
}

/// Accepts either a bare array of bids or the API's `{"Bids": [...]}`
/// envelope. `null` or a missing list is an empty round.
pub fn parse_bid_list(bytes: &[u8]) -> Result<Vec<BidRecord>> {
    let payload: BidListPayload =
        serde_json::from_slice(bytes).context("invalid bid list payload")?;
    let raw = match payload {
        BidListPayload::List(bids) => bids,
        BidListPayload::Envelope { bids } => bids,
    };
    let decoded: Vec<BidDto> = raw
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<BidDto>(value) {
            Ok(dto) => Some(dto),
            Err(e) => {
                tracing::warn!("skipping undecodable bid #{}: {}", index, e);
                None
            }
        })
        .collect();
    Ok(normalize_bids(decoded))
}
