use prost::Message;

use crate::transit_realtime::FeedMessage;

/// Feed version this tool was written against. Other versions decode fine in
/// practice, so a mismatch warns instead of failing the ingestion.
pub const EXPECTED_VERSION: &str = "1.0";

/// Decodes a protobuf-encoded [`FeedMessage`] from raw bytes.
///
/// Empty input is a valid (empty) message per protobuf semantics; only
/// malformed bytes produce an error. `source` names the feed in the version
/// warning.
pub fn decode_feed(bytes: &[u8], source: &str) -> Result<FeedMessage, prost::DecodeError> {
    let feed = FeedMessage::decode(bytes)?;

    if !feed.entity.is_empty() && feed.header.gtfs_realtime_version != EXPECTED_VERSION {
        log::warn!(
            "feed version has changed: expected {}, found {} ({})",
            EXPECTED_VERSION,
            feed.header.gtfs_realtime_version,
            source
        );
    }

    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transit_realtime::{FeedEntity, FeedHeader};

    fn sample_feed() -> FeedMessage {
        FeedMessage {
            header: FeedHeader {
                gtfs_realtime_version: "1.0".to_owned(),
                incrementality: None,
                timestamp: Some(1_700_000_000),
                nyct_feed_header: None,
            },
            entity: vec![FeedEntity {
                id: "1".to_owned(),
                is_deleted: None,
                trip_update: None,
                vehicle: None,
                alert: None,
            }],
        }
    }

    #[test]
    fn empty_input_is_an_empty_message() {
        let feed = decode_feed(&[], "test").unwrap();
        assert_eq!(feed.header.gtfs_realtime_version, "");
        assert!(feed.entity.is_empty());
    }

    #[test]
    fn malformed_bytes_are_a_decode_error() {
        assert!(decode_feed(&[0xff, 0xfe, 0x00, 0x01], "test").is_err());
    }

    #[test]
    fn decoding_is_deterministic() {
        let bytes = sample_feed().encode_to_vec();
        let first = decode_feed(&bytes, "test").unwrap();
        let second = decode_feed(&bytes, "test").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn round_trips_the_header() {
        let bytes = sample_feed().encode_to_vec();
        let feed = decode_feed(&bytes, "test").unwrap();
        assert_eq!(feed.header.gtfs_realtime_version, "1.0");
        assert_eq!(feed.header.timestamp, Some(1_700_000_000));
        assert_eq!(feed.entity.len(), 1);
    }
}
