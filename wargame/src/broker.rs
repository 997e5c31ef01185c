//! HTTP client for the move broker.
//!
//! The broker relays moves between two game instances. Each side POSTs the
//! moves its computer makes and polls with GET for the opponent's.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use wargame_core::{Coord, CoordPair};

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("broker request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("broker returned status {0}")]
    Status(StatusCode),

    #[error("broker reported failure")]
    Rejected,

    #[error("broker echoed {received:?}, expected {sent:?}")]
    Mismatch {
        sent: MovePayload,
        received: Option<MovePayload>,
    },
}

/// A move on the wire: `{"from":{"row","col"},"to":{"row","col"},"turn"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePayload {
    pub from: Coord,
    pub to: Coord,
    pub turn: u32,
}

impl MovePayload {
    pub fn new(pair: &CoordPair, turn: u32) -> Self {
        Self {
            from: pair.src,
            to: pair.dst,
            turn,
        }
    }

    pub fn pair(&self) -> CoordPair {
        CoordPair::new(self.from, self.to)
    }
}

/// Response body for both GET and POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<MovePayload>,
}

/// Extract the move for `expected_turn` from a GET response.
///
/// Returns `Ok(None)` when the broker has nothing yet or still holds an
/// older turn.
pub fn accept_move(envelope: &Envelope, expected_turn: u32) -> Result<Option<CoordPair>, BrokerError> {
    if !envelope.success {
        return Err(BrokerError::Rejected);
    }
    Ok(envelope
        .data
        .filter(|payload| payload.turn == expected_turn)
        .map(|payload| payload.pair()))
}

/// Check that a POST response echoes the payload that was sent.
pub fn confirm_post(envelope: &Envelope, sent: &MovePayload) -> Result<(), BrokerError> {
    if envelope.success && envelope.data.as_ref() == Some(sent) {
        Ok(())
    } else {
        Err(BrokerError::Mismatch {
            sent: *sent,
            received: envelope.data,
        })
    }
}

/// Source and sink for remote moves.
pub trait MoveRelay {
    /// Publish a move the local computer made.
    fn post_move(&self, pair: &CoordPair, turn: u32) -> Result<(), BrokerError>;

    /// Fetch the opponent's move for `expected_turn`, if available.
    fn fetch_move(&self, expected_turn: u32) -> Result<Option<CoordPair>, BrokerError>;

    /// Delay between fetch attempts.
    fn retry_interval(&self) -> Duration;
}

pub struct BrokerClient {
    url: String,
    client: Client,
    retry_interval: Duration,
}

impl BrokerClient {
    pub fn new(
        url: impl Into<String>,
        retry_interval: Duration,
        timeout: Duration,
    ) -> Result<Self, BrokerError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
            retry_interval,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn read_envelope(response: reqwest::blocking::Response) -> Result<Envelope, BrokerError> {
        let status = response.status();
        if status != StatusCode::OK {
            return Err(BrokerError::Status(status));
        }
        Ok(response.json()?)
    }
}

impl MoveRelay for BrokerClient {
    fn post_move(&self, pair: &CoordPair, turn: u32) -> Result<(), BrokerError> {
        let payload = MovePayload::new(pair, turn);
        let response = self.client.post(&self.url).json(&payload).send()?;
        let envelope = Self::read_envelope(response)?;
        confirm_post(&envelope, &payload)?;
        debug!(%pair, turn, "Sent move to broker");
        Ok(())
    }

    fn fetch_move(&self, expected_turn: u32) -> Result<Option<CoordPair>, BrokerError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()?;
        let envelope = Self::read_envelope(response)?;
        let pair = accept_move(&envelope, expected_turn)?;
        if let Some(pair) = &pair {
            debug!(%pair, turn = expected_turn, "Got move from broker");
        }
        Ok(pair)
    }

    fn retry_interval(&self) -> Duration {
        self.retry_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(turn: u32) -> MovePayload {
        MovePayload::new(&"E4 D4".parse().unwrap(), turn)
    }

    #[test]
    fn test_payload_wire_format() {
        let value = serde_json::to_value(payload(3)).unwrap();
        assert_eq!(
            value,
            json!({"from": {"row": 4, "col": 4}, "to": {"row": 3, "col": 4}, "turn": 3})
        );
    }

    #[test]
    fn test_envelope_parsing() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": true,
            "data": {"from": {"row": 1, "col": 1}, "to": {"row": 1, "col": 2}, "turn": 2},
            "message": "ignored"
        }))
        .unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap().pair(), "B1 B2".parse().unwrap());

        let empty: Envelope = serde_json::from_value(json!({"success": true, "data": null})).unwrap();
        assert!(empty.data.is_none());
    }

    #[test]
    fn test_accept_move_for_expected_turn() {
        let envelope = Envelope {
            success: true,
            data: Some(payload(5)),
        };
        assert_eq!(
            accept_move(&envelope, 5).unwrap(),
            Some("E4 D4".parse().unwrap())
        );
        // Stale turn: not yet available
        assert_eq!(accept_move(&envelope, 6).unwrap(), None);
    }

    #[test]
    fn test_accept_move_without_data() {
        let envelope = Envelope {
            success: true,
            data: None,
        };
        assert_eq!(accept_move(&envelope, 1).unwrap(), None);
    }

    #[test]
    fn test_accept_move_failure() {
        let envelope = Envelope {
            success: false,
            data: Some(payload(1)),
        };
        assert!(matches!(
            accept_move(&envelope, 1),
            Err(BrokerError::Rejected)
        ));
    }

    #[test]
    fn test_confirm_post() {
        let sent = payload(2);
        let echoed = Envelope {
            success: true,
            data: Some(sent),
        };
        assert!(confirm_post(&echoed, &sent).is_ok());

        let wrong = Envelope {
            success: true,
            data: Some(payload(3)),
        };
        let err = confirm_post(&wrong, &sent).unwrap_err();
        assert!(err.to_string().contains("expected"));

        let failed = Envelope {
            success: false,
            data: Some(sent),
        };
        assert!(confirm_post(&failed, &sent).is_err());
    }

    #[test]
    fn test_client_keeps_retry_interval() {
        let client = BrokerClient::new(
            "http://localhost:8001/test",
            Duration::from_millis(50),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(client.url(), "http://localhost:8001/test");
        assert_eq!(client.retry_interval(), Duration::from_millis(50));
    }
}
