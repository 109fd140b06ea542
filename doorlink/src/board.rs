//! High-level board interface

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, trace, warn};

use doorlink_core::{clock, event, user, Frame, Response, SerialNumber, TagId, Verb, LATEST_EVENT};
use doorlink_transport::{Transport, UdpTransport};
use doorlink_types::{AccessRecord, SystemsMask, UserRecord, ValidityWindow};

use crate::error::Result;

/// Access-control board client
///
/// One instance performs one transaction at a time: every operation is
/// a single send-then-receive exchange and the `&mut self` receivers
/// keep overlapping transactions off a protocol that has no way to
/// correlate responses with requests.
///
/// # Examples
///
/// ```no_run
/// use doorlink::Board;
///
/// #[tokio::main]
/// async fn main() -> doorlink::Result<()> {
///     let serial = "00E04C01".parse()?;
///     let mut board = Board::new("192.168.1.200", 60000, serial);
///
///     println!("Events on the board: {}", board.event_count().await?);
///     Ok(())
/// }
/// ```
pub struct Board {
    transport: Box<dyn Transport>,
    serial: SerialNumber,
}

impl Board {
    /// Create a board client over UDP (the only transport the board speaks).
    pub fn new(ip: impl Into<String>, port: u16, serial: SerialNumber) -> Self {
        Self {
            transport: Box::new(UdpTransport::new(ip, port)),
            serial,
        }
    }

    /// Create a board client over a caller-supplied transport.
    ///
    /// Used for tests and for wrapping the transport with a retry or
    /// rate-limit policy; this layer never retries on its own.
    pub fn with_transport(transport: Box<dyn Transport>, serial: SerialNumber) -> Self {
        Self { transport, serial }
    }

    pub fn serial(&self) -> SerialNumber {
        self.serial
    }

    pub fn remote_addr(&self) -> String {
        self.transport.remote_addr()
    }

    // User management

    /// Add a user's tag with the default policy: valid from today
    /// through ten years out, every system class enabled.
    ///
    /// Returns `false` when the board rejects the request.
    pub async fn add_user(&mut self, tag: TagId) -> Result<bool> {
        self.add_user_with(tag, ValidityWindow::starting_today(), SystemsMask::ALL)
            .await
    }

    /// Add a user's tag with an explicit validity window and systems mask.
    pub async fn add_user_with(
        &mut self,
        tag: TagId,
        window: ValidityWindow,
        systems: SystemsMask,
    ) -> Result<bool> {
        debug!("Adding user tag {} valid {}", tag, window.wire());

        let frame = Frame::with_payload(
            Verb::AddUser,
            self.serial,
            user::add_payload(tag, &window, systems),
        );
        let response = self.exchange(frame).await?;

        let accepted = user::parse_status(&response);
        if accepted {
            info!("Board accepted tag {}", tag);
        } else {
            warn!("Board rejected add for tag {}", tag);
        }
        Ok(accepted)
    }

    /// Look up what the board stores against a tag.
    ///
    /// `None` means the board holds no such user; that is a normal
    /// outcome, not an error.
    pub async fn get_user(&mut self, tag: TagId) -> Result<Option<UserRecord>> {
        debug!("Getting user tag {}", tag);

        let frame = Frame::with_payload(Verb::GetUser, self.serial, user::tag_payload(tag));
        let response = self.exchange(frame).await?;

        Ok(user::parse_user(&response)?)
    }

    /// Delete a user's tag from the board.
    ///
    /// Returns `false` when the board rejects the request.
    pub async fn delete_user(&mut self, tag: TagId) -> Result<bool> {
        debug!("Deleting user tag {}", tag);

        let frame = Frame::with_payload(Verb::DeleteUser, self.serial, user::tag_payload(tag));
        let response = self.exchange(frame).await?;

        let accepted = user::parse_status(&response);
        if !accepted {
            warn!("Board rejected delete for tag {}", tag);
        }
        Ok(accepted)
    }

    // Event history

    /// Number of events in the board's circular log.
    pub async fn event_count(&mut self) -> Result<u32> {
        let frame = Frame::new(Verb::GetEventCount, self.serial);
        let response = self.exchange(frame).await?;
        Ok(event::parse_count(&response)?)
    }

    /// Fetch the most recent `count` access events, newest first.
    ///
    /// The board has no bulk read: the newest record is fetched via the
    /// sentinel index to learn where the log currently ends, then one
    /// exchange per preceding index walks backwards. `count` is clamped
    /// to the number of events actually stored, and the walk never asks
    /// for index 0 (the log is 1-based), so a generous `count` returns
    /// the whole log rather than wrapping.
    pub async fn access_list(&mut self, count: u32) -> Result<Vec<AccessRecord>> {
        let total = self.event_count().await?;
        let count = count.min(total);

        debug!("Fetching {} of {} events", count, total);

        if count == 0 {
            return Ok(Vec::new());
        }

        let latest = self.fetch_event(LATEST_EVENT).await?;
        let latest_index = latest.index;

        let mut records = Vec::with_capacity(count as usize + 1);
        records.push(latest);

        for index in (latest_index.saturating_sub(count)..latest_index).rev() {
            if index == 0 {
                break;
            }
            records.push(self.fetch_event(index).await?);
        }

        Ok(records)
    }

    async fn fetch_event(&mut self, index: u32) -> Result<AccessRecord> {
        let frame = Frame::with_payload(Verb::GetEvent, self.serial, event::index_payload(index));
        let response = self.exchange(frame).await?;
        Ok(event::parse_record(&response)?)
    }

    // Clock synchronization

    /// Read the board's clock.
    pub async fn get_time(&mut self) -> Result<NaiveDateTime> {
        let frame = Frame::new(Verb::GetTime, self.serial);
        let response = self.exchange(frame).await?;
        Ok(clock::parse_time(&response)?)
    }

    /// Set the board's clock to an explicit instant.
    ///
    /// The board acknowledges with nothing beyond its generic response
    /// frame, which [`exchange`](Self::exchange) already validates.
    pub async fn set_time(&mut self, when: NaiveDateTime) -> Result<()> {
        debug!("Setting board clock to {}", when);

        let frame = Frame::with_payload(Verb::SetTime, self.serial, clock::time_payload(when));
        self.exchange(frame).await?;
        Ok(())
    }

    /// Set the board's clock to the host's current local time.
    pub async fn sync_time(&mut self) -> Result<NaiveDateTime> {
        let now = Local::now().naive_local();
        self.set_time(now).await?;
        Ok(now)
    }

    // Helper methods

    /// One full transaction: encode, exchange, wrap, and defensively
    /// parse the common header of whatever came back.
    async fn exchange(&mut self, frame: Frame) -> Result<Response> {
        trace!("Sending: {:?}", frame);

        let data = frame.to_bytes()?;
        let reply = self.transport.exchange(&data).await?;
        let response = Response::from_bytes(&reply)?;

        let prelude = response.prelude()?;
        if !prelude.has_valid_preamble() {
            warn!(
                "Response carries preamble 0x{:02X} instead of the protocol marker",
                prelude.preamble
            );
        }
        trace!("Received: {:?}", prelude);

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use bytes::BytesMut;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    const SERIAL: &str = "AABBCCDD";

    /// Fake board: canned replies in order, every sent frame recorded.
    struct ScriptedTransport {
        replies: VecDeque<Vec<u8>>,
        sent: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<Vec<u8>>) -> (Self, Arc<Mutex<Vec<Vec<u8>>>>) {
            let sent = Arc::new(Mutex::new(Vec::new()));
            let transport = Self {
                replies: replies.into(),
                sent: Arc::clone(&sent),
            };
            (transport, sent)
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn exchange(&mut self, data: &[u8]) -> doorlink_transport::Result<BytesMut> {
            self.sent.lock().unwrap().push(data.to_vec());
            match self.replies.pop_front() {
                Some(reply) => Ok(BytesMut::from(&reply[..])),
                None => Err(doorlink_transport::Error::ReadTimeout),
            }
        }

        fn remote_addr(&self) -> String {
            "scripted".to_string()
        }
    }

    fn serial() -> SerialNumber {
        SERIAL.parse().unwrap()
    }

    fn scripted(replies: Vec<Vec<u8>>) -> Board {
        let (transport, _) = ScriptedTransport::new(replies);
        Board::with_transport(Box::new(transport), serial())
    }

    fn scripted_recording(replies: Vec<Vec<u8>>) -> (Board, Arc<Mutex<Vec<Vec<u8>>>>) {
        let (transport, sent) = ScriptedTransport::new(replies);
        (Board::with_transport(Box::new(transport), serial()), sent)
    }

    fn reply(verb: u8, payload_hex: &str) -> Vec<u8> {
        let hex = format!(
            "17{:02x}0000ddccbbaa{}{}",
            verb,
            payload_hex,
            "0".repeat(112 - payload_hex.len())
        );
        hex::decode(hex).unwrap()
    }

    fn event_reply(index: u32, tag: u32, timestamp: &str) -> Vec<u8> {
        let mut payload = hex::encode(index.to_le_bytes());
        payload.push_str("00"); // record type
        payload.push_str("01"); // access granted
        payload.push_str("02"); // door id
        payload.push_str("00"); // door status
        payload.push_str(&hex::encode(tag.to_le_bytes()));
        payload.push_str(timestamp);
        payload.push_str("00"); // second record type byte
        reply(0xB0, &payload)
    }

    #[tokio::test]
    async fn test_add_user_accepted() {
        let mut board = scripted(vec![reply(0x50, "01")]);
        let window = ValidityWindow::new(
            NaiveDate::from_ymd_opt(2018, 3, 12).unwrap(),
            NaiveDate::from_ymd_opt(2028, 3, 12).unwrap(),
        );

        let accepted = board
            .add_user_with(TagId::new(16733723), window, SystemsMask::ALL)
            .await
            .unwrap();
        assert!(accepted);
    }

    #[tokio::test]
    async fn test_add_user_request_layout() {
        let (mut board, sent) = scripted_recording(vec![reply(0x50, "01")]);
        let window = ValidityWindow::new(
            NaiveDate::from_ymd_opt(2018, 3, 12).unwrap(),
            NaiveDate::from_ymd_opt(2028, 3, 12).unwrap(),
        );

        board
            .add_user_with(TagId::new(16733723), window, SystemsMask::ALL)
            .await
            .unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].len(), 64);
        // header + tag device form + validity window + systems mask
        assert_eq!(
            hex::encode(&sent[0][..24]),
            "17500000ddccbbaa1b56ff00201803122028031201010101"
        );
        assert!(sent[0][24..].iter().all(|b| *b == 0));
    }

    #[tokio::test]
    async fn test_add_user_rejected() {
        let mut board = scripted(vec![reply(0x50, "00")]);
        assert!(!board.add_user(TagId::new(1)).await.unwrap());

        let mut board = scripted(vec![reply(0x50, "ff")]);
        assert!(!board.add_user(TagId::new(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_user_present() {
        let mut board = scripted(vec![reply(0x5A, "1b56ff00201803122028031201010101")]);

        let user = board.get_user(TagId::new(16733723)).await.unwrap().unwrap();
        assert_eq!(user.tag_serial, 16733723);
        assert_eq!(user.valid_from, "20180312");
        assert_eq!(user.valid_until, "20280312");
        assert_eq!(user.systems, SystemsMask::ALL);
    }

    #[tokio::test]
    async fn test_get_user_absent() {
        let mut board = scripted(vec![reply(0x5A, "00000000")]);
        assert_eq!(board.get_user(TagId::new(42)).await.unwrap(), None);

        let mut board = scripted(vec![reply(0x5A, "ffffffff")]);
        assert_eq!(board.get_user(TagId::new(42)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let mut board = scripted(vec![reply(0x52, "01")]);
        assert!(board.delete_user(TagId::new(16733723)).await.unwrap());
    }

    #[tokio::test]
    async fn test_event_count() {
        let mut board = scripted(vec![reply(0xB4, "64000000")]);
        assert_eq!(board.event_count().await.unwrap(), 100);
    }

    #[tokio::test]
    async fn test_access_list_newest_first() {
        let (mut board, sent) = scripted_recording(vec![
            reply(0xB4, "64000000"), // 100 events stored
            event_reply(100, 555, "20180312105832"),
            event_reply(99, 444, "20180312105500"),
            event_reply(98, 333, "20180312105100"),
            event_reply(97, 222, "20180312104800"),
        ]);

        let records = board.access_list(3).await.unwrap();

        assert_eq!(records.len(), 4);
        let indices: Vec<u32> = records.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![100, 99, 98, 97]);
        let tags: Vec<u32> = records.iter().map(|r| r.tag_serial).collect();
        assert_eq!(tags, vec![555, 444, 333, 222]);

        // count request, sentinel fetch, then byte-reversed indices 99..97
        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 5);
        assert_eq!(sent[0][1], 0xB4);
        assert_eq!(&sent[1][8..12], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(&sent[2][8..12], &99u32.to_le_bytes());
        assert_eq!(&sent[3][8..12], &98u32.to_le_bytes());
        assert_eq!(&sent[4][8..12], &97u32.to_le_bytes());
    }

    #[tokio::test]
    async fn test_access_list_clamps_to_stored_events() {
        // Only 2 events on the board; asking for 10 must not walk off
        // the bottom of the log
        let mut board = scripted(vec![
            reply(0xB4, "02000000"),
            event_reply(2, 555, "20180312105832"),
            event_reply(1, 444, "20180312105500"),
        ]);

        let records = board.access_list(10).await.unwrap();

        let indices: Vec<u32> = records.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_access_list_empty_log() {
        let mut board = scripted(vec![reply(0xB4, "00000000")]);
        assert!(board.access_list(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_time() {
        let mut board = scripted(vec![reply(0x32, "20180312105832")]);
        let when = board.get_time().await.unwrap();
        assert_eq!(when.format("%Y%m%d%H%M%S").to_string(), "20180312105832");
    }

    #[tokio::test]
    async fn test_get_time_garbage_is_an_error() {
        let mut board = scripted(vec![reply(0x32, "")]);
        assert!(matches!(
            board.get_time().await,
            Err(Error::Core(doorlink_core::Error::InvalidTimestamp(_)))
        ));
    }

    #[tokio::test]
    async fn test_set_time() {
        let mut board = scripted(vec![reply(0x30, "")]);
        let when = NaiveDate::from_ymd_opt(2018, 3, 12)
            .unwrap()
            .and_hms_opt(10, 58, 32)
            .unwrap();
        board.set_time(when).await.unwrap();
    }

    #[tokio::test]
    async fn test_timeout_propagates_as_retriable() {
        let mut board = scripted(vec![]);
        let err = board.event_count().await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.is_retriable());
    }

    #[tokio::test]
    async fn test_short_response_is_a_protocol_error() {
        let mut board = scripted(vec![vec![0x17; 10]]);
        assert!(matches!(
            board.event_count().await,
            Err(Error::Core(doorlink_core::Error::ResponseTooShort { .. }))
        ));
    }
}
