//! Integrity fields appended to every serialized photo

const STATUS_MODULUS: i64 = 23;
const KEY_MULTIPLIER: i64 = 17;
const KEY_MODULUS: i64 = 1493;
const SCORE_MODULUS: i64 = 255;
const SCORE_RESULT_MODULUS: i64 = 100;

/// Timestamp split into the truncated value and its dropped last two digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncatedTime {
    pub truncated: i64,
    pub remainder: i64,
}

impl TruncatedTime {
    pub fn from_millis(now_millis: i64) -> Self {
        let remainder = now_millis % 100;
        Self {
            truncated: now_millis - remainder,
            remainder,
        }
    }

    pub fn status(&self) -> i64 {
        (self.truncated / 100) % STATUS_MODULUS
    }

    /// `text_len` is the UTF-16 length of the text written so far
    pub fn key(&self, text_len: usize) -> i64 {
        (text_len as i64 + self.truncated / 100 * KEY_MULTIPLIER) % KEY_MODULUS
    }

    pub fn timestamp(&self, body: &[u8], key: i64, room_id: i64) -> i64 {
        self.truncated + score(body, key, room_id)
    }

    pub fn checksum(&self, key: i64) -> i64 {
        (self.remainder + 13) * (key + 29)
    }
}

/// Fold every byte through a pair of accumulators seeded with the key and the
/// room id
pub fn score(body: &[u8], key: i64, room_id: i64) -> i64 {
    let (mut a, mut b) = (key, room_id);
    for &byte in body {
        a = (a + byte as i64) % SCORE_MODULUS;
        b = (a + b) % SCORE_MODULUS;
    }
    (a + b) % SCORE_RESULT_MODULUS
}
