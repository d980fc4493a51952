/*
 * Responsibility
 * - 公開 ID ↔ 内部 ID の変換 (encode/decode)
 * - sample の内部 bigint ID を URL に出さないための層
 * - 方式 (sqids) の変更影響をここに閉じ込める
 *
 * thiserror を使わない理由:
 * - このモジュール内で完結するエラー型なので
 */
use sqids::{Error as SqidsError, Sqids};
use std::{error::Error, fmt};

#[derive(Debug)]
pub enum IdCodecError {
    /// SQIDS_MIN_LENGTH / alphabet が設定として不正
    Config(SqidsError),
    InvalidMinLength { value: usize },
    /// 公開 ID が decode できない・形式が違う
    DecodeInvalidFormat,
    /// 変換結果が i64 に収まらない / 負数を encode しようとした
    OutOfRange { value: i64 },
    Encode(SqidsError),
}

impl fmt::Display for IdCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdCodecError::Config(e) => write!(f, "sqids configuration rejected: {}", e),
            IdCodecError::InvalidMinLength { value } => {
                write!(f, "SQIDS_MIN_LENGTH must fit in u8, got {}", value)
            }
            IdCodecError::DecodeInvalidFormat => write!(f, "invalid public id"),
            IdCodecError::OutOfRange { value } => write!(f, "id out of range: {}", value),
            IdCodecError::Encode(e) => write!(f, "sqids encode failed: {}", e),
        }
    }
}

impl Error for IdCodecError {}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self, IdCodecError> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()
            .map_err(IdCodecError::Config)?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String, IdCodecError> {
        if id < 0 {
            return Err(IdCodecError::OutOfRange { value: id });
        }
        self.sqids
            .encode(&[id as u64])
            .map_err(IdCodecError::Encode)
    }

    pub fn decode(&self, public_id: &str) -> Result<i64, IdCodecError> {
        let nums = self.sqids.decode(public_id);
        // 正規の公開 ID は常に 1 要素
        let [n] = nums[..] else {
            return Err(IdCodecError::DecodeInvalidFormat);
        };
        i64::try_from(n).map_err(|_| IdCodecError::OutOfRange { value: i64::MAX })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> IdCodec {
        IdCodec::new(10, "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789").unwrap()
    }

    #[test]
    fn encode_decode_round_trip() {
        let c = codec();
        for id in [0_i64, 1, 42, 9_999_999] {
            let public = c.encode(id).unwrap();
            assert!(public.len() >= 10);
            assert_eq!(c.decode(&public).unwrap(), id);
        }
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert!(matches!(
            codec().encode(-1),
            Err(IdCodecError::OutOfRange { .. })
        ));
    }

    #[test]
    fn garbage_public_ids_do_not_decode() {
        assert!(codec().decode("!!!not-an-id!!!").is_err());
    }
}
