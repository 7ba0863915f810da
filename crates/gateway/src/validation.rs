//! # ファイル名検証
//!
//! アップロードされる動画のファイル名は
//! `<開始DDMMYYYYHHMMSS>-<終了DDMMYYYYHHMMSS>.mp4` 形式。
//! 構文チェックのみで、日付としての妥当性や前後関係は検証しない。

use std::sync::LazyLock;

use regex::Regex;

use crate::error::GatewayError;

// `\d` はUnicodeの数字全般に一致するため、ASCII数字に限定する
static VIDEO_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{14}-[0-9]{14}\.mp4$").expect("動画ファイル名の正規表現が不正")
});

/// ファイル名が動画ファイル名規則に一致するか。
pub fn is_valid_video_file_name(file_name: &str) -> bool {
    VIDEO_FILE_NAME.is_match(file_name)
}

/// ファイル名を検証する。
pub fn validate_video_file_name(file_name: &str) -> Result<(), GatewayError> {
    if is_valid_video_file_name(file_name) {
        Ok(())
    } else {
        Err(GatewayError::InvalidFileName)
    }
}
