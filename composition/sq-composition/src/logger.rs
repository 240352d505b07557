//! 診断ログアダプタ。
//!
//! デバッグストリームへ無条件に書き、temp ディレクトリの
//! SquirrelSetup.log へベストエフォートで追記する。ログの失敗は
//! 決して致命にならず、外へも漏れない。ファイルハンドルは追記
//! 1回ごとに取得・解放し、ステージをまたいで保持しない。

use sq_domain::port::driven::SetupLogger;
use sq_log_utils::{lifecycle_line, truncate_record};
use std::io::Write;
use std::path::PathBuf;

/// ログファイル名（temp ディレクトリ直下）
const LOG_FILE_NAME: &str = "SquirrelSetup.log";
/// ブロッキング通知のタイトル
const NOTIFICATION_TITLE: &str = "Installer";

/// ファイル＋デバッグストリーム＋（要求時）ブロッキング通知のロガー
#[derive(Debug, Default)]
pub struct FileSetupLogger;

impl FileSetupLogger {
    pub fn new() -> Self {
        Self
    }

    /// temp ディレクトリを環境変数から解決する（追記のたびに読む）。
    /// 解決できなければ None を返し、ファイル追記はスキップされる。
    fn log_path() -> Option<PathBuf> {
        let temp = std::env::var_os("TEMP").or_else(|| std::env::var_os("TMPDIR"))?;
        Some(PathBuf::from(temp).join(LOG_FILE_NAME))
    }

    fn append_to_file(line: &str) {
        let Some(path) = Self::log_path() else {
            return;
        };
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }

    fn write_debug_stream(message: &str) {
        #[cfg(windows)]
        {
            use std::ffi::OsStr;
            use std::os::windows::ffi::OsStrExt;
            use windows::core::PCWSTR;
            use windows::Win32::System::Diagnostics::Debug::OutputDebugStringW;

            let wide: Vec<u16> = OsStr::new(message)
                .encode_wide()
                .chain(std::iter::once(0))
                .collect();
            unsafe {
                OutputDebugStringW(PCWSTR(wide.as_ptr()));
            }
        }
        #[cfg(not(windows))]
        {
            eprintln!("{}", message);
        }
    }
}

impl SetupLogger for FileSetupLogger {
    fn record(&self, show_notification: bool, message: &str) {
        let message = truncate_record(message);

        Self::write_debug_stream(message);
        Self::append_to_file(&lifecycle_line("SETUP", message));

        if show_notification {
            sq_ui_common::show_blocking_notification(NOTIFICATION_TITLE, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sq_log_utils::MAX_RECORD_BYTES;

    #[test]
    fn log_path_uses_temp_env_when_present() {
        // 環境変数はプロセス全体で共有されるため読み取りのみで検証
        if std::env::var_os("TEMP").is_some() || std::env::var_os("TMPDIR").is_some() {
            let path = FileSetupLogger::log_path().unwrap();
            assert!(path.ends_with(LOG_FILE_NAME));
        } else {
            assert!(FileSetupLogger::log_path().is_none());
        }
    }

    #[test]
    fn oversized_records_do_not_panic() {
        let logger = FileSetupLogger::new();
        logger.record(false, &"x".repeat(MAX_RECORD_BYTES * 4));
    }
}
