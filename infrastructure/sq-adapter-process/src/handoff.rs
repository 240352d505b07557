//! 更新エンジンハンドオフアダプタ。
//!
//! セットアップイメージの隣にあるペイロードディレクトリから
//! Update.exe を %LOCALAPPDATA%\SquirrelTemp へ展開し、合成済みの
//! 引数で実行してその終了ステータスを返す。

use sq_domain::error::DomainError;
use sq_domain::model::exit_codes;
use sq_domain::port::driven::UpdateHandoff;
use std::path::{Path, PathBuf};

/// 更新エンジンの実行ファイル名
const UPDATE_ENGINE_FILE_NAME: &str = "Update.exe";
/// 展開先ディレクトリ名
const STAGING_DIR_NAME: &str = "SquirrelTemp";

/// 更新エンジンの展開と実行
#[derive(Debug)]
pub struct UpdateRunner {
    /// Update.exe を探すディレクトリ（通常は実行イメージの親）
    payload_dir: PathBuf,
}

impl UpdateRunner {
    pub fn new(payload_dir: impl Into<PathBuf>) -> Self {
        Self {
            payload_dir: payload_dir.into(),
        }
    }

    /// 実行イメージのパスからランナーを構築する
    pub fn next_to_image(image_path: &Path) -> Self {
        let dir = image_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Self::new(dir)
    }

    /// 展開先（%LOCALAPPDATA%\SquirrelTemp、なければOSのtemp）
    fn staging_dir() -> PathBuf {
        std::env::var_os("LOCALAPPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
            .join(STAGING_DIR_NAME)
    }

    /// Update.exe を展開先へコピーし、そのパスを返す
    fn extract(&self) -> Result<PathBuf, DomainError> {
        let source = self.payload_dir.join(UPDATE_ENGINE_FILE_NAME);
        if !source.is_file() {
            return Err(DomainError::PayloadNotFound(
                source.to_string_lossy().into_owned(),
            ));
        }
        let staging = Self::staging_dir();
        std::fs::create_dir_all(&staging)?;
        let target = staging.join(UPDATE_ENGINE_FILE_NAME);
        std::fs::copy(&source, &target).map_err(|e| {
            DomainError::IoError(format!(
                "copy {} -> {}: {e}",
                source.display(),
                target.display()
            ))
        })?;
        Ok(target)
    }

    fn run(&self, args: &str) -> Result<i32, DomainError> {
        let engine = self.extract()?;
        let status = std::process::Command::new(&engine)
            .args(args.split_whitespace())
            .status()
            .map_err(|e| DomainError::ProcessLaunchFailed(format!("{}: {e}", engine.display())))?;
        Ok(status.code().unwrap_or(exit_codes::GENERIC_FAILURE))
    }
}

impl UpdateHandoff for UpdateRunner {
    fn extract_and_run(&self, args: &str, is_elevated_relaunch: bool) -> i32 {
        // 昇格再起動コンテキストでここに来ることはない想定だが、
        // 契約上フラグは受け取り、そのまま実行時の判断には使わない。
        let _ = is_elevated_relaunch;
        match self.run(args) {
            Ok(code) => code,
            Err(_) => exit_codes::GENERIC_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_is_resolved_next_to_image() {
        let runner = UpdateRunner::next_to_image(Path::new("/opt/app/Setup.exe"));
        assert_eq!(runner.payload_dir, PathBuf::from("/opt/app"));
    }

    #[test]
    fn missing_engine_is_reported_as_payload_not_found() {
        let runner = UpdateRunner::new("/nonexistent-dir");
        match runner.extract() {
            Err(DomainError::PayloadNotFound(path)) => {
                assert!(path.contains(UPDATE_ENGINE_FILE_NAME));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_engine_maps_to_generic_failure_code() {
        let runner = UpdateRunner::new("/nonexistent-dir");
        assert_eq!(
            runner.extract_and_run("--silent", false),
            exit_codes::GENERIC_FAILURE
        );
    }

    #[test]
    fn staging_dir_ends_with_squirrel_temp() {
        assert!(UpdateRunner::staging_dir().ends_with(STAGING_DIR_NAME));
    }
}
