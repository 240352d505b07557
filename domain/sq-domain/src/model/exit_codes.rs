//! ブートストラップの終了コード定義
//!
//! 0は成功。失敗したコラボレータのHRESULT形式の値はそのまま
//! プロセス終了コードとして透過する（固定の列挙は仮定しない）。

/// 正常終了（インストール済み短絡・降格再起動・ハンドオフ成功）
pub const SUCCESS: i32 = 0;

/// 汎用失敗（E_FAIL）。非対応OSゲートで使用。
pub const GENERIC_FAILURE: i32 = 0x8000_4005_u32 as i32;
