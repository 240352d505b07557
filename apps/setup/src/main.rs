#![windows_subsystem = "windows"]
//! sq-setup: インストーラパッケージ起動時に最初に走るネイティブ
//! ブートストラップ。どうインストールすべきかを一度だけ判定し、
//! 更新エンジンへ引き継ぐ。

use sq_composition::SetupRuntime;

fn main() {
    // DLL探索の固定が最優先。ロガーも補助DLLを読み込みうるため、
    // いかなる処理（ログ出力を含む）よりも前に行う。
    sq_composition::harden_dll_search_path();

    let runtime = SetupRuntime::new();
    let exit_code = runtime.bootstrap(&raw_command_line());
    std::process::exit(exit_code);
}

/// イメージ名を除いた引数列を単一の生文字列へ戻す。
/// 空の起動は「既定のユーザー単位インストール」を意味する有効な入力。
fn raw_command_line() -> String {
    std::env::args().skip(1).collect::<Vec<_>>().join(" ")
}
