//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::path::{
    Path,
    PathBuf,
};

use crate::catalog::LocaleTable;
use crate::locale_id::LocaleId;

/// テスト用の `LocaleTable` を作成する
///
/// # Arguments
/// * `locale` - ロケール ID（例: "pl_PL"）
/// * `entries` - キーと翻訳のペア
pub(crate) fn table(locale: &str, entries: &[(&str, &str)]) -> LocaleTable {
    LocaleTable::from_entries(LocaleId::parse(locale).unwrap(), entries.iter().copied())
}

/// ロケールファイルを書き込み、そのパスを返す
///
/// 親ディレクトリが存在しなければ作成する
pub(crate) fn write_locale_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}
