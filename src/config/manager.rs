//! ワークスペース設定から翻訳レジストリまでを組み立てるモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    FileMatcher,
    LocaleSettings,
    MatcherError,
    loader,
};
use crate::catalog::{
    LocaleLoader,
    LocaleRegistry,
};
use crate::locale_id::LocaleId;

/// 1 つのワークスペースの検証済み設定
///
/// 作成時に検証を済ませるため、保持している設定は常に有効
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// ワークスペースのルートパス
    workspace_root: PathBuf,

    /// 検証済みの設定
    settings: LocaleSettings,

    /// 正規化済みの `defaultLocale`
    default_locale: LocaleId,
}

impl ConfigManager {
    /// ワークスペースの `.board-locale.json` を読み込む
    ///
    /// 設定ファイルがなければデフォルト値を使う
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load(workspace_root: &Path) -> Result<Self, ConfigError> {
        let settings = loader::load_from_workspace(workspace_root)?.unwrap_or_default();
        Self::from_settings(workspace_root.to_path_buf(), settings)
    }

    /// 設定を検証してから保持する
    ///
    /// # Errors
    /// - バリデーションエラー
    pub fn from_settings(
        workspace_root: PathBuf,
        settings: LocaleSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        let default_locale = settings
            .default_locale_id()
            .map_err(|e| ConfigError::ValidationErrors(vec![e]))?;

        tracing::debug!(
            root = %workspace_root.display(),
            %default_locale,
            builtin = settings.builtin_locales,
            "Settings loaded"
        );
        Ok(Self { workspace_root, settings, default_locale })
    }

    /// 検証済みの設定
    #[must_use]
    pub const fn settings(&self) -> &LocaleSettings {
        &self.settings
    }

    /// ワークスペースのルートパス
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// フォールバック先のロケール
    #[must_use]
    pub const fn default_locale(&self) -> &LocaleId {
        &self.default_locale
    }

    /// 設定のパターンでロケールファイルを判定するマッチャー
    ///
    /// # Errors
    /// - glob パターンのコンパイルエラー
    pub fn file_matcher(&self) -> Result<FileMatcher, MatcherError> {
        FileMatcher::new(self.workspace_root.clone(), &self.settings)
    }

    /// ワークスペースのロケールファイルを探索し、レジストリを作る
    ///
    /// # Errors
    /// - glob パターンのコンパイルエラー
    pub fn registry(&self) -> Result<LocaleRegistry, MatcherError> {
        let loader = LocaleLoader::from_matcher(&self.file_matcher()?, self.settings.builtin_locales);
        Ok(LocaleRegistry::new(loader, self.default_locale.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::loader::CONFIG_FILE_NAME;
    use crate::test_utils::write_locale_file;

    /// load: 設定ファイルがある場合
    #[rstest]
    fn test_load_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{"defaultLocale": "pl-pl", "builtinLocales": false}"#,
        )
        .unwrap();

        let manager = ConfigManager::load(temp_dir.path()).unwrap();

        assert_eq!(manager.default_locale().as_str(), "pl_PL");
        assert!(!manager.settings().builtin_locales);
        assert_eq!(manager.workspace_root(), temp_dir.path());
    }

    /// load: 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let manager = ConfigManager::load(temp_dir.path()).unwrap();

        assert_eq!(manager.default_locale().as_str(), "en_US");
        assert!(manager.settings().builtin_locales);
    }

    /// load: 無効な設定ファイルは拒否される
    #[rstest]
    fn test_load_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"defaultLocale": "polish"}"#)
            .unwrap();

        let result = ConfigManager::load(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ValidationErrors(errors)) if errors.len() == 1));
    }

    /// from_settings: すべてのバリデーションエラーを返す
    #[rstest]
    fn test_from_settings_reports_every_error() {
        let mut settings =
            LocaleSettings { default_locale: String::new(), ..LocaleSettings::default() };
        settings.locale_files.include_patterns.clear();

        let result = ConfigManager::from_settings(PathBuf::from("/workspace"), settings);

        assert!(matches!(result, Err(ConfigError::ValidationErrors(errors)) if errors.len() == 2));
    }

    /// file_matcher: 設定のパターンが使われる
    #[rstest]
    fn test_file_matcher_uses_settings() {
        let mut settings = LocaleSettings::default();
        settings.locale_files.include_patterns = vec!["i18n/*.json".to_string()];
        let manager = ConfigManager::from_settings(PathBuf::from("/workspace"), settings).unwrap();

        let matcher = manager.file_matcher().unwrap();

        assert!(matcher.is_locale_file_relative(Path::new("i18n/pl_PL.json")));
        assert!(!matcher.is_locale_file_relative(Path::new("locales/pl_PL/translations.json")));
    }

    /// registry: 探索したファイルとデフォルトロケールでレジストリを作る
    #[rstest]
    fn test_registry_from_workspace() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"defaultLocale": "de_DE"}"#).unwrap();
        write_locale_file(
            temp_dir.path(),
            "locales/de_DE/translations.json",
            r#"{"Search": "Suchen"}"#,
        );

        let registry = ConfigManager::load(temp_dir.path()).unwrap().registry().unwrap();
        let translator = registry.translator(&LocaleId::parse("pl_PL").unwrap()).unwrap();

        assert_eq!(registry.default_locale().as_str(), "de_DE");
        assert_eq!(translator.translate("Save", &[]), "Zapisz");
        assert_that!(translator.translate("Search", &[]), eq("Suchen"));
    }
}
