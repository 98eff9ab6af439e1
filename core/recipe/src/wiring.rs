//! 配線: 標準アダプタで RecipeApp を組み立てる

use std::path::PathBuf;
use std::sync::Arc;

use common::adapter::{
    FileJsonLog, ReqwestHttpClient, StdClock, StdEnvResolver, StdFileSystem, StderrLog, TeeLog,
};
use common::domain::DataDir;
use common::error::Error;
use common::llm::{LlmProvider, OpenAiCompatProvider, ProviderProfile};
use common::ports::outbound::{Clock, EnvResolver, FileSystem, HttpClient, Log};

use crate::adapter::{ChatRecipeGenerator, FileKeyValueStore, StdRecipeIdGenerator};
use crate::ports::outbound::{KeyValueStore, RecipeGenerator};
use crate::usecase::{RecipeApp, RecipeStore};

/// 配線済みの依存一式。RecipeApp はコマンドごとに app() で作る
pub struct App {
    pub logger: Arc<dyn Log>,
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    generator: Arc<dyn RecipeGenerator>,
}

impl App {
    /// ストアの現在の内容で RecipeApp を作る
    pub fn app(&self) -> Result<RecipeApp, Error> {
        let store = RecipeStore::new(
            Arc::clone(&self.kv),
            Arc::clone(&self.clock),
            Arc::clone(&self.logger),
        );
        RecipeApp::new(store, Arc::clone(&self.generator), Arc::clone(&self.logger))
    }
}

fn config_path(data_dir: &DataDir) -> PathBuf {
    data_dir.join("config.json")
}

fn log_path(data_dir: &DataDir) -> PathBuf {
    data_dir.join("logs").join("recipe.jsonl")
}

fn storage_dir(data_dir: &DataDir) -> PathBuf {
    data_dir.join("storage")
}

/// config.json があれば読み、無ければ既定値
fn load_profile(fs: &dyn FileSystem, data_dir: &DataDir) -> Result<ProviderProfile, Error> {
    let path = config_path(data_dir);
    if !fs.exists(&path) {
        return Ok(ProviderProfile::default());
    }
    ProviderProfile::parse(&fs.read_to_string(&path)?)
}

/// 配線: 標準アダプタで App を組み立てる
///
/// verbose のときは JSONL ログに加えて stderr にもログを出す。
pub fn wire_recipe(verbose: bool) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let clock: Arc<dyn Clock> = Arc::new(StdClock);
    let env: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let data_dir = env.resolve_data_dir()?;

    let file_log: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), log_path(&data_dir)));
    let logger: Arc<dyn Log> = if verbose {
        let stderr_log: Arc<dyn Log> = Arc::new(StderrLog);
        Arc::new(TeeLog::new(vec![file_log, stderr_log]))
    } else {
        file_log
    };

    let profile = load_profile(fs.as_ref(), &data_dir)?;
    let api_key = env.var(&profile.api_key_env);
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
    let provider: Arc<dyn LlmProvider> = Arc::new(OpenAiCompatProvider::new(&profile, api_key, http));
    let id_gen = Arc::new(StdRecipeIdGenerator::new(Arc::clone(&clock)));
    let generator: Arc<dyn RecipeGenerator> =
        Arc::new(ChatRecipeGenerator::new(provider, id_gen, Arc::clone(&logger)));

    let kv: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(fs, storage_dir(&data_dir)));

    Ok(App {
        logger,
        kv,
        clock,
        generator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_data_dir() {
        let d = DataDir::new("/data/recipe-ai");
        assert_eq!(config_path(&d), PathBuf::from("/data/recipe-ai/config.json"));
        assert_eq!(log_path(&d), PathBuf::from("/data/recipe-ai/logs/recipe.jsonl"));
        assert_eq!(storage_dir(&d), PathBuf::from("/data/recipe-ai/storage"));
    }

    #[test]
    fn test_load_profile_defaults_without_file() {
        let tmp = tempfile::tempdir().unwrap();
        let d = DataDir::new(tmp.path());
        let p = load_profile(&StdFileSystem, &d).unwrap();
        assert_eq!(p, ProviderProfile::default());
    }

    #[test]
    fn test_load_profile_reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("config.json"),
            r#"{"base_url":"http://localhost:8080/v1","model":"local-model"}"#,
        )
        .unwrap();
        let p = load_profile(&StdFileSystem, &DataDir::new(tmp.path())).unwrap();
        assert_eq!(p.base_url, "http://localhost:8080/v1");
        assert_eq!(&*p.model, "local-model");
        assert_eq!(p.temperature, 0.7);
    }

    #[test]
    fn test_load_profile_broken_file_is_json_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("config.json"), "{").unwrap();
        let err = load_profile(&StdFileSystem, &DataDir::new(tmp.path())).unwrap_err();
        assert_eq!(err.exit_code(), 65);
    }
}
