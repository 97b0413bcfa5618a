//! 설정 로드.
//!
//! 우선순위: CLI 인자 > 환경변수(`WEBTRACK_WEB_API__*`) > 설정 파일.
//! 설정 파일은 `--config`로 지정하거나 플랫폼별 설정 디렉토리의
//! `config.toml`을 사용한다.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use webtrack_core::config::WebApiConfig;

/// 설정 파일 이름
const CONFIG_FILE_NAME: &str = "config.toml";

/// 환경변수 접두사
const ENV_PREFIX: &str = "WEBTRACK";

/// 설정 파일 최상위 구조
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    web_api: WebApiConfig,
}

/// CLI에서 덮어쓸 값
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub url: Option<String>,
    pub frequency_secs: Option<u64>,
    pub insecure: bool,
}

/// 플랫폼별 기본 설정 파일 경로
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "webtrack").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// 설정 로드 및 검증
///
/// `path`를 명시하면 파일이 반드시 있어야 한다.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<WebApiConfig> {
    load_with_env(path, environment(None), overrides)
}

/// `WEBTRACK_WEB_API__URL` → `web_api.url`
///
/// `source`가 주어지면 프로세스 환경변수 대신 그 맵을 읽는다.
fn environment(source: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(source)
}

fn load_with_env(
    path: Option<&Path>,
    env: Environment,
    overrides: &Overrides,
) -> Result<WebApiConfig> {
    let mut builder = Config::builder();

    match path {
        Some(path) => {
            debug!("설정 파일: {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }
        None => {
            if let Some(path) = default_config_path() {
                debug!("기본 설정 파일 (선택): {}", path.display());
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }
    }

    builder = builder.add_source(env);

    let file_config: FileConfig = builder
        .build()
        .context("설정 로드 실패")?
        .try_deserialize()
        .context("설정 형식 오류")?;

    let config = apply_overrides(file_config.web_api, overrides);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(mut config: WebApiConfig, overrides: &Overrides) -> WebApiConfig {
    if let Some(url) = &overrides.url {
        config.url = Some(url.clone());
    }
    if let Some(frequency) = overrides.frequency_secs {
        config.frequency_secs = frequency;
    }
    if overrides.insecure {
        config.verify_connection = false;
    }
    config
}
