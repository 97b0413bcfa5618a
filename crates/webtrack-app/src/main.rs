//! # webtrack-app
//!
//! webtrack 바이너리 진입점.
//! 설정 로드, 로깅 초기화, 메트릭 로그 재전송을 담당한다.

mod replay;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use webtrack_core::models::run::RunInfo;
use webtrack_network::writer::{MetricWriter, WriterState};

use crate::settings::Overrides;

/// webtrack, 실험 메트릭 원격 전송기
#[derive(Parser, Debug)]
#[command(name = "webtrack")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// 엔드포인트 URL (설정 파일보다 우선)
    #[arg(long, short = 'u', global = true)]
    url: Option<String>,

    /// 전송 주기 (초)
    #[arg(long, global = true)]
    frequency: Option<u64>,

    /// TLS 인증서 검증 생략
    #[arg(long, global = true)]
    insecure: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// JSON Lines 메트릭 로그를 학습 루프처럼 전송 (`-`는 표준 입력)
    Replay {
        file: String,

        /// 런 ID (기본: 새 UUID v4)
        #[arg(long)]
        run_uuid: Option<String>,

        /// 런 이름
        #[arg(long, default_value = "replay")]
        name: String,

        /// 런 코멘트
        #[arg(long, default_value = "")]
        comment: String,

        /// 하이퍼파라미터 (key=value, 반복 가능)
        #[arg(long = "param", short = 'p')]
        params: Vec<String>,
    },
    /// 적용될 설정을 JSON으로 출력
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "webtrack={},webtrack_core={},webtrack_network={}",
        args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    let overrides = Overrides {
        url: args.url.clone(),
        frequency_secs: args.frequency,
        insecure: args.insecure,
    };
    let config = settings::load(args.config.as_deref(), &overrides)?;

    match args.command {
        Command::CheckConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            println!("enabled: {}", config.is_enabled());
        }
        Command::Replay {
            file,
            run_uuid,
            name,
            comment,
            params,
        } => {
            let mut writer = MetricWriter::new(&config)?;
            if writer.state() == WriterState::Disabled {
                warn!("WEB API URL 미설정: 전송 없이 실행");
            }

            let run_uuid = run_uuid.unwrap_or_else(|| Uuid::new_v4().to_string());
            info!("재전송 시작: run_uuid={run_uuid}, 입력={file}");
            writer.set_info(RunInfo::new(run_uuid, name, comment));
            writer.set_hyperparams(replay::parse_params(&params)?);

            // 실패는 라이터가 경고로 기록하며 재전송은 계속한다
            let _ = writer.start().await;

            let reader: Box<dyn BufRead> = if file == "-" {
                Box::new(io::stdin().lock())
            } else {
                let handle =
                    File::open(&file).with_context(|| format!("입력 파일 열기 실패: {file}"))?;
                Box::new(BufReader::new(handle))
            };

            let summary = replay::run(&mut writer, reader).await?;
            let _ = writer.flush().await;

            let stats = writer.stats();
            info!(
                "재전송 종료: {} 스텝, 배치 전송 {} / 폐기 {}",
                summary.steps, stats.batches_sent, stats.batches_dropped
            );
        }
    }

    Ok(())
}
