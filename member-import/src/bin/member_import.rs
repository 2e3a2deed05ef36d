use std::path::PathBuf;

use anyhow::{Context, bail};
use member_import::{
    BatchImporter, ImportClock, ImportReport, InMemoryStore, RegistryClient, SubmitReport,
    setup_environment,
};
use serde::Serialize;
use shared::error::AppError;

const USAGE: &str = "usage: member-import <file.xlsx|file.xls|file.csv> [--submit]";

/// JSON printed on stdout
#[derive(Serialize)]
struct Output {
    #[serde(flatten)]
    report: ImportReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    submitted: Option<SubmitReport>,
}

fn parse_args() -> anyhow::Result<(PathBuf, bool)> {
    let mut file = None;
    let mut submit = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--submit" => submit = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ if arg.starts_with("--") => bail!("unknown option {arg}\n{USAGE}"),
            _ if file.is_none() => file = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument {arg}\n{USAGE}"),
        }
    }
    let file = file.context(USAGE)?;
    Ok((file, submit))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment();
    let (path, submit) = parse_args()?;

    tracing::info!(path = %path.display(), submit, "Member import starting");

    // 2. 去重基线: 提交模式下以 API 中已有的会员为准
    let client = if submit {
        Some(RegistryClient::from_config(&config)?)
    } else {
        None
    };
    let mut store = match &client {
        Some(client) => {
            let existing = client
                .list_members()
                .await
                .context("failed to fetch existing members")?;
            tracing::info!(count = existing.len(), "Seeded duplicate index from API");
            InMemoryStore::from_records(existing.into_iter().map(|m| m.record))
        }
        None => InMemoryStore::new(),
    };

    // 3. 导入
    let importer = BatchImporter::from_config(&config);
    let report = match importer.import_file(&path, &mut store, &ImportClock::current()) {
        Ok(report) => report,
        Err(e) => {
            let err: AppError = e.into();
            tracing::warn!(
                code = %err.code,
                category = err.code.category().name(),
                "Import aborted: {}",
                err.message
            );
            return Err(err).with_context(|| format!("cannot import {}", path.display()));
        }
    };

    // 4. 提交
    let submitted = match &client {
        Some(client) => Some(client.submit_accepted(&report.accepted).await?),
        None => None,
    };

    let output = Output { report, submitted };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
