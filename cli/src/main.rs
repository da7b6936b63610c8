//! CLI entrypoint for team-monitor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use monitor_application::{
    ActivityReportInput, ActivityReportUseCase, CachePort, ChatBotUseCase, GetIssueStatusTool,
    GetIssueUpdatesTool, GetUserCommitsTool, GetUserContributedReposTool, GetUserIssuesTool,
    GetUserPrsTool, IdentityResolver, IssueTrackerPort, MemberActivityTool, NoCache,
    SourceControlPort, ToolRegistry,
};
use monitor_infrastructure::config::FileCacheConfig;
use monitor_infrastructure::{
    CacheBackend, ConfigLoader, FileConfig, GitHubClient, GitHubConfig, InMemoryCache, JiraClient,
    JiraConfig, JsonlConversationLogger, OpenAiConfig, OpenAiGateway, RedisCache,
};
use monitor_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormat, Spinner};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref());

    info!(
        model = %config.openai.model,
        cache = ?config.cache.backend,
        aggregation = %config.aggregation.mode,
        "Starting team-monitor"
    );

    // === Dependency Injection ===
    let cache = build_cache(&config.cache).await?;
    let identity = Arc::new(config.identity.to_resolver());
    let registry = build_registry(&config, cache, identity)?;
    info!(tools = ?registry.names(), "Tools registered");

    let api_key = config.openai.resolve_api_key().with_context(|| {
        format!(
            "OpenAI API key not found. Set {} or openai.api_key",
            config.openai.api_key_env
        )
    })?;
    let gateway = Arc::new(OpenAiGateway::new(
        OpenAiConfig::new(api_key)
            .with_model(&config.openai.model)
            .with_base_url(&config.openai.base_url)
            .with_max_tokens(config.openai.max_tokens)
            .with_timeout(Duration::from_secs(config.openai.timeout_seconds)),
    )?);

    let chat_config = config.chat.to_chat_bot_config();

    // Activity mode
    if let Some(name) = cli.activity {
        let use_case =
            ActivityReportUseCase::new(gateway, registry).with_timeout(chat_config.turn_timeout);
        let mut input = ActivityReportInput::new(name);
        if cli.summarize {
            input = input.with_summary();
        }

        let spinner = Spinner::start(!cli.quiet, "Collecting activity...");
        let token = CancellationToken::new();
        let result = tokio::select! {
            result = use_case.execute(input, token.clone()) => result,
            _ = tokio::signal::ctrl_c() => {
                token.cancel();
                spinner.fail("Cancelled");
                return Ok(());
            }
        };
        let report = match result {
            Ok(report) => {
                spinner.finish();
                report
            }
            Err(e) => {
                spinner.fail("Activity report failed");
                return Err(e.into());
            }
        };

        let output = match cli.output {
            OutputFormat::Text => ConsoleFormatter::format_report(&report),
            OutputFormat::Json => ConsoleFormatter::format_report_json(&report),
        };
        println!("{}", output);
        return Ok(());
    }

    let mut chat_bot = ChatBotUseCase::new(gateway, registry).with_config(chat_config);
    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => chat_bot = chat_bot.with_conversation_logger(Arc::new(logger)),
            None => warn!(path = %path.display(), "Conversation log disabled"),
        }
    }

    // Chat mode
    if cli.chat {
        let repl = ChatRepl::new(chat_bot)
            .with_history(ConfigLoader::history_path())
            .with_progress(!cli.quiet);

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let Some(question) = cli.question else {
        bail!("Question is required. Use --chat for interactive mode.");
    };

    let spinner = Spinner::start(!cli.quiet, "Thinking...");
    let result = chat_bot.handle(&question).await;
    spinner.finish();

    println!("{}", ConsoleFormatter::format_answer(&result?));

    Ok(())
}

/// Install the stderr subscriber, plus a file layer when `file` is set.
/// The returned guard flushes the file writer on drop.
fn init_logging(verbose: u8, file: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match file.and_then(open_log_file) {
        Some(writer) => {
            let (writer, guard) = tracing_appender::non_blocking(writer);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

fn open_log_file(path: &Path) -> Option<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Could not open log file {}: {}", path.display(), e);
            None
        }
    }
}

async fn build_cache(config: &FileCacheConfig) -> Result<Arc<dyn CachePort>> {
    let cache: Arc<dyn CachePort> = match config.backend {
        CacheBackend::Memory => Arc::new(InMemoryCache::new()),
        CacheBackend::None => Arc::new(NoCache),
        CacheBackend::Redis => {
            let url = config.redis_url.as_deref().unwrap_or_default();
            let redis = RedisCache::connect(url)
                .await
                .with_context(|| format!("Failed to connect to Redis at {url}"))?;
            Arc::new(redis)
        }
    };
    Ok(cache)
}

/// GitHub tools always; Jira tools when `jira.base_url` is set; the member
/// activity tool when both of its sub-tools are available.
fn build_registry(
    config: &FileConfig,
    cache: Arc<dyn CachePort>,
    identity: Arc<IdentityResolver>,
) -> Result<ToolRegistry> {
    let github: Arc<dyn SourceControlPort> = Arc::new(GitHubClient::new(
        GitHubConfig::default()
            .with_api_url(&config.github.api_url)
            .with_token(config.github.resolve_token())
            .with_timeout(Duration::from_secs(config.github.timeout_seconds))
            .with_ttls(config.cache.default_ttl(), config.cache.commits_ttl()),
        cache.clone(),
    )?);

    let mut builder = ToolRegistry::builder()
        .register(GetUserCommitsTool::new(github.clone(), identity.clone()))
        .register(GetUserPrsTool::new(github.clone(), identity.clone()))
        .register(GetUserContributedReposTool::new(github, identity.clone()));

    if config.jira.is_configured() {
        let jira: Arc<dyn IssueTrackerPort> = Arc::new(JiraClient::new(
            JiraConfig::new(&config.jira.base_url)
                .with_token(config.jira.resolve_token())
                .with_max_results(config.jira.max_results)
                .with_timeout(Duration::from_secs(config.jira.timeout_seconds))
                .with_cache_ttl(config.cache.default_ttl()),
            cache,
        )?);
        builder = builder
            .register(GetUserIssuesTool::new(jira.clone(), identity.clone()))
            .register(GetIssueStatusTool::new(jira.clone()))
            .register(GetIssueUpdatesTool::new(jira).with_limit(config.jira.updates_limit));
    } else {
        warn!("jira.base_url is not set, Jira tools are disabled");
    }

    let base = builder.build();
    let registry = match MemberActivityTool::from_registry(&base, identity) {
        Ok(tool) => base
            .to_builder()
            .register(tool.with_mode(config.aggregation.mode))
            .build(),
        Err(e) => {
            warn!(error = %e, "{} is disabled", MemberActivityTool::NAME);
            base
        }
    };
    Ok(registry)
}
