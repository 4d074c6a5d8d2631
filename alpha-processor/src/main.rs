use alpha_processor::{create_config_template, load_config, MessageProcessor, ProcessorConfig, RawMessage};
use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::info;

const CONFIG_ENV: &str = "ALPHA_PROCESSOR_CONFIG";

#[derive(Debug, PartialEq)]
enum Command {
    /// Write a config template to the path
    InitConfig(String),
    /// Process one message from the path, or stdin when absent
    Process(Option<String>),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command> {
    match args.next() {
        Some(flag) if flag == "--init-config" => {
            let path = args.next().context("usage: alpha-processor --init-config <path>")?;
            Ok(Command::InitConfig(path))
        }
        other => Ok(Command::Process(other)),
    }
}

fn resolve_config(path: Option<String>) -> Result<ProcessorConfig> {
    match path {
        Some(path) => load_config(&path).with_context(|| format!("loading config from {}", path)),
        None => Ok(ProcessorConfig::default()),
    }
}

fn parse_message(input: &str) -> Result<RawMessage> {
    serde_json::from_str(input).context("message must be a JSON object")
}

/// Parse, process and render one message as pretty JSON
fn run(processor: &MessageProcessor, input: &str) -> Result<String> {
    let raw = parse_message(input)?;
    let enriched = processor.process(raw)?;
    Ok(serde_json::to_string_pretty(&enriched)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let source = match parse_args(std::env::args().skip(1))? {
        Command::InitConfig(path) => {
            create_config_template(&path)?;
            println!("Wrote config template to {}", path);
            return Ok(());
        }
        Command::Process(source) => source,
    };

    let config = resolve_config(std::env::var(CONFIG_ENV).ok())?;

    // Initialize logging; stdout is reserved for the enriched message
    tracing_subscriber::fmt()
        .with_max_level(config.logging.max_level())
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Starting alpha processor");

    let input = match source {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading message from {}", path))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let processor = MessageProcessor::from_config(&config);
    println!("{}", run(&processor, &input)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_processor::ProcessError;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(args(&[])).unwrap(), Command::Process(None));
        assert_eq!(
            parse_args(args(&["msg.json"])).unwrap(),
            Command::Process(Some("msg.json".to_string()))
        );
        assert_eq!(
            parse_args(args(&["--init-config", "processor.toml"])).unwrap(),
            Command::InitConfig("processor.toml".to_string())
        );
        assert!(parse_args(args(&["--init-config"])).is_err());
    }

    #[test]
    fn test_parse_message_requires_object() {
        assert!(parse_message(r#"{"symbol": "AAPL"}"#).is_ok());

        for input in ["[1, 2]", "\"AAPL\"", "42", "null", "{not json"] {
            let err = parse_message(input).unwrap_err();
            assert!(err.to_string().contains("message must be a JSON object"));
        }
    }

    #[test]
    fn test_run_renders_enriched_message() {
        let output = run(
            &MessageProcessor::new(),
            r#"{"symbol": "AAPL", "timestamp": 1000, "data": {"price": 150}}"#,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["data"]["alpha_score"], serde_json::json!(1.0));
        assert_eq!(value["symbol"], serde_json::json!("AAPL"));
    }

    #[test]
    fn test_run_fails_on_invalid_message() {
        let err = run(&MessageProcessor::new(), "{}").unwrap_err();
        assert_eq!(err.to_string(), "Invalid message format");
        assert!(err.downcast_ref::<ProcessError>().unwrap().is_validation());
    }

    #[test]
    fn test_resolve_config() {
        assert_eq!(resolve_config(None).unwrap(), ProcessorConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processor.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let config = resolve_config(Some(path.to_str().unwrap().to_string())).unwrap();
        assert_eq!(config.logging.level, "debug");

        let missing = dir.path().join("missing.toml");
        let err = resolve_config(Some(missing.to_str().unwrap().to_string())).unwrap_err();
        assert!(err.to_string().contains("loading config from"));
    }
}
