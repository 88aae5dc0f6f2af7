//! CLI command implementations
//!
//! Every command reads at most one JSON document from its input and writes
//! exactly one JSON response line to its output.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::model::{Criteria, SuperFilter};
use crate::translator::{Backend, QueryTranslator, TranslatorConfig};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one `*.json` schema per entity (required)
    pub schema_dir: String,

    /// Translator settings, all optional
    #[serde(flatten)]
    pub translator: TranslatorConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.schema_dir.trim().is_empty() {
            return Err(CliError::config_error("schema_dir cannot be empty"));
        }

        self.translator
            .validate()
            .map_err(|e| CliError::config_error(e.message()))
    }

    /// Get schema directory as Path
    pub fn schema_path(&self) -> &Path {
        Path::new(&self.schema_dir)
    }

    /// Builds a translator and registers every schema of `schema_dir`
    pub fn build_translator(&self) -> CliResult<QueryTranslator> {
        let mut translator = QueryTranslator::with_config(self.translator.clone())?;
        translator.load_schemas(self.schema_path())?;
        Ok(translator)
    }
}

/// One translation request
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub criteria: Criteria,
    #[serde(default)]
    pub super_filters: Vec<SuperFilter>,
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command on stdin and stdout
pub fn run_command(cmd: Command) -> CliResult<()> {
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    match cmd {
        Command::Translate {
            config,
            entity,
            backend,
        } => translate(&config, &entity, backend.into(), &mut input, &mut output),
        Command::Validate => validate(&mut input, &mut output),
        Command::Schemas { config } => schemas(&config, &mut output),
    }
}

/// Translate one request
///
/// Translation failures are reported as error responses; only setup and
/// I/O failures are returned as `CliError`.
pub fn translate<R: Read, W: Write>(
    config_path: &Path,
    entity: &str,
    backend: Backend,
    input: &mut R,
    output: &mut W,
) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let translator = config.build_translator()?;
    let request: TranslateRequest = read_request(input)?;

    let result = match backend {
        Backend::Mongo => translator
            .to_mongo(entity, request.criteria, &request.super_filters)
            .map(|query| query.to_relaxed_extjson()),
        Backend::Elastic => translator
            .to_elastic(entity, request.criteria, &request.super_filters)
            .and_then(|body| {
                serde_json::from_str::<Value>(&body).map_err(|e| {
                    crate::translator::SearchError::serialization_failed(e.to_string())
                })
            }),
    };

    match result {
        Ok(query) => write_response(output, json!({ "backend": backend.as_str(), "query": query })),
        Err(e) => write_error(output, e.code().code(), e.message()),
    }
}

/// Validate a criteria and list every structural error
pub fn validate<R: Read, W: Write>(input: &mut R, output: &mut W) -> CliResult<()> {
    let criteria: Criteria = read_request(input)?;

    let errors = match criteria.validate() {
        Ok(()) => Vec::new(),
        Err(e) => e.messages(),
    };

    write_response(
        output,
        json!({
            "valid": errors.is_empty(),
            "errors": errors,
        }),
    )
}

/// List registered entities with their fields
pub fn schemas<W: Write>(config_path: &Path, output: &mut W) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let translator = config.build_translator()?;
    let registry = translator.registry();

    let mut entities = Vec::with_capacity(registry.len());
    for name in registry.entities() {
        if let Some(schema) = registry.get(name) {
            entities.push(serde_json::to_value(schema)?);
        }
    }

    write_response(output, json!({ "entities": entities }))
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup(temp_dir: &TempDir) -> PathBuf {
        let schema_dir = temp_dir.path().join("schemas");
        fs::create_dir_all(&schema_dir).unwrap();
        fs::write(
            schema_dir.join("orders.json"),
            json!({
                "entity_name": "orders",
                "fields": {
                    "amount": {"type": "number"},
                    "created_at": {"type": "date"},
                    "title": {"type": "string", "is_analyzed": true}
                }
            })
            .to_string(),
        )
        .unwrap();

        let config_path = temp_dir.path().join("searcher.json");
        fs::write(
            &config_path,
            json!({ "schema_dir": schema_dir.to_string_lossy() }).to_string(),
        )
        .unwrap();
        config_path
    }

    fn run_translate(config: &Path, backend: Backend, request: Value) -> Value {
        let body = request.to_string();
        let mut input = body.as_bytes();
        let mut output = Vec::new();
        translate(config, "orders", backend, &mut input, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    fn amount_request() -> Value {
        json!({
            "criteria": {
                "query": {
                    "filters": [{
                        "conditions": [
                            {"field": "amount", "operator": ">=", "value": 100},
                            {"field": "amount", "operator": "<", "value": 500}
                        ],
                        "logical": "AND"
                    }]
                }
            },
            "super_filters": [{"field": "client_id", "value": "acme"}]
        })
    }

    #[test]
    fn test_translate_elastic() {
        let temp_dir = TempDir::new().unwrap();
        let config = setup(&temp_dir);

        let response = run_translate(&config, Backend::Elastic, amount_request());
        assert_eq!(response["status"], "ok");
        assert_eq!(response["data"]["backend"], "elastic");

        let query = &response["data"]["query"];
        assert_eq!(query["size"], 50);
        assert_eq!(query["query"]["bool"]["must"][0], json!({"term": {"client_id": "acme"}}));
    }

    #[test]
    fn test_translate_mongo() {
        let temp_dir = TempDir::new().unwrap();
        let config = setup(&temp_dir);

        let response = run_translate(&config, Backend::Mongo, amount_request());
        let query = &response["data"]["query"];
        assert_eq!(query["limit"], 50);
        assert_eq!(query["offset"], 0);
        assert_eq!(query["filters"]["$and"][0], json!({"client_id": "acme"}));
    }

    #[test]
    fn test_translate_error_response() {
        let temp_dir = TempDir::new().unwrap();
        let config = setup(&temp_dir);

        let request = json!({
            "criteria": {"query": {"sorts": [{"field": "secret", "order": "asc"}]}}
        });
        let response = run_translate(&config, Backend::Elastic, request);

        assert_eq!(response["status"], "error");
        assert_eq!(response["code"], "SEARCH_UNKNOWN_FIELD");
    }

    #[test]
    fn test_translate_malformed_request() {
        let temp_dir = TempDir::new().unwrap();
        let config = setup(&temp_dir);

        let mut input = "{\"criteria\": {\"query\": {\"logical\": \"xor\"}}}".as_bytes();
        let mut output = Vec::new();
        let err = translate(&config, "orders", Backend::Mongo, &mut input, &mut output)
            .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::InvalidRequest);
    }

    #[test]
    fn test_validate_reports_all_messages() {
        let body = json!({
            "pagination": {"limit": 10},
            "query": {
                "filters": [{
                    "conditions": [
                        {"field": "", "operator": "=", "value": 1},
                        {"field": "a", "operator": "=", "value": null}
                    ],
                    "logical": "or"
                }]
            }
        })
        .to_string();
        let mut input = body.as_bytes();
        let mut output = Vec::new();
        validate(&mut input, &mut output).unwrap();

        let response: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(response["data"]["valid"], false);
        assert_eq!(response["data"]["errors"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_validate_ok() {
        let mut input = "{}".as_bytes();
        let mut output = Vec::new();
        validate(&mut input, &mut output).unwrap();

        let response: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(response["data"], json!({"valid": true, "errors": []}));
    }

    #[test]
    fn test_schemas_lists_entities() {
        let temp_dir = TempDir::new().unwrap();
        let config = setup(&temp_dir);

        let mut output = Vec::new();
        schemas(&config, &mut output).unwrap();

        let response: Value = serde_json::from_slice(&output).unwrap();
        let entities = response["data"]["entities"].as_array().unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0]["entity_name"], "orders");
        assert_eq!(entities[0]["fields"]["title"]["is_analyzed"], true);
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = setup(&temp_dir);

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.translator, TranslatorConfig::default());
    }

    #[test]
    fn test_config_validates_default_limit() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("searcher.json");
        fs::write(
            &config_path,
            json!({"schema_dir": "/tmp", "default_limit": 5000}).to_string(),
        )
        .unwrap();

        let err = Config::load(&config_path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_config_requires_schema_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("searcher.json");
        fs::write(&config_path, "{}").unwrap();

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_missing_schema_dir_fails_setup() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("searcher.json");
        let missing = temp_dir.path().join("absent");
        fs::write(
            &config_path,
            json!({"schema_dir": missing.to_string_lossy()}).to_string(),
        )
        .unwrap();

        let mut output = Vec::new();
        let err = schemas(&config_path, &mut output).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::SetupFailed);
    }
}
