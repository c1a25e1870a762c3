use anyhow::{bail, Context, Result};
use colored::*;
use contract_schema::{load_schema_file, ContractSchema, SchemaComposer};
use message_composer::{parse_coins, ExecuteEnvelope};
use serde_json::Value;
use std::path::Path;
use tracing::info;

use crate::config::ComposerConfig;

pub fn compose(
    config: &ComposerConfig,
    schema_path: &Path,
    action: &str,
    args: &str,
    funds: Option<&str>,
    format: &str,
) -> Result<String> {
    let schema = load_schema(schema_path)?;
    let args: Value = serde_json::from_str(args)
        .with_context(|| format!("Failed to parse --args as JSON: {}", args))?;
    let funds = funds
        .map(parse_coins)
        .transpose()
        .context("Failed to parse --funds")?;

    let composer = SchemaComposer::new(schema, &config.sender, &config.contract);
    let envelope = composer
        .compose(action, &args, funds)
        .with_context(|| format!("Failed to compose '{}'", action))?;

    info!(action, contract = %config.contract, "envelope composed");
    render_envelope(&envelope, format)
}

pub fn render_envelope(envelope: &ExecuteEnvelope, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(envelope)?),
        "yaml" => Ok(serde_yaml::to_string(envelope)?),
        "payload" => Ok(String::from_utf8(envelope.msg().to_vec())?),
        other => bail!("Unknown format: {}. Allowed values: json, yaml, payload", other),
    }
}

pub fn actions(schema_path: &Path, format: &str) -> Result<String> {
    let schema = load_schema(schema_path)?;
    match format {
        "json" => Ok(serde_json::to_string_pretty(&schema.list_actions())?),
        "human" => Ok(render_actions(&schema)),
        other => bail!("Unknown format: {}. Allowed values: human, json", other),
    }
}

fn render_actions(schema: &ContractSchema) -> String {
    let mut out = String::new();
    let version = schema.version.as_deref().unwrap_or("unversioned");
    out.push_str(&format!(
        "{} {}\n",
        schema.name.bold(),
        format!("({})", version).dimmed()
    ));

    for action in schema.list_actions() {
        out.push_str(&format!("\n  {} -> {}\n", action.method_name.cyan(), action.name));
        if let Some(doc) = &action.doc {
            out.push_str(&format!("    {}\n", doc.dimmed()));
        }
        for param in &action.params {
            let marker = if param.required { "" } else { "?" };
            out.push_str(&format!(
                "    {}{}: {}\n",
                param.name.green(),
                marker,
                param.type_name
            ));
        }
    }
    out
}

fn load_schema(path: &Path) -> Result<ContractSchema> {
    load_schema_file(path).with_context(|| format!("Failed to load schema {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn trust_schema() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../schema/trust.json")
    }

    fn config() -> ComposerConfig {
        ComposerConfig {
            sender: "juno1sender".to_string(),
            contract: "juno1trust".to_string(),
        }
    }

    #[test]
    fn test_compose_payload_format() {
        let out = compose(
            &config(),
            &trust_schema(),
            "updateStakingInfo",
            r#"{"address":"addr1"}"#,
            None,
            "payload",
        )
        .unwrap();
        assert_eq!(out, r#"{"update_staking_info":{"address":"addr1"}}"#);
    }

    #[test]
    fn test_compose_json_with_funds() {
        let out = compose(
            &config(),
            &trust_schema(),
            "review",
            r#"{"address":"addr1","result":"ThumbsUp"}"#,
            Some("5ujuno,1uatom"),
            "json",
        )
        .unwrap();
        let json: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["typeUrl"], "/cosmwasm.wasm.v1.MsgExecuteContract");
        assert_eq!(json["value"]["contract"], "juno1trust");
        assert_eq!(json["value"]["funds"][1]["denom"], "uatom");
    }

    #[test]
    fn test_compose_rejects_bad_input() {
        assert!(compose(&config(), &trust_schema(), "review", "{", None, "json").is_err());
        assert!(compose(&config(), &trust_schema(), "review", "{}", Some("abc"), "json").is_err());
        assert!(compose(
            &config(),
            &trust_schema(),
            "updateStakingInfo",
            r#"{"address":"a"}"#,
            None,
            "xml"
        )
        .is_err());
    }

    #[test]
    fn test_actions_listing() {
        colored::control::set_override(false);
        let out = actions(&trust_schema(), "human").unwrap();
        assert!(out.starts_with("trust (0.1.0)"));
        assert!(out.contains("updateStakingInfo -> update_staking_info"));
        assert!(out.contains("maxStakedTokens: Uint128"));

        let json: Value = serde_json::from_str(&actions(&trust_schema(), "json").unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
    }
}
