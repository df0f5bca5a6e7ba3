use std::time::Duration;

use anyhow::Result;
use application::interfaces::tax_id::{CpfLookup, TaxIdError, TaxIdVerifier};
use async_trait::async_trait;
use domain::value_objects::{birth_dates::BirthDate, cpf::Cpf};
use serde::Deserialize;
use tracing::{error, warn};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Receita Federal CPF lookup through the hubdodesenvolvedor.com.br API.
pub struct HubDevClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct HubDevResponse {
    status: bool,
    #[serde(rename = "return", default)]
    return_: Option<String>,
    #[serde(default)]
    message: Option<String>,
    result: Option<HubDevResult>,
}

#[derive(Debug, Deserialize)]
struct HubDevResult {
    #[serde(default)]
    numero_de_cpf: String,
    #[serde(default)]
    nome_da_pf: String,
    #[serde(default)]
    data_nascimento: String,
    #[serde(default)]
    situacao_cadastral: String,
}

impl HubDevClient {
    pub fn new(api_url: String, token: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}

#[async_trait]
impl TaxIdVerifier for HubDevClient {
    async fn consult_cpf(&self, cpf: &Cpf, birth_date: BirthDate) -> Result<CpfLookup, TaxIdError> {
        let resp = self
            .http
            .get(format!("{}/v2/cpf/", self.api_url))
            .query(&[
                ("cpf", cpf.value().to_string()),
                ("data", birth_date.to_br_format()),
                ("token", self.token.clone()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            error!(status = %status, "receita_federal: lookup request failed");
            return Err(TaxIdError::Unavailable(format!("status {status}")));
        }

        parse_response(&body)
    }
}

/// The request URL carries the token and the CPF, so it is dropped before logging.
fn transport_error(err: reqwest::Error) -> TaxIdError {
    let err = err.without_url();
    if err.is_timeout() {
        warn!(error = ?err, "receita_federal: lookup timed out");
        TaxIdError::Timeout
    } else {
        error!(error = ?err, "receita_federal: lookup transport error");
        TaxIdError::Unavailable(err.to_string())
    }
}

fn parse_response(body: &[u8]) -> Result<CpfLookup, TaxIdError> {
    let parsed: HubDevResponse = serde_json::from_slice(body).map_err(|err| {
        error!(parse_error = ?err, "receita_federal: unreadable response");
        TaxIdError::Unavailable("unreadable response".to_string())
    })?;

    if !parsed.status {
        let reason = parsed
            .message
            .or(parsed.return_)
            .unwrap_or_else(|| "data not found".to_string());
        warn!(%reason, "receita_federal: CPF not found");
        return Err(TaxIdError::Rejected(reason));
    }

    let result = parsed
        .result
        .ok_or_else(|| TaxIdError::Unavailable("response without result".to_string()))?;

    if result.nome_da_pf.trim().is_empty() {
        return Err(TaxIdError::Rejected("empty registry name".to_string()));
    }

    Ok(CpfLookup {
        name: result.nome_da_pf.trim().to_string(),
        cpf: result.numero_de_cpf,
        birth_date: result.data_nascimento,
        registration_status: result.situacao_cadastral,
    })
}
