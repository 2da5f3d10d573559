//! Form-copy executor binding over the Apps Script execution API.
//!
//! The copy itself runs inside a hosted script project; this client only
//! invokes the `copy_form` function and interprets the operation envelope.

use serde::Deserialize;

use citysync_core::{CityName, Credentials, FormUrl, SheetKey};
use citysync_roster::{FormCopier, RosterError};

use crate::http::{agent, bearer, roster_err, send_json};

const SCRIPT_API_BASE: &str = "https://script.googleapis.com/v1/scripts";
/// Function name inside the hosted script project.
const COPY_FUNCTION: &str = "copy_form";

pub struct ScriptFormCopier {
    agent: ureq::Agent,
    token: String,
    script_id: String,
}

impl ScriptFormCopier {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            agent: agent(),
            token: credentials.google_token.clone(),
            script_id: credentials.copy_script_id.clone(),
        }
    }
}

impl FormCopier for ScriptFormCopier {
    fn copy_form(
        &self,
        city: &CityName,
        responses_key: &SheetKey,
    ) -> Result<FormUrl, RosterError> {
        let url = format!("{SCRIPT_API_BASE}/{}:run", self.script_id);
        let request = self
            .agent
            .post(&url)
            .set("Authorization", &bearer(&self.token));
        let payload = serde_json::json!({
            "function": COPY_FUNCTION,
            "parameters": [city.0, responses_key.0],
        });
        let body = send_json(request, payload).map_err(roster_err)?;
        parse_copy_result(&body)
    }
}

// ---------------------------------------------------------------------------
// Operation envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ScriptOperation {
    #[serde(default)]
    done: bool,
    error: Option<ScriptStatus>,
    response: Option<ScriptResponse>,
}

#[derive(Debug, Deserialize)]
struct ScriptStatus {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ScriptResponse {
    result: Option<serde_json::Value>,
}

fn parse_copy_result(body: &str) -> Result<FormUrl, RosterError> {
    let operation: ScriptOperation = serde_json::from_str(body)
        .map_err(|err| RosterError::Malformed(format!("script operation: {err}")))?;
    if let Some(status) = operation.error {
        return Err(RosterError::Api(format!(
            "{COPY_FUNCTION} failed: {}",
            status.message
        )));
    }
    if !operation.done {
        return Err(RosterError::Api(format!(
            "{COPY_FUNCTION} run did not complete"
        )));
    }
    match operation.response.and_then(|response| response.result) {
        Some(serde_json::Value::String(url)) if !url.is_empty() => Ok(FormUrl::from(url)),
        _ => Err(RosterError::Malformed(format!(
            "{COPY_FUNCTION} returned no form URL"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_run_yields_the_form_url() {
        let body = r#"{"done":true,"response":{"result":"https://docs.google.com/forms/d/f-1"}}"#;
        assert_eq!(
            parse_copy_result(body).expect("url"),
            FormUrl::from("https://docs.google.com/forms/d/f-1")
        );
    }

    #[test]
    fn script_error_is_surfaced() {
        let body = r#"{"done":true,"error":{"code":3,"message":"Script error: no template"}}"#;
        let err = parse_copy_result(body).expect_err("error envelope");
        assert!(err.to_string().contains("no template"));
    }

    #[test]
    fn missing_result_is_malformed() {
        let body = r#"{"done":true,"response":{}}"#;
        assert!(matches!(
            parse_copy_result(body),
            Err(RosterError::Malformed(_))
        ));
    }

    #[test]
    fn incomplete_run_is_an_api_error() {
        let body = r#"{"done":false}"#;
        assert!(matches!(parse_copy_result(body), Err(RosterError::Api(_))));
    }

    #[test]
    fn non_string_result_is_malformed() {
        let body = r#"{"done":true,"response":{"result":{"unexpected":"shape"}}}"#;
        assert!(matches!(
            parse_copy_result(body),
            Err(RosterError::Malformed(_))
        ));
    }
}
