// Sends the quote form to the form relay and interprets its JSON reply.

use gloo_net::http::Request;
use serde_json::Value;

use crate::error::SubmitError;

pub const SUBMIT_ENDPOINT: &str = "https://api.web3forms.com/submit";
pub const SENDING_LABEL: &str = "Envoi en cours...";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: Option<String>,
}

impl SubmitResponse {
    /// Reads a relay reply leniently: only a literal `"success": true`
    /// counts as accepted, and `message` is kept only when it is a string.
    pub fn from_value(reply: &Value) -> SubmitResponse {
        SubmitResponse {
            success: reply.get("success") == Some(&Value::Bool(true)),
            message: reply.get("message").and_then(Value::as_str).map(str::to_owned),
        }
    }

    pub fn into_result(self) -> Result<(), SubmitError> {
        if self.success {
            Ok(())
        } else {
            Err(SubmitError::Rejected(self.message))
        }
    }
}

/// `application/x-www-form-urlencoded` body for the given pairs, in order.
pub fn encode_form(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Fails only when the body is not JSON at all.
pub fn parse_response(body: &str) -> Result<SubmitResponse, SubmitError> {
    let reply: Value = serde_json::from_str(body)?;
    Ok(SubmitResponse::from_value(&reply))
}

pub async fn submit_form(endpoint: &str, pairs: &[(String, String)]) -> Result<(), SubmitError> {
    let response = Request::post(endpoint)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Accept", "application/json")
        .body(encode_form(pairs))
        .send()
        .await?;
    let body = response.text().await?;
    parse_response(&body)?.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_owned(), value.to_owned())
    }

    #[test]
    fn encodes_pairs_in_order() {
        let body = encode_form(&[
            pair("nom", "Jean Dupont"),
            pair("email", "jean@exemple.fr"),
            pair("message", "Site & boutique?"),
        ]);
        assert_eq!(
            body,
            "nom=Jean%20Dupont&email=jean%40exemple.fr&message=Site%20%26%20boutique%3F"
        );
        assert_eq!(encode_form(&[]), "");
    }

    #[test]
    fn success_true_is_accepted() {
        let response = parse_response(r#"{"success": true, "message": "Email sent"}"#).unwrap();
        assert!(response.into_result().is_ok());
    }

    #[test]
    fn success_false_is_rejected_with_message() {
        let err = parse_response(r#"{"success": false, "message": "Invalid access key"}"#)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(Some(ref m)) if m == "Invalid access key"));
    }

    #[test]
    fn missing_success_counts_as_rejection() {
        let response = parse_response("{}").unwrap();
        assert!(matches!(response.into_result(), Err(SubmitError::Rejected(None))));
    }

    #[test]
    fn non_boolean_success_is_a_rejection() {
        for body in [r#"{"success": null}"#, r#"{"success": "true"}"#, r#"{"success": 1}"#, "[true]"] {
            let response = parse_response(body).unwrap();
            assert!(
                matches!(response.into_result(), Err(SubmitError::Rejected(None))),
                "body {}",
                body
            );
        }
    }

    #[test]
    fn non_string_message_is_dropped() {
        let err = parse_response(r#"{"success": false, "message": {"code": 3}}"#)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(None)));
        assert_eq!(err.user_message(), SubmitError::Rejected(None).user_message());
    }

    #[test]
    fn non_string_message_does_not_hide_success() {
        let response = parse_response(r#"{"success": true, "message": 42}"#).unwrap();
        assert_eq!(
            response,
            SubmitResponse {
                success: true,
                message: None
            }
        );
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        assert!(matches!(
            parse_response("<html>502</html>"),
            Err(SubmitError::Decode(_))
        ));
    }
}
