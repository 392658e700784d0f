//! INWX Domrobot JSON-RPC client.
//!
//! Every call is a POST of `{"method", "params"}` to one endpoint. Replies
//! carry `code`, `msg` and, on success, `resData`. The session lives in the
//! `domrobot` cookie set by `account.login`.

use crate::domain::model::{
    AccountDefaults, ApiResponse, Credentials, DomainCheckData, PurchaseRequest, Session,
    SUCCESS_CODE,
};
use crate::domain::ports::RegistrarApi;
use crate::utils::error::{BuyerError, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

pub const LIVE_API_URL: &str = "https://api.domrobot.com/jsonrpc/";
pub const OTE_API_URL: &str = "https://api.ote.domrobot.com/jsonrpc/";

const SESSION_COOKIE: &str = "domrobot";

#[derive(Debug, Deserialize)]
struct RpcReply {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(rename = "resData", default)]
    res_data: Option<Value>,
}

impl RpcReply {
    fn into_response<T: DeserializeOwned>(self, operation: &str) -> Result<ApiResponse<T>> {
        if self.code != SUCCESS_CODE {
            return Ok(ApiResponse::failure(self.code, self.msg));
        }
        let raw = self
            .res_data
            .ok_or_else(|| BuyerError::protocol(operation, "success reply without resData"))?;
        let data = serde_json::from_value(raw)?;
        Ok(ApiResponse {
            code: self.code,
            message: self.msg,
            data: Some(data),
        })
    }

    fn into_status(self) -> ApiResponse<()> {
        ApiResponse {
            data: (self.code == SUCCESS_CODE).then_some(()),
            code: self.code,
            message: self.msg,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InwxClient {
    client: Client,
    endpoint: String,
    lang: String,
}

impl InwxClient {
    pub fn new(endpoint: impl Into<String>, lang: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, lang, None)
    }

    /// Without a timeout a stalled call blocks the run indefinitely.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        lang: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
            lang: lang.into(),
        })
    }

    async fn post(&self, session: Option<&Session>, method: &str, params: Value) -> Result<Response> {
        tracing::debug!("Calling {} on {}", method, self.endpoint);

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "method": method, "params": params }));
        if let Some(session) = session {
            request = request.header(COOKIE, format!("{}={}", SESSION_COOKIE, session.token()));
        }

        let response = request.send().await?.error_for_status()?;
        tracing::debug!("{} answered with HTTP {}", method, response.status());
        Ok(response)
    }

    async fn call(&self, session: Option<&Session>, method: &str, params: Value) -> Result<RpcReply> {
        let response = self.post(session, method, params).await?;
        read_reply(method, response).await
    }
}

/// A body that is not a Domrobot envelope is the registrar's fault, not the
/// network's.
async fn read_reply(method: &str, response: Response) -> Result<RpcReply> {
    let body = response.bytes().await?;
    let reply: RpcReply = serde_json::from_slice(&body)
        .map_err(|e| BuyerError::protocol(method, format!("reply is not a JSON-RPC envelope: {}", e)))?;
    tracing::debug!("{} returned code {}", method, reply.code);
    Ok(reply)
}

fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .find_map(|pair| {
            pair.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
                .map(str::to_string)
        })
}

#[async_trait]
impl RegistrarApi for InwxClient {
    async fn login(&self, credentials: &Credentials) -> Result<ApiResponse<Session>> {
        let params = json!({
            "user": credentials.username,
            "pass": credentials.password.expose_secret(),
            "lang": self.lang,
        });
        let response = self.post(None, "account.login", params).await?;
        let cookie = session_cookie(&response);
        let reply = read_reply("account.login", response).await?;

        if reply.code != SUCCESS_CODE {
            return Ok(ApiResponse::failure(reply.code, reply.msg));
        }

        // Accounts with 2FA answer the login with a pending `tfa` challenge.
        let tfa = reply
            .res_data
            .as_ref()
            .and_then(|data| data.get("tfa"))
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        if let Some(tfa) = tfa.filter(|method| method != "0") {
            return Err(BuyerError::protocol(
                "account.login",
                format!("account requires two-factor authentication ({}), which is not supported", tfa),
            ));
        }

        let token = cookie.ok_or_else(|| {
            BuyerError::protocol("account.login", "success reply without a session cookie")
        })?;
        Ok(ApiResponse {
            code: reply.code,
            message: reply.msg,
            data: Some(Session::new(token)),
        })
    }

    async fn account_info(&self, session: &Session) -> Result<ApiResponse<AccountDefaults>> {
        self.call(Some(session), "account.info", json!({}))
            .await?
            .into_response("account.info")
    }

    async fn check_domain(
        &self,
        session: &Session,
        domain: &str,
    ) -> Result<ApiResponse<DomainCheckData>> {
        self.call(Some(session), "domain.check", json!({ "domain": domain }))
            .await?
            .into_response("domain.check")
    }

    async fn create_domain(
        &self,
        session: &Session,
        request: &PurchaseRequest,
    ) -> Result<ApiResponse<()>> {
        Ok(self
            .call(Some(session), "domain.create", request.to_params())
            .await?
            .into_status())
    }

    async fn logout(&self, session: Session) -> Result<ApiResponse<()>> {
        Ok(self
            .call(Some(&session), "account.logout", json!({}))
            .await?
            .into_status())
    }
}
