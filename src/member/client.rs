//! This module provides a client to connect to the member directory server

use std::error::Error;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use url::Url;

use crate::member::{Member, Rejected, Signup};
use crate::traits::MemberSource;


/// What the server answers to every request
#[derive(Debug, Deserialize)]
struct Reply {
    rt: String,
    #[serde(default)]
    member: Option<Member>,
    #[serde(default)]
    msg: Option<String>,
}


/// A member source that fetches its data from the member directory server
#[derive(Clone, Debug)]
pub struct RemoteDirectory {
    base: Url,
    client: reqwest::Client,
}

impl RemoteDirectory {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(base: S) -> Result<Self, Box<dyn Error>> {
        let base = Url::parse(base.as_ref())?;
        if base.cannot_be_a_base() {
            return Err(format!("{} cannot be used as a base URL", base).into());
        }

        Ok(Self {
            base,
            client: reqwest::Client::new(),
        })
    }

    /// Create a client for the server set in [`MEMBER_API_URL`](crate::config::MEMBER_API_URL)
    pub fn from_config() -> Result<Self, Box<dyn Error>> {
        Self::new(crate::config::member_api_url())
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `{base}/member/{segment}`
    fn member_url(&self, segment: &str) -> Result<Url, Box<dyn Error>> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| format!("{} cannot be used as a base URL", self.base))?
            .pop_if_empty()
            .push("member")
            .push(segment);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
    }

    /// Send a request, and make sure the server accepted it
    async fn send(&self, request: RequestBuilder) -> Result<Reply, Box<dyn Error>> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() == false {
            return Err(format!("Unexpected HTTP status code {}", status).into());
        }

        let text = response.text().await?;
        let reply: Reply = serde_json::from_str(&text)?;
        if reply.rt != "OK" {
            let message = reply.msg.unwrap_or(reply.rt);
            return Err(Box::new(Rejected { message }));
        }
        Ok(reply)
    }
}

#[async_trait]
impl MemberSource for RemoteDirectory {
    async fn get_member(&self, id: &str) -> Result<Option<Member>, Box<dyn Error>> {
        let url = self.member_url(id)?;
        log::debug!("Fetching member {} from {}", id, url);
        let reply = self.send(self.request(Method::GET, url)).await?;
        Ok(reply.member)
    }

    async fn update_member(&mut self, member: &Member) -> Result<Member, Box<dyn Error>> {
        let url = self.member_url(&member.id)?;
        let body = serde_json::to_string(member)?;
        let reply = self.send(self.request(Method::PUT, url).body(body)).await?;
        Ok(reply.member.unwrap_or_else(|| member.clone()))
    }

    async fn delete_member(&mut self, id: &str) -> Result<(), Box<dyn Error>> {
        let url = self.member_url(id)?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn signup(&mut self, signup: &Signup) -> Result<Member, Box<dyn Error>> {
        let url = self.member_url("signup")?;
        let body = serde_json::to_string(signup)?;
        let reply = self.send(self.request(Method::POST, url).body(body)).await?;
        Ok(reply.member.unwrap_or_else(|| signup.to_member()))
    }
}
