#[cfg(test)]
#[path = "endpoint_test.rs"]
mod tests;

/// Base URL of the chat service. Everything that talks to or describes the
/// service takes one of these instead of reading configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
}

impl Endpoint {
    pub fn new(base_url: &str) -> Endpoint {
        return Endpoint {
            base_url: base_url.trim().to_string(),
        };
    }

    pub fn base_url(&self) -> &str {
        return &self.base_url;
    }

    pub fn chat_url(&self) -> String {
        return format!("{}/chat", self.base_url.trim_end_matches('/'));
    }

    pub fn is_local(&self) -> bool {
        return self.base_url.contains("localhost") || self.base_url.contains("127.0.0.1");
    }

    pub fn display_host(&self) -> String {
        for scheme in ["https://", "http://"] {
            if let Some(host) = self.base_url().strip_prefix(scheme) {
                return host.to_string();
            }
        }

        return self.base_url.to_string();
    }
}
