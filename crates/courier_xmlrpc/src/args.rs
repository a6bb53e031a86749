use std::env;

/// A builder helper class to configure a new `Client`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ClientArgs {
    endpoint: String,
    user_agent: String,
    debug: bool,
}

impl ClientArgs {
    /// Constructs new `ClientArgs`. By default the values are read from the environment:
    ///
    /// * `XMLRPC_ENDPOINT` - overrides `default_endpoint`,
    /// * `XMLRPC_USER_AGENT` - the `User-Agent` sent with every call,
    /// * `XMLRPC_DEBUG` - when `1` or `true`, request and response bodies are logged.
    pub fn new<S: AsRef<str>>(default_endpoint: S) -> ClientArgs {
        ClientArgs {
            endpoint: env::var("XMLRPC_ENDPOINT")
                .unwrap_or_else(|_| default_endpoint.as_ref().to_owned()),
            user_agent: env::var("XMLRPC_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
            debug: env::var("XMLRPC_DEBUG")
                .map(|v| is_enabled(&v))
                .unwrap_or(false),
        }
    }

    /// Explicitly set the endpoint to the specified value.
    pub fn set_endpoint<S: AsRef<str>>(mut self, endpoint: S) -> ClientArgs {
        self.endpoint = endpoint.as_ref().to_owned();
        self
    }

    /// Explicitly set the user agent to the specified value.
    pub fn set_user_agent<S: AsRef<str>>(mut self, user_agent: S) -> ClientArgs {
        self.user_agent = user_agent.as_ref().to_owned();
        self
    }

    /// Enables or disables logging of request and response bodies.
    pub fn set_debug(mut self, debug: bool) -> ClientArgs {
        self.debug = debug;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

fn default_user_agent() -> String {
    format!("courier-xmlrpc/{}", env!("CARGO_PKG_VERSION"))
}

/// Interprets the value of a boolean environment variable.
fn is_enabled(value: &str) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_override_defaults() {
        let args = ClientArgs::new("http://localhost:8000/RPC2")
            .set_endpoint("http://example.com/RPC2")
            .set_user_agent("tester/1.0")
            .set_debug(true);
        assert_eq!(args.endpoint(), "http://example.com/RPC2");
        assert_eq!(args.user_agent(), "tester/1.0");
        assert!(args.debug());
    }

    #[test]
    fn user_agent_identifies_the_crate() {
        assert!(default_user_agent().starts_with("courier-xmlrpc/"));
    }

    #[test]
    fn boolean_flags() {
        assert!(is_enabled("1"));
        assert!(is_enabled(" TRUE "));
        assert!(!is_enabled("0"));
        assert!(!is_enabled(""));
    }
}
