//! Browser detection for the about box.

use std::sync::Arc;

use uaparser::{Parser, UserAgentParser};

use crate::server::error::{internal::InternalError, AppError};

const USER_AGENT_REGEXES: &[u8] = include_bytes!("../../../user_agent_header_regexes.yaml");

/// Browser and NW.js details extracted from a User-Agent header.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserDetails {
    pub browser: String,
    pub nwjs_version: Option<String>,
}

/// Builds the parser shared through `AppState`.
pub fn create_user_agent_parser() -> Result<Arc<UserAgentParser>, AppError> {
    let parser = UserAgentParser::from_bytes(USER_AGENT_REGEXES)
        .map_err(|e| InternalError::UserAgentParser(format!("{:?}", e)))?;

    Ok(Arc::new(parser))
}

/// Parses `agent`.
///
/// NW.js desktop agents look like `Nwjs:<nw version>-<node>-<chromium version>`. Other
/// agents go through `parser`; agents it does not recognise fall back to the text
/// before the first `/`.
pub fn detect_browser(parser: &UserAgentParser, agent: &str) -> BrowserDetails {
    if agent.contains("Nwjs") {
        let parts: Vec<&str> = agent.split('-').collect();
        let nwjs_version = parts
            .first()
            .and_then(|first| first.split(':').nth(1))
            .map(str::to_string);
        let chromium = parts.get(2).copied().unwrap_or_default();

        return BrowserDetails {
            browser: format!("Chromium {}", chromium),
            nwjs_version,
        };
    }

    let client = parser.parse_user_agent(agent);
    if client.family == "Other" {
        return BrowserDetails {
            browser: agent.split('/').next().unwrap_or_default().to_string(),
            nwjs_version: None,
        };
    }

    let version = [&client.major, &client.minor, &client.patch]
        .into_iter()
        .map_while(|part| part.as_deref())
        .collect::<Vec<_>>()
        .join(".");

    let browser = if version.is_empty() {
        client.family.to_string()
    } else {
        format!("{} {}", client.family, version)
    };

    BrowserDetails {
        browser,
        nwjs_version: None,
    }
}

/// Operating system the server runs on, e.g. `linux-x86_64`.
pub fn os_details() -> String {
    format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}
