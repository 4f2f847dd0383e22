//! Data for the about box.

use uaparser::UserAgentParser;

use crate::{
    model::about::AboutDto,
    server::{
        config::Config,
        model::user::User,
        util::user_agent::{detect_browser, os_details},
    },
};

pub struct AboutService<'a> {
    config: &'a Config,
    parser: &'a UserAgentParser,
}

impl<'a> AboutService<'a> {
    pub fn new(config: &'a Config, parser: &'a UserAgentParser) -> Self {
        Self { config, parser }
    }

    /// Describes the running instance as seen by `user` from the browser sending
    /// `user_agent`.
    pub fn index(&self, user: &User, user_agent: &str) -> AboutDto {
        let browser = detect_browser(self.parser, user_agent);

        let (app_mode, admin) = if self.config.server_mode {
            ("Server", Some(user.is_admin()))
        } else {
            ("Desktop", None)
        };

        AboutDto {
            browser_details: browser.browser,
            os_details: os_details(),
            nwjs: browser.nwjs_version,
            config_db: self.config.database_url.clone(),
            log_file: self.config.log_file.clone(),
            app_mode: app_mode.to_string(),
            admin,
            current_user: user.display_name().to_string(),
            settings: self.config.settings_dump(),
        }
    }
}
