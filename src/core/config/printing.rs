use crate::core::config::data::Config;

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.server_url {
            Some(url) => println!("  server-url: {url}"),
            None => println!(
                "  server-url: (unset, using {})",
                self.resolved_server_url()
            ),
        }
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (unset, using {})", self.theme_mode().as_str()),
        }
        match self.request_timeout_secs {
            Some(secs) => println!("  request-timeout: {secs}s"),
            None => println!("  request-timeout: (unset)"),
        }
    }
}
