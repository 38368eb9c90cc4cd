pub mod mock_editor;
pub mod mock_notifier;
pub mod stub_server;

use codetrans::config::Config;

/// Config pointing at `base_url`, everything else default
pub fn config_for(base_url: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        ..Config::default()
    }
}
